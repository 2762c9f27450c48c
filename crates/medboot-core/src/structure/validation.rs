//! Construction-time checks shared by both structure variants.
//!
//! Every function returns the first violated invariant as a
//! [`ValidationError`]; nothing here adjusts its input.

use crate::error::ValidationError;
use crate::table::ObservationTable;
use crate::types::{Covariance, ParameterVector};

pub(super) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

pub(super) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteCoefficient { field, value })
    }
}

/// `sigma` must be absent or a non-negative number. NaN fails the check.
pub(super) fn sigma(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(ValidationError::NegativeSigma { field, value: v }),
        _ => Ok(()),
    }
}

pub(super) fn covariance(
    parameters: &ParameterVector,
    covariance: &Covariance,
) -> Result<(), ValidationError> {
    if !covariance.is_square() {
        return Err(ValidationError::CovarianceNotSquare {
            rows: covariance.nrows(),
            cols: covariance.ncols(),
        });
    }
    if parameters.len() != covariance.nrows() {
        return Err(ValidationError::DimensionMismatch {
            estimates: parameters.len(),
            covariance: covariance.nrows(),
        });
    }
    Ok(())
}

pub(super) fn observations(
    n_obs: usize,
    source: Option<&ObservationTable>,
) -> Result<(), ValidationError> {
    if n_obs == 0 {
        return Err(ValidationError::ZeroObservations);
    }
    if let Some(table) = source {
        if table.n_rows() != n_obs {
            return Err(ValidationError::SourceRowMismatch {
                n_obs,
                rows: table.n_rows(),
            });
        }
    }
    Ok(())
}

/// Locate a path coefficient in the parameter vector.
///
/// When the caller also declared the scalar value, it must agree exactly
/// with the estimate it is keyed to. Returns the index and the value.
pub(super) fn path(
    field: &'static str,
    key: &str,
    declared: Option<f64>,
    parameters: &ParameterVector,
) -> Result<(usize, f64), ValidationError> {
    let index = parameters
        .position(key)
        .ok_or_else(|| ValidationError::UnknownPathKey {
            field,
            key: key.to_string(),
        })?;
    let estimate = parameters[index];

    let value = match declared {
        Some(value) => {
            let value = finite(field, value)?;
            if value != estimate {
                return Err(ValidationError::PathValueMismatch {
                    field,
                    key: key.to_string(),
                    value,
                    estimate,
                });
            }
            value
        }
        None => finite(field, estimate)?,
    };
    Ok((index, value))
}

/// Names must be pairwise distinct.
pub(super) fn distinct_mediators(names: &[String]) -> Result<(), ValidationError> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(ValidationError::DuplicateMediatorName(name.clone()));
        }
    }
    Ok(())
}
