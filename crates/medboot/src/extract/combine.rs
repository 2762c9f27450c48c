//! Block-diagonal combination of independently fitted sub-models.

use nalgebra::{DMatrix, DVector};

use medboot_core::{Covariance, ParameterVector, ValidationError};

use super::FittedModel;

/// One sub-model and the prefix its parameter names get in the combined
/// vector.
#[derive(Clone, Copy)]
pub struct ModelBlock<'a> {
    /// Prefix for this block's parameter names.
    pub prefix: &'a str,
    /// The fitted sub-model.
    pub model: &'a dyn FittedModel,
}

impl<'a> ModelBlock<'a> {
    /// Block for `model` with names prefixed by `prefix`.
    pub fn new(prefix: &'a str, model: &'a dyn FittedModel) -> Self {
        Self { prefix, model }
    }
}

/// Stack the coefficients of each block and place their covariances on the
/// diagonal of one matrix, leaving every cross-block entry zero.
///
/// Parameter `name` of a block with prefix `p` becomes `p.name`.
///
/// # Errors
///
/// Fails if a block's covariance does not match its coefficient count or two
/// combined names collide.
pub fn combine_block_diagonal(
    blocks: &[ModelBlock<'_>],
) -> Result<(ParameterVector, Covariance), ValidationError> {
    let mut names = Vec::new();
    let mut values = Vec::new();
    for block in blocks {
        let coefficients = block.model.coefficients();
        let block_names = block.model.coefficient_names();
        if block_names.len() != coefficients.len() {
            return Err(ValidationError::ParameterNamesMismatch {
                names: block_names.len(),
                estimates: coefficients.len(),
            });
        }
        let covariance = block.model.covariance();
        if !covariance.is_square() {
            return Err(ValidationError::CovarianceNotSquare {
                rows: covariance.nrows(),
                cols: covariance.ncols(),
            });
        }
        if covariance.nrows() != coefficients.len() {
            return Err(ValidationError::DimensionMismatch {
                estimates: coefficients.len(),
                covariance: covariance.nrows(),
            });
        }
        names.extend(block_names.iter().map(|n| format!("{}.{}", block.prefix, n)));
        values.extend(coefficients.iter().copied());
    }

    let dim = values.len();
    let mut covariance = DMatrix::zeros(dim, dim);
    let mut offset = 0;
    for block in blocks {
        let block_cov = block.model.covariance();
        let k = block_cov.nrows();
        covariance.view_mut((offset, offset), (k, k)).copy_from(block_cov);
        offset += k;
    }

    let parameters = ParameterVector::new(names, DVector::from_vec(values))?;
    Ok((parameters, covariance))
}
