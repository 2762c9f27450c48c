//! Type aliases and the named parameter vector.

use std::ops::Index;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::error::ValidationError;

/// Dense covariance matrix of fitted parameters.
pub type Covariance = DMatrix<f64>;

/// Dense vector of fitted parameters.
pub type Estimates = DVector<f64>;

/// Parameter values keyed by name, in the same order as a structure's
/// `estimates`.
///
/// Statistic functions for the parametric and plugin methods receive one of
/// these per replicate. Values can be read by position (`theta[0]`) or by
/// name (`theta.get("a")`). Names are shared between replicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterVector {
    names: Arc<[String]>,
    values: DVector<f64>,
}

impl ParameterVector {
    /// Create a parameter vector, checking that names are unique and match
    /// the number of values.
    pub fn new(names: Vec<String>, values: DVector<f64>) -> Result<Self, ValidationError> {
        if names.len() != values.len() {
            return Err(ValidationError::ParameterNamesMismatch {
                names: names.len(),
                estimates: values.len(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ValidationError::DuplicateParameterName(name.clone()));
            }
        }
        Ok(Self {
            names: names.into(),
            values,
        })
    }

    /// Build a vector that reuses an existing (already validated) name table.
    pub(crate) fn with_shared_names(names: Arc<[String]>, values: DVector<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// Parameter names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    /// Parameter values in order.
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a named parameter.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Value of a named parameter.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|i| self.values[i])
    }

    /// Value of a named parameter, as an error suitable for returning from a
    /// fallible statistic.
    pub fn require(&self, name: &str) -> Result<f64, UnknownParameter> {
        self.get(name).ok_or_else(|| UnknownParameter(name.to_string()))
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl Index<usize> for ParameterVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

/// A statistic asked for a parameter that is not in the vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter '{0}'")]
pub struct UnknownParameter(pub String);
