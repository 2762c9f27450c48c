//! Fitted mediation structures.
//!
//! Two variants are supported:
//!
//! - [`MediationStructure`]: a single mediator, `X → M → Y` plus the direct
//!   path `X → Y`.
//! - [`SerialMediationStructure`]: a chain of `k ≥ 2` mediators,
//!   `X → M₁ → … → Mₖ → Y`.
//!
//! Both are immutable once built and share the [`ParametricModel`]
//! capability, which is all the bootstrap engine needs: the named parameter
//! vector, its covariance, and where the path coefficients live in it.
//! [`MediationModel`] is the tagged union used where either variant may
//! appear.

mod serial;
mod simple;
mod validation;

use std::sync::Arc;

pub use serial::{SerialMediationStructure, SerialMediationStructureBuilder};
pub use simple::{MediationStructure, MediationStructureBuilder};

use crate::table::ObservationTable;
use crate::types::{Covariance, Estimates, ParameterVector};

/// Names of the path coefficients inside a structure's `estimates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKeys {
    /// Treatment → first mediator.
    pub a: String,
    /// Mediator → next mediator, in chain order. Empty for simple mediation.
    pub d: Vec<String>,
    /// Last mediator → outcome.
    pub b: String,
    /// Treatment → outcome (direct).
    pub c_prime: String,
}

impl PathKeys {
    /// Keys for simple mediation.
    pub fn simple(a: impl Into<String>, b: impl Into<String>, c_prime: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            d: Vec::new(),
            b: b.into(),
            c_prime: c_prime.into(),
        }
    }

    /// Keys for serial mediation.
    pub fn serial<S: Into<String>>(
        a: impl Into<String>,
        d: impl IntoIterator<Item = S>,
        b: impl Into<String>,
        c_prime: impl Into<String>,
    ) -> Self {
        Self {
            a: a.into(),
            d: d.into_iter().map(Into::into).collect(),
            b: b.into(),
            c_prime: c_prime.into(),
        }
    }

    /// Conventional keys `a`, `d1 … d{k-1}`, `b`, `c_prime` for a chain of
    /// `k` mediators (`k = 1` gives simple mediation keys).
    pub fn conventional(k: usize) -> Self {
        Self::serial("a", (1..k).map(|i| format!("d{}", i)), "b", "c_prime")
    }
}

impl Default for PathKeys {
    fn default() -> Self {
        Self::conventional(1)
    }
}

/// Positions of the path coefficients inside the parameter vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIndices {
    /// Index of `a`.
    pub a: usize,
    /// Indices of the `d` paths in chain order.
    pub d: Vec<usize>,
    /// Index of `b`.
    pub b: usize,
    /// Index of `c'`.
    pub c_prime: usize,
}

/// Shared read access to the fitted parameters of either structure variant.
pub trait ParametricModel: Send + Sync {
    /// Named point estimates, ordered like the covariance.
    fn parameters(&self) -> &ParameterVector;

    /// Covariance of the estimates.
    fn covariance(&self) -> &Covariance;

    /// Where the path coefficients sit in [`Self::parameters`].
    fn path_indices(&self) -> &PathIndices;

    /// Number of observations the model was fitted on.
    fn n_obs(&self) -> usize;

    /// The original observation table, if the extractor kept it.
    fn source_data(&self) -> Option<&ObservationTable>;

    /// The full parameter vector and its covariance: `(names, estimates,
    /// covariance)`.
    fn as_parametric_model(&self) -> (&[String], &Estimates, &Covariance) {
        let params = self.parameters();
        (params.names(), params.values(), self.covariance())
    }
}

/// Either kind of fitted mediation structure.
#[derive(Debug, Clone)]
pub enum MediationModel {
    /// Single mediator.
    Simple(MediationStructure),
    /// Chain of mediators.
    Serial(SerialMediationStructure),
}

impl MediationModel {
    /// Number of mediators in the chain.
    pub fn n_mediators(&self) -> usize {
        match self {
            MediationModel::Simple(_) => 1,
            MediationModel::Serial(s) => s.mediator_names().len(),
        }
    }

    /// Identity of the fitting engine that produced the structure.
    pub fn source_label(&self) -> &str {
        match self {
            MediationModel::Simple(s) => s.source_label(),
            MediationModel::Serial(s) => s.source_label(),
        }
    }

    /// Whether both sub-models reported convergence.
    pub fn converged(&self) -> bool {
        match self {
            MediationModel::Simple(s) => s.converged(),
            MediationModel::Serial(s) => s.converged(),
        }
    }
}

impl ParametricModel for MediationModel {
    fn parameters(&self) -> &ParameterVector {
        match self {
            MediationModel::Simple(s) => s.parameters(),
            MediationModel::Serial(s) => s.parameters(),
        }
    }

    fn covariance(&self) -> &Covariance {
        match self {
            MediationModel::Simple(s) => s.covariance(),
            MediationModel::Serial(s) => s.covariance(),
        }
    }

    fn path_indices(&self) -> &PathIndices {
        match self {
            MediationModel::Simple(s) => s.path_indices(),
            MediationModel::Serial(s) => s.path_indices(),
        }
    }

    fn n_obs(&self) -> usize {
        match self {
            MediationModel::Simple(s) => s.n_obs(),
            MediationModel::Serial(s) => s.n_obs(),
        }
    }

    fn source_data(&self) -> Option<&ObservationTable> {
        match self {
            MediationModel::Simple(s) => s.source_data(),
            MediationModel::Serial(s) => s.source_data(),
        }
    }
}

impl From<MediationStructure> for MediationModel {
    fn from(s: MediationStructure) -> Self {
        MediationModel::Simple(s)
    }
}

impl From<SerialMediationStructure> for MediationModel {
    fn from(s: SerialMediationStructure) -> Self {
        MediationModel::Serial(s)
    }
}

/// Shared handle to an observation table; structures and callers can hold
/// the same table without copying it.
pub type SharedTable = Arc<ObservationTable>;
