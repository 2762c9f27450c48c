//! Boundary with model-fitting engines.
//!
//! An extractor turns a fitted mediator model and a fitted outcome model into
//! a validated [`MediationStructure`]. Engines are plugged in explicitly
//! through an [`ExtractorRegistry`]; nothing registers itself.
//!
//! Fitting engines expose their results through [`FittedModel`]. The two
//! sub-models are fitted independently, so their estimates are combined
//! with [`combine_block_diagonal`], which sets every cross-model covariance
//! to zero. On shared data the estimation errors of the two models are in
//! general correlated; the zero blocks are an approximation.

mod combine;
mod registry;

pub use combine::{combine_block_diagonal, ModelBlock};
pub use registry::{ExtractorRegistry, RegistryError, LINEAR_ENGINE};

use medboot_core::{
    Covariance, Estimates, MediationStructure, PathKeys, SharedTable, ValidationError,
};
use thiserror::Error;

/// Name of the intercept term in coefficient vectors; excluded from
/// predictor lists.
pub const INTERCEPT: &str = "(Intercept)";

/// Read access to one fitted sub-model.
pub trait FittedModel: Send + Sync {
    /// Name of the response variable.
    fn response(&self) -> &str;

    /// Coefficient names, ordered like [`Self::coefficients`].
    fn coefficient_names(&self) -> &[String];

    /// Coefficient estimates.
    fn coefficients(&self) -> &Estimates;

    /// Covariance of the coefficients.
    fn covariance(&self) -> &Covariance;

    /// Residual standard deviation, for Gaussian models.
    fn sigma(&self) -> Option<f64> {
        None
    }

    /// Number of observations used in the fit.
    fn n_obs(&self) -> usize;

    /// Whether the fitting engine reported convergence.
    fn converged(&self) -> bool {
        true
    }

    /// Identity of the fitting engine.
    fn engine(&self) -> &str;

    /// Coefficient value by name.
    fn coefficient(&self, name: &str) -> Option<f64> {
        self.coefficient_names()
            .iter()
            .position(|n| n == name)
            .map(|i| self.coefficients()[i])
    }

    /// Predictors in model order, without the intercept.
    fn predictors(&self) -> Vec<String> {
        self.coefficient_names()
            .iter()
            .filter(|n| n.as_str() != INTERCEPT)
            .cloned()
            .collect()
    }
}

/// Plain fitted-model record for engines that hand over their results as
/// numbers.
#[derive(Debug, Clone)]
pub struct ModelFit {
    /// Response variable.
    pub response: String,
    /// Coefficient names.
    pub names: Vec<String>,
    /// Coefficient estimates, ordered like `names`.
    pub coefficients: Estimates,
    /// Coefficient covariance.
    pub covariance: Covariance,
    /// Residual standard deviation, if Gaussian.
    pub sigma: Option<f64>,
    /// Observations used in the fit.
    pub n_obs: usize,
    /// Whether the fit converged.
    pub converged: bool,
    /// Fitting engine identity.
    pub engine: String,
}

impl FittedModel for ModelFit {
    fn response(&self) -> &str {
        &self.response
    }

    fn coefficient_names(&self) -> &[String] {
        &self.names
    }

    fn coefficients(&self) -> &Estimates {
        &self.coefficients
    }

    fn covariance(&self) -> &Covariance {
        &self.covariance
    }

    fn sigma(&self) -> Option<f64> {
        self.sigma
    }

    fn n_obs(&self) -> usize {
        self.n_obs
    }

    fn converged(&self) -> bool {
        self.converged
    }

    fn engine(&self) -> &str {
        &self.engine
    }
}

/// Inputs to an extractor.
pub struct ExtractRequest<'a> {
    /// Model of the mediator given treatment and covariates.
    pub mediator_model: &'a dyn FittedModel,
    /// Model of the outcome given treatment, mediator and covariates.
    pub outcome_model: &'a dyn FittedModel,
    /// Treatment variable name.
    pub treatment: String,
    /// Mediator variable name.
    pub mediator: String,
    /// Defaults to the outcome model's response.
    pub outcome: Option<String>,
    /// Table both models were fitted on, kept for nonparametric runs.
    pub data: Option<SharedTable>,
}

impl<'a> ExtractRequest<'a> {
    /// Request for the given models and variable names.
    pub fn new(
        mediator_model: &'a dyn FittedModel,
        outcome_model: &'a dyn FittedModel,
        treatment: impl Into<String>,
        mediator: impl Into<String>,
    ) -> Self {
        Self {
            mediator_model,
            outcome_model,
            treatment: treatment.into(),
            mediator: mediator.into(),
            outcome: None,
            data: None,
        }
    }

    /// Override the outcome variable name.
    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Keep the table the models were fitted on.
    pub fn data(mut self, data: impl Into<SharedTable>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Error raised by an extractor.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A path coefficient is absent from a sub-model.
    #[error("{model} model has no coefficient '{name}'")]
    MissingCoefficient {
        /// Which sub-model.
        model: &'static str,
        /// The missing coefficient.
        name: String,
    },

    /// The sub-models were fitted on different numbers of rows.
    #[error("mediator and outcome models were fitted on {mediator} and {outcome} observations")]
    ObservationMismatch {
        /// Rows in the mediator fit.
        mediator: usize,
        /// Rows in the outcome fit.
        outcome: usize,
    },

    /// The combined structure violates an invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Engine-specific failure.
    #[error("{0}")]
    Engine(String),
}

/// Maps fitted sub-models into a [`MediationStructure`].
pub trait Extractor: Send + Sync {
    /// Build a validated structure from the request.
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<MediationStructure, ExtractError>;
}

impl<F> Extractor for F
where
    F: Fn(&ExtractRequest<'_>) -> Result<MediationStructure, ExtractError> + Send + Sync,
{
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<MediationStructure, ExtractError> {
        self(request)
    }
}

/// Extractor for linear models whose coefficients are named after their
/// predictors.
///
/// `a` is the treatment coefficient of the mediator model, `b` the mediator
/// coefficient of the outcome model and `c'` the treatment coefficient of the
/// outcome model. Parameters are named `<response>.<coefficient>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExtractor;

impl Extractor for LinearExtractor {
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<MediationStructure, ExtractError> {
        let med = request.mediator_model;
        let out = request.outcome_model;
        let treatment = &request.treatment;
        let mediator = &request.mediator;
        let outcome = request
            .outcome
            .clone()
            .unwrap_or_else(|| out.response().to_string());

        for (model, fit, name) in [
            ("mediator", med, treatment),
            ("outcome", out, mediator),
            ("outcome", out, treatment),
        ] {
            if fit.coefficient(name).is_none() {
                return Err(ExtractError::MissingCoefficient {
                    model,
                    name: name.clone(),
                });
            }
        }
        if med.n_obs() != out.n_obs() {
            return Err(ExtractError::ObservationMismatch {
                mediator: med.n_obs(),
                outcome: out.n_obs(),
            });
        }

        let med_prefix = med.response().to_string();
        let out_prefix = out.response().to_string();
        let (parameters, covariance) = combine_block_diagonal(&[
            ModelBlock::new(&med_prefix, med),
            ModelBlock::new(&out_prefix, out),
        ])?;
        let keys = PathKeys::simple(
            format!("{}.{}", med_prefix, treatment),
            format!("{}.{}", out_prefix, mediator),
            format!("{}.{}", out_prefix, treatment),
        );

        let mut builder = MediationStructure::builder(parameters, covariance)
            .path_keys(keys)
            .variables(treatment.clone(), mediator.clone(), outcome)
            .predictors(med.predictors(), out.predictors())
            .sigmas(med.sigma(), out.sigma())
            .n_obs(med.n_obs())
            .converged(med.converged() && out.converged())
            .source_label(med.engine());
        if let Some(data) = &request.data {
            builder = builder.source_data(data.clone());
        }
        Ok(builder.build()?)
    }
}
