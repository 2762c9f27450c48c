//! Simple (single mediator) mediation structure.

use super::validation;
use super::{ParametricModel, PathIndices, PathKeys, SharedTable};
use crate::error::ValidationError;
use crate::table::ObservationTable;
use crate::types::{Covariance, ParameterVector};

/// Fitted `X → M → Y` mediation: path coefficients, the full parameter
/// vector with its covariance, and metadata about the fit.
///
/// Built through [`MediationStructure::builder`], which validates every
/// invariant before returning. There are no setters.
#[derive(Debug, Clone)]
pub struct MediationStructure {
    a_path: f64,
    b_path: f64,
    c_prime: f64,
    parameters: ParameterVector,
    covariance: Covariance,
    path_indices: PathIndices,
    sigma_mediator: Option<f64>,
    sigma_outcome: Option<f64>,
    treatment_name: String,
    mediator_name: String,
    outcome_name: String,
    mediator_predictors: Vec<String>,
    outcome_predictors: Vec<String>,
    source_data: Option<SharedTable>,
    n_obs: usize,
    converged: bool,
    source_label: String,
}

impl MediationStructure {
    /// Start building a structure from the combined parameter vector and its
    /// covariance.
    pub fn builder(parameters: ParameterVector, covariance: Covariance) -> MediationStructureBuilder {
        MediationStructureBuilder::new(parameters, covariance)
    }

    /// Treatment → mediator coefficient.
    pub fn a_path(&self) -> f64 {
        self.a_path
    }

    /// Mediator → outcome coefficient.
    pub fn b_path(&self) -> f64 {
        self.b_path
    }

    /// Direct treatment → outcome coefficient.
    pub fn c_prime(&self) -> f64 {
        self.c_prime
    }

    /// Residual standard deviation of the mediator model, if Gaussian.
    pub fn sigma_mediator(&self) -> Option<f64> {
        self.sigma_mediator
    }

    /// Residual standard deviation of the outcome model, if Gaussian.
    pub fn sigma_outcome(&self) -> Option<f64> {
        self.sigma_outcome
    }

    /// Treatment variable.
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// Mediator variable.
    pub fn mediator_name(&self) -> &str {
        &self.mediator_name
    }

    /// Outcome variable.
    pub fn outcome_name(&self) -> &str {
        &self.outcome_name
    }

    /// Predictors of the mediator model, excluding the intercept.
    pub fn mediator_predictors(&self) -> &[String] {
        &self.mediator_predictors
    }

    /// Predictors of the outcome model, excluding the intercept.
    pub fn outcome_predictors(&self) -> &[String] {
        &self.outcome_predictors
    }

    /// Whether both sub-models reported convergence.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Identity of the fitting engine.
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Shared handle to the source table, if kept.
    pub fn shared_source_data(&self) -> Option<&SharedTable> {
        self.source_data.as_ref()
    }
}

impl ParametricModel for MediationStructure {
    fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }

    fn covariance(&self) -> &Covariance {
        &self.covariance
    }

    fn path_indices(&self) -> &PathIndices {
        &self.path_indices
    }

    fn n_obs(&self) -> usize {
        self.n_obs
    }

    fn source_data(&self) -> Option<&ObservationTable> {
        self.source_data.as_deref()
    }
}

/// Builder for [`MediationStructure`].
///
/// Path coefficients default to the estimates named by the path keys
/// (`a`, `b`, `c_prime` unless overridden). Declaring them explicitly with
/// [`paths`](Self::paths) cross-checks them against those estimates.
#[derive(Debug, Clone)]
pub struct MediationStructureBuilder {
    parameters: ParameterVector,
    covariance: Covariance,
    keys: PathKeys,
    paths: Option<(f64, f64, f64)>,
    sigma_mediator: Option<f64>,
    sigma_outcome: Option<f64>,
    treatment_name: Option<String>,
    mediator_name: Option<String>,
    outcome_name: Option<String>,
    mediator_predictors: Vec<String>,
    outcome_predictors: Vec<String>,
    source_data: Option<SharedTable>,
    n_obs: Option<usize>,
    converged: bool,
    source_label: String,
}

impl MediationStructureBuilder {
    fn new(parameters: ParameterVector, covariance: Covariance) -> Self {
        Self {
            parameters,
            covariance,
            keys: PathKeys::default(),
            paths: None,
            sigma_mediator: None,
            sigma_outcome: None,
            treatment_name: None,
            mediator_name: None,
            outcome_name: None,
            mediator_predictors: Vec::new(),
            outcome_predictors: Vec::new(),
            source_data: None,
            n_obs: None,
            converged: true,
            source_label: String::new(),
        }
    }

    /// Names of the `a`, `b` and `c'` estimates.
    pub fn path_keys(mut self, keys: PathKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Declare the path coefficients explicitly.
    pub fn paths(mut self, a_path: f64, b_path: f64, c_prime: f64) -> Self {
        self.paths = Some((a_path, b_path, c_prime));
        self
    }

    /// Treatment, mediator and outcome variable names.
    pub fn variables(
        mut self,
        treatment: impl Into<String>,
        mediator: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        self.treatment_name = Some(treatment.into());
        self.mediator_name = Some(mediator.into());
        self.outcome_name = Some(outcome.into());
        self
    }

    /// Covariates of the mediator and outcome models (no intercept).
    pub fn predictors(mut self, mediator: Vec<String>, outcome: Vec<String>) -> Self {
        self.mediator_predictors = mediator;
        self.outcome_predictors = outcome;
        self
    }

    /// Residual standard deviations.
    pub fn sigmas(mut self, mediator: Option<f64>, outcome: Option<f64>) -> Self {
        self.sigma_mediator = mediator;
        self.sigma_outcome = outcome;
        self
    }

    /// Observation count. Defaults to the source table's row count.
    pub fn n_obs(mut self, n_obs: usize) -> Self {
        self.n_obs = Some(n_obs);
        self
    }

    /// Keep the observation table the models were fitted on. Sets `n_obs`
    /// from the table when it has not been given.
    pub fn source_data(mut self, table: impl Into<SharedTable>) -> Self {
        let table = table.into();
        self.n_obs.get_or_insert(table.n_rows());
        self.source_data = Some(table);
        self
    }

    /// Record whether fitting converged. Defaults to `true`.
    pub fn converged(mut self, converged: bool) -> Self {
        self.converged = converged;
        self
    }

    /// Name the fitting engine.
    pub fn source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }

    /// Validate every invariant and build the structure.
    pub fn build(self) -> Result<MediationStructure, ValidationError> {
        let (a_decl, b_decl, c_decl) = match self.paths {
            Some((a, b, c)) => (Some(a), Some(b), Some(c)),
            None => (None, None, None),
        };
        validation::covariance(&self.parameters, &self.covariance)?;
        validation::sigma("sigma_mediator", self.sigma_mediator)?;
        validation::sigma("sigma_outcome", self.sigma_outcome)?;

        let n_obs = validation::require(self.n_obs, "n_obs")?;
        validation::observations(n_obs, self.source_data.as_deref())?;

        let (a_idx, a_path) = validation::path("a_path", &self.keys.a, a_decl, &self.parameters)?;
        let (b_idx, b_path) = validation::path("b_path", &self.keys.b, b_decl, &self.parameters)?;
        let (c_idx, c_prime) =
            validation::path("c_prime", &self.keys.c_prime, c_decl, &self.parameters)?;

        Ok(MediationStructure {
            a_path,
            b_path,
            c_prime,
            parameters: self.parameters,
            covariance: self.covariance,
            path_indices: PathIndices {
                a: a_idx,
                d: Vec::new(),
                b: b_idx,
                c_prime: c_idx,
            },
            sigma_mediator: self.sigma_mediator,
            sigma_outcome: self.sigma_outcome,
            treatment_name: validation::require(self.treatment_name, "treatment_name")?,
            mediator_name: validation::require(self.mediator_name, "mediator_name")?,
            outcome_name: validation::require(self.outcome_name, "outcome_name")?,
            mediator_predictors: self.mediator_predictors,
            outcome_predictors: self.outcome_predictors,
            source_data: self.source_data,
            n_obs,
            converged: self.converged,
            source_label: self.source_label,
        })
    }
}
