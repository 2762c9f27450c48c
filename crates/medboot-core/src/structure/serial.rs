//! Serial (chained) mediation structure: `X → M₁ → … → Mₖ → Y`.

use super::validation;
use super::{ParametricModel, PathIndices, PathKeys, SharedTable};
use crate::error::ValidationError;
use crate::table::ObservationTable;
use crate::types::{Covariance, ParameterVector};

/// Fitted serial mediation with `k ≥ 2` mediators.
///
/// `d_path[i]` is the coefficient of `Mᵢ₊₁` regressed on `Mᵢ` (0-based),
/// so the indirect effect through the whole chain is
/// `a · Π d · b`.
#[derive(Debug, Clone)]
pub struct SerialMediationStructure {
    a_path: f64,
    d_path: Vec<f64>,
    b_path: f64,
    c_prime: f64,
    parameters: ParameterVector,
    covariance: Covariance,
    path_indices: PathIndices,
    mediator_names: Vec<String>,
    mediator_predictors: Vec<Vec<String>>,
    sigma_mediators: Option<Vec<f64>>,
    sigma_outcome: Option<f64>,
    treatment_name: String,
    outcome_name: String,
    outcome_predictors: Vec<String>,
    source_data: Option<SharedTable>,
    n_obs: usize,
    converged: bool,
    source_label: String,
}

impl SerialMediationStructure {
    /// Start building a serial structure.
    pub fn builder(
        parameters: ParameterVector,
        covariance: Covariance,
    ) -> SerialMediationStructureBuilder {
        SerialMediationStructureBuilder::new(parameters, covariance)
    }

    /// Treatment → first mediator.
    pub fn a_path(&self) -> f64 {
        self.a_path
    }

    /// Mediator → next mediator coefficients, `k − 1` of them.
    pub fn d_path(&self) -> &[f64] {
        &self.d_path
    }

    /// Last mediator → outcome.
    pub fn b_path(&self) -> f64 {
        self.b_path
    }

    /// Direct treatment → outcome.
    pub fn c_prime(&self) -> f64 {
        self.c_prime
    }

    /// Mediator names in chain order.
    pub fn mediator_names(&self) -> &[String] {
        &self.mediator_names
    }

    /// Predictors of each mediator stage. Stage `i` may reference mediators
    /// before it.
    pub fn mediator_predictors(&self) -> &[Vec<String>] {
        &self.mediator_predictors
    }

    /// Residual standard deviation of each mediator model, if reported.
    pub fn sigma_mediators(&self) -> Option<&[f64]> {
        self.sigma_mediators.as_deref()
    }

    /// Residual standard deviation of the outcome model, if reported.
    pub fn sigma_outcome(&self) -> Option<f64> {
        self.sigma_outcome
    }

    /// Treatment variable.
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// Outcome variable.
    pub fn outcome_name(&self) -> &str {
        &self.outcome_name
    }

    /// Predictors of the outcome model.
    pub fn outcome_predictors(&self) -> &[String] {
        &self.outcome_predictors
    }

    /// Whether every sub-model reported convergence.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Identity of the fitting engine.
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// The source table handle, for sharing without a copy.
    pub fn shared_source_data(&self) -> Option<&SharedTable> {
        self.source_data.as_ref()
    }
}

impl ParametricModel for SerialMediationStructure {
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

/// Builder for [`SerialMediationStructure`].
///
/// Path keys default to `a`, `d1 … d{k-1}`, `b`, `c_prime`. Mediator stage
/// predictors default to the canonical chain: stage `i` is regressed on the
/// treatment and every earlier mediator.
#[derive(Debug, Clone)]
pub struct SerialMediationStructureBuilder {
    parameters: ParameterVector,
    covariance: Covariance,
    keys: Option<PathKeys>,
    paths: Option<(f64, Vec<f64>, f64, f64)>,
    treatment_name: Option<String>,
    outcome_name: Option<String>,
    mediator_names: Vec<String>,
    mediator_predictors: Option<Vec<Vec<String>>>,
    outcome_predictors: Vec<String>,
    sigma_mediators: Option<Vec<f64>>,
    sigma_outcome: Option<f64>,
    source_data: Option<SharedTable>,
    n_obs: Option<usize>,
    converged: bool,
    source_label: String,
}

impl SerialMediationStructureBuilder {
    fn new(parameters: ParameterVector, covariance: Covariance) -> Self {
        Self {
            parameters,
            covariance,
            keys: None,
            paths: None,
            treatment_name: None,
            outcome_name: None,
            mediator_names: Vec::new(),
            mediator_predictors: None,
            outcome_predictors: Vec::new(),
            sigma_mediators: None,
            sigma_outcome: None,
            source_data: None,
            n_obs: None,
            converged: true,
            source_label: String::new(),
        }
    }

    /// Override the parameter names the paths are read from.
    pub fn path_keys(mut self, keys: PathKeys) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Declare the path coefficients explicitly.
    pub fn paths(mut self, a_path: f64, d_path: Vec<f64>, b_path: f64, c_prime: f64) -> Self {
        self.paths = Some((a_path, d_path, b_path, c_prime));
        self
    }

    /// Treatment and outcome variable names.
    pub fn variables(mut self, treatment: impl Into<String>, outcome: impl Into<String>) -> Self {
        self.treatment_name = Some(treatment.into());
        self.outcome_name = Some(outcome.into());
        self
    }

    /// Mediator names in chain order.
    pub fn mediators<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.mediator_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Predictor lists per mediator. Defaults to the treatment plus every
    /// earlier mediator.
    pub fn mediator_predictors(mut self, predictors: Vec<Vec<String>>) -> Self {
        self.mediator_predictors = Some(predictors);
        self
    }

    /// Predictors of the outcome model.
    pub fn outcome_predictors(mut self, predictors: Vec<String>) -> Self {
        self.outcome_predictors = predictors;
        self
    }

    /// Residual standard deviations of the mediator and outcome models.
    pub fn sigmas(mut self, mediators: Option<Vec<f64>>, outcome: Option<f64>) -> Self {
        self.sigma_mediators = mediators;
        self.sigma_outcome = outcome;
        self
    }

    /// Observation count. Defaults to the source table's row count.
    pub fn n_obs(mut self, n_obs: usize) -> Self {
        self.n_obs = Some(n_obs);
        self
    }

    /// Attach the original observation table.
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
    pub fn build(self) -> Result<SerialMediationStructure, ValidationError> {
        let k = self.mediator_names.len();
        if k < 2 {
            return Err(ValidationError::TooFewMediators { got: k });
        }
        validation::distinct_mediators(&self.mediator_names)?;

        let treatment_name = validation::require(self.treatment_name, "treatment_name")?;
        let outcome_name = validation::require(self.outcome_name, "outcome_name")?;

        let keys = self.keys.unwrap_or_else(|| PathKeys::conventional(k));
        let (a_decl, d_decl, b_decl, c_decl) = match self.paths {
            Some((a, d, b, c)) => (Some(a), Some(d), Some(b), Some(c)),
            None => (None, None, None, None),
        };

        let d_len = d_decl.as_ref().map_or(keys.d.len(), Vec::len);
        if d_len != k - 1 || keys.d.len() != k - 1 {
            return Err(ValidationError::DPathLength {
                mediators: k,
                expected: k - 1,
                got: if d_len != k - 1 { d_len } else { keys.d.len() },
            });
        }

        let mediator_predictors = match self.mediator_predictors {
            Some(p) => p,
            None => canonical_predictors(&treatment_name, &self.mediator_names),
        };
        if mediator_predictors.len() != k {
            return Err(ValidationError::MediatorPredictorsLength {
                expected: k,
                got: mediator_predictors.len(),
            });
        }

        if let Some(sigmas) = &self.sigma_mediators {
            if sigmas.len() != k {
                return Err(ValidationError::SigmaMediatorsLength {
                    expected: k,
                    got: sigmas.len(),
                });
            }
            for &s in sigmas {
                validation::sigma("sigma_mediators", Some(s))?;
            }
        }
        validation::sigma("sigma_outcome", self.sigma_outcome)?;

        validation::covariance(&self.parameters, &self.covariance)?;
        let n_obs = validation::require(self.n_obs, "n_obs")?;
        validation::observations(n_obs, self.source_data.as_deref())?;

        let (a_idx, a_path) = validation::path("a_path", &keys.a, a_decl, &self.parameters)?;
        let mut d_idx = Vec::with_capacity(k - 1);
        let mut d_path = Vec::with_capacity(k - 1);
        for (i, key) in keys.d.iter().enumerate() {
            let declared = d_decl.as_ref().map(|d| d[i]);
            let (idx, value) = validation::path("d_path", key, declared, &self.parameters)?;
            d_idx.push(idx);
            d_path.push(value);
        }
        let (b_idx, b_path) = validation::path("b_path", &keys.b, b_decl, &self.parameters)?;
        let (c_idx, c_prime) =
            validation::path("c_prime", &keys.c_prime, c_decl, &self.parameters)?;

        Ok(SerialMediationStructure {
            a_path,
            d_path,
            b_path,
            c_prime,
            parameters: self.parameters,
            covariance: self.covariance,
            path_indices: PathIndices {
                a: a_idx,
                d: d_idx,
                b: b_idx,
                c_prime: c_idx,
            },
            mediator_names: self.mediator_names,
            mediator_predictors,
            sigma_mediators: self.sigma_mediators,
            sigma_outcome: self.sigma_outcome,
            treatment_name,
            outcome_name,
            outcome_predictors: self.outcome_predictors,
            source_data: self.source_data,
            n_obs,
            converged: self.converged,
            source_label: self.source_label,
        })
    }
}

/// Stage `i` is regressed on the treatment and mediators `0..i`.
fn canonical_predictors(treatment: &str, mediators: &[String]) -> Vec<Vec<String>> {
    (0..mediators.len())
        .map(|i| {
            std::iter::once(treatment.to_string())
                .chain(mediators[..i].iter().cloned())
                .collect()
        })
        .collect()
}
