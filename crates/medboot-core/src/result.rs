//! Result types for bootstrap runs.

use std::fmt;

use serde::Serialize;

use crate::error::{FailureReason, ValidationError};
use crate::statistics::sample_std;

// ============================================================================
// BootstrapMethod
// ============================================================================

/// Resampling regime used to produce an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMethod {
    /// Draw parameter vectors from `N(estimates, covariance)`.
    Parametric,
    /// Resample observation rows with replacement and recompute.
    Nonparametric,
    /// Point estimate only.
    Plugin,
}

impl BootstrapMethod {
    /// Lower-case name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapMethod::Parametric => "parametric",
            BootstrapMethod::Nonparametric => "nonparametric",
            BootstrapMethod::Plugin => "plugin",
        }
    }
}

impl fmt::Display for BootstrapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal condition recorded on an outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BootstrapWarning {
    /// Some nonparametric replicates failed and were dropped.
    ReplicateFailures {
        /// Replicates dropped.
        failed: usize,
        /// Replicates requested.
        requested: usize,
        /// Reason given by the first failed replicate (lowest index).
        first_reason: String,
    },
}

impl BootstrapWarning {
    pub(crate) fn replicate_failures(failed: usize, requested: usize, first: &FailureReason) -> Self {
        BootstrapWarning::ReplicateFailures {
            failed,
            requested,
            first_reason: first.to_string(),
        }
    }
}

impl fmt::Display for BootstrapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapWarning::ReplicateFailures {
                failed,
                requested,
                first_reason,
            } => write!(
                f,
                "{} of {} replicates failed and were excluded (first: {})",
                failed, requested, first_reason
            ),
        }
    }
}

// ============================================================================
// BootstrapOutcome
// ============================================================================

/// Point estimate, percentile interval and replicate distribution of one
/// statistic.
///
/// Only the bootstrap engine constructs outcomes, and every constructor
/// checks:
///
/// - parametric and nonparametric: `n_boot >= 1`,
///   `replicate_distribution.len() == n_boot`, `0 < ci_level < 1` and
///   `ci_lower <= ci_upper` when both are defined;
/// - plugin: `n_boot == 0`, no replicates, NaN interval and level.
///
/// For nonparametric runs `n_boot` counts the *successful* replicates;
/// `n_requested` and `n_failed` keep the rest of the story.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapOutcome {
    estimate: f64,
    ci_lower: f64,
    ci_upper: f64,
    ci_level: f64,
    replicate_distribution: Vec<f64>,
    n_boot: usize,
    method: BootstrapMethod,
    n_requested: usize,
    n_failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<BootstrapWarning>,
}

/// Everything a resampling run hands over to build its outcome.
#[derive(Debug)]
pub(crate) struct ResampledParts {
    pub method: BootstrapMethod,
    pub estimate: f64,
    pub ci: (f64, f64),
    pub ci_level: f64,
    pub replicates: Vec<f64>,
    pub n_requested: usize,
    pub seed: u64,
    pub warnings: Vec<BootstrapWarning>,
}

impl BootstrapOutcome {
    pub(crate) fn resampled(parts: ResampledParts) -> Result<Self, ValidationError> {
        let ResampledParts {
            method,
            estimate,
            ci: (ci_lower, ci_upper),
            ci_level,
            replicates,
            n_requested,
            seed,
            warnings,
        } = parts;

        let n_boot = replicates.len();
        if method == BootstrapMethod::Plugin {
            return Err(ValidationError::PluginShape);
        }
        if n_boot == 0 || n_boot > n_requested {
            return Err(ValidationError::ReplicateCount {
                n_boot: n_requested,
                got: n_boot,
            });
        }
        if !(ci_level > 0.0 && ci_level < 1.0) {
            return Err(ValidationError::CiLevel(ci_level));
        }
        if !ci_lower.is_nan() && !ci_upper.is_nan() && ci_lower > ci_upper {
            return Err(ValidationError::CiOrder {
                lower: ci_lower,
                upper: ci_upper,
            });
        }

        Ok(Self {
            estimate,
            ci_lower,
            ci_upper,
            ci_level,
            replicate_distribution: replicates,
            n_boot,
            method,
            n_requested,
            n_failed: n_requested - n_boot,
            seed: Some(seed),
            warnings,
        })
    }

    pub(crate) fn plugin(estimate: f64) -> Self {
        Self {
            estimate,
            ci_lower: f64::NAN,
            ci_upper: f64::NAN,
            ci_level: f64::NAN,
            replicate_distribution: Vec::new(),
            n_boot: 0,
            method: BootstrapMethod::Plugin,
            n_requested: 0,
            n_failed: 0,
            seed: None,
            warnings: Vec::new(),
        }
    }

    /// Statistic evaluated at the point estimates (or the original table).
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Lower percentile bound. NaN for plugin outcomes.
    pub fn ci_lower(&self) -> f64 {
        self.ci_lower
    }

    /// Upper percentile bound. NaN for plugin outcomes.
    pub fn ci_upper(&self) -> f64 {
        self.ci_upper
    }

    /// `(ci_lower, ci_upper)`.
    pub fn ci(&self) -> (f64, f64) {
        (self.ci_lower, self.ci_upper)
    }

    /// NaN for plugin outcomes.
    pub fn ci_level(&self) -> f64 {
        self.ci_level
    }

    /// Replicate values in generation order. Empty for plugin outcomes.
    pub fn replicate_distribution(&self) -> &[f64] {
        &self.replicate_distribution
    }

    /// Number of replicates in the distribution.
    pub fn n_boot(&self) -> usize {
        self.n_boot
    }

    /// Method that produced the outcome.
    pub fn method(&self) -> BootstrapMethod {
        self.method
    }

    /// Replicates requested by the configuration. Zero for plugin.
    pub fn n_requested(&self) -> usize {
        self.n_requested
    }

    /// Replicates dropped after failing.
    pub fn n_failed(&self) -> usize {
        self.n_failed
    }

    /// Master seed the replicates were derived from.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Non-fatal conditions met during the run.
    pub fn warnings(&self) -> &[BootstrapWarning] {
        &self.warnings
    }

    /// Bootstrap standard error: sample standard deviation of the
    /// replicates. NaN for plugin outcomes and single-replicate runs.
    pub fn std_error(&self) -> f64 {
        sample_std(&self.replicate_distribution)
    }

    /// Whether this is a point estimate without an interval.
    pub fn is_plugin(&self) -> bool {
        self.method == BootstrapMethod::Plugin
    }
}
