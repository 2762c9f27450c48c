//! Configuration for a bootstrap run.

use crate::constants::{
    DEFAULT_CI_LEVEL, DEFAULT_MAX_FAILURE_FRACTION, DEFAULT_MIN_SUCCESSES, DEFAULT_N_BOOT,
    QUICK_N_BOOT, THOROUGH_N_BOOT,
};
use crate::error::ConfigurationError;

/// Settings shared by every bootstrap method.
///
/// The plugin method ignores everything except `seed`; the others validate
/// all fields before any work starts.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Number of replicates to request.
    ///
    /// Default: 1000
    pub n_boot: usize,

    /// Confidence level of the percentile interval, in (0, 1).
    ///
    /// Default: 0.95
    pub ci_level: f64,

    /// Evaluate replicates on a worker pool.
    ///
    /// Results are identical to sequential evaluation for the same seed.
    /// Without the `parallel` feature this is ignored with a warning.
    ///
    /// Default: false
    pub parallel: bool,

    /// Worker count for parallel runs. `None` uses rayon's global pool.
    ///
    /// Default: None
    pub workers: Option<usize>,

    /// Master seed. `None` draws one from OS entropy; the seed actually used
    /// is recorded on the outcome either way.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Largest fraction of nonparametric replicates allowed to fail, in [0, 1).
    ///
    /// Default: 0.10
    pub max_failure_fraction: f64,

    /// Fewest successful nonparametric replicates accepted (capped at
    /// `n_boot`).
    ///
    /// Default: 10
    pub min_successes: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_boot: DEFAULT_N_BOOT,
            ci_level: DEFAULT_CI_LEVEL,
            parallel: false,
            workers: None,
            seed: None,
            max_failure_fraction: DEFAULT_MAX_FAILURE_FRACTION,
            min_successes: DEFAULT_MIN_SUCCESSES,
        }
    }
}

impl BootstrapConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Few replicates, for exploration and tests.
    pub fn quick() -> Self {
        Self {
            n_boot: QUICK_N_BOOT,
            ..Default::default()
        }
    }

    /// Many replicates, for stable tail quantiles of reported intervals.
    pub fn thorough() -> Self {
        Self {
            n_boot: THOROUGH_N_BOOT,
            ..Default::default()
        }
    }

    /// Number of replicates.
    pub fn n_boot(mut self, n_boot: usize) -> Self {
        self.n_boot = n_boot;
        self
    }

    /// Confidence level of the percentile interval.
    pub fn ci_level(mut self, level: f64) -> Self {
        self.ci_level = level;
        self
    }

    /// Evaluate replicates on the global rayon pool. Without the `parallel`
    /// feature this logs a warning and runs sequentially.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a dedicated pool of `workers` threads. Implies `parallel`.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self.parallel = true;
        self
    }

    /// Fix the master seed. Without one, a fresh seed is drawn per run and
    /// recorded on the outcome.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Largest tolerated share of failed nonparametric replicates.
    pub fn max_failure_fraction(mut self, fraction: f64) -> Self {
        self.max_failure_fraction = fraction;
        self
    }

    /// Fewest successful nonparametric replicates accepted, capped at `n_boot`.
    pub fn min_successes(mut self, min: usize) -> Self {
        self.min_successes = min;
        self
    }

    /// Check every field. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.n_boot == 0 {
            return Err(ConfigurationError::ZeroReplicates);
        }
        if !(self.ci_level > 0.0 && self.ci_level < 1.0) {
            return Err(ConfigurationError::CiLevel(self.ci_level));
        }
        if !(0.0..1.0).contains(&self.max_failure_fraction) {
            return Err(ConfigurationError::FailureFraction(self.max_failure_fraction));
        }
        if self.workers == Some(0) {
            return Err(ConfigurationError::ZeroWorkers);
        }
        Ok(())
    }

    /// Effective success floor for this run.
    pub(crate) fn success_floor(&self) -> usize {
        self.min_successes.min(self.n_boot)
    }
}
