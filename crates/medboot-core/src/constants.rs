//! Numeric constants and configuration defaults used throughout the crate.

/// Default number of bootstrap replicates.
pub const DEFAULT_N_BOOT: usize = 1000;

/// Default confidence level for percentile intervals.
pub const DEFAULT_CI_LEVEL: f64 = 0.95;

/// Default maximum fraction of nonparametric replicates allowed to fail
/// before the whole run is rejected.
pub const DEFAULT_MAX_FAILURE_FRACTION: f64 = 0.10;

/// Default minimum number of successful nonparametric replicates.
pub const DEFAULT_MIN_SUCCESSES: usize = 10;

/// Replicate count used by the `quick` preset.
pub const QUICK_N_BOOT: usize = 200;

/// Replicate count used by the `thorough` preset.
pub const THOROUGH_N_BOOT: usize = 5000;

/// Threshold below which a total effect is treated as zero when computing
/// the proportion mediated.
/// A few ulps above machine epsilon, so totals left over from cancelling
/// paths count as zero.
pub const DEGENERATE_TOTAL_EPS: f64 = 4.0 * f64::EPSILON;

/// Relative tolerance used when checking covariance symmetry and
/// positive semi-definiteness.
pub const COVARIANCE_TOLERANCE: f64 = 1e-10;

/// Golden-ratio increment used by the SplitMix64 counter mixer.
pub const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
