//! Error taxonomy for structure construction and bootstrap runs.
//!
//! - [`ValidationError`]: a data-model invariant was violated at construction.
//! - [`ConfigurationError`]: a run was requested with missing inputs or an
//!   unusable numeric precondition.
//! - [`BootstrapError`]: everything a bootstrap run can fail with, including
//!   the fatal [`BootstrapError::InsufficientReplicates`].
//!
//! Per-replicate failures are not errors at this level; they are recorded as
//! [`ResamplingFailure`] values and only escalate once too many accumulate.

use thiserror::Error;

/// Error raised when a value object would violate one of its invariants.
///
/// Construction never coerces; the first violated invariant is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A builder field with no default was never set.
    #[error("required field '{0}' was not supplied")]
    MissingField(&'static str),

    /// A path coefficient is NaN or infinite.
    #[error("{field} must be a finite scalar, got {value}")]
    NonFiniteCoefficient {
        /// Path field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The covariance matrix is not square.
    #[error("covariance must be square, got {rows}x{cols}")]
    CovarianceNotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// Estimates and covariance disagree in dimension.
    #[error("estimates has length {estimates} but covariance has dimension {covariance}")]
    DimensionMismatch {
        /// Length of the estimate vector.
        estimates: usize,
        /// Dimension of the covariance.
        covariance: usize,
    },

    /// Parameter names and values differ in length.
    #[error("{names} parameter names supplied for {estimates} estimates")]
    ParameterNamesMismatch {
        /// Number of names.
        names: usize,
        /// Number of values.
        estimates: usize,
    },

    /// Two parameters share a name.
    #[error("duplicate parameter name '{0}'")]
    DuplicateParameterName(String),

    /// A path key names no parameter.
    #[error("path key '{key}' for {field} is not among the estimate names")]
    UnknownPathKey {
        /// Path field name.
        field: &'static str,
        /// The unresolved key.
        key: String,
    },

    /// A declared path value differs from its keyed estimate.
    #[error("{field} is {value} but estimates['{key}'] is {estimate}")]
    PathValueMismatch {
        /// Path field name.
        field: &'static str,
        /// Key into the parameter vector.
        key: String,
        /// Declared value.
        value: f64,
        /// Value stored under `key`.
        estimate: f64,
    },

    /// A residual standard deviation is negative or NaN.
    #[error("{field} must be >= 0, got {value}")]
    NegativeSigma {
        /// Sigma field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// `n_obs` is zero.
    #[error("n_obs must be >= 1")]
    ZeroObservations,

    /// The attached source table has the wrong number of rows.
    #[error("source data has {rows} rows but n_obs is {n_obs}")]
    SourceRowMismatch {
        /// Declared observation count.
        n_obs: usize,
        /// Rows in the table.
        rows: usize,
    },

    /// A serial chain has fewer than two mediators.
    #[error("serial mediation needs at least 2 mediators, got {got}")]
    TooFewMediators {
        /// Mediators supplied.
        got: usize,
    },

    /// The chain has the wrong number of mediator-to-mediator paths.
    #[error("d_path must have {expected} entries for {mediators} mediators, got {got}")]
    DPathLength {
        /// Mediators in the chain.
        mediators: usize,
        /// Required length, one less than `mediators`.
        expected: usize,
        /// Length supplied.
        got: usize,
    },

    /// One predictor list per mediator was not supplied.
    #[error("mediator_predictors must have {expected} entries, got {got}")]
    MediatorPredictorsLength {
        /// Number of mediators.
        expected: usize,
        /// Lists supplied.
        got: usize,
    },

    /// Two mediators share a name.
    #[error("duplicate mediator name '{0}'")]
    DuplicateMediatorName(String),

    /// One sigma per mediator was not supplied.
    #[error("sigma_mediators must have {expected} entries, got {got}")]
    SigmaMediatorsLength {
        /// Number of mediators.
        expected: usize,
        /// Sigmas supplied.
        got: usize,
    },

    /// Interval bounds are out of order.
    #[error("ci_lower ({lower}) exceeds ci_upper ({upper})")]
    CiOrder {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },

    /// Outcome confidence level outside `(0, 1)`.
    #[error("ci_level must be in (0, 1), got {0}")]
    CiLevel(f64),

    /// The replicate distribution length differs from `n_boot`.
    #[error("replicate distribution has {got} values but n_boot is {n_boot}")]
    ReplicateCount {
        /// Declared replicate count.
        n_boot: usize,
        /// Values present.
        got: usize,
    },

    /// A plugin outcome carries replicates or a defined interval.
    #[error("plugin outcome must have n_boot == 0, no replicates and NaN interval")]
    PluginShape,

    /// A table has no rows or no columns.
    #[error("observation table must have at least one row and one column")]
    EmptyTable,

    /// Columns differ in length.
    #[error("column '{column}' has {got} values, expected {expected}")]
    ColumnLength {
        /// Column name.
        column: String,
        /// Length of the first column.
        expected: usize,
        /// Length of this column.
        got: usize,
    },

    /// Column names and matrix width differ.
    #[error("{names} column names supplied for {columns} columns")]
    ColumnNamesMismatch {
        /// Names supplied.
        names: usize,
        /// Matrix columns.
        columns: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Error raised when a bootstrap run is configured incorrectly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The method needs a structure and none was given.
    #[error("{method} bootstrap requires a fitted structure")]
    MissingStructure {
        /// Requested method.
        method: &'static str,
    },

    /// No table was given and the structure carries none.
    #[error("{method} bootstrap requires the original observation table")]
    MissingTable {
        /// Requested method.
        method: &'static str,
    },

    /// The statistic takes the wrong kind of input for the method.
    #[error("{method} bootstrap needs a {expected} statistic")]
    StatisticKind {
        /// Requested method.
        method: &'static str,
        /// Statistic kind the method needs.
        expected: &'static str,
    },

    /// `n_boot` is zero.
    #[error("n_boot must be >= 1")]
    ZeroReplicates,

    /// Requested confidence level outside `(0, 1)`.
    #[error("ci_level must be in (0, 1), got {0}")]
    CiLevel(f64),

    /// Failure fraction outside `[0, 1)`.
    #[error("max_failure_fraction must be in [0, 1), got {0}")]
    FailureFraction(f64),

    /// A worker pool of size zero was requested.
    #[error("workers must be >= 1")]
    ZeroWorkers,

    /// The covariance has NaN or infinite entries.
    #[error("covariance contains non-finite entries")]
    NonFiniteCovariance,

    /// The covariance is not symmetric within tolerance.
    #[error("covariance is not symmetric (max asymmetry {asymmetry:e})")]
    AsymmetricCovariance {
        /// Largest `|Σ - Σᵀ|` entry.
        asymmetry: f64,
    },

    /// The covariance has a negative eigenvalue beyond tolerance.
    #[error("covariance is not positive semi-definite (min eigenvalue {min_eigenvalue:e})")]
    NotPositiveSemiDefinite {
        /// Smallest eigenvalue.
        min_eigenvalue: f64,
    },

    /// The rayon pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Error returned by a bootstrap run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootstrapError {
    /// An outcome failed its own invariants.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The run was misconfigured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The statistic failed or was non-finite on the original data.
    #[error("statistic failed on the original data: {0}")]
    EstimateFailed(String),

    /// Too many nonparametric replicates failed.
    #[error(
        "too many failed replicates: {succeeded} succeeded, {failed} failed of {requested} \
         (need >= {min_successes} successes and <= {max_failure_fraction} failure fraction)"
    )]
    InsufficientReplicates {
        /// Replicates that produced a finite value.
        succeeded: usize,
        /// Replicates that failed.
        failed: usize,
        /// Replicates requested.
        requested: usize,
        /// Configured success floor.
        min_successes: usize,
        /// Configured failure fraction ceiling.
        max_failure_fraction: f64,
    },
}

/// Result alias for bootstrap runs.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Boxed error a user statistic may return for a single replicate.
pub type StatisticError = Box<dyn std::error::Error + Send + Sync>;

/// A single nonparametric replicate that could not be evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResamplingFailure {
    /// Replicate index (0-based, order of generation).
    pub index: usize,
    /// Why the replicate was dropped.
    pub reason: FailureReason,
}

/// Cause of a [`ResamplingFailure`].
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// The statistic returned an error.
    Statistic(String),
    /// The statistic returned NaN or an infinity.
    NonFinite(f64),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Statistic(msg) => write!(f, "{}", msg),
            FailureReason::NonFinite(v) => write!(f, "statistic returned non-finite value {}", v),
        }
    }
}
