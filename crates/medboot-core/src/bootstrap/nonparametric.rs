//! Nonparametric bootstrap: resample observation rows and recompute.

use super::executor::map_replicates;
use crate::config::BootstrapConfig;
use crate::error::{
    BootstrapError, BootstrapResult, FailureReason, ResamplingFailure, StatisticError,
};
use crate::result::{BootstrapMethod, BootstrapOutcome, BootstrapWarning, ResampledParts};
use crate::statistics::{bootstrap_indices, percentile_interval, replicate_rng};
use crate::table::ObservationTable;

/// Evaluate one replicate. Errors and non-finite values become failures.
fn replicate<F>(
    table: &ObservationTable,
    statistic: &F,
    seed: u64,
    index: usize,
) -> Result<f64, FailureReason>
where
    F: Fn(&ObservationTable) -> Result<f64, StatisticError>,
{
    let mut rng = replicate_rng(seed, index);
    let rows = bootstrap_indices(&mut rng, table.n_rows());
    let sample = table.resample_rows(&rows);
    match statistic(&sample) {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(FailureReason::NonFinite(value)),
        Err(e) => Err(FailureReason::Statistic(e.to_string())),
    }
}

/// Run the nonparametric bootstrap.
///
/// Failed replicates are dropped. The run fails with
/// [`BootstrapError::InsufficientReplicates`] when more than
/// `max_failure_fraction · n_boot` fail or fewer than
/// `min(min_successes, n_boot)` succeed; otherwise a
/// [`BootstrapWarning::ReplicateFailures`] is recorded and the survivors are
/// used.
pub(crate) fn run<F>(
    table: &ObservationTable,
    statistic: F,
    config: &BootstrapConfig,
    seed: u64,
) -> BootstrapResult<BootstrapOutcome>
where
    F: Fn(&ObservationTable) -> Result<f64, StatisticError> + Sync,
{
    let estimate = match statistic(table) {
        Ok(value) if value.is_finite() => value,
        Ok(value) => {
            return Err(BootstrapError::EstimateFailed(
                FailureReason::NonFinite(value).to_string(),
            ))
        }
        Err(e) => return Err(BootstrapError::EstimateFailed(e.to_string())),
    };

    let results = map_replicates(config.n_boot, config, |i| replicate(table, &statistic, seed, i))?;

    let mut replicates = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(value) => replicates.push(value),
            Err(reason) => {
                tracing::trace!(index, %reason, "replicate failed");
                failures.push(ResamplingFailure { index, reason });
            }
        }
    }

    let requested = config.n_boot;
    let failed = failures.len();
    let succeeded = replicates.len();
    if failed as f64 > config.max_failure_fraction * requested as f64
        || succeeded < config.success_floor()
    {
        return Err(BootstrapError::InsufficientReplicates {
            succeeded,
            failed,
            requested,
            min_successes: config.min_successes,
            max_failure_fraction: config.max_failure_fraction,
        });
    }

    let mut warnings = Vec::new();
    if let Some(first) = failures.first() {
        tracing::warn!(
            failed,
            requested,
            first_index = first.index,
            first_reason = %first.reason,
            "excluding failed bootstrap replicates"
        );
        warnings.push(BootstrapWarning::replicate_failures(failed, requested, &first.reason));
    }

    let ci = percentile_interval(&replicates, config.ci_level);
    Ok(BootstrapOutcome::resampled(ResampledParts {
        method: BootstrapMethod::Nonparametric,
        estimate,
        ci,
        ci_level: config.ci_level,
        replicates,
        n_requested: requested,
        seed,
        warnings,
    })?)
}
