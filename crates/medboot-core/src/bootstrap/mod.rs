//! Bootstrap inference for arbitrary scalar statistics of a mediation fit.
//!
//! Three regimes are available:
//!
//! - **parametric**: draw parameter vectors from `N(estimates, covariance)`
//!   and evaluate the statistic on each;
//! - **nonparametric**: resample observation rows with replacement and
//!   evaluate the statistic on each resampled table, tolerating a bounded
//!   number of failures;
//! - **plugin**: the statistic at the point estimates, with no interval.
//!
//! Intervals are equal-tailed percentile intervals of the replicates.

mod engine;
mod executor;
mod nonparametric;
mod parametric;
mod plugin;

pub use engine::{BootstrapEngine, ParameterStatistic, Statistic, TableStatistic};
pub use parametric::EffectOutcomes;

use crate::config::BootstrapConfig;
use crate::error::BootstrapResult;
use crate::result::{BootstrapMethod, BootstrapOutcome};
use crate::structure::ParametricModel;
use crate::table::ObservationTable;

/// Run one bootstrap.
///
/// `structure` is required for the parametric and plugin methods, `table`
/// (or a structure carrying its source data) for the nonparametric one.
pub fn bootstrap(
    statistic: &Statistic,
    method: BootstrapMethod,
    structure: Option<&dyn ParametricModel>,
    table: Option<&ObservationTable>,
    config: &BootstrapConfig,
) -> BootstrapResult<BootstrapOutcome> {
    BootstrapEngine::new(config.clone()).run(statistic, method, structure, table)
}

/// Parametric bootstrap of indirect, direct, total effect and proportion
/// mediated.
pub fn bootstrap_effects<M: ParametricModel + ?Sized>(
    model: &M,
    config: &BootstrapConfig,
) -> BootstrapResult<EffectOutcomes> {
    BootstrapEngine::new(config.clone()).effects(model)
}
