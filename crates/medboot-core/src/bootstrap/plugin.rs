//! Plugin estimator: the statistic at the point estimates, no interval.

use crate::result::BootstrapOutcome;
use crate::structure::ParametricModel;
use crate::types::ParameterVector;

pub(crate) fn run<M, F>(model: &M, statistic: F) -> BootstrapOutcome
where
    M: ParametricModel + ?Sized,
    F: Fn(&ParameterVector) -> f64,
{
    BootstrapOutcome::plugin(statistic(model.parameters()))
}
