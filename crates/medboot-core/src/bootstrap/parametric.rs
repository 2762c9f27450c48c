//! Parametric bootstrap: statistics of draws from `N(estimates, covariance)`.

use nalgebra::DMatrix;
use serde::Serialize;

use super::executor::map_replicates;
use crate::config::BootstrapConfig;
use crate::effects::{EffectKind, Effects};
use crate::error::{BootstrapResult, ValidationError};
use crate::result::{BootstrapMethod, BootstrapOutcome, ResampledParts};
use crate::statistics::{percentile_interval, CovarianceFactor};
use crate::structure::ParametricModel;
use crate::types::ParameterVector;

/// Factor the covariance and draw `config.n_boot` parameter vectors.
fn draw<M: ParametricModel + ?Sized>(
    model: &M,
    config: &BootstrapConfig,
    seed: u64,
) -> BootstrapResult<DMatrix<f64>> {
    let parameters = model.parameters();
    let covariance = model.covariance();
    if covariance.nrows() != parameters.len() || !covariance.is_square() {
        return Err(ValidationError::DimensionMismatch {
            estimates: parameters.len(),
            covariance: covariance.nrows(),
        }
        .into());
    }

    let factor = CovarianceFactor::new(covariance)?;
    tracing::debug!(
        dim = factor.dim(),
        kind = ?factor.kind(),
        "factored parameter covariance"
    );
    Ok(factor.sample(parameters.values(), config.n_boot, seed))
}

/// Run the parametric bootstrap for one parameter-vector statistic.
///
/// The point estimate is `statistic(estimates)`, not the mean of the
/// replicates. Non-finite replicate values are kept.
pub(crate) fn run<M, F>(
    model: &M,
    statistic: F,
    config: &BootstrapConfig,
    seed: u64,
) -> BootstrapResult<BootstrapOutcome>
where
    M: ParametricModel + ?Sized,
    F: Fn(&ParameterVector) -> f64 + Sync,
{
    let draws = draw(model, config, seed)?;
    let names = model.parameters().shared_names();

    let replicates = map_replicates(config.n_boot, config, |i| {
        let theta = ParameterVector::with_shared_names(names.clone(), draws.column(i).into_owned());
        statistic(&theta)
    })?;

    let estimate = statistic(model.parameters());
    let ci = percentile_interval(&replicates, config.ci_level);

    Ok(BootstrapOutcome::resampled(ResampledParts {
        method: BootstrapMethod::Parametric,
        estimate,
        ci,
        ci_level: config.ci_level,
        replicates,
        n_requested: config.n_boot,
        seed,
        warnings: Vec::new(),
    })?)
}

/// Parametric bootstrap outcomes for every effect, computed on one shared set
/// of draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectOutcomes {
    /// Product of paths along the chain.
    pub indirect: BootstrapOutcome,
    /// The `c'` path.
    pub direct: BootstrapOutcome,
    /// Indirect plus direct, per replicate.
    pub total: BootstrapOutcome,
    /// Indirect over total.
    pub proportion_mediated: BootstrapOutcome,
}

impl EffectOutcomes {
    /// Outcome for one effect.
    pub fn get(&self, kind: EffectKind) -> &BootstrapOutcome {
        match kind {
            EffectKind::Indirect => &self.indirect,
            EffectKind::Direct => &self.direct,
            EffectKind::Total => &self.total,
            EffectKind::ProportionMediated => &self.proportion_mediated,
        }
    }

    /// `(kind, outcome)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, &BootstrapOutcome)> + '_ {
        EffectKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

pub(crate) fn run_effects<M: ParametricModel + ?Sized>(
    model: &M,
    config: &BootstrapConfig,
    seed: u64,
) -> BootstrapResult<EffectOutcomes> {
    let draws = draw(model, config, seed)?;
    let indices = model.path_indices();

    let per_draw = map_replicates(config.n_boot, config, |i| {
        Effects::from_values(indices, &draws.column(i).into_owned())
    })?;
    let point = Effects::from_values(indices, model.parameters().values());

    let outcome = |kind: EffectKind| -> BootstrapResult<BootstrapOutcome> {
        let replicates: Vec<f64> = per_draw.iter().map(|e| e.get(kind)).collect();
        let ci = percentile_interval(&replicates, config.ci_level);
        Ok(BootstrapOutcome::resampled(ResampledParts {
            method: BootstrapMethod::Parametric,
            estimate: point.get(kind),
            ci,
            ci_level: config.ci_level,
            replicates,
            n_requested: config.n_boot,
            seed,
            warnings: Vec::new(),
        })?)
    };

    Ok(EffectOutcomes {
        indirect: outcome(EffectKind::Indirect)?,
        direct: outcome(EffectKind::Direct)?,
        total: outcome(EffectKind::Total)?,
        proportion_mediated: outcome(EffectKind::ProportionMediated)?,
    })
}
