//! Effect algebra for mediation structures.
//!
//! - indirect = `a · Π d · b` (the `d` product is empty for simple mediation)
//! - direct = `c'`
//! - total = indirect + direct
//! - proportion mediated = indirect / total, NaN when `|total|` is below
//!   [`DEGENERATE_TOTAL_EPS`]
//!
//! Everything here works either on a structure's point estimates or on any
//! parameter vector laid out like its `estimates`, which is how the
//! parametric bootstrap evaluates effects on each draw.

use nalgebra::DVector;
use serde::Serialize;

use crate::constants::DEGENERATE_TOTAL_EPS;
use crate::structure::{ParametricModel, PathIndices};
use crate::types::ParameterVector;

/// Indirect, direct, total effect and proportion mediated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Effects {
    /// Product of the path coefficients along the chain.
    pub indirect: f64,
    /// `c'`.
    pub direct: f64,
    /// `indirect + direct`.
    pub total: f64,
    /// `indirect / total`, NaN when the total is degenerate.
    pub proportion_mediated: f64,
    /// Set when the proportion mediated could not be computed.
    pub warning: Option<EffectWarning>,
}

/// Non-fatal condition raised while computing effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EffectWarning {
    /// Total effect is numerically zero (e.g. suppression), so the proportion
    /// mediated is undefined.
    DegenerateTotal {
        /// The offending total effect.
        total: f64,
    },
}

impl std::fmt::Display for EffectWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectWarning::DegenerateTotal { total } => write!(
                f,
                "total effect {:e} is numerically zero; proportion mediated is undefined",
                total
            ),
        }
    }
}

impl Effects {
    /// Compute effects from explicit path coefficients.
    pub fn from_paths(a_path: f64, d_path: &[f64], b_path: f64, c_prime: f64) -> Self {
        let indirect = d_path.iter().fold(a_path, |acc, d| acc * d) * b_path;
        Self::from_components(indirect, c_prime)
    }

    /// Compute effects from a parameter vector laid out per `indices`.
    pub fn from_values(indices: &PathIndices, values: &DVector<f64>) -> Self {
        let indirect = indices.d.iter().fold(values[indices.a], |acc, &i| acc * values[i])
            * values[indices.b];
        Self::from_components(indirect, values[indices.c_prime])
    }

    fn from_components(indirect: f64, direct: f64) -> Self {
        let total = indirect + direct;
        let (proportion_mediated, warning) = if total.abs() < DEGENERATE_TOTAL_EPS {
            (f64::NAN, Some(EffectWarning::DegenerateTotal { total }))
        } else {
            (indirect / total, None)
        };
        Self {
            indirect,
            direct,
            total,
            proportion_mediated,
            warning,
        }
    }

    /// Read one effect.
    pub fn get(&self, kind: EffectKind) -> f64 {
        match kind {
            EffectKind::Indirect => self.indirect,
            EffectKind::Direct => self.direct,
            EffectKind::Total => self.total,
            EffectKind::ProportionMediated => self.proportion_mediated,
        }
    }
}

/// Which effect a statistic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EffectKind {
    /// Product of path coefficients along the mediator chain.
    Indirect,
    /// The `c'` path.
    Direct,
    /// Indirect plus direct.
    Total,
    /// Indirect over total. NaN when the total is zero.
    ProportionMediated,
}

impl EffectKind {
    /// All effect kinds in reporting order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Indirect,
        EffectKind::Direct,
        EffectKind::Total,
        EffectKind::ProportionMediated,
    ];

    /// Snake-case label used in output.
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Indirect => "indirect",
            EffectKind::Direct => "direct",
            EffectKind::Total => "total",
            EffectKind::ProportionMediated => "proportion_mediated",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Effects at a structure's point estimates.
///
/// A degenerate total is reported on the returned value and logged; it is
/// never an error.
pub fn effects<M: ParametricModel + ?Sized>(model: &M) -> Effects {
    let effects = Effects::from_values(model.path_indices(), model.parameters().values());
    if let Some(warning) = effects.warning {
        tracing::warn!(%warning, "degenerate effect");
    }
    effects
}

/// A parameter-vector statistic computing one effect, for use with the
/// parametric and plugin bootstrap methods.
pub fn effect_statistic<M: ParametricModel + ?Sized>(
    model: &M,
    kind: EffectKind,
) -> impl Fn(&ParameterVector) -> f64 + Send + Sync + 'static {
    let indices = model.path_indices().clone();
    move |theta: &ParameterVector| Effects::from_values(&indices, theta.values()).get(kind)
}
