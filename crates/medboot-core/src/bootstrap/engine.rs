//! Dispatch between the three bootstrap methods.

use std::fmt;

use super::parametric::EffectOutcomes;
use super::{nonparametric, parametric, plugin};
use crate::config::BootstrapConfig;
use crate::error::{BootstrapResult, ConfigurationError, StatisticError};
use crate::result::{BootstrapMethod, BootstrapOutcome};
use crate::statistics::rng::entropy_seed;
use crate::structure::ParametricModel;
use crate::table::ObservationTable;
use crate::types::ParameterVector;

/// Statistic on a parameter vector keyed like a structure's estimates.
pub type ParameterStatistic = Box<dyn Fn(&ParameterVector) -> f64 + Send + Sync>;

/// Statistic on a (resampled) observation table. Responsible for any
/// refitting; an `Err` marks the replicate as failed.
pub type TableStatistic =
    Box<dyn Fn(&ObservationTable) -> Result<f64, StatisticError> + Send + Sync>;

/// A user statistic, tagged by what it consumes.
pub enum Statistic {
    /// For the parametric and plugin methods.
    Parameters(ParameterStatistic),
    /// For the nonparametric method.
    Table(TableStatistic),
}

impl Statistic {
    /// Wrap a statistic of the parameter vector.
    pub fn parameters<F>(f: F) -> Self
    where
        F: Fn(&ParameterVector) -> f64 + Send + Sync + 'static,
    {
        Statistic::Parameters(Box::new(f))
    }

    /// Wrap a statistic of an observation table. Returning `Err` marks the
    /// replicate as failed.
    pub fn table<F>(f: F) -> Self
    where
        F: Fn(&ObservationTable) -> Result<f64, StatisticError> + Send + Sync + 'static,
    {
        Statistic::Table(Box::new(f))
    }

    fn kind(&self) -> &'static str {
        match self {
            Statistic::Parameters(_) => "parameter-vector",
            Statistic::Table(_) => "observation-table",
        }
    }
}

impl fmt::Debug for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Statistic({})", self.kind())
    }
}

/// Runs bootstrap inference under one configuration.
///
/// Every run validates the configuration first and records the seed it used.
/// Replicate `i` draws all of its randomness from a generator seeded by
/// `(seed, i)`, so the same seed gives the same outcome with or without
/// `parallel`.
#[derive(Debug, Clone, Default)]
pub struct BootstrapEngine {
    config: BootstrapConfig,
}

impl BootstrapEngine {
    /// Engine running every method under `config`.
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// The configuration runs are checked against.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    fn prepare(&self, method: BootstrapMethod) -> BootstrapResult<u64> {
        self.config.validate()?;
        let seed = self.config.seed.unwrap_or_else(entropy_seed);
        tracing::debug!(
            %method,
            n_boot = self.config.n_boot,
            ci_level = self.config.ci_level,
            parallel = self.config.parallel,
            seed,
            "starting bootstrap"
        );
        Ok(seed)
    }

    /// Parametric bootstrap of a parameter-vector statistic.
    ///
    /// # Errors
    ///
    /// Configuration errors, including a covariance that is not positive
    /// semi-definite.
    pub fn parametric<M, F>(&self, model: &M, statistic: F) -> BootstrapResult<BootstrapOutcome>
    where
        M: ParametricModel + ?Sized,
        F: Fn(&ParameterVector) -> f64 + Sync,
    {
        let seed = self.prepare(BootstrapMethod::Parametric)?;
        parametric::run(model, statistic, &self.config, seed)
    }

    /// Nonparametric bootstrap of a table statistic.
    ///
    /// # Errors
    ///
    /// Configuration errors, a statistic that fails on `table` itself, or
    /// too many failed replicates.
    pub fn nonparametric<F>(
        &self,
        table: &ObservationTable,
        statistic: F,
    ) -> BootstrapResult<BootstrapOutcome>
    where
        F: Fn(&ObservationTable) -> Result<f64, StatisticError> + Sync,
    {
        let seed = self.prepare(BootstrapMethod::Nonparametric)?;
        nonparametric::run(table, statistic, &self.config, seed)
    }

    /// Plugin estimate. Ignores the configuration.
    pub fn plugin<M, F>(&self, model: &M, statistic: F) -> BootstrapOutcome
    where
        M: ParametricModel + ?Sized,
        F: Fn(&ParameterVector) -> f64,
    {
        tracing::debug!(method = %BootstrapMethod::Plugin, "starting bootstrap");
        plugin::run(model, statistic)
    }

    /// Parametric bootstrap of every effect on one shared set of draws.
    pub fn effects<M>(&self, model: &M) -> BootstrapResult<EffectOutcomes>
    where
        M: ParametricModel + ?Sized,
    {
        let seed = self.prepare(BootstrapMethod::Parametric)?;
        parametric::run_effects(model, &self.config, seed)
    }

    /// Run `method` with whichever inputs the caller has.
    ///
    /// The nonparametric method uses `table`, falling back to the
    /// structure's source data.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigurationError`] when the method's required
    /// input is missing or the statistic consumes the wrong kind of input.
    pub fn run(
        &self,
        statistic: &Statistic,
        method: BootstrapMethod,
        structure: Option<&dyn ParametricModel>,
        table: Option<&ObservationTable>,
    ) -> BootstrapResult<BootstrapOutcome> {
        let method_name = method.as_str();
        match method {
            BootstrapMethod::Parametric | BootstrapMethod::Plugin => {
                let model = structure.ok_or(ConfigurationError::MissingStructure {
                    method: method_name,
                })?;
                let Statistic::Parameters(f) = statistic else {
                    return Err(ConfigurationError::StatisticKind {
                        method: method_name,
                        expected: "parameter-vector",
                    }
                    .into());
                };
                if method == BootstrapMethod::Plugin {
                    Ok(self.plugin(model, &**f))
                } else {
                    self.parametric(model, &**f)
                }
            }
            BootstrapMethod::Nonparametric => {
                let table = table
                    .or_else(|| structure.and_then(|s| s.source_data()))
                    .ok_or(ConfigurationError::MissingTable {
                        method: method_name,
                    })?;
                let Statistic::Table(f) = statistic else {
                    return Err(ConfigurationError::StatisticKind {
                        method: method_name,
                        expected: "observation-table",
                    }
                    .into());
                };
                self.nonparametric(table, &**f)
            }
        }
    }
}
