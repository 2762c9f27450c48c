//! # medboot
//!
//! Bootstrap inference for fitted mediation models.
//!
//! A fitted mediator model and a fitted outcome model are combined into one
//! validated [`MediationStructure`]; any scalar statistic of that structure
//! (an indirect effect, a contrast, anything computable from the parameter
//! vector) then gets a point estimate and a percentile confidence interval
//! from one of three regimes:
//!
//! - **parametric**: draws from `N(estimates, covariance)`;
//! - **nonparametric**: resampled observation rows, refitting in the statistic;
//! - **plugin**: point estimate only.
//!
//! ## Reproducibility
//!
//! Each replicate derives its random stream from `(seed, replicate index)`.
//! The same seed therefore gives bit-identical outcomes whether or not the
//! replicates run in parallel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use medboot::{
//!     extract::{ExtractRequest, ExtractorRegistry},
//!     BootstrapConfig, BootstrapEngine, EffectKind, effect_statistic,
//! };
//!
//! let registry = ExtractorRegistry::with_builtin();
//! let structure = registry.extract(
//!     "linear",
//!     &ExtractRequest::new(&mediator_fit, &outcome_fit, "x", "m").data(table),
//! )?;
//!
//! let engine = BootstrapEngine::new(BootstrapConfig::new().seed(7).parallel(true));
//! let indirect = engine.parametric(&structure, effect_statistic(&structure, EffectKind::Indirect))?;
//! println!("{}", medboot::output::format_outcome(&indirect));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Functional modules
pub mod data;
pub mod extract;
pub mod output;

// Re-exports for public API
pub use medboot_core::{
    bootstrap, bootstrap_effects, effect_statistic, effects, BootstrapConfig, BootstrapEngine,
    BootstrapError, BootstrapMethod, BootstrapOutcome, BootstrapResult, BootstrapWarning,
    ConfigurationError, EffectKind, EffectOutcomes, EffectWarning, Effects, FailureReason,
    MediationModel, MediationStructure, MediationStructureBuilder, ObservationTable,
    ParameterVector, ParametricModel, PathIndices, PathKeys, ResamplingFailure,
    SerialMediationStructure, SerialMediationStructureBuilder, SharedTable, Statistic,
    StatisticError, ValidationError,
};

/// Numeric building blocks (quantiles, covariance factors, seeding).
pub use medboot_core::statistics;
