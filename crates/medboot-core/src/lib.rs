//! Mediation structures and bootstrap inference.
//!
//! This crate holds the data model of a fitted mediation analysis (path
//! coefficients plus the full parameter vector and its covariance), the
//! effect algebra, and a bootstrap engine that turns any scalar statistic of
//! the fit into a point estimate with a percentile interval.
//!
//! # Features
//!
//! - `parallel`: evaluate replicates on a rayon thread pool. Results are
//!   identical to sequential runs for the same seed.
//!
//! # Usage
//!
//! This crate is typically used through the main `medboot` crate, which adds
//! extractor registration, CSV loading and output formatting.
//!
//! ```ignore
//! use medboot_core::{
//!     bootstrap::BootstrapEngine, BootstrapConfig, MediationStructure, ParameterVector,
//! };
//!
//! let engine = BootstrapEngine::new(BootstrapConfig::new().seed(7));
//! let outcome = engine.parametric(&structure, |theta| theta[0] * theta[1])?;
//! ```

#![warn(missing_docs)]

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod formatting;
pub mod result;
pub mod statistics;
pub mod structure;
pub mod table;
pub mod types;

// Re-export commonly used items at crate root
pub use bootstrap::{
    bootstrap, bootstrap_effects, BootstrapEngine, EffectOutcomes, Statistic,
};
pub use config::BootstrapConfig;
pub use effects::{effect_statistic, effects, EffectKind, EffectWarning, Effects};
pub use error::{
    BootstrapError, BootstrapResult, ConfigurationError, FailureReason, ResamplingFailure,
    StatisticError, ValidationError,
};
pub use result::{BootstrapMethod, BootstrapOutcome, BootstrapWarning};
pub use structure::{
    MediationModel, MediationStructure, MediationStructureBuilder, ParametricModel, PathIndices,
    PathKeys, SerialMediationStructure, SerialMediationStructureBuilder, SharedTable,
};
pub use table::ObservationTable;
pub use types::{Covariance, Estimates, ParameterVector, UnknownParameter};
