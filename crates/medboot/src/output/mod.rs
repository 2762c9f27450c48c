//! Output formatting for bootstrap results.
//!
//! This module provides formatters for displaying outcomes in different formats:
//! - Terminal: Human-readable output with colors
//! - JSON: Machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_effect_outcomes, format_effects, format_outcome};
