//! Plain-text rendering of outcomes and effects.
//!
//! These back the `Display` impls. Coloured terminal output lives in the
//! `medboot` crate.

use std::fmt::{self, Write};

use crate::effects::Effects;
use crate::result::BootstrapOutcome;

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Format a number, rendering NaN as `NA`.
pub fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else {
        format!("{:.4}", v)
    }
}

/// Write the outcome summary lines (no header).
pub fn write_outcome<W: Write>(out: &mut W, outcome: &BootstrapOutcome) -> fmt::Result {
    writeln!(out, "  Method:    {}", outcome.method())?;
    writeln!(out, "  Estimate:  {}", fmt_value(outcome.estimate()))?;
    if outcome.is_plugin() {
        writeln!(out, "  CI:        not applicable (plugin)")?;
        return Ok(());
    }
    writeln!(
        out,
        "  {:.0}% CI:    [{}, {}]",
        outcome.ci_level() * 100.0,
        fmt_value(outcome.ci_lower()),
        fmt_value(outcome.ci_upper())
    )?;
    writeln!(out, "  Std error: {}", fmt_value(outcome.std_error()))?;
    if outcome.n_failed() > 0 {
        writeln!(
            out,
            "  Replicates: {} of {} ({} failed)",
            outcome.n_boot(),
            outcome.n_requested(),
            outcome.n_failed()
        )?;
    } else {
        writeln!(out, "  Replicates: {}", outcome.n_boot())?;
    }
    if let Some(seed) = outcome.seed() {
        writeln!(out, "  Seed:      {}", seed)?;
    }
    for warning in outcome.warnings() {
        writeln!(out, "  Warning:   {}", warning)?;
    }
    Ok(())
}

/// Write one line per effect.
pub fn write_effects<W: Write>(out: &mut W, effects: &Effects) -> fmt::Result {
    writeln!(out, "  Indirect:  {}", fmt_value(effects.indirect))?;
    writeln!(out, "  Direct:    {}", fmt_value(effects.direct))?;
    writeln!(out, "  Total:     {}", fmt_value(effects.total))?;
    writeln!(out, "  Prop. med: {}", fmt_value(effects.proportion_mediated))?;
    if let Some(warning) = effects.warning {
        writeln!(out, "  Warning:   {}", warning)?;
    }
    Ok(())
}

impl fmt::Display for BootstrapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bootstrap outcome")?;
        writeln!(f, "{}", SEPARATOR)?;
        write_outcome(f, self)
    }
}

impl fmt::Display for Effects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mediation effects")?;
        writeln!(f, "{}", SEPARATOR)?;
        write_effects(f, self)
    }
}
