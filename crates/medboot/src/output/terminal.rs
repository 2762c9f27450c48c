//! Terminal output formatting with colors.
//!
//! Colors come from the `colored` crate, which respects `NO_COLOR` and TTY
//! detection. The plain layout is shared with the `Display` impls in
//! `medboot-core`.

use std::fmt::Write;

use colored::Colorize;

use medboot_core::formatting::{fmt_value, write_effects, SEPARATOR};
use medboot_core::{BootstrapOutcome, EffectOutcomes, Effects};

/// Format an outcome for human-readable terminal output.
pub fn format_outcome(outcome: &BootstrapOutcome) -> String {
    let mut out = String::new();
    let _ = write_header(&mut out, "medboot");
    let _ = write_outcome_colored(&mut out, outcome);
    out
}

/// Format point effects for terminal output.
pub fn format_effects(effects: &Effects) -> String {
    let mut out = String::new();
    let _ = write_header(&mut out, "medboot effects");
    let _ = write_effects(&mut out, effects);
    out
}

/// Format bootstrapped effects as a table, one row per effect.
pub fn format_effect_outcomes(outcomes: &EffectOutcomes) -> String {
    let mut out = String::new();
    let _ = write_effect_table(&mut out, outcomes);
    out
}

fn write_header(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", title.bold())?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out)
}

fn write_outcome_colored(out: &mut String, outcome: &BootstrapOutcome) -> std::fmt::Result {
    writeln!(
        out,
        "  Method:    {}",
        outcome.method().to_string().cyan()
    )?;
    writeln!(
        out,
        "  Estimate:  {}",
        fmt_value(outcome.estimate()).bold()
    )?;

    if outcome.is_plugin() {
        writeln!(out, "  CI:        {}", "not applicable (plugin)".dimmed())?;
        return Ok(());
    }

    let interval = format!(
        "[{}, {}]",
        fmt_value(outcome.ci_lower()),
        fmt_value(outcome.ci_upper())
    );
    let interval = if excludes_zero(outcome) {
        interval.green().to_string()
    } else {
        interval
    };
    writeln!(
        out,
        "  {:.0}% CI:    {}",
        outcome.ci_level() * 100.0,
        interval
    )?;
    writeln!(out, "  Std error: {}", fmt_value(outcome.std_error()))?;

    let replicates = if outcome.n_failed() > 0 {
        format!(
            "{} of {} ({} failed)",
            outcome.n_boot(),
            outcome.n_requested(),
            outcome.n_failed()
        )
        .yellow()
        .to_string()
    } else {
        outcome.n_boot().to_string()
    };
    writeln!(out, "  Replicates: {}", replicates)?;

    if let Some(seed) = outcome.seed() {
        writeln!(out, "  {}", format!("Seed: {}", seed).dimmed())?;
    }
    for warning in outcome.warnings() {
        writeln!(out, "  {} {}", "\u{26A0}".yellow(), warning)?;
    }
    Ok(())
}

fn write_effect_table(out: &mut String, outcomes: &EffectOutcomes) -> std::fmt::Result {
    write_header(out, "medboot effects")?;
    let level = outcomes.indirect.ci_level() * 100.0;
    writeln!(
        out,
        "  {:<20} {:>10} {:>10} {:>10} {:>10}",
        "effect".bold(),
        "estimate".bold(),
        format!("{:.0}% lo", level).bold(),
        format!("{:.0}% hi", level).bold(),
        "se".bold()
    )?;
    for (kind, outcome) in outcomes.iter() {
        let row = format!(
            "  {:<20} {:>10} {:>10} {:>10} {:>10}",
            kind.label(),
            fmt_value(outcome.estimate()),
            fmt_value(outcome.ci_lower()),
            fmt_value(outcome.ci_upper()),
            fmt_value(outcome.std_error())
        );
        if excludes_zero(outcome) {
            writeln!(out, "{}", row.green())?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }
    writeln!(
        out,
        "  {}",
        format!("{} parametric replicates", outcomes.indirect.n_boot()).dimmed()
    )
}

/// Whether the interval lies entirely on one side of zero.
fn excludes_zero(outcome: &BootstrapOutcome) -> bool {
    let (lo, hi) = outcome.ci();
    lo > 0.0 || hi < 0.0
}
