//! Human-readable output and the optional JSON dump.

use std::io::{self, Write};
use std::path::Path;

use invariant_core::{BatchRun, InvariantBundle};

use crate::stats::{Descriptive, Flagged, SequenceSummary, SurveySummary};

/// Failure writing survey output.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print every invariant of one genus.
pub fn print_bundle(b: &InvariantBundle) {
    println!("--- Surface of genus {} ---", b.genus);
    println!(
        "  Postnikov:      k = {:?}, whitehead = {}, tertiary = {}",
        b.k_invariants, b.whitehead_product, b.tertiary_homotopy
    );
    println!("  Quantum corr.:  {:.6}", b.quantum_homotopy_correction);
    println!(
        "  Gauge theory:   donaldson = {:.6e}, SW = {:.6e}, instanton = {:.6}, exotic = {}",
        b.donaldson, b.sw_invariant, b.instanton_correction, b.exotic_structure_analysis
    );
    println!(
        "  SFT:            sft = [{}], floer = {:?}, GW = {:?}",
        b.sft_invariants.iter().map(|v| format!("{v:.6e}")).collect::<Vec<_>>().join(", "),
        b.floer_homology,
        b.higher_gw_invariants
    );
    println!("  Interaction:    {:.6}", b.interaction_term);
    println!("  Mirror corr.:   {:.6}", b.mirror_symmetry_correction);
    println!("  K-theory:       {}", b.k_theory_invariant);
    println!("  Total:          {:.6e}", b.total_invariant);
    println!();
}

/// Print the skip table to stdout.
pub fn print_skipped(run: &BatchRun) {
    let stdout = io::stdout();
    if let Err(e) = write_skipped(&mut stdout.lock(), run) {
        log::warn!("could not print skipped genera: {e}");
    }
}

/// List genera that failed to evaluate, or say that none did.
pub fn write_skipped<W: Write>(out: &mut W, run: &BatchRun) -> io::Result<()> {
    let skipped: Vec<_> = run.skipped().collect();
    if skipped.is_empty() {
        return writeln!(out, "All {} genera evaluated.", run.outcomes.len());
    }
    writeln!(out, "Skipped {} of {} genera:", skipped.len(), run.outcomes.len())?;
    writeln!(out, "  {:>6} {:>9}  {}", "genus", "kind", "reason")?;
    writeln!(out, "  {}", "-".repeat(60))?;
    for (genus, error) in skipped {
        writeln!(out, "  {:>6} {:>9}  {}", genus, error.kind(), error)?;
    }
    Ok(())
}

/// Print the statistical summary.
pub fn print_summary(summary: &SurveySummary) {
    println!("\n=== Statistical Summary ({} genera) ===", summary.evaluated);

    let sequences = [("interaction", &summary.interaction), ("total", &summary.total)];

    println!(
        "\n{:>12} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "series", "mean", "median", "std_dev", "variance", "min", "max"
    );
    println!("{}", "-".repeat(104));
    for (name, seq) in &sequences {
        match seq {
            Some(s) => print_descriptive_row(name, &s.descriptive),
            None => println!("{name:>12}  (no data)"),
        }
    }

    for (name, seq) in &sequences {
        if let Some(s) = seq {
            print_fits(name, s);
        }
    }

    print_flags(
        &format!("|total - interaction| > {:e}", summary.consistency_threshold),
        &summary.inconsistent,
    );
    print_flags(
        &format!("total beyond {} sigma of the mean", summary.extreme_sigma),
        &summary.extremes,
    );
}

fn print_descriptive_row(name: &str, d: &Descriptive) {
    let variance = d
        .variance
        .map(|v| format!("{v:>14.6e}"))
        .unwrap_or_else(|| format!("{:>14}", "overflow"));
    println!(
        "{:>12} {:>14.6e} {:>14.6e} {:>14.6e} {} {:>14.6e} {:>14.6e}",
        name, d.mean, d.median, d.std_dev, variance, d.min, d.max
    );
}

fn print_fits(name: &str, s: &SequenceSummary) {
    println!("\nRegression of {name} on genus");
    match &s.linear {
        Some(f) => println!(
            "  linear:     slope = {:.6e}, intercept = {:.6e}, R² = {:.6}",
            f.slope, f.intercept, f.r_squared
        ),
        None => println!("  linear:     (insufficient data)"),
    }
    match &s.quadratic {
        Some(f) => println!(
            "  quadratic:  a = {:.6e}, b = {:.6e}, c = {:.6e}, R² = {:.6}",
            f.a, f.b, f.c, f.r_squared
        ),
        None => println!("  quadratic:  (insufficient data)"),
    }
    if let Some(ci) = &s.bootstrap {
        println!(
            "  bootstrap:  {:.0}% CI for mean = [{:.6e}, {:.6e}] ({} resamples)",
            ci.confidence * 100.0,
            ci.low,
            ci.high,
            ci.resamples
        );
    }
}

fn print_flags(label: &str, flags: &[Flagged]) {
    println!("\nGenera with {label}: {}", flags.len());
    if flags.is_empty() {
        return;
    }
    let shown: Vec<String> = flags.iter().take(12).map(|f| f.genus.to_string()).collect();
    let more = if flags.len() > 12 {
        format!(", ... (+{})", flags.len() - 12)
    } else {
        String::new()
    };
    println!("  [{}{more}]", shown.join(", "));
}

/// Pretty-print `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: serde::Serialize>(value: &T, path: &str) -> Result<(), ReportError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    log::info!("wrote {path}");
    Ok(())
}
