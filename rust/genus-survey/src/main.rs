//! genus-survey CLI
//!
//! Usage:
//!   genus-survey [--mode=survey|quick] [--min-genus=N] [--max-genus=N] [--parallel]
//!                [--resamples=N] [--confidence=0.95] [--seed=N|0xHEX]
//!                [--threshold=1e5] [--sigma=3] [--quiet] [--json=<path>]
//!
//! Modes:
//!   survey — genus 0..=120 (default)
//!   quick  — genus 0..=20, 1000 bootstrap resamples
//!
//! Set RUST_LOG=info (or warn) to see sweep progress and skipped genera.

use genus_survey::config::SurveyConfig;
use genus_survey::report::{print_bundle, print_skipped, print_summary, write_json};
use genus_survey::run_survey;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match SurveyConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    println!("========================================");
    println!("  genus-survey: invariants for genus {}..={}", config.min_genus, config.max_genus);
    println!("========================================");
    println!(
        "Bootstrap: {} resamples at {:.0}%, seed 0x{:016x}\n",
        config.bootstrap_resamples,
        config.confidence * 100.0,
        config.seed
    );

    let survey = run_survey(&config);

    if config.show_bundles {
        for bundle in survey.run.evaluated() {
            print_bundle(bundle);
        }
    }
    print_skipped(&survey.run);
    print_summary(&survey.summary);

    if let Some(path) = &config.json_path {
        if let Err(e) = write_json(&survey, path) {
            eprintln!("Error writing {path}: {e}");
            std::process::exit(1);
        }
    }
}
