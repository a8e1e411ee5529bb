//! genus-survey: sweep the invariant evaluator over a genus range and
//! summarise the resulting interaction-term and total-invariant series.

pub mod config;
pub mod report;
pub mod stats;

use invariant_core::{run_batch, run_batch_parallel, BatchRun, Genus};
use serde::Serialize;

use crate::config::SurveyConfig;
use crate::stats::SurveySummary;

/// A finished survey: every per-genus outcome plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    pub min_genus: u32,
    pub max_genus: u32,
    pub run: BatchRun,
    pub summary: SurveySummary,
}

/// Run the sweep described by `config` and summarise it.
pub fn run_survey(config: &SurveyConfig) -> Survey {
    let (min, max) = (Genus::new(config.min_genus), Genus::new(config.max_genus));
    let run = if config.parallel {
        run_batch_parallel(min, max)
    } else {
        run_batch(min, max)
    };
    let summary = SurveySummary::compute(&run.series(), config);
    Survey {
        min_genus: config.min_genus,
        max_genus: config.max_genus,
        run,
        summary,
    }
}
