//! Genus sweep: evaluate every genus in a range and collect the series the
//! statistics stage consumes.
//!
//! A failing genus never aborts the sweep. It is logged, kept as a
//! [`GenusOutcome::Skipped`] entry, and left out of the [`ResultSeries`].

use rayon::prelude::*;
use serde::Serialize;

use crate::bundle::InvariantBundle;
use crate::error::InvariantError;
use crate::evaluator::evaluate_genus;
use crate::genus::Genus;

/// Result of evaluating a single genus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenusOutcome {
    Evaluated(InvariantBundle),
    Skipped { genus: Genus, error: InvariantError },
}

impl GenusOutcome {
    fn from_result(genus: Genus, result: Result<InvariantBundle, InvariantError>) -> Self {
        match result {
            Ok(bundle) => GenusOutcome::Evaluated(bundle),
            Err(error) => {
                log::warn!("genus {genus}: {error}, skipping");
                GenusOutcome::Skipped { genus, error }
            }
        }
    }

    pub fn genus(&self) -> Genus {
        match self {
            GenusOutcome::Evaluated(b) => b.genus,
            GenusOutcome::Skipped { genus, .. } => *genus,
        }
    }
}

/// One row of the series handed to statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesRecord {
    pub genus: Genus,
    pub interaction_term: f64,
    pub total_invariant: f64,
}

/// Evaluated genera in ascending order, with their two scalar outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSeries {
    pub records: Vec<SeriesRecord>,
}

impl ResultSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Genus of each record as `f64`, the regressor for every fit.
    pub fn genera(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.genus.get() as f64).collect()
    }

    pub fn interaction_terms(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.interaction_term).collect()
    }

    pub fn total_invariants(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_invariant).collect()
    }
}

/// Every outcome of a sweep, ordered by genus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchRun {
    pub outcomes: Vec<GenusOutcome>,
}

impl BatchRun {
    pub fn evaluated(&self) -> impl Iterator<Item = &InvariantBundle> {
        self.outcomes.iter().filter_map(|o| match o {
            GenusOutcome::Evaluated(b) => Some(b),
            GenusOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (Genus, &InvariantError)> {
        self.outcomes.iter().filter_map(|o| match o {
            GenusOutcome::Skipped { genus, error } => Some((*genus, error)),
            GenusOutcome::Evaluated(_) => None,
        })
    }

    pub fn series(&self) -> ResultSeries {
        ResultSeries {
            records: self
                .evaluated()
                .map(|b| SeriesRecord {
                    genus: b.genus,
                    interaction_term: b.interaction_term,
                    total_invariant: b.total_invariant,
                })
                .collect(),
        }
    }
}

/// Evaluate `min..=max` one genus at a time, ascending.
pub fn run_batch(min: Genus, max: Genus) -> BatchRun {
    log::info!("evaluating genus {min}..={max} sequentially");
    let outcomes: Vec<GenusOutcome> = Genus::range(min.get(), max.get())
        .map(|g| GenusOutcome::from_result(g, evaluate_genus(g)))
        .collect();
    finish(outcomes)
}

/// Same result as [`run_batch`], with genera evaluated across the Rayon pool.
pub fn run_batch_parallel(min: Genus, max: Genus) -> BatchRun {
    log::info!("evaluating genus {min}..={max} in parallel");
    let mut outcomes: Vec<GenusOutcome> = (min.get()..=max.get())
        .into_par_iter()
        .map(|g| {
            let g = Genus::new(g);
            GenusOutcome::from_result(g, evaluate_genus(g))
        })
        .collect();
    // Series position must track genus for the downstream fits.
    outcomes.sort_by_key(GenusOutcome::genus);
    finish(outcomes)
}

fn finish(outcomes: Vec<GenusOutcome>) -> BatchRun {
    let run = BatchRun { outcomes };
    let skipped = run.skipped().count();
    log::info!(
        "batch finished: {} evaluated, {} skipped",
        run.outcomes.len() - skipped,
        skipped
    );
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_ascending_and_complete() {
        let run = run_batch(Genus::new(0), Genus::new(30));
        let series = run.series();
        assert_eq!(series.len(), 31);
        assert_eq!(run.skipped().count(), 0);
        let genera = series.genera();
        for (i, g) in genera.iter().enumerate() {
            assert_eq!(*g, i as f64);
        }
    }

    #[test]
    fn test_overflowing_genera_are_skipped() {
        let run = run_batch(Genus::new(165), Genus::new(175));
        let skipped: Vec<u32> = run.skipped().map(|(g, _)| g.get()).collect();
        assert_eq!(skipped, (169..=175).collect::<Vec<_>>());
        let series = run.series();
        assert_eq!(series.len(), 4);
        assert!(series.total_invariants().iter().all(|t| t.is_finite()));
        assert_eq!(run.outcomes.len(), 11);
    }

    #[test]
    fn test_empty_range() {
        let run = run_batch(Genus::new(5), Genus::new(4));
        assert!(run.outcomes.is_empty());
        assert!(run.series().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = run_batch(Genus::new(0), Genus::new(180));
        let b = run_batch_parallel(Genus::new(0), Genus::new(180));
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_values_match_bundles() {
        let run = run_batch(Genus::new(0), Genus::new(3));
        let series = run.series();
        for (rec, bundle) in series.records.iter().zip(run.evaluated()) {
            assert_eq!(rec.genus, bundle.genus);
            assert_eq!(rec.interaction_term, bundle.interaction_term);
            assert_eq!(rec.total_invariant, bundle.total_invariant);
        }
    }
}
