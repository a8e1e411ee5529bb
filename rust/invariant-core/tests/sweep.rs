//! Integration tests for the evaluator and the genus sweep.
//!
//! Tests cover:
//! - Closed-form identities over the default sweep range
//! - Skip policy on overflow and domain errors
//! - Sequential / parallel agreement

use invariant_core::{
    evaluate, evaluate_genus, factorial, run_batch, run_batch_parallel, Genus, GenusOutcome,
    InvariantError,
};
use num_traits::ToPrimitive;

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

#[test]
fn test_total_is_sum_of_its_components() {
    for g in 0..=120u32 {
        let b = evaluate_genus(Genus::new(g)).unwrap();
        let expected = b.sft_sum()
            + b.interaction_term
            + b.k_theory_invariant as f64
            + b.exotic_structure_analysis as f64;
        assert_eq!(b.total_invariant, expected, "genus {g}");
    }
}

#[test]
fn test_sft_invariants_are_consecutive_factorials() {
    for g in [0u32, 1, 2, 10, 25, 100] {
        let b = evaluate_genus(Genus::new(g)).unwrap();
        for (i, v) in b.sft_invariants.iter().enumerate() {
            let exact = factorial(g + i as u32).to_f64().unwrap();
            assert_eq!(*v, exact, "genus {g}, index {i}");
        }
    }
}

#[test]
fn test_sequences_follow_linear_patterns() {
    for g in 0..=120u64 {
        let b = evaluate(g as i64).unwrap();
        assert_eq!(b.floer_homology, [g, g + 2, g + 4, g + 6]);
        assert_eq!(b.higher_gw_invariants, [2 * g + 1, 2 * g + 3, 2 * g + 5]);
        assert_eq!(b.k_theory_invariant, g * g + 2 * g);
        assert_eq!(b.tertiary_homotopy, g * g + g);
        assert_eq!(b.whitehead_product, g * g.saturating_sub(1) / 2);
    }
}

#[test]
fn test_k_invariant_sum_small_genus() {
    // g = 3: [1 + 1, 3 + 3, 9 + 3]
    let b = evaluate(3).unwrap();
    assert_eq!(b.k_invariants, [2, 6, 12]);
    assert_eq!(b.k_invariant_sum(), 20);
}

#[test]
fn test_bundles_are_finite_over_default_range() {
    for g in 0..=120u32 {
        let b = evaluate_genus(Genus::new(g)).unwrap();
        let reals = [
            b.quantum_homotopy_correction,
            b.donaldson,
            b.sw_invariant,
            b.instanton_correction,
            b.interaction_term,
            b.mirror_symmetry_correction,
            b.total_invariant,
        ];
        assert!(reals.iter().chain(b.sft_invariants.iter()).all(|v| v.is_finite()), "genus {g}");
    }
}

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

#[test]
fn test_default_range_has_no_skips() {
    let run = run_batch(Genus::new(0), Genus::new(120));
    assert_eq!(run.skipped().count(), 0);
    assert_eq!(run.series().len(), 121);
}

#[test]
fn test_sweep_continues_past_overflow() {
    let run = run_batch(Genus::new(160), Genus::new(200));
    let first_skip = run.skipped().next().map(|(g, e)| (g.get(), e.clone()));
    assert_eq!(
        first_skip,
        Some((169, InvariantError::Overflow { genus: 169, quantity: "sft_invariants" }))
    );
    assert_eq!(run.series().len(), 9);
    assert!(matches!(run.outcomes.last(), Some(GenusOutcome::Skipped { .. })));
}

#[test]
fn test_wide_sweep_skips_cheaply() {
    // Every genus past 168 is rejected before any factorial is built.
    let start = std::time::Instant::now();
    let run = run_batch(Genus::new(0), Genus::new(20_000));
    assert!(start.elapsed() < std::time::Duration::from_secs(10));
    assert_eq!(run.series().len(), 169);
    assert_eq!(run.skipped().count(), 20_000 - 168);
}

#[test]
fn test_negative_genus_never_panics() {
    for g in [-1i64, -2, -100, i64::MIN] {
        let err = evaluate(g).unwrap_err();
        assert_eq!(err.kind(), "domain");
        assert_eq!(err.genus(), g);
    }
}

#[test]
fn test_parallel_sweep_preserves_order() {
    let seq = run_batch(Genus::new(0), Genus::new(200));
    let par = run_batch_parallel(Genus::new(0), Genus::new(200));
    let seq_genera: Vec<u32> = seq.outcomes.iter().map(|o| o.genus().get()).collect();
    let par_genera: Vec<u32> = par.outcomes.iter().map(|o| o.genus().get()).collect();
    assert_eq!(seq_genera, (0..=200).collect::<Vec<_>>());
    assert_eq!(seq_genera, par_genera);
    assert_eq!(seq.series(), par.series());
}
