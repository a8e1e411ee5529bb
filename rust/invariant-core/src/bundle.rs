use serde::Serialize;

use crate::genus::Genus;

/// Every invariant computed for one genus.
///
/// Built once by [`crate::evaluate_genus`] and never mutated. All real-valued
/// fields are finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvariantBundle {
    pub genus: Genus,

    // Postnikov tower proxies
    /// `g^i + C(g, i)` for i in 0..3.
    pub k_invariants: [u64; 3],
    /// `C(g, 2)`.
    pub whitehead_product: u64,
    pub tertiary_homotopy: u64,
    pub quantum_homotopy_correction: f64,

    // Gauge theory
    pub donaldson: f64,
    pub sw_invariant: f64,
    pub instanton_correction: f64,
    pub exotic_structure_analysis: u64,

    // Symplectic field theory
    /// `(g + i)!` for i in 0..3.
    pub sft_invariants: [f64; 3],
    pub floer_homology: [u64; 4],
    pub higher_gw_invariants: [u64; 3],
    pub interaction_term: f64,

    pub mirror_symmetry_correction: f64,
    pub k_theory_invariant: u64,

    /// `sum(sft_invariants) + interaction_term + k_theory_invariant + exotic_structure_analysis`.
    pub total_invariant: f64,
}

impl InvariantBundle {
    pub fn sft_sum(&self) -> f64 {
        self.sft_invariants.iter().sum()
    }

    /// `sum(k_invariants)`, saturating.
    pub fn k_invariant_sum(&self) -> u64 {
        self.k_invariants.iter().fold(0u64, |acc, &k| acc.saturating_add(k))
    }
}
