//! Closed-form invariant formulas.
//!
//! One function per quantity, each a pure function of the genus. Exact
//! integer terms use checked `u64` arithmetic; factorials are exact `BigUint`
//! and only become `f64` through `finite_f64`, which rejects anything that
//! does not fit. No formula here can produce `inf` or `NaN` in a bundle.

use std::f64::consts::PI;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::bundle::InvariantBundle;
use crate::error::InvariantError;
use crate::genus::Genus;

type Result<T> = std::result::Result<T, InvariantError>;

/// Largest n with n! below `f64::MAX`.
pub const MAX_FINITE_FACTORIAL: u32 = 170;

/// Evaluate the bundle for a raw (possibly negative) genus.
pub fn evaluate(genus: i64) -> Result<InvariantBundle> {
    evaluate_genus(Genus::try_from(genus)?)
}

/// Evaluate every invariant for `genus`.
pub fn evaluate_genus(genus: Genus) -> Result<InvariantBundle> {
    let g = genus.get();

    let k_invariants = k_invariants(g)?;
    let whitehead_product = whitehead_product(g)?;
    let tertiary_homotopy = tertiary_homotopy(g)?;
    let quantum_homotopy_correction = quantum_homotopy_correction(g);

    // g!/(g+1) >= (g-1)!, so past this g! is never needed.
    let g_factorial = bounded_factorial(g, MAX_FINITE_FACTORIAL + 1, "donaldson")?;
    let donaldson = donaldson(g, &g_factorial)?;
    let sw_invariant = sw_invariant(g)?;
    let instanton_correction = instanton_correction(g)?;
    let exotic_structure_analysis = exotic_structure_analysis(g)?;

    let sft_invariants = sft_invariants(g, &g_factorial)?;
    let floer_homology = floer_homology(g)?;
    let higher_gw_invariants = higher_gw_invariants(g)?;
    let interaction_term = interaction_term(g);

    let mirror_symmetry_correction = mirror_symmetry_correction(g)?;
    let k_theory_invariant = k_theory_invariant(g)?;

    let total = sft_invariants.iter().sum::<f64>()
        + interaction_term
        + k_theory_invariant as f64
        + exotic_structure_analysis as f64;
    let total_invariant = finite(g, "total_invariant", total)?;

    Ok(InvariantBundle {
        genus,
        k_invariants,
        whitehead_product,
        tertiary_homotopy,
        quantum_homotopy_correction,
        donaldson,
        sw_invariant,
        instanton_correction,
        exotic_structure_analysis,
        sft_invariants,
        floer_homology,
        higher_gw_invariants,
        interaction_term,
        mirror_symmetry_correction,
        k_theory_invariant,
        total_invariant,
    })
}

/// Exact `n!`.
pub fn factorial(n: u32) -> BigUint {
    (2..=n).fold(BigUint::one(), |acc, k| acc * k)
}

/// `g!`, or `Overflow` without any bigint work when `g > limit`.
fn bounded_factorial(g: u32, limit: u32, quantity: &'static str) -> Result<BigUint> {
    if g > limit {
        return Err(InvariantError::Overflow { genus: g, quantity });
    }
    Ok(factorial(g))
}

// ---------------------------------------------------------------------------
// Postnikov tower
// ---------------------------------------------------------------------------

fn k_invariants(g: u32) -> Result<[u64; 3]> {
    let mut out = [0u64; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let power = (g as u64).checked_pow(i as u32);
        let binom = binomial_small(g as u64, i as u32);
        *slot = power
            .zip(binom)
            .and_then(|(p, c)| p.checked_add(c))
            .ok_or(InvariantError::Overflow { genus: g, quantity: "k_invariants" })?;
    }
    Ok(out)
}

/// `C(n, k)` for k ≤ 2.
fn binomial_small(n: u64, k: u32) -> Option<u64> {
    match k {
        0 => Some(1),
        1 => Some(n),
        2 => n.checked_mul(n.saturating_sub(1)).map(|p| p / 2),
        _ => None,
    }
}

fn whitehead_product(g: u32) -> Result<u64> {
    binomial_small(g as u64, 2)
        .ok_or(InvariantError::Overflow { genus: g, quantity: "whitehead_product" })
}

fn tertiary_homotopy(g: u32) -> Result<u64> {
    let g64 = g as u64;
    g64.checked_mul(g64)
        .and_then(|sq| sq.checked_add(g64))
        .ok_or(InvariantError::Overflow { genus: g, quantity: "tertiary_homotopy" })
}

fn quantum_homotopy_correction(g: u32) -> f64 {
    let g = g as f64;
    g / (g + 1.0) * (g + 3.0) / (g + 2.0)
}

// ---------------------------------------------------------------------------
// Gauge theory
// ---------------------------------------------------------------------------

/// `g! / (g + 1)`, divided exactly before leaving `BigUint`.
fn donaldson(g: u32, g_factorial: &BigUint) -> Result<f64> {
    let divisor = g as u64 + 1;
    let quotient = finite_f64(g, "donaldson", &(g_factorial / divisor))?;
    let remainder = (g_factorial % divisor).to_f64().unwrap_or(0.0);
    finite(g, "donaldson", quotient + remainder / divisor as f64)
}

fn sw_invariant(g: u32) -> Result<f64> {
    // powi takes i32; anything past i32::MAX is already far past f64 range.
    let exp = i32::try_from(g)
        .map_err(|_| InvariantError::Overflow { genus: g, quantity: "sw_invariant" })?;
    let root = sqrt_nonneg(g, PI * g as f64)?;
    if root == 0.0 {
        return Ok(0.0);
    }
    let power = finite(g, "sw_invariant", 2f64.powi(exp))?;
    finite(g, "sw_invariant", power * root)
}

fn instanton_correction(g: u32) -> Result<f64> {
    let gf = g as f64;
    let value = gf.powi(3) - gf + ln_nonneg(g, gf + 1.0)?;
    finite(g, "instanton_correction", value)
}

fn exotic_structure_analysis(g: u32) -> Result<u64> {
    let g64 = g as u64;
    g64.checked_mul(24)
        .zip(g64.checked_mul(g64))
        .and_then(|(a, b)| a.checked_add(b))
        .ok_or(InvariantError::Overflow { genus: g, quantity: "exotic_structure_analysis" })
}

// ---------------------------------------------------------------------------
// Symplectic field theory
// ---------------------------------------------------------------------------

fn sft_invariants(g: u32, g_factorial: &BigUint) -> Result<[f64; 3]> {
    if g as u64 + 2 > MAX_FINITE_FACTORIAL as u64 {
        return Err(InvariantError::Overflow { genus: g, quantity: "sft_invariants" });
    }
    // (g+1)! and (g+2)! extend g! instead of recomputing it.
    let f0 = g_factorial;
    let f1 = f0 * (g as u64 + 1);
    let f2 = &f1 * (g as u64 + 2);
    Ok([
        finite_f64(g, "sft_invariants", f0)?,
        finite_f64(g, "sft_invariants", &f1)?,
        finite_f64(g, "sft_invariants", &f2)?,
    ])
}

fn floer_homology(g: u32) -> Result<[u64; 4]> {
    let mut out = [0u64; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (g as u64)
            .checked_add(2 * i as u64)
            .ok_or(InvariantError::Overflow { genus: g, quantity: "floer_homology" })?;
    }
    Ok(out)
}

fn higher_gw_invariants(g: u32) -> Result<[u64; 3]> {
    let mut out = [0u64; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (g as u64)
            .checked_mul(2)
            .and_then(|v| v.checked_add(1 + 2 * i as u64))
            .ok_or(InvariantError::Overflow { genus: g, quantity: "higher_gw_invariants" })?;
    }
    Ok(out)
}

fn interaction_term(g: u32) -> f64 {
    let g = g as f64;
    420.0 * (g + 1.0) * (g + 3.0) / (g + 2.0)
}

// ---------------------------------------------------------------------------
// Mirror symmetry and K-theory
// ---------------------------------------------------------------------------

fn mirror_symmetry_correction(g: u32) -> Result<f64> {
    let gf = g as f64;
    let value = gf / (gf + 2.0) * ln_nonneg(g, gf + 1.0)?;
    finite(g, "mirror_symmetry_correction", value)
}

fn k_theory_invariant(g: u32) -> Result<u64> {
    let g64 = g as u64;
    g64.checked_mul(g64)
        .zip(g64.checked_mul(2))
        .and_then(|(a, b)| a.checked_add(b))
        .ok_or(InvariantError::Overflow { genus: g, quantity: "k_theory_invariant" })
}

// ---------------------------------------------------------------------------
// Numeric guards
// ---------------------------------------------------------------------------

fn finite(g: u32, quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvariantError::Overflow { genus: g, quantity })
    }
}

/// `BigUint -> f64`, rejecting values past `f64::MAX`.
fn finite_f64(g: u32, quantity: &'static str, value: &BigUint) -> Result<f64> {
    match value.to_f64() {
        Some(v) => finite(g, quantity, v),
        None => Err(InvariantError::Overflow { genus: g, quantity }),
    }
}

fn ln_nonneg(g: u32, x: f64) -> Result<f64> {
    if x > 0.0 {
        Ok(x.ln())
    } else {
        Err(InvariantError::Domain {
            genus: g as i64,
            reason: format!("log of non-positive argument {x}"),
        })
    }
}

fn sqrt_nonneg(g: u32, x: f64) -> Result<f64> {
    if x >= 0.0 {
        Ok(x.sqrt())
    } else {
        Err(InvariantError::Domain {
            genus: g as i64,
            reason: format!("sqrt of negative argument {x}"),
        })
    }
}
