//! Summary statistics over a [`ResultSeries`].
//!
//! Descriptive moments come from `statrs`; the fits are plain least squares.
//! Total invariants reach ~1e199 over the default range, so dispersion and
//! fit quality are computed on values rescaled by their largest magnitude.
//! Anything that still cannot be represented (the variance of the totals, for
//! one) is reported as `None` rather than `inf`.

use invariant_core::{Genus, ResultSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

use crate::config::SurveyConfig;

/// Moments and order statistics of one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Population variance; `None` when it exceeds `f64::MAX`.
    pub variance: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl Descriptive {
    pub fn of(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let scale = max_abs(data);
        let scaled: Vec<f64> = data.iter().map(|x| x / scale).collect();
        let std_dev = scaled.iter().population_std_dev() * scale;
        let variance = Some(std_dev * std_dev).filter(|v| v.is_finite());

        Some(Descriptive {
            count: data.len(),
            mean: data.iter().mean(),
            median: Data::new(data.to_vec()).median(),
            std_dev,
            variance,
            min: Statistics::min(data.iter()),
            max: Statistics::max(data.iter()),
        })
    }
}

/// Ordinary least-squares line `y ≈ slope·x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// `None` with fewer than two points.
    pub fn fit(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        let scale = max_abs(y);
        let pts: Vec<(f64, f64)> = x.iter().zip(y).map(|(&a, &b)| (a, b / scale)).collect();
        let (slope, intercept, r_squared) = linear_regression(&pts);
        Some(LinearFit {
            slope: slope * scale,
            intercept: intercept * scale,
            r_squared,
        })
    }
}

/// Simple OLS linear regression on (x, y) pairs.  Returns (slope, intercept, r²).
fn linear_regression(pts: &[(f64, f64)]) -> (f64, f64, f64) {
    let n = pts.len() as f64;
    let sx: f64 = pts.iter().map(|p| p.0).sum();
    let sy: f64 = pts.iter().map(|p| p.1).sum();
    let sxx: f64 = pts.iter().map(|p| p.0 * p.0).sum();
    let sxy: f64 = pts.iter().map(|p| p.0 * p.1).sum();

    let denom = n * sxx - sx * sx;
    if denom.abs() < 1e-10 {
        return (0.0, sy / n, 0.0);
    }

    let slope = (n * sxy - sx * sy) / denom;
    let intercept = (sy - slope * sx) / n;

    let y_mean = sy / n;
    let ss_res: f64 = pts.iter().map(|p| (p.1 - (slope * p.0 + intercept)).powi(2)).sum();
    let ss_tot: f64 = pts.iter().map(|p| (p.1 - y_mean).powi(2)).sum();
    let r2 = if ss_tot < 1e-10 { 1.0 } else { 1.0 - ss_res / ss_tot };

    (slope, intercept, r2)
}

/// Least-squares parabola `y ≈ a·x² + b·x + c`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub r_squared: f64,
}

impl QuadraticFit {
    /// `None` with fewer than three points or a singular design.
    pub fn fit(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 3 {
            return None;
        }
        let scale = max_abs(y);
        let ys: Vec<f64> = y.iter().map(|v| v / scale).collect();

        // Normal equations for the monomials [x², x, 1].
        let mut m = [[0.0f64; 4]; 3];
        for (&xi, &yi) in x.iter().zip(&ys) {
            let row = [xi * xi, xi, 1.0];
            for r in 0..3 {
                for c in 0..3 {
                    m[r][c] += row[r] * row[c];
                }
                m[r][3] += row[r] * yi;
            }
        }
        let [a, b, c] = solve3(m)?;

        let mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let ss_res: f64 = x
            .iter()
            .zip(&ys)
            .map(|(&xi, &yi)| (yi - (a * xi * xi + b * xi + c)).powi(2))
            .sum();
        let ss_tot: f64 = ys.iter().map(|yi| (yi - mean).powi(2)).sum();
        let r_squared = if ss_tot < 1e-10 { 1.0 } else { 1.0 - ss_res / ss_tot };

        Some(QuadraticFit { a: a * scale, b: b * scale, c: c * scale, r_squared })
    }
}

/// Gaussian elimination with partial pivoting on an augmented 3×4 system.
fn solve3(mut m: [[f64; 4]; 3]) -> Option<[f64; 3]> {
    for col in 0..3 {
        let pivot = (col..3).max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))?;
        if m[pivot][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot);
        for row in col + 1..3 {
            let f = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= f * m[col][k];
            }
        }
    }
    let mut out = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * out[k]).sum();
        out[row] = (m[row][3] - tail) / m[row][row];
    }
    Some(out)
}

/// Percentile-bootstrap confidence interval for the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapInterval {
    pub low: f64,
    pub high: f64,
    pub confidence: f64,
    pub resamples: usize,
}

impl BootstrapInterval {
    /// Deterministic for a given `seed`. `None` on empty data or zero resamples.
    pub fn of_mean(data: &[f64], resamples: usize, confidence: f64, seed: u64) -> Option<Self> {
        if data.is_empty() || resamples == 0 {
            return None;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let n = data.len();
        let mut means: Vec<f64> = (0..resamples)
            .map(|_| (0..n).map(|_| data[rng.gen_range(0..n)]).sum::<f64>() / n as f64)
            .collect();
        means.sort_by(|a, b| a.total_cmp(b));

        let tail = (1.0 - confidence) / 2.0;
        Some(BootstrapInterval {
            low: percentile_of(&means, tail),
            high: percentile_of(&means, 1.0 - tail),
            confidence,
            resamples,
        })
    }
}

/// Compute a given percentile from a sorted slice using linear interpolation.
fn percentile_of(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = idx - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// A genus whose total invariant stands out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flagged {
    pub genus: Genus,
    pub value: f64,
}

/// Genera where `|total_invariant - interaction_term| > threshold`.
pub fn consistency_flags(series: &ResultSeries, threshold: f64) -> Vec<Flagged> {
    series
        .records
        .iter()
        .filter_map(|r| {
            let gap = (r.total_invariant - r.interaction_term).abs();
            (gap > threshold).then_some(Flagged { genus: r.genus, value: gap })
        })
        .collect()
}

/// Genera whose total lies more than `sigma` population standard deviations
/// from the mean total.
pub fn extreme_totals(series: &ResultSeries, sigma: f64) -> Vec<Flagged> {
    let totals = series.total_invariants();
    let Some(d) = Descriptive::of(&totals) else {
        return Vec::new();
    };
    let limit = sigma * d.std_dev;
    series
        .records
        .iter()
        .filter(|r| (r.total_invariant - d.mean).abs() > limit)
        .map(|r| Flagged { genus: r.genus, value: r.total_invariant })
        .collect()
}

/// Statistics for one dependent sequence regressed on genus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceSummary {
    pub descriptive: Descriptive,
    pub linear: Option<LinearFit>,
    pub quadratic: Option<QuadraticFit>,
    pub bootstrap: Option<BootstrapInterval>,
}

impl SequenceSummary {
    fn compute(x: &[f64], y: &[f64], config: &SurveyConfig, seed: u64) -> Option<Self> {
        Some(SequenceSummary {
            descriptive: Descriptive::of(y)?,
            linear: LinearFit::fit(x, y),
            quadratic: QuadraticFit::fit(x, y),
            bootstrap: BootstrapInterval::of_mean(
                y,
                config.bootstrap_resamples,
                config.confidence,
                seed,
            ),
        })
    }
}

/// Everything the survey reports after a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    pub evaluated: usize,
    pub interaction: Option<SequenceSummary>,
    pub total: Option<SequenceSummary>,
    pub consistency_threshold: f64,
    pub inconsistent: Vec<Flagged>,
    pub extreme_sigma: f64,
    pub extremes: Vec<Flagged>,
}

impl SurveySummary {
    pub fn compute(series: &ResultSeries, config: &SurveyConfig) -> Self {
        let x = series.genera();
        let interaction =
            SequenceSummary::compute(&x, &series.interaction_terms(), config, config.seed);
        // Independent resampling stream for the second sequence.
        let total = SequenceSummary::compute(
            &x,
            &series.total_invariants(),
            config,
            config.seed ^ 0x9e37_79b9_7f4a_7c15,
        );

        SurveySummary {
            evaluated: series.len(),
            interaction,
            total,
            consistency_threshold: config.consistency_threshold,
            inconsistent: consistency_flags(series, config.consistency_threshold),
            extreme_sigma: config.extreme_sigma,
            extremes: extreme_totals(series, config.extreme_sigma),
        }
    }
}

fn max_abs(data: &[f64]) -> f64 {
    let m = data.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if m > 0.0 {
        m
    } else {
        1.0
    }
}
