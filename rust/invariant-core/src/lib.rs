//! invariant-core: closed-form genus invariants and the batch sweep over them.
//!
//! For each genus g ≥ 0 the evaluator computes a fixed bundle of named
//! quantities (Postnikov proxies, gauge-theory terms, SFT/Floer/GW sequences,
//! mirror and K-theory corrections) and folds a subset into one scalar total.
//! Factorial terms are computed exactly with `BigUint` and converted to `f64`
//! under an explicit finiteness check, so overflow surfaces as an error rather
//! than as `inf` in the output.

pub mod batch;
pub mod bundle;
pub mod error;
pub mod evaluator;
pub mod genus;

pub use batch::{run_batch, run_batch_parallel, BatchRun, GenusOutcome, ResultSeries, SeriesRecord};
pub use bundle::InvariantBundle;
pub use error::InvariantError;
pub use evaluator::{evaluate, evaluate_genus, factorial, MAX_FINITE_FACTORIAL};
pub use genus::Genus;
