//! Deal metric engine.
//!
//! A pure mapping from [`DealInput`] to an ordered breakdown of metrics and a
//! bounded score. Nothing in here performs I/O.

mod assumptions;
pub mod domain;
mod engine;
pub mod format;

pub use assumptions::UnderwritingAssumptions;
pub use domain::{
    DealInput, Metric, MetricKind, MetricStatus, ScoreAdjustment, ScoreResult, ScoringRule,
};
pub use engine::{evaluate, evaluate_with};
