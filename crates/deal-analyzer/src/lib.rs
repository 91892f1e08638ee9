//! Real-estate deal scoring: a pure metric engine plus the narrative and
//! HTTP plumbing that wraps it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod narrative;
pub mod router;
pub mod service;
pub mod telemetry;

pub use analysis::{evaluate, evaluate_with, DealInput, Metric, MetricStatus, ScoreResult};
pub use service::{DealAnalysis, DealAnalysisService};
