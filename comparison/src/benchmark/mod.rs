//! Benchmark Module
//!
//! Deterministic core of a comparison pass.
//!
//! # Architecture
//!
//! ```text
//! PointsStore → ComparisonRun (stepper) → ResultMap
//!                     ↑                        ↓
//!            async driver (route-bench)    annotate()
//!                                              ↓
//!                                SessionStore / view models / report
//! ```
//!
//! The stepper owns per-entry status and the in-progress results; the
//! driver performs the two suspension points (solve call, pacing delay).

pub mod report;
pub mod run;
pub mod scoring;
pub mod types;

pub use report::format_report;
pub use run::{ComparisonRun, RunPhase, RunStep, StatusTransition};
pub use scoring::{annotate, MetricBounds, Range, DISTANCE_WEIGHT, TIME_WEIGHT};
pub use types::{
    completed_in_order, AlgorithmOutcome, CompletedResult, FailedResult, PerformanceRating,
    RawResult, ResultEntry, ResultMap, RunStatus,
};
