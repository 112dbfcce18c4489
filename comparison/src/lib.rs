//! Route Heuristic Comparison Library
//!
//! Deterministic side of a route heuristic benchmark:
//! - Ordered algorithm registry and the point set a run is fed
//! - Run stepper that sequences algorithms and guards per-entry status
//! - Scoring engine folding distance and wall time into one efficiency score
//! - Session persistence over a pluggable durable store
//! - View models and a Markdown report for presenting annotated results
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Registry    │──▶│ ComparisonRun│──▶│  ResultMap   │
//! │  PointsStore │   │  (stepper)   │   │              │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │ annotate()
//!                     ┌────────────────────────┼──────────────┐
//!                     ▼                        ▼              ▼
//!              ┌──────────────┐      ┌──────────────┐  ┌────────────┐
//!              │ SessionStore │      │  view models │  │   report   │
//!              └──────────────┘      └──────────────┘  └────────────┘
//! ```
//!
//! Remote solving, pacing and rendering live in the application crate; this
//! crate has no async code and no I/O beyond the durable store.

pub mod benchmark;
pub mod error;
pub mod notify;
pub mod points;
pub mod registry;
pub mod session;
pub mod view;

// Re-export key benchmark types
pub use benchmark::{
    annotate, completed_in_order, format_report, AlgorithmOutcome, ComparisonRun,
    CompletedResult, FailedResult, MetricBounds, PerformanceRating, RawResult, ResultEntry,
    ResultMap, RunPhase, RunStatus, RunStep, StatusTransition,
};

pub use error::{BenchError, BenchResult};

pub use notify::{Notification, NotificationCategory, NotificationCenter, Notifier};

pub use points::{parse_points, sample_points, Point, PointsStore, MIN_POINTS};

pub use registry::{AlgorithmDescriptor, AlgorithmRegistry};

pub use session::{ComparisonSession, DurableStore, FileStore, MemoryStore, SessionStore};

pub use view::{Bar, ChartSlot, ChartSpec, PointsView, ProgressView, RowCells, RowView};
