//! Route heuristic benchmark runner
//!
//! Sends one point set to every heuristic offered by a remote solving
//! service, one at a time, then scores, persists and presents the results.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────────────────┐   ┌───────────────┐
//! │ AppContext │──▶│ BenchmarkOrchestrator │──▶│  SolveClient  │──▶ POST /solve_tsp
//! └─────┬──────┘   └──────────┬────────────┘   └───────────────┘
//!       │                     │ RunObserver
//!       │                     ▼
//!       │              ┌────────────┐   ┌─────────────────┐
//!       ├─────────────▶│ Presenter  │──▶│  RenderSurface  │
//!       │              └────────────┘   └─────────────────┘
//!       ▼
//! ┌──────────────┐
//! │ SessionStore │ (comparison crate)
//! └──────────────┘
//! ```

pub mod app;
pub mod config;
pub mod orchestrator;
pub mod presenter;
pub mod solver;

pub use app::{AppContext, ExportFormat, RunOutcome};
pub use config::BenchConfig;
pub use orchestrator::{BenchmarkOrchestrator, NoopObserver, Pacer, RunObserver, TokioPacer};
pub use presenter::{ChartHandle, Presenter, RenderSurface, TerminalSurface};
pub use solver::{check_solver, HttpSolveClient, SolveClient, SolveError};
