//! Application context
//!
//! Owns every component of a benchmark session and exposes the user-level
//! operations. Constructed once at startup and passed by reference.

use std::path::Path;
use std::sync::Arc;

use comparison::{
    annotate, format_report, AlgorithmRegistry, BenchResult, ComparisonSession, FileStore,
    NotificationCategory, Notifier, Point, PointsStore, ResultMap, SessionStore,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::orchestrator::{BenchmarkOrchestrator, TokioPacer};
use crate::presenter::{Presenter, RenderSurface};
use crate::solver::{HttpSolveClient, SolveError};

/// Warning raised when a run is requested with too few points
pub const INSUFFICIENT_POINTS_WARNING: &str = "Please load at least 2 points to compare algorithms";

/// Result of a run request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Guard failed; nothing ran and nothing was written.
    Rejected,
    /// The pass ran to the end.
    Completed { completed: usize, failed: usize },
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

pub struct AppContext<S: RenderSurface> {
    registry: AlgorithmRegistry,
    points: PointsStore,
    results: ResultMap,
    sessions: SessionStore,
    presenter: Presenter<S>,
    orchestrator: BenchmarkOrchestrator,
    notifier: Arc<dyn Notifier>,
}

impl<S: RenderSurface> AppContext<S> {
    pub fn new(
        registry: AlgorithmRegistry,
        sessions: SessionStore,
        orchestrator: BenchmarkOrchestrator,
        presenter: Presenter<S>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            points: PointsStore::new(),
            results: ResultMap::new(),
            sessions,
            presenter,
            orchestrator,
            notifier,
        }
    }

    /// Wire the standard registry, HTTP solver, tokio pacer and file store.
    pub fn from_config(
        config: &BenchConfig,
        surface: S,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, SolveError> {
        let client = HttpSolveClient::new(config.solver_base())?;
        let orchestrator = BenchmarkOrchestrator::new(client, TokioPacer, config.pacing());
        Ok(Self::new(
            AlgorithmRegistry::standard(),
            SessionStore::new(FileStore::new(&config.state_dir)),
            orchestrator,
            Presenter::new(surface),
            notifier,
        ))
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn points(&self) -> &[Point] {
        self.points.points()
    }

    pub fn results(&self) -> &ResultMap {
        &self.results
    }

    pub fn presenter(&self) -> &Presenter<S> {
        &self.presenter
    }

    pub fn surface(&self) -> &S {
        self.presenter.surface()
    }

    /// Snapshot of the current points and results
    pub fn session(&self) -> ComparisonSession {
        ComparisonSession::new(self.points.points().to_vec(), self.results.clone())
    }

    /// Restore the last saved session and re-render it.
    ///
    /// Returns whether a session was found.
    pub fn restore(&mut self) -> bool {
        let Some(session) = self.sessions.load(&self.registry) else {
            return false;
        };

        info!(
            points = session.points.len(),
            results = session.results.len(),
            "Restored comparison session"
        );
        self.points.replace(session.points);
        self.results = session.results;
        self.presenter.show_points(self.points.points());
        self.presenter.render_results(&self.results, &self.registry);
        self.presenter.render_charts(&self.results, &self.registry);
        true
    }

    /// Run every registered algorithm against the current points.
    pub async fn run_comparison(&mut self) -> BenchResult<RunOutcome> {
        let points = match self.points.validate_for_run() {
            Ok(points) => points.to_vec(),
            Err(e) if e.is_preflight() => {
                self.notifier
                    .notify(INSUFFICIENT_POINTS_WARNING, NotificationCategory::Warning);
                return Ok(RunOutcome::Rejected);
            }
            Err(e) => return Err(e),
        };

        self.presenter.set_trigger_enabled(false);
        self.presenter.set_loading(true);
        self.results.clear();

        let total = self.registry.len();
        let run = self
            .orchestrator
            .run_comparison(&points, self.registry.algorithms(), &mut self.presenter)
            .await;

        let mut results = match run {
            Ok(results) => results,
            Err(e) => {
                self.presenter.set_loading(false);
                self.presenter.set_trigger_enabled(true);
                return Err(e);
            }
        };
        annotate(&mut results);
        self.results = results;

        self.presenter.set_progress(total, total);
        self.presenter.render_results(&self.results, &self.registry);
        self.presenter.render_charts(&self.results, &self.registry);

        if let Err(e) = self.sessions.save(&self.session()) {
            warn!("Failed to save comparison session: {e}");
            self.notifier.notify(
                &format!("Failed to save results: {e}"),
                NotificationCategory::Error,
            );
        }

        self.notifier.notify(
            "Algorithm comparison completed!",
            NotificationCategory::Success,
        );
        self.presenter.set_loading(false);
        self.presenter.set_trigger_enabled(true);

        let failed = self.results.values().filter(|e| e.error().is_some()).count();
        Ok(RunOutcome::Completed {
            completed: self.results.len() - failed,
            failed,
        })
    }

    /// Replace the points with the fixed sample layout
    pub fn load_sample(&mut self) {
        self.points.load_sample();
        self.presenter.show_points(self.points.points());
        self.notifier.notify(
            &format!("Loaded {} sample points", self.points.len()),
            NotificationCategory::Info,
        );
    }

    /// Replace the points with `count` random points (clamped to 3..=20)
    pub fn generate_random<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let generated = self.points.generate_random(count, rng);
        self.presenter.show_points(self.points.points());
        self.notifier.notify(
            &format!("Generated {generated} random points"),
            NotificationCategory::Info,
        );
        generated
    }

    /// Replace the points with a list written by the point editor
    pub fn load_points(&mut self, path: &Path) -> BenchResult<usize> {
        let count = self.points.load_file(path)?;
        self.presenter.show_points(self.points.points());
        self.notifier.notify(
            &format!("Loaded {count} points from {}", path.display()),
            NotificationCategory::Info,
        );
        Ok(count)
    }

    /// Drop results, their rows and charts, and the saved record
    pub fn clear_results(&mut self) -> BenchResult<()> {
        self.results.clear();
        self.presenter.clear();
        self.sessions.clear()?;
        self.notifier
            .notify("Results cleared", NotificationCategory::Info);
        Ok(())
    }

    /// Write the current session to `path`
    pub fn export(&self, path: &Path, format: ExportFormat) -> BenchResult<()> {
        let session = self.session();
        let content = match format {
            ExportFormat::Json => serde_json::to_string_pretty(&session)?,
            ExportFormat::Markdown => format!(
                "{}\nExported: {}\n",
                format_report(&session, &self.registry),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            ),
        };
        std::fs::write(path, content)?;

        info!(path = %path.display(), ?format, "Exported comparison results");
        self.notifier.notify(
            &format!("Results exported to {}", path.display()),
            NotificationCategory::Success,
        );
        Ok(())
    }
}
