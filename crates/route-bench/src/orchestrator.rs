//! Benchmark orchestrator
//!
//! Drives a [`ComparisonRun`] to completion: every `Invoke` step becomes one
//! solve call, every `Pace` step one pacing delay. Calls are strictly
//! sequential, with at most one in flight.
//!
//! ```text
//! advance() ──Invoke──▶ observer.on_progress / on_running
//!     ▲                        │
//!     │                        ▼
//!     │                 SolveClient::solve ──▶ record(outcome)
//!     │                                              │
//!     └───────── Pace ◀── Pacer::pause ◀── advance() ┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use comparison::{
    AlgorithmDescriptor, AlgorithmOutcome, BenchResult, ComparisonRun, Point, ResultMap, RunStep,
};
use tracing::{info, warn};

use crate::solver::SolveClient;

/// Suspension point between successive invocations
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Pacer backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Receives per-algorithm progress while a run is in flight
pub trait RunObserver {
    /// `index` algorithms done out of `total`.
    fn on_progress(&mut self, index: usize, total: usize);

    /// `algorithm` is about to be sent to the solver.
    fn on_running(&mut self, algorithm: &AlgorithmDescriptor);
}

/// Observer that ignores everything, for headless runs
#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_progress(&mut self, _index: usize, _total: usize) {}
    fn on_running(&mut self, _algorithm: &AlgorithmDescriptor) {}
}

/// Sequences algorithms through the solve client
pub struct BenchmarkOrchestrator {
    client: Box<dyn SolveClient>,
    pacer: Box<dyn Pacer>,
    pacing: Duration,
}

impl BenchmarkOrchestrator {
    pub fn new(
        client: impl SolveClient + 'static,
        pacer: impl Pacer + 'static,
        pacing: Duration,
    ) -> Self {
        Self {
            client: Box::new(client),
            pacer: Box::new(pacer),
            pacing,
        }
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Run every algorithm once, in order, against `points`.
    ///
    /// Fewer than two points is rejected before any call is made. A failing
    /// algorithm is recorded as a failed entry and the pass continues; the
    /// returned map has one entry per algorithm.
    pub async fn run_comparison(
        &self,
        points: &[Point],
        algorithms: &[AlgorithmDescriptor],
        observer: &mut dyn RunObserver,
    ) -> BenchResult<ResultMap> {
        let mut run = ComparisonRun::new(points, algorithms)?;
        info!(
            points = points.len(),
            algorithms = algorithms.len(),
            "Starting comparison run"
        );

        loop {
            match run.advance()? {
                RunStep::Invoke {
                    index,
                    total,
                    algorithm,
                } => {
                    observer.on_progress(index, total);
                    observer.on_running(&algorithm);
                    let outcome = self.invoke(points, &algorithm).await;
                    run.record(outcome)?;
                }
                RunStep::Pace => self.pacer.pause(self.pacing).await,
                RunStep::Finished => break,
            }
        }

        let results = run.into_results();
        let failed = results.values().filter(|e| e.error().is_some()).count();
        info!(
            completed = results.len() - failed,
            failed,
            "Comparison run finished"
        );
        Ok(results)
    }

    async fn invoke(&self, points: &[Point], algorithm: &AlgorithmDescriptor) -> AlgorithmOutcome {
        match self.client.solve(points, &algorithm.id).await {
            Ok(raw) => {
                info!(
                    algorithm = %algorithm.id,
                    distance = raw.total_distance,
                    time_s = raw.execution_time,
                    "Algorithm completed"
                );
                AlgorithmOutcome::Completed(raw)
            }
            Err(e) => {
                warn!(algorithm = %algorithm.id, error = %e, "Algorithm failed");
                AlgorithmOutcome::failed(e.to_string())
            }
        }
    }
}
