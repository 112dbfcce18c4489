//! Orchestrator tests: call order, pacing, failure isolation, guard.
//!
//! Uses a mockall sequence for strict call order and hand-written recording
//! mocks for interleaving with observer callbacks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use comparison::{
    AlgorithmDescriptor, AlgorithmRegistry, BenchError, Point, RawResult, RunStatus,
};
use mockall::{mock, Sequence};
use route_bench::{
    BenchmarkOrchestrator, NoopObserver, Pacer, RunObserver, SolveClient, SolveError, TokioPacer,
};

mock! {
    pub Solver {}

    #[async_trait]
    impl SolveClient for Solver {
        async fn solve(&self, points: &[Point], algorithm: &str) -> Result<RawResult, SolveError>;
    }
}

type EventLog = Arc<Mutex<Vec<String>>>;

fn points() -> Vec<Point> {
    vec![
        Point::new(150.0, 100.0),
        Point::new(300.0, 150.0),
        Point::new(500.0, 120.0),
    ]
}

fn raw(algorithm: &str, distance: f64) -> RawResult {
    RawResult {
        total_distance: distance,
        execution_time: 0.01,
        path: points(),
        algorithm_used: algorithm.to_string(),
    }
}

/// Solver that records each call and rejects the ids it is told to.
struct ScriptedSolver {
    log: EventLog,
    failing: HashSet<String>,
}

impl ScriptedSolver {
    fn new(log: EventLog, failing: &[&str]) -> Self {
        Self {
            log,
            failing: failing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SolveClient for ScriptedSolver {
    async fn solve(&self, points: &[Point], algorithm: &str) -> Result<RawResult, SolveError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("solve {algorithm} ({} points)", points.len()));
        if self.failing.contains(algorithm) {
            return Err(SolveError::Rejected {
                status: 500,
                message: format!("Server error: {algorithm} exploded"),
            });
        }
        Ok(raw(algorithm, 100.0 + points.len() as f64))
    }
}

/// Pacer that records the requested delay instead of sleeping.
struct RecordingPacer {
    log: EventLog,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.log
            .lock()
            .unwrap()
            .push(format!("pause {}ms", duration.as_millis()));
    }
}

struct RecordingObserver {
    log: EventLog,
}

impl RunObserver for RecordingObserver {
    fn on_progress(&mut self, index: usize, total: usize) {
        self.log.lock().unwrap().push(format!("progress {index}/{total}"));
    }

    fn on_running(&mut self, algorithm: &AlgorithmDescriptor) {
        self.log.lock().unwrap().push(format!("running {}", algorithm.id));
    }
}

#[tokio::test]
async fn test_algorithms_called_in_registry_order() {
    let registry = AlgorithmRegistry::standard();
    let mut solver = MockSolver::new();
    let mut seq = Sequence::new();

    for id in ["nearest_neighbor", "greedy", "genetic", "dynamic", "aco"] {
        solver
            .expect_solve()
            .withf(move |points, algorithm| points.len() == 3 && algorithm.to_string() == id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(raw(id, 42.0)));
    }

    let log = EventLog::default();
    let orchestrator = BenchmarkOrchestrator::new(
        solver,
        RecordingPacer { log: log.clone() },
        Duration::from_millis(200),
    );

    let results = orchestrator
        .run_comparison(&points(), registry.algorithms(), &mut NoopObserver)
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert!(results.values().all(|e| e.status() == RunStatus::Completed));
    // Pacing after every algorithm, including the last
    assert_eq!(log.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn test_running_row_and_pacing_interleave_with_calls() {
    let registry = AlgorithmRegistry::new(vec![
        AlgorithmDescriptor::new("greedy", "Greedy Algorithm"),
        AlgorithmDescriptor::new("aco", "Ant Colony Optimization"),
    ])
    .unwrap();
    let log = EventLog::default();

    let orchestrator = BenchmarkOrchestrator::new(
        ScriptedSolver::new(log.clone(), &[]),
        RecordingPacer { log: log.clone() },
        Duration::from_millis(200),
    );
    let mut observer = RecordingObserver { log: log.clone() };

    orchestrator
        .run_comparison(&points(), registry.algorithms(), &mut observer)
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "progress 0/2",
            "running greedy",
            "solve greedy (3 points)",
            "pause 200ms",
            "progress 1/2",
            "running aco",
            "solve aco (3 points)",
            "pause 200ms",
        ]
    );
}

#[tokio::test]
async fn test_failure_is_isolated() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    let registry = AlgorithmRegistry::standard();
    let log = EventLog::default();
    let orchestrator = BenchmarkOrchestrator::new(
        ScriptedSolver::new(log.clone(), &["genetic"]),
        RecordingPacer { log: log.clone() },
        Duration::ZERO,
    );

    let results = orchestrator
        .run_comparison(&points(), registry.algorithms(), &mut NoopObserver)
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    let genetic = &results["genetic"];
    assert_eq!(genetic.status(), RunStatus::Failed);
    assert_eq!(genetic.name(), "Genetic Algorithm");
    assert_eq!(genetic.error(), Some("Server error: genetic exploded"));

    for id in ["nearest_neighbor", "greedy", "dynamic", "aco"] {
        assert_eq!(results[id].status(), RunStatus::Completed, "{id}");
    }

    // The loop kept going after the failure
    let calls: Vec<String> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.starts_with("solve"))
        .cloned()
        .collect();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[3], "solve dynamic (3 points)");
}

#[tokio::test]
async fn test_every_failure_still_completes_run() {
    let registry = AlgorithmRegistry::standard();
    let mut solver = MockSolver::new();
    solver
        .expect_solve()
        .times(5)
        .returning(|_, _| Err(SolveError::Request("connection refused".into())));

    let orchestrator = BenchmarkOrchestrator::new(
        solver,
        RecordingPacer {
            log: EventLog::default(),
        },
        Duration::ZERO,
    );
    let results = orchestrator
        .run_comparison(&points(), registry.algorithms(), &mut NoopObserver)
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert!(results
        .values()
        .all(|e| e.error() == Some("connection refused")));
}

#[tokio::test]
async fn test_single_point_makes_no_calls() {
    let registry = AlgorithmRegistry::standard();
    let mut solver = MockSolver::new();
    solver.expect_solve().never();

    let orchestrator = BenchmarkOrchestrator::new(
        solver,
        RecordingPacer {
            log: EventLog::default(),
        },
        Duration::ZERO,
    );
    let err = orchestrator
        .run_comparison(&[Point::new(1.0, 1.0)], registry.algorithms(), &mut NoopObserver)
        .await
        .unwrap_err();

    assert!(matches!(err, BenchError::InsufficientPoints { count: 1, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_pacer_waits_configured_delay() {
    let registry = AlgorithmRegistry::standard();
    let log = EventLog::default();
    let orchestrator = BenchmarkOrchestrator::new(
        ScriptedSolver::new(log, &[]),
        TokioPacer,
        Duration::from_millis(200),
    );

    let started = tokio::time::Instant::now();
    orchestrator
        .run_comparison(&points(), registry.algorithms(), &mut NoopObserver)
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(5 * 200));
}
