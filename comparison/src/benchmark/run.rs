//! Comparison run stepper: explicit phases and per-entry transition guards.
//!
//! A [`ComparisonRun`] owns the in-progress results of one pass and decides
//! what happens next; the async orchestrator only performs the suspension
//! points it is told to (invoke the solver, observe the pacing delay).
//!
//! ```text
//! Ready → Invoking(0) → Recorded(0) → Pacing(0) → Invoking(1) → … → Pacing(n-1) → Finished
//! ```
//!
//! Each entry follows `Pending → Running → Completed | Failed`; the log of
//! transitions is kept for diagnostics.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::types::{AlgorithmOutcome, ResultMap, RunStatus};
use crate::error::{BenchError, BenchResult};
use crate::points::{Point, MIN_POINTS};
use crate::registry::AlgorithmDescriptor;

fn is_legal_transition(from: RunStatus, to: RunStatus) -> bool {
    use RunStatus::*;

    matches!(
        (from, to),
        (Pending, Running) | (Running, Completed) | (Running, Failed)
    )
}

/// Where the run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Nothing dispatched yet.
    Ready,
    /// Waiting on the solver for the entry at `index`.
    Invoking { index: usize },
    /// Entry at `index` recorded; pacing delay not yet started.
    Recorded { index: usize },
    /// Pacing delay after entry at `index` handed to the driver.
    Pacing { index: usize },
    /// Every entry reached a terminal status.
    Finished,
}

/// What the driver should do next
#[derive(Debug, Clone, PartialEq)]
pub enum RunStep {
    /// Report progress, mark the row running, then call the solver.
    Invoke {
        index: usize,
        total: usize,
        algorithm: AlgorithmDescriptor,
    },
    /// Observe the pacing delay.
    Pace,
    /// The pass is over.
    Finished,
}

/// A single recorded status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusTransition {
    pub algorithm: String,
    pub from: RunStatus,
    pub to: RunStatus,
    /// Milliseconds since the run was created.
    pub elapsed_ms: u64,
}

/// One sequential pass over the algorithms
pub struct ComparisonRun {
    algorithms: Vec<AlgorithmDescriptor>,
    statuses: Vec<RunStatus>,
    results: ResultMap,
    phase: RunPhase,
    created_at: Instant,
    transitions: Vec<StatusTransition>,
}

impl ComparisonRun {
    /// Start a pass, enforcing the point-count precondition.
    ///
    /// Rejection happens before any entry exists, so nothing is written.
    pub fn new(points: &[Point], algorithms: &[AlgorithmDescriptor]) -> BenchResult<Self> {
        if points.len() < MIN_POINTS {
            return Err(BenchError::insufficient_points(points.len()));
        }

        Ok(Self {
            algorithms: algorithms.to_vec(),
            statuses: vec![RunStatus::Pending; algorithms.len()],
            results: ResultMap::new(),
            phase: RunPhase::Ready,
            created_at: Instant::now(),
            transitions: Vec::new(),
        })
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.algorithms.len()
    }

    /// Status of an entry by algorithm id
    pub fn status(&self, algorithm_id: &str) -> Option<RunStatus> {
        self.algorithms
            .iter()
            .position(|a| a.id == algorithm_id)
            .map(|i| self.statuses[i])
    }

    /// Number of entries that reached a terminal status
    pub fn settled(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_terminal()).count()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RunPhase::Finished
    }

    pub fn transitions(&self) -> &[StatusTransition] {
        &self.transitions
    }

    /// Advance to the next step.
    ///
    /// While `Invoking`, the driver must call [`record`](Self::record)
    /// before advancing again; advancing early is out of sequence.
    pub fn advance(&mut self) -> BenchResult<RunStep> {
        let next = match self.phase {
            RunPhase::Ready => 0,
            RunPhase::Recorded { index } => {
                self.phase = RunPhase::Pacing { index };
                return Ok(RunStep::Pace);
            }
            RunPhase::Pacing { index } => index + 1,
            RunPhase::Finished => return Ok(RunStep::Finished),
            RunPhase::Invoking { index } => {
                return Err(BenchError::OutOfSequence(format!(
                    "advance while {} is still running",
                    self.algorithms[index].id
                )));
            }
        };

        if next >= self.algorithms.len() {
            self.phase = RunPhase::Finished;
            tracing::debug!(
                total = self.algorithms.len(),
                elapsed_ms = self.created_at.elapsed().as_millis() as u64,
                "Comparison run finished"
            );
            return Ok(RunStep::Finished);
        }

        self.transition(next, RunStatus::Running)?;
        self.phase = RunPhase::Invoking { index: next };
        Ok(RunStep::Invoke {
            index: next,
            total: self.algorithms.len(),
            algorithm: self.algorithms[next].clone(),
        })
    }

    /// Record the outcome of the entry currently being invoked.
    pub fn record(&mut self, outcome: AlgorithmOutcome) -> BenchResult<()> {
        let RunPhase::Invoking { index } = self.phase else {
            return Err(BenchError::OutOfSequence(format!(
                "record with no algorithm in flight ({:?})",
                self.phase
            )));
        };

        self.transition(index, outcome.status())?;
        let algorithm = &self.algorithms[index];
        self.results
            .insert(algorithm.id.clone(), outcome.into_entry(algorithm));
        self.phase = RunPhase::Recorded { index };
        Ok(())
    }

    /// Consume the run and hand back its results.
    ///
    /// A finished run holds exactly one entry per algorithm.
    pub fn into_results(self) -> ResultMap {
        self.results
    }

    fn transition(&mut self, index: usize, to: RunStatus) -> BenchResult<()> {
        let from = self.statuses[index];
        let algorithm = &self.algorithms[index].id;
        if !is_legal_transition(from, to) {
            return Err(BenchError::IllegalTransition {
                algorithm: algorithm.clone(),
                from,
                to,
            });
        }

        tracing::debug!(algorithm = %algorithm, from = %from, to = %to, "Status transition");

        self.transitions.push(StatusTransition {
            algorithm: algorithm.clone(),
            from,
            to,
            elapsed_ms: self.created_at.elapsed().as_millis() as u64,
        });
        self.statuses[index] = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::types::RawResult;
    use crate::registry::AlgorithmRegistry;

    fn points() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]
    }

    fn raw(distance: f64) -> RawResult {
        RawResult {
            total_distance: distance,
            execution_time: 0.01,
            path: points(),
            algorithm_used: "test".into(),
        }
    }

    #[test]
    fn test_rejects_single_point() {
        let registry = AlgorithmRegistry::standard();
        let result = ComparisonRun::new(&[Point::new(1.0, 1.0)], registry.algorithms());
        assert!(matches!(
            result,
            Err(BenchError::InsufficientPoints { count: 1, .. })
        ));
    }

    #[test]
    fn test_steps_follow_registry_order() {
        let registry = AlgorithmRegistry::standard();
        let mut run = ComparisonRun::new(&points(), registry.algorithms()).unwrap();
        let mut invoked = Vec::new();

        loop {
            match run.advance().unwrap() {
                RunStep::Invoke {
                    index,
                    total,
                    algorithm,
                } => {
                    assert_eq!(total, 5);
                    assert_eq!(index, invoked.len());
                    assert_eq!(run.status(&algorithm.id), Some(RunStatus::Running));
                    invoked.push(algorithm.id.clone());
                    run.record(AlgorithmOutcome::Completed(raw(10.0))).unwrap();
                    assert_eq!(run.advance().unwrap(), RunStep::Pace);
                }
                RunStep::Pace => unreachable!("pace is consumed inside the invoke arm"),
                RunStep::Finished => break,
            }
        }

        assert_eq!(
            invoked,
            vec!["nearest_neighbor", "greedy", "genetic", "dynamic", "aco"]
        );
        assert!(run.is_finished());
        assert_eq!(run.settled(), 5);
        assert_eq!(run.transitions().len(), 10);
        assert_eq!(run.into_results().len(), 5);
    }

    #[test]
    fn test_failed_entry_recorded_with_name() {
        let registry = AlgorithmRegistry::standard();
        let mut run = ComparisonRun::new(&points(), &registry.algorithms()[..1]).unwrap();

        run.advance().unwrap();
        run.record(AlgorithmOutcome::failed("connection refused"))
            .unwrap();
        assert_eq!(run.status("nearest_neighbor"), Some(RunStatus::Failed));
        assert_eq!(run.advance().unwrap(), RunStep::Pace);
        assert_eq!(run.advance().unwrap(), RunStep::Finished);

        let results = run.into_results();
        let entry = &results["nearest_neighbor"];
        assert_eq!(entry.name(), "Nearest Neighbor");
        assert_eq!(entry.error(), Some("connection refused"));
    }

    #[test]
    fn test_cannot_advance_while_invoking() {
        let registry = AlgorithmRegistry::standard();
        let mut run = ComparisonRun::new(&points(), registry.algorithms()).unwrap();
        run.advance().unwrap();

        let err = run.advance().unwrap_err();
        assert!(matches!(err, BenchError::OutOfSequence(_)));
    }

    #[test]
    fn test_cannot_record_without_invocation() {
        let registry = AlgorithmRegistry::standard();
        let mut run = ComparisonRun::new(&points(), registry.algorithms()).unwrap();

        assert!(matches!(
            run.record(AlgorithmOutcome::Completed(raw(1.0))),
            Err(BenchError::OutOfSequence(_))
        ));
        assert_eq!(run.phase(), RunPhase::Ready);
    }

    #[test]
    fn test_terminal_status_is_final() {
        assert!(!is_legal_transition(RunStatus::Completed, RunStatus::Running));
        assert!(!is_legal_transition(RunStatus::Failed, RunStatus::Completed));
        assert!(!is_legal_transition(RunStatus::Pending, RunStatus::Completed));
    }

    #[test]
    fn test_empty_algorithm_list_finishes_immediately() {
        let mut run = ComparisonRun::new(&points(), &[]).unwrap();
        assert_eq!(run.advance().unwrap(), RunStep::Finished);
        assert!(run.into_results().is_empty());
    }
}
