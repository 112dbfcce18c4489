//! Result types shared by the orchestrator, scoring, persistence, and views

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::points::{pairs, Point};
use crate::registry::AlgorithmDescriptor;

/// Per-algorithm status within one run.
///
/// Every entry starts at `Pending` and ends at `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Whether this is a terminal state (no further transitions allowed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Badge text: capitalised status name
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Successful response of the solve operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub total_distance: f64,
    /// Solver wall time in seconds
    pub execution_time: f64,
    #[serde(with = "pairs")]
    pub path: Vec<Point>,
    pub algorithm_used: String,
}

/// Rating tier derived from the efficiency score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceRating {
    /// Tier for a score; lower bounds are inclusive.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// A completed entry: raw solver output plus scoring annotations.
///
/// Annotation fields stay unset until [`crate::benchmark::annotate`] runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedResult {
    pub name: String,
    pub total_distance: f64,
    pub execution_time: f64,
    #[serde(with = "pairs")]
    pub path: Vec<Point>,
    pub algorithm_used: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_rating: Option<PerformanceRating>,
    #[serde(default)]
    pub is_best_distance: bool,
    #[serde(default)]
    pub is_worst_distance: bool,
    #[serde(default)]
    pub is_best_time: bool,
    #[serde(default)]
    pub is_worst_time: bool,
}

impl CompletedResult {
    pub fn from_raw(name: impl Into<String>, raw: RawResult) -> Self {
        Self {
            name: name.into(),
            total_distance: raw.total_distance,
            execution_time: raw.execution_time,
            path: raw.path,
            algorithm_used: raw.algorithm_used,
            efficiency_score: None,
            performance_rating: None,
            is_best_distance: false,
            is_worst_distance: false,
            is_best_time: false,
            is_worst_time: false,
        }
    }
}

/// A failed entry: the remote call or its response was unusable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResult {
    pub name: String,
    pub error: String,
}

/// One terminal entry of a comparison, keyed by algorithm id in a [`ResultMap`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultEntry {
    Completed(CompletedResult),
    Failed(FailedResult),
}

impl ResultEntry {
    pub fn status(&self) -> RunStatus {
        match self {
            Self::Completed(_) => RunStatus::Completed,
            Self::Failed(_) => RunStatus::Failed,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Completed(r) => &r.name,
            Self::Failed(r) => &r.name,
        }
    }

    pub fn as_completed(&self) -> Option<&CompletedResult> {
        match self {
            Self::Completed(r) => Some(r),
            Self::Failed(_) => None,
        }
    }

    pub fn as_completed_mut(&mut self) -> Option<&mut CompletedResult> {
        match self {
            Self::Completed(r) => Some(r),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(r) => Some(&r.error),
        }
    }
}

/// Results of one comparison pass keyed by algorithm id
pub type ResultMap = BTreeMap<String, ResultEntry>;

/// Tagged outcome of running a single algorithm
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmOutcome {
    Completed(RawResult),
    Failed { error: String },
}

impl AlgorithmOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Status this outcome moves its entry to
    pub fn status(&self) -> RunStatus {
        match self {
            Self::Completed(_) => RunStatus::Completed,
            Self::Failed { .. } => RunStatus::Failed,
        }
    }

    /// Attach the algorithm's display name to produce a stored entry
    pub fn into_entry(self, algorithm: &AlgorithmDescriptor) -> ResultEntry {
        match self {
            Self::Completed(raw) => {
                ResultEntry::Completed(CompletedResult::from_raw(algorithm.name.clone(), raw))
            }
            Self::Failed { error } => ResultEntry::Failed(FailedResult {
                name: algorithm.name.clone(),
                error,
            }),
        }
    }
}

/// Completed entries of `results`, in the order of `algorithms`.
pub fn completed_in_order<'a>(
    results: &'a ResultMap,
    algorithms: &'a [AlgorithmDescriptor],
) -> Vec<(&'a AlgorithmDescriptor, &'a CompletedResult)> {
    algorithms
        .iter()
        .filter_map(|a| {
            results
                .get(&a.id)
                .and_then(ResultEntry::as_completed)
                .map(|r| (a, r))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(PerformanceRating::from_score(100), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_score(80), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_score(79), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_score(60), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_score(59), PerformanceRating::Fair);
        assert_eq!(PerformanceRating::from_score(40), PerformanceRating::Fair);
        assert_eq!(PerformanceRating::from_score(39), PerformanceRating::Poor);
        assert_eq!(PerformanceRating::from_score(0), PerformanceRating::Poor);
    }

    #[test]
    fn test_raw_result_reads_solver_response() {
        let raw: RawResult = serde_json::from_value(json!({
            "path": [[0, 0], [3, 4], [0, 0]],
            "total_distance": 10.0,
            "execution_time": 0.000123,
            "algorithm_used": "greedy"
        }))
        .unwrap();
        assert_eq!(raw.path.len(), 3);
        assert_eq!(raw.path[1], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_entry_serialized_with_status_tag() {
        let entry = ResultEntry::Failed(FailedResult {
            name: "Genetic Algorithm".into(),
            error: "Server error: boom".into(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"status": "failed", "name": "Genetic Algorithm", "error": "Server error: boom"})
        );
    }

    #[test]
    fn test_unscored_completed_entry_omits_annotation() {
        let raw = RawResult {
            total_distance: 12.5,
            execution_time: 0.01,
            path: vec![Point::new(1.0, 2.0)],
            algorithm_used: "aco".into(),
        };
        let entry = AlgorithmOutcome::Completed(raw)
            .into_entry(&AlgorithmDescriptor::new("aco", "Ant Colony Optimization"));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["status"], "completed");
        assert_eq!(value["path"], json!([[1.0, 2.0]]));
        assert!(value.get("efficiency_score").is_none());
        assert_eq!(value["is_best_distance"], false);
    }
}
