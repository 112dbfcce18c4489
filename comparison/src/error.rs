//! Benchmark error types
//!
//! Errors raised by the deterministic side of a comparison: input validation,
//! per-entry state transitions, and session persistence.

use thiserror::Error;

use crate::benchmark::RunStatus;

/// Result type alias for comparison operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that can occur while preparing, tracking, or persisting a comparison
#[derive(Error, Debug)]
pub enum BenchError {
    /// Not enough points to build a tour
    #[error("At least {required} points are required, got {count}")]
    InsufficientPoints { count: usize, required: usize },

    /// An entry tried to move along an edge the run state graph does not allow
    #[error("Illegal status transition for {algorithm}: {from} → {to}")]
    IllegalTransition {
        algorithm: String,
        from: RunStatus,
        to: RunStatus,
    },

    /// Driver called the run stepper in the wrong order
    #[error("Run step out of sequence: {0}")]
    OutOfSequence(String),

    /// Registry declared the same id twice
    #[error("Duplicate algorithm id: {0}")]
    DuplicateAlgorithm(String),

    /// Point list could not be interpreted
    #[error("Invalid point list: {message}")]
    InvalidPoints { message: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BenchError {
    /// Create an insufficient points error against the run minimum
    pub fn insufficient_points(count: usize) -> Self {
        Self::InsufficientPoints {
            count,
            required: crate::points::MIN_POINTS,
        }
    }

    /// Create an invalid points error
    pub fn invalid_points(message: impl Into<String>) -> Self {
        Self::InvalidPoints {
            message: message.into(),
        }
    }

    /// Whether this error is a pre-flight validation failure
    /// (rejected before any side effect).
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPoints { .. } | Self::InvalidPoints { .. }
        )
    }
}
