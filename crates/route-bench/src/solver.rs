//! Solve client
//!
//! One call runs one algorithm over one point set on the remote solving
//! service. The heuristics themselves are opaque; only the request and
//! response shapes matter here.

use std::time::Duration;

use async_trait::async_trait;
use comparison::{Point, RawResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a rejection carries no readable `error` field
pub const FALLBACK_FAILURE: &str = "Algorithm failed";

/// Errors from a single solve call.
///
/// `Display` is the text recorded in the failed entry.
#[derive(Error, Debug)]
pub enum SolveError {
    /// Transport failure, no response received
    #[error("{0}")]
    Request(String),

    /// Non-success status; `message` is the service's `error` field
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Success status with a body that is not a solve result
    #[error("Invalid solver response: {0}")]
    Parse(String),
}

/// Remote solve contract
#[async_trait]
pub trait SolveClient: Send + Sync {
    async fn solve(&self, points: &[Point], algorithm: &str) -> Result<RawResult, SolveError>;
}

#[derive(Debug, Serialize)]
struct SolveRequest<'a> {
    points: Vec<[f64; 2]>,
    algorithm: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Solve client over HTTP
///
/// No request timeout is set: a hung call stalls the run.
pub struct HttpSolveClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSolveClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SolveError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SolveError::Request(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SolveClient for HttpSolveClient {
    async fn solve(&self, points: &[Point], algorithm: &str) -> Result<RawResult, SolveError> {
        let body = SolveRequest {
            points: points.iter().map(|p| p.to_pair()).collect(),
            algorithm,
        };

        let response = self
            .client
            .post(format!("{}/solve_tsp", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SolveError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SolveError::Rejected {
                status,
                message: rejection_message(&text),
            });
        }

        response
            .json::<RawResult>()
            .await
            .map_err(|e| SolveError::Parse(e.to_string()))
    }
}

/// The `error` field of a rejection body, or the fallback message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_FAILURE.to_string())
}

/// Check whether the solving service is reachable (GET /health).
pub async fn check_solver(base_url: &str) -> bool {
    let health_url = format!("{}/health", base_url.trim_end_matches('/'));
    match reqwest::Client::new()
        .get(&health_url)
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message() {
        assert_eq!(
            rejection_message(r#"{"error": "Server error: list index out of range"}"#),
            "Server error: list index out of range"
        );
        assert_eq!(rejection_message(r#"{"detail": "nope"}"#), FALLBACK_FAILURE);
        assert_eq!(rejection_message(r#"{"error": ""}"#), FALLBACK_FAILURE);
        assert_eq!(rejection_message("<html>502</html>"), FALLBACK_FAILURE);
    }

    #[test]
    fn test_error_display_is_entry_text() {
        let err = SolveError::Rejected {
            status: 500,
            message: "Server error: boom".into(),
        };
        assert_eq!(err.to_string(), "Server error: boom");
        assert_eq!(
            SolveError::Parse("missing field `path`".into()).to_string(),
            "Invalid solver response: missing field `path`"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let points = [Point::new(1.0, 2.0), Point::new(3.5, 4.0)];
        let body = SolveRequest {
            points: points.iter().map(|p| p.to_pair()).collect(),
            algorithm: "greedy",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"points": [[1.0, 2.0], [3.5, 4.0]], "algorithm": "greedy"})
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpSolveClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_unreachable_solver_is_unhealthy() {
        // Port 9 (discard) is not expected to serve HTTP
        assert!(!check_solver("http://127.0.0.1:9").await);
    }

    #[tokio::test]
    async fn test_unreachable_solver_fails_request() {
        let client = HttpSolveClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .solve(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], "greedy")
            .await
            .unwrap_err();
        assert!(matches!(err, SolveError::Request(_)));
    }
}
