//! Session persistence
//!
//! A comparison session (`{points, results}`) is stored as one JSON record
//! under a fixed key. Saving overwrites; loading tolerates corruption by
//! logging it and starting empty.

pub mod store;

use serde::{Deserialize, Serialize};

use crate::benchmark::{annotate, ResultMap};
use crate::error::BenchResult;
use crate::points::Point;
use crate::registry::AlgorithmRegistry;

pub use store::{DurableStore, FileStore, MemoryStore};

/// Fixed key the session record lives under
pub const SESSION_KEY: &str = "tsp_comparison_results";

/// Persisted snapshot of the point set plus the latest results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSession {
    pub points: Vec<Point>,
    #[serde(default)]
    pub results: ResultMap,
}

impl ComparisonSession {
    pub fn new(points: Vec<Point>, results: ResultMap) -> Self {
        Self { points, results }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.results.is_empty()
    }

    /// Drop result keys that are not registry ids. Returns the dropped ids.
    pub fn retain_known(&mut self, registry: &AlgorithmRegistry) -> Vec<String> {
        let unknown: Vec<String> = self
            .results
            .keys()
            .filter(|id| !registry.contains(id))
            .cloned()
            .collect();
        for id in &unknown {
            self.results.remove(id);
        }
        unknown
    }
}

/// Saves and restores the comparison session record
pub struct SessionStore {
    store: Box<dyn DurableStore>,
}

impl SessionStore {
    pub fn new(store: impl DurableStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Serialize and write the session, overwriting any prior record.
    pub fn save(&self, session: &ComparisonSession) -> BenchResult<()> {
        let json = serde_json::to_string_pretty(session)?;
        self.store.write(SESSION_KEY, &json)?;
        tracing::debug!(
            points = session.points.len(),
            results = session.results.len(),
            "Saved comparison session"
        );
        Ok(())
    }

    /// Load the last saved session.
    ///
    /// Returns `None` when nothing is stored or the record is malformed;
    /// malformed records are logged and discarded. Results in a loaded
    /// session are re-annotated so they match a freshly scored pass.
    pub fn load(&self, registry: &AlgorithmRegistry) -> Option<ComparisonSession> {
        let json = match self.store.read(SESSION_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {e}");
                return None;
            }
        };

        let mut session: ComparisonSession = match serde_json::from_str(&json) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to load stored data: {e}");
                return None;
            }
        };

        let dropped = session.retain_known(registry);
        if !dropped.is_empty() {
            tracing::warn!(?dropped, "Discarded results for unknown algorithms");
        }
        if !session.results.is_empty() {
            annotate(&mut session.results);
        }

        Some(session)
    }

    /// Remove the stored record
    pub fn clear(&self) -> BenchResult<()> {
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }
}
