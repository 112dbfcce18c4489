use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SOLVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_PACING_MS: u64 = 200;
const DEFAULT_STATE_DIR: &str = ".route-bench";
const DEFAULT_NOTIFY_MS: u64 = 3000;

/// Top-level benchmark configuration.
///
/// Resolution order, last wins: built-in defaults, the optional TOML file,
/// then `ROUTE_BENCH_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Base URL of the solving service (`/solve_tsp`, `/health`)
    pub solver_url: String,
    /// Delay observed after every algorithm invocation
    pub pacing_ms: u64,
    /// Directory holding the durable session record
    pub state_dir: PathBuf,
    /// How long a notification stays active
    pub notify_ms: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            solver_url: DEFAULT_SOLVER_URL.into(),
            pacing_ms: DEFAULT_PACING_MS,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            notify_ms: DEFAULT_NOTIFY_MS,
        }
    }
}

impl BenchConfig {
    /// Load configuration from an optional file, then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `ROUTE_BENCH_*` overrides from `lookup`.
    ///
    /// Unparsable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("ROUTE_BENCH_SOLVER_URL") {
            self.solver_url = url;
        }
        if let Some(dir) = lookup("ROUTE_BENCH_STATE_DIR") {
            self.state_dir = PathBuf::from(dir);
        }
        if let Some(ms) = parse_millis(&lookup, "ROUTE_BENCH_PACING_MS") {
            self.pacing_ms = ms;
        }
        if let Some(ms) = parse_millis(&lookup, "ROUTE_BENCH_NOTIFY_MS") {
            self.notify_ms = ms;
        }
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn notify_window(&self) -> Duration {
        Duration::from_millis(self.notify_ms)
    }

    /// Solver URL without a trailing slash
    pub fn solver_base(&self) -> &str {
        self.solver_url.trim_end_matches('/')
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(ms) => Some(ms),
        Err(e) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid millisecond override: {e}");
            None
        }
    }
}
