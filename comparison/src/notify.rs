//! Transient user notifications
//!
//! Fire-and-forget: callers hand over a message and move on. The center
//! logs each message and keeps it visible until its display window lapses.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Display window applied when none is configured
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// Notification category; selects styling and log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Sink for transient user messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, category: NotificationCategory);
}

/// A message currently on screen
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub category: NotificationCategory,
    pub expires_at: Instant,
}

/// Keeps active notifications and logs every message
#[derive(Debug)]
pub struct NotificationCenter {
    display_window: Duration,
    active: Mutex<Vec<Notification>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WINDOW)
    }
}

impl NotificationCenter {
    pub fn new(display_window: Duration) -> Self {
        Self {
            display_window,
            active: Mutex::new(Vec::new()),
        }
    }

    pub fn display_window(&self) -> Duration {
        self.display_window
    }

    /// Notifications still inside their display window, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    fn active_at(&self, now: Instant) -> Vec<Notification> {
        let Ok(mut active) = self.active.lock() else {
            return Vec::new();
        };
        active.retain(|n| n.expires_at > now);
        active.clone()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, message: &str, category: NotificationCategory) {
        match category {
            NotificationCategory::Info | NotificationCategory::Success => {
                tracing::info!(%category, "{message}")
            }
            NotificationCategory::Warning => tracing::warn!(%category, "{message}"),
            NotificationCategory::Error => tracing::error!(%category, "{message}"),
        }

        if let Ok(mut active) = self.active.lock() {
            active.push(Notification {
                message: message.to_string(),
                category,
                expires_at: Instant::now() + self.display_window,
            });
        }
    }
}
