//! Watch events and session options

use std::path::PathBuf;
use std::time::Duration;

use super::coalesce::{FirePolicy, POLL_INTERVAL};

/// Monitor session options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory to watch (recursive)
    pub path: PathBuf,
    /// Shell command to run once per burst of changes
    pub action: String,
    /// Interval between trigger evaluations
    pub poll_interval: Duration,
    /// When a pending burst becomes actionable
    pub policy: FirePolicy,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    /// Production options: 5s poll interval, 5s quiet period, 60s maximum
    /// window.
    pub fn new(path: PathBuf, action: String) -> Self {
        Self {
            path,
            action,
            poll_interval: POLL_INTERVAL,
            policy: FirePolicy::DEFAULT,
            json: false,
        }
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        path: String,
        action: String,
    },
    /// A raw change signal arrived from the notification source
    ChangeDetected,
    /// A burst became due and the action is about to run
    ActionFired {
        action: String,
    },
    /// The action ran to completion; non-zero status is a warning, not fatal
    ActionComplete {
        status: i32,
    },
    /// The action could not be launched at all
    ActionFailed {
        message: String,
    },
    /// The notification source closed; no further changes will be seen
    RecorderStopped,
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
