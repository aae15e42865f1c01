use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::FormType;

/// Configuration for the background filing monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Symbols to watch. Normalized to uppercase at start.
    pub watchlist: Vec<String>,
    /// Time between poll cycles (default 5 minutes).
    pub poll_interval: Duration,
    /// Form types ingested during a poll.
    pub watched_forms: Vec<FormType>,
    /// Upper bound on filings examined per symbol per poll.
    pub max_filings_per_poll: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            watchlist: Vec::new(),
            poll_interval: Duration::from_secs(300),
            watched_forms: vec![
                FormType::Form4,
                FormType::Form10K,
                FormType::Form10Q,
                FormType::Form8K,
            ],
            max_filings_per_poll: 25,
        }
    }
}

/// Point-in-time snapshot of the monitor's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorState {
    /// Whether a poll loop is currently scheduled.
    pub running: bool,
    /// Symbols being watched.
    pub watchlist: Vec<String>,
    /// When the current (or most recent) loop was started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the last poll cycle finished, if any has run.
    pub last_poll_at: Option<DateTime<Utc>>,
    /// Poll cycles completed since creation.
    pub polls_completed: u64,
    /// New filings ingested since creation.
    pub filings_ingested: u64,
    /// Per-symbol poll failures since creation.
    pub errors: u64,
}
