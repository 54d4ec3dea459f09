use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The presentation layer polls for these; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        remaining_secs: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// Emitted exactly once, on the tick that reaches zero.
    SessionCompleted {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u32,
        total_secs: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
