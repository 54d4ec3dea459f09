//! Bounded calculation history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of recent calculations kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcEntry {
    pub expression: String,
    /// Result formatted for display (trailing zeros stripped).
    pub result: String,
    pub at: DateTime<Utc>,
}

/// FIFO history of recent calculations.
///
/// Once capacity is reached the oldest entry is evicted first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcHistory {
    entries: VecDeque<CalcEntry>,
    capacity: usize,
}

impl CalcHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, expression: impl Into<String>, result: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(CalcEntry {
            expression: expression.into(),
            result: result.to_string(),
            at: Utc::now(),
        });
    }

    /// Entries oldest-first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &CalcEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&CalcEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CalcHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
