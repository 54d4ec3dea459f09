//! Durable usage statistics and streak reconciliation.
//!
//! The ledger is the sole writer of the persisted statistics record. It
//! is best-effort durable, not transactional: a failed store write
//! leaves the in-memory record authoritative for the rest of the
//! process, and a later successful write still carries every
//! accumulated change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Key under which the statistics record is persisted.
pub const STATS_KEY: &str = "stats";

/// The key-value capability the ledger persists through.
///
/// Implemented by [`crate::storage::Database`]; tests use
/// [`crate::stats::MemStore`].
pub trait StatsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: StatsStore + ?Sized> StatsStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// The durable statistics record.
///
/// Every field defaults independently, so a partial stored record is
/// merged field-by-field over the defaults instead of being discarded
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub total_calculations: u64,
    #[serde(default)]
    pub total_completed_sessions: u64,
    #[serde(default)]
    pub total_focus_min: u64,
    /// Consecutive calendar days with at least one recorded activity.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// Statistics ledger over a key-value store.
pub struct StatsLedger<S> {
    store: S,
    record: StatsRecord,
}

impl<S: StatsStore> StatsLedger<S> {
    /// Load the ledger, merging any stored record over defaults.
    ///
    /// Missing or malformed data never reaches the caller: an unreadable
    /// record falls back to defaults, field-by-field where possible.
    pub fn load(store: S) -> Self {
        let record = match store.get(STATS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => StatsRecord::default(),
        };
        Self { store, record }
    }

    pub fn record(&self) -> &StatsRecord {
        &self.record
    }

    /// Record one completed calculation.
    ///
    /// The in-memory record is updated unconditionally; the returned
    /// error only signals that durability was lost, for the caller to
    /// log.
    pub fn record_calculation(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        self.record.total_calculations += 1;
        self.reconcile_streak(today);
        self.persist()
    }

    /// Record one completed focus session of `duration_min` minutes.
    pub fn record_session_completion(
        &mut self,
        duration_min: u32,
        today: NaiveDate,
    ) -> Result<(), StoreError> {
        self.record.total_completed_sessions += 1;
        self.record.total_focus_min += u64::from(duration_min);
        self.reconcile_streak(today);
        self.persist()
    }

    /// Reconcile the consecutive-active-day streak against `today`.
    ///
    /// Runs at most once per calendar day: repeated activity on the same
    /// day never double-increments. Activity on the calendar day after
    /// `last_active_date` extends the streak; any larger gap (or the
    /// first activity ever) restarts it at 1. "Yesterday" is proper
    /// calendar arithmetic, so month and year boundaries are handled.
    fn reconcile_streak(&mut self, today: NaiveDate) {
        if self.record.last_active_date == Some(today) {
            return;
        }
        let yesterday = today.pred_opt();
        self.record.streak = match self.record.last_active_date {
            Some(last) if Some(last) == yesterday => self.record.streak + 1,
            _ => 1,
        };
        self.record.last_active_date = Some(today);
    }

    /// Write the record wholesale to the store.
    pub fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.record)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.store.set(STATS_KEY, &json)
    }
}
