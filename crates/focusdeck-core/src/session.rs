//! Session controller: the externally visible command surface.
//!
//! Holds the engine and the ledger, no state of its own beyond a
//! process-local completion counter. Completion handling is synchronous
//! inside `tick()`: the ledger reflects the completion before the engine
//! is rearmed, and rearming happens even when the ledger write fails.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::StoreError;
use crate::events::Event;
use crate::stats::{StatsLedger, StatsRecord, StatsStore};
use crate::timer::{CountdownEngine, TimerState};

/// Read-only view for the presentation layer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionSnapshot {
    pub remaining_secs: u32,
    pub state: TimerState,
    pub completed_this_process: u32,
}

pub struct SessionController<S> {
    engine: CountdownEngine,
    ledger: StatsLedger<S>,
    completed_this_process: u32,
}

impl<S: StatsStore> SessionController<S> {
    pub fn new(engine: CountdownEngine, ledger: StatsLedger<S>) -> Self {
        Self {
            engine,
            ledger,
            completed_this_process: 0,
        }
    }

    pub fn start_session(&mut self) -> Option<Event> {
        self.engine.start()
    }

    pub fn pause_session(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    pub fn reset_session(&mut self) -> Option<Event> {
        self.engine.reset()
    }

    /// Drive the engine by one tick.
    ///
    /// On completion the ledger is updated first, then the engine is
    /// rearmed for the next session. The completion event is returned
    /// alongside the write outcome so a failed (best-effort) write can
    /// be logged without losing the event.
    pub fn tick(&mut self, today: NaiveDate) -> (Option<Event>, Result<(), StoreError>) {
        let event = self.engine.tick();
        if let Some(Event::SessionCompleted { duration_min, .. }) = &event {
            let minutes = *duration_min;
            self.completed_this_process += 1;
            let write = self.ledger.record_session_completion(minutes, today);
            self.engine.reset();
            return (event, write);
        }
        (event, Ok(()))
    }

    /// Record a calculator activity against the ledger.
    pub fn record_calculation(&mut self, today: NaiveDate) -> Result<(), StoreError> {
        self.ledger.record_calculation(today)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            remaining_secs: self.engine.remaining_secs(),
            state: self.engine.state(),
            completed_this_process: self.completed_this_process,
        }
    }

    pub fn stats(&self) -> &StatsRecord {
        self.ledger.record()
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }
}
