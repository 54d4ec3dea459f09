//! Countdown engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or the wall clock - the caller invokes `tick()` once per
//! elapsed second, so tests drive time by calling `tick()` directly.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Running --(tick to 0)--> Completed --reset--> Idle
//! ```
//!
//! `Completed` is terminal until `reset()`; there is no transition from
//! `Completed` back to `Running` without an intervening reset. A tick
//! that arrives after a pause or reset is a no-op, so a stale tick from
//! the periodic driver can never corrupt the state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default session length: 25 minutes.
pub const DEFAULT_SESSION_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core countdown engine.
///
/// Owns the session state; the caller is responsible for calling
/// `tick()` once per second while the session runs. Serializable so the
/// CLI can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    state: TimerState,
    /// Seconds left in the current session. Never exceeds `total_secs`.
    remaining_secs: u32,
    /// Configured session length in seconds.
    total_secs: u32,
}

impl CountdownEngine {
    /// Create an engine in `Idle` with a full session of `total_secs`.
    ///
    /// A zero length is rounded up to one second.
    pub fn new(total_secs: u32) -> Self {
        let total_secs = total_secs.max(1);
        Self {
            state: TimerState::Idle,
            remaining_secs: total_secs,
            total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// Session length in whole minutes, as recorded in the ledger.
    pub fn duration_min(&self) -> u32 {
        self.total_secs / 60
    }

    /// 0.0 .. 1.0 progress through the session. Pure query.
    pub fn progress(&self) -> f64 {
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs);
        (f64::from(elapsed) / f64::from(self.total_secs)).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress_pct: self.progress() * 100.0,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. No-op while already `Running`, and
    /// no-op in `Completed` (a reset must rearm the engine first).
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::SessionStarted {
                    remaining_secs: self.remaining_secs,
                    total_secs: self.total_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running | TimerState::Completed => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::SessionPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Unconditionally back to `Idle` with the full duration restored.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs;
        Some(Event::SessionReset { at: Utc::now() })
    }

    /// Advance the countdown by one second.
    ///
    /// Only acts while `Running`. Returns the completion event exactly
    /// once, on the tick that reaches zero; further ticks are no-ops and
    /// never decrement below zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Completed;
            return Some(Event::SessionCompleted {
                duration_min: self.duration_min(),
                at: Utc::now(),
            });
        }
        None
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn start_pause_start() {
        let mut engine = CountdownEngine::default();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
        // Idempotent while running.
        assert!(engine.start().is_none());

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert!(engine.pause().is_none());

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn tick_decrements_by_one_second() {
        let mut engine = CountdownEngine::new(10);
        engine.start();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 9);
    }

    #[test]
    fn tick_is_noop_unless_running() {
        let mut engine = CountdownEngine::new(10);
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 10);

        engine.start();
        engine.tick();
        engine.pause();
        // Stale tick after pause must not fire.
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 9);
    }

    #[test]
    fn full_session_completes_with_single_signal() {
        let mut engine = CountdownEngine::new(1500);
        engine.start();

        let mut completions = 0;
        for _ in 0..1500 {
            if let Some(Event::SessionCompleted { duration_min, .. }) = engine.tick() {
                completions += 1;
                assert_eq!(duration_min, 25);
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.state(), TimerState::Completed);
        assert_eq!(engine.remaining_secs(), 0);
        assert_eq!(engine.progress(), 1.0);

        // Ticking past completion never fires again or goes negative.
        for _ in 0..10 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn completed_is_terminal_until_reset() {
        let mut engine = CountdownEngine::new(2);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.state(), TimerState::Completed);

        assert!(engine.start().is_none());
        assert_eq!(engine.state(), TimerState::Completed);

        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 2);
        assert!(engine.start().is_some());
    }

    #[test]
    fn reset_restores_full_duration_after_partial_run() {
        // Pause at 900 remaining, reset, start again: completion takes
        // exactly 1500 further ticks with no partial-state leakage.
        let mut engine = CountdownEngine::new(1500);
        engine.start();
        for _ in 0..600 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 900);
        engine.pause();
        engine.reset();
        engine.start();

        for _ in 0..1499 {
            assert!(engine.tick().is_none());
        }
        assert!(matches!(
            engine.tick(),
            Some(Event::SessionCompleted { .. })
        ));
    }

    #[test]
    fn progress_is_clamped() {
        let mut engine = CountdownEngine::new(4);
        assert_eq!(engine.progress(), 0.0);
        engine.start();
        engine.tick();
        assert_eq!(engine.progress(), 0.25);
        engine.tick();
        engine.tick();
        engine.tick();
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn serde_roundtrip_preserves_state() {
        let mut engine = CountdownEngine::new(100);
        engine.start();
        engine.tick();
        let json = serde_json::to_string(&engine).unwrap();
        let restored: CountdownEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Running);
        assert_eq!(restored.remaining_secs(), 99);
        assert_eq!(restored.total_secs(), 100);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start,
        Pause,
        Reset,
        Tick,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            Just(Op::Pause),
            Just(Op::Reset),
            Just(Op::Tick),
        ]
    }

    proptest! {
        /// Under any command interleaving: remaining time never exceeds
        /// the total, ticks while running never increase it, and
        /// `Completed` always means zero remaining.
        #[test]
        fn remaining_is_monotone_and_bounded(
            total in 1u32..120,
            ops in proptest::collection::vec(op_strategy(), 0..200),
        ) {
            let mut engine = CountdownEngine::new(total);
            for op in ops {
                let before = engine.remaining_secs();
                let was_running = engine.state() == TimerState::Running;
                match op {
                    Op::Start => { engine.start(); }
                    Op::Pause => { engine.pause(); }
                    Op::Reset => { engine.reset(); }
                    Op::Tick => {
                        engine.tick();
                        if was_running {
                            prop_assert!(engine.remaining_secs() <= before);
                        }
                    }
                }
                prop_assert!(engine.remaining_secs() <= engine.total_secs());
                if engine.state() == TimerState::Completed {
                    prop_assert_eq!(engine.remaining_secs(), 0);
                }
            }
        }
    }
}
