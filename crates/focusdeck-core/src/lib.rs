//! # Focusdeck Core Library
//!
//! Core logic for Focusdeck, a single-user productivity tool combining an
//! arithmetic calculator, a fixed-duration focus timer, and durable usage
//! statistics. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Countdown engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second, so tests drive time by injecting ticks
//!   instead of waiting on the wall clock
//! - **Statistics ledger**: cumulative counters plus the consecutive-day
//!   streak, persisted best-effort through a key-value store
//! - **Session controller**: the command surface, wiring engine completions
//!   into the ledger before rearming the countdown
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: countdown state machine
//! - [`StatsLedger`]: statistics accumulation and streak reconciliation
//! - [`SessionController`]: start/pause/reset command surface
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration

pub mod calc;
pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use calc::{evaluate, CalcEntry, CalcHistory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, EvalError, StoreError};
pub use events::Event;
pub use session::{SessionController, SessionSnapshot};
pub use stats::{MemStore, StatsLedger, StatsRecord, StatsStore};
pub use storage::{Config, Database};
pub use timer::{CountdownEngine, TimerState, DEFAULT_SESSION_SECS};
