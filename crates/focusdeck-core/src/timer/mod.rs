mod engine;

pub use engine::{CountdownEngine, TimerState, DEFAULT_SESSION_SECS};
