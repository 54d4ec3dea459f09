mod eval;
mod history;

pub use eval::{evaluate, format_result};
pub use history::{CalcEntry, CalcHistory, DEFAULT_HISTORY_CAPACITY};
