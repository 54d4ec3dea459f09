pub mod calc;
pub mod config;
pub mod stats;
pub mod timer;
