//! Core error types for focusdeck-core.
//!
//! This module defines the error hierarchy using thiserror. No error in
//! the system is fatal to the process: store failures degrade to loss of
//! durability, evaluation failures are surfaced without touching any
//! session or statistics state.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Expression evaluation errors
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// Persistence store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Stored data could not be read
    #[error("Store read failed: {0}")]
    ReadFailed(String),

    /// Write was rejected (store unavailable, quota, lock)
    #[error("Store write failed: {0}")]
    WriteFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Arithmetic evaluation errors.
///
/// Malformed input and non-finite results are ordinary values here, not
/// panics; the presentation layer shows them as a transient error state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Character outside the calculator alphabet
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),

    /// Number literal that does not parse (e.g. "1.2.3")
    #[error("malformed number literal '{0}'")]
    BadNumber(String),

    /// Operator or parenthesis in an invalid position
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),

    /// Expression ended where an operand was expected
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Leftover input after a complete expression
    #[error("trailing input after expression")]
    TrailingInput,

    /// Result is infinite or NaN (e.g. division by zero)
    #[error("result is not a finite number")]
    NotFinite,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
