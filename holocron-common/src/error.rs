//! Common error types for holocron

use thiserror::Error;

/// Common result type for holocron operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across holocron crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not allowed in the current card state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A storage slot holds a value that does not decode as a record list
    #[error("Corrupt storage slot '{key}': {source}")]
    CorruptSlot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key-value storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}
