//! Error types for TelnetChat.

use thiserror::Error;

/// Common error type for TelnetChat.
#[derive(Error, Debug)]
pub enum ChatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration parsed but holds an unusable value.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for TelnetChat operations.
pub type Result<T> = std::result::Result<T, ChatError>;
