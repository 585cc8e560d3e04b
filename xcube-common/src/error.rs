//! Common error types for xcube

use thiserror::Error;

/// Common result type for xcube operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure aborts the run; none of these are recovered from.
#[derive(Error, Debug)]
pub enum Error {
    /// No eligible print was found for a card name
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Network or HTTP failure while talking to a remote service
    #[error("Transport error: {0}")]
    Transport(String),

    /// The card listing is missing expected fields or cannot be parsed
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    /// Configuration loading or validation error (including bad output targets)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (e.g. a file that is not a deck file)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
