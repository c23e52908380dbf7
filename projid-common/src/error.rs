//! Common error types for projid

use thiserror::Error;

/// Common result type for projid operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the resolver crates
///
/// None of these escape the public resolution operations: source readers
/// downgrade them to an absent value and log a warning.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML document could not be rendered
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistent store is unavailable or refused the operation
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration document request did not complete
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Configuration document request returned a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Configuration document body was not usable
    #[error("Parse error: {0}")]
    Parse(String),
}
