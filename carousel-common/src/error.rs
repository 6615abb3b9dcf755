//! Common error types for the carousel crates
//!
//! Navigation requests never fail: an invalid `next`/`previous`/`go_to` is a
//! silent no-op. The variants below only cover the ambient layer (configuration,
//! logging setup, task spawning).

use thiserror::Error;

/// Common result type for carousel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the carousel crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error (wraps toml::de::Error)
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// No async runtime available for background work
    #[error("Runtime error: {0}")]
    Runtime(String),
}
