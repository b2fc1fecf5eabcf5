//! Common error types for the artist manager

use thiserror::Error;

/// Common result type for artist manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the repository and aggregation layers
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or a field value malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Update/delete target does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation error (connectivity or constraint failure)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures the caller cannot fix by changing the request
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Io(_) | Error::Config(_))
    }
}
