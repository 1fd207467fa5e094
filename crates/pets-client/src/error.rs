//! Error types for client construction and test servers

use thiserror::Error;

/// Result type alias for client setup operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while building a client or a test server.
///
/// Failures of individual backend queries are reported as
/// [`pets_core::QueryError`] instead.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
