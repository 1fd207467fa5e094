//! Common error types for backend queries and gateway operations

use thiserror::Error;

/// Result type for a single backend query
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by one outbound query to one provider backend
#[derive(Debug, Error)]
pub enum QueryError {
    /// DNS, dial or timeout failure
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {message}")]
    BadStatus {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Response body is not a valid payload
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Backend URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the aggregator and the detail router
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A backend query failed during a detail lookup
    #[error("Backend {backend} failed: {source}")]
    Query {
        backend: String,
        #[source]
        source: QueryError,
    },

    /// No configured backend matches the requested name
    #[error("Backend not found: {0}")]
    BackendNotFound(String),

    /// Inbound path does not have the expected shape
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Aggregate total is zero after policy application
    #[error("{0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Query { .. } => 500,
            GatewayError::BackendNotFound(_) => 404,
            GatewayError::InvalidPath(_) => 400,
            GatewayError::Unavailable(_) => 503,
        }
    }
}
