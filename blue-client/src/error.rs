//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never reached the server or the connection dropped
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response with the server-supplied detail message
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// 401 response - the session has been torn down
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Client-side payload validation failed, nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential file could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the error must trigger the global logout-and-redirect
    /// policy, regardless of which call produced it.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }

    /// Convert a transport failure, distinguishing timeouts
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err)
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
