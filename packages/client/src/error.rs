//! Error types for the Courtside client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Send failed; the session does not retry automatically
    #[error("Send failed: {0}")]
    Send(String),

    /// REST API request failed
    #[error("API request failed: {0}")]
    Api(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Api(e.to_string())
    }
}
