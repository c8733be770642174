//! Error types for the presence client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server URL cannot be used for a WebSocket handshake
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// WebSocket handshake failed
    #[error("Failed to connect: {0}")]
    Connect(String),

    /// Established connection ended unexpectedly
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// Snapshot request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reconnection attempts exhausted
    #[error("Gave up after {0} reconnect attempts")]
    ReconnectExhausted(u32),
}

impl ClientError {
    /// Map a handshake error from the WebSocket library
    pub fn from_handshake(error: tokio_tungstenite::tungstenite::Error) -> Self {
        match error {
            tokio_tungstenite::tungstenite::Error::Url(e) => Self::InvalidUrl(e.to_string()),
            other => Self::Connect(other.to_string()),
        }
    }
}
