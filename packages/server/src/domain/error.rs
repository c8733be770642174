//! Domain error types.

use thiserror::Error;

/// Identity validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Token is empty after trimming
    #[error("identity must not be empty")]
    Empty,

    /// Token exceeds the maximum length
    #[error("identity is too long ({length} characters, max {max})")]
    TooLong { length: usize, max: usize },
}

/// Errors raised while pushing presence updates to connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// Target connection is not registered
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// Connection channel is closed
    #[error("failed to push to connection: {0}")]
    PushFailed(String),

    /// Update could not be encoded for the wire
    #[error("failed to encode presence update: {0}")]
    Encode(String),
}
