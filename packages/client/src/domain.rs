//! Domain logic for client-side operations.
//!
//! Pure functions, no side effects.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A malformed server URL will never succeed, so retrying is pointless.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - Number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Count of consecutive failed attempts after `error`.
///
/// A lost connection had completed its handshake, so it starts a new streak
/// instead of adding to the previous one.
pub fn failed_attempts_after(error: &ClientError, previous_failures: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => previous_failures + 1,
    }
}

/// Derive the HTTP base URL from a WebSocket endpoint URL.
///
/// `ws://host:port/ws` becomes `http://host:port`, `wss://` becomes `https://`.
pub fn derive_api_url(ws_url: &str) -> String {
    let http = if let Some(rest) = ws_url.strip_prefix("wss://") {
        format!("https://{}", rest)
    } else if let Some(rest) = ws_url.strip_prefix("ws://") {
        format!("http://{}", rest)
    } else {
        ws_url.to_string()
    };

    let trimmed = http.trim_end_matches('/');
    trimmed.strip_suffix("/ws").unwrap_or(trimmed).to_string()
}
