//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Identity;

/// Presence of a single identity (`GET /api/online-users/{identity}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPresenceDto {
    pub identity: Identity,
    pub online: bool,
    pub connections: usize,
    /// RFC 3339, `null` if the identity was never seen since startup
    pub last_seen: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Error body for rejected requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
