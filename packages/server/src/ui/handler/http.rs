//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::Identity,
    infrastructure::dto::http::{HealthDto, IdentityPresenceDto},
    ui::{error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current online identities. Always 200, works without a WebSocket.
pub async fn get_online_users(State(state): State<Arc<AppState>>) -> Json<Vec<Identity>> {
    let snapshot = state.get_online_users_usecase.execute().await;
    Json(snapshot.users)
}

/// Presence details for one identity
pub async fn get_identity_presence(
    State(state): State<Arc<AppState>>,
    Path(identity): Path<String>,
) -> Result<Json<IdentityPresenceDto>, ApiError> {
    let identity = Identity::parse(&identity).inspect_err(|e| {
        tracing::warn!("Rejected presence lookup for '{}': {}", identity, e);
    })?;

    let presence = state
        .get_identity_presence_usecase
        .execute(&identity)
        .await;
    Ok(Json(presence.into()))
}
