//! Snapshot polling over HTTP.

use catalyst_server::domain::Identity;

use crate::error::ClientError;

/// Fetch the current online list from `GET /api/online-users`
pub async fn fetch_online_users(api_url: &str) -> Result<Vec<Identity>, ClientError> {
    let url = format!("{}/api/online-users", api_url.trim_end_matches('/'));
    tracing::debug!("Polling {}", url);

    let users = reqwest::get(&url)
        .await?
        .error_for_status()?
        .json::<Vec<Identity>>()
        .await?;

    Ok(users)
}
