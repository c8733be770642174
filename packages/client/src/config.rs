//! Client configuration.

use catalyst_server::domain::Identity;

use crate::domain::derive_api_url;

/// Settings for one client run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:3000/ws`
    pub url: String,
    /// HTTP base URL used for snapshot polling
    pub api_url: String,
    /// Identity announced right after connecting, if any
    pub identity: Option<Identity>,
}

impl ClientConfig {
    /// Build a config, deriving the API URL from the WebSocket URL when not given
    pub fn new(url: String, api_url: Option<String>, identity: Option<Identity>) -> Self {
        let api_url = api_url.unwrap_or_else(|| derive_api_url(&url));
        Self {
            url,
            api_url,
            identity,
        }
    }
}
