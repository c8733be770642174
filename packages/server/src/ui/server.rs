//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    AnnounceJoinUseCase, AnnounceLeaveUseCase, CloseConnectionUseCase, GetIdentityPresenceUseCase,
    GetOnlineUsersUseCase, OpenConnectionUseCase,
};

use super::{
    handler::{get_identity_presence, get_online_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Presence server
///
/// Owns the use cases and exposes them over HTTP and WebSocket.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     open_connection_usecase,
///     announce_join_usecase,
///     announce_leave_usecase,
///     close_connection_usecase,
///     get_online_users_usecase,
///     get_identity_presence_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        open_connection_usecase: Arc<OpenConnectionUseCase>,
        announce_join_usecase: Arc<AnnounceJoinUseCase>,
        announce_leave_usecase: Arc<AnnounceLeaveUseCase>,
        close_connection_usecase: Arc<CloseConnectionUseCase>,
        get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
        get_identity_presence_usecase: Arc<GetIdentityPresenceUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                open_connection_usecase,
                announce_join_usecase,
                announce_leave_usecase,
                close_connection_usecase,
                get_online_users_usecase,
                get_identity_presence_usecase,
            }),
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/online-users", get(get_online_users))
            .route("/api/online-users/{identity}", get(get_identity_presence))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Presence server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until the process ends
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router()).await
    }
}
