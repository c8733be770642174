//! Presence server for Campus Catalyst.
//!
//! Tracks which users are online over WebSocket and serves the current list
//! over HTTP.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin catalyst-server
//! cargo run --bin catalyst-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use catalyst_server::{
    infrastructure::{broadcaster::WebSocketBroadcaster, repository::InMemoryPresenceRepository},
    ui::Server,
    usecase::{
        AnnounceJoinUseCase, AnnounceLeaveUseCase, CloseConnectionUseCase,
        GetIdentityPresenceUseCase, GetOnlineUsersUseCase, OpenConnectionUseCase,
    },
};
use catalyst_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "catalyst-server")]
#[command(about = "Presence server with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CATALYST_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "CATALYST_PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. Broadcaster
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory presence state)
    let repository = Arc::new(InMemoryPresenceRepository::new(Arc::new(SystemClock)));

    // 2. Create Broadcaster (WebSocket implementation)
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 3. Create UseCases
    let open_connection_usecase = Arc::new(OpenConnectionUseCase::new(
        repository.clone(),
        broadcaster.clone(),
    ));
    let announce_join_usecase = Arc::new(AnnounceJoinUseCase::new(
        repository.clone(),
        broadcaster.clone(),
    ));
    let announce_leave_usecase = Arc::new(AnnounceLeaveUseCase::new(
        repository.clone(),
        broadcaster.clone(),
    ));
    let close_connection_usecase = Arc::new(CloseConnectionUseCase::new(
        repository.clone(),
        broadcaster.clone(),
    ));
    let get_online_users_usecase = Arc::new(GetOnlineUsersUseCase::new(repository.clone()));
    let get_identity_presence_usecase =
        Arc::new(GetIdentityPresenceUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        open_connection_usecase,
        announce_join_usecase,
        announce_leave_usecase,
        close_connection_usecase,
        get_online_users_usecase,
        get_identity_presence_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
