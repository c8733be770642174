//! WebSocket connection handlers.
//!
//! Each socket becomes one registry connection. Inbound `join` / `leave`
//! frames drive the registry; whatever ends the socket (close frame, read
//! error, dropped peer, failed write) releases the connection's claim.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards frames from the rx channel to the WebSocket sink.
///
/// The task ends when the channel closes or a write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Register before reading so the baseline snapshot is the first frame
    let (tx, rx) = mpsc::unbounded_channel();
    let snapshot = state
        .open_connection_usecase
        .execute(connection_id, tx)
        .await;
    tracing::info!(
        "Connection '{}' opened ({} online)",
        connection_id,
        snapshot.users.len()
    );

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_frame(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Binary(data) => {
                    tracing::warn!(
                        "Ignoring binary frame ({} bytes) from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            recv_task.abort();
            // A frame still being applied must settle before the claim is released
            let _ = recv_task.await;
        }
    };

    match state.close_connection_usecase.execute(connection_id).await {
        Some(snapshot) => tracing::info!(
            "Connection '{}' closed ({} online)",
            connection_id,
            snapshot.users.len()
        ),
        None => tracing::info!("Connection '{}' closed", connection_id),
    }
}

/// Apply one inbound text frame. Malformed frames are logged and ignored.
async fn handle_client_frame(state: &AppState, connection_id: ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Join { identity } => {
            tracing::debug!("'{}' joined on '{}'", identity, connection_id);
            state
                .announce_join_usecase
                .execute(connection_id, identity)
                .await;
        }
        ClientEvent::Leave { identity } => {
            tracing::debug!("'{}' left on '{}'", identity, connection_id);
            state
                .announce_leave_usecase
                .execute(connection_id, identity)
                .await;
        }
    }
}
