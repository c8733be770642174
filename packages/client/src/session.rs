//! WebSocket client session management.

use std::sync::{Arc, Mutex};

use catalyst_server::{
    domain::Identity,
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
};
use catalyst_shared::time::get_timestamp;
use futures_util::{Sink, SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{Command, parse_command},
    config::ClientConfig,
    error::ClientError,
    formatter::MessageFormatter,
    http::fetch_online_users,
    ui::{prompt, redisplay_prompt},
};

/// Identity announced by this client, shared with the readline thread.
///
/// Survives reconnects so the identity is re-announced on a new connection.
#[derive(Debug, Default)]
pub struct SessionState {
    identity: Mutex<Option<Identity>>,
}

impl SessionState {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity: Mutex::new(identity),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_identity(&self, identity: Option<Identity>) {
        *self
            .identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = identity;
    }
}

/// Spawn the blocking readline thread and return the channel of typed lines.
///
/// The channel closes on Ctrl+C or Ctrl+D.
pub fn spawn_input_reader(state: Arc<SessionState>) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let prompt = prompt(state.identity().as_ref());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one WebSocket session until the user quits or the connection drops.
///
/// Returns `Ok(())` when the user ends the session.
pub async fn run_client_session(
    config: &ClientConfig,
    state: &SessionState,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(ClientError::from_handshake)?;

    tracing::info!("Connected to presence server at {}", config.url);
    println!("\nConnected. Type 'help' for commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    if let Some(identity) = state.identity() {
        send_event(&mut write, &ClientEvent::Join { identity }).await?;
    }

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", render_server_frame(&text, state.identity().as_ref()));
                    redisplay_prompt(state.identity().as_ref());
                }
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(state.identity().as_ref());
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost("closed by server".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
                None => {
                    return Err(ClientError::ConnectionLost("stream ended".to_string()));
                }
            },
            line = input.recv() => {
                let Some(line) = line else {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };
                if !handle_command(&line, config, state, &mut write).await? {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                }
            }
        }
    }
}

/// Execute one typed command. Returns `false` when the session should end.
async fn handle_command<S>(
    line: &str,
    config: &ClientConfig,
    state: &SessionState,
    write: &mut S,
) -> Result<bool, ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    match parse_command(line) {
        Ok(Command::Join(identity)) => {
            send_event(
                write,
                &ClientEvent::Join {
                    identity: identity.clone(),
                },
            )
            .await?;
            state.set_identity(Some(identity));
        }
        Ok(Command::Leave) => match state.identity() {
            Some(identity) => {
                send_event(write, &ClientEvent::Leave { identity }).await?;
                state.set_identity(None);
            }
            None => {
                print!("{}", MessageFormatter::format_notice("Not joined."));
                redisplay_prompt(None);
            }
        },
        Ok(Command::Who) => {
            match fetch_online_users(&config.api_url).await {
                Ok(users) => print!(
                    "{}",
                    MessageFormatter::format_polled_snapshot(&users, state.identity().as_ref())
                ),
                Err(e) => print!("{}", MessageFormatter::format_notice(&e.to_string())),
            }
            redisplay_prompt(state.identity().as_ref());
        }
        Ok(Command::Help) => {
            print!("{}", MessageFormatter::format_help());
            redisplay_prompt(state.identity().as_ref());
        }
        Ok(Command::Quit) => return Ok(false),
        Err(e) => {
            print!("{}", MessageFormatter::format_notice(&e.to_string()));
            redisplay_prompt(state.identity().as_ref());
        }
    }

    Ok(true)
}

async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = serde_json::to_string(event)
        .map_err(|e| ClientError::ConnectionLost(format!("failed to encode event: {}", e)))?;

    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionLost(e.to_string()))
}

/// Render a text frame received from the server
fn render_server_frame(text: &str, me: Option<&Identity>) -> String {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(ServerEvent::PresenceUpdate { users, revision }) => {
            MessageFormatter::format_presence_update(&users, revision, me, get_timestamp())
        }
        Err(_) => MessageFormatter::format_raw_message(text),
    }
}
