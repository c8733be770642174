//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use crate::{
    config::ClientConfig,
    domain::{failed_attempts_after, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    formatter::MessageFormatter,
    http::fetch_online_users,
    session::{SessionState, run_client_session, spawn_input_reader},
    ui::redisplay_prompt,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the presence client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let state = Arc::new(SessionState::new(config.identity.clone()));
    let mut input = spawn_input_reader(Arc::clone(&state));
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&config, &state, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }

                tracing::warn!("{}", e);
                if matches!(e, ClientError::Connect(_)) {
                    print_polled_snapshot(&config, &state).await;
                }

                reconnect_count = failed_attempts_after(&e, reconnect_count);
                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

/// Print the snapshot endpoint's list while the real-time channel is down
async fn print_polled_snapshot(config: &ClientConfig, state: &SessionState) {
    match fetch_online_users(&config.api_url).await {
        Ok(users) => {
            print!(
                "{}",
                MessageFormatter::format_polled_snapshot(&users, state.identity().as_ref())
            );
            redisplay_prompt(state.identity().as_ref());
        }
        Err(e) => {
            tracing::warn!("Presence unavailable: {}", e);
        }
    }
}
