//! UseCase layer: one struct per presence operation.

mod announce_join;
mod announce_leave;
mod close_connection;
mod get_identity_presence;
mod get_online_users;
mod open_connection;

pub use announce_join::AnnounceJoinUseCase;
pub use announce_leave::AnnounceLeaveUseCase;
pub use close_connection::CloseConnectionUseCase;
pub use get_identity_presence::GetIdentityPresenceUseCase;
pub use get_online_users::GetOnlineUsersUseCase;
pub use open_connection::OpenConnectionUseCase;

use crate::domain::{PresenceBroadcaster, PresenceChange};

/// Send a post-mutation snapshot to every target. Failures are logged only.
async fn publish(broadcaster: &dyn PresenceBroadcaster, change: &PresenceChange) {
    if let Err(e) = broadcaster
        .broadcast(change.targets.clone(), &change.snapshot)
        .await
    {
        tracing::warn!(
            "Failed to broadcast presence revision {}: {}",
            change.snapshot.revision,
            e
        );
    }
}
