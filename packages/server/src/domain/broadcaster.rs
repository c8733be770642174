//! Broadcast capability used to publish presence snapshots.
//!
//! The registry never sees the transport's client list. It hands snapshots
//! and target connection ids to a [`PresenceBroadcaster`], which owns the
//! per-connection channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::PresenceSnapshot, error::BroadcastError, value_object::ConnectionId,
};

/// Outbound channel of one connection (encoded frames)
pub type PushChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceBroadcaster: Send + Sync {
    /// Start delivering updates to `connection_id` through `channel`
    async fn register(&self, connection_id: ConnectionId, channel: PushChannel);

    /// Stop delivering updates to `connection_id`
    async fn unregister(&self, connection_id: &ConnectionId);

    /// Deliver `snapshot` to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        snapshot: &PresenceSnapshot,
    ) -> Result<(), BroadcastError>;

    /// Deliver `snapshot` to every target.
    ///
    /// Fire-and-forget per target: a failing target is skipped, not fatal.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        snapshot: &PresenceSnapshot,
    ) -> Result<(), BroadcastError>;
}
