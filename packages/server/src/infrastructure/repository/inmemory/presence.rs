//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! `PresenceSet` を Mutex で保護し、プロセス内でのみ保持します。
//! 再起動すると空の状態から始まります（永続化はしません）。

use std::sync::Arc;

use async_trait::async_trait;
use catalyst_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Identity, IdentityPresence, PresenceChange, PresenceRepository, PresenceSet,
    PresenceSnapshot, Release, Timestamp,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    /// プレゼンス状態（ドメインモデル）
    presence: Mutex<PresenceSet>,
    /// 接続時刻・last_seen の記録に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            presence: Mutex::new(PresenceSet::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

fn change_of(presence: &PresenceSet) -> PresenceChange {
    PresenceChange {
        snapshot: presence.snapshot(),
        targets: presence.connection_ids(),
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn open_connection(&self, connection_id: ConnectionId) -> PresenceSnapshot {
        let now = self.now();
        let mut presence = self.presence.lock().await;
        if !presence.open_connection(connection_id, now) {
            tracing::warn!("Connection '{}' was already open", connection_id);
        }
        presence.snapshot()
    }

    async fn join(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
    ) -> Option<PresenceChange> {
        let now = self.now();
        let mut presence = self.presence.lock().await;
        let Some(outcome) = presence.join(connection_id, identity.clone(), now) else {
            tracing::warn!(
                "Ignoring join of '{}' on connection '{}' that is not open",
                identity,
                connection_id
            );
            return None;
        };

        if let Some(replaced) = &outcome.replaced {
            tracing::debug!(
                "Connection '{}' switched from '{}' to '{}'",
                connection_id,
                replaced.identity,
                identity
            );
        }
        if outcome.newly_online {
            tracing::info!("'{}' is now online", identity);
        }

        Some(change_of(&presence))
    }

    async fn leave(
        &self,
        connection_id: ConnectionId,
        identity: &Identity,
    ) -> Option<(Release, PresenceChange)> {
        let now = self.now();
        let mut presence = self.presence.lock().await;
        let release = presence.leave(connection_id, identity, now)?;
        Some((release, change_of(&presence)))
    }

    async fn close(&self, connection_id: ConnectionId) -> Option<(Release, PresenceChange)> {
        let now = self.now();
        let mut presence = self.presence.lock().await;
        let release = presence.close(connection_id, now)?;
        Some((release, change_of(&presence)))
    }

    async fn snapshot(&self) -> PresenceSnapshot {
        self.presence.lock().await.snapshot()
    }

    async fn presence_of(&self, identity: &Identity) -> IdentityPresence {
        self.presence.lock().await.presence_of(identity)
    }
}
