//! WebSocket を使った PresenceBroadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - スナップショットを `presence_update` フレームにエンコードして送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、送信だけを担当します。
//!
//! 接続ごとに最後に送ったリビジョンを記録し、それより古いスナップショットは
//! 送りません。各スナップショットは全体の状態なので、古いものを捨てても
//! 最終的な表示は一致します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastError, ConnectionId, PresenceBroadcaster, PresenceSnapshot, PushChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// 登録済みの接続
struct Subscriber {
    sender: PushChannel,
    /// 最後に送信したスナップショットのリビジョン
    last_revision: Option<u64>,
}

impl Subscriber {
    fn is_stale(&self, revision: u64) -> bool {
        self.last_revision.is_some_and(|last| revision <= last)
    }
}

/// WebSocket を使った PresenceBroadcaster 実装
#[derive(Default)]
pub struct WebSocketBroadcaster {
    /// 接続中のクライアントの sender
    subscribers: Mutex<HashMap<ConnectionId, Subscriber>>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みの接続数
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}

fn encode(snapshot: &PresenceSnapshot) -> Result<String, BroadcastError> {
    serde_json::to_string(&ServerEvent::from(snapshot))
        .map_err(|e| BroadcastError::Encode(e.to_string()))
}

#[async_trait]
impl PresenceBroadcaster for WebSocketBroadcaster {
    async fn register(&self, connection_id: ConnectionId, channel: PushChannel) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(
            connection_id,
            Subscriber {
                sender: channel,
                last_revision: None,
            },
        );
        tracing::debug!("Connection '{}' registered to broadcaster", connection_id);
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' unregistered from broadcaster", connection_id);
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        snapshot: &PresenceSnapshot,
    ) -> Result<(), BroadcastError> {
        let frame = encode(snapshot)?;
        let mut subscribers = self.subscribers.lock().await;

        let subscriber = subscribers
            .get_mut(connection_id)
            .ok_or_else(|| BroadcastError::ConnectionNotFound(connection_id.to_string()))?;
        if subscriber.is_stale(snapshot.revision) {
            tracing::debug!(
                "Skipping stale revision {} for '{}'",
                snapshot.revision,
                connection_id
            );
            return Ok(());
        }

        subscriber
            .sender
            .send(frame)
            .map_err(|e| BroadcastError::PushFailed(e.to_string()))?;
        subscriber.last_revision = Some(snapshot.revision);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        snapshot: &PresenceSnapshot,
    ) -> Result<(), BroadcastError> {
        let frame = encode(snapshot)?;
        let mut subscribers = self.subscribers.lock().await;

        for target in targets {
            let Some(subscriber) = subscribers.get_mut(&target) else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                continue;
            };
            if subscriber.is_stale(snapshot.revision) {
                tracing::debug!(
                    "Skipping stale revision {} for '{}'",
                    snapshot.revision,
                    target
                );
                continue;
            }

            // ブロードキャストでは一部の送信失敗を許容
            match subscriber.sender.send(frame.clone()) {
                Ok(()) => {
                    subscriber.last_revision = Some(snapshot.revision);
                    tracing::trace!("Pushed revision {} to '{}'", snapshot.revision, target);
                }
                Err(e) => {
                    tracing::warn!("Failed to push presence to '{}': {}", target, e);
                }
            }
        }

        Ok(())
    }
}
