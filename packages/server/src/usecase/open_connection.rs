//! UseCase: 接続オープン処理
//!
//! 接続を観測者として登録し、現在のスナップショットを新しい接続にだけ送ります。
//! プレゼンス集合は変化しないため、ブロードキャストは行いません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, PresenceBroadcaster, PresenceRepository, PresenceSnapshot, PushChannel,
};

/// 接続オープンのユースケース
pub struct OpenConnectionUseCase {
    /// Repository（プレゼンス状態の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// Broadcaster（プレゼンス通知の抽象化）
    broadcaster: Arc<dyn PresenceBroadcaster>,
}

impl OpenConnectionUseCase {
    /// 新しい OpenConnectionUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        broadcaster: Arc<dyn PresenceBroadcaster>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 接続オープンを実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `channel` - 接続へのフレーム送信用チャンネル
    ///
    /// # Returns
    ///
    /// 接続に送った初期スナップショット
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        channel: PushChannel,
    ) -> PresenceSnapshot {
        // 1. 先に Broadcaster へ登録（以降のブロードキャストを取りこぼさない）
        self.broadcaster.register(connection_id, channel).await;

        // 2. Repository に接続を登録
        let snapshot = self.repository.open_connection(connection_id).await;

        // 3. 初期スナップショットを送信
        if let Err(e) = self.broadcaster.push_to(&connection_id, &snapshot).await {
            tracing::warn!(
                "Failed to send initial presence to '{}': {}",
                connection_id,
                e
            );
        }

        snapshot
    }
}
