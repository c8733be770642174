//! UseCase: 接続クローズ処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseConnectionUseCase::execute() メソッド
//! - leave を送らずに消えた接続の identity 解放
//!
//! ### なぜこのテストが必要か
//! - 異常切断でプレゼンスが「オンライン」のまま残らないことを保証する
//! - 複数タブ（同じ identity の複数接続）で早すぎるオフライン化を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みの接続の切断
//! - エッジケース：同じ identity の接続が2つある状態での片方の切断
//! - エッジケース：join していない観測者の切断（通知しない）

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceBroadcaster, PresenceRepository, PresenceSnapshot};

use super::publish;

/// 接続クローズのユースケース
pub struct CloseConnectionUseCase {
    /// Repository（プレゼンス状態の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// Broadcaster（プレゼンス通知の抽象化）
    broadcaster: Arc<dyn PresenceBroadcaster>,
}

impl CloseConnectionUseCase {
    /// 新しい CloseConnectionUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        broadcaster: Arc<dyn PresenceBroadcaster>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 接続クローズを実行（正常・異常切断の両方）
    ///
    /// # Returns
    ///
    /// * `Some(PresenceSnapshot)` - identity を解放した場合、残りの接続に送ったスナップショット
    /// * `None` - 接続が identity を保持していなかった
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<PresenceSnapshot> {
        // 1. Broadcaster から登録解除
        self.broadcaster.unregister(&connection_id).await;

        // 2. Repository から接続を削除し、保持していた identity を解放
        let (release, change) = self.repository.close(connection_id).await?;
        if release.went_offline {
            tracing::info!(
                "'{}' is now offline (connection '{}' closed)",
                release.identity,
                connection_id
            );
        }

        // 3. 残りの接続にブロードキャスト
        publish(self.broadcaster.as_ref(), &change).await;
        Some(change.snapshot)
    }
}
