//! UseCase: join 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AnnounceJoinUseCase::execute() メソッド
//! - identity の登録と、全ての開いている接続へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の状態からの join
//! - エッジケース：同じ identity の再 join（メンバーが変わらなくても通知する）
//! - エッジケース：join していない観測者にも通知が届く
//! - エッジケース：切断処理の後に届いた join は無視され、通知もしない

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Identity, PresenceBroadcaster, PresenceRepository, PresenceSnapshot,
};

use super::publish;

/// join のユースケース
pub struct AnnounceJoinUseCase {
    /// Repository（プレゼンス状態の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// Broadcaster（プレゼンス通知の抽象化）
    broadcaster: Arc<dyn PresenceBroadcaster>,
}

impl AnnounceJoinUseCase {
    /// 新しい AnnounceJoinUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        broadcaster: Arc<dyn PresenceBroadcaster>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// join を実行
    ///
    /// メンバーが変化しない再 join でも、必ず1回ブロードキャストします。
    ///
    /// # Returns
    ///
    /// 変更後のスナップショット。接続が既に閉じている場合は `None`
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
    ) -> Option<PresenceSnapshot> {
        let change = self.repository.join(connection_id, identity).await?;
        publish(self.broadcaster.as_ref(), &change).await;
        Some(change.snapshot)
    }
}
