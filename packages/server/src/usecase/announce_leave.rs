//! UseCase: leave 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AnnounceLeaveUseCase::execute() メソッド
//! - 接続が保持する identity の解放とブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みの identity の leave
//! - 異常系：join していない組み合わせの leave（何もしない、通知もしない）
//! - エッジケース：同じ identity を持つ別の接続が残っている場合

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Identity, PresenceBroadcaster, PresenceRepository, PresenceSnapshot,
};

use super::publish;

/// leave のユースケース
pub struct AnnounceLeaveUseCase {
    /// Repository（プレゼンス状態の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// Broadcaster（プレゼンス通知の抽象化）
    broadcaster: Arc<dyn PresenceBroadcaster>,
}

impl AnnounceLeaveUseCase {
    /// 新しい AnnounceLeaveUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        broadcaster: Arc<dyn PresenceBroadcaster>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// leave を実行
    ///
    /// # Returns
    ///
    /// * `Some(PresenceSnapshot)` - 解放後のスナップショット（ブロードキャスト済み）
    /// * `None` - 接続がその identity を保持していなかった（何もしない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
    ) -> Option<PresenceSnapshot> {
        let Some((release, change)) = self.repository.leave(connection_id, &identity).await else {
            tracing::debug!(
                "Ignoring leave of '{}' from '{}': not joined",
                identity,
                connection_id
            );
            return None;
        };

        if release.went_offline {
            tracing::info!("'{}' is now offline", release.identity);
        }

        publish(self.broadcaster.as_ref(), &change).await;
        Some(change.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::broadcaster::MockPresenceBroadcaster,
        usecase::{
            AnnounceJoinUseCase,
            test_support::{create_test_broadcaster, create_test_repository, drain, open_connections},
        },
    };

    #[tokio::test]
    async fn test_leave_keeps_other_identities() {
        // テスト項目: join(conn1, 3), join(conn2, 9), leave(conn1, 3) でスナップショットは [9]
        // given (前提条件):
        let repository = create_test_repository();
        let broadcaster = create_test_broadcaster();
        let mut connections =
            open_connections(repository.as_ref(), broadcaster.as_ref(), 2).await;
        let join = AnnounceJoinUseCase::new(repository.clone(), broadcaster.clone());
        let leave = AnnounceLeaveUseCase::new(repository.clone(), broadcaster.clone());
        let conn1 = connections[0].0;
        let conn2 = connections[1].0;
        join.execute(conn1, Identity::Numeric(3)).await;
        join.execute(conn2, Identity::Numeric(9)).await;
        for (_, rx) in connections.iter_mut() {
            drain(rx);
        }

        // when (操作):
        let snapshot = leave.execute(conn1, Identity::Numeric(3)).await;

        // then (期待する結果):
        let snapshot = snapshot.expect("conn1 had joined as 3");
        assert_eq!(snapshot.users, vec![Identity::Numeric(9)]);
        // leave した接続も観測者として通知を受け取る
        for (_, rx) in connections.iter_mut() {
            assert_eq!(drain(rx), vec![snapshot.clone()]);
        }
    }

    #[tokio::test]
    async fn test_leave_without_join_is_silent_noop() {
        // テスト項目: join していない組み合わせの leave はスナップショットを変えず、通知もしない
        // given (前提条件):
        let repository = create_test_repository();
        let real_broadcaster = create_test_broadcaster();
        let connections =
            open_connections(repository.as_ref(), real_broadcaster.as_ref(), 2).await;
        AnnounceJoinUseCase::new(repository.clone(), real_broadcaster.clone())
            .execute(connections[0].0, Identity::Numeric(7))
            .await;
        let before = repository.snapshot().await;

        let mut broadcaster = MockPresenceBroadcaster::new();
        broadcaster.expect_broadcast().never();
        let leave = AnnounceLeaveUseCase::new(repository.clone(), Arc::new(broadcaster));

        // when (操作):
        let other_connection = leave.execute(connections[1].0, Identity::Numeric(7)).await;
        let other_identity = leave.execute(connections[0].0, Identity::Numeric(8)).await;

        // then (期待する結果):
        assert_eq!(other_connection, None);
        assert_eq!(other_identity, None);
        assert_eq!(repository.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_leave_with_other_connection_still_online() {
        // テスト項目: 同じ identity の別接続が残っていればオンラインのまま
        // given (前提条件):
        let repository = create_test_repository();
        let broadcaster = create_test_broadcaster();
        let connections = open_connections(repository.as_ref(), broadcaster.as_ref(), 2).await;
        let join = AnnounceJoinUseCase::new(repository.clone(), broadcaster.clone());
        let leave = AnnounceLeaveUseCase::new(repository.clone(), broadcaster.clone());
        join.execute(connections[0].0, Identity::Numeric(7)).await;
        join.execute(connections[1].0, Identity::Numeric(7)).await;

        // when (操作):
        let snapshot = leave.execute(connections[0].0, Identity::Numeric(7)).await;

        // then (期待する結果):
        assert_eq!(
            snapshot.map(|s| s.users),
            Some(vec![Identity::Numeric(7)])
        );
    }
}
