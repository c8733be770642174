//! UseCase: オンラインユーザー一覧の取得

use std::sync::Arc;

use crate::domain::{PresenceRepository, PresenceSnapshot};

/// オンラインユーザー一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetOnlineUsersUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 現在のスナップショットを返す（副作用なし）
    pub async fn execute(&self) -> PresenceSnapshot {
        self.repository.snapshot().await
    }
}
