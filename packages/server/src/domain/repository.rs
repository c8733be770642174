//! Repository trait 定義
//!
//! ユースケース層が必要とするプレゼンス状態へのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各変更メソッドは、変更とスナップショット取得を一つのクリティカルセクションで
//! 行い、変更後の状態を返します。

use async_trait::async_trait;

use super::{
    entity::{IdentityPresence, PresenceChange, PresenceSnapshot, Release},
    value_object::{ConnectionId, Identity},
};

/// Presence Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 接続を登録し、現在のスナップショットを返す
    async fn open_connection(&self, connection_id: ConnectionId) -> PresenceSnapshot;

    /// identity を接続に紐付ける（常に変更として扱う）。
    /// 接続が開いていない場合は `None`
    async fn join(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
    ) -> Option<PresenceChange>;

    /// 接続が保持する identity を解放する。該当しない場合は `None`
    async fn leave(
        &self,
        connection_id: ConnectionId,
        identity: &Identity,
    ) -> Option<(Release, PresenceChange)>;

    /// 接続を削除する。identity を保持していなかった場合は `None`
    async fn close(&self, connection_id: ConnectionId) -> Option<(Release, PresenceChange)>;

    /// 現在のスナップショットを取得
    async fn snapshot(&self) -> PresenceSnapshot;

    /// identity 単位のプレゼンス情報を取得
    async fn presence_of(&self, identity: &Identity) -> IdentityPresence;
}
