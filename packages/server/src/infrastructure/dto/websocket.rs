//! WebSocket event DTOs.
//!
//! Frames are JSON text messages tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::Identity;

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Announce an identity on this connection
    Join { identity: Identity },
    /// Withdraw the identity announced on this connection
    Leave { identity: Identity },
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full set of online identities after a mutation
    PresenceUpdate { users: Vec<Identity>, revision: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_format() {
        // テスト項目: join / leave イベントが type タグ付きの JSON から読み取れる
        // given (前提条件):
        let join = r#"{"type":"join","identity":7}"#;
        let leave = r#"{"type":"leave","identity":"sam"}"#;

        // when (操作):
        let join: ClientEvent = serde_json::from_str(join).unwrap();
        let leave: ClientEvent = serde_json::from_str(leave).unwrap();

        // then (期待する結果):
        assert_eq!(
            join,
            ClientEvent::Join {
                identity: Identity::Numeric(7)
            }
        );
        assert_eq!(
            leave,
            ClientEvent::Leave {
                identity: Identity::Token("sam".to_string())
            }
        );
    }

    #[test]
    fn test_client_event_rejects_malformed_frames() {
        // テスト項目: 不正なフレームはパースエラーになる
        // given (前提条件):
        let frames = [
            r#"{"type":"join"}"#,
            r#"{"type":"join","identity":""}"#,
            r#"{"type":"dance","identity":7}"#,
            r#"7"#,
            "not json",
        ];

        // when (操作) / then (期待する結果):
        for frame in frames {
            assert!(
                serde_json::from_str::<ClientEvent>(frame).is_err(),
                "expected '{}' to be rejected",
                frame
            );
        }
    }

    #[test]
    fn test_presence_update_wire_format() {
        // テスト項目: presence_update が type タグ付きの JSON になる
        // given (前提条件):
        let event = ServerEvent::PresenceUpdate {
            users: vec![Identity::Numeric(3), Identity::Numeric(9)],
            revision: 4,
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"presence_update","users":[3,9],"revision":4}"#
        );
    }
}
