//! Domain entities.

use serde::Serialize;

use super::value_object::{ConnectionId, Identity, Timestamp};

/// One live real-time transport session as seen by the registry.
///
/// The transport layer owns the socket; the registry only keeps this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Identity announced on this connection, `None` until `join`
    pub identity: Option<Identity>,
    pub opened_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, opened_at: Timestamp) -> Self {
        Self {
            id,
            identity: None,
            opened_at,
        }
    }
}

/// Full set of online identities at one registry revision.
///
/// `users` is sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceSnapshot {
    pub revision: u64,
    pub users: Vec<Identity>,
}

/// Result of a presence mutation: the new snapshot and who must receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceChange {
    pub snapshot: PresenceSnapshot,
    /// Connections open after the mutation
    pub targets: Vec<ConnectionId>,
}

/// An identity claim released by `leave` or by a closed connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub identity: Identity,
    /// `true` when the last claiming connection went away
    pub went_offline: bool,
}

/// Presence details for a single identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPresence {
    pub identity: Identity,
    pub online: bool,
    /// Number of live connections claiming the identity
    pub connections: usize,
    /// Most recent join or departure, if the identity was ever seen
    pub last_seen: Option<Timestamp>,
}
