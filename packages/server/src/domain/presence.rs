//! Reference-counted presence state.
//!
//! An identity is online while at least one open connection claims it.
//! Claims are tracked per connection, so a connection that vanishes without
//! an explicit `leave` can still be resolved back to the identity it held.
//!
//! Every mutation bumps the revision; reads never do.

use std::collections::{HashMap, hash_map::Entry};

use super::{
    entity::{Connection, IdentityPresence, PresenceSnapshot, Release},
    value_object::{ConnectionId, Identity, Timestamp},
};

/// Outcome of a `join`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The identity went from offline to online
    pub newly_online: bool,
    /// Claim dropped because the connection switched to another identity
    pub replaced: Option<Release>,
}

/// Default bound on `last_seen` entries
pub const DEFAULT_LAST_SEEN_CAPACITY: usize = 4096;

/// Authoritative presence state for the process.
#[derive(Debug)]
pub struct PresenceSet {
    /// identity -> number of open connections claiming it
    online_counts: HashMap<Identity, usize>,
    /// open connections, including the identity each one claims
    connections: HashMap<ConnectionId, Connection>,
    /// Online identities are always kept; offline ones are evicted oldest
    /// first once the map grows past `last_seen_capacity`.
    last_seen: HashMap<Identity, Timestamp>,
    last_seen_capacity: usize,
    revision: u64,
}

impl Default for PresenceSet {
    fn default() -> Self {
        Self::with_last_seen_capacity(DEFAULT_LAST_SEEN_CAPACITY)
    }
}

impl PresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_last_seen_capacity(last_seen_capacity: usize) -> Self {
        Self {
            online_counts: HashMap::new(),
            connections: HashMap::new(),
            last_seen: HashMap::new(),
            last_seen_capacity,
            revision: 0,
        }
    }

    /// Register an open connection. Returns `false` if it was already known.
    pub fn open_connection(&mut self, id: ConnectionId, opened_at: Timestamp) -> bool {
        match self.connections.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Connection::new(id, opened_at));
                true
            }
        }
    }

    /// Claim `identity` on connection `id`.
    ///
    /// Returns `None`, leaving the state untouched, when the connection is not
    /// open. Re-announcing the identity a connection already holds does not
    /// add a second claim; announcing a different one releases the old claim
    /// first.
    pub fn join(
        &mut self,
        id: ConnectionId,
        identity: Identity,
        at: Timestamp,
    ) -> Option<JoinOutcome> {
        let previous = self
            .connections
            .get_mut(&id)?
            .identity
            .replace(identity.clone());

        let outcome = match previous {
            Some(held) if held == identity => JoinOutcome {
                newly_online: false,
                replaced: None,
            },
            Some(held) => {
                let replaced = self.release_claim(held, at);
                JoinOutcome {
                    newly_online: self.add_claim(&identity),
                    replaced: Some(replaced),
                }
            }
            None => JoinOutcome {
                newly_online: self.add_claim(&identity),
                replaced: None,
            },
        };

        self.last_seen.insert(identity, at);
        self.prune_last_seen();
        self.revision += 1;
        Some(outcome)
    }

    /// Release the claim of `identity` held by connection `id`.
    ///
    /// Returns `None`, leaving the state untouched, when the connection does
    /// not currently claim that identity.
    pub fn leave(
        &mut self,
        id: ConnectionId,
        identity: &Identity,
        at: Timestamp,
    ) -> Option<Release> {
        let connection = self.connections.get_mut(&id)?;
        if connection.identity.as_ref() != Some(identity) {
            return None;
        }
        connection.identity = None;

        let release = self.release_claim(identity.clone(), at);
        self.revision += 1;
        Some(release)
    }

    /// Drop connection `id`, releasing its claim if it held one.
    pub fn close(&mut self, id: ConnectionId, at: Timestamp) -> Option<Release> {
        let identity = self.connections.remove(&id)?.identity?;

        let release = self.release_claim(identity, at);
        self.revision += 1;
        Some(release)
    }

    pub fn snapshot(&self) -> PresenceSnapshot {
        let mut users: Vec<Identity> = self.online_counts.keys().cloned().collect();
        users.sort();
        PresenceSnapshot {
            revision: self.revision,
            users,
        }
    }

    /// Ids of all open connections, sorted
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        let mut ids: Vec<ConnectionId> = self.connections.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn presence_of(&self, identity: &Identity) -> IdentityPresence {
        let connections = self.online_counts.get(identity).copied().unwrap_or(0);
        IdentityPresence {
            identity: identity.clone(),
            online: connections > 0,
            connections,
            last_seen: self.last_seen.get(identity).copied(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` when this is the first claim for the identity.
    fn add_claim(&mut self, identity: &Identity) -> bool {
        let count = self.online_counts.entry(identity.clone()).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Evict the oldest offline entries once `last_seen` exceeds its capacity.
    ///
    /// Shrinks to three quarters of the capacity so the sort runs rarely.
    fn prune_last_seen(&mut self) {
        if self.last_seen.len() <= self.last_seen_capacity {
            return;
        }

        let mut offline: Vec<(Timestamp, Identity)> = self
            .last_seen
            .iter()
            .filter(|(identity, _)| !self.online_counts.contains_key(*identity))
            .map(|(identity, at)| (*at, identity.clone()))
            .collect();
        offline.sort();

        let target = self.last_seen_capacity - self.last_seen_capacity / 4;
        let excess = self.last_seen.len().saturating_sub(target);
        for (_, identity) in offline.into_iter().take(excess) {
            self.last_seen.remove(&identity);
        }
    }

    fn release_claim(&mut self, identity: Identity, at: Timestamp) -> Release {
        let remaining = self
            .online_counts
            .get_mut(&identity)
            .map(|count| {
                *count = count.saturating_sub(1);
                *count
            })
            .unwrap_or(0);
        let went_offline = remaining == 0;
        if went_offline {
            self.online_counts.remove(&identity);
        }
        self.last_seen.insert(identity.clone(), at);
        Release {
            identity,
            went_offline,
        }
    }
}
