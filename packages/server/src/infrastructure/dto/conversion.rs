//! Conversion logic between DTOs and domain entities.

use catalyst_shared::time::timestamp_to_rfc3339;

use crate::domain::{IdentityPresence, PresenceSnapshot};
use crate::infrastructure::dto::{http, websocket};

impl From<PresenceSnapshot> for websocket::ServerEvent {
    fn from(snapshot: PresenceSnapshot) -> Self {
        Self::PresenceUpdate {
            users: snapshot.users,
            revision: snapshot.revision,
        }
    }
}

impl From<&PresenceSnapshot> for websocket::ServerEvent {
    fn from(snapshot: &PresenceSnapshot) -> Self {
        snapshot.clone().into()
    }
}

impl From<IdentityPresence> for http::IdentityPresenceDto {
    fn from(model: IdentityPresence) -> Self {
        Self {
            identity: model.identity,
            online: model.online,
            connections: model.connections,
            last_seen: model.last_seen.map(|ts| timestamp_to_rfc3339(ts.value())),
        }
    }
}
