//! Domain layer: presence state and the interfaces it depends on.

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod presence;
pub mod repository;
pub mod value_object;

pub use broadcaster::{PresenceBroadcaster, PushChannel};
pub use entity::{Connection, IdentityPresence, PresenceChange, PresenceSnapshot, Release};
pub use error::{BroadcastError, IdentityError};
pub use presence::PresenceSet;
pub use repository::PresenceRepository;
pub use value_object::{ConnectionId, Identity, Timestamp};
