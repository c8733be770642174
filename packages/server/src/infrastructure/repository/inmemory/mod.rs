//! In-memory repositories.

mod presence;

pub use presence::InMemoryPresenceRepository;
