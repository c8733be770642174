//! Presence server: routing, handlers and lifecycle.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
