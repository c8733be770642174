//! Presence tracking and broadcast server for Campus Catalyst.
//!
//! Clients open a WebSocket, announce an identity with `join`, and receive a
//! `presence_update` with the full set of online identities after every
//! change. An identity stays online while any of its connections is alive.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
