//! Utilities shared by the Catalyst presence server and client.

pub mod logger;
pub mod time;
