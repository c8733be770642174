//! CLI presence client for Campus Catalyst.
//!
//! Connects to the presence server, optionally announces an identity, and
//! prints every presence update. Falls back to the HTTP snapshot endpoint
//! while the WebSocket is unavailable.

pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod http;
pub mod runner;
pub mod session;
pub mod ui;

pub use config::ClientConfig;
pub use error::ClientError;
pub use runner::run_client;
