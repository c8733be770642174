mod http;
mod websocket;

pub use http::{get_identity_presence, get_online_users, health_check};
pub use websocket::websocket_handler;
