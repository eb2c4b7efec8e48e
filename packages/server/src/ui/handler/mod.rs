//! Route handlers.

mod http;
mod websocket;

pub use http::{create_party, get_party, health_check};
pub use websocket::websocket_handler;
