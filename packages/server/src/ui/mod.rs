//! HTTP and WebSocket surface of the gateway.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
