//! Event notifier adapters.
//!
//! - `http`: POSTs events to the analytics collaborator.
//! - `log`: records events in the gateway's own log when no sink is
//!   configured.

pub mod http;
pub mod log;

pub use http::HttpEventNotifier;
pub use log::LogEventNotifier;
