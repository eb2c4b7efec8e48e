//! Shared library for the Parlor watch-party gateway.
//!
//! Holds everything a client needs to speak to the gateway: the WebSocket
//! wire protocol and the timestamp helpers used to stamp messages.

pub mod protocol;
pub mod time;
