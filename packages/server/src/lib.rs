//! Party synchronization gateway library.
//!
//! Keeps any number of WebSocket viewers in lockstep on a shared,
//! time-limited party: the host controls playback, all members exchange
//! chat, and a publish/subscribe fanout replicates messages across
//! gateway instances.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// per-instance state and plumbing
pub mod registry;
pub mod relay;

// shared helpers
pub mod logger;
