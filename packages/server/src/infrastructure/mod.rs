//! Infrastructure layer: concrete adapters for the domain ports.

pub mod bus;
pub mod notifier;
pub mod store;
