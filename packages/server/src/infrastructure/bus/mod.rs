//! Fanout bus adapters.
//!
//! - `redis`: pub/sub across gateway instances (PUBLISH/PSUBSCRIBE).
//! - `memory`: in-process fallback for single-instance deployments and
//!   tests.

pub mod memory;
pub mod redis;

pub use memory::MemoryFanoutBus;
pub use redis::RedisFanoutBus;
