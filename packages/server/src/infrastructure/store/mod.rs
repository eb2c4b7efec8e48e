//! Party store adapters.
//!
//! - `redis`: the durable registry with native key expiry, shared across
//!   gateway instances.
//! - `memory`: in-process fallback for single-instance deployments and
//!   tests.

pub mod memory;
pub mod redis;

pub use memory::MemoryPartyStore;
pub use redis::RedisPartyStore;
