//! Party store port.
//!
//! The store is the only owner of party records. The gateway consults it
//! at creation, lookup and host-triggered deletion — never on the relay
//! path.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::party::{PartyId, PartyRecord, UserId};

/// Fixed lifetime of a party record. Sockets do not refresh it.
pub const PARTY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("party '{0}' was not found")]
    NotFound(PartyId),
    #[error("party store unavailable: {0}")]
    Unavailable(String),
}

/// Data access contract for party records.
///
/// There is deliberately no field-level update operation: playback state
/// sync is carried live over the fanout bus to avoid write amplification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Create a party record with a fresh unique id, `paused` playback
    /// state, position zero and the 24h TTL. Record and TTL are written
    /// atomically.
    async fn create(
        &self,
        media_id: String,
        host_id: UserId,
    ) -> Result<(PartyId, PartyRecord), StoreError>;

    /// Fetch a record. Expired records are indistinguishable from
    /// missing ones.
    async fn get(&self, party_id: &PartyId) -> Result<PartyRecord, StoreError>;

    /// Delete a record. Idempotent: deleting a missing key is not an
    /// error.
    async fn delete(&self, party_id: &PartyId) -> Result<(), StoreError>;
}
