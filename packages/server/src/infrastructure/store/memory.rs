//! In-memory party store with lazy TTL expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use parlor_shared::time::{Clock, SystemClock};

use crate::domain::{PartyId, PartyRecord, PartyStore, StoreError, UserId, PARTY_TTL};

/// Record plus its expiry deadline. Expired entries are reaped lazily on
/// the next lookup.
type Entry = (PartyRecord, Instant);

pub struct MemoryPartyStore {
    parties: Mutex<HashMap<PartyId, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryPartyStore {
    pub fn new() -> Self {
        Self::with_ttl(PARTY_TTL)
    }

    /// Store with a custom TTL, for expiry tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            parties: Mutex::new(HashMap::new()),
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp `created_at`, for tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for MemoryPartyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PartyStore for MemoryPartyStore {
    async fn create(
        &self,
        media_id: String,
        host_id: UserId,
    ) -> Result<(PartyId, PartyRecord), StoreError> {
        let party_id = PartyId::generate();
        let record = PartyRecord::new(media_id, host_id, self.clock.now_millis());
        let deadline = Instant::now() + self.ttl;
        // single insert: record and deadline land together
        let mut parties = self.parties.lock().await;
        parties.insert(party_id.clone(), (record.clone(), deadline));
        Ok((party_id, record))
    }

    async fn get(&self, party_id: &PartyId) -> Result<PartyRecord, StoreError> {
        let mut parties = self.parties.lock().await;
        match parties.get(party_id) {
            Some((record, deadline)) if *deadline > Instant::now() => Ok(record.clone()),
            Some(_) => {
                parties.remove(party_id);
                Err(StoreError::NotFound(party_id.clone()))
            }
            None => Err(StoreError::NotFound(party_id.clone())),
        }
    }

    async fn delete(&self, party_id: &PartyId) -> Result<(), StoreError> {
        let mut parties = self.parties.lock().await;
        parties.remove(party_id);
        Ok(())
    }
}
