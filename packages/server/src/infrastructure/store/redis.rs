//! Redis-backed party store.
//!
//! Records are stored as JSON under `party:{id}` with the 24h TTL set in
//! the same `SET ... EX` command, so a record can never exist without its
//! expiry.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::{PartyId, PartyRecord, PartyStore, StoreError, UserId, PARTY_TTL};

use parlor_shared::time::now_millis;

pub struct RedisPartyStore {
    conn: ConnectionManager,
}

impl RedisPartyStore {
    /// Connect to the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { conn })
    }

    fn key(party_id: &PartyId) -> String {
        format!("party:{party_id}")
    }
}

#[async_trait]
impl PartyStore for RedisPartyStore {
    async fn create(
        &self,
        media_id: String,
        host_id: UserId,
    ) -> Result<(PartyId, PartyRecord), StoreError> {
        let party_id = PartyId::generate();
        let record = PartyRecord::new(media_id, host_id, now_millis());
        let value =
            serde_json::to_string(&record).map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::key(&party_id), value, PARTY_TTL.as_secs())
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok((party_id, record))
    }

    async fn get(&self, party_id: &PartyId) -> Result<PartyRecord, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(Self::key(party_id))
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        match value {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| StoreError::Unavailable(e.to_string()))
            }
            None => Err(StoreError::NotFound(party_id.clone())),
        }
    }

    async fn delete(&self, party_id: &PartyId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(Self::key(party_id))
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_keyed_by_party_id() {
        // given:
        let party_id = PartyId::try_from("p1".to_string()).unwrap();

        // then:
        assert_eq!(RedisPartyStore::key(&party_id), "party:p1");
    }
}
