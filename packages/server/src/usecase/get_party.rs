//! UseCase: party lookup.

use std::sync::Arc;

use crate::domain::{PartyId, PartyRecord, PartyStore};

use super::error::GetPartyError;

pub struct GetPartyUseCase {
    store: Arc<dyn PartyStore>,
}

impl GetPartyUseCase {
    pub fn new(store: Arc<dyn PartyStore>) -> Self {
        Self { store }
    }

    /// Look up a party record. Expired and unknown parties are the same
    /// not-found, regardless of any sockets still attached.
    pub async fn execute(&self, party_id: String) -> Result<PartyRecord, GetPartyError> {
        let party_id = PartyId::try_from(party_id)?;
        Ok(self.store.get(&party_id).await?)
    }
}
