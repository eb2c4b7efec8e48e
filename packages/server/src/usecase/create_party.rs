//! UseCase: party creation.

use std::sync::Arc;

use crate::domain::{
    notify_detached, Event, EventNotifier, PartyId, PartyRecord, PartyStore, UserId,
    ValidationError,
};

use super::error::CreatePartyError;

pub struct CreatePartyUseCase {
    store: Arc<dyn PartyStore>,
    notifier: Arc<dyn EventNotifier>,
}

impl CreatePartyUseCase {
    pub fn new(store: Arc<dyn PartyStore>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Validate the request fields and create the party record.
    ///
    /// The returned record mirrors what the store persisted: paused at
    /// position zero, TTL already armed.
    pub async fn execute(
        &self,
        media_id: String,
        host_id: String,
    ) -> Result<(PartyId, PartyRecord), CreatePartyError> {
        if media_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("mediaId").into());
        }
        if host_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("hostId").into());
        }
        let host_id = UserId::try_from(host_id)?;

        let (party_id, record) = self.store.create(media_id, host_id.clone()).await?;
        tracing::info!("party '{}' created by host '{}'", party_id, host_id);

        notify_detached(
            self.notifier.clone(),
            Event::create_party(party_id.clone(), host_id),
        );
        Ok((party_id, record))
    }
}
