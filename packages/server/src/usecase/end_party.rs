//! UseCase: the party lifecycle controller.
//!
//! ACTIVE → ENDED is the only transition and it is terminal; resuming
//! requires a new party. The sole trigger is the host's disconnect,
//! detected by `LeavePartyUseCase`.

use std::sync::Arc;

use parlor_shared::protocol::{MessageKind, RoomMessage};
use parlor_shared::time::now_millis;

use crate::domain::{
    notify_detached, Event, EventNotifier, FanoutBus, FanoutChannel, PartyId, PartyStore, UserId,
};

use super::error::EndPartyError;

pub struct EndPartyUseCase {
    bus: Arc<dyn FanoutBus>,
    store: Arc<dyn PartyStore>,
    notifier: Arc<dyn EventNotifier>,
}

impl EndPartyUseCase {
    pub fn new(
        bus: Arc<dyn FanoutBus>,
        store: Arc<dyn PartyStore>,
        notifier: Arc<dyn EventNotifier>,
    ) -> Self {
        Self {
            bus,
            store,
            notifier,
        }
    }

    /// End the party: broadcast the reserved control so every instance
    /// tears down its local room, then delete the record, then emit the
    /// end event.
    pub async fn execute(&self, party_id: &PartyId, host_id: &UserId) -> Result<(), EndPartyError> {
        let ended = RoomMessage::party_ended(party_id.as_str(), host_id.as_str(), now_millis());
        let payload = serde_json::to_string(&ended).unwrap();
        let channel = FanoutChannel::new(MessageKind::Controls, party_id.clone());
        self.bus.publish(&channel, &payload).await?;

        self.store.delete(party_id).await?;
        tracing::info!("party '{}' ended by host '{}'", party_id, host_id);

        notify_detached(
            self.notifier.clone(),
            Event::end_party(party_id.clone(), host_id.clone()),
        );
        Ok(())
    }
}
