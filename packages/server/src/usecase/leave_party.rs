//! UseCase: connection close handling, including the host check.

use std::sync::Arc;

use crate::domain::{
    notify_detached, Event, EventNotifier, PartyId, PartyStore, StoreError, UserId,
};
use crate::registry::{ConnectionId, RoomRegistry};

use super::end_party::EndPartyUseCase;

pub struct LeavePartyUseCase {
    registry: Arc<RoomRegistry>,
    store: Arc<dyn PartyStore>,
    notifier: Arc<dyn EventNotifier>,
    end_party: Arc<EndPartyUseCase>,
}

impl LeavePartyUseCase {
    pub fn new(
        registry: Arc<RoomRegistry>,
        store: Arc<dyn PartyStore>,
        notifier: Arc<dyn EventNotifier>,
        end_party: Arc<EndPartyUseCase>,
    ) -> Self {
        Self {
            registry,
            store,
            notifier,
            end_party,
        }
    }

    /// Detach the connection, emit the leave event, then check whether
    /// the departing user is the party's host.
    ///
    /// If the store cannot be reached the host check is inconclusive and
    /// the party is left active rather than guessed at.
    pub async fn execute(
        &self,
        party_id: &PartyId,
        user_id: &UserId,
        connection_id: &ConnectionId,
    ) {
        self.registry.detach(party_id, connection_id).await;
        notify_detached(
            self.notifier.clone(),
            Event::leave_party(party_id.clone(), user_id.clone()),
        );

        match self.store.get(party_id).await {
            Ok(record) if record.host_id == *user_id => {
                if let Err(e) = self.end_party.execute(party_id, user_id).await {
                    tracing::warn!("failed to end party '{}': {}", party_id, e);
                }
            }
            Ok(_) => {
                // member left, party stays active
            }
            Err(StoreError::NotFound(_)) => {
                // expired or already ended, nothing to do
            }
            Err(e) => {
                tracing::warn!(
                    "cannot determine host for party '{}' ({}), leaving it active",
                    party_id,
                    e
                );
            }
        }
    }
}
