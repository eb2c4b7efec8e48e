//! UseCase: attaching a validated connection to its room.

use std::sync::Arc;

use tokio::sync::mpsc;

use parlor_shared::protocol::WelcomeMessage;
use parlor_shared::time::now_millis;

use crate::domain::{notify_detached, Event, EventNotifier, PartyId, UserId};
use crate::registry::{ConnectionId, OutboundFrame, RoomRegistry};

pub struct JoinPartyUseCase {
    registry: Arc<RoomRegistry>,
    notifier: Arc<dyn EventNotifier>,
}

impl JoinPartyUseCase {
    pub fn new(registry: Arc<RoomRegistry>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self { registry, notifier }
    }

    /// Attach the connection, emit the join event and send the one-time
    /// welcome payload to the new connection only.
    pub async fn execute(
        &self,
        party_id: PartyId,
        user_id: UserId,
        sender: mpsc::UnboundedSender<OutboundFrame>,
    ) -> ConnectionId {
        let connection_id = self.registry.attach(&party_id, sender.clone()).await;

        let welcome = WelcomeMessage::new(party_id.as_str(), user_id.as_str(), now_millis());
        let payload = serde_json::to_string(&welcome).unwrap();
        if sender.send(OutboundFrame::Message(payload)).is_err() {
            tracing::warn!("failed to send welcome to '{}'", user_id);
        }

        notify_detached(self.notifier.clone(), Event::join_party(party_id, user_id));
        connection_id
    }
}
