//! UseCase: relaying an inbound frame onto the fanout bus.

use std::sync::Arc;

use parlor_shared::protocol::{ClientFrame, RoomMessage};
use parlor_shared::time::now_millis;

use crate::domain::{
    notify_detached, Event, EventNotifier, FanoutBus, FanoutChannel, PartyId, UserId,
};

use super::error::RelayError;

pub struct RelayMessageUseCase {
    bus: Arc<dyn FanoutBus>,
    notifier: Arc<dyn EventNotifier>,
}

impl RelayMessageUseCase {
    pub fn new(bus: Arc<dyn FanoutBus>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self { bus, notifier }
    }

    /// Parse, stamp and publish one inbound frame.
    ///
    /// The frame is validated against the two known variants at the
    /// boundary; anything else is rejected here and dropped by the
    /// caller. Local delivery happens when the instance's own
    /// subscription observes the publish, never directly from here.
    pub async fn execute(
        &self,
        party_id: &PartyId,
        user_id: &UserId,
        raw: &str,
    ) -> Result<(), RelayError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| RelayError::MalformedPayload(e.to_string()))?;
        let frame: ClientFrame =
            serde_json::from_value(value).map_err(|_| RelayError::InvalidType)?;

        let stamped = RoomMessage::stamp(frame, party_id.as_str(), user_id.as_str(), now_millis());
        let payload = serde_json::to_string(&stamped).unwrap();
        let channel = FanoutChannel::new(stamped.kind, party_id.clone());
        self.bus.publish(&channel, &payload).await?;

        notify_detached(
            self.notifier.clone(),
            Event::engagement(
                party_id.clone(),
                user_id.clone(),
                stamped.kind,
                &stamped.message,
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bus::MockFanoutBus;
    use crate::domain::{BusError, EventChannel, EventType};
    use crate::infrastructure::bus::MemoryFanoutBus;
    use crate::usecase::test_support::{settle, RecordingNotifier};
    use parlor_shared::protocol::MessageKind;

    fn ids() -> (PartyId, UserId) {
        (
            PartyId::try_from("p1".to_string()).unwrap(),
            UserId::try_from("u1".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_valid_controls_frame_is_published_stamped() {
        // given:
        let bus = Arc::new(MemoryFanoutBus::new());
        let mut subscription = bus.subscribe().await.unwrap();
        let (notifier, _) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(bus, notifier);
        let (party_id, user_id) = ids();

        // when:
        usecase
            .execute(&party_id, &user_id, r#"{"type":"controls","message":"play"}"#)
            .await
            .unwrap();

        // then:
        let published = subscription.next().await.unwrap();
        assert_eq!(published.channel.kind, MessageKind::Controls);
        assert_eq!(published.channel.party_id, party_id);
        let message: RoomMessage = serde_json::from_str(&published.payload).unwrap();
        assert_eq!(message.message, "play");
        assert_eq!(message.user_id, "u1");
        assert_eq!(message.party_id, "p1");
        assert!(message.timestamp > 0);
    }

    #[tokio::test]
    async fn test_chat_frame_lands_on_the_chat_channel() {
        // given:
        let bus = Arc::new(MemoryFanoutBus::new());
        let mut subscription = bus.subscribe().await.unwrap();
        let (notifier, _) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(bus, notifier);
        let (party_id, user_id) = ids();

        // when:
        usecase
            .execute(&party_id, &user_id, r#"{"type":"chat","message":"hi"}"#)
            .await
            .unwrap();

        // then:
        assert_eq!(
            subscription.next().await.unwrap().channel.kind,
            MessageKind::Chat
        );
    }

    #[tokio::test]
    async fn test_non_json_frame_is_malformed_and_not_published() {
        // given:
        let mut bus = MockFanoutBus::new();
        bus.expect_publish().times(0);
        let (notifier, events) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(Arc::new(bus), notifier);
        let (party_id, user_id) = ids();

        // when:
        let result = usecase.execute(&party_id, &user_id, "not json").await;
        settle().await;

        // then:
        assert!(matches!(result, Err(RelayError::MalformedPayload(_))));
        assert!(events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_type_is_rejected_and_not_published() {
        // given:
        let mut bus = MockFanoutBus::new();
        bus.expect_publish().times(0);
        let (notifier, events) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(Arc::new(bus), notifier);
        let (party_id, user_id) = ids();

        // when:
        let result = usecase
            .execute(&party_id, &user_id, r#"{"type":"seek","message":"42"}"#)
            .await;
        settle().await;

        // then:
        assert!(matches!(result, Err(RelayError::InvalidType)));
        assert!(events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_bus_failure_surfaces_without_event() {
        // given:
        let mut bus = MockFanoutBus::new();
        bus.expect_publish()
            .returning(|_, _| Err(BusError::Unavailable("down".to_string())));
        let (notifier, events) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(Arc::new(bus), notifier);
        let (party_id, user_id) = ids();

        // when:
        let result = usecase
            .execute(&party_id, &user_id, r#"{"type":"chat","message":"hi"}"#)
            .await;
        settle().await;

        // then:
        assert!(matches!(result, Err(RelayError::Bus(_))));
        assert!(events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_controls_engagement_event_carries_content_chat_does_not() {
        // given:
        let bus = Arc::new(MemoryFanoutBus::new());
        let (notifier, events) = RecordingNotifier::new();
        let usecase = RelayMessageUseCase::new(bus, notifier);
        let (party_id, user_id) = ids();

        // when:
        usecase
            .execute(&party_id, &user_id, r#"{"type":"controls","message":"seek:42"}"#)
            .await
            .unwrap();
        usecase
            .execute(&party_id, &user_id, r#"{"type":"chat","message":"private"}"#)
            .await
            .unwrap();
        settle().await;

        // then:
        let events = events.lock().await;
        assert_eq!(events.len(), 2);
        let controls = events
            .iter()
            .find(|(_, e)| e.event_type == EventType::Controls)
            .unwrap();
        assert_eq!(controls.0, EventChannel::EngagementEvents);
        assert_eq!(controls.1.message.as_deref(), Some("seek:42"));
        let chat = events
            .iter()
            .find(|(_, e)| e.event_type == EventType::Chat)
            .unwrap();
        assert_eq!(chat.1.message, None);
    }
}
