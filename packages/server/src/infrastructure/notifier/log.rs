//! Log-only event notifier, used when no analytics sink is configured.

use async_trait::async_trait;

use crate::domain::{Event, EventChannel, EventNotifier, NotifyError};

pub struct LogEventNotifier;

#[async_trait]
impl EventNotifier for LogEventNotifier {
    async fn notify(&self, channel: EventChannel, event: Event) -> Result<(), NotifyError> {
        tracing::debug!("[{}] {:?}", channel, event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PartyId, UserId};

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        // given:
        let notifier = LogEventNotifier;
        let event = Event::join_party(
            PartyId::try_from("p1".to_string()).unwrap(),
            UserId::try_from("u1".to_string()).unwrap(),
        );

        // then:
        assert!(notifier
            .notify(EventChannel::UserEvents, event)
            .await
            .is_ok());
    }
}
