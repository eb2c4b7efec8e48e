//! HTTP event notifier.
//!
//! POSTs each event as JSON to `{analytics_url}/{channel}`. All call
//! sites go through `notify_detached`, so a slow or dead sink can never
//! stall the gateway.

use async_trait::async_trait;

use crate::domain::{Event, EventChannel, EventNotifier, NotifyError};

pub struct HttpEventNotifier {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEventNotifier {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, channel: EventChannel) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), channel)
    }
}

#[async_trait]
impl EventNotifier for HttpEventNotifier {
    async fn notify(&self, channel: EventChannel, event: Event) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.endpoint(channel))
            .json(&event)
            .send()
            .await
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;
        response
            .error_for_status()
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_channel_to_base_url() {
        // given:
        let notifier = HttpEventNotifier::new("http://analytics.local/sink/".to_string());

        // then:
        assert_eq!(
            notifier.endpoint(EventChannel::EngagementEvents),
            "http://analytics.local/sink/engagement-events"
        );
        assert_eq!(
            notifier.endpoint(EventChannel::PartyEvents),
            "http://analytics.local/sink/party-events"
        );
    }
}
