//! Typed events for the analytics collaborator.
//!
//! Events are fire-and-forget: emission happens on a detached task whose
//! failure is logged and can never be awaited or apply backpressure to
//! the gateway.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use parlor_shared::protocol::MessageKind;
use parlor_shared::time::now_millis;

use super::party::{PartyId, UserId};

/// Logical channels the analytics sink consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventChannel {
    PartyEvents,
    UserEvents,
    EngagementEvents,
}

impl EventChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventChannel::PartyEvents => "party-events",
            EventChannel::UserEvents => "user-events",
            EventChannel::EngagementEvents => "engagement-events",
        }
    }
}

impl fmt::Display for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    CreateParty,
    JoinParty,
    LeaveParty,
    EndParty,
    Controls,
    Chat,
}

/// Immutable event record handed to the notifier; never stored by the
/// gateway itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub timestamp: i64,
    pub party_id: PartyId,
    pub user_id: UserId,
    pub event_type: EventType,
    /// Raw message content, carried for control messages only. Chat
    /// content is never forwarded to the notifier (privacy rule).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Event {
    fn new(party_id: PartyId, user_id: UserId, event_type: EventType) -> Self {
        Self {
            timestamp: now_millis(),
            party_id,
            user_id,
            event_type,
            message: None,
        }
    }

    pub fn create_party(party_id: PartyId, host_id: UserId) -> Self {
        Self::new(party_id, host_id, EventType::CreateParty)
    }

    pub fn join_party(party_id: PartyId, user_id: UserId) -> Self {
        Self::new(party_id, user_id, EventType::JoinParty)
    }

    pub fn leave_party(party_id: PartyId, user_id: UserId) -> Self {
        Self::new(party_id, user_id, EventType::LeaveParty)
    }

    pub fn end_party(party_id: PartyId, host_id: UserId) -> Self {
        Self::new(party_id, host_id, EventType::EndParty)
    }

    /// Engagement event for a relayed message. Control messages carry
    /// their raw content; chat messages only their kind.
    pub fn engagement(
        party_id: PartyId,
        user_id: UserId,
        kind: MessageKind,
        message: &str,
    ) -> Self {
        let (event_type, message) = match kind {
            MessageKind::Controls => (EventType::Controls, Some(message.to_string())),
            MessageKind::Chat => (EventType::Chat, None),
        };
        Self {
            message,
            ..Self::new(party_id, user_id, event_type)
        }
    }

    /// The logical channel this event belongs on.
    pub fn channel(&self) -> EventChannel {
        match self.event_type {
            EventType::CreateParty | EventType::EndParty => EventChannel::PartyEvents,
            EventType::JoinParty | EventType::LeaveParty => EventChannel::UserEvents,
            EventType::Controls | EventType::Chat => EventChannel::EngagementEvents,
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("analytics sink unreachable: {0}")]
    Unreachable(String),
}

/// Boundary to the analytics collaborator. Delivery is best-effort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn notify(&self, channel: EventChannel, event: Event) -> Result<(), NotifyError>;
}

/// Emit an event on a detached task.
///
/// The task's failure is logged internally; callers cannot await it and
/// it can never fail or stall the triggering flow.
pub fn notify_detached(notifier: Arc<dyn EventNotifier>, event: Event) {
    tokio::spawn(async move {
        let channel = event.channel();
        if let Err(e) = notifier.notify(channel, event).await {
            tracing::warn!("failed to notify {} sink: {}", channel, e);
        }
    });
}
