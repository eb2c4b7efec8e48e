//! Per-instance fanout subscriber loop.
//!
//! Every gateway instance runs exactly one relay: it observes everything
//! published on `controls:*` and `chat:*` and re-broadcasts each message
//! to the local room for that party — the sender's own connection
//! included. When the reserved end-of-party control arrives, every local
//! member is closed *after* delivery, so clients observe the message
//! before the disconnect.

use std::sync::Arc;

use tokio::task::JoinHandle;

use parlor_shared::protocol::{MessageKind, RoomMessage, PARTY_ENDED_MESSAGE};

use crate::domain::{BusMessage, FanoutBus, FanoutChannel};
use crate::registry::RoomRegistry;

/// Spawn the relay loop for this instance.
pub fn spawn_relay(bus: Arc<dyn FanoutBus>, registry: Arc<RoomRegistry>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut subscription = match bus.subscribe().await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::error!("failed to subscribe to fanout bus: {}", e);
                return;
            }
        };
        tracing::info!("fanout relay subscribed");

        while let Some(message) = subscription.next().await {
            relay_one(&registry, message).await;
        }
        tracing::warn!("fanout subscription closed, relay loop exiting");
    })
}

async fn relay_one(registry: &RoomRegistry, message: BusMessage) {
    let BusMessage { channel, payload } = message;
    let delivered = registry.deliver(&channel.party_id, &payload).await;
    tracing::debug!(
        "relayed {} message to {} local member(s) of party '{}'",
        channel.kind,
        delivered,
        channel.party_id
    );

    if is_party_ended(&channel, &payload) {
        registry.close_party(&channel.party_id).await;
        tracing::info!("closed local room for ended party '{}'", channel.party_id);
    }
}

fn is_party_ended(channel: &FanoutChannel, payload: &str) -> bool {
    if channel.kind != MessageKind::Controls {
        return false;
    }
    serde_json::from_str::<RoomMessage>(payload)
        .map(|message| message.message == PARTY_ENDED_MESSAGE)
        .unwrap_or(false)
}
