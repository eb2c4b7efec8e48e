//! Redis pub/sub fanout bus.
//!
//! Publishing goes through a shared connection manager; each subscription
//! holds its own pub/sub connection PSUBSCRIBEd to `controls:*` and
//! `chat:*`, pumped into the subscription channel by a background task.

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::mpsc;

use crate::domain::{
    BusError, BusMessage, BusSubscription, FanoutBus, FanoutChannel, FANOUT_PATTERNS,
};

pub struct RedisFanoutBus {
    client: redis::Client,
    conn: ConnectionManager,
}

impl RedisFanoutBus {
    /// Connect to the given Redis URL.
    pub async fn connect(url: &str) -> Result<Self, BusError> {
        let client = redis::Client::open(url).map_err(|e| BusError::Unavailable(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| BusError::Unavailable(e.to_string()))?;
        Ok(Self { client, conn })
    }
}

#[async_trait]
impl FanoutBus for RedisFanoutBus {
    async fn publish(&self, channel: &FanoutChannel, payload: &str) -> Result<(), BusError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .publish(channel.to_string(), payload)
            .await
            .map_err(|e| BusError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(&self) -> Result<BusSubscription, BusError> {
        let conn = self
            .client
            .get_async_connection()
            .await
            .map_err(|e| BusError::Unavailable(e.to_string()))?;
        let mut pubsub = conn.into_pubsub();
        for pattern in FANOUT_PATTERNS {
            pubsub
                .psubscribe(pattern)
                .await
                .map_err(|e| BusError::Unavailable(e.to_string()))?;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                let name = msg.get_channel_name().to_string();
                let Some(channel) = FanoutChannel::parse(&name) else {
                    tracing::warn!("ignoring message on unknown channel '{}'", name);
                    continue;
                };
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!("dropping non-text payload on '{}': {}", name, e);
                        continue;
                    }
                };
                if tx.send(BusMessage { channel, payload }).is_err() {
                    // subscription dropped, stop pumping
                    break;
                }
            }
            tracing::warn!("redis pub/sub stream ended");
        });

        Ok(BusSubscription::new(rx))
    }
}
