//! In-process fanout bus.
//!
//! Behaves like the broker-backed adapter restricted to one instance:
//! every subscriber, the publisher's own relay included, observes every
//! published message.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::{BusError, BusMessage, BusSubscription, FanoutBus, FanoutChannel};

pub struct MemoryFanoutBus {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<BusMessage>>>,
}

impl MemoryFanoutBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryFanoutBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FanoutBus for MemoryFanoutBus {
    async fn publish(&self, channel: &FanoutChannel, payload: &str) -> Result<(), BusError> {
        let mut subscribers = self.subscribers.lock().await;
        // prune subscriptions whose receiving side is gone
        subscribers.retain(|sender| {
            sender
                .send(BusMessage {
                    channel: channel.clone(),
                    payload: payload.to_string(),
                })
                .is_ok()
        });
        Ok(())
    }

    async fn subscribe(&self) -> Result<BusSubscription, BusError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().await.push(tx);
        Ok(BusSubscription::new(rx))
    }
}
