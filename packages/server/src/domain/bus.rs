//! Fanout bus port.
//!
//! The bus is what makes horizontal scaling possible: any instance can
//! publish a room message, every instance re-broadcasts it to its local
//! room members. No global order is guaranteed across publishers; each
//! subscriber observes its own delivery order.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use parlor_shared::protocol::MessageKind;

use super::party::PartyId;

/// Subscription patterns covering both message kinds for all parties.
pub const FANOUT_PATTERNS: [&str; 2] = ["controls:*", "chat:*"];

#[derive(Debug, Error)]
pub enum BusError {
    #[error("fanout bus unavailable: {0}")]
    Unavailable(String),
}

/// A bus channel, scoped to one message kind and one party:
/// `controls:{partyId}` or `chat:{partyId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutChannel {
    pub kind: MessageKind,
    pub party_id: PartyId,
}

impl FanoutChannel {
    pub fn new(kind: MessageKind, party_id: PartyId) -> Self {
        Self { kind, party_id }
    }

    /// Parse a channel name back into its kind and party id. Returns
    /// `None` for names outside the two known patterns.
    pub fn parse(name: &str) -> Option<Self> {
        let (kind, party_id) = name.split_once(':')?;
        let kind = MessageKind::from_str(kind).ok()?;
        let party_id = PartyId::try_from(party_id.to_string()).ok()?;
        Some(Self { kind, party_id })
    }
}

impl fmt::Display for FanoutChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.party_id)
    }
}

/// A message as observed by a subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct BusMessage {
    pub channel: FanoutChannel,
    pub payload: String,
}

/// Stream of bus messages for one subscriber.
pub struct BusSubscription {
    receiver: mpsc::UnboundedReceiver<BusMessage>,
}

impl BusSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<BusMessage>) -> Self {
        Self { receiver }
    }

    /// Next message, or `None` once the publishing side is gone.
    pub async fn next(&mut self) -> Option<BusMessage> {
        self.receiver.recv().await
    }
}

/// Publish/subscribe contract between gateway instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FanoutBus: Send + Sync {
    /// Publish a payload on a channel, reaching every subscribed
    /// instance (this one included).
    async fn publish(&self, channel: &FanoutChannel, payload: &str) -> Result<(), BusError>;

    /// Subscribe to both message kinds for all parties.
    async fn subscribe(&self) -> Result<BusSubscription, BusError>;
}
