//! WebSocket wire protocol between the gateway and clients.
//!
//! Clients send bare `{type, message}` frames; the gateway stamps
//! `userId`/`partyId`/`timestamp` before fanning a message out, so outbound
//! frames mirror the inbound shape plus the stamped fields. Anything that
//! does not parse as one of the two known variants is dropped by the
//! gateway without closing the connection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reserved control payload. Every member of a party receives it exactly
/// once before the gateway force-closes their sockets.
pub const PARTY_ENDED_MESSAGE: &str = "party_ended_by_host";

/// The two message kinds the gateway relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Controls,
    Chat,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Controls => "controls",
            MessageKind::Chat => "chat",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "controls" => Ok(MessageKind::Controls),
            "chat" => Ok(MessageKind::Chat),
            _ => Err(()),
        }
    }
}

/// Inbound frame as sent by a client. Only `type` and `message` are
/// trusted; everything else is stamped server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientFrame {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub message: String,
}

/// Outbound frame, broadcast to the full room (sender included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub message: String,
    pub user_id: String,
    pub party_id: String,
    pub timestamp: i64,
}

impl RoomMessage {
    /// Stamp a client frame with its sender, party and publish time.
    pub fn stamp(frame: ClientFrame, party_id: &str, user_id: &str, timestamp: i64) -> Self {
        Self {
            kind: frame.kind,
            message: frame.message,
            user_id: user_id.to_string(),
            party_id: party_id.to_string(),
            timestamp,
        }
    }

    /// The reserved control message published when the host disconnects.
    pub fn party_ended(party_id: &str, host_id: &str, timestamp: i64) -> Self {
        Self {
            kind: MessageKind::Controls,
            message: PARTY_ENDED_MESSAGE.to_string(),
            user_id: host_id.to_string(),
            party_id: party_id.to_string(),
            timestamp,
        }
    }

    /// Whether this is the reserved end-of-party control message.
    pub fn is_party_ended(&self) -> bool {
        self.kind == MessageKind::Controls && self.message == PARTY_ENDED_MESSAGE
    }
}

/// One-time payload sent to a freshly attached connection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub party_id: String,
    pub user_id: String,
    pub timestamp: i64,
}

impl WelcomeMessage {
    pub fn new(party_id: &str, user_id: &str, timestamp: i64) -> Self {
        Self {
            kind: "welcome".to_string(),
            party_id: party_id.to_string(),
            user_id: user_id.to_string(),
            timestamp,
        }
    }
}
