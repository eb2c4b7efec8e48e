//! In-process room registry.
//!
//! A room is the set of live WebSocket connections on *this* instance for
//! one party id. Rooms are never shared across instances; cross-instance
//! consistency comes from the fanout bus alone.
//!
//! All mutation and delivery happens under the registry lock, so a
//! connection removed from its room can never be targeted by a flush in
//! progress.

use std::collections::HashMap;
use std::fmt;

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::domain::PartyId;

/// What the per-socket pusher loop receives.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundFrame {
    /// Text frame to forward to the client.
    Message(String),
    /// Close the socket with a normal closure code.
    Close,
}

/// Identity of one attached connection within its room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Connection set of one party on this instance.
#[derive(Default)]
struct Room {
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<OutboundFrame>>,
}

/// Registry of all rooms on this instance.
///
/// Invariant: an entry exists iff at least one live connection for that
/// party id is attached here.
pub struct RoomRegistry {
    rooms: Mutex<HashMap<PartyId, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Attach a connection to the party's room, creating the room if this
    /// is the first local connection for that party.
    pub async fn attach(
        &self,
        party_id: &PartyId,
        sender: mpsc::UnboundedSender<OutboundFrame>,
    ) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(party_id.clone())
            .or_default()
            .connections
            .insert(connection_id.clone(), sender);
        connection_id
    }

    /// Detach a connection; drops the room entry when its connection set
    /// becomes empty. Returns `true` when the room was removed.
    pub async fn detach(&self, party_id: &PartyId, connection_id: &ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get_mut(party_id) else {
            return false;
        };
        room.connections.remove(connection_id);
        if room.connections.is_empty() {
            rooms.remove(party_id);
            return true;
        }
        false
    }

    /// Deliver a payload to every connection in the party's local room,
    /// sender included. Best-effort: a connection mid-teardown is skipped.
    /// Returns the number of queued deliveries.
    pub async fn deliver(&self, party_id: &PartyId, payload: &str) -> usize {
        let rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(party_id) else {
            return 0;
        };
        let mut delivered = 0;
        for (connection_id, sender) in room.connections.iter() {
            if sender
                .send(OutboundFrame::Message(payload.to_string()))
                .is_err()
            {
                tracing::warn!("failed to deliver to connection '{}', skipping", connection_id);
            } else {
                delivered += 1;
            }
        }
        delivered
    }

    /// Queue a close for every connection in the party's local room.
    ///
    /// Room entries are not removed here; each closing transport runs its
    /// own detach, which keeps the registry invariant intact.
    pub async fn close_party(&self, party_id: &PartyId) {
        let rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(party_id) else {
            return;
        };
        for sender in room.connections.values() {
            let _ = sender.send(OutboundFrame::Close);
        }
    }

    /// Number of local connections for a party.
    pub async fn member_count(&self, party_id: &PartyId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms
            .get(party_id)
            .map(|room| room.connections.len())
            .unwrap_or(0)
    }

    /// Whether a room entry exists for a party on this instance.
    pub async fn contains(&self, party_id: &PartyId) -> bool {
        self.rooms.lock().await.contains_key(party_id)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
