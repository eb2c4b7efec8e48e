//! Domain layer: value objects, party records and the ports the gateway
//! consumes (party store, fanout bus, event notifier).
//!
//! Use cases depend on these traits; the concrete adapters live in the
//! infrastructure layer (dependency inversion).

pub mod bus;
pub mod events;
pub mod party;
pub mod store;

pub use bus::{BusError, BusMessage, BusSubscription, FanoutBus, FanoutChannel, FANOUT_PATTERNS};
pub use events::{notify_detached, Event, EventChannel, EventNotifier, EventType, NotifyError};
pub use party::{PartyId, PartyRecord, PlaybackState, UserId, ValidationError};
pub use store::{PartyStore, StoreError, PARTY_TTL};
