//! Party value objects and the stored party record.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for identifiers and request fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Opaque unique party identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Generate a fresh unique party id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartyId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("partyId"));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a connected user. The party's host is the user whose id
/// equals the record's `host_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("userId"));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Advisory playback state of a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// The party record as owned by the party store.
///
/// `playback_state` and `position` are advisory: live sync rides the
/// fanout bus and is not written back per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRecord {
    pub media_id: String,
    pub host_id: UserId,
    pub created_at: i64,
    pub playback_state: PlaybackState,
    pub position: f64,
}

impl PartyRecord {
    /// A freshly created party: paused at position zero.
    pub fn new(media_id: String, host_id: UserId, created_at: i64) -> Self {
        Self {
            media_id,
            host_id,
            created_at,
            playback_state: PlaybackState::Paused,
            position: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_rejects_empty_and_blank() {
        // when/then:
        assert_eq!(
            PartyId::try_from("".to_string()),
            Err(ValidationError::EmptyField("partyId"))
        );
        assert_eq!(
            PartyId::try_from("   ".to_string()),
            Err(ValidationError::EmptyField("partyId"))
        );
    }

    #[test]
    fn test_party_id_accepts_opaque_tokens() {
        // when:
        let id = PartyId::try_from("p1".to_string()).unwrap();

        // then:
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn test_generated_party_ids_are_unique() {
        // given:
        let mut seen = std::collections::HashSet::new();

        // when/then:
        for _ in 0..100 {
            assert!(seen.insert(PartyId::generate().to_string()));
        }
    }

    #[test]
    fn test_user_id_rejects_empty() {
        assert_eq!(
            UserId::try_from("".to_string()),
            Err(ValidationError::EmptyField("userId"))
        );
    }

    #[test]
    fn test_new_record_starts_paused_at_zero() {
        // given:
        let host = UserId::try_from("h1".to_string()).unwrap();

        // when:
        let record = PartyRecord::new("m1".to_string(), host.clone(), 1000);

        // then:
        assert_eq!(record.media_id, "m1");
        assert_eq!(record.host_id, host);
        assert_eq!(record.created_at, 1000);
        assert_eq!(record.playback_state, PlaybackState::Paused);
        assert_eq!(record.position, 0.0);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        // given:
        let record = PartyRecord::new(
            "m1".to_string(),
            UserId::try_from("h1".to_string()).unwrap(),
            1000,
        );

        // when:
        let json = serde_json::to_string(&record).unwrap();

        // then:
        assert!(json.contains(r#""mediaId":"m1""#));
        assert!(json.contains(r#""hostId":"h1""#));
        assert!(json.contains(r#""playbackState":"paused""#));
        assert!(json.contains(r#""position":0.0"#));
        assert!(json.contains(r#""createdAt":1000"#));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        // given:
        let record = PartyRecord::new(
            "m1".to_string(),
            UserId::try_from("h1".to_string()).unwrap(),
            1000,
        );

        // when:
        let json = serde_json::to_string(&record).unwrap();
        let parsed: PartyRecord = serde_json::from_str(&json).unwrap();

        // then:
        assert_eq!(parsed, record);
    }
}
