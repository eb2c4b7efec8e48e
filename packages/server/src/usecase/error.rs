//! Use case error types.

use thiserror::Error;

use crate::domain::{BusError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum CreatePartyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum GetPartyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures on the inbound relay path. Malformed frames are dropped by
/// the caller; none of these terminate the connection.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed message payload: {0}")]
    MalformedPayload(String),
    #[error("invalid message type")]
    InvalidType,
    #[error(transparent)]
    Bus(#[from] BusError),
}

#[derive(Debug, Error)]
pub enum EndPartyError {
    #[error(transparent)]
    Bus(#[from] BusError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
