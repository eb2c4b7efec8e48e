//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::usecase::{
    CreatePartyUseCase, GetPartyUseCase, JoinPartyUseCase, LeavePartyUseCase, RelayMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub create_party_usecase: Arc<CreatePartyUseCase>,
    pub get_party_usecase: Arc<GetPartyUseCase>,
    pub join_party_usecase: Arc<JoinPartyUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub leave_party_usecase: Arc<LeavePartyUseCase>,
    /// Base URL advertised in party join links, e.g. `http://127.0.0.1:8080`.
    pub public_url: String,
}
