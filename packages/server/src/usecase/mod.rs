//! Application layer: one use case per gateway operation.

pub mod create_party;
pub mod end_party;
pub mod error;
pub mod get_party;
pub mod join_party;
pub mod leave_party;
pub mod relay_message;

pub use create_party::CreatePartyUseCase;
pub use end_party::EndPartyUseCase;
pub use error::{CreatePartyError, EndPartyError, GetPartyError, RelayError};
pub use get_party::GetPartyUseCase;
pub use join_party::JoinPartyUseCase;
pub use leave_party::LeavePartyUseCase;
pub use relay_message::RelayMessageUseCase;
