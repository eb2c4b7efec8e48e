//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{PartyRecord, StoreError},
    ui::state::AppState,
    usecase::{CreatePartyError, GetPartyError},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    pub media_id: Option<String>,
    pub host_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyResponse {
    pub id: String,
    /// Join link clients can share, built from the configured public URL.
    pub url: String,
    pub party_val: PartyRecord,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Create a new party record
pub async fn create_party(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePartyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePartyResponse>), (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("rejected create party request: {}", e);
        error_response(StatusCode::BAD_REQUEST, "invalid request body")
    })?;

    let media_id = request.media_id.unwrap_or_default();
    let host_id = request.host_id.unwrap_or_default();

    match state.create_party_usecase.execute(media_id, host_id).await {
        Ok((party_id, record)) => {
            let response = CreatePartyResponse {
                id: party_id.to_string(),
                url: format!("{}/party/{}", state.public_url, party_id),
                party_val: record,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(CreatePartyError::Validation(e)) => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(CreatePartyError::Store(e)) => {
            tracing::error!("failed to create party: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "party store unavailable",
            ))
        }
    }
}

/// Get a party record by ID
pub async fn get_party(
    State(state): State<Arc<AppState>>,
    Path(party_id): Path<String>,
) -> Result<Json<PartyRecord>, (StatusCode, Json<ErrorResponse>)> {
    match state.get_party_usecase.execute(party_id).await {
        Ok(record) => Ok(Json(record)),
        Err(GetPartyError::Validation(_)) | Err(GetPartyError::Store(StoreError::NotFound(_))) => {
            Err(error_response(StatusCode::NOT_FOUND, "party not found"))
        }
        Err(GetPartyError::Store(e)) => {
            tracing::error!("failed to get party: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "party store unavailable",
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
