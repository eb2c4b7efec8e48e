//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{PartyId, UserId},
    registry::OutboundFrame,
    ui::state::AppState,
    usecase::RelayError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectQuery {
    pub party_id: Option<String>,
    pub user_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Both identifiers are mandatory; reject before the upgrade so the
    // client never sees a half-open socket.
    let party_id = match query.party_id.map(PartyId::try_from) {
        Some(Ok(id)) => id,
        _ => {
            tracing::warn!("websocket connect rejected: missing or empty partyId");
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let user_id = match query.user_id.map(UserId::try_from) {
        Some(Ok(id)) => id,
        _ => {
            tracing::warn!("websocket connect rejected: missing or empty userId");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!("user '{}' connecting to party '{}'", user_id, party_id);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, party_id, user_id)))
}

/// Spawns a task that drains the connection's outbound queue into the
/// WebSocket sink.
///
/// A [`OutboundFrame::Close`] frame sends a proper close to the peer and
/// ends the task, which tears down the whole connection via the select
/// below.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Message(msg) => {
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close => {
                    let _ = sender
                        .send(Message::Close(Some(CloseFrame {
                            code: close_code::NORMAL,
                            reason: "party ended".into(),
                        })))
                        .await;
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, party_id: PartyId, user_id: UserId) {
    let (sender, mut receiver) = socket.split();

    // Register with the local room; everything published for this party
    // now reaches this connection through tx.
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state
        .join_party_usecase
        .execute(party_id.clone(), user_id.clone(), tx)
        .await;

    let party_id_recv = party_id.clone();
    let user_id_recv = user_id.clone();
    let state_recv = state.clone();

    // Inbound: parse and publish every text frame. Bad frames are logged
    // and dropped without touching the connection.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match state_recv
                        .relay_message_usecase
                        .execute(&party_id_recv, &user_id_recv, &text)
                        .await
                    {
                        Ok(()) => {}
                        Err(RelayError::MalformedPayload(e)) => {
                            tracing::warn!(
                                "dropping non-JSON frame from '{}': {}",
                                user_id_recv,
                                e
                            );
                        }
                        Err(RelayError::InvalidType) => {
                            tracing::warn!(
                                "dropping frame with unknown type from '{}'",
                                user_id_recv
                            );
                        }
                        Err(RelayError::Bus(e)) => {
                            tracing::error!("failed to publish message: {}", e);
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("user '{}' requested close", user_id_recv);
                    break;
                }
                _ => {}
            }
        }
    });

    // Outbound: push queued frames to this client.
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .leave_party_usecase
        .execute(&party_id, &user_id, &connection_id)
        .await;
    tracing::info!("user '{}' disconnected from party '{}'", user_id, party_id);
}
