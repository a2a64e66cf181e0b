//! Realtime WebSocket endpoint
//!
//! Clients connect with `/api/ws?token=<token>` where the token was minted
//! by the session layer at login. A verified connection joins the user's
//! room and receives `stats_update` and `notification` events as JSON text
//! frames.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;
use realtime::verify::verify_token;

#[derive(Deserialize)]
pub struct WsQuery {
    pub token: String,
}

pub async fn upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<WsQuery>,
) -> Response {
    match verify_token(&query.token, &state.config.realtime_secret) {
        Some(user_id) => ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)),
        None => (StatusCode::UNAUTHORIZED, "invalid realtime token").into_response(),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: Uuid) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.hub.subscribe(user_id);

    info!(%user_id, "realtime client connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "failed to serialize realtime event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
                Err(RecvError::Lagged(skipped)) => {
                    // Slow consumer; the durable notification rows still
                    // hold everything it missed
                    warn!(%user_id, skipped, "realtime client lagged");
                    continue;
                }
            },

            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Ping(data))) => {
                    let _ = sender.send(Message::Pong(data)).await;
                }
                Some(Err(_)) => break,
                _ => {}
            }
        }
    }

    info!(%user_id, "realtime client disconnected");
}
