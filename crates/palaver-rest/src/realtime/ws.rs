//! WebSocket upgrade handler.

use crate::extractors::AuthenticatedUser;
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use palaver_core::UserId;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Upgrades `GET /ws?token=...` to a WebSocket and registers the caller
/// for real-time delivery.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, user.user_id, state))
}

async fn handle_socket(socket: WebSocket, user_id: UserId, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    state.registry.register(user_id, tx.clone());
    info!("User {} connected", user_id);

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(frame) => {
                        if sink.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    // Sender dropped: this connection was replaced.
                    None => break,
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(Message::Ping(payload))) => {
                        if sink.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    // Inbound traffic is not part of the protocol; all
                    // sends go through the REST endpoint.
                    Some(Ok(other)) => {
                        debug!("Ignoring inbound frame from {}: {:?}", user_id, other);
                    }
                }
            }
        }
    }

    state.registry.unregister(user_id, &tx);
    info!("User {} disconnected", user_id);
}
