//! WebSocket connection handlers.
//!
//! Each connection gets a [`ConnectionId`] and an unbounded channel; the
//! channel's sender is handed to the presence registry when the client
//! announces itself with `joinChat`. Inbound frames are decoded once at this
//! boundary; malformed or rejected frames are dropped with a logged warning
//! and nothing is surfaced back to the sender (fire-and-forget).

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use courtside_shared::protocol::{ClientEvent, decode_client_event};

use crate::{
    domain::{ChatId, ConnectionId, MessageContent, PusherChannel, UserId},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This is the outbound half of the connection: frames fanned out by the
/// chat relay (via the presence registry) are forwarded to this client.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            // Send the frame to this client
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive fan-out frames
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection {} opened", connection_id);

    // Spawn a task forwarding fan-out frames to this client
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive frames from this client, strictly in arrival
    // order
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on connection {}: {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_frame(&state_clone, connection_id, &tx, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unregister must run before any other cleanup once the connection
    // closes. Removal is by connection identity, so a presence entry already
    // replaced by a newer session is left untouched.
    state.disconnect_usecase.execute(connection_id).await;
    tracing::info!("Connection {} closed", connection_id);
}

/// Dispatch one decoded inbound frame.
async fn handle_frame(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    match decode_client_event(text) {
        Ok(ClientEvent::JoinChat(payload)) => {
            state
                .join_chat_usecase
                .execute(UserId::new(payload.user_id), connection_id, tx.clone())
                .await;
        }
        Ok(ClientEvent::SendMessage(payload)) => {
            // Content is validated here; frames empty after trimming are
            // dropped without surfacing an error to the sender.
            let sender = UserId::new(payload.sender);
            let content = match MessageContent::new(payload.content) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Dropping sendMessage from user '{}': {}", sender, e);
                    return;
                }
            };

            if let Err(e) = state
                .send_message_usecase
                .execute(ChatId::new(payload.chat_id), sender, content)
                .await
            {
                tracing::warn!(
                    "Dropping sendMessage for chat '{}' from user '{}': {}",
                    payload.chat_id,
                    sender,
                    e
                );
            }
        }
        Ok(ClientEvent::Unrecognized { event }) => {
            tracing::warn!(
                "Dropping frame with unrecognized event '{}' on connection {}",
                event,
                connection_id
            );
        }
        Err(e) => {
            tracing::warn!(
                "Dropping malformed frame on connection {}: {}",
                connection_id,
                e
            );
        }
    }
}
