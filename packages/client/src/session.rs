//! WebSocket session management for the chat client.
//!
//! A [`ChatSession`] owns at most one connection per app session:
//! `connect` is idempotent, `send` serializes outgoing events without
//! automatic retries, and a single receive loop per connection feeds
//! incoming `newMessage` frames into the shared [`MessageLog`].

use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use courtside_shared::protocol::{
    ClientEvent, JoinChatPayload, MessagePayload, SendMessagePayload, ServerEvent,
};

use crate::error::ClientError;
use crate::message_log::MessageLog;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

struct ActiveConnection {
    writer: WsSink,
    recv_task: JoinHandle<()>,
}

/// Client-side connection manager: one WebSocket connection per session.
pub struct ChatSession {
    url: String,
    log: Arc<Mutex<MessageLog>>,
    incoming_tx: mpsc::UnboundedSender<MessagePayload>,
    conn: Option<ActiveConnection>,
}

impl ChatSession {
    /// Create a session.
    ///
    /// Returns the session and the channel on which freshly inserted
    /// messages (post-deduplication) are delivered to the caller.
    pub fn new(url: String) -> (Self, mpsc::UnboundedReceiver<MessagePayload>) {
        let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();
        (
            Self {
                url,
                log: Arc::new(Mutex::new(MessageLog::new())),
                incoming_tx,
                conn: None,
            },
            incoming_rx,
        )
    }

    /// Shared handle to the local message log.
    pub fn message_log(&self) -> Arc<Mutex<MessageLog>> {
        self.log.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the connection and announce presence with `joinChat`.
    ///
    /// No-op when already connected.
    pub async fn connect(&mut self, user_id: i64) -> Result<(), ClientError> {
        if self.conn.is_some() {
            tracing::warn!("Already connected; ignoring connect for user '{}'", user_id);
            return Ok(());
        }

        let (ws_stream, _response) = connect_async(&self.url)
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        let (mut writer, reader) = ws_stream.split();

        // Announce presence only after the connection is confirmed open
        let announce = ClientEvent::JoinChat(JoinChatPayload { user_id }).encode();
        writer
            .send(Message::Text(announce.into()))
            .await
            .map_err(|e| ClientError::Send(e.to_string()))?;

        let recv_task = spawn_receive_loop(reader, self.log.clone(), self.incoming_tx.clone());
        self.conn = Some(ActiveConnection { writer, recv_task });
        tracing::info!("Connected to {} as user '{}'", self.url, user_id);

        Ok(())
    }

    /// Serialize an event to the wire format and submit it.
    ///
    /// Transport failures are logged and returned; the session never
    /// retries automatically (the caller may retry at a higher level).
    pub async fn send(&mut self, event: ClientEvent) -> Result<(), ClientError> {
        let Some(conn) = self.conn.as_mut() else {
            return Err(ClientError::Send("not connected".to_string()));
        };

        let frame = event.encode();
        if let Err(e) = conn.writer.send(Message::Text(frame.into())).await {
            tracing::warn!("Failed to send event: {}", e);
            return Err(ClientError::Send(e.to_string()));
        }

        Ok(())
    }

    /// Convenience wrapper building a `sendMessage` event.
    ///
    /// `timestamp` is advisory; the server assigns the canonical one when
    /// the message is persisted.
    pub async fn send_chat(
        &mut self,
        chat_id: i64,
        sender: i64,
        content: String,
        timestamp: Option<String>,
    ) -> Result<(), ClientError> {
        self.send(ClientEvent::SendMessage(SendMessagePayload {
            user_id: sender,
            chat_id,
            sender,
            content,
            timestamp,
        }))
        .await
    }

    /// Close the connection and discard it.
    ///
    /// A later `connect` builds a fresh connection rather than reusing the
    /// closed one.
    pub async fn disconnect(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            let _ = conn.writer.send(Message::Close(None)).await;
            conn.recv_task.abort();
            tracing::info!("Disconnected from {}", self.url);
        }
    }
}

/// Single receive loop bound to the connection's lifetime.
///
/// Frames are processed strictly in arrival order; the loop exits (rather
/// than rescheduling itself) when the connection closes or errors.
/// `newMessage` frames are appended to the log, deduplicating by message
/// id; only freshly inserted messages are forwarded on `incoming_tx`.
fn spawn_receive_loop(
    mut reader: WsSource,
    log: Arc<Mutex<MessageLog>>,
    incoming_tx: mpsc::UnboundedSender<MessagePayload>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = reader.next().await {
            match message {
                Ok(Message::Text(text)) => match ServerEvent::decode(&text) {
                    Ok(ServerEvent::NewMessage(payload)) => {
                        let inserted = {
                            let mut log = log.lock().await;
                            log.push(payload.clone())
                        };
                        if inserted {
                            // Receiver may be gone when the UI shut down first
                            let _ = incoming_tx.send(payload);
                        } else {
                            tracing::debug!("Skipping duplicate message {}", payload.id);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring unrecognized frame: {}", e);
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
            }
        }
    })
}
