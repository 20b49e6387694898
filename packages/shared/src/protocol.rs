//! WebSocket wire protocol shared between the server and the client.
//!
//! Every frame is a JSON envelope `{"event": "<name>", "data": {...}}` with
//! camelCase payload keys. Client → server events are `joinChat` and
//! `sendMessage`; the server pushes `newMessage`. The envelope is decoded
//! exactly once at the connection boundary into the closed [`ClientEvent`]
//! enum; event kinds outside the known set become
//! [`ClientEvent::Unrecognized`] instead of falling through ad hoc string
//! comparisons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload of the `joinChat` announce event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChatPayload {
    pub user_id: i64,
}

/// Payload of the `sendMessage` event.
///
/// `timestamp` is advisory only. The canonical timestamp is assigned by the
/// server when the message is persisted, so a value altered in transit never
/// reaches other participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub user_id: i64,
    pub chat_id: i64,
    pub sender: i64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A persisted message as delivered in `newMessage` frames and by the
/// chat-history API. `timestamp` is seconds since the Unix epoch with
/// fractional precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: i64,
    pub chat_id: i64,
    pub sender: i64,
    pub content: String,
    pub timestamp: f64,
}

/// Client → server events, decoded once at the connection boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    JoinChat(JoinChatPayload),
    SendMessage(SendMessagePayload),
    /// Well-formed envelope carrying an event kind this peer does not handle.
    Unrecognized { event: String },
}

/// Server → client events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    NewMessage(MessagePayload),
}

/// Decoding failures for inbound frames.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed event envelope: {0}")]
    MalformedEnvelope(String),
    #[error("invalid payload for event '{event}': {reason}")]
    InvalidPayload { event: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Decode an inbound frame into a [`ClientEvent`].
///
/// A frame that is not a `{event, data}` envelope at all is a
/// [`DecodeError::MalformedEnvelope`]; a known event with a payload that does
/// not match its schema is a [`DecodeError::InvalidPayload`]; an unknown
/// event kind decodes successfully as [`ClientEvent::Unrecognized`].
pub fn decode_client_event(text: &str) -> Result<ClientEvent, DecodeError> {
    let envelope: RawEnvelope =
        serde_json::from_str(text).map_err(|e| DecodeError::MalformedEnvelope(e.to_string()))?;

    match envelope.event.as_str() {
        "joinChat" => serde_json::from_value(envelope.data)
            .map(ClientEvent::JoinChat)
            .map_err(|e| DecodeError::InvalidPayload {
                event: envelope.event,
                reason: e.to_string(),
            }),
        "sendMessage" => serde_json::from_value(envelope.data)
            .map(ClientEvent::SendMessage)
            .map_err(|e| DecodeError::InvalidPayload {
                event: envelope.event,
                reason: e.to_string(),
            }),
        _ => Ok(ClientEvent::Unrecognized {
            event: envelope.event,
        }),
    }
}

impl ClientEvent {
    /// Serialize to the `{event, data}` wire envelope.
    pub fn encode(&self) -> String {
        let envelope = match self {
            ClientEvent::JoinChat(payload) => {
                serde_json::json!({"event": "joinChat", "data": payload})
            }
            ClientEvent::SendMessage(payload) => {
                serde_json::json!({"event": "sendMessage", "data": payload})
            }
            ClientEvent::Unrecognized { event } => {
                serde_json::json!({"event": event, "data": serde_json::Value::Null})
            }
        };
        envelope.to_string()
    }
}

impl ServerEvent {
    /// Serialize to the `{event, data}` wire envelope.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("server event serializes to JSON")
    }

    /// Decode a server frame; frames that are not a known server event fail.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(|e| DecodeError::MalformedEnvelope(e.to_string()))
    }
}
