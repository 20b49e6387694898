//! Conversion logic between DTOs and domain entities.

use chrono::SecondsFormat;

use courtside_shared::protocol::MessagePayload;

use crate::domain::{AvailableSlot, Booking, Chat, ChatMessage, Court};
use crate::infrastructure::dto::http::{AvailableSlotDto, BookingDto, ChatSummaryDto, CourtDto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Court> for CourtDto {
    fn from(model: Court) -> Self {
        Self {
            id: model.id.value(),
            name: model.name,
            location: model.location,
            latitude: model.latitude,
            longitude: model.longitude,
            open_time: model.open_time.format("%H:%M:%S").to_string(),
            close_time: model.close_time.format("%H:%M:%S").to_string(),
        }
    }
}

impl From<AvailableSlot> for AvailableSlotDto {
    fn from(model: AvailableSlot) -> Self {
        Self {
            id: model.id,
            start_time: model.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_time: model.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<Booking> for BookingDto {
    fn from(model: Booking) -> Self {
        Self {
            id: model.id.value(),
            court_id: model.court_id.value(),
            user_id: model.user_id.value(),
            start_time: model.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_time: model.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<ChatMessage> for MessagePayload {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            chat_id: model.chat_id.value(),
            sender: model.sender.value(),
            content: model.content.into_string(),
            timestamp: model.timestamp.as_epoch_seconds(),
        }
    }
}

impl From<Chat> for ChatSummaryDto {
    fn from(model: Chat) -> Self {
        Self {
            id: model.id.value(),
            participants: model
                .participants
                .iter()
                .map(|participant| participant.value())
                .collect(),
            last_message: model.last_message.map(MessagePayload::from),
        }
    }
}
