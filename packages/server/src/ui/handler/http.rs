//! HTTP API endpoint handlers.
//!
//! Endpoints convert usecase errors to the nearest HTTP status: validation
//! failures and booking conflicts map to 400 with an `{error}` body, unknown
//! courts/chats to 404, storage failures to 500.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};

use courtside_shared::protocol::MessagePayload;

use crate::{
    domain::{ChatId, CourtId, UserId},
    infrastructure::dto::http::{
        AvailableSlotDto, AvailableSlotsQuery, BookSlotRequest, BookingDto, ChatSummaryDto,
        CourtDto, ErrorBody,
    },
    ui::state::AppState,
    usecase::{BookSlotError, GetAvailableSlotsError, GetChatMessagesError},
};

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody::new(message)))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of courts
pub async fn list_courts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CourtDto>>, ApiError> {
    let courts = state.list_courts_usecase.execute().await.map_err(|e| {
        tracing::error!("Failed to list courts: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    Ok(Json(courts.into_iter().map(CourtDto::from).collect()))
}

/// Get available slots for a court on a given date, already split into
/// fixed-size bookable units
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Path(court_id): Path<i64>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Vec<AvailableSlotDto>>, ApiError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", query.date),
        )
    })?;

    let slots = state
        .get_available_slots_usecase
        .execute(CourtId::new(court_id), date)
        .await
        .map_err(|e| match e {
            GetAvailableSlotsError::CourtNotFound(id) => {
                api_error(StatusCode::NOT_FOUND, format!("Court {} not found", id))
            }
            GetAvailableSlotsError::Repository(reason) => {
                tracing::error!("Failed to compute available slots: {}", reason);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        })?;

    Ok(Json(slots.into_iter().map(AvailableSlotDto::from).collect()))
}

/// Book a slot. Returns 201 with the created booking, or 400 with an error
/// body when the interval conflicts with an existing booking.
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<BookingDto>), ApiError> {
    let start: DateTime<Utc> = DateTime::parse_from_rfc3339(&request.start_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid start_time '{}', expected RFC 3339", request.start_time),
            )
        })?;

    let booking = state
        .book_slot_usecase
        .execute(
            CourtId::new(request.court_id),
            UserId::new(request.user_id),
            start,
            request.duration,
        )
        .await
        .map_err(|e| match e {
            BookSlotError::InvalidDuration(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
            BookSlotError::CourtNotFound(id) => {
                api_error(StatusCode::NOT_FOUND, format!("Court {} not found", id))
            }
            BookSlotError::Conflict(_) => api_error(
                StatusCode::BAD_REQUEST,
                "Requested slot conflicts with an existing booking",
            ),
            BookSlotError::Repository(reason) => {
                tracing::error!("Failed to book slot: {}", reason);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        })?;

    Ok((StatusCode::CREATED, Json(BookingDto::from(booking))))
}

/// Get list of chats with the denormalized last message
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatSummaryDto>>, ApiError> {
    let chats = state.list_chats_usecase.execute().await.map_err(|e| {
        tracing::error!("Failed to list chats: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })?;

    Ok(Json(chats.into_iter().map(ChatSummaryDto::from).collect()))
}

/// Get the messages of a chat, ascending by timestamp
pub async fn get_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<i64>,
) -> Result<Json<Vec<MessagePayload>>, ApiError> {
    let messages = state
        .get_chat_messages_usecase
        .execute(ChatId::new(chat_id))
        .await
        .map_err(|e| match e {
            GetChatMessagesError::ChatNotFound(id) => {
                api_error(StatusCode::NOT_FOUND, format!("Chat {} not found", id))
            }
            GetChatMessagesError::Repository(reason) => {
                tracing::error!("Failed to fetch chat messages: {}", reason);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        })?;

    Ok(Json(
        messages.into_iter().map(MessagePayload::from).collect(),
    ))
}
