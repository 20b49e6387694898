//! REST API client for the booking/chat endpoints.

use reqwest::StatusCode;

use courtside_server::infrastructure::dto::http::{
    AvailableSlotDto, BookSlotRequest, BookingDto, ChatSummaryDto, CourtDto, ErrorBody,
};
use courtside_shared::protocol::MessagePayload;

use crate::error::ClientError;

/// HTTP client for the Courtside REST surface.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new ApiClient
    ///
    /// # Arguments
    ///
    /// * `base_url` - Server base URL, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// GET /courts
    pub async fn fetch_courts(&self) -> Result<Vec<CourtDto>, ClientError> {
        let url = format!("{}/courts", self.base_url);
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// GET /court/{id}/available-slots?date=YYYY-MM-DD
    pub async fn fetch_available_slots(
        &self,
        court_id: i64,
        date: &str,
    ) -> Result<Vec<AvailableSlotDto>, ClientError> {
        let url = format!("{}/court/{}/available-slots", self.base_url, court_id);
        Ok(self
            .http
            .get(&url)
            .query(&[("date", date)])
            .send()
            .await?
            .json()
            .await?)
    }

    /// POST /book-slot
    ///
    /// A 400 response carries the server's error body (e.g. a slot
    /// conflict); the caller may retry with a different slot.
    pub async fn book_slot(&self, request: &BookSlotRequest) -> Result<BookingDto, ClientError> {
        let url = format!("{}/book-slot", self.base_url);
        let response = self.http.post(&url).json(request).send().await?;

        if response.status() == StatusCode::CREATED {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or_else(|_| ErrorBody {
                error: format!("unexpected status {}", status),
            });
            Err(ClientError::Api(body.error))
        }
    }

    /// GET /chats
    pub async fn fetch_chats(&self) -> Result<Vec<ChatSummaryDto>, ClientError> {
        let url = format!("{}/chats", self.base_url);
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// GET /chats/{id}/messages, ascending by timestamp
    pub async fn fetch_messages(&self, chat_id: i64) -> Result<Vec<MessagePayload>, ClientError> {
        let url = format!("{}/chats/{}/messages", self.base_url, chat_id);
        Ok(self.http.get(&url).send().await?.json().await?)
    }
}
