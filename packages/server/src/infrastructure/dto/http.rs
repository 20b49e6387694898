//! HTTP API のリクエスト/レスポンス DTO 定義
//!
//! REST のフィールド名は snake_case（モバイルクライアントの既存の
//! デコーダに合わせる）。時刻は営業時間が `HH:MM:SS`、瞬間が RFC 3339。

use serde::{Deserialize, Serialize};

use courtside_shared::protocol::MessagePayload;

/// GET /courts のレスポンス要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtDto {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub open_time: String,
    pub close_time: String,
}

/// GET /court/{id}/available-slots のレスポンス要素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotDto {
    pub id: u32,
    pub start_time: String,
    pub end_time: String,
}

/// GET /court/{id}/available-slots のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    /// 対象日（YYYY-MM-DD）
    pub date: String,
}

/// POST /book-slot のリクエストボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub court_id: i64,
    pub user_id: i64,
    /// 予約開始時刻（RFC 3339）
    pub start_time: String,
    /// 予約時間（分）
    pub duration: i64,
}

/// 作成済み予約のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: i64,
    pub court_id: i64,
    pub user_id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// GET /chats のレスポンス要素（最新メッセージを非正規化して含む）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummaryDto {
    pub id: i64,
    pub participants: Vec<i64>,
    pub last_message: Option<MessagePayload>,
}

/// エラーレスポンスボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
