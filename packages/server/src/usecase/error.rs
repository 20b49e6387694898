//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ChatId, CourtId};

/// コート一覧取得のエラー
#[derive(Debug, Error, PartialEq)]
pub enum ListCourtsError {
    #[error("storage failure: {0}")]
    Repository(String),
}

/// 空きスロット取得のエラー
#[derive(Debug, Error, PartialEq)]
pub enum GetAvailableSlotsError {
    #[error("court {0} not found")]
    CourtNotFound(CourtId),

    #[error("storage failure: {0}")]
    Repository(String),
}

/// スロット予約のエラー
#[derive(Debug, Error, PartialEq)]
pub enum BookSlotError {
    /// 予約時間は正の分数でなければならない
    #[error("duration must be positive, got {0}")]
    InvalidDuration(i64),

    #[error("court {0} not found")]
    CourtNotFound(CourtId),

    /// 要求区間が既存予約と重複している。何も書き込まれない
    #[error("requested interval overlaps an existing booking on court {0}")]
    Conflict(CourtId),

    #[error("storage failure: {0}")]
    Repository(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq)]
pub enum SendMessageError {
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),

    /// 永続化に失敗した。ブロードキャストは行われない
    #[error("storage failure: {0}")]
    Repository(String),
}

/// チャット一覧取得のエラー
#[derive(Debug, Error, PartialEq)]
pub enum ListChatsError {
    #[error("storage failure: {0}")]
    Repository(String),
}

/// チャット履歴取得のエラー
#[derive(Debug, Error, PartialEq)]
pub enum GetChatMessagesError {
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),

    #[error("storage failure: {0}")]
    Repository(String),
}
