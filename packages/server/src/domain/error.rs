//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{ChatId, CourtId};

/// Repository 操作のエラー
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("court {0} not found")]
    CourtNotFound(CourtId),

    #[error("chat {0} not found")]
    ChatNotFound(ChatId),

    /// 既存予約と重複しているため挿入を拒否した。何も書き込まれない
    #[error("booking overlaps an existing booking on court {court_id}")]
    BookingConflict { court_id: CourtId },

    /// 一時的なストレージ障害。自動リトライはしない
    #[error("storage failure: {0}")]
    Storage(String),
}
