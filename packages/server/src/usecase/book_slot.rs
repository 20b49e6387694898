//! UseCase: スロット予約
//!
//! 重複チェックと挿入は Repository 側で単一のアトミック操作として実行され、
//! 並行する予約試行が双方とも「重複なし」を観測することはない。
//!
//! 予約区間がコートの営業時間内に収まっているかどうかの検証は、現在の
//! 設計では呼び出し側の責務であり、ここでは行わない。

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    Booking, BookingRepository, CourtId, CourtRepository, Interval, RepositoryError, UserId,
};

use super::error::BookSlotError;

/// スロット予約のユースケース
pub struct BookSlotUseCase {
    /// Repository（データアクセス層の抽象化）
    court_repository: Arc<dyn CourtRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl BookSlotUseCase {
    /// 新しい BookSlotUseCase を作成
    pub fn new(
        court_repository: Arc<dyn CourtRepository>,
        booking_repository: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            court_repository,
            booking_repository,
        }
    }

    /// スロット予約を実行
    ///
    /// # Arguments
    ///
    /// * `court_id` - 対象コートの ID
    /// * `user_id` - 予約するユーザーの ID
    /// * `start` - 予約開始時刻
    /// * `duration_minutes` - 予約時間（分、正の値）
    ///
    /// # Returns
    ///
    /// * `Ok(Booking)` - 採番された ID と確定済み区間を持つ予約
    /// * `Err(BookSlotError)` - 検証エラー、コート不明、重複、ストレージ障害
    pub async fn execute(
        &self,
        court_id: CourtId,
        user_id: UserId,
        start: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Booking, BookSlotError> {
        if duration_minutes <= 0 {
            return Err(BookSlotError::InvalidDuration(duration_minutes));
        }

        // コートの存在確認
        self.court_repository
            .find(court_id)
            .await
            .map_err(|e| match e {
                RepositoryError::CourtNotFound(id) => BookSlotError::CourtNotFound(id),
                other => BookSlotError::Repository(other.to_string()),
            })?;

        let interval = Interval::new(start, start + Duration::minutes(duration_minutes));
        self.booking_repository
            .insert_if_free(court_id, user_id, interval)
            .await
            .map_err(|e| match e {
                RepositoryError::BookingConflict { court_id } => BookSlotError::Conflict(court_id),
                other => BookSlotError::Repository(other.to_string()),
            })
    }
}
