//! UseCase: 空きスロット取得
//!
//! コートの営業時間と既存予約から空き区間を計算し、固定長の予約単位に
//! 分割して返す。計算は `domain::slot` の純粋関数に委譲し、このユースケースは
//! データの取得と組み立てだけを行う。

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::domain::{
    AvailableSlot, Booking, BookingRepository, CourtId, CourtRepository, Interval,
    RepositoryError, slot,
};

use super::error::GetAvailableSlotsError;

/// 空きスロット取得のユースケース
pub struct GetAvailableSlotsUseCase {
    /// Repository（データアクセス層の抽象化）
    court_repository: Arc<dyn CourtRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    /// 分割単位（デフォルト 60 分）
    slot_unit: Duration,
}

impl GetAvailableSlotsUseCase {
    /// 新しい GetAvailableSlotsUseCase を作成
    pub fn new(
        court_repository: Arc<dyn CourtRepository>,
        booking_repository: Arc<dyn BookingRepository>,
        slot_unit: Duration,
    ) -> Self {
        Self {
            court_repository,
            booking_repository,
            slot_unit,
        }
    }

    /// 空きスロット取得を実行
    ///
    /// # Arguments
    ///
    /// * `court_id` - 対象コートの ID
    /// * `date` - 対象日
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<AvailableSlot>)` - 固定長に分割済みの空きスロット
    ///   （ID は 1 始まりの連番で、このレスポンス内でのみ有効）
    /// * `Err(GetAvailableSlotsError)` - コート不明またはストレージ障害
    pub async fn execute(
        &self,
        court_id: CourtId,
        date: NaiveDate,
    ) -> Result<Vec<AvailableSlot>, GetAvailableSlotsError> {
        let court = self.court_repository.find(court_id).await.map_err(|e| match e {
            RepositoryError::CourtNotFound(id) => GetAvailableSlotsError::CourtNotFound(id),
            other => GetAvailableSlotsError::Repository(other.to_string()),
        })?;

        let window = slot::operating_window(date, court.open_time, court.close_time);
        let bookings = self
            .booking_repository
            .bookings_overlapping(court_id, window)
            .await
            .map_err(|e| GetAvailableSlotsError::Repository(e.to_string()))?;

        let booked: Vec<Interval> = bookings.iter().map(Booking::interval).collect();
        let free = slot::free_intervals(window, &booked);
        Ok(slot::split_into_slots(&free, self.slot_unit))
    }
}
