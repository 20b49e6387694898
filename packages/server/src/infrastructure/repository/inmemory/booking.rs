//! InMemory Booking Repository 実装
//!
//! 予約の重複チェックと挿入は単一の Mutex 取得の中で実行されます。これは
//! コート ID をキーにした advisory lock に相当する単一ライターの境界であり、
//! 同一コートへの並行した予約試行が双方とも「重複なし」を観測することは
//! ありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Booking, BookingId, BookingRepository, CourtId, Interval, RepositoryError, UserId,
};

struct Inner {
    next_id: i64,
    by_court: HashMap<CourtId, Vec<Booking>>,
}

/// インメモリ Booking Repository 実装
pub struct InMemoryBookingRepository {
    inner: Mutex<Inner>,
}

impl InMemoryBookingRepository {
    /// 新しい InMemoryBookingRepository を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                by_court: HashMap::new(),
            }),
        }
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn bookings_overlapping(
        &self,
        court_id: CourtId,
        window: Interval,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .by_court
            .get(&court_id)
            .map(|bookings| {
                bookings
                    .iter()
                    .filter(|booking| booking.interval().overlaps(&window))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_if_free(
        &self,
        court_id: CourtId,
        user_id: UserId,
        interval: Interval,
    ) -> Result<Booking, RepositoryError> {
        let mut inner = self.inner.lock().await;

        // 重複チェックと挿入を同じロックの中で行う
        let conflict = inner
            .by_court
            .get(&court_id)
            .is_some_and(|bookings| {
                bookings
                    .iter()
                    .any(|booking| booking.interval().overlaps(&interval))
            });
        if conflict {
            return Err(RepositoryError::BookingConflict { court_id });
        }

        let id = BookingId::new(inner.next_id);
        inner.next_id += 1;
        let booking = Booking {
            id,
            court_id,
            user_id,
            start: interval.start,
            end: interval.end,
        };
        inner
            .by_court
            .entry(court_id)
            .or_default()
            .push(booking.clone());

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};
    use std::sync::Arc;

    fn instant(hour: u32, min: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 2, 8)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
            .and_utc()
    }

    #[tokio::test]
    async fn test_insert_if_free_success() {
        // テスト項目: 重複のない予約が挿入され、ID が採番される
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();

        // when (操作):
        let booking = repo
            .insert_if_free(
                CourtId::new(1),
                UserId::new(1),
                Interval::new(instant(10, 0), instant(11, 0)),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(booking.id, BookingId::new(1));
        assert_eq!(booking.start, instant(10, 0));
        assert_eq!(booking.end, instant(11, 0));
    }

    #[tokio::test]
    async fn test_insert_if_free_rejects_overlap() {
        // テスト項目: [14:30,15:30) が予約済みのコートへの [14:00,15:00) は
        //             重複として拒否され、何も書き込まれない
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();
        let court = CourtId::new(1);
        repo.insert_if_free(
            court,
            UserId::new(1),
            Interval::new(instant(14, 30), instant(15, 30)),
        )
        .await
        .unwrap();

        // when (操作):
        let result = repo
            .insert_if_free(
                court,
                UserId::new(2),
                Interval::new(instant(14, 0), instant(15, 0)),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::BookingConflict { court_id: court })
        );
        let stored = repo
            .bookings_overlapping(court, Interval::new(instant(0, 0), instant(23, 59)))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_if_free_allows_touching_intervals() {
        // テスト項目: 端点が接するだけの区間は重複にならない
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();
        let court = CourtId::new(1);
        repo.insert_if_free(
            court,
            UserId::new(1),
            Interval::new(instant(10, 0), instant(11, 0)),
        )
        .await
        .unwrap();

        // when (操作):
        let result = repo
            .insert_if_free(
                court,
                UserId::new(2),
                Interval::new(instant(11, 0), instant(12, 0)),
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_if_free_is_scoped_per_court() {
        // テスト項目: 別コートの同時刻予約は重複にならない
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();
        repo.insert_if_free(
            CourtId::new(1),
            UserId::new(1),
            Interval::new(instant(10, 0), instant(11, 0)),
        )
        .await
        .unwrap();

        // when (操作):
        let result = repo
            .insert_if_free(
                CourtId::new(2),
                UserId::new(2),
                Interval::new(instant(10, 0), instant(11, 0)),
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_booking_ids_are_monotonic() {
        // テスト項目: 予約 ID が単調増加で採番される
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();

        // when (操作):
        let first = repo
            .insert_if_free(
                CourtId::new(1),
                UserId::new(1),
                Interval::new(instant(8, 0), instant(9, 0)),
            )
            .await
            .unwrap();
        let second = repo
            .insert_if_free(
                CourtId::new(2),
                UserId::new(1),
                Interval::new(instant(8, 0), instant(9, 0)),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_inserts_admit_exactly_one() {
        // テスト項目: 同一コートへ重複区間の予約を並行に投げても、
        //             受理されるのは 1 件だけ
        // given (前提条件):
        let repo = Arc::new(InMemoryBookingRepository::new());
        let court = CourtId::new(1);
        let interval = Interval::new(instant(14, 0), instant(15, 0));

        // when (操作): 10 本のタスクが同じ区間を同時に予約しようとする
        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert_if_free(court, UserId::new(i), interval).await
            }));
        }
        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(accepted, 1);
        let stored = repo
            .bookings_overlapping(court, Interval::new(instant(0, 0), instant(23, 59)))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_bookings_overlapping_filters_by_window() {
        // テスト項目: 指定区間と重なる予約だけが返される
        // given (前提条件):
        let repo = InMemoryBookingRepository::new();
        let court = CourtId::new(1);
        repo.insert_if_free(
            court,
            UserId::new(1),
            Interval::new(instant(9, 0), instant(10, 0)),
        )
        .await
        .unwrap();
        repo.insert_if_free(
            court,
            UserId::new(1),
            Interval::new(instant(20, 0), instant(21, 0)),
        )
        .await
        .unwrap();

        // when (操作):
        let morning = repo
            .bookings_overlapping(court, Interval::new(instant(8, 0), instant(12, 0)))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(morning.len(), 1);
        assert_eq!(morning[0].start, instant(9, 0));
    }
}
