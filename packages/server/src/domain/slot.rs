//! Slot arithmetic for court availability.
//!
//! Pure functions that convert a court's operating window and its existing
//! bookings into maximal free intervals, then split those intervals into
//! fixed-size bookable units. No side effects beyond logging skipped
//! records, making the sweep easy to test.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::entity::AvailableSlot;

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `true` when the interval has positive length.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Overlap predicate for half-open intervals: `a1 < b2 && b1 < a2`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Build the operating window of a court on the given date.
///
/// A closing time-of-day numerically earlier than the opening time-of-day is
/// interpreted as occurring on the next calendar day (overnight courts).
/// Equal opening and closing times yield an empty window.
pub fn operating_window(date: NaiveDate, open: NaiveTime, close: NaiveTime) -> Interval {
    let start = date.and_time(open).and_utc();
    let end = if close < open {
        (date + Duration::days(1)).and_time(close).and_utc()
    } else {
        date.and_time(close).and_utc()
    };
    Interval::new(start, end)
}

/// Compute the maximal free intervals within `window` given the booked
/// intervals on the same court.
///
/// Booked intervals are sorted ascending by start before the sweep; the sort
/// is stable, so intervals with equal starts keep their insertion order. A
/// stored interval whose end does not follow its start is skipped with a
/// warning rather than aborting the whole computation.
pub fn free_intervals(window: Interval, booked: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = booked
        .iter()
        .filter(|interval| {
            if interval.is_well_formed() {
                true
            } else {
                tracing::warn!(
                    "Skipping malformed booked interval [{}, {})",
                    interval.start,
                    interval.end
                );
                false
            }
        })
        .copied()
        .collect();
    sorted.sort_by_key(|interval| interval.start);

    let mut free = Vec::new();
    let mut cursor = window.start;
    for booking in &sorted {
        if cursor < booking.start {
            let gap_end = booking.start.min(window.end);
            if cursor < gap_end {
                free.push(Interval::new(cursor, gap_end));
            }
        }
        if booking.end > cursor {
            cursor = booking.end;
        }
    }
    if cursor < window.end {
        free.push(Interval::new(cursor, window.end));
    }

    free
}

/// Split free intervals into fixed-size bookable units.
///
/// Units are carved from the start of each interval; a remainder shorter
/// than `unit` is discarded rather than emitted as a short slot. Slot ids
/// are assigned sequentially starting at 1 and are only meaningful within
/// one response.
pub fn split_into_slots(free: &[Interval], unit: Duration) -> Vec<AvailableSlot> {
    let mut slots = Vec::new();
    if unit <= Duration::zero() {
        return slots;
    }

    let mut id = 1u32;
    for interval in free {
        let mut cursor = interval.start;
        while cursor + unit <= interval.end {
            slots.push(AvailableSlot {
                id,
                start: cursor,
                end: cursor + unit,
            });
            id += 1;
            cursor += unit;
        }
    }

    slots
}
