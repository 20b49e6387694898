//! ドメインエンティティ定義

use chrono::{DateTime, NaiveTime, Utc};

use super::slot::Interval;
use super::value_object::{BookingId, ChatId, CourtId, MessageContent, MessageId, Timestamp, UserId};

/// コート
///
/// 参照データ。作成・編集は外部の管理ツールでのみ行われ、このサービスは
/// 読み取りしかしない。
#[derive(Debug, Clone, PartialEq)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// 営業開始時刻（日付を持たない時刻）
    pub open_time: NaiveTime,
    /// 営業終了時刻。開始時刻より前の値は翌日扱い（深夜営業コート）
    pub close_time: NaiveTime,
}

/// 予約
///
/// 区間は半開区間 `[start, end)`。同一コート上の予約区間は互いに
/// 重ならない（Booking Conflict Guard が保証する不変条件）。
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub court_id: CourtId,
    pub user_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Booking {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// 空き時間スロット
///
/// 派生データであり永続化されない。`id` は 1 始まりの連番で、
/// 1 レスポンスの中でのみ意味を持つ。
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableSlot {
    pub id: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// チャット
///
/// 参加者リストは作成時に固定される（メンバー変更はスコープ外）。
/// `last_message` は一覧表示用に非正規化された最新メッセージ。
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: ChatId,
    pub participants: Vec<UserId>,
    pub last_message: Option<ChatMessage>,
}

/// チャットメッセージ
///
/// `id` と `timestamp` は永続化層が確定した正準の値。チャット内の
/// タイムスタンプは非減少に保たれる。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender: UserId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}
