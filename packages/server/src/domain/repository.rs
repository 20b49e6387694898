//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 依存性の逆転（DIP）
//!
//! - ドメイン層が必要とするインターフェースをドメイン層自身が定義
//! - Infrastructure 層がドメイン層のインターフェースに依存
//! - ドメイン層は Infrastructure 層に依存しない

use async_trait::async_trait;

use super::entity::{Booking, Chat, ChatMessage, Court};
use super::error::RepositoryError;
use super::slot::Interval;
use super::value_object::{ChatId, CourtId, MessageContent, UserId};

/// Court Repository trait
///
/// コートは外部の管理ツールでのみ作成・編集される参照データであり、
/// このインターフェースは読み取り操作のみを提供する。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourtRepository: Send + Sync {
    /// 全てのコートを取得
    async fn list(&self) -> Result<Vec<Court>, RepositoryError>;

    /// コートを ID で取得
    async fn find(&self, court_id: CourtId) -> Result<Court, RepositoryError>;
}

/// Booking Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 指定区間と重なる予約を取得
    async fn bookings_overlapping(
        &self,
        court_id: CourtId,
        window: Interval,
    ) -> Result<Vec<Booking>, RepositoryError>;

    /// 同一コート上の既存予約と重ならない場合に限り予約を挿入
    ///
    /// 重複チェックと挿入は単一のアトミックな操作として実行される。同一
    /// コートへの並行した予約試行が互いの read-check-insert の途中状態を
    /// 観測することはない（コート ID をキーにした advisory lock に相当する
    /// 単一ライターの境界）。重複時は [`RepositoryError::BookingConflict`]
    /// を返し、何も書き込まない。
    async fn insert_if_free(
        &self,
        court_id: CourtId,
        user_id: UserId,
        interval: Interval,
    ) -> Result<Booking, RepositoryError>;
}

/// Chat Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 全てのチャットを取得（一覧表示用の最新メッセージを含む）
    async fn list(&self) -> Result<Vec<Chat>, RepositoryError>;

    /// チャットの参加者リストを取得
    async fn participants(&self, chat_id: ChatId) -> Result<Vec<UserId>, RepositoryError>;

    /// 一覧表示用に非正規化された最新メッセージを更新
    async fn record_last_message(
        &self,
        chat_id: ChatId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError>;
}

/// Message Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを永続化し、採番された ID と確定タイムスタンプを返す
    ///
    /// 返される ID は一意かつ単調増加。タイムスタンプは永続化時に確定し、
    /// 以後この値がブロードキャストと履歴の正となる。
    async fn append(
        &self,
        chat_id: ChatId,
        sender: UserId,
        content: MessageContent,
    ) -> Result<ChatMessage, RepositoryError>;

    /// チャットのメッセージをタイムスタンプ昇順で取得
    async fn messages_for(&self, chat_id: ChatId) -> Result<Vec<ChatMessage>, RepositoryError>;
}
