//! Presence Registry の抽象化
//!
//! ユーザー ID と接続中の WebSocket コネクションの対応を管理し、チャットの
//! ファンアウト先の解決に使われるインターフェース。プロセス内のインメモリ
//! 状態であり、再起動で完全にリセットされる（クライアントの再接続と
//! 再アナウンスで復元される）。
//!
//! ## 設計ノート
//!
//! - registry は生のマップを公開しない。lookup は `push_to` / `broadcast`
//!   の内部でのみ行われ、チャンネルのハンドルが外へ漏れることはない。
//! - エントリの削除はユーザー ID ではなくコネクションの同一性
//!   （[`ConnectionId`]）で行う。再接続によりエントリが既に置き換えられて
//!   いる場合、古い接続の切断が新しいエントリを消してしまわないため。

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::value_object::UserId;

/// クライアントへ送信するフレームのチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 1 本の WebSocket コネクションを同一性で識別する ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// フレーム送信のエラー
#[derive(Debug, Error, PartialEq)]
pub enum PushError {
    /// 対象ユーザーに live なコネクションが存在しない
    #[error("user {0} has no live connection")]
    NotConnected(UserId),

    /// コネクションは登録されているが、チャンネルが既に閉じている
    #[error("connection for user {0} is closed")]
    ConnectionClosed(UserId),
}

/// プロセス全体で共有される presence のインターフェース
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// ユーザーの接続を登録する
    ///
    /// 既存のエントリがある場合、新しい接続で置き換えられる。置き換えられた
    /// 古いコネクション自体はここでは閉じられない（クローズは接続
    /// ライフサイクルの所有者の責務。既知のギャップとしてログに残す）。
    async fn register(&self, user_id: UserId, connection_id: ConnectionId, sender: PusherChannel);

    /// 指定したコネクション ID を保持するエントリを削除する
    ///
    /// 該当するエントリが存在しない場合は何もしない。
    async fn unregister(&self, connection_id: &ConnectionId);

    /// ユーザーが接続中であればフレームを送信する。ブロックしない
    async fn push_to(&self, user_id: &UserId, frame: &str) -> Result<(), PushError>;

    /// 各宛先へフレームを送信し、実際に届いた件数を返す
    ///
    /// 一部の宛先への送信失敗は他の宛先への配送を妨げない。未接続の宛先は
    /// 黙ってスキップされる（オフラインキューイングはしない）。
    async fn broadcast(&self, targets: &[UserId], frame: &str) -> usize;
}
