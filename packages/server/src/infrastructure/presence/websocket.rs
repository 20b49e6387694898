//! WebSocket を使った PresenceRegistry 実装
//!
//! ## 責務
//!
//! - ユーザー ID と WebSocket の `UnboundedSender` の対応を管理
//! - チャットのファンアウト先へのフレーム送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、フレーム送信に
//! 使用します。マップはこの構造体の外には公開されず、全ての読み書きは
//! Mutex の中で行われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, PushError, PusherChannel, UserId};

/// presence エントリ（1 ユーザーにつき最大 1 件）
struct PresenceEntry {
    connection_id: ConnectionId,
    sender: PusherChannel,
}

/// WebSocket を使った PresenceRegistry 実装
pub struct WebSocketPresenceRegistry {
    /// 接続中ユーザーの presence マップ
    ///
    /// Key: [`UserId`]
    /// Value: [`PresenceEntry`]
    entries: Mutex<HashMap<UserId, PresenceEntry>>,
}

impl WebSocketPresenceRegistry {
    /// 新しい WebSocketPresenceRegistry を作成
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 接続中のユーザー数を取得
    pub async fn connected_count(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }
}

impl Default for WebSocketPresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceRegistry for WebSocketPresenceRegistry {
    async fn register(&self, user_id: UserId, connection_id: ConnectionId, sender: PusherChannel) {
        let mut entries = self.entries.lock().await;
        let entry = PresenceEntry {
            connection_id,
            sender,
        };
        if let Some(previous) = entries.insert(user_id, entry) {
            // 置き換えられた古いコネクションはここでは閉じない。
            // クローズは接続ライフサイクルの所有者の責務（既知のギャップ）。
            tracing::warn!(
                "User '{}' re-announced presence; connection {} replaced by {}",
                user_id,
                previous.connection_id,
                connection_id
            );
        } else {
            tracing::debug!(
                "User '{}' registered to presence registry via connection {}",
                user_id,
                connection_id
            );
        }
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.connection_id != *connection_id);
        if entries.len() < before {
            tracing::debug!(
                "Connection {} unregistered from presence registry",
                connection_id
            );
        }
    }

    async fn push_to(&self, user_id: &UserId, frame: &str) -> Result<(), PushError> {
        let entries = self.entries.lock().await;

        match entries.get(user_id) {
            Some(entry) => {
                entry
                    .sender
                    .send(frame.to_string())
                    .map_err(|_| PushError::ConnectionClosed(*user_id))?;
                tracing::debug!("Pushed frame to user '{}'", user_id);
                Ok(())
            }
            None => Err(PushError::NotConnected(*user_id)),
        }
    }

    async fn broadcast(&self, targets: &[UserId], frame: &str) -> usize {
        let entries = self.entries.lock().await;

        let mut delivered = 0;
        for target in targets {
            match entries.get(target) {
                Some(entry) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = entry.sender.send(frame.to_string()) {
                        tracing::warn!("Failed to push frame to user '{}': {}", target, e);
                    } else {
                        delivered += 1;
                        tracing::debug!("Broadcasted frame to user '{}'", target);
                    }
                }
                None => {
                    tracing::debug!("User '{}' not connected, skipping fan-out", target);
                }
            }
        }

        delivered
    }
}
