//! UseCase: チャット参加（presence 登録）

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry, PusherChannel, UserId};

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    /// PresenceRegistry（presence 管理の抽象化）
    presence: Arc<dyn PresenceRegistry>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    /// チャット参加を実行
    ///
    /// 同一ユーザーの既存エントリは新しい接続で置き換えられる。
    /// クライアントへの ACK は返さない（fire-and-forget）。
    pub async fn execute(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        self.presence.register(user_id, connection_id, sender).await;
        tracing::info!(
            "User '{}' announced presence on connection {}",
            user_id,
            connection_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::presence::WebSocketPresenceRegistry;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_join_registers_presence() {
        // テスト項目: joinChat でユーザーの presence が登録される
        // given (前提条件):
        let registry = Arc::new(WebSocketPresenceRegistry::new());
        let usecase = JoinChatUseCase::new(registry.clone());
        let alice = UserId::new(1);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(alice, ConnectionId::generate(), tx).await;

        // then (期待する結果): 登録後はフレームが届く
        registry.push_to(&alice, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_rejoin_keeps_single_entry() {
        // テスト項目: 再アナウンスしても presence エントリは 1 件のまま
        // given (前提条件):
        let registry = Arc::new(WebSocketPresenceRegistry::new());
        let usecase = JoinChatUseCase::new(registry.clone());
        let alice = UserId::new(1);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(alice, ConnectionId::generate(), tx1).await;
        usecase.execute(alice, ConnectionId::generate(), tx2).await;

        // then (期待する結果):
        assert_eq!(registry.connected_count().await, 1);
    }
}
