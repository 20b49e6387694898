//! InMemory Message Repository 実装
//!
//! メッセージ ID は単調増加で採番され、タイムスタンプは永続化の瞬間に
//! Clock から確定します。クロックが巻き戻った場合でも、チャット内の
//! タイムスタンプが減少しないよう直前のメッセージの値に切り上げます。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use courtside_shared::time::Clock;

use crate::domain::{
    ChatId, ChatMessage, MessageContent, MessageId, MessageRepository, RepositoryError, Timestamp,
    UserId,
};

struct Inner {
    next_id: i64,
    by_chat: HashMap<ChatId, Vec<ChatMessage>>,
}

/// インメモリ Message Repository 実装
pub struct InMemoryMessageRepository {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    ///
    /// # 引数
    ///
    /// - `clock`: タイムスタンプの確定に使う Clock（テストでは FixedClock）
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Mutex::new(Inner {
                next_id: 1,
                by_chat: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(
        &self,
        chat_id: ChatId,
        sender: UserId,
        content: MessageContent,
    ) -> Result<ChatMessage, RepositoryError> {
        let now = self.clock.now_utc_millis();
        let mut inner = self.inner.lock().await;

        // チャット内のタイムスタンプを非減少に保つ
        let last_timestamp = inner
            .by_chat
            .get(&chat_id)
            .and_then(|messages| messages.last())
            .map(|message| message.timestamp.value());
        let timestamp = Timestamp::new(last_timestamp.map_or(now, |last| last.max(now)));

        let id = MessageId::new(inner.next_id);
        inner.next_id += 1;

        let message = ChatMessage {
            id,
            chat_id,
            sender,
            content,
            timestamp,
        };
        inner
            .by_chat
            .entry(chat_id)
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    async fn messages_for(&self, chat_id: ChatId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let inner = self.inner.lock().await;
        // 挿入順 == タイムスタンプ昇順
        Ok(inner.by_chat.get(&chat_id).cloned().unwrap_or_default())
    }
}
