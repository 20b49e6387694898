//! InMemory Chat Repository 実装
//!
//! チャットと参加者リストはアプリ側では作成されない（参加者は作成時に
//! 固定され、メンバー変更はスコープ外）。構築時に受け取ったチャット一覧を
//! 保持し、一覧表示用の最新メッセージだけを更新します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Chat, ChatId, ChatMessage, ChatRepository, RepositoryError, UserId};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    chats: Mutex<Vec<Chat>>,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    ///
    /// # 引数
    ///
    /// - `chats`: 保持するチャット一覧（挿入順が一覧の表示順になる）
    pub fn new(chats: Vec<Chat>) -> Self {
        Self {
            chats: Mutex::new(chats),
        }
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn list(&self) -> Result<Vec<Chat>, RepositoryError> {
        let chats = self.chats.lock().await;
        Ok(chats.clone())
    }

    async fn participants(&self, chat_id: ChatId) -> Result<Vec<UserId>, RepositoryError> {
        let chats = self.chats.lock().await;
        chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .map(|chat| chat.participants.clone())
            .ok_or(RepositoryError::ChatNotFound(chat_id))
    }

    async fn record_last_message(
        &self,
        chat_id: ChatId,
        message: ChatMessage,
    ) -> Result<(), RepositoryError> {
        let mut chats = self.chats.lock().await;
        let chat = chats
            .iter_mut()
            .find(|chat| chat.id == chat_id)
            .ok_or(RepositoryError::ChatNotFound(chat_id))?;
        chat.last_message = Some(message);
        Ok(())
    }
}
