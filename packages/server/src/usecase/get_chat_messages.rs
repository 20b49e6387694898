//! UseCase: チャット履歴取得
//!
//! ファンアウトを受け取れなかった（未接続だった）参加者がメッセージを
//! 取得する唯一の経路。タイムスタンプ昇順で返す。

use std::sync::Arc;

use crate::domain::{ChatId, ChatMessage, ChatRepository, MessageRepository, RepositoryError};

use super::error::GetChatMessagesError;

/// チャット履歴取得のユースケース
pub struct GetChatMessagesUseCase {
    /// Repository（データアクセス層の抽象化）
    chat_repository: Arc<dyn ChatRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl GetChatMessagesUseCase {
    /// 新しい GetChatMessagesUseCase を作成
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            chat_repository,
            message_repository,
        }
    }

    /// チャット履歴取得を実行
    pub async fn execute(&self, chat_id: ChatId) -> Result<Vec<ChatMessage>, GetChatMessagesError> {
        // チャットの存在確認
        self.chat_repository
            .participants(chat_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ChatNotFound(id) => GetChatMessagesError::ChatNotFound(id),
                other => GetChatMessagesError::Repository(other.to_string()),
            })?;

        self.message_repository
            .messages_for(chat_id)
            .await
            .map_err(|e| GetChatMessagesError::Repository(e.to_string()))
    }
}
