//! UseCase: チャット一覧取得

use std::sync::Arc;

use crate::domain::{Chat, ChatRepository};

use super::error::ListChatsError;

/// チャット一覧取得のユースケース
pub struct ListChatsUseCase {
    /// Repository（データアクセス層の抽象化）
    chat_repository: Arc<dyn ChatRepository>,
}

impl ListChatsUseCase {
    /// 新しい ListChatsUseCase を作成
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }

    /// チャット一覧取得を実行（非正規化された最新メッセージ込み）
    pub async fn execute(&self) -> Result<Vec<Chat>, ListChatsError> {
        self.chat_repository
            .list()
            .await
            .map_err(|e| ListChatsError::Repository(e.to_string()))
    }
}
