//! UseCase: メッセージ送信処理
//!
//! 受信イベントの永続化、参加者解決、presence 経由のファンアウトまでを
//! 一続きで実行する。永続化に失敗した場合は何もブロードキャストしない。
//!
//! チャットごとに persist → broadcast を直列化し、接続中の受信者への
//! 配送順序が永続化順序と一致するようにする。異なるチャット間に順序の
//! 保証はない。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use courtside_shared::protocol::{MessagePayload, ServerEvent};

use crate::domain::{
    ChatId, ChatMessage, ChatRepository, MessageContent, MessageRepository, PresenceRegistry,
    RepositoryError, UserId,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    chat_repository: Arc<dyn ChatRepository>,
    message_repository: Arc<dyn MessageRepository>,
    /// PresenceRegistry（presence 管理の抽象化）
    presence: Arc<dyn PresenceRegistry>,
    /// チャット単位の直列化ロック
    chat_locks: Mutex<HashMap<ChatId, Arc<Mutex<()>>>>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        message_repository: Arc<dyn MessageRepository>,
        presence: Arc<dyn PresenceRegistry>,
    ) -> Self {
        Self {
            chat_repository,
            message_repository,
            presence,
            chat_locks: Mutex::new(HashMap::new()),
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `chat_id` - 宛先チャットの ID
    /// * `sender` - 送信者のユーザー ID
    /// * `content` - 検証済みのメッセージ本文（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 採番された ID と確定タイムスタンプを持つ
    ///   永続化済みメッセージ
    /// * `Err(SendMessageError)` - チャット不明または永続化失敗
    pub async fn execute(
        &self,
        chat_id: ChatId,
        sender: UserId,
        content: MessageContent,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 参加者解決（未知のチャットはここで弾く）
        let participants = self
            .chat_repository
            .participants(chat_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ChatNotFound(id) => SendMessageError::ChatNotFound(id),
                other => SendMessageError::Repository(other.to_string()),
            })?;

        // 2. チャット単位の直列化ロックを取得
        let chat_lock = {
            let mut locks = self.chat_locks.lock().await;
            locks
                .entry(chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = chat_lock.lock().await;

        // 3. 永続化。採番された ID と確定タイムスタンプが以後の正となる
        //    （送信者申告のタイムスタンプは使わない）
        let message = self
            .message_repository
            .append(chat_id, sender, content)
            .await
            .map_err(|e| SendMessageError::Repository(e.to_string()))?;

        // 4. 一覧表示用の最新メッセージを更新
        if let Err(e) = self
            .chat_repository
            .record_last_message(chat_id, message.clone())
            .await
        {
            tracing::warn!("Failed to record last message for chat '{}': {}", chat_id, e);
        }

        // 5. 接続中の参加者へファンアウト。未接続の参加者はスキップされ、
        //    メッセージは履歴の読み取り経路でのみ取得可能になる
        let frame = ServerEvent::NewMessage(MessagePayload::from(message.clone())).encode();
        let delivered = self.presence.broadcast(&participants, &frame).await;
        if delivered == 0 {
            tracing::info!(
                "No connected participants for chat '{}'; message {} reachable via history only",
                chat_id,
                message.id
            );
        } else {
            tracing::debug!(
                "Delivered message {} to {}/{} participants of chat '{}'",
                message.id,
                delivered,
                participants.len(),
                chat_id
            );
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockMessageRepository;
    use crate::domain::{Chat, ConnectionId};
    use crate::infrastructure::presence::WebSocketPresenceRegistry;
    use crate::infrastructure::repository::{InMemoryChatRepository, InMemoryMessageRepository};
    use courtside_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn create_test_chat(id: i64, participants: Vec<i64>) -> Chat {
        Chat {
            id: ChatId::new(id),
            participants: participants.into_iter().map(UserId::new).collect(),
            last_message: None,
        }
    }

    fn content(text: &str) -> MessageContent {
        MessageContent::new(text.to_string()).unwrap()
    }

    fn create_test_usecase(
        chats: Vec<Chat>,
    ) -> (
        SendMessageUseCase,
        Arc<InMemoryChatRepository>,
        Arc<InMemoryMessageRepository>,
        Arc<WebSocketPresenceRegistry>,
    ) {
        let chat_repository = Arc::new(InMemoryChatRepository::new(chats));
        let message_repository = Arc::new(InMemoryMessageRepository::new(Arc::new(
            FixedClock::new(1672531200123),
        )));
        let presence = Arc::new(WebSocketPresenceRegistry::new());
        let usecase = SendMessageUseCase::new(
            chat_repository.clone(),
            message_repository.clone(),
            presence.clone(),
        );
        (usecase, chat_repository, message_repository, presence)
    }

    #[tokio::test]
    async fn test_send_message_fans_out_to_connected_participants_only() {
        // テスト項目: 接続中の参加者にだけ newMessage が届き、未接続の
        //             参加者はスキップされる
        // given (前提条件): alice(1) と bob(2) が接続、charlie(3) は未接続
        let (usecase, _, _, presence) =
            create_test_usecase(vec![create_test_chat(7, vec![1, 2, 3])]);
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        presence
            .register(UserId::new(1), ConnectionId::generate(), alice_tx)
            .await;
        presence
            .register(UserId::new(2), ConnectionId::generate(), bob_tx)
            .await;

        // when (操作): alice がメッセージを送信
        let message = usecase
            .execute(ChatId::new(7), UserId::new(1), content("Hello!"))
            .await
            .unwrap();

        // then (期待する結果): alice と bob のチャンネルに同じフレームが届く
        let alice_frame = alice_rx.recv().await.unwrap();
        let bob_frame = bob_rx.recv().await.unwrap();
        assert_eq!(alice_frame, bob_frame);
        let ServerEvent::NewMessage(payload) = ServerEvent::decode(&alice_frame).unwrap();
        assert_eq!(payload.id, message.id.value());
        assert_eq!(payload.chat_id, 7);
        assert_eq!(payload.content, "Hello!");
    }

    #[tokio::test]
    async fn test_broadcast_uses_persisted_timestamp() {
        // テスト項目: ブロードキャストされるタイムスタンプは永続化層が
        //             確定した値であり、送信者申告の値ではない
        // given (前提条件):
        let (usecase, _, _, presence) = create_test_usecase(vec![create_test_chat(7, vec![1, 2])]);
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        presence
            .register(UserId::new(2), ConnectionId::generate(), bob_tx)
            .await;

        // when (操作):
        usecase
            .execute(ChatId::new(7), UserId::new(1), content("Hello!"))
            .await
            .unwrap();

        // then (期待する結果): FixedClock の値がワイヤー表現（秒）で現れる
        let frame = bob_rx.recv().await.unwrap();
        let ServerEvent::NewMessage(payload) = ServerEvent::decode(&frame).unwrap();
        assert!((payload.timestamp - 1672531200.123).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_send_message_updates_last_message() {
        // テスト項目: 送信後、チャット一覧の最新メッセージが更新される
        // given (前提条件):
        let (usecase, chat_repository, _, _) =
            create_test_usecase(vec![create_test_chat(7, vec![1, 2])]);

        // when (操作):
        let message = usecase
            .execute(ChatId::new(7), UserId::new(1), content("Hello!"))
            .await
            .unwrap();

        // then (期待する結果):
        let chats = chat_repository.list().await.unwrap();
        assert_eq!(chats[0].last_message.as_ref(), Some(&message));
    }

    #[tokio::test]
    async fn test_send_message_unknown_chat_fails() {
        // テスト項目: 未知のチャット宛のメッセージは ChatNotFound になり、
        //             何も永続化されない
        // given (前提条件):
        let (usecase, _, message_repository, _) = create_test_usecase(vec![]);

        // when (操作):
        let result = usecase
            .execute(ChatId::new(9), UserId::new(1), content("Hello!"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::ChatNotFound(ChatId::new(9))));
        let messages = message_repository
            .messages_for(ChatId::new(9))
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_aborts_broadcast() {
        // テスト項目: 永続化に失敗した場合、何もブロードキャストされない
        // given (前提条件):
        let chat_repository = Arc::new(InMemoryChatRepository::new(vec![create_test_chat(
            7,
            vec![1, 2],
        )]));
        let mut message_repository = MockMessageRepository::new();
        message_repository
            .expect_append()
            .returning(|_, _, _| Err(RepositoryError::Storage("disk full".to_string())));
        let presence = Arc::new(WebSocketPresenceRegistry::new());
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        presence
            .register(UserId::new(2), ConnectionId::generate(), bob_tx)
            .await;
        let usecase = SendMessageUseCase::new(
            chat_repository,
            Arc::new(message_repository),
            presence.clone(),
        );

        // when (操作):
        let result = usecase
            .execute(ChatId::new(7), UserId::new(1), content("Hello!"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendMessageError::Repository(_))));
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_zero_delivery_is_not_an_error() {
        // テスト項目: 全参加者が未接続でも送信はエラーにならず、
        //             メッセージは履歴から取得できる
        // given (前提条件): 誰も接続していない
        let (usecase, _, message_repository, _) =
            create_test_usecase(vec![create_test_chat(7, vec![1, 2, 3])]);

        // when (操作):
        let result = usecase
            .execute(ChatId::new(7), UserId::new(1), content("Anyone here?"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let history = message_repository
            .messages_for(ChatId::new(7))
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_messages_are_delivered_in_persist_order() {
        // テスト項目: 同一チャットのメッセージが永続化順で配送される
        // given (前提条件): bob が接続
        let (usecase, _, _, presence) = create_test_usecase(vec![create_test_chat(7, vec![1, 2])]);
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        presence
            .register(UserId::new(2), ConnectionId::generate(), bob_tx)
            .await;
        let usecase = Arc::new(usecase);

        // when (操作): 複数タスクから並行に送信する
        let mut handles = Vec::new();
        for i in 0..10 {
            let usecase = usecase.clone();
            handles.push(tokio::spawn(async move {
                usecase
                    .execute(
                        ChatId::new(7),
                        UserId::new(1),
                        content(&format!("message {}", i)),
                    )
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果): bob の受信順の ID が単調増加
        let mut received_ids = Vec::new();
        while let Ok(frame) = bob_rx.try_recv() {
            let ServerEvent::NewMessage(payload) = ServerEvent::decode(&frame).unwrap();
            received_ids.push(payload.id);
        }
        assert_eq!(received_ids.len(), 10);
        assert!(received_ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
