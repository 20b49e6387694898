//! Integration tests for the chat relay: presence registration, message
//! fan-out, and the history read path, wired the way the server binary does.

use std::sync::Arc;

use tokio::sync::mpsc;

use courtside_server::domain::{Chat, ChatId, ConnectionId, MessageContent, UserId};
use courtside_server::infrastructure::presence::WebSocketPresenceRegistry;
use courtside_server::infrastructure::repository::{
    InMemoryChatRepository, InMemoryMessageRepository,
};
use courtside_server::usecase::{
    DisconnectUseCase, GetChatMessagesUseCase, JoinChatUseCase, SendMessageUseCase,
};
use courtside_shared::protocol::ServerEvent;
use courtside_shared::time::SystemClock;

struct ChatFixture {
    presence: Arc<WebSocketPresenceRegistry>,
    join: JoinChatUseCase,
    send: Arc<SendMessageUseCase>,
    disconnect: DisconnectUseCase,
    history: GetChatMessagesUseCase,
}

fn create_fixture(chats: Vec<Chat>) -> ChatFixture {
    let chat_repository = Arc::new(InMemoryChatRepository::new(chats));
    let message_repository = Arc::new(InMemoryMessageRepository::new(Arc::new(SystemClock)));
    let presence = Arc::new(WebSocketPresenceRegistry::new());
    ChatFixture {
        presence: presence.clone(),
        join: JoinChatUseCase::new(presence.clone()),
        send: Arc::new(SendMessageUseCase::new(
            chat_repository.clone(),
            message_repository.clone(),
            presence.clone(),
        )),
        disconnect: DisconnectUseCase::new(presence),
        history: GetChatMessagesUseCase::new(chat_repository, message_repository),
    }
}

fn chat(id: i64, participants: Vec<i64>) -> Chat {
    Chat {
        id: ChatId::new(id),
        participants: participants.into_iter().map(UserId::new).collect(),
        last_message: None,
    }
}

fn content(text: &str) -> MessageContent {
    MessageContent::new(text.to_string()).unwrap()
}

#[tokio::test]
async fn test_offline_participant_catches_up_via_history() {
    // テスト項目: A が送信し、B は接続中・C は未接続の場合、B には
    //             newMessage が届き、C は後から履歴で受け取れる
    // given (前提条件): chat 1 の参加者は A(1), B(2), C(3)。B のみ接続
    let fixture = create_fixture(vec![chat(1, vec![1, 2, 3])]);
    let (b_tx, mut b_rx) = mpsc::unbounded_channel();
    fixture
        .join
        .execute(UserId::new(2), ConnectionId::generate(), b_tx)
        .await;

    // when (操作): A がメッセージを送信
    let message = fixture
        .send
        .execute(ChatId::new(1), UserId::new(1), content("Game at 6?"))
        .await
        .unwrap();

    // then (期待する結果): B のチャンネルに届く
    let frame = b_rx.recv().await.unwrap();
    let ServerEvent::NewMessage(payload) = ServerEvent::decode(&frame).unwrap();
    assert_eq!(payload.id, message.id.value());
    assert_eq!(payload.content, "Game at 6?");

    // C は履歴の読み取り経路で同じメッセージを取得できる
    let history = fixture.history.execute(ChatId::new(1)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, message.id);
}

#[tokio::test]
async fn test_fan_out_is_scoped_to_chat_participants() {
    // テスト項目: ファンアウトは宛先チャットの参加者に限定される
    // given (前提条件): chat 1 = {1,2}, chat 2 = {3}。全員接続
    let fixture = create_fixture(vec![chat(1, vec![1, 2]), chat(2, vec![3])]);
    let (a_tx, mut a_rx) = mpsc::unbounded_channel();
    let (b_tx, mut b_rx) = mpsc::unbounded_channel();
    let (c_tx, mut c_rx) = mpsc::unbounded_channel();
    for (user, tx) in [(1, a_tx), (2, b_tx), (3, c_tx)] {
        fixture
            .join
            .execute(UserId::new(user), ConnectionId::generate(), tx)
            .await;
    }

    // when (操作): A が chat 1 に送信
    fixture
        .send
        .execute(ChatId::new(1), UserId::new(1), content("Hello chat 1"))
        .await
        .unwrap();

    // then (期待する結果): A と B には届き、C には届かない
    assert!(a_rx.recv().await.is_some());
    assert!(b_rx.recv().await.is_some());
    assert!(c_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_reconnect_then_old_connection_close_keeps_presence() {
    // テスト項目: 再接続後に古いコネクションが閉じても presence が残り、
    //             メッセージは新しい接続に届く
    // given (前提条件): B が接続 → 再接続（古い接続はまだ開いたまま）
    let fixture = create_fixture(vec![chat(1, vec![1, 2])]);
    let old_connection = ConnectionId::generate();
    let (old_tx, _old_rx) = mpsc::unbounded_channel();
    fixture
        .join
        .execute(UserId::new(2), old_connection, old_tx)
        .await;
    let (new_tx, mut new_rx) = mpsc::unbounded_channel();
    fixture
        .join
        .execute(UserId::new(2), ConnectionId::generate(), new_tx)
        .await;

    // when (操作): 古いコネクションのクローズで切断処理が走り、その後 A が送信
    fixture.disconnect.execute(old_connection).await;
    fixture
        .send
        .execute(ChatId::new(1), UserId::new(1), content("still there?"))
        .await
        .unwrap();

    // then (期待する結果): 新しい接続に届く
    let frame = new_rx.recv().await.unwrap();
    let ServerEvent::NewMessage(payload) = ServerEvent::decode(&frame).unwrap();
    assert_eq!(payload.content, "still there?");
    assert_eq!(fixture.presence.connected_count().await, 1);
}

#[tokio::test]
async fn test_history_is_ordered_across_multiple_senders() {
    // テスト項目: 複数送信者のメッセージが履歴でタイムスタンプ昇順になる
    // given (前提条件):
    let fixture = create_fixture(vec![chat(1, vec![1, 2])]);

    // when (操作): A と B が交互に送信
    for (user, text) in [(1, "one"), (2, "two"), (1, "three"), (2, "four")] {
        fixture
            .send
            .execute(ChatId::new(1), UserId::new(user), content(text))
            .await
            .unwrap();
    }

    // then (期待する結果):
    let history = fixture.history.execute(ChatId::new(1)).await.unwrap();
    assert_eq!(history.len(), 4);
    assert!(
        history
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
    assert!(history.windows(2).all(|pair| pair[0].id < pair[1].id));
}
