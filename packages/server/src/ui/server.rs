//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    BookSlotUseCase, DisconnectUseCase, GetAvailableSlotsUseCase, GetChatMessagesUseCase,
    JoinChatUseCase, ListChatsUseCase, ListCourtsUseCase, SendMessageUseCase,
};

use super::{
    handler::{
        book_slot, get_available_slots, get_chat_messages, health_check, list_chats, list_courts,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Court-booking and chat server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     list_courts_usecase,
///     get_available_slots_usecase,
///     book_slot_usecase,
///     join_chat_usecase,
///     send_message_usecase,
///     disconnect_usecase,
///     list_chats_usecase,
///     get_chat_messages_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// ListCourtsUseCase（コート一覧取得のユースケース）
    list_courts_usecase: Arc<ListCourtsUseCase>,
    /// GetAvailableSlotsUseCase（空きスロット取得のユースケース）
    get_available_slots_usecase: Arc<GetAvailableSlotsUseCase>,
    /// BookSlotUseCase（スロット予約のユースケース）
    book_slot_usecase: Arc<BookSlotUseCase>,
    /// JoinChatUseCase（チャット参加のユースケース）
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectUseCase（切断処理のユースケース）
    disconnect_usecase: Arc<DisconnectUseCase>,
    /// ListChatsUseCase（チャット一覧取得のユースケース）
    list_chats_usecase: Arc<ListChatsUseCase>,
    /// GetChatMessagesUseCase（チャット履歴取得のユースケース）
    get_chat_messages_usecase: Arc<GetChatMessagesUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        list_courts_usecase: Arc<ListCourtsUseCase>,
        get_available_slots_usecase: Arc<GetAvailableSlotsUseCase>,
        book_slot_usecase: Arc<BookSlotUseCase>,
        join_chat_usecase: Arc<JoinChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        list_chats_usecase: Arc<ListChatsUseCase>,
        get_chat_messages_usecase: Arc<GetChatMessagesUseCase>,
    ) -> Self {
        Self {
            list_courts_usecase,
            get_available_slots_usecase,
            book_slot_usecase,
            join_chat_usecase,
            send_message_usecase,
            disconnect_usecase,
            list_chats_usecase,
            get_chat_messages_usecase,
        }
    }

    /// Run the court-booking and chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            list_courts_usecase: self.list_courts_usecase,
            get_available_slots_usecase: self.get_available_slots_usecase,
            book_slot_usecase: self.book_slot_usecase,
            join_chat_usecase: self.join_chat_usecase,
            send_message_usecase: self.send_message_usecase,
            disconnect_usecase: self.disconnect_usecase,
            list_chats_usecase: self.list_chats_usecase,
            get_chat_messages_usecase: self.get_chat_messages_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/health", get(health_check))
            .route("/courts", get(list_courts))
            .route("/court/{court_id}/available-slots", get(get_available_slots))
            .route("/book-slot", post(book_slot))
            .route("/chats", get(list_chats))
            .route("/chats/{chat_id}/messages", get(get_chat_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Court-booking and chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
