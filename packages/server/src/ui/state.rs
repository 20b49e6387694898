//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    BookSlotUseCase, DisconnectUseCase, GetAvailableSlotsUseCase, GetChatMessagesUseCase,
    JoinChatUseCase, ListChatsUseCase, ListCourtsUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ListCourtsUseCase（コート一覧取得のユースケース）
    pub list_courts_usecase: Arc<ListCourtsUseCase>,
    /// GetAvailableSlotsUseCase（空きスロット取得のユースケース）
    pub get_available_slots_usecase: Arc<GetAvailableSlotsUseCase>,
    /// BookSlotUseCase（スロット予約のユースケース）
    pub book_slot_usecase: Arc<BookSlotUseCase>,
    /// JoinChatUseCase（チャット参加のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectUseCase（切断処理のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// ListChatsUseCase（チャット一覧取得のユースケース）
    pub list_chats_usecase: Arc<ListChatsUseCase>,
    /// GetChatMessagesUseCase（チャット履歴取得のユースケース）
    pub get_chat_messages_usecase: Arc<GetChatMessagesUseCase>,
}
