//! UseCase 層
//!
//! 1 操作 = 1 ユースケース。各ユースケースは Repository / PresenceRegistry の
//! trait（`Arc<dyn ...>`）にのみ依存し、Infrastructure 層の具体的な実装には
//! 依存しない。

mod book_slot;
mod disconnect;
mod error;
mod get_available_slots;
mod get_chat_messages;
mod join_chat;
mod list_chats;
mod list_courts;
mod send_message;

pub use book_slot::BookSlotUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{
    BookSlotError, GetAvailableSlotsError, GetChatMessagesError, ListChatsError, ListCourtsError,
    SendMessageError,
};
pub use get_available_slots::GetAvailableSlotsUseCase;
pub use get_chat_messages::GetChatMessagesUseCase;
pub use join_chat::JoinChatUseCase;
pub use list_chats::ListChatsUseCase;
pub use list_courts::ListCourtsUseCase;
pub use send_message::SendMessageUseCase;
