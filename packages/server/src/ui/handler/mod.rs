//! Request handlers.

mod http;
mod websocket;

pub use http::{
    book_slot, get_available_slots, get_chat_messages, health_check, list_chats, list_courts,
};
pub use websocket::websocket_handler;
