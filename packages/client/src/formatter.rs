//! Message formatting utilities for client display.

use courtside_shared::protocol::MessagePayload;
use courtside_shared::time::{epoch_seconds_to_millis, timestamp_to_rfc3339};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message received from the server
    ///
    /// # Arguments
    ///
    /// * `message` - The persisted message as delivered in a `newMessage`
    ///   frame or a history response
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(message: &MessagePayload) -> String {
        let timestamp_str = timestamp_to_rfc3339(epoch_seconds_to_millis(message.timestamp));
        format!(
            "\n\n------------------------------------------------------------\n\
             @user {}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            message.sender, message.content, timestamp_str
        )
    }

    /// Format the chat history header shown before seeded messages
    pub fn format_history_header(chat_id: i64, count: usize) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str(&format!("Chat {} history:\n", chat_id));
        if count == 0 {
            output.push_str("(No messages yet)\n");
        }
        output
    }

    /// Format one line of seeded history
    pub fn format_history_entry(message: &MessagePayload) -> String {
        let timestamp_str = timestamp_to_rfc3339(epoch_seconds_to_millis(message.timestamp));
        format!(
            "[{}] user {}: {}\n",
            timestamp_str, message.sender, message.content
        )
    }

    /// Format the history footer
    pub fn format_history_footer() -> String {
        "============================================================\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: i64, content: &str, timestamp: f64) -> MessagePayload {
        MessagePayload {
            id: 1,
            chat_id: 1,
            sender,
            content: content.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_format_chat_message_contains_sender_and_content() {
        // テスト項目: 整形結果に送信者・本文・送信時刻が含まれる
        // given (前提条件):
        let msg = message(2, "Game at 6?", 1672531200.123);

        // when (操作):
        let formatted = MessageFormatter::format_chat_message(&msg);

        // then (期待する結果):
        assert!(formatted.contains("@user 2"));
        assert!(formatted.contains("Game at 6?"));
        assert!(formatted.contains("2023-01-01T00:00:00.123Z"));
    }

    #[test]
    fn test_format_history_header_for_empty_chat() {
        // テスト項目: 履歴ゼロ件のヘッダに (No messages yet) が含まれる
        // given (前提条件):

        // when (操作):
        let formatted = MessageFormatter::format_history_header(1, 0);

        // then (期待する結果):
        assert!(formatted.contains("Chat 1 history:"));
        assert!(formatted.contains("(No messages yet)"));
    }
}
