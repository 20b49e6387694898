//! Ordered, deduplicating local message log.
//!
//! The same message can reach the client twice: once via the optimistic
//! local echo and once via the server broadcast, or once in a REST history
//! response and again as a live frame after connecting. The log keeps
//! messages in append order and drops anything whose id was already seen.

use std::collections::HashSet;

use courtside_shared::protocol::MessagePayload;

/// Local ordered message log, deduplicated by message id.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<MessagePayload>,
    seen_ids: HashSet<i64>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unless its id is already present.
    ///
    /// Returns `true` when the message was inserted.
    pub fn push(&mut self, message: MessagePayload) -> bool {
        if !self.seen_ids.insert(message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Seed the log from a history response (already ascending by
    /// timestamp). Returns the number of messages actually inserted.
    pub fn extend_from_history(&mut self, history: Vec<MessagePayload>) -> usize {
        history
            .into_iter()
            .filter(|message| self.push(message.clone()))
            .count()
    }

    pub fn messages(&self) -> &[MessagePayload] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, content: &str, timestamp: f64) -> MessagePayload {
        MessagePayload {
            id,
            chat_id: 1,
            sender: 1,
            content: content.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_push_deduplicates_by_id() {
        // テスト項目: 同じ ID のメッセージは 2 回挿入されない
        // given (前提条件):
        let mut log = MessageLog::new();

        // when (操作): 同じメッセージがエコーとブロードキャストで 2 回届く
        let first = log.push(message(10, "Hello", 1.0));
        let second = log.push(message(10, "Hello", 1.0));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_push_preserves_arrival_order() {
        // テスト項目: メッセージが到着順で保持される
        // given (前提条件):
        let mut log = MessageLog::new();

        // when (操作):
        log.push(message(1, "one", 1.0));
        log.push(message(2, "two", 2.0));
        log.push(message(3, "three", 3.0));

        // then (期待する結果):
        let contents: Vec<&str> = log
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_history_and_live_frames_overlap_without_duplicates() {
        // テスト項目: REST 履歴とライブフレームが重複しても二重挿入されない
        // given (前提条件): 履歴に 1, 2 が入っている
        let mut log = MessageLog::new();
        let seeded =
            log.extend_from_history(vec![message(1, "one", 1.0), message(2, "two", 2.0)]);
        assert_eq!(seeded, 2);

        // when (操作): 接続直後に 2 が再送され、続けて 3 が届く
        let duplicate = log.push(message(2, "two", 2.0));
        let fresh = log.push(message(3, "three", 3.0));

        // then (期待する結果):
        assert!(!duplicate);
        assert!(fresh);
        assert_eq!(log.len(), 3);
    }
}
