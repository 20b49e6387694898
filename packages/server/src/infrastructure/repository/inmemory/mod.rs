//! InMemory Repository 実装
//!
//! ドメイン層が定義する Repository trait の具体的な実装。`HashMap` を
//! インメモリ DB として使用します。リレーショナル DB を実装する際は
//! ここに同じ trait を満たす別実装を追加します。

mod booking;
mod chat;
mod court;
mod message;

pub use booking::InMemoryBookingRepository;
pub use chat::InMemoryChatRepository;
pub use court::InMemoryCourtRepository;
pub use message::InMemoryMessageRepository;
