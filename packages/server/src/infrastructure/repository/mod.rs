//! Repository 実装

pub mod inmemory;

pub use inmemory::{
    InMemoryBookingRepository, InMemoryChatRepository, InMemoryCourtRepository,
    InMemoryMessageRepository,
};
