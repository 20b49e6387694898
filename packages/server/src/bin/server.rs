//! Court-booking and chat server.
//!
//! Serves the REST booking API (courts, available slots, reservations, chat
//! listings) and the WebSocket chat relay with presence-based fan-out.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin courtside-server
//! cargo run --bin courtside-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin courtside-server -- --slot-minutes 30
//! ```

use std::sync::Arc;

use chrono::{Duration, NaiveTime};
use clap::Parser;

use courtside_server::{
    domain::{Chat, ChatId, Court, CourtId, UserId},
    infrastructure::{
        presence::WebSocketPresenceRegistry,
        repository::{
            InMemoryBookingRepository, InMemoryChatRepository, InMemoryCourtRepository,
            InMemoryMessageRepository,
        },
    },
    ui::Server,
    usecase::{
        BookSlotUseCase, DisconnectUseCase, GetAvailableSlotsUseCase, GetChatMessagesUseCase,
        JoinChatUseCase, ListChatsUseCase, ListCourtsUseCase, SendMessageUseCase,
    },
};
use courtside_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Court-booking and chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Bookable slot unit in minutes
    #[arg(long, default_value = "60")]
    slot_minutes: i64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. PresenceRegistry
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory database)
    let court_repository = Arc::new(InMemoryCourtRepository::new(seed_courts()));
    let booking_repository = Arc::new(InMemoryBookingRepository::new());
    let chat_repository = Arc::new(InMemoryChatRepository::new(seed_chats()));
    let message_repository = Arc::new(InMemoryMessageRepository::new(Arc::new(SystemClock)));

    // 2. Create PresenceRegistry (WebSocket implementation)
    let presence = Arc::new(WebSocketPresenceRegistry::new());

    // 3. Create UseCases
    let list_courts_usecase = Arc::new(ListCourtsUseCase::new(court_repository.clone()));
    let get_available_slots_usecase = Arc::new(GetAvailableSlotsUseCase::new(
        court_repository.clone(),
        booking_repository.clone(),
        Duration::minutes(args.slot_minutes),
    ));
    let book_slot_usecase = Arc::new(BookSlotUseCase::new(
        court_repository.clone(),
        booking_repository.clone(),
    ));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(presence.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        chat_repository.clone(),
        message_repository.clone(),
        presence.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(presence.clone()));
    let list_chats_usecase = Arc::new(ListChatsUseCase::new(chat_repository.clone()));
    let get_chat_messages_usecase = Arc::new(GetChatMessagesUseCase::new(
        chat_repository.clone(),
        message_repository.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        list_courts_usecase,
        get_available_slots_usecase,
        book_slot_usecase,
        join_chat_usecase,
        send_message_usecase,
        disconnect_usecase,
        list_chats_usecase,
        get_chat_messages_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Court reference data, normally maintained by external administration
/// tooling.
fn seed_courts() -> Vec<Court> {
    let time = |hour, min| NaiveTime::from_hms_opt(hour, min, 0).expect("valid time-of-day");
    vec![
        Court {
            id: CourtId::new(1),
            name: "Downtown Padel Court".to_string(),
            location: "Amman, Abdali".to_string(),
            latitude: 31.9539,
            longitude: 35.9106,
            open_time: time(8, 0),
            close_time: time(22, 0),
        },
        Court {
            id: CourtId::new(2),
            name: "Sports City Court".to_string(),
            location: "Amman, Shmeisani".to_string(),
            latitude: 31.9784,
            longitude: 35.8957,
            open_time: time(9, 0),
            close_time: time(23, 0),
        },
        Court {
            id: CourtId::new(3),
            name: "Night Owl Arena".to_string(),
            location: "Amman, Sweifieh".to_string(),
            latitude: 31.9312,
            longitude: 35.8744,
            // Overnight court: closes at 02:00 the next day
            open_time: time(18, 0),
            close_time: time(2, 0),
        },
    ]
}

/// Chats with fixed participant lists, normally created by external tooling
/// (membership changes are out of scope).
fn seed_chats() -> Vec<Chat> {
    vec![
        Chat {
            id: ChatId::new(1),
            participants: vec![UserId::new(1), UserId::new(2)],
            last_message: None,
        },
        Chat {
            id: ChatId::new(2),
            participants: vec![UserId::new(1), UserId::new(2), UserId::new(3)],
            last_message: None,
        },
    ]
}
