//! CLI booking/chat client for Courtside.
//!
//! Fetches the chat history over REST, connects to the chat relay over a
//! single WebSocket connection, announces presence, and sends stdin lines
//! as chat messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin courtside-client -- --user-id 1 --chat-id 1
//! cargo run --bin courtside-client -- -u 2 -c 1 --ws-url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use courtside_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Court-booking and chat client", long_about = None)]
struct Args {
    /// Authenticated user id announced to the chat relay
    #[arg(short = 'u', long)]
    user_id: i64,

    /// Chat to join and send messages to
    #[arg(short = 'c', long)]
    chat_id: i64,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
    ws_url: String,

    /// REST API base URL
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    api_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) =
        courtside_client::run_client(args.ws_url, args.api_url, args.user_id, args.chat_id).await
    {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
