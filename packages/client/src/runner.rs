//! Client execution logic.
//!
//! Seeds the local message log from the REST history endpoint, connects the
//! WebSocket session, then runs a rustyline input loop whose lines are sent
//! as `sendMessage` events. Incoming messages are printed by a separate
//! task fed from the session's notification channel.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use courtside_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};

use crate::api::ApiClient;
use crate::formatter::MessageFormatter;
use crate::session::ChatSession;
use crate::ui::redisplay_prompt;

/// Run the booking/chat client session
///
/// # Arguments
///
/// * `ws_url` - WebSocket URL of the chat relay (e.g. `ws://127.0.0.1:3000/ws`)
/// * `api_url` - Base URL of the REST API (e.g. `http://127.0.0.1:3000`)
/// * `user_id` - The authenticated user's id
/// * `chat_id` - The chat to join and send messages to
pub async fn run_client(
    ws_url: String,
    api_url: String,
    user_id: i64,
    chat_id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    // Fetch chat history first so the local log starts from the read path
    let api = ApiClient::new(api_url);
    let history = match api.fetch_messages(chat_id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!("Failed to fetch history for chat {}: {}", chat_id, e);
            Vec::new()
        }
    };

    let (mut session, mut incoming) = ChatSession::new(ws_url);

    // Seed the log and show the history
    {
        let log = session.message_log();
        let mut log = log.lock().await;
        print!("{}", MessageFormatter::format_history_header(chat_id, history.len()));
        for message in &history {
            print!("{}", MessageFormatter::format_history_entry(message));
        }
        print!("{}", MessageFormatter::format_history_footer());
        log.extend_from_history(history);
    }

    session.connect(user_id).await?;
    println!(
        "\nYou are user '{}' in chat '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        user_id, chat_id
    );

    // Spawn a task printing incoming messages
    let print_task = tokio::spawn(async move {
        while let Some(message) = incoming.recv().await {
            print!("{}", MessageFormatter::format_chat_message(&message));
            redisplay_prompt(user_id);
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("user {}> ", user_id);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Forward stdin lines as sendMessage events
    while let Some(line) = input_rx.recv().await {
        let timestamp = Some(timestamp_to_rfc3339(get_utc_timestamp()));
        if let Err(e) = session.send_chat(chat_id, user_id, line, timestamp).await {
            tracing::warn!("Failed to send message: {}", e);
            break;
        }
    }

    session.disconnect().await;
    print_task.abort();

    Ok(())
}
