//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(user_id: i64) {
    print!("user {}> ", user_id);
    std::io::stdout().flush().ok();
}
