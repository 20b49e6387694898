//! Shared library for the Courtside court-booking and chat application.
//!
//! Holds the pieces used by both the server and the client: the WebSocket
//! wire protocol, time utilities, and logging setup.

pub mod logger;
pub mod protocol;
pub mod time;
