//! Court-booking and chat server library.
//!
//! Layered implementation: `domain` holds the booking/chat model, the slot
//! arithmetic, and the abstractions the rest of the system depends on;
//! `usecase` orchestrates the operations; `infrastructure` provides the
//! in-memory repositories and the WebSocket presence registry; `ui` exposes
//! the HTTP and WebSocket surface.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
