//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. Every key press
//! is one intent; there is no auto-repeat handling here, the session is purely
//! turn-based.

pub mod map;

pub use digris_types as types;

pub use map::{handle_key_event, should_quit};
