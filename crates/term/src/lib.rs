//! Terminal presentation for Digris.
//!
//! Renders session snapshots into a simple framebuffer (two columns per board
//! cell) and flushes it to the terminal with crossterm. Nothing here feeds
//! back into the engine.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use digris_core as core;
pub use digris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
