//! Core engine - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the grid, the link graph between
//! blocks, mino generation and rotation, and the resolution cascade that runs
//! after each mino settles. It has **no dependencies** on terminal, input or
//! any other I/O, so the same seed always produces the same game.
//!
//! # Module Structure
//!
//! - [`block`]: block arena and the symmetric link graph
//! - [`shapes`]: the seven mino shapes and their unit tables
//! - [`mino`]: the falling piece
//! - [`board`]: grid storage, placement and queries
//! - [`cascade`]: break, summon traversal, gravity, erase, strata scroll
//! - [`config`]: engine configuration and validation
//! - [`rng`]: seedable random source
//! - [`snapshot`]: serializable views for presentation layers
//! - [`session`]: one running game driven by intents
//!
//! # Rules
//!
//! - **Links**: blocks of one mino stay linked after settling. Linked blocks
//!   hold each other up; a block with no links falls.
//! - **Strata**: permanent rows that never fall. When the strata surface sinks
//!   below a minimum height, the board scrolls up and new strata rows appear
//!   at the bottom.
//! - **Route / Summon**: a summon walks along route blocks (right, then left,
//!   then down), consuming the cells it leaves and breaking links around them.
//! - **Lines**: a full row breaks, then is erased and the rows above shift
//!   down by one.
//!
//! # Example
//!
//! ```
//! use digris_core::{EngineConfig, Session, StepOutcome};
//! use digris_types::Intent;
//!
//! let mut session = Session::new(EngineConfig::default()).unwrap();
//! assert!(session.start());
//!
//! session.apply(Intent::MoveRight);
//! session.apply(Intent::Rotate);
//! let outcome = session.apply(Intent::HardDrop);
//! assert!(matches!(outcome, StepOutcome::Settled(_) | StepOutcome::TopOut));
//!
//! // Events describe what changed, in order.
//! assert!(!session.take_events().is_empty());
//! ```

pub mod block;
pub mod board;
pub mod cascade;
pub mod config;
pub mod mino;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use digris_types as types;

// Re-export commonly used types for convenience
pub use block::{Block, BlockArena, BlockId};
pub use board::Board;
pub use cascade::CascadeReport;
pub use config::{ConfigError, EngineConfig, ScrollGate, ScrollRules};
pub use mino::Mino;
pub use rng::{Randomizer, SimpleRng};
pub use session::{Session, StepOutcome};
pub use shapes::{get_shape, shape_def, ShapeDef};
pub use snapshot::{BoardSnapshot, CellView, MinoSnapshot, SessionSnapshot};
