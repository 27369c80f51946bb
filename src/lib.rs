//! Digris (workspace facade crate).
//!
//! Re-exports the workspace crates as `digris::{core,input,term,types}` so the
//! binary, integration tests and benches share one import path.

pub use digris_core as core;
pub use digris_input as input;
pub use digris_term as term;
pub use digris_types as types;
