//! Duel Tetris (workspace facade crate).
//!
//! Keeps a stable `duel_tetris::{core,input,term,types,versus}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use duel_tetris_core as core;
pub use duel_tetris_input as input;
pub use duel_tetris_term as term;
pub use duel_tetris_types as types;
pub use duel_tetris_versus as versus;
