//! Keyboard mapping for two players on one keyboard.
//!
//! Player one plays on WASD (Q/W rotate, space drops), player two on the
//! arrow keys (M rotates left, N drops). The map is pure: it turns a
//! crossterm key event into an [`InputEvent`] and leaves all game-state
//! decisions to the match.

pub mod map;

pub use duel_tetris_types as types;

pub use map::{map_key, InputEvent};
