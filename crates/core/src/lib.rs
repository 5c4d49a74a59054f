//! Core game engine - pure, deterministic, and testable.
//!
//! This crate contains the board state machine and every rule of the game:
//! piece movement and rotation under collision constraints, row completion
//! and the two-phase (flash, then collapse) line clear, scoring and leveling,
//! and the garbage counters that couple two boards in versus mode.
//!
//! It has zero dependencies on UI or I/O:
//!
//! - **Deterministic**: a board seeded the same way plays the same game.
//! - **Tick-driven**: nothing advances unless a command or timer method is
//!   called; the crate holds no clocks of its own.
//! - **Single-writer**: one external driver mutates a board; renderers read
//!   [`BoardSnapshot`] values instead of live state.
//!
//! # Module structure
//!
//! - [`grid`]: the 10x20 cell matrix with row compaction and garbage injection
//! - [`shapes`]: block offsets for each tetromino kind
//! - [`piece`]: a falling tetromino and its pure rotation transforms
//! - [`board`]: the orchestrating state machine and its command surface
//! - [`rng`]: seedable generator injected into piece drawing
//! - [`scoring`]: line scores, leveling, garbage output, gravity intervals
//! - [`snapshot`]: read-only view of a board for rendering

pub mod board;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use duel_tetris_types as types;

pub use board::Board;
pub use grid::Grid;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use shapes::block_offsets;
pub use snapshot::{BoardSnapshot, PieceSnapshot};
