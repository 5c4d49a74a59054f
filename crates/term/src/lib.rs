//! Terminal presentation layer.
//!
//! Strictly a consumer of [`duel_tetris_core::BoardSnapshot`] values: the
//! view maps snapshots into a framebuffer, the renderer flushes the
//! framebuffer to the terminal. Nothing in here touches live engine state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use duel_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb};
pub use game_view::{MatchView, Viewport};
pub use renderer::TerminalRenderer;
