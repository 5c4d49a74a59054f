//! Block offsets for each tetromino kind.
//!
//! Offsets are relative to the piece pivot, with y growing upward (row 0 is
//! the board floor). The lookup is an explicit `match` keyed on the kind tag,
//! so reordering [`ShapeKind`] cannot silently remap shapes.

use duel_tetris_types::ShapeKind;

/// Offset of a single block relative to the piece pivot.
pub type BlockOffset = (i8, i8);

/// The four block offsets of a shape in its spawn orientation.
pub fn block_offsets(kind: ShapeKind) -> [BlockOffset; 4] {
    match kind {
        ShapeKind::Z => [(0, -1), (0, 0), (-1, 0), (-1, 1)],
        ShapeKind::S => [(0, -1), (0, 0), (1, 0), (1, 1)],
        ShapeKind::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        ShapeKind::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        ShapeKind::L => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        ShapeKind::J => [(1, -1), (0, -1), (0, 0), (0, 1)],
        // Garbage rows are written cell-by-cell, never as a piece.
        ShapeKind::Garbage => [(0, 0); 4],
    }
}
