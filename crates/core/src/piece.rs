//! A falling tetromino: kind, relative block offsets, and pivot position.
//!
//! Rotation is a pure matrix transform producing a new `Piece`; the board
//! decides whether to commit the rotated candidate after a collision check.
//! There is no wall-kick search.

use duel_tetris_types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::rng::SimpleRng;
use crate::shapes::{block_offsets, BlockOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    offsets: [BlockOffset; 4],
    x: i8,
    y: i8,
}

impl Piece {
    /// A piece of the given kind positioned at the spawn pivot: top-center
    /// column, pivot row high enough that the lowest block sits on the top
    /// visible row and the rest hang above the ceiling.
    pub fn spawn(kind: ShapeKind) -> Self {
        let offsets = block_offsets(kind);
        let min_dy = offsets.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        Self {
            kind,
            offsets,
            x: (BOARD_WIDTH / 2) as i8,
            y: BOARD_HEIGHT as i8 - 1 - min_dy,
        }
    }

    /// Draw a uniformly random playable kind from the injected generator.
    pub fn random(rng: &mut SimpleRng) -> Self {
        let idx = rng.next_range(ShapeKind::PLAYABLE.len() as u32) as usize;
        Self::spawn(ShapeKind::PLAYABLE[idx])
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn offsets(&self) -> [BlockOffset; 4] {
        self.offsets
    }

    /// Absolute cell positions (pivot + offset).
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.offsets
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// The same piece translated by (dx, dy).
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Counter-clockwise rotation about the pivot: (dx, dy) -> (-dy, dx).
    pub fn rotated_left(&self) -> Self {
        if !self.rotates() {
            return *self;
        }
        Self {
            offsets: self.offsets.map(|(dx, dy)| (-dy, dx)),
            ..*self
        }
    }

    /// Clockwise rotation about the pivot: (dx, dy) -> (dy, -dx).
    pub fn rotated_right(&self) -> Self {
        if !self.rotates() {
            return *self;
        }
        Self {
            offsets: self.offsets.map(|(dx, dy)| (dy, -dx)),
            ..*self
        }
    }

    /// O is rotation-invariant and garbage never rotates.
    fn rotates(&self) -> bool {
        !matches!(self.kind, ShapeKind::O | ShapeKind::Garbage)
    }

    #[cfg(test)]
    pub(crate) fn at(kind: ShapeKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            offsets: block_offsets(kind),
            x,
            y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_round_trips_for_all_playable_kinds() {
        for kind in ShapeKind::PLAYABLE {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.rotated_left().rotated_right(), piece);
            assert_eq!(piece.rotated_right().rotated_left(), piece);
        }
    }

    #[test]
    fn four_rotations_return_to_start() {
        for kind in ShapeKind::PLAYABLE {
            let piece = Piece::spawn(kind);
            let mut rotated = piece;
            for _ in 0..4 {
                rotated = rotated.rotated_right();
            }
            assert_eq!(rotated, piece);
        }
    }

    #[test]
    fn o_piece_is_a_rotation_fixed_point() {
        let piece = Piece::spawn(ShapeKind::O);
        assert_eq!(piece.rotated_left(), piece);
        assert_eq!(piece.rotated_right(), piece);
    }

    #[test]
    fn rotation_preserves_pivot_and_kind() {
        let piece = Piece::spawn(ShapeKind::T).translated(-2, -5);
        let rotated = piece.rotated_left();
        assert_eq!(rotated.kind(), piece.kind());
        assert_eq!((rotated.x(), rotated.y()), (piece.x(), piece.y()));
        assert_ne!(rotated.offsets(), piece.offsets());
    }

    #[test]
    fn spawn_lowest_block_sits_on_top_visible_row() {
        for kind in ShapeKind::PLAYABLE {
            let piece = Piece::spawn(kind);
            let min_y = piece.cells().iter().map(|&(_, y)| y).min().unwrap();
            assert_eq!(min_y, BOARD_HEIGHT as i8 - 1, "{kind:?}");
        }
    }

    #[test]
    fn random_draw_is_deterministic_and_playable() {
        let mut a = SimpleRng::new(99);
        let mut b = SimpleRng::new(99);
        for _ in 0..50 {
            let pa = Piece::random(&mut a);
            let pb = Piece::random(&mut b);
            assert_eq!(pa, pb);
            assert!(pa.kind().is_playable());
        }
    }

    #[test]
    fn random_draw_covers_all_seven_kinds() {
        let mut rng = SimpleRng::new(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Piece::random(&mut rng).kind());
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn translation_moves_all_cells() {
        let piece = Piece::spawn(ShapeKind::L);
        let moved = piece.translated(1, -3);
        for (a, b) in piece.cells().iter().zip(moved.cells().iter()) {
            assert_eq!((a.0 + 1, a.1 - 3), *b);
        }
    }
}
