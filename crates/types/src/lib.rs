//! Shared types for the versus Tetris engine.
//! This crate contains pure data types with no external dependencies.

/// Board dimensions. Row 0 is the floor; rows grow upward.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed game-loop cadence (~30 ticks per second).
pub const TICK_MS: u32 = 33;

/// Line-clear flash duration, in ticks. The renderer alternates the flash
/// color on timer parity, so this yields three full flash cycles.
pub const LINE_CLEAR_TICKS: i32 = 6;

/// Gravity interval by level: starts at 400ms, 30ms faster per level,
/// floored at 100ms.
pub const GRAVITY_BASE_MS: u32 = 400;
pub const GRAVITY_STEP_MS: u32 = 30;
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Points for clearing n lines, multiplied by the level at lock time.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Garbage rows sent to the opponent for clearing n lines at once.
pub const GARBAGE_SENT: [u32; 5] = [0, 0, 1, 2, 4];

/// Tetromino shapes, plus the non-playable garbage filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Z,
    S,
    I,
    T,
    O,
    L,
    J,
    /// Filler for injected penalty rows. Never spawned, never rotated.
    Garbage,
}

impl ShapeKind {
    /// The seven kinds a player can actually receive.
    pub const PLAYABLE: [ShapeKind; 7] = [
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::L,
        ShapeKind::J,
    ];

    pub fn is_playable(self) -> bool {
        self != ShapeKind::Garbage
    }
}

/// Cell on the board (`None` = empty, `Some` = filled with a shape kind).
pub type Cell = Option<ShapeKind>;

/// Which of the two players a board belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Commands the input layer can issue against one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateLeft,
    RotateRight,
    ToggleGhost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_kinds_exclude_garbage() {
        assert_eq!(ShapeKind::PLAYABLE.len(), 7);
        assert!(ShapeKind::PLAYABLE.iter().all(|k| k.is_playable()));
        assert!(!ShapeKind::Garbage.is_playable());
    }

    #[test]
    fn slot_opponent_round_trips() {
        assert_eq!(PlayerSlot::One.opponent(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::Two.opponent().opponent(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::One.index(), 0);
        assert_eq!(PlayerSlot::Two.index(), 1);
    }

    #[test]
    fn scoring_tables_cover_one_to_four_lines() {
        assert_eq!(LINE_SCORES[1], 40);
        assert_eq!(LINE_SCORES[4], 1200);
        assert_eq!(GARBAGE_SENT[1], 0);
        assert_eq!(GARBAGE_SENT[4], 4);
    }
}
