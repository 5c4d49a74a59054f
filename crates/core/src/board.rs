//! The board state machine.
//!
//! A board owns one grid, the current and next piece, all counters, and the
//! line-clear animation timer. It moves through four states:
//!
//! ```text
//! Inert --start()--> Active --lock completes rows--> Animating
//!   Animating --finish_line_clear()--> Active | GameOver
//!   Active --spawn collision--> GameOver
//!   {Active, GameOver} --reset_for_menu()--> Inert
//! ```
//!
//! The current piece is `Some` exactly while the board is Active, which is
//! what freezes movement during the clear animation and after game over.
//! Nothing in here advances on its own; an external driver calls the command
//! methods once per tick.

use arrayvec::ArrayVec;

use duel_tetris_types::{BoardCommand, Cell, BOARD_HEIGHT, LINE_CLEAR_TICKS};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring;
use crate::snapshot::BoardSnapshot;

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Option<Piece>,
    next: Option<Piece>,
    rng: SimpleRng,
    score: u32,
    level: u32,
    lines_cleared: u32,
    tetris_count: u32,
    total_pieces: u32,
    wins: u32,
    started: bool,
    game_over: bool,
    ghost_enabled: bool,
    incoming_garbage: u32,
    outgoing_garbage: u32,
    /// Rows detected full at lock time, pending the collapse. Non-empty
    /// exactly while the clear animation runs.
    clearing_rows: ArrayVec<i8, 4>,
    line_clear_timer: i32,
}

impl Board {
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            current: None,
            next: None,
            rng: SimpleRng::new(seed),
            score: 0,
            level: 1,
            lines_cleared: 0,
            tetris_count: 0,
            total_pieces: 0,
            wins: 0,
            started: false,
            game_over: false,
            ghost_enabled: true,
            incoming_garbage: 0,
            outgoing_garbage: 0,
            clearing_rows: ArrayVec::new(),
            line_clear_timer: 0,
        }
    }

    /// Reset counters and activate the board. Wins survive: they count
    /// rounds within a session and are only wiped by [`reset_for_menu`].
    ///
    /// [`reset_for_menu`]: Board::reset_for_menu
    pub fn start(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.tetris_count = 0;
        self.total_pieces = 0;
        self.incoming_garbage = 0;
        self.outgoing_garbage = 0;
        self.clearing_rows.clear();
        self.line_clear_timer = 0;
        self.game_over = false;
        self.started = true;
        self.next = Some(Piece::random(&mut self.rng));
        self.new_piece();
    }

    /// Return to the inert pre-game state without destroying the instance.
    pub fn reset_for_menu(&mut self) {
        self.grid.clear();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.tetris_count = 0;
        self.total_pieces = 0;
        self.wins = 0;
        self.incoming_garbage = 0;
        self.outgoing_garbage = 0;
        self.clearing_rows.clear();
        self.line_clear_timer = 0;
        self.started = false;
        self.game_over = false;
        self.ghost_enabled = true;
    }

    // ----- movement commands -------------------------------------------------

    pub fn move_left(&mut self) {
        self.try_translate(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.try_translate(1, 0);
    }

    /// One gravity step. A rejected downward move locks the piece.
    pub fn move_piece_down(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let moved = piece.translated(0, -1);
        if self.grid.fits(&moved) {
            self.current = Some(moved);
        } else {
            self.lock_current();
        }
    }

    /// Hard drop: fall until blocked, then lock.
    pub fn drop_down(&mut self) {
        let Some(mut piece) = self.current else {
            return;
        };
        loop {
            let moved = piece.translated(0, -1);
            if self.grid.fits(&moved) {
                piece = moved;
            } else {
                break;
            }
        }
        self.current = Some(piece);
        self.lock_current();
    }

    pub fn rotate_left(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let rotated = piece.rotated_left();
        if self.grid.fits(&rotated) {
            self.current = Some(rotated);
        }
    }

    pub fn rotate_right(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let rotated = piece.rotated_right();
        if self.grid.fits(&rotated) {
            self.current = Some(rotated);
        }
    }

    fn try_translate(&mut self, dx: i8, dy: i8) {
        let Some(piece) = self.current else {
            return;
        };
        let moved = piece.translated(dx, dy);
        if self.grid.fits(&moved) {
            self.current = Some(moved);
        }
    }

    /// Write the current piece into the grid and evaluate row completion.
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        // Collision was checked before every committed move, so place can
        // only fail on a logic defect in this file.
        let placed = self.grid.place(&piece);
        debug_assert!(placed, "locked piece overlaps the stack");

        self.total_pieces += 1;

        let rows = self.grid.full_rows();
        if rows.is_empty() {
            self.materialize_incoming_garbage();
            self.new_piece();
        } else {
            self.clearing_rows = rows;
            self.line_clear_timer = LINE_CLEAR_TICKS;
        }
    }

    // ----- line-clear animation ----------------------------------------------

    /// Driven once per tick by the external loop while animating.
    pub fn decrement_line_clear_timer(&mut self) {
        if self.is_animating_line_clear() {
            self.line_clear_timer -= 1;
        }
    }

    pub fn line_clear_timer(&self) -> i32 {
        self.line_clear_timer
    }

    /// Collapse the flashed rows, apply scoring, and bring in the next piece.
    ///
    /// Precondition: the animation timer has run out.
    pub fn finish_line_clear(&mut self) {
        if !self.is_animating_line_clear() {
            return;
        }
        debug_assert!(self.line_clear_timer <= 0, "animation still running");

        let n = self.clearing_rows.len();
        self.grid.clear_rows(&self.clearing_rows);

        // Score with the level in effect at lock time, then re-level.
        self.score += scoring::line_clear_score(n, self.level);
        self.lines_cleared += n as u32;
        if n == 4 {
            self.tetris_count += 1;
        }
        self.level = scoring::level_for_lines(self.lines_cleared);
        self.outgoing_garbage += scoring::garbage_sent(n);

        self.clearing_rows.clear();
        self.line_clear_timer = 0;

        self.materialize_incoming_garbage();
        self.new_piece();
    }

    // ----- piece supply ------------------------------------------------------

    /// Promote next to current and draw a fresh next piece. A spawn that
    /// collides with the stack freezes the board in game over.
    pub fn new_piece(&mut self) {
        if !self.started || self.game_over {
            return;
        }
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::random(&mut self.rng),
        };
        self.next = Some(Piece::random(&mut self.rng));

        if self.grid.fits(&piece) {
            self.current = Some(piece);
        } else {
            self.current = None;
            self.game_over = true;
        }
    }

    /// Pending garbage becomes real rows between pieces, never mid-fall.
    fn materialize_incoming_garbage(&mut self) {
        let n = std::mem::take(&mut self.incoming_garbage);
        if n > 0 {
            self.grid.inject_garbage_rows(n as usize, &mut self.rng);
        }
    }

    // ----- garbage counters --------------------------------------------------

    pub fn add_incoming_garbage(&mut self, n: u32) {
        self.incoming_garbage += n;
    }

    pub fn clear_outgoing_garbage(&mut self) {
        self.outgoing_garbage = 0;
    }

    pub fn outgoing_garbage(&self) -> u32 {
        self.outgoing_garbage
    }

    pub fn incoming_garbage(&self) -> u32 {
        self.incoming_garbage
    }

    // ----- misc commands -----------------------------------------------------

    pub fn toggle_ghost_piece(&mut self) {
        self.ghost_enabled = !self.ghost_enabled;
    }

    /// Called once per finished versus round by the match coordinator.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Dispatcher for the input layer.
    pub fn apply(&mut self, command: BoardCommand) {
        match command {
            BoardCommand::MoveLeft => self.move_left(),
            BoardCommand::MoveRight => self.move_right(),
            BoardCommand::SoftDrop => self.move_piece_down(),
            BoardCommand::HardDrop => self.drop_down(),
            BoardCommand::RotateLeft => self.rotate_left(),
            BoardCommand::RotateRight => self.rotate_right(),
            BoardCommand::ToggleGhost => self.toggle_ghost_piece(),
        }
    }

    // ----- queries -----------------------------------------------------------

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_animating_line_clear(&self) -> bool {
        !self.clearing_rows.is_empty()
    }

    pub fn clearing_rows(&self) -> &[i8] {
        &self.clearing_rows
    }

    pub fn shape_at(&self, x: i8, y: i8) -> Cell {
        self.grid.shape_at(x, y)
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    /// Pivot row where the current piece would rest after a hard drop.
    pub fn ghost_piece_y(&self) -> Option<i8> {
        let piece = self.current?;
        let mut probe = piece;
        loop {
            let moved = probe.translated(0, -1);
            if self.grid.fits(&moved) {
                probe = moved;
            } else {
                break;
            }
        }
        Some(probe.y())
    }

    pub fn is_ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn tetris_count(&self) -> u32 {
        self.tetris_count
    }

    pub fn total_pieces(&self) -> u32 {
        self.total_pieces
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup in tests.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    // ----- snapshot ----------------------------------------------------------

    /// Fill a reusable snapshot with the render-facing view of this board.
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.grid.write_cells(&mut out.cells);

        out.current = self.current.map(Into::into);
        out.next_kind = self.next.map(|p| p.kind());
        out.ghost_y = if self.ghost_enabled {
            self.ghost_piece_y()
        } else {
            None
        };

        out.clearing = [false; BOARD_HEIGHT as usize];
        for &row in self.clearing_rows.iter() {
            out.clearing[row as usize] = true;
        }
        out.line_clear_timer = self.line_clear_timer;

        out.started = self.started;
        out.game_over = self.game_over;
        out.animating = self.is_animating_line_clear();

        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.tetris_count = self.tetris_count;
        out.total_pieces = self.total_pieces;
        out.wins = self.wins;
        out.incoming_garbage = self.incoming_garbage;
        out.outgoing_garbage = self.outgoing_garbage;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
