//! The versus match: one session object owning both boards.
//!
//! The external loop calls [`VersusMatch::tick`] at a fixed cadence
//! (`TICK_MS`). Each tick drives both boards' timers and gravity, performs
//! the garbage exchange as one indivisible step, and detects the end of the
//! round. Cross-board reads never happen anywhere else, so the two outgoing
//! counters cannot be observed or mutated between the read and the reset.

use duel_tetris_core::scoring;
use duel_tetris_core::Board;
use duel_tetris_types::{BoardCommand, PlayerSlot, TICK_MS};

/// Final values of one player's round, handed to the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerResult {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub tetris_count: u32,
    pub wins: u32,
}

impl PlayerResult {
    fn from_board(board: &Board) -> Self {
        Self {
            score: board.score(),
            level: board.level(),
            lines_cleared: board.lines_cleared(),
            tetris_count: board.tetris_count(),
            wins: board.wins(),
        }
    }
}

/// Outcome of one finished round. `winner` is `None` only if both boards
/// topped out on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub winner: Option<PlayerSlot>,
    pub players: [PlayerResult; 2],
}

#[derive(Debug)]
pub struct VersusMatch {
    boards: [Board; 2],
    gravity_elapsed_ms: [u32; 2],
    result: Option<RoundResult>,
}

impl VersusMatch {
    pub fn new(seed_one: u32, seed_two: u32) -> Self {
        Self {
            boards: [Board::new(seed_one), Board::new(seed_two)],
            gravity_elapsed_ms: [0; 2],
            result: None,
        }
    }

    /// Start (or restart) a round on both boards.
    pub fn start(&mut self) {
        for board in &mut self.boards {
            board.start();
        }
        self.gravity_elapsed_ms = [0; 2];
        self.result = None;
    }

    /// Return both boards to the inert pre-game state.
    pub fn reset_for_menu(&mut self) {
        for board in &mut self.boards {
            board.reset_for_menu();
        }
        self.gravity_elapsed_ms = [0; 2];
        self.result = None;
    }

    pub fn board(&self, slot: PlayerSlot) -> &Board {
        &self.boards[slot.index()]
    }

    pub fn board_mut(&mut self, slot: PlayerSlot) -> &mut Board {
        &mut self.boards[slot.index()]
    }

    pub fn is_running(&self) -> bool {
        self.boards.iter().all(|b| b.is_started()) && self.result.is_none()
    }

    pub fn is_round_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn round_result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Route a player command to their board. Manual drops restart that
    /// board's gravity interval so the piece does not double-step.
    pub fn apply(&mut self, slot: PlayerSlot, command: BoardCommand) {
        if self.result.is_some() {
            return;
        }
        self.boards[slot.index()].apply(command);
        if matches!(command, BoardCommand::SoftDrop | BoardCommand::HardDrop) {
            self.gravity_elapsed_ms[slot.index()] = 0;
        }
    }

    /// One fixed-interval step for the whole match. Returns the round
    /// result on the tick the round finishes, once.
    pub fn tick(&mut self) -> Option<RoundResult> {
        if !self.is_running() {
            return None;
        }

        for i in 0..2 {
            self.step_board(i);
        }
        self.exchange_garbage();
        self.check_round_end()
    }

    /// Advance one board by one tick: run the clear animation if one is in
    /// flight, otherwise apply gravity on its level-dependent interval.
    fn step_board(&mut self, i: usize) {
        let board = &mut self.boards[i];
        if board.is_game_over() {
            return;
        }

        if board.is_animating_line_clear() {
            board.decrement_line_clear_timer();
            if board.line_clear_timer() <= 0 {
                board.finish_line_clear();
            }
            self.gravity_elapsed_ms[i] = 0;
            return;
        }

        self.gravity_elapsed_ms[i] += TICK_MS;
        if self.gravity_elapsed_ms[i] >= scoring::gravity_interval_ms(board.level()) {
            self.gravity_elapsed_ms[i] = 0;
            board.move_piece_down();
        }
    }

    /// The garbage exchange, one indivisible unit of the tick: read both
    /// outgoing counters, deliver the difference to the weaker board, and
    /// reset both counters, with no board mutation in between.
    fn exchange_garbage(&mut self) {
        let out_one = self.boards[0].outgoing_garbage();
        let out_two = self.boards[1].outgoing_garbage();

        if out_one > out_two {
            self.boards[1].add_incoming_garbage(out_one - out_two);
        } else if out_two > out_one {
            self.boards[0].add_incoming_garbage(out_two - out_one);
        }

        self.boards[0].clear_outgoing_garbage();
        self.boards[1].clear_outgoing_garbage();
    }

    fn check_round_end(&mut self) -> Option<RoundResult> {
        let over_one = self.boards[0].is_game_over();
        let over_two = self.boards[1].is_game_over();
        if !over_one && !over_two {
            return None;
        }

        let winner = match (over_one, over_two) {
            (true, false) => Some(PlayerSlot::Two),
            (false, true) => Some(PlayerSlot::One),
            _ => None,
        };
        if let Some(slot) = winner {
            self.boards[slot.index()].add_win();
        }

        let result = RoundResult {
            winner,
            players: [
                PlayerResult::from_board(&self.boards[0]),
                PlayerResult::from_board(&self.boards[1]),
            ],
        };
        self.result = Some(result);
        Some(result)
    }
}
