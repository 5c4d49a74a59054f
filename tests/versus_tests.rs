//! Match coordination tests: garbage exchange, round lifecycle.

use duel_tetris::core::Board;
use duel_tetris::types::{BoardCommand, PlayerSlot, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
use duel_tetris::versus::VersusMatch;

fn fill_full_rows(board: &mut Board, n: i8) {
    for y in 0..n {
        for x in 0..BOARD_WIDTH as i8 {
            board.grid_mut().set(x, y, Some(ShapeKind::L));
        }
    }
}

/// Build up `outgoing` on a board without ticking the match, by driving the
/// board's own animation methods directly.
fn clear_lines_directly(board: &mut Board, rows: i8) {
    fill_full_rows(board, rows);
    board.drop_down();
    while board.line_clear_timer() > 0 {
        board.decrement_line_clear_timer();
    }
    board.finish_line_clear();
    assert!(!board.is_animating_line_clear());
}

#[test]
fn exchange_nets_out_and_resets_both_counters() {
    let mut game = VersusMatch::new(51, 52);
    game.start();

    // Board one: a triple then a double, 2 + 1 = 3 outgoing.
    clear_lines_directly(game.board_mut(PlayerSlot::One), 3);
    clear_lines_directly(game.board_mut(PlayerSlot::One), 2);
    assert_eq!(game.board(PlayerSlot::One).outgoing_garbage(), 3);

    // Board two: a double, 1 outgoing.
    clear_lines_directly(game.board_mut(PlayerSlot::Two), 2);
    assert_eq!(game.board(PlayerSlot::Two).outgoing_garbage(), 1);

    // One tick performs the whole exchange atomically.
    game.tick();
    assert_eq!(game.board(PlayerSlot::Two).incoming_garbage(), 2);
    assert_eq!(game.board(PlayerSlot::One).incoming_garbage(), 0);
    assert_eq!(game.board(PlayerSlot::One).outgoing_garbage(), 0);
    assert_eq!(game.board(PlayerSlot::Two).outgoing_garbage(), 0);
}

#[test]
fn zero_zero_exchange_is_a_noop() {
    let mut game = VersusMatch::new(61, 62);
    game.start();
    game.tick();
    for slot in [PlayerSlot::One, PlayerSlot::Two] {
        assert_eq!(game.board(slot).incoming_garbage(), 0);
        assert_eq!(game.board(slot).outgoing_garbage(), 0);
    }
}

#[test]
fn outgoing_is_always_consumed_by_the_end_of_the_tick() {
    let mut game = VersusMatch::new(71, 72);
    game.start();
    clear_lines_directly(game.board_mut(PlayerSlot::One), 4);
    assert_eq!(game.board(PlayerSlot::One).outgoing_garbage(), 4);

    for _ in 0..200 {
        game.tick();
        assert_eq!(game.board(PlayerSlot::One).outgoing_garbage(), 0);
        assert_eq!(game.board(PlayerSlot::Two).outgoing_garbage(), 0);
        if game.is_round_over() {
            break;
        }
    }
}

#[test]
fn delivered_garbage_turns_into_rows_on_the_receiving_board() {
    let mut game = VersusMatch::new(81, 82);
    game.start();
    clear_lines_directly(game.board_mut(PlayerSlot::One), 4);
    game.tick();
    assert_eq!(game.board(PlayerSlot::Two).incoming_garbage(), 4);

    // The counter materializes when board two locks its current piece.
    game.apply(PlayerSlot::Two, BoardCommand::HardDrop);
    assert_eq!(game.board(PlayerSlot::Two).incoming_garbage(), 0);
    let board = game.board(PlayerSlot::Two);
    for y in 0..4 {
        let garbage = (0..BOARD_WIDTH as i8)
            .filter(|&x| board.shape_at(x, y) == Some(ShapeKind::Garbage))
            .count();
        assert_eq!(garbage, BOARD_WIDTH as usize - 1, "row {y}");
    }
}

#[test]
fn round_over_reports_winner_and_persistable_totals() {
    let mut game = VersusMatch::new(91, 92);
    game.start();

    // Give the eventual winner a score worth persisting.
    clear_lines_directly(game.board_mut(PlayerSlot::Two), 2);

    // Top out board one.
    for y in 0..(BOARD_HEIGHT as i8 - 1) {
        for x in 1..BOARD_WIDTH as i8 {
            game.board_mut(PlayerSlot::One)
                .grid_mut()
                .set(x, y, Some(ShapeKind::Garbage));
        }
    }
    game.apply(PlayerSlot::One, BoardCommand::HardDrop);
    assert!(game.board(PlayerSlot::One).is_game_over());

    let result = game.tick().expect("round ends on this tick");
    assert_eq!(result.winner, Some(PlayerSlot::Two));
    assert_eq!(result.players[1].score, 100);
    assert_eq!(result.players[1].lines_cleared, 2);
    assert_eq!(result.players[1].wins, 1);
    assert_eq!(result.players[0].wins, 0);

    // A rematch keeps the win totals and plays on.
    game.start();
    assert!(game.is_running());
    assert_eq!(game.board(PlayerSlot::Two).wins(), 1);
    assert_eq!(game.board(PlayerSlot::Two).score(), 0);
}
