//! Two-player terminal runner.
//!
//! A fixed-cadence loop (~30 Hz): poll keys until the next tick, route the
//! commands to the boards, tick the match, draw both snapshots. The match
//! stays inert until the first `R`; after a round ends `R` starts a rematch
//! with win totals carried over.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use duel_tetris::core::BoardSnapshot;
use duel_tetris::input::{map_key, InputEvent};
use duel_tetris::term::{FrameBuffer, MatchView, TerminalRenderer, Viewport};
use duel_tetris::types::{PlayerSlot, TICK_MS};
use duel_tetris::versus::{RoundResult, VersusMatch};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state before reporting anything.
    let _ = term.exit();

    match result {
        Ok(Some(final_round)) => {
            print_round_summary(&final_round);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    }
}

fn run(term: &mut TerminalRenderer) -> Result<Option<RoundResult>> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);
    let mut game = VersusMatch::new(seed, seed.rotate_left(16) ^ 0x9e37_79b9);

    let view = MatchView::default();
    let mut fb = FrameBuffer::new(1, 1);
    let mut snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
    let mut last_result: Option<RoundResult> = None;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        game.board(PlayerSlot::One).snapshot_into(&mut snaps[0]);
        game.board(PlayerSlot::Two).snapshot_into(&mut snaps[1]);
        let (w, h) = crossterm::terminal::size().unwrap_or((100, 26));
        view.render_into(&snaps, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Poll input with a timeout until the next tick is due.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    match map_key(key) {
                        Some(InputEvent::Quit) => return Ok(last_result),
                        Some(InputEvent::Restart) => game.start(),
                        Some(InputEvent::ToggleGhost) => {
                            game.board_mut(PlayerSlot::One).toggle_ghost_piece();
                            game.board_mut(PlayerSlot::Two).toggle_ghost_piece();
                        }
                        Some(InputEvent::Player(slot, command)) => game.apply(slot, command),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(result) = game.tick() {
                last_result = Some(result);
            }
        }
    }
}

/// Final round values, handed to stdout in lieu of a storage backend.
fn print_round_summary(result: &RoundResult) {
    match result.winner {
        Some(PlayerSlot::One) => println!("Round winner: player 1"),
        Some(PlayerSlot::Two) => println!("Round winner: player 2"),
        None => println!("Round ended in a draw"),
    }
    for (i, player) in result.players.iter().enumerate() {
        println!(
            "Player {}: score {}, level {}, lines {}, tetrises {}, wins {}",
            i + 1,
            player.score,
            player.level,
            player.lines_cleared,
            player.tetris_count,
            player.wins
        );
    }
}
