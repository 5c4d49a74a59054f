//! Maps two board snapshots into a framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The layout puts the two boards
//! side by side, each with a garbage bar on its left and an info column on
//! its right. Board row 0 (the floor) is drawn at the bottom of the frame.

use duel_tetris_core::{block_offsets, BoardSnapshot};
use duel_tetris_types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board cell width in terminal columns (2x1 compensates for the usual
/// terminal glyph aspect ratio).
const CELL_W: u16 = 2;

const BAR_W: u16 = 1;
const FRAME_W: u16 = BOARD_WIDTH as u16 * CELL_W + 2;
const FRAME_H: u16 = BOARD_HEIGHT as u16 + 2;
const INFO_W: u16 = 13;
const PANEL_W: u16 = BAR_W + 1 + FRAME_W + 1 + INFO_W;
const PANEL_GAP: u16 = 4;

pub struct MatchView {
    background: CellStyle,
}

impl Default for MatchView {
    fn default() -> Self {
        Self {
            background: CellStyle::default(),
        }
    }
}

impl MatchView {
    /// Render both snapshots into an existing framebuffer, resizing it to
    /// the viewport.
    pub fn render_into(&self, snaps: &[BoardSnapshot; 2], viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.background.into_cell(' '));

        let total_w = PANEL_W * 2 + PANEL_GAP;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(FRAME_H) / 2;

        for (i, snap) in snaps.iter().enumerate() {
            let panel_x = start_x + i as u16 * (PANEL_W + PANEL_GAP);
            self.draw_panel(snap, i, panel_x, start_y, fb);
        }

        self.draw_status_line(snaps, viewport, fb);
    }

    fn draw_panel(&self, snap: &BoardSnapshot, index: usize, x: u16, y: u16, fb: &mut FrameBuffer) {
        let board_x = x + BAR_W + 1 + 1; // bar, gap, border
        let board_y = y + 1;

        self.draw_garbage_bar(snap, x, y, fb);
        draw_border(fb, x + BAR_W + 1, y, FRAME_W, FRAME_H);

        if snap.started {
            self.draw_stack(snap, board_x, board_y, fb);
            self.draw_ghost(snap, board_x, board_y, fb);
            self.draw_current(snap, board_x, board_y, fb);
            self.draw_flash(snap, board_x, board_y, fb);
        }

        self.draw_info(snap, index, x + BAR_W + 1 + FRAME_W + 1, y, fb);

        if snap.game_over {
            let label = " GAME  OVER ";
            let lx = board_x + (BOARD_WIDTH as u16 * CELL_W - label.len() as u16) / 2;
            let style = CellStyle {
                fg: Rgb::new(255, 255, 255),
                bg: Rgb::new(160, 30, 30),
                bold: true,
                dim: false,
            };
            fb.draw_str(lx, board_y + BOARD_HEIGHT as u16 / 2, label, style);
        }
    }

    /// Screen position of one board cell (board row 0 is the bottom row).
    fn cell_pos(board_x: u16, board_y: u16, x: i8, y: i8) -> (u16, u16) {
        (
            board_x + x as u16 * CELL_W,
            board_y + (BOARD_HEIGHT as i8 - 1 - y) as u16,
        )
    }

    fn draw_stack(&self, snap: &BoardSnapshot, board_x: u16, board_y: u16, fb: &mut FrameBuffer) {
        for y in 0..BOARD_HEIGHT as i8 {
            if snap.clearing[y as usize] {
                continue; // flash overlay owns this row
            }
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(kind) = snap.cells[y as usize][x as usize] {
                    let (sx, sy) = Self::cell_pos(board_x, board_y, x, y);
                    fill_block(fb, sx, sy, shape_style(kind));
                }
            }
        }
    }

    fn draw_current(&self, snap: &BoardSnapshot, board_x: u16, board_y: u16, fb: &mut FrameBuffer) {
        let Some(piece) = snap.current else {
            return;
        };
        for (x, y) in piece.cells {
            if y >= BOARD_HEIGHT as i8 {
                continue; // above the visible ceiling
            }
            let (sx, sy) = Self::cell_pos(board_x, board_y, x, y);
            fill_block(fb, sx, sy, shape_style(piece.kind));
        }
    }

    fn draw_ghost(&self, snap: &BoardSnapshot, board_x: u16, board_y: u16, fb: &mut FrameBuffer) {
        let (Some(piece), Some(ghost_y)) = (snap.current, snap.ghost_y) else {
            return;
        };
        let drop = piece.y - ghost_y;
        if drop <= 0 {
            return; // resting on the ghost position already
        }
        let mut style = shape_style(piece.kind);
        style.bg = self.background.bg;
        style.dim = true;
        for (x, y) in piece.cells {
            let y = y - drop;
            if y >= BOARD_HEIGHT as i8 {
                continue;
            }
            let (sx, sy) = Self::cell_pos(board_x, board_y, x, y);
            fb.set(sx, sy, Cell { ch: '[', style });
            fb.set(sx + 1, sy, Cell { ch: ']', style });
        }
    }

    /// White flash over the completed rows, alternating on timer parity.
    fn draw_flash(&self, snap: &BoardSnapshot, board_x: u16, board_y: u16, fb: &mut FrameBuffer) {
        if !snap.animating {
            return;
        }
        let lit = snap.line_clear_timer % 2 == 0;
        let style = if lit {
            CellStyle {
                fg: Rgb::new(0, 0, 0),
                bg: Rgb::new(235, 235, 235),
                bold: false,
                dim: false,
            }
        } else {
            self.background
        };
        for y in 0..BOARD_HEIGHT as i8 {
            if !snap.clearing[y as usize] {
                continue;
            }
            let (sx, sy) = Self::cell_pos(board_x, board_y, 0, y);
            fb.fill_rect(sx, sy, BOARD_WIDTH as u16 * CELL_W, 1, ' ', style);
        }
    }

    /// Pending-garbage bar beside the board, growing from the floor and
    /// getting redder the more is queued.
    fn draw_garbage_bar(&self, snap: &BoardSnapshot, x: u16, y: u16, fb: &mut FrameBuffer) {
        let incoming = snap.incoming_garbage.min(BOARD_HEIGHT as u32) as u16;
        if incoming == 0 {
            return;
        }
        let red = 100u32.saturating_add(snap.incoming_garbage * 15).min(255) as u8;
        let style = CellStyle {
            fg: Rgb::new(red, 50, 50),
            bg: Rgb::new(red, 50, 50),
            bold: false,
            dim: false,
        };
        let top = y + FRAME_H - 1 - incoming;
        fb.fill_rect(x, top, BAR_W, incoming, ' ', style);
    }

    fn draw_info(&self, snap: &BoardSnapshot, index: usize, x: u16, y: u16, fb: &mut FrameBuffer) {
        let label = CellStyle {
            fg: Rgb::new(140, 140, 150),
            ..CellStyle::default()
        };
        let value = CellStyle {
            fg: Rgb::new(230, 230, 230),
            bold: true,
            ..CellStyle::default()
        };

        fb.draw_str(x, y, &format!("PLAYER {}", index + 1), value);
        let rows = [
            ("SCORE", format!("{:06}", snap.score)),
            ("LEVEL", format!("{:02}", snap.level)),
            ("LINES", format!("{:03}", snap.lines_cleared)),
            ("TETRIS", format!("{:03}", snap.tetris_count)),
            ("PIECES", format!("{:04}", snap.total_pieces)),
            ("WINS", format!("{:03}", snap.wins)),
        ];
        for (i, (name, val)) in rows.iter().enumerate() {
            let row_y = y + 2 + i as u16;
            fb.draw_str(x, row_y, name, label);
            fb.draw_str(x + 7, row_y, val, value);
        }

        fb.draw_str(x, y + 9, "NEXT", label);
        if let Some(kind) = snap.next_kind {
            for (dx, dy) in block_offsets(kind) {
                let px = x + ((dx + 1) as u16) * CELL_W;
                let py = y + 12 + (2 - dy) as u16;
                fill_block(fb, px, py, shape_style(kind));
            }
        }
    }

    fn draw_status_line(&self, snaps: &[BoardSnapshot; 2], viewport: Viewport, fb: &mut FrameBuffer) {
        let style = CellStyle {
            fg: Rgb::new(150, 150, 160),
            ..CellStyle::default()
        };
        let text = if !snaps[0].started {
            "R: start round   G: ghost   ESC: quit"
        } else if snaps[0].game_over && !snaps[1].game_over {
            "PLAYER 2 WINS THE ROUND   R: rematch   ESC: quit"
        } else if snaps[1].game_over && !snaps[0].game_over {
            "PLAYER 1 WINS THE ROUND   R: rematch   ESC: quit"
        } else if snaps[0].game_over && snaps[1].game_over {
            "DRAW   R: rematch   ESC: quit"
        } else {
            "P1: WASD+Q/space   P2: arrows+M/N   G: ghost   ESC: quit"
        };
        let x = viewport.width.saturating_sub(text.len() as u16) / 2;
        fb.draw_str(x, viewport.height.saturating_sub(1), text, style);
    }
}

fn fill_block(fb: &mut FrameBuffer, x: u16, y: u16, style: CellStyle) {
    for dx in 0..CELL_W {
        fb.set(x + dx, y, Cell { ch: ' ', style });
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle {
        fg: Rgb::new(200, 200, 200),
        ..CellStyle::default()
    };
    for dx in 0..w {
        fb.set(x + dx, y, Cell { ch: '─', style });
        fb.set(x + dx, y + h - 1, Cell { ch: '─', style });
    }
    for dy in 0..h {
        fb.set(x, y + dy, Cell { ch: '│', style });
        fb.set(x + w - 1, y + dy, Cell { ch: '│', style });
    }
    fb.set(x, y, Cell { ch: '┌', style });
    fb.set(x + w - 1, y, Cell { ch: '┐', style });
    fb.set(x, y + h - 1, Cell { ch: '└', style });
    fb.set(x + w - 1, y + h - 1, Cell { ch: '┘', style });
}

fn shape_style(kind: ShapeKind) -> CellStyle {
    CellStyle {
        fg: Rgb::new(0, 0, 0),
        bg: shape_color(kind),
        bold: false,
        dim: false,
    }
}

fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::Z => Rgb::new(204, 70, 70),
        ShapeKind::S => Rgb::new(90, 190, 90),
        ShapeKind::I => Rgb::new(80, 190, 200),
        ShapeKind::T => Rgb::new(160, 90, 200),
        ShapeKind::O => Rgb::new(215, 200, 80),
        ShapeKind::L => Rgb::new(220, 140, 60),
        ShapeKind::J => Rgb::new(90, 110, 220),
        ShapeKind::Garbage => Rgb::new(120, 120, 120),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_bg(fb: &FrameBuffer, bg: Rgb) -> usize {
        let mut n = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).unwrap().style.bg == bg {
                    n += 1;
                }
            }
        }
        n
    }

    fn viewport() -> Viewport {
        Viewport::new(100, 26)
    }

    #[test]
    fn stack_cells_are_painted_in_their_shape_color() {
        let mut snap = BoardSnapshot::default();
        snap.started = true;
        snap.cells[0][3] = Some(ShapeKind::J);
        let snaps = [snap, BoardSnapshot::default()];

        let mut fb = FrameBuffer::new(1, 1);
        MatchView::default().render_into(&snaps, viewport(), &mut fb);

        assert_eq!(count_bg(&fb, shape_color(ShapeKind::J)), CELL_W as usize);
    }

    #[test]
    fn inert_boards_draw_no_cells() {
        let snaps = [BoardSnapshot::default(), BoardSnapshot::default()];
        let mut fb = FrameBuffer::new(1, 1);
        MatchView::default().render_into(&snaps, viewport(), &mut fb);
        for kind in ShapeKind::PLAYABLE {
            assert_eq!(count_bg(&fb, shape_color(kind)), 0);
        }
    }

    #[test]
    fn flashing_rows_replace_their_stack_cells() {
        let mut snap = BoardSnapshot::default();
        snap.started = true;
        snap.animating = true;
        snap.line_clear_timer = 4; // even: lit
        for x in 0..BOARD_WIDTH as usize {
            snap.cells[2][x] = Some(ShapeKind::S);
        }
        snap.clearing[2] = true;
        let snaps = [snap, BoardSnapshot::default()];

        let mut fb = FrameBuffer::new(1, 1);
        MatchView::default().render_into(&snaps, viewport(), &mut fb);

        assert_eq!(count_bg(&fb, shape_color(ShapeKind::S)), 0);
        assert_eq!(
            count_bg(&fb, Rgb::new(235, 235, 235)),
            (BOARD_WIDTH as usize) * (CELL_W as usize)
        );
    }

    #[test]
    fn garbage_bar_reflects_incoming_rows() {
        let mut snap = BoardSnapshot::default();
        snap.started = true;
        snap.incoming_garbage = 3;
        let snaps = [snap, BoardSnapshot::default()];

        let mut fb = FrameBuffer::new(1, 1);
        MatchView::default().render_into(&snaps, viewport(), &mut fb);

        let red = Rgb::new(145, 50, 50);
        assert_eq!(count_bg(&fb, red), 3 * BAR_W as usize);
    }

    #[test]
    fn ghost_is_absent_when_disabled() {
        let mut snap = BoardSnapshot::default();
        snap.started = true;
        snap.current = Some(duel_tetris_core::PieceSnapshot {
            kind: ShapeKind::O,
            cells: [(4, 10), (5, 10), (4, 11), (5, 11)],
            x: 4,
            y: 10,
        });
        snap.ghost_y = None;
        let snaps = [snap, BoardSnapshot::default()];

        let mut fb = FrameBuffer::new(1, 1);
        MatchView::default().render_into(&snaps, viewport(), &mut fb);

        let mut bracket_cells = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                let ch = fb.get(x, y).unwrap().ch;
                if ch == '[' || ch == ']' {
                    bracket_cells += 1;
                }
            }
        }
        assert_eq!(bracket_cells, 0);
    }
}
