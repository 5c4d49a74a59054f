//! The play-field cell matrix.
//!
//! 10 columns by 20 rows in a flat array, row-major with row 0 at the floor
//! and rows growing upward. Columns outside the field and rows below the
//! floor block movement; rows above the visible ceiling are open so pieces
//! can spawn there.

use arrayvec::ArrayVec;

use duel_tetris_types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::piece::Piece;
use crate::rng::SimpleRng;

const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat cell storage, index = row * WIDTH + column.
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Shape stored at (x, y); `None` when empty or outside the visible grid.
    pub fn shape_at(&self, x: i8, y: i8) -> Cell {
        Self::index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Collision probe: walls and the floor block, the sky above the visible
    /// ceiling does not.
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 {
            return true;
        }
        if y >= BOARD_HEIGHT as i8 {
            return false;
        }
        self.shape_at(x, y).is_some()
    }

    /// Whether every cell of the piece is free of walls, floor and stack.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| !self.blocks(x, y))
    }

    /// Write one cell. Returns false when (x, y) is outside the visible grid.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Write the piece's four cells into the grid as its kind.
    ///
    /// Fails without writing anything if a visible target cell is already
    /// occupied; the caller checked collision first, so a failure here is a
    /// logic defect, not a game event. Cells above the ceiling are dropped.
    pub fn place(&mut self, piece: &Piece) -> bool {
        for &(x, y) in &piece.cells() {
            if y >= BOARD_HEIGHT as i8 {
                continue;
            }
            match Self::index(x, y) {
                Some(idx) if self.cells[idx].is_none() => {}
                _ => return false,
            }
        }

        for &(x, y) in &piece.cells() {
            if y < BOARD_HEIGHT as i8 {
                self.set(x, y, Some(piece.kind()));
            }
        }
        true
    }

    pub fn is_row_full(&self, y: i8) -> bool {
        match Self::index(0, y) {
            Some(start) => self.cells[start..start + BOARD_WIDTH as usize]
                .iter()
                .all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Row indices (ascending) where every column is occupied.
    ///
    /// One lock can complete at most four rows, the height of a piece.
    pub fn full_rows(&self) -> ArrayVec<i8, 4> {
        let mut rows = ArrayVec::new();
        for y in 0..BOARD_HEIGHT as i8 {
            if self.is_row_full(y) && !rows.is_full() {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows and compact the stack downward in one pass,
    /// inserting as many empty rows at the top as were removed.
    pub fn clear_rows(&mut self, rows: &[i8]) {
        let width = BOARD_WIDTH as usize;
        let mut write_y: usize = 0;

        for read_y in 0..BOARD_HEIGHT as usize {
            if rows.contains(&(read_y as i8)) {
                continue;
            }
            if write_y != read_y {
                let src = read_y * width;
                let dst = write_y * width;
                self.cells.copy_within(src..src + width, dst);
            }
            write_y += 1;
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }
    }

    /// Push `n` garbage rows in from the bottom.
    ///
    /// The stack shifts up by `n`; the top `n` rows are discarded. Each new
    /// bottom row is full of garbage except for one randomly placed hole.
    /// A stack pushed past the ceiling is not an error here; it ends the
    /// game on the next spawn that collides.
    pub fn inject_garbage_rows(&mut self, n: usize, rng: &mut SimpleRng) {
        if n == 0 {
            return;
        }
        let n = n.min(BOARD_HEIGHT as usize);
        let width = BOARD_WIDTH as usize;

        for y in (n..BOARD_HEIGHT as usize).rev() {
            let src = (y - n) * width;
            let dst = y * width;
            self.cells.copy_within(src..src + width, dst);
        }

        for y in 0..n {
            let hole = rng.next_range(BOARD_WIDTH as u32) as usize;
            let start = y * width;
            for x in 0..width {
                self.cells[start + x] = if x == hole {
                    None
                } else {
                    Some(ShapeKind::Garbage)
                };
            }
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Copy the visible cells into a row-major 2D array (row 0 = floor).
    pub fn write_cells(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for y in 0..BOARD_HEIGHT as usize {
            let start = y * BOARD_WIDTH as usize;
            for x in 0..BOARD_WIDTH as usize {
                out[y][x] = self.cells[start + x];
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
