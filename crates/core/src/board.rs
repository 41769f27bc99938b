//! Board module - settled blocks, the falling piece, and their interaction
//!
//! The board keeps two layers of the same 12x22 size:
//!
//! - **settled**: walls (left column, right column, floor row) plus every block
//!   that has landed
//! - **active**: exactly one falling piece, or nothing
//!
//! Every move or rotation builds a candidate active layer, validates it with
//! [`Board::collides`], and commits only on success, so the two layers never
//! overlap outside of a rejected candidate.
//!
//! Coordinates: (x, y) with x = column 0..11 (left to right) and y = row 0..21
//! (top to bottom). Columns 1..=10 and rows 0..=20 are the interior.

use arrayvec::ArrayVec;

use crate::catalog::PieceTemplate;
use crate::grid::BoardGrid;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Last playable row; the row below it is the floor
const FLOOR_ROW: usize = BOARD_HEIGHT - 1;

/// Interior columns (walls excluded)
const INTERIOR_COLUMNS: std::ops::Range<usize> = 1..BOARD_WIDTH - 1;

/// Result of landing a piece
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Rows removed, listed bottom to top as found before compaction
    pub cleared_rows: ArrayVec<usize, BOARD_HEIGHT>,
    /// An interior cell of the top row is occupied after compaction
    pub game_over: bool,
}

impl MergeOutcome {
    pub fn rows_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// The playfield: settled layer plus active piece layer
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    settled: BoardGrid,
    active: BoardGrid,
}

impl Board {
    /// Create a board with walls in place and no active piece
    pub fn new() -> Self {
        let mut board = Self {
            settled: BoardGrid::new(),
            active: BoardGrid::new(),
        };
        board.reset();
        board
    }

    /// Empty both layers and stamp the walls and floor
    pub fn reset(&mut self) {
        self.settled.clear();
        self.active.clear();
        for y in 0..BOARD_HEIGHT {
            self.settled.set(0, y, Cell::Wall);
            self.settled.set(BOARD_WIDTH - 1, y, Cell::Wall);
        }
        for x in 0..BOARD_WIDTH {
            self.settled.set(x, FLOOR_ROW, Cell::Wall);
        }
    }

    pub fn settled(&self) -> &BoardGrid {
        &self.settled
    }

    pub fn active(&self) -> &BoardGrid {
        &self.active
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Settled layer with the active piece drawn over it
    pub fn combined(&self) -> BoardGrid {
        let mut out = self.settled;
        for (x, y, cell) in self.active.occupied() {
            out.set(x, y, cell);
        }
        out
    }

    /// Place a settled cell directly.
    ///
    /// Returns false for out-of-bounds positions and for wall positions, which
    /// never change after a reset.
    pub fn set_settled(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if !Self::is_interior(x, y) {
            return false;
        }
        self.settled.set(x, y, cell)
    }

    fn is_interior(x: usize, y: usize) -> bool {
        INTERIOR_COLUMNS.contains(&x) && y < FLOOR_ROW
    }

    /// Replace the active piece with a fresh copy of `template`.
    ///
    /// Returns false, leaving no active piece, when the spawn placement
    /// overlaps settled blocks.
    pub fn spawn(&mut self, template: &PieceTemplate) -> bool {
        let candidate = *template.cells();
        if self.collides(&candidate) {
            self.active.clear();
            return false;
        }
        self.active = candidate;
        true
    }

    /// Try to move the active piece by (dx, dy).
    ///
    /// Motion that would take any cell off the grid, or onto a settled block,
    /// is rejected and leaves the board unchanged.
    pub fn attempt_translate(&mut self, dx: i32, dy: i32) -> bool {
        let Some(candidate) = self.active.translated(dx, dy) else {
            return false;
        };
        self.commit_if_clear(candidate)
    }

    /// Try to rotate the active piece 90° clockwise within its bounding box.
    ///
    /// The box is turned about its integer center, so four successful
    /// rotations restore the original cells. Placements that leave the grid
    /// are rejected before collision checking.
    pub fn attempt_rotate(&mut self) -> bool {
        let Some(candidate) = self.rotated_active() else {
            return false;
        };
        self.commit_if_clear(candidate)
    }

    fn commit_if_clear(&mut self, candidate: BoardGrid) -> bool {
        if self.collides(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Rotated copy of the active layer, `None` if empty or out of bounds
    fn rotated_active(&self) -> Option<BoardGrid> {
        let b = self.active.bounding_box()?;
        let (xm, ym) = b.center();
        let (xm, ym) = (xm as i32, ym as i32);
        let (x1, y1, x2, y2) = (b.x1 as i32, b.y1 as i32, b.x2 as i32, b.y2 as i32);

        // Box rows become columns around the same center.
        let tx1 = xm + y1 - ym;
        let tx2 = xm + y2 - ym;
        let ty1 = ym + x1 - xm;
        let ty2 = ym + x2 - xm;
        if tx1 < 0 || ty1 < 0 || tx2 >= BOARD_WIDTH as i32 || ty2 >= BOARD_HEIGHT as i32 {
            return None;
        }

        let mut out = BoardGrid::new();
        for (x, y, cell) in self.active.occupied() {
            let nx = xm + y1 + y2 - ym - y as i32;
            let ny = ym + x as i32 - xm;
            out.set(nx as usize, ny as usize, cell);
        }
        Some(out)
    }

    /// Check a candidate active layer against the settled layer.
    ///
    /// Collides when the candidate overlaps a settled cell, or spans both the
    /// top and bottom rows, or spans both the leftmost and rightmost columns.
    /// The spanning checks catch a piece that has wrapped around an edge.
    pub fn collides(&self, candidate: &BoardGrid) -> bool {
        if candidate.overlaps(&self.settled) {
            return true;
        }
        let spans_rows = candidate.row_occupied(0) && candidate.row_occupied(BOARD_HEIGHT - 1);
        let spans_columns =
            candidate.column_occupied(0) && candidate.column_occupied(BOARD_WIDTH - 1);
        spans_rows || spans_columns
    }

    /// Land the active piece, clear completed rows, and report game over.
    ///
    /// Each fully occupied interior row is removed on its own and everything
    /// above it moves down one row. Game over is judged on the compacted board.
    ///
    /// # Panics
    ///
    /// Panics if there is no active piece, or if the active piece overlaps a
    /// settled block.
    pub fn merge_and_clear(&mut self) -> MergeOutcome {
        assert!(self.has_active(), "merge_and_clear called with no active piece");
        for (x, y, cell) in self.active.occupied() {
            assert!(
                self.settled.get(x, y) == Some(Cell::Empty),
                "active piece overlaps settled cell ({}, {})",
                x,
                y
            );
            self.settled.set(x, y, cell);
        }
        self.active.clear();

        let cleared_rows = self.clear_full_rows();
        let game_over = self.top_row_occupied();
        MergeOutcome {
            cleared_rows,
            game_over,
        }
    }

    /// Check if an interior row is completely filled across interior columns
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FLOOR_ROW {
            return false;
        }
        let row = self.settled.row(y);
        row[INTERIOR_COLUMNS].iter().all(|c| !c.is_empty())
    }

    /// Any interior cell of row 0 occupied
    pub fn top_row_occupied(&self) -> bool {
        self.settled.row(0)[INTERIOR_COLUMNS]
            .iter()
            .any(|c| !c.is_empty())
    }

    /// Remove every full interior row, compacting the rows above.
    ///
    /// Two-pointer pass from the floor upward: rows that survive are copied
    /// down to the write position, full rows are skipped. Wall cells sit at
    /// the same columns in every row, so whole-row copies preserve them.
    fn clear_full_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared = ArrayVec::new();
        let mut write_y = FLOOR_ROW;

        for read_y in (0..FLOOR_ROW).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    self.settled.copy_row(read_y, write_y);
                }
            }
        }

        for y in 0..write_y {
            for x in INTERIOR_COLUMNS {
                self.settled.set(x, y, Cell::Empty);
            }
        }

        cleared
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
