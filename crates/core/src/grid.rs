//! Grid module - fixed-size 2D cell storage
//!
//! A grid is indexed by (column, row) with row 0 at the top. Storage is a
//! row-major array of rows, so whole-row copies during line clears are plain
//! array moves and nothing on the hot path allocates.
//!
//! The same type backs the settled board, the active piece layer, and the
//! preview glyphs; only the const dimensions differ.

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_HEIGHT, PREVIEW_WIDTH};

/// Fixed-size grid of cells, `W` columns by `H` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<const W: usize, const H: usize> {
    rows: [[Cell; W]; H],
}

/// Grid with the board's dimensions (walls included)
pub type BoardGrid = Grid<BOARD_WIDTH, BOARD_HEIGHT>;

/// Grid with the preview box dimensions (border included)
pub type PreviewGrid = Grid<PREVIEW_WIDTH, PREVIEW_HEIGHT>;

/// Inclusive rectangle of occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Bounds {
    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }

    /// Integer center, rounding toward the top-left
    pub fn center(&self) -> (usize, usize) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }
}

impl<const W: usize, const H: usize> Grid<W, H> {
    /// Create a grid with every cell empty
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; W]; H],
        }
    }

    /// Build a grid from small-integer tags, `tags[row][column]`.
    ///
    /// # Panics
    ///
    /// Panics on a tag that is not a valid [`Cell`] tag.
    pub fn from_tags(tags: &[[u8; W]; H]) -> Self {
        let mut grid = Self::new();
        for (y, row) in tags.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                let cell = Cell::from_tag(tag)
                    .unwrap_or_else(|| panic!("invalid cell tag {} at ({}, {})", tag, x, y));
                grid.rows[y][x] = cell;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    #[inline(always)]
    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < W && (y as usize) < H
    }

    /// Get cell at (x, y), `None` if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= W || y >= H {
            return None;
        }
        Some(self.rows[y][x])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if x >= W || y >= H {
            return false;
        }
        self.rows[y][x] = cell;
        true
    }

    pub fn row(&self, y: usize) -> &[Cell; W] {
        &self.rows[y]
    }

    pub fn rows(&self) -> &[[Cell; W]; H] {
        &self.rows
    }

    /// Overwrite row `dst` with a copy of row `src`
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        self.rows[dst] = self.rows[src];
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Cell::is_empty))
    }

    pub fn row_occupied(&self, y: usize) -> bool {
        self.rows[y].iter().any(|c| !c.is_empty())
    }

    pub fn column_occupied(&self, x: usize) -> bool {
        self.rows.iter().any(|row| !row[x].is_empty())
    }

    /// Iterate non-empty cells as `(x, y, cell)` in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_empty())
                .map(move |(x, c)| (x, y, *c))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Copy of this grid shifted by (dx, dy).
    ///
    /// Returns `None` when any occupied cell would leave the grid; cells are
    /// never wrapped to the opposite edge.
    pub fn translated(&self, dx: i32, dy: i32) -> Option<Self> {
        let mut out = Self::new();
        for (x, y, cell) in self.occupied() {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if !Self::in_bounds(nx, ny) {
                return None;
            }
            out.rows[ny as usize][nx as usize] = cell;
        }
        Some(out)
    }

    /// Tight bounding box of the occupied cells, `None` for an empty grid.
    ///
    /// Scans inward from each edge until it meets a non-empty line.
    pub fn bounding_box(&self) -> Option<Bounds> {
        let y1 = (0..H).find(|&y| self.row_occupied(y))?;
        let y2 = (0..H).rev().find(|&y| self.row_occupied(y))?;
        let x1 = (0..W).find(|&x| self.column_occupied(x))?;
        let x2 = (0..W).rev().find(|&x| self.column_occupied(x))?;
        Some(Bounds { x1, y1, x2, y2 })
    }

    /// True if any position is non-empty in both grids
    pub fn overlaps(&self, other: &Self) -> bool {
        self.occupied()
            .any(|(x, y, _)| !other.rows[y][x].is_empty())
    }

    /// Small-integer tags, `tags[row][column]`
    pub fn tags(&self) -> [[u8; W]; H] {
        let mut out = [[0u8; W]; H];
        self.write_tags(&mut out);
        out
    }

    /// Write tags into an existing buffer (no allocation)
    pub fn write_tags(&self, out: &mut [[u8; W]; H]) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, c) in dst.iter_mut().zip(src.iter()) {
                *d = c.tag();
            }
        }
    }
}

impl<const W: usize, const H: usize> Default for Grid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    type Small = Grid<4, 3>;

    #[test]
    fn test_get_set_bounds() {
        let mut g = Small::new();
        assert!(g.set(3, 2, Cell::Wall));
        assert_eq!(g.get(3, 2), Some(Cell::Wall));
        assert!(!g.set(4, 0, Cell::Wall));
        assert!(!g.set(0, 3, Cell::Wall));
        assert_eq!(g.get(4, 0), None);
    }

    #[test]
    fn test_translate_rejects_instead_of_wrapping() {
        let mut g = Small::new();
        g.set(0, 1, Cell::Block(PieceKind::I));

        assert!(g.translated(-1, 0).is_none());
        assert!(g.translated(0, 2).is_none());

        let moved = g.translated(3, 1).unwrap();
        assert_eq!(moved.get(3, 2), Some(Cell::Block(PieceKind::I)));
        assert_eq!(moved.occupied_count(), 1);
    }

    #[test]
    fn test_bounding_box() {
        let mut g = Small::new();
        assert_eq!(g.bounding_box(), None);

        g.set(1, 0, Cell::Block(PieceKind::T));
        g.set(2, 2, Cell::Block(PieceKind::T));
        let b = g.bounding_box().unwrap();
        assert_eq!(b, Bounds { x1: 1, y1: 0, x2: 2, y2: 2 });
        assert_eq!(b.width(), 2);
        assert_eq!(b.height(), 3);
        assert_eq!(b.center(), (1, 1));
    }

    #[test]
    fn test_tags_roundtrip_and_overlap() {
        let tags = [[0, 1, 0, 8], [0, 0, 7, 8], [8, 8, 8, 8]];
        let g = Small::from_tags(&tags);
        assert_eq!(g.tags(), tags);

        let mut other = Small::new();
        other.set(0, 0, Cell::Block(PieceKind::O));
        assert!(!other.overlaps(&g));
        other.set(2, 1, Cell::Block(PieceKind::O));
        assert!(other.overlaps(&g));
    }

    #[test]
    #[should_panic(expected = "invalid cell tag")]
    fn test_from_tags_rejects_unknown_tag() {
        let _ = Small::from_tags(&[[0, 0, 0, 9], [0; 4], [0; 4]]);
    }
}
