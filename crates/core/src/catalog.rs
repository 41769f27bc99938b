//! Piece catalog - the seven piece templates and their preview glyphs
//!
//! Every template is authored at its spawn placement: row 0, centered on the
//! board's middle column. Spawning copies the template grid as-is, so there is
//! no separate spawn offset to keep in sync.
//!
//! Preview glyphs live in an 8x8 box whose outer ring is wall-tagged.

use crate::grid::{BoardGrid, PreviewGrid};
use crate::types::{Cell, PieceKind, BOARD_WIDTH, NUM_PIECE_KINDS, PREVIEW_HEIGHT, PREVIEW_WIDTH};

/// Board column the spawn shapes are centered on
const MID: usize = BOARD_WIDTH / 2;

/// Cell positions (column, row) of a kind at its spawn placement
pub fn spawn_cells(kind: PieceKind) -> [(usize, usize); 4] {
    match kind {
        PieceKind::I => [(MID - 2, 0), (MID - 1, 0), (MID, 0), (MID + 1, 0)],
        PieceKind::O => [(MID - 1, 0), (MID, 0), (MID - 1, 1), (MID, 1)],
        PieceKind::J => [(MID - 1, 0), (MID, 0), (MID + 1, 0), (MID + 1, 1)],
        PieceKind::L => [(MID - 1, 0), (MID, 0), (MID + 1, 0), (MID - 1, 1)],
        PieceKind::Z => [(MID - 1, 0), (MID, 0), (MID, 1), (MID + 1, 1)],
        PieceKind::S => [(MID, 0), (MID + 1, 0), (MID - 1, 1), (MID, 1)],
        PieceKind::T => [(MID - 2, 0), (MID - 1, 0), (MID, 0), (MID - 1, 1)],
    }
}

/// Glyph positions (x, y) of a kind inside the preview box
pub fn preview_cells(kind: PieceKind) -> [(usize, usize); 4] {
    match kind {
        PieceKind::I => [(2, 4), (3, 4), (4, 4), (5, 4)],
        PieceKind::O => [(3, 3), (4, 3), (3, 4), (4, 4)],
        PieceKind::J => [(3, 4), (4, 4), (5, 4), (5, 3)],
        PieceKind::L => [(3, 4), (4, 4), (5, 4), (3, 3)],
        PieceKind::Z => [(3, 3), (4, 3), (4, 4), (5, 4)],
        PieceKind::S => [(3, 4), (4, 4), (4, 3), (5, 3)],
        PieceKind::T => [(3, 3), (2, 4), (3, 4), (4, 4)],
    }
}

/// Immutable shape definition: spawn placement plus preview glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTemplate {
    kind: PieceKind,
    cells: BoardGrid,
    preview: PreviewGrid,
}

impl PieceTemplate {
    /// Build a template from explicit cell lists.
    ///
    /// # Panics
    ///
    /// Panics if a spawn cell lies outside the board or a glyph cell lies
    /// outside the preview box interior.
    pub fn new(kind: PieceKind, spawn: &[(usize, usize)], glyph: &[(usize, usize)]) -> Self {
        let mut cells = BoardGrid::new();
        for &(x, y) in spawn {
            assert!(
                cells.set(x, y, Cell::Block(kind)),
                "{:?} template cell ({}, {}) is outside the board",
                kind,
                x,
                y
            );
        }

        let mut preview = PreviewGrid::new();
        for i in 0..PREVIEW_WIDTH {
            preview.set(i, 0, Cell::Wall);
            preview.set(i, PREVIEW_HEIGHT - 1, Cell::Wall);
        }
        for j in 0..PREVIEW_HEIGHT {
            preview.set(0, j, Cell::Wall);
            preview.set(PREVIEW_WIDTH - 1, j, Cell::Wall);
        }
        for &(x, y) in glyph {
            assert!(
                (1..PREVIEW_WIDTH - 1).contains(&x) && (1..PREVIEW_HEIGHT - 1).contains(&y),
                "{:?} preview cell ({}, {}) is outside the preview interior",
                kind,
                x,
                y
            );
            preview.set(x, y, Cell::Block(kind));
        }

        Self {
            kind,
            cells,
            preview,
        }
    }

    /// Standard template for a kind
    pub fn for_kind(kind: PieceKind) -> Self {
        Self::new(kind, &spawn_cells(kind), &preview_cells(kind))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Piece cells at the spawn placement
    pub fn cells(&self) -> &BoardGrid {
        &self.cells
    }

    pub fn preview(&self) -> &PreviewGrid {
        &self.preview
    }
}

/// All seven templates, indexed by [`PieceKind::index`]
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    templates: [PieceTemplate; NUM_PIECE_KINDS],
}

impl PieceCatalog {
    pub fn new() -> Self {
        Self {
            templates: PieceKind::ALL.map(PieceTemplate::for_kind),
        }
    }

    pub fn templates(&self) -> &[PieceTemplate; NUM_PIECE_KINDS] {
        &self.templates
    }

    pub fn template(&self, kind: PieceKind) -> &PieceTemplate {
        &self.templates[kind.index()]
    }

    pub fn preview(&self, kind: PieceKind) -> &PreviewGrid {
        self.template(kind).preview()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::new()
    }
}
