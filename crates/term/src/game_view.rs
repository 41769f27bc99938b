//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the 12x22 board (walls included), a two-column
//! gap, then the side panel with the NEXT preview box and the SCORE, SPEED,
//! ROWS and ROUND readouts.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_HEIGHT, PREVIEW_WIDTH};

/// Background behind empty board cells
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Columns between the board and the side panel
const PANEL_GAP: u16 = 2;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Display color for a cell tag; `None` for empty or unknown tags.
pub fn tag_color(tag: u8) -> Option<Rgb> {
    let cell = Cell::from_tag(tag)?;
    match cell {
        Cell::Empty => None,
        Cell::Wall => Some(Rgb::new(235, 235, 235)),
        Cell::Block(kind) => Some(match kind {
            PieceKind::I => Rgb::new(90, 210, 110),  // green
            PieceKind::O => Rgb::new(220, 70, 70),   // red
            PieceKind::J => Rgb::new(80, 120, 230),  // blue
            PieceKind::L => Rgb::new(170, 100, 220), // purple
            PieceKind::Z => Rgb::new(255, 160, 40),  // orange
            PieceKind::S => Rgb::new(240, 220, 80),  // yellow
            PieceKind::T => Rgb::new(80, 220, 220),  // cyan
        }),
    }
}

/// Terminal placement of the board and side panel for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    board_x: u16,
    board_y: u16,
    panel_x: u16,
}

/// Renders snapshots of the falling-block game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size needed to show everything
    pub fn required_size(&self) -> Viewport {
        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let panel_w = PREVIEW_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        Viewport::new(board_w + PANEL_GAP + panel_w, board_h)
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let need = self.required_size();
        let board_x = viewport.width.saturating_sub(need.width) / 2;
        let board_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(need.height) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            board_x,
            board_y,
            panel_x: board_x + BOARD_WIDTH as u16 * self.cell_w + PANEL_GAP,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let layout = self.layout(viewport);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                self.draw_tag(fb, layout.board_x, layout.board_y, x as u16, y as u16, tag);
            }
        }

        self.draw_side_panel(fb, snap, layout);

        if snap.game_over() {
            self.draw_game_over(fb, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Draw one board-grid cell whose top-left grid corner sits at (origin_x, origin_y)
    fn draw_tag(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, x: u16, y: u16, tag: u8) {
        let px = origin_x + x * self.cell_w;
        let py = origin_y + y * self.cell_h;
        match tag_color(tag) {
            Some(color) => {
                let style = Style::fg(color).on(BOARD_BG).bold();
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
            None => {
                let style = Style::fg(Rgb::new(90, 90, 100)).on(BOARD_BG).dim();
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                fb.put_char(px, py, '·', style);
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: Layout) {
        let label = Style::fg(Rgb::new(220, 220, 220)).bold();
        let value = Style::fg(Rgb::new(200, 200, 200));
        let x = layout.panel_x;
        let mut y = layout.board_y;

        fb.put_str(x, y, "NEXT", label);
        y = y.saturating_add(1);
        for (py, row) in snap.preview.iter().enumerate() {
            for (px, &tag) in row.iter().enumerate() {
                self.draw_tag(fb, x, y, px as u16, py as u16, tag);
            }
        }
        y = y.saturating_add(PREVIEW_HEIGHT as u16 * self.cell_h + 1);

        fb.put_str(x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.fall_interval_ms, value);
        let ms_x = x.saturating_add(digit_count(snap.fall_interval_ms) + 1);
        fb.put_str(ms_x, y, "ms", value.dim());
        y = y.saturating_add(2);

        fb.put_str(x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.rows_cleared, value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "ROUND", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, snap.round, value);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: Layout) {
        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let mid_y = layout.board_y + (BOARD_HEIGHT as u16 * self.cell_h) / 2;
        let style = Style::fg(Rgb::new(255, 255, 255)).bold();
        for (dy, text) in ["GAME OVER", "r to restart"].iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout.board_x + board_w.saturating_sub(text_w) / 2;
            fb.put_str(x, mid_y + dy as u16, text, style);
        }
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
