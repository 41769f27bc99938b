use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_HEIGHT, PREVIEW_WIDTH};

/// Plain-data view of a session for renderers.
///
/// `board` is the combined view (settled blocks with the active piece drawn
/// over them) as cell tags, `board[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub next: PieceKind,
    pub preview: [[u8; PREVIEW_WIDTH]; PREVIEW_HEIGHT],
    pub score: u32,
    pub rows_cleared: u32,
    pub pieces_locked: u32,
    pub round: u32,
    pub fall_interval_ms: u32,
    pub playing: bool,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        !self.playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            next: PieceKind::I,
            preview: [[0u8; PREVIEW_WIDTH]; PREVIEW_HEIGHT],
            score: 0,
            rows_cleared: 0,
            pieces_locked: 0,
            round: 0,
            fall_interval_ms: 0,
            playing: false,
        }
    }
}
