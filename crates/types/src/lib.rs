//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The playfield is a 12 x 22 grid that *includes* its walls:
//!
//! - **Width**: 12 columns (0 and 11 are walls, 1-10 are playable)
//! - **Height**: 22 rows (21 is the floor, 0-20 are playable)
//! - **Spawn row**: 0, pieces centered around column 6
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STARTING_INTERVAL_MS` | 1000 | Gravity interval at the start of a round |
//! | `MIN_INTERVAL_MS` | 100 | Floor for the gravity interval |
//! | `SPEEDUP_FACTOR` | 0.95 | Interval multiplier per squared cleared row |
//! | `POLL_INTERVAL_MS` | 1 | Main loop poll cycle |
//! | `HOLD_THRESHOLD` | 200 | Poll cycles before a held left/right repeats |
//! | `DOWN_HOLD_THRESHOLD` | 20 | Poll cycles before a held down repeats |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Cell, Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Piece kinds double as color tags 1..=7
//! assert_eq!(PieceKind::I.tag(), 1);
//! assert_eq!(PieceKind::from_tag(7), Some(PieceKind::T));
//!
//! // Cells map to and from their small-integer tag
//! assert_eq!(Cell::Wall.tag(), 8);
//! assert_eq!(Cell::from_tag(2), Some(Cell::Block(PieceKind::O)));
//!
//! // Commands parse case-insensitively
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells, walls included (12 columns)
pub const BOARD_WIDTH: usize = 12;

/// Board height in cells, floor included (22 rows)
pub const BOARD_HEIGHT: usize = 22;

/// Preview box width in cells, border included
pub const PREVIEW_WIDTH: usize = 8;

/// Preview box height in cells, border included
pub const PREVIEW_HEIGHT: usize = 8;

/// Number of distinct piece kinds
pub const NUM_PIECE_KINDS: usize = 7;

/// Tag stored in wall, floor and preview border cells
pub const WALL_TAG: u8 = 8;

/// Gravity interval at the start of a round (1000ms = 1 second per row)
pub const STARTING_INTERVAL_MS: u64 = 1000;

/// Gravity interval never drops below this (100ms)
pub const MIN_INTERVAL_MS: u64 = 100;

/// The interval is multiplied by this once per squared cleared row
pub const SPEEDUP_FACTOR: f64 = 0.95;

/// Main loop poll cycle in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1;

/// Poll cycles a left/right key must be held before it repeats
pub const HOLD_THRESHOLD: u32 = 200;

/// Poll cycles the down key must be held before it repeats
pub const DOWN_HOLD_THRESHOLD: u32 = 20;


/// The seven piece kinds
///
/// Each kind doubles as the color tag of its cells (1..=7), in the order the
/// catalog defines them:
/// - **I**: horizontal bar (tag 1)
/// - **O**: 2x2 square (tag 2)
/// - **J**: bar with a foot on the right (tag 3)
/// - **L**: bar with a foot on the left (tag 4)
/// - **Z**: left-high skew (tag 5)
/// - **S**: right-high skew (tag 6)
/// - **T**: bar with a center foot (tag 7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    Z,
    S,
    T,
}

impl PieceKind {
    /// All kinds in tag order.
    pub const ALL: [PieceKind; NUM_PIECE_KINDS] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Zero-based position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        (self.tag() - 1) as usize
    }

    /// Kind at a zero-based index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= NUM_PIECE_KINDS`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Cell tag (1..=7) used by the grid and the render palette
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::Z => 5,
            PieceKind::S => 6,
            PieceKind::T => 7,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1..=7 => Some(Self::ALL[(tag - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }
}

/// A cell on any grid (board, active piece, preview)
///
/// Only one non-empty source may occupy a position in the combined view of the
/// settled grid and the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Part of a piece, falling or settled
    Block(PieceKind),
    /// Wall, floor, or preview border
    Wall,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Small-integer tag: 0 empty, 1..=7 piece, 8 wall
    pub fn tag(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Block(kind) => kind.tag(),
            Cell::Wall => WALL_TAG,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Cell::Empty),
            WALL_TAG => Some(Cell::Wall),
            t => PieceKind::from_tag(t).map(Cell::Block),
        }
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Block(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Discrete commands a session accepts
///
/// Produced by key presses (and by held-key repeats for the movement commands).
/// Quitting is not a session command; the main loop handles it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Move piece one row down, landing it if blocked
    DropStep,
    /// Abort the round and start a new one
    Restart,
    /// Replace the active piece with the next one
    SpawnNow,
    /// Land the active piece where it is
    ConnectNow,
}

impl Command {
    /// Parse command from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("dropStep"), Some(Command::DropStep));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "dropstep" => Some(Command::DropStep),
            "restart" => Some(Command::Restart),
            "spawnnow" => Some(Command::SpawnNow),
            "connectnow" => Some(Command::ConnectNow),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::DropStep => "dropStep",
            Command::Restart => "restart",
            Command::SpawnNow => "spawnNow",
            Command::ConnectNow => "connectNow",
        }
    }
}

/// Directions currently held down, sampled once per poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

impl HeldDirections {
    pub fn any(&self) -> bool {
        self.left || self.right || self.down
    }
}
