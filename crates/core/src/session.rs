//! Session module - one round of play from reset to game over
//!
//! [`GameSession`] ties the board, the piece catalog and the RNG together and
//! owns the gravity [`Clock`]. Callers feed it three kinds of input, all on
//! one thread:
//!
//! - [`GameSession::on_tick`] for every gravity tick the clock reports
//! - [`GameSession::on_command`] for every discrete command, in arrival order
//! - [`GameSession::on_held`] once per poll cycle with the held directions
//!
//! Whenever the gravity interval changes the session pushes the new value to
//! its clock. Notable transitions are queued as [`SessionEvent`]s for the
//! journal.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::catalog::PieceCatalog;
use crate::clock::Clock;
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_score, next_fall_interval};
use crate::snapshot::GameSnapshot;
use crate::types::{
    Command, HeldDirections, PieceKind, DOWN_HOLD_THRESHOLD, HOLD_THRESHOLD, MIN_INTERVAL_MS,
    STARTING_INTERVAL_MS,
};

/// Events kept between drains; later events are dropped when full
pub const EVENT_CAPACITY: usize = 32;

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub starting_interval: Duration,
    pub min_interval: Duration,
    /// Poll cycles before a held left/right repeats
    pub hold_threshold: u32,
    /// Poll cycles before a held down repeats
    pub down_hold_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_interval: Duration::from_millis(STARTING_INTERVAL_MS),
            min_interval: Duration::from_millis(MIN_INTERVAL_MS),
            hold_threshold: HOLD_THRESHOLD,
            down_hold_threshold: DOWN_HOLD_THRESHOLD,
        }
    }
}

/// Something worth recording happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    RoundStarted { round: u32, rng_state: u32 },
    PieceSpawned { kind: PieceKind },
    PieceLocked {
        kind: PieceKind,
        rows_cleared: u32,
        score: u32,
    },
    SpeedChanged { interval_ms: u32 },
    RoundOver {
        round: u32,
        score: u32,
        pieces_locked: u32,
    },
}

/// Press-and-hold repeat counter for one direction
#[derive(Debug, Clone, Copy, Default)]
struct HoldCounter(u32);

impl HoldCounter {
    /// Count one poll cycle; true when the hold crosses `threshold`
    fn poll(&mut self, held: bool, threshold: u32) -> bool {
        if !held {
            self.0 = 0;
            return false;
        }
        self.0 += 1;
        if self.0 > threshold {
            self.0 = 0;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HoldCounters {
    left: HoldCounter,
    right: HoldCounter,
    down: HoldCounter,
}

/// One round of play plus everything needed to start the next
#[derive(Debug, Clone)]
pub struct GameSession<C: Clock> {
    board: Board,
    catalog: PieceCatalog,
    rng: SimpleRng,
    clock: C,
    config: SessionConfig,
    score: u32,
    rows_cleared: u32,
    pieces_locked: u32,
    fall_interval: Duration,
    /// Kind of the most recently spawned piece
    current: PieceKind,
    next: PieceKind,
    playing: bool,
    round: u32,
    held: HoldCounters,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl<C: Clock> GameSession<C> {
    /// Start a session with default tunables; the first round begins at once
    pub fn new(seed: u32, clock: C) -> Self {
        Self::with_config(seed, clock, SessionConfig::default())
    }

    pub fn with_config(seed: u32, clock: C, config: SessionConfig) -> Self {
        let mut session = Self {
            board: Board::new(),
            catalog: PieceCatalog::new(),
            rng: SimpleRng::new(seed),
            clock,
            config,
            score: 0,
            rows_cleared: 0,
            pieces_locked: 0,
            fall_interval: config.starting_interval,
            current: PieceKind::I,
            next: PieceKind::I,
            playing: false,
            round: 0,
            held: HoldCounters::default(),
            events: ArrayVec::new(),
        };
        session.reset();
        session
    }

    /// Begin a new round: clear the board, reset score and speed, spawn
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.rows_cleared = 0;
        self.pieces_locked = 0;
        self.fall_interval = self.config.starting_interval;
        self.clock.set_interval(self.fall_interval);
        self.held = HoldCounters::default();
        self.round += 1;
        self.playing = true;
        self.emit(SessionEvent::RoundStarted {
            round: self.round,
            rng_state: self.rng.state(),
        });

        self.next = self.rng.next_kind();
        self.spawn_next();
    }

    /// Gravity: move the piece down a row, landing it if it cannot move
    pub fn on_tick(&mut self) {
        if !self.playing {
            return;
        }
        self.step_down();
    }

    /// Apply a discrete command.
    ///
    /// Returns true if the command changed anything. Once the round is over
    /// only [`Command::Restart`] has an effect.
    pub fn on_command(&mut self, command: Command) -> bool {
        match command {
            Command::Restart => {
                self.reset();
                true
            }
            _ if !self.playing => false,
            Command::MoveLeft => self.board.attempt_translate(-1, 0),
            Command::MoveRight => self.board.attempt_translate(1, 0),
            Command::Rotate => self.board.attempt_rotate(),
            Command::DropStep => {
                self.step_down();
                true
            }
            Command::SpawnNow => {
                self.spawn_next();
                true
            }
            Command::ConnectNow => {
                self.connect();
                true
            }
        }
    }

    /// Count held directions for this poll cycle and repeat moves that have
    /// been held past their threshold.
    pub fn on_held(&mut self, held: HeldDirections) {
        if !self.playing {
            self.held = HoldCounters::default();
            return;
        }
        if self.held.down.poll(held.down, self.config.down_hold_threshold) {
            self.step_down();
        }
        if self.held.left.poll(held.left, self.config.hold_threshold) && self.playing {
            self.board.attempt_translate(-1, 0);
        }
        if self.held.right.poll(held.right, self.config.hold_threshold) && self.playing {
            self.board.attempt_translate(1, 0);
        }
    }

    /// Land the active piece, score any cleared rows, then spawn the next
    /// piece or end the round.
    pub fn connect(&mut self) {
        if !self.playing {
            return;
        }
        let outcome = self.board.merge_and_clear();
        let rows = outcome.rows_cleared();
        self.pieces_locked += 1;

        if rows > 0 {
            self.score += line_clear_score(rows);
            self.rows_cleared += rows;
            self.fall_interval = next_fall_interval(self.fall_interval, rows, self.config.min_interval);
            self.clock.set_interval(self.fall_interval);
            self.emit(SessionEvent::SpeedChanged {
                interval_ms: self.fall_interval.as_millis() as u32,
            });
        }
        self.emit(SessionEvent::PieceLocked {
            kind: self.current,
            rows_cleared: rows,
            score: self.score,
        });

        if outcome.game_over {
            self.end_round();
        } else {
            self.spawn_next();
        }
    }

    fn step_down(&mut self) {
        if !self.board.attempt_translate(0, 1) {
            self.connect();
        }
    }

    /// Promote the queued kind to the active piece and queue a new one.
    /// A spawn that overlaps settled blocks ends the round.
    fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.rng.next_kind();
        self.current = kind;
        if self.board.spawn(self.catalog.template(kind)) {
            self.emit(SessionEvent::PieceSpawned { kind });
        } else {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        self.playing = false;
        self.held = HoldCounters::default();
        self.emit(SessionEvent::RoundOver {
            round: self.round,
            score: self.score,
            pieces_locked: self.pieces_locked,
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        let _ = self.events.try_push(event);
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> ArrayVec<SessionEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    /// Choose the kind the next spawn will use (scripted play and tests)
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn current_kind(&self) -> PieceKind {
        self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn game_over(&self) -> bool {
        !self.playing
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.combined().write_tags(&mut out.board);
        out.next = self.next;
        self.catalog.preview(self.next).write_tags(&mut out.preview);
        out.score = self.score;
        out.rows_cleared = self.rows_cleared;
        out.pieces_locked = self.pieces_locked;
        out.round = self.round;
        out.fall_interval_ms = self.fall_interval.as_millis() as u32;
        out.playing = self.playing;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

    #[derive(Debug, Default)]
    struct RecordingClock {
        intervals: Vec<Duration>,
    }

    impl Clock for RecordingClock {
        fn set_interval(&mut self, interval: Duration) {
            self.intervals.push(interval);
        }
    }

    fn session() -> GameSession<RecordingClock> {
        GameSession::new(12345, RecordingClock::default())
    }

    /// Fill interior row `y` except column `gap`
    fn fill_row_except(board: &mut Board, y: usize, gap: usize) {
        for x in 1..BOARD_WIDTH - 1 {
            if x != gap {
                board.set_settled(x, y, Cell::Block(PieceKind::Z));
            }
        }
    }

    /// Replace the active piece with a vertical I in column `x`, resting on
    /// the floor.
    fn drop_vertical_i_into(s: &mut GameSession<RecordingClock>, x: usize) {
        s.set_next(PieceKind::I);
        assert!(s.on_command(Command::SpawnNow));
        // Move down so the bar has room to stand up, then rotate.
        for _ in 0..2 {
            assert!(s.board.attempt_translate(0, 1));
        }
        assert!(s.board.attempt_rotate());
        let col = s.board.active().bounding_box().unwrap().x1;
        let dx = x as i32 - col as i32;
        assert!(s.board.attempt_translate(dx, 0));
        while s.board.attempt_translate(0, 1) {}
    }

    #[test]
    fn test_reset_state() {
        let s = session();
        assert!(s.playing());
        assert_eq!(s.score(), 0);
        assert_eq!(s.round(), 1);
        assert_eq!(s.fall_interval(), Duration::from_millis(1000));
        assert_eq!(s.clock().intervals, vec![Duration::from_millis(1000)]);
        assert!(s.board().has_active());
    }

    #[test]
    fn test_hold_counter_threshold() {
        let mut c = HoldCounter::default();
        for _ in 0..3 {
            assert!(!c.poll(true, 3));
        }
        assert!(c.poll(true, 3));
        assert_eq!(c.0, 0);

        c.poll(true, 3);
        assert!(!c.poll(false, 3));
        assert_eq!(c.0, 0);
    }

    #[test]
    fn test_single_row_clear_scores_and_speeds_up() {
        let mut s = session();
        fill_row_except(s.board_mut(), BOARD_HEIGHT - 2, 1);
        drop_vertical_i_into(&mut s, 1);

        s.connect();
        assert_eq!(s.score(), 1);
        assert_eq!(s.rows_cleared(), 1);
        assert!(s.playing());
        let interval = s.fall_interval().as_secs_f64();
        assert!((interval - 0.95).abs() < 1e-6);
        assert_eq!(s.clock().intervals.len(), 2);
    }

    #[test]
    fn test_four_row_clear_scores_sixteen() {
        let mut s = session();
        for y in BOARD_HEIGHT - 5..BOARD_HEIGHT - 1 {
            fill_row_except(s.board_mut(), y, 10);
        }
        drop_vertical_i_into(&mut s, 10);

        s.connect();
        assert_eq!(s.score(), 16);
        let expected = 0.95f64.powi(16);
        assert!((s.fall_interval().as_secs_f64() - expected).abs() < 1e-6);
        // Only the clear's leftovers remain: nothing but walls.
        let interior_blocks = s
            .board()
            .settled()
            .occupied()
            .filter(|(_, _, c)| matches!(c, Cell::Block(_)))
            .count();
        assert_eq!(interior_blocks, 0);
    }

    #[test]
    fn test_interval_floor_is_respected() {
        let config = SessionConfig {
            starting_interval: Duration::from_millis(105),
            ..SessionConfig::default()
        };
        let mut s = GameSession::with_config(1, RecordingClock::default(), config);
        fill_row_except(s.board_mut(), BOARD_HEIGHT - 2, 5);
        drop_vertical_i_into(&mut s, 5);
        s.connect();
        assert_eq!(s.fall_interval(), Duration::from_millis(100));
        assert_eq!(s.clock().intervals.last(), Some(&Duration::from_millis(100)));
    }

    #[test]
    fn test_events_are_queued_and_drained() {
        let mut s = session();
        let events = s.drain_events();
        assert!(matches!(events[0], SessionEvent::RoundStarted { round: 1, .. }));
        assert!(matches!(events[1], SessionEvent::PieceSpawned { .. }));
        assert!(s.drain_events().is_empty());

        // Landing a piece still in row 0 ends the round.
        s.on_command(Command::ConnectNow);
        let events = s.drain_events();
        assert!(matches!(events[0], SessionEvent::PieceLocked { rows_cleared: 0, .. }));
        assert!(matches!(events[1], SessionEvent::RoundOver { round: 1, .. }));
        assert!(s.game_over());
    }

    #[test]
    fn test_only_restart_works_after_game_over() {
        let mut s = session();
        s.on_command(Command::ConnectNow);
        assert!(s.game_over());

        let before = s.snapshot();
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::Rotate,
            Command::DropStep,
            Command::SpawnNow,
            Command::ConnectNow,
        ] {
            assert!(!s.on_command(cmd));
        }
        s.on_tick();
        s.on_held(HeldDirections {
            left: true,
            right: true,
            down: true,
        });
        assert_eq!(s.snapshot(), before);

        assert!(s.on_command(Command::Restart));
        assert!(s.playing());
        assert_eq!(s.round(), 2);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_held_down_repeats_after_threshold() {
        let mut s = session();
        let top = s.board().active().bounding_box().unwrap().y1;
        let down = HeldDirections {
            down: true,
            ..HeldDirections::default()
        };
        for _ in 0..DOWN_HOLD_THRESHOLD {
            s.on_held(down);
        }
        assert_eq!(s.board().active().bounding_box().unwrap().y1, top);
        s.on_held(down);
        assert_eq!(s.board().active().bounding_box().unwrap().y1, top + 1);
    }

    #[test]
    fn test_release_resets_hold_count() {
        let mut s = session();
        let x = s.board().active().bounding_box().unwrap().x1;
        let left = HeldDirections {
            left: true,
            ..HeldDirections::default()
        };
        for _ in 0..HOLD_THRESHOLD {
            s.on_held(left);
        }
        s.on_held(HeldDirections::default());
        s.on_held(left);
        assert_eq!(s.board().active().bounding_box().unwrap().x1, x);
    }

    #[test]
    fn test_event_queue_overflow_drops_newest() {
        let mut s = session();
        for _ in 0..EVENT_CAPACITY {
            s.on_command(Command::SpawnNow);
        }
        assert_eq!(s.drain_events().len(), EVENT_CAPACITY);
    }
}
