//! Terminal blockfall runner (default binary).
//!
//! One loop owns everything. Each poll cycle it applies key events and
//! gravity ticks in arrival order, then held-key repeats, then redraws
//! (throttled) and journals the session events.

use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::config::AppConfig;
use tui_blockfall::core::{FrameClock, GameSession, GameSnapshot};
use tui_blockfall::input::{should_quit, HeldKeys};
use tui_blockfall::journal::{current_timestamp_ms, Journal};
use tui_blockfall::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_blockfall::types::POLL_INTERVAL_MS;

type FileJournal = Journal<BufWriter<File>>;

/// What the loop reports once the player quits
struct RunSummary {
    rounds: u32,
    score: u32,
    pieces_locked: u32,
    journal_error: Option<anyhow::Error>,
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let mut journal = match &config.log_path {
        Some(path) => match Journal::open(path) {
            Ok(j) => Some(j),
            Err(e) => {
                eprintln!("[Journal] {:#}; continuing without a journal", e);
                None
            }
        },
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut journal);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(j) = journal.as_mut() {
        if let Err(e) = j.flush() {
            eprintln!("[Journal] {:#}", e);
        }
    }

    let summary = result?;
    if let Some(e) = summary.journal_error {
        eprintln!("[Journal] {:#}; journal stopped early", e);
    }
    if let Some(j) = journal.as_ref() {
        eprintln!("[Journal] {} records written", j.len());
    }
    eprintln!(
        "[Session] rounds: {}, last score: {}, pieces locked: {}",
        summary.rounds, summary.score, summary.pieces_locked
    );
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    journal: &mut Option<FileJournal>,
) -> Result<RunSummary> {
    let seed = config.seed.unwrap_or_else(time_seed);
    let clock = FrameClock::new(config.session.starting_interval);
    let mut session = GameSession::with_config(seed, clock, config.session);

    let mut keys = HeldKeys::new().with_key_releases(term.key_releases());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::default();
    let mut journal_error = None;

    let started = Instant::now();
    let poll_interval = Duration::from_millis(POLL_INTERVAL_MS);

    loop {
        // Discrete input, in arrival order, until this cycle's deadline.
        let deadline = Instant::now() + poll_interval;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            let ev = event::read()?;
            // A tick that fell due before this event goes first.
            apply_due_tick(&mut session, Instant::now());
            match ev {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(RunSummary {
                                rounds: session.round(),
                                score: session.score(),
                                pieces_locked: session.pieces_locked(),
                                journal_error,
                            });
                        }
                        if let Some(command) = keys.handle_key_press(key) {
                            session.on_command(command);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Held keys repeat through the session's hold counters.
                    }
                    KeyEventKind::Release => keys.handle_key_release(key),
                },
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.force();
                }
                // Releases for keys held at this point will never arrive.
                Event::FocusLost => keys.reset(),
                _ => {}
            }
        }

        apply_due_tick(&mut session, Instant::now());

        // Held-key repeats, once per poll cycle.
        session.on_held(keys.held());

        // Render.
        session.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&snap)) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Journal.
        let events = session.drain_events();
        if let Some(j) = journal.as_mut() {
            if let Err(e) = j.record_all(current_timestamp_ms(), events) {
                journal_error = Some(e);
                *journal = None;
            }
        }
    }
}

/// Apply one gravity tick if the clock says one is due at `now`.
fn apply_due_tick(session: &mut GameSession<FrameClock>, now: Instant) -> bool {
    if session.clock_mut().poll_at(now) {
        session.on_tick();
        true
    } else {
        false
    }
}

fn fingerprint(snap: &GameSnapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    snap.hash(&mut hasher);
    hasher.finish()
}

fn time_seed() -> u32 {
    let ms = current_timestamp_ms();
    (ms ^ (ms >> 32)) as u32
}
