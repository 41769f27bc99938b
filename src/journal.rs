//! Session journal - line-delimited JSON records of session events.
//!
//! One object per line, each with a sequence number, a millisecond
//! timestamp and a `type` tag:
//!
//! ```text
//! {"seq":1,"ts":1734000000000,"type":"round_started","round":1,"rng_state":42}
//! {"seq":2,"ts":1734000000001,"type":"piece_spawned","kind":"t"}
//! {"seq":3,"ts":1734000004210,"type":"piece_locked","kind":"t","rows_cleared":0,"score":0}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::SessionEvent;

/// Serialized form of a [`SessionEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    RoundStarted {
        round: u32,
        rng_state: u32,
    },
    PieceSpawned {
        kind: &'static str,
    },
    PieceLocked {
        kind: &'static str,
        rows_cleared: u32,
        score: u32,
    },
    SpeedChanged {
        interval_ms: u32,
    },
    RoundOver {
        round: u32,
        score: u32,
        pieces_locked: u32,
    },
}

impl From<SessionEvent> for EventRecord {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::RoundStarted { round, rng_state } => Self::RoundStarted { round, rng_state },
            SessionEvent::PieceSpawned { kind } => Self::PieceSpawned {
                kind: kind.as_str(),
            },
            SessionEvent::PieceLocked {
                kind,
                rows_cleared,
                score,
            } => Self::PieceLocked {
                kind: kind.as_str(),
                rows_cleared,
                score,
            },
            SessionEvent::SpeedChanged { interval_ms } => Self::SpeedChanged { interval_ms },
            SessionEvent::RoundOver {
                round,
                score,
                pieces_locked,
            } => Self::RoundOver {
                round,
                score,
                pieces_locked,
            },
        }
    }
}

/// One journal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalLine {
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub event: EventRecord,
}

/// Appends journal lines to a writer
pub struct Journal<W: Write> {
    out: W,
    buf: Vec<u8>,
    seq: u64,
}

impl Journal<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            seq: 0,
        }
    }

    pub fn record(&mut self, ts: u64, event: SessionEvent) -> Result<()> {
        self.seq += 1;
        let line = JournalLine {
            seq: self.seq,
            ts,
            event: event.into(),
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &line)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf).context("write journal line")?;
        Ok(())
    }

    pub fn record_all(&mut self, ts: u64, events: impl IntoIterator<Item = SessionEvent>) -> Result<()> {
        for event in events {
            self.record(ts, event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush journal")?;
        Ok(())
    }

    /// Lines written so far
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Wall-clock milliseconds since the Unix epoch
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn lines(journal: Journal<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = journal.into_inner();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_tagged_json_lines() {
        let mut journal = Journal::new(Vec::new());
        journal
            .record(
                1000,
                SessionEvent::RoundStarted {
                    round: 1,
                    rng_state: 7,
                },
            )
            .unwrap();
        journal
            .record(
                1001,
                SessionEvent::PieceLocked {
                    kind: PieceKind::S,
                    rows_cleared: 2,
                    score: 4,
                },
            )
            .unwrap();
        assert_eq!(journal.len(), 2);

        let v = lines(journal);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0]["seq"], 1);
        assert_eq!(v[0]["ts"], 1000);
        assert_eq!(v[0]["type"], "round_started");
        assert_eq!(v[0]["rng_state"], 7);
        assert_eq!(v[1]["type"], "piece_locked");
        assert_eq!(v[1]["kind"], "s");
        assert_eq!(v[1]["rows_cleared"], 2);
        assert_eq!(v[1]["score"], 4);
    }

    #[test]
    fn test_record_all_keeps_order() {
        let mut journal = Journal::new(Vec::new());
        journal
            .record_all(
                5,
                [
                    SessionEvent::SpeedChanged { interval_ms: 950 },
                    SessionEvent::RoundOver {
                        round: 3,
                        score: 12,
                        pieces_locked: 40,
                    },
                ],
            )
            .unwrap();

        let v = lines(journal);
        assert_eq!(v[0]["type"], "speed_changed");
        assert_eq!(v[0]["interval_ms"], 950);
        assert_eq!(v[1]["type"], "round_over");
        assert_eq!(v[1]["seq"], 2);
        assert_eq!(v[1]["pieces_locked"], 40);
    }

    #[test]
    fn test_open_appends_to_file() {
        let path = std::env::temp_dir().join(format!(
            "tui-blockfall-journal-{}.jsonl",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        for _ in 0..2 {
            let mut journal = Journal::open(&path).unwrap();
            journal
                .record(0, SessionEvent::PieceSpawned { kind: PieceKind::I })
                .unwrap();
            journal.flush().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.contains("\"kind\":\"i\"")));
    }
}
