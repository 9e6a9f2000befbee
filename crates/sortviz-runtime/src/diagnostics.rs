#![forbid(unsafe_code)]

//! Bounded, sequence-numbered log of player events.
//!
//! Entries serialize as one JSON object per line with an `event` tag, so an
//! exported session can be replayed or grepped without the player.

use std::collections::VecDeque;
use std::io;

use serde::Serialize;
use sortviz_core::Algorithm;

/// Which player events get recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Master switch.
    pub enabled: bool,
    /// Maximum entries retained; older entries are evicted first.
    pub max_entries: usize,
    /// Record step navigation (manual and tick-driven).
    pub log_navigation: bool,
    /// Record play/pause/finish transitions.
    pub log_playback: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 500,
            log_navigation: true,
            log_playback: true,
        }
    }
}

/// A single player event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEntry {
    /// The current step moved.
    Navigation {
        seq: u64,
        action: &'static str,
        from: usize,
        to: usize,
        steps: usize,
    },
    /// Playback state transition.
    Playback {
        seq: u64,
        from: &'static str,
        to: &'static str,
        step: usize,
    },
    /// A new trace replaced the previous one.
    Trace {
        seq: u64,
        algorithm: Algorithm,
        elements: usize,
        steps: usize,
    },
    /// Auto-play interval changed.
    Speed { seq: u64, from_ms: u64, to_ms: u64 },
}

impl DiagnosticEntry {
    #[must_use]
    pub fn seq(&self) -> u64 {
        match self {
            Self::Navigation { seq, .. }
            | Self::Playback { seq, .. }
            | Self::Trace { seq, .. }
            | Self::Speed { seq, .. } => *seq,
        }
    }

    /// Serialize to a single JSON line.
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Diagnostic log buffer with bounded capacity.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    entries: VecDeque<DiagnosticEntry>,
    max_entries: usize,
    seq: u64,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1000)),
            max_entries,
            seq: 0,
        }
    }

    /// Get and increment the sequence number.
    pub fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq = self.seq.wrapping_add(1);
        s
    }

    pub fn push(&mut self, entry: DiagnosticEntry) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &VecDeque<DiagnosticEntry> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export to JSONL, one entry per line, no trailing newline.
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        let lines = self
            .entries
            .iter()
            .map(DiagnosticEntry::to_jsonl)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Stream entries as JSONL to `out`, newline-terminated.
    pub fn write_jsonl<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.entries {
            serde_json::to_writer(&mut out, entry)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Clear entries (keeps seq).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
