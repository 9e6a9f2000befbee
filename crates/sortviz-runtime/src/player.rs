#![forbid(unsafe_code)]

//! Playback session over a precomputed trace.
//!
//! The [`Player`] owns the selected algorithm, the input array, the trace
//! produced from them, and a cursor into that trace. Changing either the
//! algorithm or the input recomputes the trace and rewinds to the start.
//!
//! # Invariants
//!
//! 1. **Cursor bounds**: `0 <= current < trace.len()`. Traces always hold at
//!    least the starting step, so the cursor is always valid.
//! 2. **Finished means at the end**: `state == Finished` implies
//!    `is_completed()`, and a session at the end is never `Playing`.
//! 3. **Speed grid**: the interval is always a multiple of [`SPEED_STEP`]
//!    within `[MIN_SPEED, MAX_SPEED]`.
//!
//! # Failure Modes
//!
//! None. Out-of-range navigation clamps, and `play()` at the end is a no-op.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortviz_core::{Algorithm, Element, Step, Trace};
use tracing::{debug, trace};

use crate::diagnostics::{DiagnosticConfig, DiagnosticEntry, DiagnosticLog};

/// Fastest auto-play interval.
pub const MIN_SPEED: Duration = Duration::from_millis(50);
/// Slowest auto-play interval.
pub const MAX_SPEED: Duration = Duration::from_millis(1000);
/// Granularity of speed adjustments.
pub const SPEED_STEP: Duration = Duration::from_millis(25);
pub const DEFAULT_SPEED: Duration = Duration::from_millis(300);

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    /// Auto-play reached the last step.
    Finished,
}

impl PlaybackState {
    /// Human-readable label for display (includes both icon and text).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Paused => "⏸ Paused",
            Self::Playing => "▶ Playing",
            Self::Finished => "■ Finished",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::Playing => "playing",
            Self::Finished => "finished",
        }
    }
}

/// Clamp `speed` into bounds and snap it to the nearest [`SPEED_STEP`].
#[must_use]
pub fn snap_speed(speed: Duration) -> Duration {
    let step = SPEED_STEP.as_millis();
    let ms = speed
        .as_millis()
        .clamp(MIN_SPEED.as_millis(), MAX_SPEED.as_millis());
    let snapped = (ms + step / 2) / step * step;
    Duration::from_millis(u64::try_from(snapped).unwrap_or(u64::MAX))
}

/// Playback session state.
#[derive(Debug, Clone)]
pub struct Player {
    algorithm: Algorithm,
    input: Vec<Element>,
    trace: Arc<Trace>,
    current: usize,
    state: PlaybackState,
    speed: Duration,
    /// Time accrued toward the next auto-play advance.
    accumulated: Duration,
    diagnostic_config: DiagnosticConfig,
    diagnostic_log: DiagnosticLog,
}

impl Player {
    /// Start a paused session at step 0 of `algorithm` over `input`.
    #[must_use]
    pub fn new(algorithm: Algorithm, input: Vec<Element>) -> Self {
        let diagnostic_config = DiagnosticConfig::default();
        let mut player = Self {
            algorithm,
            trace: Arc::new(algorithm.trace(&input)),
            input,
            current: 0,
            state: PlaybackState::Paused,
            speed: DEFAULT_SPEED,
            accumulated: Duration::ZERO,
            diagnostic_log: DiagnosticLog::new(diagnostic_config.max_entries),
            diagnostic_config,
        };
        player.log_trace();
        player
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = snap_speed(speed);
        self
    }

    /// Replace the diagnostic configuration. Clears the log.
    #[must_use]
    pub fn with_diagnostics(mut self, config: DiagnosticConfig) -> Self {
        self.diagnostic_log = DiagnosticLog::new(config.max_entries);
        self.diagnostic_config = config;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn input(&self) -> &[Element] {
        &self.input
    }

    /// Shared handle to the current trace.
    #[must_use]
    pub fn trace(&self) -> &Arc<Trace> {
        &self.trace
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Always false; kept for API symmetry with [`Trace`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.trace.get(self.current)
    }

    /// Description of the current step, or empty when there is none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.current_step().map_or("", |s| s.description.as_str())
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// True once the cursor sits on the last step.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.current + 1 >= self.trace.len()
    }

    /// `(current + 1) / len * 100`, or 0 for an empty trace.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let len = self.trace.len();
        if len == 0 {
            return 0.0;
        }
        (self.current + 1) as f64 / len as f64 * 100.0
    }

    /// Auto-play time left until the last step.
    #[must_use]
    pub fn remaining_time(&self) -> Duration {
        let remaining = self.trace.len().saturating_sub(1).saturating_sub(self.current);
        self.speed
            .saturating_mul(u32::try_from(remaining).unwrap_or(u32::MAX))
    }

    /// Time until `tick` would next advance, or `None` when not playing.
    #[must_use]
    pub fn time_until_next_step(&self) -> Option<Duration> {
        (self.state == PlaybackState::Playing).then(|| self.speed.saturating_sub(self.accumulated))
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Switch algorithm. Recomputes the trace and rewinds.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        self.recompute();
    }

    /// Replace the input array. Recomputes the trace and rewinds.
    pub fn set_input(&mut self, input: Vec<Element>) {
        self.input = input;
        self.recompute();
    }

    fn recompute(&mut self) {
        let from_state = self.state.label();
        self.trace = Arc::new(self.algorithm.trace(&self.input));
        self.current = 0;
        self.accumulated = Duration::ZERO;
        self.state = PlaybackState::Paused;
        self.log_trace();
        if from_state != self.state.label() {
            self.log_playback(from_state);
        }
    }

    /// Set the auto-play interval, clamped and snapped to the grid.
    pub fn set_speed(&mut self, speed: Duration) {
        let from = self.speed;
        self.speed = snap_speed(speed);
        if from != self.speed {
            self.log_speed(from);
        }
    }

    /// One grid step shorter interval.
    pub fn faster(&mut self) {
        self.set_speed(self.speed.saturating_sub(SPEED_STEP));
    }

    /// One grid step longer interval.
    pub fn slower(&mut self) {
        self.set_speed(self.speed.saturating_add(SPEED_STEP));
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Start auto-play. No-op when already at the last step.
    pub fn play(&mut self) {
        if self.is_completed() || self.state == PlaybackState::Playing {
            return;
        }
        let from_state = self.state.label();
        self.state = PlaybackState::Playing;
        self.accumulated = Duration::ZERO;
        self.log_playback(from_state);
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let from_state = self.state.label();
        self.state = PlaybackState::Paused;
        self.log_playback(from_state);
    }

    /// Toggle play/pause.
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Finished => self.play(),
        }
    }

    /// Feed elapsed wall time. Returns the number of steps advanced.
    ///
    /// While playing, every full `speed` interval advances one step; leftover
    /// time carries into the next call. Reaching the last step finishes
    /// playback.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if self.state != PlaybackState::Playing {
            return 0;
        }
        let from = self.current;
        self.accumulated = self.accumulated.saturating_add(elapsed);

        let mut advanced = 0;
        while self.accumulated >= self.speed && !self.is_completed() {
            self.accumulated -= self.speed;
            self.current += 1;
            advanced += 1;
        }
        trace!(elapsed_ms = elapsed.as_millis() as u64, advanced, "player tick");

        if advanced > 0 {
            self.log_navigation("tick", from);
        }
        if self.is_completed() {
            self.accumulated = Duration::ZERO;
            self.settle();
        }
        advanced
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Step to next step.
    pub fn step_forward(&mut self) {
        let from = self.current;
        self.current = (self.current + 1).min(self.last_index());
        self.after_navigation("step_forward", from);
    }

    /// Step to previous step.
    pub fn step_backward(&mut self) {
        let from = self.current;
        self.current = self.current.saturating_sub(1);
        self.after_navigation("step_backward", from);
    }

    /// Jump to first step.
    pub fn go_to_start(&mut self) {
        let from = self.current;
        self.current = 0;
        self.after_navigation("go_start", from);
    }

    /// Jump to last step.
    pub fn go_to_end(&mut self) {
        let from = self.current;
        self.current = self.last_index();
        self.after_navigation("go_end", from);
    }

    /// Jump to `index`, clamped to the trace.
    pub fn seek(&mut self, index: usize) {
        let from = self.current;
        self.current = index.min(self.last_index());
        self.after_navigation("seek", from);
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    fn after_navigation(&mut self, action: &'static str, from: usize) {
        self.accumulated = Duration::ZERO;
        self.log_navigation(action, from);
        self.settle();
    }

    /// Reconcile the playback state with the cursor position.
    fn settle(&mut self) {
        let from_state = self.state.label();
        let next = match (self.state, self.is_completed()) {
            (PlaybackState::Playing, true) => PlaybackState::Finished,
            (PlaybackState::Finished, false) => PlaybackState::Paused,
            (state, _) => state,
        };
        if next != self.state {
            self.state = next;
            self.log_playback(from_state);
        }
    }

    // ========================================================================
    // Diagnostic Logging Helpers
    // ========================================================================

    fn log_navigation(&mut self, action: &'static str, from: usize) {
        if !self.diagnostic_config.enabled || !self.diagnostic_config.log_navigation {
            return;
        }
        let seq = self.diagnostic_log.next_seq();
        self.diagnostic_log.push(DiagnosticEntry::Navigation {
            seq,
            action,
            from,
            to: self.current,
            steps: self.trace.len(),
        });
    }

    fn log_playback(&mut self, from_state: &'static str) {
        debug!(from = from_state, to = self.state.label(), step = self.current, "playback state");
        if !self.diagnostic_config.enabled || !self.diagnostic_config.log_playback {
            return;
        }
        let seq = self.diagnostic_log.next_seq();
        self.diagnostic_log.push(DiagnosticEntry::Playback {
            seq,
            from: from_state,
            to: self.state.label(),
            step: self.current,
        });
    }

    fn log_trace(&mut self) {
        debug!(
            algorithm = self.algorithm.key(),
            elements = self.input.len(),
            steps = self.trace.len(),
            "trace computed"
        );
        if !self.diagnostic_config.enabled {
            return;
        }
        let seq = self.diagnostic_log.next_seq();
        self.diagnostic_log.push(DiagnosticEntry::Trace {
            seq,
            algorithm: self.algorithm,
            elements: self.input.len(),
            steps: self.trace.len(),
        });
    }

    fn log_speed(&mut self, from: Duration) {
        if !self.diagnostic_config.enabled {
            return;
        }
        let seq = self.diagnostic_log.next_seq();
        self.diagnostic_log.push(DiagnosticEntry::Speed {
            seq,
            from_ms: duration_ms(from),
            to_ms: duration_ms(self.speed),
        });
    }

    /// Get the diagnostic log (for testing/inspection).
    #[must_use]
    pub fn diagnostic_log(&self) -> &DiagnosticLog {
        &self.diagnostic_log
    }

    /// Export diagnostic log to JSONL format.
    pub fn export_diagnostics(&self) -> serde_json::Result<String> {
        self.diagnostic_log.to_jsonl()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
