#![forbid(unsafe_code)]

//! Runtime: playback sessions over SortViz traces.
//!
//! # Role in SortViz
//! `sortviz-runtime` turns an immutable [`sortviz_core::Trace`] into an
//! interactive session. It owns the cursor, the play/pause state machine and
//! the auto-play interval, and it records what happened in a bounded
//! diagnostic log.
//!
//! # Primary responsibilities
//! - **Player**: navigation, tick-driven auto-play, progress reporting.
//! - **Diagnostics**: sequence-numbered JSONL event log.
//! - **Config**: TOML/JSON loading, environment overrides, validation.
//!
//! # How it fits in the system
//! Front ends (the `sortviz` CLI) build a [`Player`] from a
//! [`VisualizerConfig`], forward key presses and elapsed time to it, and
//! render `player.current_step()`. The runtime never touches the terminal.

pub mod config;
pub mod diagnostics;
pub mod player;

pub use config::{ConfigError, VisualizerConfig};
pub use diagnostics::{DiagnosticConfig, DiagnosticEntry, DiagnosticLog};
pub use player::{
    DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, PlaybackState, Player, SPEED_STEP, snap_speed,
};
