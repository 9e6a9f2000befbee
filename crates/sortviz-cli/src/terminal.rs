//! Interactive player on a raw-mode alternate screen.
//!
//! # Invariants
//!
//! 1. **Terminal restored on every exit path**: [`TerminalGuard`] leaves the
//!    alternate screen and disables raw mode in `Drop`, so `?` and panics
//!    (with unwinding) both restore the terminal.
//! 2. **Elapsed time is charged before input**: each loop iteration ticks the
//!    player with the time since the previous iteration before applying a
//!    key, so starting playback never consumes time spent paused.
//!
//! # Keybindings
//!
//! - Space: Play/pause
//! - Left/Right: Step backward/forward
//! - Home/End: Jump to first/last step
//! - +/-: Faster/slower auto-play
//! - A: Switch algorithm
//! - N: Generate a new array
//! - Q / Esc / Ctrl+C: Quit

use std::io::{self, Write};
use std::ops::ControlFlow;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use sortviz_runtime::{Player, VisualizerConfig};
use tracing::{info, warn};
use web_time::{Duration, Instant};

use crate::error::Result;
use crate::render::{RenderOptions, render_frame};

/// Poll interval while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Lines of the frame that are not bars.
const FRAME_CHROME_ROWS: usize = 10;

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlayback,
    StepForward,
    StepBackward,
    GoToStart,
    GoToEnd,
    Faster,
    Slower,
    SwitchAlgorithm,
    NewArray,
    Quit,
}

/// Map a key event to an action. Releases and repeats of non-navigation
/// keys are ignored.
#[must_use]
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char(' ') => Action::TogglePlayback,
        KeyCode::Right => Action::StepForward,
        KeyCode::Left => Action::StepBackward,
        KeyCode::Home => Action::GoToStart,
        KeyCode::End => Action::GoToEnd,
        KeyCode::Char('+' | '=') => Action::Faster,
        KeyCode::Char('-' | '_') => Action::Slower,
        KeyCode::Char('a' | 'A') => Action::SwitchAlgorithm,
        KeyCode::Char('n' | 'N') => Action::NewArray,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    let repeatable = matches!(action, Action::StepForward | Action::StepBackward);
    if key.kind == KeyEventKind::Repeat && !repeatable {
        return None;
    }
    Some(action)
}

/// The player plus what is needed to regenerate its input.
#[derive(Debug)]
pub struct Session {
    player: Player,
    config: VisualizerConfig,
    generation: u64,
}

impl Session {
    #[must_use]
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            player: config.player(),
            config,
            generation: 0,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.player.tick(elapsed)
    }

    pub fn apply(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::TogglePlayback => self.player.toggle_playback(),
            Action::StepForward => self.player.step_forward(),
            Action::StepBackward => self.player.step_backward(),
            Action::GoToStart => self.player.go_to_start(),
            Action::GoToEnd => self.player.go_to_end(),
            Action::Faster => self.player.faster(),
            Action::Slower => self.player.slower(),
            Action::SwitchAlgorithm => {
                let next = self.player.algorithm().next();
                self.player.set_algorithm(next);
            }
            Action::NewArray => self.regenerate(),
            Action::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Replace the input with a freshly generated array.
    ///
    /// A seeded session stays reproducible: the n-th regeneration uses
    /// `seed + n`.
    fn regenerate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let config = VisualizerConfig {
            values: None,
            seed: self.config.seed.map(|seed| seed.wrapping_add(generation)),
            ..self.config.clone()
        };
        let errors = config.validate();
        if !errors.is_empty() {
            warn!(?errors, "cannot generate a new array from this configuration");
            return;
        }
        self.player.set_input(config.input_elements());
    }
}

/// Raw mode plus alternate screen, restored on drop.
pub struct TerminalGuard {
    out: io::Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(error) = execute!(out, EnterAlternateScreen, Clear(ClearType::All), Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(error);
        }
        Ok(Self { out })
    }

    /// Replace the screen contents with `lines`.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.out.flush();
    }
}

/// Bar height that fits in `rows` terminal rows, capped at `requested`.
#[must_use]
pub fn fit_height(requested: usize, rows: u16) -> usize {
    usize::from(rows)
        .saturating_sub(FRAME_CHROME_ROWS)
        .clamp(1, requested.max(1))
}

/// Run the interactive player until the user quits. Returns the final
/// player so callers can export its diagnostics.
pub fn run_interactive(config: VisualizerConfig, options: RenderOptions) -> Result<Player> {
    let mut session = Session::new(config);
    let mut guard = TerminalGuard::enter()?;
    info!(
        algorithm = session.player().algorithm().key(),
        elements = session.player().input().len(),
        "interactive session started"
    );

    let mut last = Instant::now();
    loop {
        let (_, rows) = terminal::size()?;
        let frame_options = RenderOptions {
            height: fit_height(options.height, rows),
            ..options
        };
        guard.draw(&render_frame(session.player(), frame_options))?;

        let timeout = session
            .player()
            .time_until_next_step()
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));
        let pending = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        let now = Instant::now();
        session.tick(now.duration_since(last));
        last = now;

        if let Some(Event::Key(key)) = pending
            && let Some(action) = action_for(&key)
            && session.apply(action).is_break()
        {
            break;
        }
    }

    drop(guard);
    info!("interactive session ended");
    Ok(session.player)
}
