#![forbid(unsafe_code)]

//! Text rendering of steps as vertical bars.
//!
//! Each element becomes a column of glyphs whose height is proportional to
//! its value. Plain output marks state with a glyph per [`ElementState`];
//! colored output draws every bar with `█` and colors it by state.

use crossterm::style::{Color, Stylize};
use sortviz_core::{ElementState, Step};
use sortviz_runtime::Player;

pub const DEFAULT_BAR_HEIGHT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Rows available to the tallest bar.
    pub height: usize,
    /// Emit ANSI colors instead of per-state glyphs.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_BAR_HEIGHT,
            color: false,
        }
    }
}

/// Plain-text glyph for a state.
#[must_use]
pub fn glyph(state: ElementState) -> char {
    match state {
        ElementState::Default => '#',
        ElementState::Comparing => '?',
        ElementState::Swapping => 'x',
        ElementState::Sorted => '=',
        ElementState::Pivot => '+',
    }
}

#[must_use]
pub fn color(state: ElementState) -> Color {
    match state {
        ElementState::Default => Color::Blue,
        ElementState::Comparing => Color::Yellow,
        ElementState::Swapping => Color::Red,
        ElementState::Sorted => Color::Green,
        ElementState::Pivot => Color::Magenta,
    }
}

/// Rows a bar of `value` occupies out of `height`, scaled to `max_value`.
///
/// Every bar gets at least one row.
#[must_use]
pub fn bar_rows(value: i64, max_value: i64, height: usize) -> usize {
    let height = height.max(1);
    if max_value <= 0 || value <= 0 {
        return 1;
    }
    let scaled = (value as f64 / max_value as f64 * height as f64).round() as usize;
    scaled.clamp(1, height)
}

/// Draw `step` as bars with a value row and an index row beneath.
///
/// Columns are as wide as the widest label and separated by one space.
/// Trailing whitespace is trimmed from every line.
#[must_use]
pub fn render_bars(step: &Step, options: RenderOptions) -> Vec<String> {
    if step.is_empty() {
        return vec!["(empty array)".to_string()];
    }
    let height = options.height.max(1);
    let max_value = step.max_value().unwrap_or(0);
    let width = column_width(step);
    let rows: Vec<usize> = step
        .array
        .iter()
        .map(|el| bar_rows(el.value(), max_value, height))
        .collect();

    let mut lines = Vec::with_capacity(height + 2);
    for level in (1..=height).rev() {
        let cells: Vec<String> = step
            .array
            .iter()
            .zip(&rows)
            .map(|(el, &filled)| {
                if filled < level {
                    " ".repeat(width)
                } else if options.color {
                    "█".repeat(width).with(color(el.state())).to_string()
                } else {
                    glyph(el.state()).to_string().repeat(width)
                }
            })
            .collect();
        lines.push(cells.join(" ").trim_end().to_string());
    }

    let values: Vec<String> = step
        .array
        .iter()
        .map(|el| format!("{:>width$}", el.value()))
        .collect();
    lines.push(values.join(" "));
    let indices: Vec<String> = (0..step.len()).map(|i| format!("{i:>width$}")).collect();
    lines.push(indices.join(" "));
    lines
}

fn column_width(step: &Step) -> usize {
    let widest_value = step
        .array
        .iter()
        .map(|el| el.value().to_string().len())
        .max()
        .unwrap_or(1);
    let widest_index = step.len().saturating_sub(1).to_string().len();
    widest_value.max(widest_index).max(1)
}

/// One-line key for the state glyphs (or colors).
#[must_use]
pub fn legend(color_output: bool) -> String {
    ElementState::ALL
        .iter()
        .map(|&state| {
            if color_output {
                format!("{} {}", "█".with(color(state)), state.label())
            } else {
                format!("{} {}", glyph(state), state.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// `Step {n} of {len}: {description}`, 1-based.
#[must_use]
pub fn step_header(index: usize, len: usize, step: &Step) -> String {
    format!("Step {} of {}: {}", index + 1, len, step.description)
}

/// Full interactive screen for the player's current step.
#[must_use]
pub fn render_frame(player: &Player, options: RenderOptions) -> Vec<String> {
    let info = player.algorithm().info();
    let mut lines = vec![
        format!(
            "{}  (time {}, space {})",
            info.name, info.time_complexity, info.space_complexity
        ),
        String::new(),
    ];

    if let Some(step) = player.current_step() {
        lines.extend(render_bars(step, options));
        lines.push(String::new());
        lines.push(step_header(player.current_index(), player.len(), step));
    }

    lines.push(format!(
        "{}  speed {}ms  progress {:.0}%  remaining {:.1}s",
        player.state().label(),
        player.speed().as_millis(),
        player.progress_percent(),
        player.remaining_time().as_secs_f64()
    ));
    lines.push(legend(options.color));
    lines.push(
        "space play/pause  ←/→ step  home/end jump  +/- speed  a algorithm  n new array  q quit"
            .to_string(),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::{Algorithm, Element, ElementId, elements_from_values};

    fn step(values: &[i64]) -> Step {
        Step::new(elements_from_values(values), "test")
    }

    fn plain(height: usize) -> RenderOptions {
        RenderOptions {
            height,
            color: false,
        }
    }

    #[test]
    fn bars_scale_to_max_value() {
        let lines = render_bars(&step(&[1, 2, 4]), plain(4));
        assert_eq!(
            lines,
            vec![
                "    #", //
                "    #",
                "  # #",
                "# # #",
                "1 2 4",
                "0 1 2",
            ]
        );
    }

    #[test]
    fn every_bar_has_at_least_one_row() {
        assert_eq!(bar_rows(1, 1000, 10), 1);
        assert_eq!(bar_rows(0, 10, 10), 1);
        assert_eq!(bar_rows(-5, 10, 10), 1);
        assert_eq!(bar_rows(10, 10, 10), 10);
        assert_eq!(bar_rows(5, 10, 0), 1);
    }

    #[test]
    fn columns_widen_for_long_labels() {
        let lines = render_bars(&step(&[100, 5]), plain(2));
        assert_eq!(lines[2], "100   5");
        assert_eq!(lines[3], "  0   1");
        assert_eq!(lines[1], "### ###");
    }

    #[test]
    fn states_use_distinct_glyphs() {
        let array = vec![
            Element::new(3, ElementId::from_index(0)).with_state(ElementState::Comparing),
            Element::new(3, ElementId::from_index(1)).with_state(ElementState::Sorted),
        ];
        let lines = render_bars(&Step::new(array, "x"), plain(1));
        assert_eq!(lines[0], "? =");
    }

    #[test]
    fn empty_step_renders_placeholder() {
        assert_eq!(render_bars(&step(&[]), plain(5)), vec!["(empty array)"]);
    }

    #[test]
    fn legend_names_every_state() {
        let text = legend(false);
        for state in ElementState::ALL {
            assert!(text.contains(state.label()), "{text}");
        }
        assert!(text.starts_with("# Default"));
    }

    #[test]
    fn colored_output_draws_solid_blocks() {
        let lines = render_bars(
            &step(&[2, 1]),
            RenderOptions {
                height: 2,
                color: true,
            },
        );
        assert!(lines[0].contains('█'));
        assert!(!lines[0].contains('#'));
    }

    #[test]
    fn frame_shows_header_and_status() {
        let player = Player::new(Algorithm::Merge, elements_from_values(&[5, 3, 8, 1]));
        let frame = render_frame(&player, plain(4));
        assert_eq!(frame[0], "Merge Sort  (time O(n log n), space O(n))");
        assert!(
            frame
                .iter()
                .any(|l| l == "Step 1 of 16: Starting Merge Sort algorithm")
        );
        assert!(frame.iter().any(|l| l.starts_with("⏸ Paused  speed 300ms")));
    }
}
