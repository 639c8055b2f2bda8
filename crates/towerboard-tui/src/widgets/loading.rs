// Loading indicator: three dots pulsing inside an empty group box.

use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::theme::{self, metrics};
use crate::ViewState;

pub const DOT: &str = "●";

/// Length of one fade-out/fade-in cycle.
const CYCLE: Duration = Duration::from_secs(1);

/// Phase lead of each dot, in seconds, left to right.
const DOT_OFFSETS: [f32; 3] = [0.4, 0.2, 0.0];

/// Render the loading group at the top of `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, wide: bool) {
    if area.is_empty() {
        return;
    }

    let height = metrics(wide).loader_height.min(area.height);
    let rect = Rect { height, ..area };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::GROUP_BORDER))
        .style(Style::default().bg(theme::GROUP_BG));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    if inner.is_empty() {
        return;
    }

    let row = Rect {
        y: inner.y + inner.height / 2,
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(dots_line(state.animation_elapsed, wide)).centered(),
        row,
    );
}

/// The three dots at their current opacity.
pub fn dots_line(elapsed: Duration, wide: bool) -> Line<'static> {
    let separator = if wide { "  " } else { " " };
    let mut spans = Vec::with_capacity(DOT_OFFSETS.len() * 2);
    for dot in 0..DOT_OFFSETS.len() {
        if dot > 0 {
            spans.push(Span::raw(separator));
        }
        let color = theme::fade_on_white(theme::LOADER_DOT, dot_opacity(elapsed, dot));
        spans.push(Span::styled(DOT, Style::default().fg(color)));
    }
    Line::from(spans)
}

/// Opacity of dot `dot` at `elapsed`: fades out over the first half of the
/// cycle and back in over the second.
pub fn dot_opacity(elapsed: Duration, dot: usize) -> f32 {
    let offset = DOT_OFFSETS.get(dot).copied().unwrap_or(0.0);
    let cycle = CYCLE.as_secs_f32();
    let phase = ((elapsed.as_secs_f32() + offset) % cycle) / cycle;
    if phase < 0.5 {
        1.0 - ease(phase * 2.0)
    } else {
        ease((phase - 0.5) * 2.0)
    }
}

fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
