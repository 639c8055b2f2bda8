// Header widget: logo mark in the top-right corner and the centered title.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;
use crate::ViewState;

/// Render the header into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if area.is_empty() {
        return;
    }

    let mut lines = vec![logo_line(&state.settings.logo)];
    lines.extend(title_lines(&state.settings.title));
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn logo_line(logo: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{logo} "),
        Style::default()
            .fg(theme::TITLE)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .right_aligned()
}

/// One centered, bold line per configured title line.
pub fn title_lines(title: &[String]) -> Vec<Line<'static>> {
    let style = Style::default()
        .fg(theme::TITLE)
        .add_modifier(Modifier::BOLD);
    title
        .iter()
        .map(|text| Line::styled(text.clone(), style).centered())
        .collect()
}
