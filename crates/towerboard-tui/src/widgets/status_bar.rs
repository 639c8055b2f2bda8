// Status bar: load status and record count on the left, key hints on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use towerboard_core::ranking::ViewMode;
use towerboard_core::state::LoadState;

use crate::ViewState;

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if area.is_empty() {
        return;
    }

    let style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let help = help_text(state);
    let help_width = (help.chars().count() as u16 + 1).min(area.width);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(help_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(format!(" {}", status_text(state)))).style(style),
        columns[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(help).right_aligned()).style(style),
        columns[1],
    );
}

/// Left-hand text: where the load stands and, while searching, the hit count.
pub fn status_text(state: &ViewState) -> String {
    let mut text = match &state.load {
        LoadState::Idle | LoadState::Loading => "Loading leaderboard…".to_string(),
        LoadState::Failed { .. } => "Load failed".to_string(),
        LoadState::Loaded {
            records,
            fetched_at,
        } => format!(
            "{} players · updated {}",
            records.len(),
            fetched_at.format("%H:%M:%S")
        ),
    };

    if state.load.is_settled() {
        let view = state.derived_view();
        if view.mode == ViewMode::Search {
            text.push_str(&format!(
                " · search \"{}\": {} found",
                state.search_text,
                view.len()
            ));
        }
    }
    text
}

/// Right-hand key hints for the current input mode.
pub fn help_text(state: &ViewState) -> String {
    if state.search_focused {
        "type to filter · Enter done · Esc close · ^C quit".to_string()
    } else {
        "/ search · ↑↓ scroll · q quit".to_string()
    }
}
