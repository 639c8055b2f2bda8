// Search box widget.
//
// Collapsed: a small box holding the magnifier glyph at the right edge.
// Open: spans the full row and shows the search text (or the placeholder)
// with the terminal cursor at the end of the text while focused.

use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ViewState;

pub const ICON: &str = "⌕";

/// Width of the collapsed box, borders included.
pub const COLLAPSED_WIDTH: u16 = 5;

/// Columns taken by the icon and the space after it.
const ICON_COLUMNS: u16 = 2;

/// Render the search box into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    if area.is_empty() {
        return;
    }

    let rect = box_area(area, state.search_open);
    let border_color = if state.search_focused {
        theme::GROUP_BORDER
    } else {
        theme::SEARCH_ICON
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::GROUP_BG));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    if inner.is_empty() {
        return;
    }

    frame.render_widget(Paragraph::new(search_line(state, inner.width)), inner);

    if state.search_open && state.search_focused {
        frame.set_cursor_position(cursor_position(inner, state));
    }
}

/// The rectangle the box occupies inside `area`.
pub fn box_area(area: Rect, open: bool) -> Rect {
    if open {
        return area;
    }
    let width = COLLAPSED_WIDTH.min(area.width);
    Rect {
        x: area.x + area.width - width,
        width,
        ..area
    }
}

/// Content line for an inner width of `width` columns.
pub fn search_line(state: &ViewState, width: u16) -> Line<'static> {
    if !state.search_open {
        // Highlight the icon while a filter is still applied.
        let color = if state.search_text.is_empty() {
            theme::SEARCH_ICON
        } else {
            theme::GROUP_BORDER
        };
        return Line::from(Span::styled(ICON, Style::default().fg(color))).centered();
    }

    let icon = Span::styled(format!("{ICON} "), Style::default().fg(theme::SEARCH_ICON));
    let available = usize::from(width.saturating_sub(ICON_COLUMNS));

    if state.search_text.is_empty() {
        let placeholder: String = state
            .settings
            .search_placeholder
            .chars()
            .take(available)
            .collect();
        Line::from(vec![
            icon,
            Span::styled(
                placeholder,
                Style::default()
                    .fg(theme::PLACEHOLDER)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        // One column stays free for the cursor.
        let text = visible_tail(&state.search_text, available.saturating_sub(1));
        Line::from(vec![
            icon,
            Span::styled(text, Style::default().fg(theme::ENTRY_TEXT)),
        ])
    }
}

/// The last `width` characters of `text`.
pub fn visible_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

/// Where the cursor sits: right after the visible text.
pub fn cursor_position(inner: Rect, state: &ViewState) -> Position {
    let available = usize::from(inner.width.saturating_sub(ICON_COLUMNS)).saturating_sub(1);
    let shown = visible_tail(&state.search_text, available).chars().count() as u16;
    let x = (inner.x + ICON_COLUMNS + shown).min(inner.right().saturating_sub(1));
    Position::new(x, inner.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_util::row_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn open_state(text: &str) -> ViewState {
        let mut state = ViewState::default();
        state.search_open = true;
        state.search_focused = true;
        state.search_text = text.to_string();
        state
    }

    #[test]
    fn collapsed_box_hugs_the_right_edge() {
        let area = Rect::new(2, 5, 40, 3);
        let rect = box_area(area, false);
        assert_eq!(rect.width, COLLAPSED_WIDTH);
        assert_eq!(rect.right(), area.right());
        assert_eq!(rect.y, area.y);
        assert_eq!(rect.height, area.height);
    }

    #[test]
    fn open_box_fills_the_row() {
        let area = Rect::new(2, 5, 40, 3);
        assert_eq!(box_area(area, true), area);
    }

    #[test]
    fn collapsed_box_on_narrow_area() {
        let area = Rect::new(0, 0, 3, 3);
        assert_eq!(box_area(area, false).width, 3);
    }

    #[test]
    fn visible_tail_keeps_the_end() {
        assert_eq!(visible_tail("abcdef", 3), "def");
        assert_eq!(visible_tail("ab", 5), "ab");
        assert_eq!(visible_tail("abc", 0), "");
    }

    #[test]
    fn open_empty_box_shows_placeholder() {
        let state = open_state("");
        let line = search_line(&state, 30);
        assert_eq!(line.spans[1].content, "Введи свой ID");
    }

    #[test]
    fn open_box_shows_text() {
        let state = open_state("17");
        let line = search_line(&state, 30);
        assert_eq!(line.spans[1].content, "17");
    }

    #[test]
    fn collapsed_icon_highlights_active_filter() {
        let mut state = ViewState::default();
        let idle = search_line(&state, 3);
        assert_eq!(idle.spans[0].style.fg, Some(theme::SEARCH_ICON));

        state.search_text = "7".to_string();
        let filtered = search_line(&state, 3);
        assert_eq!(filtered.spans[0].style.fg, Some(theme::GROUP_BORDER));
    }

    #[test]
    fn cursor_follows_text() {
        let state = open_state("abc");
        let inner = Rect::new(1, 1, 20, 1);
        assert_eq!(cursor_position(inner, &state), Position::new(1 + 2 + 3, 1));
    }

    #[test]
    fn cursor_stays_inside_box_for_long_text() {
        let state = open_state(&"9".repeat(100));
        let inner = Rect::new(1, 1, 20, 1);
        let pos = cursor_position(inner, &state);
        assert!(pos.x < inner.right());
    }

    #[test]
    fn renders_placeholder_when_open() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = open_state("");
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 1).contains("⌕ Введи свой ID"));
    }

    #[test]
    fn renders_icon_only_when_collapsed() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let middle = row_text(buffer, 1);
        assert!(middle.contains(ICON));
        assert!(!middle.contains("Введи"));
    }
}
