// Leaderboard widget: the ranked groups, or a message when there is nothing
// to show.
//
// Each non-empty group is drawn as its own rounded box. The boxes are laid
// out as a flat list of text lines so the whole board scrolls as one unit.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use towerboard_core::ranking::{display_rank, format_points, DerivedView, RankedEntry, ViewMode};

use crate::theme::{self, metrics, Metrics};
use crate::ViewState;

/// One screen line of the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardLine<'a> {
    /// Top border of a group.
    Top,
    Entry(RankedEntry<'a>),
    /// Bottom border of a group.
    Bottom,
    /// Blank line between two groups.
    Gap,
}

/// Flatten the visible groups into screen lines.
pub fn board_lines<'a>(view: &DerivedView<'a>, group_gap: u16) -> Vec<BoardLine<'a>> {
    let mut lines = Vec::with_capacity(view.len() + 4);
    for (drawn, (group, records)) in view.visible_groups().enumerate() {
        if drawn > 0 {
            lines.extend(std::iter::repeat(BoardLine::Gap).take(usize::from(group_gap)));
        }
        lines.push(BoardLine::Top);
        lines.extend(records.iter().enumerate().map(|(index, record)| {
            BoardLine::Entry(RankedEntry {
                rank: display_rank(group, index, view.group_size()),
                group,
                record: *record,
            })
        }));
        lines.push(BoardLine::Bottom);
    }
    lines
}

/// Largest useful scroll offset for a board drawn into `area`.
pub fn max_scroll(state: &ViewState, area: Rect, wide: bool) -> usize {
    let view = state.derived_view();
    if view.is_empty() {
        return 0;
    }
    board_lines(&view, metrics(wide).group_gap)
        .len()
        .saturating_sub(usize::from(area.height))
}

/// Render the board (or its empty/failed message) into `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, wide: bool) {
    if area.is_empty() {
        return;
    }

    let view = state.derived_view();
    if view.is_empty() {
        render_message(frame, area, state, view.mode);
        return;
    }

    let m = metrics(wide);
    let rank_width = rank_column_width(&view, &m);
    let lines: Vec<Line> = board_lines(&view, m.group_gap)
        .into_iter()
        .skip(state.scroll_offset)
        .take(usize::from(area.height))
        .map(|line| render_line(line, area.width, &m, rank_width))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Width of the rank column: the layout's minimum, widened so the largest
/// rank in `view` still leaves a blank column before the id gap.
pub fn rank_column_width(view: &DerivedView<'_>, m: &Metrics) -> usize {
    let largest = view
        .visible_groups()
        .last()
        .map_or(0, |(group, records)| {
            display_rank(group, records.len().saturating_sub(1), view.group_size())
        });
    let digits = largest.checked_ilog10().map_or(1, |log| log as usize + 1);
    usize::from(m.rank_width).max(digits + 1)
}

fn render_line(line: BoardLine<'_>, width: u16, m: &Metrics, rank_width: usize) -> Line<'static> {
    let inner = usize::from(width.saturating_sub(2));
    let border = Style::default().fg(theme::GROUP_BORDER).bg(theme::GROUP_BG);
    match line {
        BoardLine::Top => Line::styled(format!("╭{}╮", "─".repeat(inner)), border),
        BoardLine::Bottom => Line::styled(format!("╰{}╯", "─".repeat(inner)), border),
        BoardLine::Gap => Line::default(),
        BoardLine::Entry(entry) => entry_line(&entry, inner, m, rank_width, border),
    }
}

/// `│ rank  id ......... points │` filling `inner` columns between the borders.
fn entry_line(
    entry: &RankedEntry<'_>,
    inner: usize,
    m: &Metrics,
    rank_width: usize,
    border: Style,
) -> Line<'static> {
    let padding = usize::from(m.row_padding);
    let id_gap = usize::from(m.id_gap);
    let points = format_points(entry.record.points);
    let points_width = points.chars().count();

    // At least one blank column between the id and the points.
    let fixed = 2 * padding + rank_width + id_gap + points_width + 1;
    let id = truncate(&entry.record.id, inner.saturating_sub(fixed));
    let used = 2 * padding + rank_width + id_gap + id.chars().count() + points_width;
    let filler = inner.saturating_sub(used);

    let text = Style::default().fg(theme::ENTRY_TEXT);
    Line::from(vec![
        Span::styled("│", border),
        Span::raw(" ".repeat(padding)),
        Span::styled(format!("{:<rank_width$}", entry.rank), text),
        Span::raw(" ".repeat(id_gap)),
        Span::styled(id, text),
        Span::raw(" ".repeat(filler)),
        Span::styled(
            points,
            Style::default()
                .fg(theme::POINTS)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled("│", border),
    ])
    .style(Style::default().bg(theme::GROUP_BG))
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

// ---------------------------------------------------------------------------
// Nothing to show
// ---------------------------------------------------------------------------

/// Headline and optional detail for an empty board.
pub fn empty_message(state: &ViewState, mode: ViewMode) -> (String, Option<String>) {
    if let Some(reason) = state.load.failure() {
        return (
            "Could not load the leaderboard.".to_string(),
            Some(reason.to_string()),
        );
    }
    match mode {
        ViewMode::Search => (format!("No IDs match \"{}\".", state.search_text), None),
        ViewMode::Paged => ("No scores yet.".to_string(), None),
    }
}

fn render_message(frame: &mut Frame, area: Rect, state: &ViewState, mode: ViewMode) {
    let (headline, detail) = empty_message(state, mode);
    let headline_color = if state.load.failure().is_some() {
        theme::ERROR
    } else {
        theme::TITLE
    };

    let mut lines = vec![
        Line::default(),
        Line::styled(
            headline,
            Style::default()
                .fg(headline_color)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(detail) = detail {
        lines.push(Line::styled(detail, Style::default().fg(theme::MUTED)));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_ui_update;
    use crate::widgets::test_util::{buffer_text, row_text};
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use towerboard_app::protocol::UiUpdate;
    use towerboard_core::record::ScoreRecord;

    fn state_with(records: Vec<ScoreRecord>) -> ViewState {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Loaded {
                records,
                fetched_at: Local::now(),
            },
        );
        state
    }

    fn numbered(n: usize) -> Vec<ScoreRecord> {
        (0..n)
            .map(|i| ScoreRecord::new(format!("id{i}"), "name", "mail", (n - i) as u64))
            .collect()
    }

    fn draw(state: &ViewState, width: u16, height: u16) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state, false))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn single_group_lines() {
        let state = state_with(numbered(3));
        let view = state.derived_view();
        let lines = board_lines(&view, 1);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], BoardLine::Top);
        assert_eq!(lines[4], BoardLine::Bottom);
        assert!(!lines.contains(&BoardLine::Gap));
    }

    #[test]
    fn two_groups_are_separated_by_gap() {
        let state = state_with(numbered(52));
        let view = state.derived_view();
        let lines = board_lines(&view, 2);
        // top + 50 + bottom, 2 gaps, top + 2 + bottom
        assert_eq!(lines.len(), 52 + 2 + 4);
        assert_eq!(lines[52], BoardLine::Gap);
        assert_eq!(lines[53], BoardLine::Gap);
        assert_eq!(lines[54], BoardLine::Top);
        match lines[55] {
            BoardLine::Entry(entry) => {
                assert_eq!(entry.rank, 51);
                assert_eq!(entry.group, 1);
            }
            other => panic!("expected an entry, got {other:?}"),
        }
    }

    #[test]
    fn max_scroll_depends_on_height() {
        let state = state_with(numbered(10));
        // 10 entries + 2 borders
        assert_eq!(max_scroll(&state, Rect::new(0, 0, 40, 5), false), 7);
        assert_eq!(max_scroll(&state, Rect::new(0, 0, 40, 30), false), 0);
    }

    #[test]
    fn max_scroll_is_zero_for_empty_board() {
        let state = state_with(Vec::new());
        assert_eq!(max_scroll(&state, Rect::new(0, 0, 40, 1), false), 0);
    }

    #[test]
    fn renders_rank_id_and_padded_points() {
        let state = state_with(vec![
            ScoreRecord::new("alpha", "n", "e", 7),
            ScoreRecord::new("beta", "n", "e", 12),
        ]);
        let buffer = draw(&state, 40, 6);

        assert!(row_text(&buffer, 0).starts_with('╭'));
        let first = row_text(&buffer, 1);
        assert!(first.starts_with('│'));
        assert!(first.contains("1"));
        assert!(first.contains("beta"));
        assert!(first.contains("12"));
        assert!(first.ends_with('│'));

        let second = row_text(&buffer, 2);
        assert!(second.contains("alpha"));
        assert!(second.contains("07"));
        assert!(row_text(&buffer, 3).starts_with('╰'));
    }

    #[test]
    fn points_are_right_aligned_against_the_border() {
        let state = state_with(vec![ScoreRecord::new("a", "n", "e", 3)]);
        let buffer = draw(&state, 30, 4);
        let row = row_text(&buffer, 1);
        let padding = " ".repeat(usize::from(theme::COMPACT.row_padding));
        assert!(row.ends_with(&format!("03{padding}│")), "row was {row:?}");
    }

    #[test]
    fn long_ids_are_truncated() {
        let long = "x".repeat(80);
        let state = state_with(vec![ScoreRecord::new(long, "n", "e", 1)]);
        let buffer = draw(&state, 30, 4);
        let row = row_text(&buffer, 1);
        assert!(row.contains('…'));
        assert!(row.ends_with('│'));
    }

    #[test]
    fn scroll_offset_skips_lines() {
        let mut state = state_with(numbered(10));
        state.scroll_offset = 3;
        let buffer = draw(&state, 40, 4);
        // Line 3 of the board is the third entry (rank 3).
        assert!(row_text(&buffer, 0).contains("id2"));
    }

    #[test]
    fn second_group_numbering_continues() {
        let mut state = state_with(numbered(51));
        state.scroll_offset = 52;
        let buffer = draw(&state, 40, 6);
        let text = buffer_text(&buffer);
        assert!(text.contains("51"));
        assert!(text.contains("id50"));
    }

    #[test]
    fn empty_messages_are_distinct() {
        let failed = {
            let mut state = ViewState::default();
            apply_ui_update(
                &mut state,
                UiUpdate::LoadFailed {
                    reason: "status 500".to_string(),
                },
            );
            state
        };
        let empty = state_with(Vec::new());
        let mut no_match = state_with(numbered(3));
        no_match.search_text = "zzz".to_string();

        let failed_msg = empty_message(&failed, ViewMode::Paged);
        let empty_msg = empty_message(&empty, ViewMode::Paged);
        let no_match_msg = empty_message(&no_match, ViewMode::Search);

        assert_eq!(failed_msg.1.as_deref(), Some("status 500"));
        assert_eq!(empty_msg.0, "No scores yet.");
        assert_eq!(no_match_msg.0, "No IDs match \"zzz\".");
        assert_ne!(failed_msg.0, empty_msg.0);
        assert_ne!(empty_msg.0, no_match_msg.0);
    }

    #[test]
    fn renders_no_match_message() {
        let mut state = state_with(numbered(3));
        state.search_text = "zzz".to_string();
        let buffer = draw(&state, 40, 5);
        assert!(buffer_text(&buffer).contains("No IDs match \"zzz\"."));
    }

    #[test]
    fn renders_failure_reason() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::LoadFailed {
                reason: "request failed".to_string(),
            },
        );
        let buffer = draw(&state, 50, 5);
        let text = buffer_text(&buffer);
        assert!(text.contains("Could not load the leaderboard."));
        assert!(text.contains("request failed"));
    }

    #[test]
    fn rank_column_fits_five_digit_ranks() {
        let mut state = state_with(numbered(10_001));
        // 10 001 records: top + 50 + bottom, gap, top + 9 951 + bottom.
        state.scroll_offset = 10_001 + 5 - 3;
        let buffer = draw(&state, 30, 4);

        let last = row_text(&buffer, 1);
        assert!(last.starts_with("│ 10001"), "row was {last:?}");
        assert!(last.contains("id10000"));
        assert!(last.ends_with("01 │"), "row was {last:?}");
        let previous = row_text(&buffer, 0);
        assert!(previous.ends_with("02 │"), "row was {previous:?}");
        assert!(row_text(&buffer, 2).starts_with('╰'));
    }

    #[test]
    fn rank_column_width_grows_with_largest_rank() {
        let small = state_with(numbered(20));
        assert_eq!(
            rank_column_width(&small.derived_view(), &theme::COMPACT),
            usize::from(theme::COMPACT.rank_width)
        );

        let large = state_with(numbered(10_001));
        assert_eq!(rank_column_width(&large.derived_view(), &theme::COMPACT), 6);
        assert_eq!(rank_column_width(&large.derived_view(), &theme::WIDE), 6);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcd", 3), "ab…");
        assert_eq!(truncate("abcd", 0), "");
    }
}
