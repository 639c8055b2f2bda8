// Screen layout: zone arrangement and sizing.
//
// +--------------------------------------------------+
// |                                             LOGO |
// |                 Title line 1                     |
// |                 Title line 2                     |
// |  (gap)                                           |
// |  +--------------------------------------------+  |
// |  | search box (3 rows)                        |  |
// |  +--------------------------------------------+  |
// |  +--------------------------------------------+  |
// |  | leaderboard groups / loader (fill)         |  |
// |  +--------------------------------------------+  |
// | Status bar (1 row)                               |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use crate::theme::metrics;

/// Height of the search box, borders included.
pub const SEARCH_HEIGHT: u16 = 3;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Logo row plus the title lines.
    pub header: Rect,
    pub search: Rect,
    /// Loader, groups or the empty/failed message.
    pub content: Rect,
    pub status_bar: Rect,
}

/// Build the layout for `area`.
///
/// `title_lines` is the number of title rows under the logo row; `wide`
/// selects the roomy metrics.
pub fn build_layout(area: Rect, title_lines: u16, wide: bool) -> AppLayout {
    let m = metrics(wide);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1 + title_lines), // logo + title
            Constraint::Length(m.title_gap),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(3), // content
            Constraint::Length(1), // status bar
        ])
        .split(area);

    let side = Margin {
        horizontal: m.side_margin,
        vertical: 0,
    };

    AppLayout {
        header: vertical[0],
        search: vertical[2].inner(side),
        content: vertical[4].inner(side),
        status_bar: vertical[5],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
