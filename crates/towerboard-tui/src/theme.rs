// Palette and responsive metrics.
//
// Colors come from the board's web styling; metrics map its two breakpoint
// layouts (phone and desktop) onto terminal cells.

use ratatui::style::Color;

pub const TITLE: Color = Color::Rgb(0x18, 0x56, 0xA8);
pub const GROUP_BORDER: Color = Color::Rgb(0x01, 0x92, 0xFF);
pub const GROUP_BG: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const ENTRY_TEXT: Color = Color::Rgb(0x00, 0x00, 0x00);
pub const POINTS: Color = Color::Rgb(0x00, 0x28, 0x82);
pub const LOADER_DOT: Color = POINTS;
pub const SEARCH_ICON: Color = Color::Rgb(0xB3, 0xB3, 0xB3);
pub const PLACEHOLDER: Color = Color::Rgb(0xB3, 0xB3, 0xB3);
pub const MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const ERROR: Color = Color::Rgb(0xC0, 0x1C, 0x28);

/// Cell measurements for one layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Columns kept free on each side of the search box and the groups.
    pub side_margin: u16,
    /// Blank rows between the title and the search box.
    pub title_gap: u16,
    /// Inner horizontal padding of a leaderboard row.
    pub row_padding: u16,
    /// Width of the rank column.
    pub rank_width: u16,
    /// Columns between the rank column and the id.
    pub id_gap: u16,
    /// Blank rows between two groups.
    pub group_gap: u16,
    /// Height of the loading group, borders included.
    pub loader_height: u16,
}

pub const COMPACT: Metrics = Metrics {
    side_margin: 1,
    title_gap: 1,
    row_padding: 1,
    rank_width: 4,
    id_gap: 2,
    group_gap: 1,
    loader_height: 5,
};

pub const WIDE: Metrics = Metrics {
    side_margin: 8,
    title_gap: 2,
    row_padding: 4,
    rank_width: 6,
    id_gap: 6,
    group_gap: 2,
    loader_height: 7,
};

/// Whether a terminal `width` columns wide gets the wide layout.
pub fn is_wide(width: u16, wide_min_width: u16) -> bool {
    width >= wide_min_width
}

pub fn metrics(wide: bool) -> Metrics {
    if wide {
        WIDE
    } else {
        COMPACT
    }
}

/// Mix `color` over the white group background at the given opacity.
pub fn fade_on_white(color: Color, opacity: f32) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    let opacity = opacity.clamp(0.0, 1.0);
    let mix = |c: u8| {
        let c = f32::from(c);
        (255.0 + (c - 255.0) * opacity).round() as u8
    };
    Color::Rgb(mix(r), mix(g), mix(b))
}
