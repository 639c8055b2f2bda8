// Terminal front end: view state, input handling, layout and widgets.
//
// The TUI owns a `ViewState`. The loader task pushes `UiUpdate` messages over
// an mpsc channel; the TUI applies them, recomputes the ranked view from
// `(records, search_text)` on every frame and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod theme;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use towerboard_app::protocol::{UiUpdate, UserCommand};
use towerboard_core::config::Config;
use towerboard_core::ranking::{rank, DerivedView};
use towerboard_core::state::LoadState;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Display settings copied out of `Config` at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub title: Vec<String>,
    pub logo: String,
    pub search_placeholder: String,
    pub wide_min_width: u16,
    pub group_size: usize,
}

impl From<&Config> for DisplaySettings {
    fn from(config: &Config) -> Self {
        DisplaySettings {
            title: config.display.title.clone(),
            logo: config.display.logo.clone(),
            search_placeholder: config.display.search_placeholder.clone(),
            wide_min_width: config.display.wide_min_width,
            group_size: config.leaderboard.group_size,
        }
    }
}

/// TUI-local state.
pub struct ViewState {
    pub settings: DisplaySettings,
    /// Load lifecycle, driven by `UiUpdate`s from the loader.
    pub load: LoadState,
    /// Current search text; non-empty switches the board to search mode.
    pub search_text: String,
    /// Whether the search box is expanded.
    pub search_open: bool,
    /// Whether keystrokes go into the search field.
    pub search_focused: bool,
    /// First visible line of the leaderboard.
    pub scroll_offset: usize,
    /// Time since startup, drives the loading animation.
    pub animation_elapsed: Duration,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(DisplaySettings::from(&Config::default()))
    }
}

impl ViewState {
    pub fn new(settings: DisplaySettings) -> Self {
        ViewState {
            settings,
            load: LoadState::Idle,
            search_text: String::new(),
            search_open: false,
            search_focused: false,
            scroll_offset: 0,
            animation_elapsed: Duration::ZERO,
        }
    }

    /// The ranked, grouped view for the current records and search text.
    pub fn derived_view(&self) -> DerivedView<'_> {
        rank(
            self.load.records(),
            &self.search_text,
            self.settings.group_size,
        )
    }

    /// Whether the loading indicator replaces the board. The fetch starts
    /// right after launch, so `Idle` shows it too.
    pub fn shows_loader(&self) -> bool {
        matches!(self.load, LoadState::Idle | LoadState::Loading)
    }

    /// Whether a terminal `width` columns wide gets the wide layout.
    pub fn is_wide(&self, width: u16) -> bool {
        theme::is_wide(width, self.settings.wide_min_width)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    if matches!(update, UiUpdate::Loaded { .. }) {
        state.scroll_offset = 0;
    }
    update.apply_to(&mut state.load);
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen.
///
/// Clamps the scroll offset to the content first so that scrolling back up
/// after `End` takes effect immediately.
pub fn render_frame(frame: &mut Frame, state: &mut ViewState) {
    let area = frame.area();
    let wide = state.is_wide(area.width);
    let layout = build_layout(area, state.settings.title.len() as u16, wide);

    if !state.shows_loader() {
        let max = widgets::leaderboard::max_scroll(state, layout.content, wide);
        state.scroll_offset = state.scroll_offset.min(max);
    }

    widgets::header::render(frame, layout.header, state);
    widgets::search::render(frame, layout.search, state);
    if state.shows_loader() {
        widgets::loading::render(frame, layout.content, state, wide);
    } else {
        widgets::leaderboard::render(frame, layout.content, state, wide);
    }
    widgets::status_bar::render(frame, layout.status_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over loader updates, keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(mut ui_rx: mpsc::Receiver<UiUpdate>, settings: DisplaySettings) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(settings);
    let started = Instant::now();

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // The loader closes its sender once the load settles; stop polling then
    // so select! doesn't spin on a closed channel.
    let mut ui_open = true;

    let result = loop {
        tokio::select! {
            update = ui_rx.recv(), if ui_open => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("loader channel closed");
                        ui_open = false;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(UserCommand::Quit) = input::handle_key(key_event, &mut view_state) {
                            info!("quit requested");
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize is picked up by the next draw; mouse is ignored.
                    }
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                view_state.animation_elapsed = started.elapsed();
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &mut view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
