// Keyboard input handling.
//
// Translates crossterm key events into ViewState mutations (search box,
// scrolling) or into a UserCommand for the event loop (quit).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use towerboard_app::protocol::UserCommand;

use super::ViewState;

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand::Quit)` when the program should exit; every
/// other key is handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits, even while typing.
    if ctrl && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if scroll_key(key_event.code, view_state) {
        return None;
    }

    if view_state.search_focused {
        handle_search_field(key_event, ctrl, view_state);
        return None;
    }

    match key_event.code {
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        KeyCode::Char('/') | KeyCode::Tab => toggle_search(view_state),
        KeyCode::Enter if view_state.search_open => view_state.search_focused = true,
        KeyCode::Esc if view_state.search_open => close_search(view_state),
        KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::Char('g') => view_state.scroll_offset = 0,
        KeyCode::Char('G') => view_state.scroll_offset = usize::MAX,
        _ => {}
    }
    None
}

/// Keys that scroll in every mode. Returns true when the key was consumed.
fn scroll_key(code: KeyCode, view_state: &mut ViewState) -> bool {
    match code {
        KeyCode::Up => scroll_up(view_state, 1),
        KeyCode::Down => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, PAGE_SIZE),
        KeyCode::PageDown => scroll_down(view_state, PAGE_SIZE),
        KeyCode::Home => view_state.scroll_offset = 0,
        // Clamped to the content on the next draw.
        KeyCode::End => view_state.scroll_offset = usize::MAX,
        _ => return false,
    }
    true
}

/// Keys while the search field has focus.
///
/// - printable characters append to the search text
/// - Backspace removes the last character, Ctrl+U clears
/// - Enter leaves the field (box stays open, text kept)
/// - Esc and Tab collapse the box (text kept)
fn handle_search_field(key_event: KeyEvent, ctrl: bool, view_state: &mut ViewState) {
    match key_event.code {
        KeyCode::Char('u') if ctrl => set_search_text(view_state, String::new()),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => {
            let mut text = std::mem::take(&mut view_state.search_text);
            text.push(c);
            set_search_text(view_state, text);
        }
        KeyCode::Backspace => {
            let mut text = std::mem::take(&mut view_state.search_text);
            text.pop();
            set_search_text(view_state, text);
        }
        KeyCode::Enter => view_state.search_focused = false,
        KeyCode::Esc | KeyCode::Tab => close_search(view_state),
        _ => {}
    }
}

/// Open-and-focus when collapsed, collapse when open.
fn toggle_search(view_state: &mut ViewState) {
    if view_state.search_open {
        close_search(view_state);
    } else {
        view_state.search_open = true;
        view_state.search_focused = true;
    }
}

/// Collapse the box. The text, and with it the filter, is kept.
fn close_search(view_state: &mut ViewState) {
    view_state.search_open = false;
    view_state.search_focused = false;
}

fn set_search_text(view_state: &mut ViewState, text: String) {
    if text != view_state.search_text {
        view_state.scroll_offset = 0;
    }
    view_state.search_text = text;
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
