// Messages exchanged between the loader task and the front end.

use chrono::{DateTime, Local};
use towerboard_core::record::ScoreRecord;
use towerboard_core::state::LoadState;

/// Pushed by the loader over an mpsc channel; the front end applies each one
/// to its view state.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The request has been issued.
    Loading,
    /// Rows arrived and parsed.
    Loaded {
        records: Vec<ScoreRecord>,
        fetched_at: DateTime<Local>,
    },
    /// The request or the payload failed. Records stay absent.
    LoadFailed { reason: String },
}

impl UiUpdate {
    /// The update describing a settled load, or `None` if `state` has not
    /// settled.
    pub fn settled(state: LoadState) -> Option<Self> {
        match state {
            LoadState::Loaded {
                records,
                fetched_at,
            } => Some(UiUpdate::Loaded {
                records,
                fetched_at,
            }),
            LoadState::Failed { reason } => Some(UiUpdate::LoadFailed { reason }),
            LoadState::Idle | LoadState::Loading => None,
        }
    }

    /// Fold this update into a load state.
    pub fn apply_to(self, state: &mut LoadState) {
        *state = match self {
            UiUpdate::Loading => LoadState::Loading,
            UiUpdate::Loaded {
                records,
                fetched_at,
            } => LoadState::Loaded {
                records,
                fetched_at,
            },
            UiUpdate::LoadFailed { reason } => LoadState::Failed { reason },
        };
    }
}

/// Commands the front end raises for the process as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}
