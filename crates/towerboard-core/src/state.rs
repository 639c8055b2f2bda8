// Load lifecycle for the leaderboard data.
//
// Idle -> Loading -> Loaded | Failed. Terminal once settled: there is no
// retry and no cancellation.

use chrono::{DateTime, Local};

use crate::record::ScoreRecord;

/// Where the one-shot fetch currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// The request is in flight.
    Loading,
    /// The payload arrived and parsed.
    Loaded {
        records: Vec<ScoreRecord>,
        fetched_at: DateTime<Local>,
    },
    /// The source was unreachable or the payload unusable.
    Failed { reason: String },
}

impl LoadState {
    pub fn loaded(records: Vec<ScoreRecord>) -> Self {
        LoadState::Loaded {
            records,
            fetched_at: Local::now(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        LoadState::Failed {
            reason: reason.into(),
        }
    }

    /// Parsed records, present only after a successful load.
    pub fn records(&self) -> Option<&[ScoreRecord]> {
        match self {
            LoadState::Loaded { records, .. } => Some(records),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// True once the fetch has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded { .. } | LoadState::Failed { .. })
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        match self {
            LoadState::Loaded { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }
}
