// One-shot leaderboard loader.
//
// Runs once at startup: announces `Loading`, performs a single fetch, and
// settles into `Loaded` or `LoadFailed`. Failures are logged and reported,
// never retried, and never escape the task.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use towerboard_core::record::{parse_rows, ScoreRecord};
use towerboard_core::state::LoadState;

use crate::protocol::UiUpdate;
use crate::source::{LoadError, ScoreSource};

/// Fetch and parse the rows from `source`.
pub async fn fetch_records(source: &dyn ScoreSource) -> Result<Vec<ScoreRecord>, LoadError> {
    let payload = source.fetch_rows().await?;
    let records = parse_rows(&payload)?;

    if let Some(rows) = payload.as_array() {
        let dropped = rows.len() - records.len();
        if dropped > 0 {
            debug!(rows = rows.len(), dropped, "skipped rows without id, name or email");
        }
    }

    Ok(records)
}

/// Fetch, parse and settle. Every error becomes `LoadState::Failed`.
pub async fn load_scores(source: &dyn ScoreSource) -> LoadState {
    match fetch_records(source).await {
        Ok(records) => {
            info!(count = records.len(), "leaderboard loaded");
            LoadState::loaded(records)
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "failed to load leaderboard");
            LoadState::failed(e.to_string())
        }
    }
}

/// Spawn the loader task. It sends `UiUpdate::Loading` immediately and one
/// settling update once the fetch finishes. A dropped receiver is not an
/// error; the task just ends.
pub fn spawn_loader(
    source: Arc<dyn ScoreSource>,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(source = %source.describe(), "loading leaderboard");
        if ui_tx.send(UiUpdate::Loading).await.is_err() {
            debug!("UI channel closed before load started");
            return;
        }

        let state = load_scores(source.as_ref()).await;

        if let Some(update) = UiUpdate::settled(state) {
            if ui_tx.send(update).await.is_err() {
                debug!("UI channel closed before load settled");
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
