// Towerboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the score source
// 4. Create the UI channel
// 5. Spawn the one-shot loader task
// 6. Run the TUI event loop until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use towerboard_app::loader::spawn_loader;
use towerboard_app::source::HttpScoreSource;
use towerboard_core::config::load_config;
use towerboard_tui::DisplaySettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Towerboard starting up");

    // 2. Load config
    let (config, config_path) = load_config().context("failed to load configuration")?;
    match &config_path {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    // 3. Build the score source
    let source = HttpScoreSource::from_config(&config).context("failed to build HTTP client")?;
    info!(
        "Score source: {} (timeout: {:?})",
        source.endpoint(),
        config.source.request_timeout()
    );

    // 4. Create the UI channel. The loader sends at most two updates.
    let (ui_tx, ui_rx) = mpsc::channel(16);

    // 5. Spawn the loader
    let loader_handle = spawn_loader(Arc::new(source), ui_tx);

    // 6. Run the TUI event loop (blocking until user quits)
    if let Err(e) = towerboard_tui::run(ui_rx, DisplaySettings::from(&config)).await {
        error!("TUI error: {:#}", e);
    }

    // 7. Cleanup: the fetch may still be in flight
    loader_handle.abort();

    info!("Towerboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("towerboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("towerboard_tui=info,towerboard_app=info,towerboard_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
