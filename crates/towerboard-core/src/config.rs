// Configuration loading and parsing (towerboard.toml).
//
// Every key is optional. Missing keys fall back to the built-in defaults,
// which describe the tower event board: the spreadsheet endpoint, a top bucket
// of 50, and the two-line title.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::ranking::DEFAULT_GROUP_SIZE;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwJk6keeTWnKBXtSPX1nKA2JglvHUsvxkve8Yj6y_1cgouZUrm0VE0Vh7_Jpz8v0I65/exec";

/// Terminal width (in columns) from which the wide layout is used.
pub const DEFAULT_WIDE_MIN_WIDTH: u16 = 100;

pub const CONFIG_FILE_NAME: &str = "towerboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub leaderboard: LeaderboardConfig,
    pub display: DisplayConfig,
}

/// `[source]`: where the rows come from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Absent means no timeout: a hung request keeps the board loading.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// `[leaderboard]`: grouping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub group_size: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        LeaderboardConfig {
            group_size: DEFAULT_GROUP_SIZE,
        }
    }
}

/// `[display]`: header text and the responsive breakpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// One or two centered title lines.
    pub title: Vec<String>,
    /// Short mark drawn in the top-right corner.
    pub logo: String,
    pub search_placeholder: String,
    pub wide_min_width: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            title: vec!["Рейтинг игроков".to_string(), "«Вот эТо Башня»".to_string()],
            logo: "VTB".to_string(),
            search_placeholder: "Введи свой ID".to_string(),
            wide_min_width: DEFAULT_WIDE_MIN_WIDTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate configuration text. `path` is only used in errors.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a specific config file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text, path)
}

/// Candidate config files in lookup order: `config/towerboard.toml` under
/// `base_dir`, then the platform config directory.
pub fn config_search_paths(base_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![base_dir.join("config").join(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "towerboard") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load the first config file found under `base_dir` (see
/// `config_search_paths`), or the validated defaults when none exists.
///
/// Returns the path that was used, if any.
pub fn load_config_from(base_dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    for path in config_search_paths(base_dir) {
        if path.is_file() {
            debug!(path = %path.display(), "loading config file");
            let config = load_config_file(&path)?;
            return Ok((config, Some(path)));
        }
    }

    let config = Config::default();
    validate(&config)?;
    Ok((config, None))
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let endpoint_ok = Url::parse(config.source.endpoint.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false);
    if !endpoint_ok {
        return Err(ConfigError::ValidationError {
            field: "source.endpoint".into(),
            message: format!("must be an http(s) URL, got {:?}", config.source.endpoint),
        });
    }

    if config.source.request_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "source.request_timeout_secs".into(),
            message: "must be > 0 when set".into(),
        });
    }

    if config.leaderboard.group_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "leaderboard.group_size".into(),
            message: "must be greater than 0".into(),
        });
    }

    let title_lines = config.display.title.len();
    if !(1..=2).contains(&title_lines) {
        return Err(ConfigError::ValidationError {
            field: "display.title".into(),
            message: format!("must have 1 or 2 lines, got {title_lines}"),
        });
    }

    if config.display.wide_min_width == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.wide_min_width".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
