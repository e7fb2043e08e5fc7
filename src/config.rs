//! Application configuration.
//!
//! Read from `~/.config/twgcals/config.toml` (optional) and `TWGCALS_*`
//! environment variables, which win over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use twgcals_core::settings::{DEFAULT_MARKER_TAG, DEFAULT_MAX_RESULTS};
use twgcals_core::window::DEFAULT_LOOKAHEAD_HOURS;
use twgcals_core::{DedupStrategy, SyncError, SyncResult, SyncSettings};

static DEFAULT_CREDENTIALS_PATH: &str = "~/credentials.json";

const DEFAULT_TASK_BINARY: &str = "task";
const DEFAULT_TASK_TIMEOUT_SECS: u64 = 30;

/// One year.
const MAX_LOOKAHEAD_HOURS: i64 = 8760;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Google OAuth client secret file, as downloaded from the cloud console
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,

    /// Where access and refresh tokens are cached between runs
    #[serde(default = "default_token_cache")]
    pub token_cache: PathBuf,

    #[serde(default = "default_lookahead_hours")]
    pub lookahead_hours: i64,

    /// Cap on events fetched per calendar
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_marker_tag")]
    pub marker_tag: String,

    #[serde(default)]
    pub dedup: DedupStrategy,

    /// Taskwarrior executable, looked up in PATH unless it is a path
    #[serde(default = "default_task_binary")]
    pub task_binary: String,

    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
}

fn default_credentials() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_PATH)
}

fn default_token_cache() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("twgcals").join("token.json"))
        .unwrap_or_else(|| PathBuf::from("token.json"))
}

fn default_lookahead_hours() -> i64 {
    DEFAULT_LOOKAHEAD_HOURS
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_marker_tag() -> String {
    DEFAULT_MARKER_TAG.to_string()
}

fn default_task_binary() -> String {
    DEFAULT_TASK_BINARY.to_string()
}

fn default_task_timeout_secs() -> u64 {
    DEFAULT_TASK_TIMEOUT_SECS
}

impl AppConfig {
    /// Default config file location (~/.config/twgcals/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("twgcals");

        Ok(config_dir.join("config.toml"))
    }

    /// The file `load` reads: the explicit one if given, else the default.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Load config. An explicitly given file must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path)?;

        Self::load_from(
            &config_path,
            path.is_some(),
            Environment::with_prefix("TWGCALS"),
        )
    }

    fn load_from(config_path: &Path, required: bool, env: Environment) -> Result<Self> {
        let config: AppConfig = Config::builder()
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        Ok(config)
    }

    pub fn credentials_path(&self) -> PathBuf {
        expand_path(&self.credentials)
    }

    pub fn token_cache_path(&self) -> PathBuf {
        expand_path(&self.token_cache)
    }

    pub fn task_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.task_timeout_secs)
    }

    /// Settings for the synchronizer, validated.
    pub fn sync_settings(&self) -> SyncResult<SyncSettings> {
        if !(1..=MAX_LOOKAHEAD_HOURS).contains(&self.lookahead_hours) {
            return Err(SyncError::Config(format!(
                "lookahead_hours must be between 1 and {MAX_LOOKAHEAD_HOURS}, got {}",
                self.lookahead_hours
            )));
        }
        let lookahead = Duration::try_hours(self.lookahead_hours).ok_or_else(|| {
            SyncError::Config(format!("lookahead_hours out of range: {}", self.lookahead_hours))
        })?;
        if self.max_results == 0 {
            return Err(SyncError::Config("max_results must be at least 1".into()));
        }
        let marker = self.marker_tag.trim();
        if marker.is_empty() || marker.contains(char::is_whitespace) {
            return Err(SyncError::Config(format!(
                "marker_tag must be a single word, got '{}'",
                self.marker_tag
            )));
        }

        Ok(SyncSettings {
            lookahead,
            max_results: self.max_results,
            marker_tag: marker.to_string(),
            dedup: self.dedup,
        })
    }
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
