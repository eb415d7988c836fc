//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{InvalidConfig, LayoutConfig, Padding, Viewport};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CYCLEGRID_CONFIG";

/// Environment variable overriding the column cycle (`"3,2"`).
pub const COLUMNS_ENV: &str = "CYCLEGRID_COLUMNS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A comma-separated integer list could not be parsed.
    #[error("Invalid integer list {value:?} from {source_name}")]
    InvalidList {
        /// Where the value came from (env var or flag name).
        source_name: String,
        /// The raw value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cyclegrid/config.toml`.
///
/// ```toml
/// columns = [3, 2]
/// margin_horizontal = 8
/// margin_vertical = 8
/// item_count = 500
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Column count cycle.
    #[serde(default)]
    pub columns: Option<Vec<i64>>,

    /// Gap between cells of a row.
    #[serde(default)]
    pub margin_horizontal: Option<i32>,

    /// Gap between rows.
    #[serde(default)]
    pub margin_vertical: Option<i32>,

    /// Adaptive minimum cell size. Enables adaptive mode when set.
    #[serde(default)]
    pub adaptive_min_size: Option<i32>,

    /// Adaptive per-row column offsets.
    #[serde(default)]
    pub adaptive_offsets: Option<Vec<i64>>,

    /// Number of simulated items.
    #[serde(default)]
    pub item_count: Option<usize>,

    /// Simulated viewport width.
    #[serde(default)]
    pub viewport_width: Option<i32>,

    /// Simulated viewport height.
    #[serde(default)]
    pub viewport_height: Option<i32>,

    /// Padding applied to all four sides.
    #[serde(default)]
    pub padding: Option<i32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args. Values are not
/// validated here; [`ResolvedConfig::layout_config`] does that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Column count cycle.
    pub columns: Vec<i64>,
    /// Gap between cells of a row.
    pub margin_horizontal: i32,
    /// Gap between rows.
    pub margin_vertical: i32,
    /// Adaptive minimum cell size, if adaptive mode is on.
    pub adaptive_min_size: Option<i32>,
    /// Adaptive per-row offsets.
    pub adaptive_offsets: Vec<i64>,
    /// Number of simulated items.
    pub item_count: usize,
    /// Simulated viewport width.
    pub viewport_width: i32,
    /// Simulated viewport height.
    pub viewport_height: i32,
    /// Uniform padding.
    pub padding: i32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            columns: vec![4],
            margin_horizontal: 8,
            margin_vertical: 8,
            adaptive_min_size: None,
            adaptive_offsets: Vec::new(),
            item_count: 10_000,
            viewport_width: 1080,
            viewport_height: 1920,
            padding: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validate into an engine configuration.
    ///
    /// # Errors
    /// [`InvalidConfig`] for an empty or non-positive column cycle, negative margins, or
    /// bad adaptive parameters.
    pub fn layout_config(&self) -> Result<LayoutConfig, InvalidConfig> {
        let config = LayoutConfig::new(&self.columns)?
            .with_margins(self.margin_horizontal, self.margin_vertical)?;
        match self.adaptive_min_size {
            Some(min) => config.with_adaptive(min, &self.adaptive_offsets),
            None => Ok(config),
        }
    }

    /// Simulated viewport.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.viewport_width,
            self.viewport_height,
            Padding::uniform(self.padding),
        )
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cyclegrid/cyclegrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cyclegrid").join("cyclegrid.log")
    } else {
        PathBuf::from("cyclegrid.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cyclegrid/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cyclegrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CYCLEGRID_CONFIG` environment variable
/// 3. Default path `~/.config/cyclegrid/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Parse `"3, 2,4"` into integers.
///
/// # Errors
///
/// [`ConfigError::InvalidList`] naming `source_name` if any entry is not an integer.
pub fn parse_int_list(source_name: &str, value: &str) -> Result<Vec<i64>, ConfigError> {
    value
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::InvalidList {
            source_name: source_name.to_string(),
            value: value.to_string(),
        })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CYCLEGRID_COLUMNS`: Override the column cycle
///
/// # Errors
///
/// [`ConfigError::InvalidList`] if the variable is set but malformed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(columns) = std::env::var(COLUMNS_ENV) {
        config.columns = parse_int_list(COLUMNS_ENV, &columns)?;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        columns: config.columns.unwrap_or(defaults.columns),
        margin_horizontal: config
            .margin_horizontal
            .unwrap_or(defaults.margin_horizontal),
        margin_vertical: config.margin_vertical.unwrap_or(defaults.margin_vertical),
        adaptive_min_size: config.adaptive_min_size.or(defaults.adaptive_min_size),
        adaptive_offsets: config.adaptive_offsets.unwrap_or(defaults.adaptive_offsets),
        item_count: config.item_count.unwrap_or(defaults.item_count),
        viewport_width: config.viewport_width.unwrap_or(defaults.viewport_width),
        viewport_height: config.viewport_height.unwrap_or(defaults.viewport_height),
        padding: config.padding.unwrap_or(defaults.padding),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// CLI flags that override configuration. `None` leaves the value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--columns`
    pub columns: Option<Vec<i64>>,
    /// `--margin`, applied to both axes.
    pub margin: Option<i32>,
    /// `--adaptive-min-size`
    pub adaptive_min_size: Option<i32>,
    /// `--adaptive-offsets`
    pub adaptive_offsets: Option<Vec<i64>>,
    /// `--items`
    pub item_count: Option<usize>,
    /// `--width`
    pub viewport_width: Option<i32>,
    /// `--height`
    pub viewport_height: Option<i32>,
    /// `--padding`
    pub padding: Option<i32>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(columns) = cli.columns {
        config.columns = columns;
        // an explicit fixed cycle wins over an adaptive config file
        if cli.adaptive_min_size.is_none() {
            config.adaptive_min_size = None;
        }
    }
    if let Some(margin) = cli.margin {
        config.margin_horizontal = margin;
        config.margin_vertical = margin;
    }
    if let Some(min) = cli.adaptive_min_size {
        config.adaptive_min_size = Some(min);
    }
    if let Some(offsets) = cli.adaptive_offsets {
        config.adaptive_offsets = offsets;
    }
    if let Some(items) = cli.item_count {
        config.item_count = items;
    }
    if let Some(width) = cli.viewport_width {
        config.viewport_width = width;
    }
    if let Some(height) = cli.viewport_height {
        config.viewport_height = height;
    }
    if let Some(padding) = cli.padding {
        config.padding = padding;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
