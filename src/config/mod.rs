//! Configuration module.
//!
//! Settings for the `cyclegrid` binary: the layout configuration it builds the engine
//! with, the simulated viewport and dataset, and where logs go. Resolution follows
//! defaults → config file → environment → CLI flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, parse_int_list, CliOverrides,
    ConfigError, ConfigFile, ResolvedConfig, COLUMNS_ENV, CONFIG_ENV,
};
