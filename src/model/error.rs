//! Error types for the grid layout engine.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions from the narrow, per-concern enums up to [`LayoutError`] (engine
//! calls) and [`AppError`] (the `cyclegrid` binary).
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level CLI error
//!   - [`LayoutError`] - Anything an engine call can report
//!     - [`InvalidConfig`] - Rejected reconfiguration (previous config retained)
//!     - [`LayoutImpossible`] - The viewport cannot hold a single cell
//!   - [`SavedStateError`] - Malformed persisted anchor record
//!   - [`crate::config::ConfigError`] - Config file loading failures
//!   - [`crate::logging::LoggingError`] - Tracing initialization failures
//!
//! # Recovery Strategy
//!
//! - **InvalidConfig**: synchronous rejection at the reconfiguration call. Nothing is
//!   mutated; the engine keeps laying out with its previous configuration.
//! - **LayoutImpossible**: fatal for that layout pass. Nothing is attached; the host
//!   should not render until the viewport widens or the configuration changes.
//! - An out-of-range persisted anchor is *not* an error: the engine resets it to
//!   `(0, 0)` before the next fill pass.

use std::path::PathBuf;
use thiserror::Error;

/// Which margin a [`InvalidConfig::NegativeMargin`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginAxis {
    /// Space between cells of the same row.
    Horizontal,
    /// Space between rows.
    Vertical,
}

impl std::fmt::Display for MarginAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginAxis::Horizontal => f.write_str("horizontal"),
            MarginAxis::Vertical => f.write_str("vertical"),
        }
    }
}

/// A reconfiguration request was rejected.
///
/// Returned synchronously by the `set_*` calls on the engine and by
/// [`crate::model::LayoutConfig`] constructors. The previous configuration is retained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfig {
    /// The column count sequence has no entries.
    #[error("column counts must contain at least one value")]
    EmptyColumnCounts,

    /// A column count is zero or negative.
    #[error("column count must be > 0 (found {value} at index {index})")]
    NonPositiveColumnCount {
        /// Index into the offending sequence.
        index: usize,
        /// The rejected value.
        value: i64,
    },

    /// A child margin is negative.
    #[error("{axis} margin must be >= 0 (found {value})")]
    NegativeMargin {
        /// Which margin was rejected.
        axis: MarginAxis,
        /// The rejected value.
        value: i32,
    },

    /// Adaptive minimum cell size is zero or negative.
    #[error("adaptive min cell size must be > 0 (found {0})")]
    NonPositiveMinCellSize(i32),

    /// An adaptive per-row offset is negative.
    #[error("adaptive offsets must be >= 0 (found {value} at index {index})")]
    NegativeAdaptiveOffset {
        /// Index into the offending sequence.
        index: usize,
        /// The rejected value.
        value: i64,
    },
}

/// The viewport cannot hold a single cell with the current configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutImpossible {
    /// Adaptive resolution produced a maximum column count of zero.
    #[error(
        "cannot fit a single cell of min size {min_cell_size} into available width {available_width}"
    )]
    NoColumnsFit {
        /// Width left after padding.
        available_width: i32,
        /// Configured adaptive minimum cell size.
        min_cell_size: i32,
    },

    /// Margins consume all available width, leaving cells of non-positive size.
    #[error(
        "cell size would be {cell_size} for {max_column_count} columns in available width {available_width}"
    )]
    NonPositiveCellSize {
        /// Width left after padding.
        available_width: i32,
        /// Widest row of the schedule.
        max_column_count: usize,
        /// The computed (rejected) cell size.
        cell_size: i32,
    },
}

/// Anything a [`crate::layout::LayoutEngine`] call can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Rejected reconfiguration.
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    /// Fatal for the current layout pass.
    #[error("layout impossible: {0}")]
    LayoutImpossible(#[from] LayoutImpossible),
}

/// Failure decoding a persisted [`crate::model::SavedState`] record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SavedStateError {
    /// The record is not exactly 8 bytes long.
    #[error("saved state record must be 8 bytes (got {0})")]
    WrongLength(usize),
}

/// Top-level error for the `cyclegrid` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The engine rejected the configuration or could not lay out.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Config file could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error(transparent)]
    Logging(#[from] crate::logging::LoggingError),

    /// A saved state file was malformed.
    #[error("invalid saved state in {path}: {source}")]
    SavedState {
        /// File the record was read from.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: SavedStateError,
    },

    /// Reading or writing a state file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<InvalidConfig> for AppError {
    fn from(err: InvalidConfig) -> Self {
        AppError::Layout(LayoutError::InvalidConfig(err))
    }
}
