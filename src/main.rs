//! cyclegrid - Entry Point
//!
//! Headless driver: lays out a simulated dataset with [`cyclegrid::sim::MemoryHost`],
//! applies the requested jumps and scrolls, and prints what ends up attached.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use cyclegrid::config::{self, CliOverrides, ResolvedConfig};
use cyclegrid::layout::{LayoutEngine, ScrollDirection, SmoothScroll};
use cyclegrid::model::{AppError, Rect, SavedState};
use cyclegrid::sim::{MemoryHost, ViewId};

/// Virtualized grid layout with cyclic per-row column counts
#[derive(Parser, Debug)]
#[command(name = "cyclegrid")]
#[command(version)]
#[command(about = "Lay out a simulated grid and print the attached cells")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of items in the dataset
    #[arg(short = 'n', long)]
    pub items: Option<usize>,

    /// Column count cycle, e.g. 3,2
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub columns: Option<Vec<i64>>,

    /// Horizontal and vertical gap between cells
    #[arg(short, long, allow_negative_numbers = true)]
    pub margin: Option<i32>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<i32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<i32>,

    /// Padding on all four sides
    #[arg(long)]
    pub padding: Option<i32>,

    /// Enable adaptive column counts with this minimum cell size
    #[arg(long, allow_negative_numbers = true)]
    pub adaptive_min_size: Option<i32>,

    /// Per-row column offsets for adaptive mode, e.g. 0,1
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub adaptive_offsets: Option<Vec<i64>>,

    /// Jump to this position after the first layout
    #[arg(short, long)]
    pub goto: Option<usize>,

    /// Report the smooth scroll request towards this position
    #[arg(long)]
    pub smooth_to: Option<usize>,

    /// Scroll by this many pixels (repeatable, positive moves content up)
    #[arg(short, long = "scroll", allow_negative_numbers = true)]
    pub scroll: Vec<i32>,

    /// Restore the scroll position from an 8-byte state file
    #[arg(long)]
    pub state_in: Option<PathBuf>,

    /// Write the final scroll position to an 8-byte state file
    #[arg(long)]
    pub state_out: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            columns: self.columns.clone(),
            margin: self.margin,
            adaptive_min_size: self.adaptive_min_size,
            adaptive_offsets: self.adaptive_offsets.clone(),
            item_count: self.items,
            viewport_width: self.width,
            viewport_height: self.height,
            padding: self.padding,
        }
    }
}

/// One attached cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellReport {
    position: usize,
    row: usize,
    index: usize,
    rect: Rect,
}

/// Everything the driver prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    version: &'static str,
    item_count: usize,
    column_counts: Vec<usize>,
    cell_size: i32,
    rows: usize,
    content_height: i32,
    anchor: SavedState,
    scrolled: Vec<i32>,
    smooth_scroll: Option<SmoothScroll>,
    attached: Vec<CellReport>,
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged)?;
    Ok(config::apply_cli_overrides(with_env, args.overrides()))
}

fn read_state(path: &Path) -> Result<SavedState, AppError> {
    let bytes = std::fs::read(path)?;
    SavedState::from_bytes(&bytes).map_err(|source| AppError::SavedState {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the engine, drive it as `args` asks and collect the report.
fn simulate(args: &Args, config: &ResolvedConfig) -> Result<Report, AppError> {
    let mut engine: LayoutEngine<ViewId> = LayoutEngine::new(config.layout_config()?);
    let mut host = MemoryHost::new();
    engine.on_viewport_changed(config.viewport());
    engine.on_item_count_changed(config.item_count);

    if let Some(path) = &args.state_in {
        engine.restore_state(read_state(path)?);
    }
    engine.layout(&mut host)?;

    if let Some(position) = args.goto {
        engine.scroll_to_position(position, &mut host);
        engine.layout(&mut host)?;
    }

    let scrolled = args
        .scroll
        .iter()
        .map(|&dy| engine.scroll_by(dy, &mut host))
        .collect();

    let smooth_scroll = args
        .smooth_to
        .and_then(|target| engine.smooth_scroll_to(target));

    if let Some(path) = &args.state_out {
        std::fs::write(path, engine.serialize_state().to_bytes())?;
    }

    let attached = engine
        .attached()
        .map(|item| {
            let (row, index) = engine.cell_location(item.position).unwrap_or_default();
            CellReport {
                position: item.position,
                row,
                index,
                rect: item.rect,
            }
        })
        .collect();

    Ok(Report {
        version: env!("CARGO_PKG_VERSION"),
        item_count: engine.item_count(),
        column_counts: engine.column_counts().to_vec(),
        cell_size: engine.cell_size(),
        rows: engine.rows_count(),
        content_height: engine.content_height(),
        anchor: engine.serialize_state(),
        scrolled,
        smooth_scroll,
        attached,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cyclegrid {}", self.version)?;
        writeln!(
            f,
            "items: {}  columns: {:?}  cell: {}px  rows: {}  content: {}px",
            self.item_count, self.column_counts, self.cell_size, self.rows, self.content_height
        )?;
        writeln!(
            f,
            "anchor: position {} offset {}",
            self.anchor.anchor_position, self.anchor.anchor_offset
        )?;
        if !self.scrolled.is_empty() {
            write!(f, "scrolled:")?;
            for delta in &self.scrolled {
                write!(f, " {delta:+}")?;
            }
            writeln!(f)?;
        }
        if let Some(smooth) = &self.smooth_scroll {
            let direction = match smooth.direction {
                Some(ScrollDirection::Backward) => "backward",
                Some(ScrollDirection::Forward) => "forward",
                None => "jump",
            };
            writeln!(
                f,
                "smooth scroll: target {} {}, snap to start",
                smooth.target, direction
            )?;
        }
        writeln!(f, "attached ({}):", self.attached.len())?;
        for cell in &self.attached {
            let r = cell.rect;
            writeln!(
                f,
                "  #{:<6} row {:<5} col {:<3} [{}, {}, {}, {}]",
                cell.position, cell.row, cell.index, r.left, r.top, r.right, r.bottom
            )?;
        }
        Ok(())
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    if let Err(err) = cyclegrid::logging::init(&config.log_file_path) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!(config = ?config, "Configuration loaded and resolved");

    let report = simulate(&args, &config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
