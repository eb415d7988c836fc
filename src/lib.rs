//! cyclegrid
//!
//! Virtualized grid layout with a cyclic, per-row column schedule.
//!
//! Items are square cells. Row `r` holds `column_counts[r % len]` cells, centered
//! horizontally; only rows intersecting the viewport are attached to the host. The
//! engine is pure core logic: a host plugs in through [`host::GridHost`] and drives
//! [`layout::LayoutEngine`].

pub mod config;
pub mod host;
pub mod layout;
pub mod logging;
pub mod model;
pub mod sim;

pub use host::GridHost;
pub use layout::{GridLayout, LayoutEngine};
