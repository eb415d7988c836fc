//! Grid layout engine.
//!
//! Leaf modules hold the pure pieces (schedule, adaptive sizing, geometry, anchor math);
//! [`fill`] and [`scroll`] talk to the host; [`engine`] ties them together behind
//! [`LayoutEngine`].

pub mod adaptive;
pub mod anchor;
pub mod engine;
pub mod fill;
mod frame;
pub mod geometry;
pub mod schedule;
pub mod scroll;

pub use anchor::{select_anchor, AnchorState};
pub use engine::{GridLayout, LayoutEngine};
pub use fill::{AttachedView, FillStats};
pub use geometry::Geometry;
pub use schedule::{ColumnSchedule, PositionIndex};
pub use scroll::{scroll_vector_for_position, ScrollDirection, SmoothScroll, SnapPreference};
