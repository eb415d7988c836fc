//! The layout engine: owns configuration and derived state, drives fill passes.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use tracing::{debug, info, trace, warn};

use super::adaptive;
use super::anchor::{select_anchor, AnchorState};
use super::fill::{self, AttachedView, FillStats};
use super::frame::GridFrame;
use super::geometry::Geometry;
use super::schedule::{ColumnSchedule, PositionIndex};
use super::scroll::{self, SmoothScroll, SnapPreference};
use crate::host::GridHost;
use crate::model::{InvalidConfig, LayoutConfig, LayoutError, SavedState, Viewport};

/// Capability set a host drives: relayout, scrolling and state persistence.
pub trait GridLayout<H: GridHost> {
    /// Full structural relayout.
    fn layout(&mut self, host: &mut H) -> Result<(), LayoutError>;

    /// Scroll by `dy` pixels (positive moves content up). Returns the distance consumed.
    fn scroll_by(&mut self, dy: i32, host: &mut H) -> i32;

    /// Animated scroll request towards `target`.
    fn smooth_scroll_to(&self, target: usize) -> Option<SmoothScroll>;

    /// Snapshot the scroll position.
    fn serialize_state(&self) -> SavedState;

    /// Install a snapshot; takes effect on the next layout.
    fn restore_state(&mut self, state: SavedState);
}

/// Virtualized grid with a cyclic per-row column schedule.
///
/// The host reports viewport and dataset changes, calls [`LayoutEngine::layout`] when
/// [`LayoutEngine::is_layout_requested`] is set, and forwards scroll gestures to
/// [`LayoutEngine::scroll_by`]. Only rows intersecting the viewport are ever attached.
#[derive(Debug)]
pub struct LayoutEngine<V> {
    config: LayoutConfig,
    schedule: ColumnSchedule,
    /// Maximum the adaptive schedule was derived from.
    adaptive_resolved: Option<usize>,
    index: PositionIndex,
    index_dirty: bool,
    geometry: Geometry,
    viewport: Viewport,
    item_count: usize,
    anchor: AnchorState,
    attached: VecDeque<AttachedView<V>>,
    scrap: HashMap<usize, AttachedView<V>>,
    layout_requested: bool,
    /// Geometry and index reflect a successful layout.
    laid_out: bool,
}

impl<V: Copy + Eq + Debug> LayoutEngine<V> {
    /// Engine with no items and an unmeasured viewport.
    pub fn new(config: LayoutConfig) -> Self {
        let schedule = ColumnSchedule::new(config.column_counts().to_vec());
        Self {
            config,
            schedule,
            adaptive_resolved: None,
            index: PositionIndex::default(),
            index_dirty: true,
            geometry: Geometry::default(),
            viewport: Viewport::default(),
            item_count: 0,
            anchor: AnchorState::default(),
            attached: VecDeque::new(),
            scrap: HashMap::new(),
            layout_requested: true,
            laid_out: false,
        }
    }

    // ===== Reconfiguration =====

    /// Replace the cycle and leave adaptive mode. Everything is re-attached on the next
    /// layout.
    ///
    /// # Errors
    /// [`InvalidConfig`] if the sequence is empty or has a non-positive entry; the
    /// current configuration is kept.
    pub fn set_column_counts(&mut self, column_counts: &[i64]) -> Result<(), InvalidConfig> {
        let config = self.config.clone().with_column_counts(column_counts)?;
        self.schedule = ColumnSchedule::new(config.column_counts().to_vec());
        self.config = config;
        self.adaptive_resolved = None;
        self.index_dirty = true;
        self.request_layout();
        info!(column_counts = ?self.schedule.counts(), "Column counts changed");
        Ok(())
    }

    /// Change the gaps between cells. Requests a layout only when they differ.
    ///
    /// # Errors
    /// [`InvalidConfig::NegativeMargin`] for a negative margin.
    pub fn set_child_margins(
        &mut self,
        horizontal: i32,
        vertical: i32,
    ) -> Result<(), InvalidConfig> {
        let config = self.config.clone().with_margins(horizontal, vertical)?;
        if config.margins() == self.config.margins() {
            return Ok(());
        }
        self.config = config;
        self.request_layout();
        info!(horizontal, vertical, "Child margins changed");
        Ok(())
    }

    /// Switch to adaptive mode: the widest row holds as many `min_cell_size` cells as fit,
    /// and each entry of `offsets` yields one row of `max(1, max - offset)` cells.
    ///
    /// # Errors
    /// [`InvalidConfig`] for a non-positive size or a negative offset.
    pub fn set_adaptive_size(
        &mut self,
        min_cell_size: i32,
        offsets: &[i64],
    ) -> Result<(), InvalidConfig> {
        self.config = self.config.clone().with_adaptive(min_cell_size, offsets)?;
        self.adaptive_resolved = None;
        self.request_layout();
        info!(min_cell_size, ?offsets, "Adaptive sizing enabled");
        Ok(())
    }

    /// Record new viewport dimensions. Requests a layout when anything changed.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.request_layout();
        }
    }

    /// Record a new dataset size. The content behind positions may have changed too,
    /// so a layout is always requested.
    pub fn on_item_count_changed(&mut self, item_count: usize) {
        if item_count != self.item_count {
            self.item_count = item_count;
            self.index_dirty = true;
        }
        self.request_layout();
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    // ===== Layout =====

    /// Structural relayout: re-derive everything that depends on configuration, viewport
    /// and item count, then fill from the persisted anchor.
    ///
    /// All attached views are recycled first, so on error nothing is attached.
    ///
    /// # Errors
    /// [`LayoutError::LayoutImpossible`] when no cell fits the viewport width.
    pub fn layout<H: GridHost<View = V>>(&mut self, host: &mut H) -> Result<(), LayoutError> {
        self.layout_requested = false;
        self.laid_out = false;
        self.recycle_all(host);

        if let Some(params) = self.config.adaptive() {
            let available_width = self.viewport.available_width();
            if let Some(schedule) =
                adaptive::resolve(available_width, params, &mut self.adaptive_resolved)?
            {
                info!(
                    available_width,
                    column_counts = ?schedule.counts(),
                    "Adaptive column counts resolved"
                );
                self.schedule = schedule;
                self.index_dirty = true;
            }
        }

        self.geometry = Geometry::compute(
            &self.viewport,
            self.config.margins(),
            self.schedule.max_column_count(),
        )?;

        if self.index_dirty {
            self.index = PositionIndex::build(&self.schedule, self.item_count);
            self.index_dirty = false;
        }
        self.laid_out = true;

        let stats = self.fill(host);
        debug!(
            item_count = self.item_count,
            column_counts = ?self.schedule.counts(),
            rows = self.index.rows_count(),
            cell_size = self.geometry.cell_size(),
            created = stats.created,
            "Layout pass"
        );
        Ok(())
    }

    /// Re-run the fill pass against the current geometry without a structural relayout.
    ///
    /// Does nothing while a layout is pending or after a failed one.
    pub fn refill<H: GridHost<View = V>>(&mut self, host: &mut H) -> FillStats {
        if self.layout_requested || !self.laid_out {
            return FillStats::default();
        }
        self.fill(host)
    }

    fn fill<H: GridHost<View = V>>(&mut self, host: &mut H) -> FillStats {
        let frame = GridFrame {
            schedule: &self.schedule,
            index: &self.index,
            geometry: &self.geometry,
            viewport: &self.viewport,
        };
        fill::fill(
            &frame,
            &mut self.attached,
            &mut self.scrap,
            &mut self.anchor,
            host,
        )
    }

    fn recycle_all<H: GridHost<View = V>>(&mut self, host: &mut H) {
        for item in self.attached.drain(..) {
            host.detach(item.view);
            host.recycle(item.view);
        }
    }

    // ===== Scrolling =====

    /// Scroll content by up to `dy` pixels and attach or recycle rows as needed.
    ///
    /// Returns the distance actually scrolled: 0 when nothing is attached, the content
    /// fits, a boundary is reached, or a layout is pending.
    pub fn scroll_by<H: GridHost<View = V>>(&mut self, dy: i32, host: &mut H) -> i32 {
        if self.layout_requested || !self.laid_out {
            return 0;
        }
        let frame = GridFrame {
            schedule: &self.schedule,
            index: &self.index,
            geometry: &self.geometry,
            viewport: &self.viewport,
        };
        let delta = scroll::clamp_delta(&frame, &self.attached, dy);
        if delta != 0 {
            let content_top = scroll::content_top(&frame, &self.attached);
            scroll::offset_children(&mut self.attached, delta, host);
            let bounds = self.viewport.bounds();
            if select_anchor(self.attached.iter(), bounds).is_none() {
                // jumped past every attached row
                if let Some(content_top) = content_top {
                    self.anchor = scroll::anchor_after_jump(&frame, content_top - delta);
                }
            }
            self.fill(host);
        }
        trace!(requested = dy, consumed = delta, "Scroll");
        delta
    }

    /// Jump so `position` becomes the anchor at the top padding. Out-of-range positions
    /// jump to the start. Takes effect on the next layout.
    pub fn scroll_to_position<H: GridHost<View = V>>(&mut self, position: usize, host: &mut H) {
        let position = if position < self.item_count {
            position
        } else {
            warn!(position, item_count = self.item_count, "Scroll target out of range");
            0
        };
        self.recycle_all(host);
        self.anchor = AnchorState::new(position, 0);
        self.request_layout();
    }

    /// Animated scroll towards `target`, or `None` if it does not exist.
    pub fn smooth_scroll_to(&self, target: usize) -> Option<SmoothScroll> {
        if target >= self.item_count {
            return None;
        }
        Some(SmoothScroll {
            target,
            direction: scroll::scroll_vector_for_position(&self.attached, target),
            snap: SnapPreference::Start,
        })
    }

    // ===== Persistence =====

    /// Current anchor as a persistable record.
    pub fn serialize_state(&self) -> SavedState {
        self.anchor.to_saved()
    }

    /// Install `state` as the anchor for the next layout.
    pub fn restore_state(&mut self, state: SavedState) {
        self.anchor = AnchorState::from_saved(state);
        self.request_layout();
    }

    // ===== Introspection =====

    /// Attached views, top to bottom and left to right.
    pub fn attached(&self) -> impl Iterator<Item = &AttachedView<V>> + '_ {
        self.attached.iter()
    }

    /// Number of attached views.
    pub fn attached_len(&self) -> usize {
        self.attached.len()
    }

    /// Current anchor.
    pub fn anchor_state(&self) -> AnchorState {
        self.anchor
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Column cycle in effect (resolved, in adaptive mode).
    pub fn column_counts(&self) -> &[usize] {
        self.schedule.counts()
    }

    /// Widest row in the cycle.
    pub fn max_column_count(&self) -> usize {
        self.schedule.max_column_count()
    }

    /// Side of every cell as of the last layout.
    pub fn cell_size(&self) -> i32 {
        self.geometry.cell_size()
    }

    /// Number of rows as of the last layout.
    pub fn rows_count(&self) -> usize {
        self.index.rows_count()
    }

    /// Height of all rows as of the last layout.
    pub fn content_height(&self) -> i32 {
        self.geometry.rows_height(self.index.rows_count())
    }

    /// `(row, index_in_row)` of `position` as of the last layout.
    pub fn cell_location(&self, position: usize) -> Option<(usize, usize)> {
        (position < self.index.len())
            .then(|| (self.index.row_of(position), self.index.index_in_row(position)))
    }

    /// Dataset size last reported.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Viewport last reported.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether the host should call [`LayoutEngine::layout`].
    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }
}

impl<H: GridHost> GridLayout<H> for LayoutEngine<H::View> {
    fn layout(&mut self, host: &mut H) -> Result<(), LayoutError> {
        LayoutEngine::layout(self, host)
    }

    fn scroll_by(&mut self, dy: i32, host: &mut H) -> i32 {
        LayoutEngine::scroll_by(self, dy, host)
    }

    fn smooth_scroll_to(&self, target: usize) -> Option<SmoothScroll> {
        LayoutEngine::smooth_scroll_to(self, target)
    }

    fn serialize_state(&self) -> SavedState {
        LayoutEngine::serialize_state(self)
    }

    fn restore_state(&mut self, state: SavedState) {
        LayoutEngine::restore_state(self, state)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
