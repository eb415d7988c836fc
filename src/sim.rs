//! In-memory [`GridHost`] for the CLI, tests and benchmarks.
//!
//! Views are plain records in a slab. Recycled views go to a LIFO pool and are rebound
//! on the next `obtain_view`, the way a real view system reuses item containers.

use std::collections::VecDeque;

use serde::Serialize;

use crate::host::GridHost;
use crate::model::Rect;

/// Handle to a simulated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewId(pub u32);

/// State of one simulated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SimView {
    /// Bound adapter position.
    pub position: usize,
    /// Last measured square side.
    pub measured: Option<i32>,
    /// Last laid-out rectangle.
    pub rect: Option<Rect>,
    /// Whether the view is in the visible tree.
    pub attached: bool,
}

/// Host call counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HostStats {
    /// Views created from scratch.
    pub created: usize,
    /// Pooled views bound to a new position.
    pub rebound: usize,
    /// `attach` calls.
    pub attaches: usize,
    /// `detach` calls.
    pub detaches: usize,
    /// `recycle` calls.
    pub recycles: usize,
    /// `measure_square` calls.
    pub measures: usize,
    /// `layout_rect` calls.
    pub layouts: usize,
}

/// Slab-backed host with an attach-ordered visible list.
#[derive(Debug, Default)]
pub struct MemoryHost {
    views: Vec<SimView>,
    pool: Vec<ViewId>,
    attached: VecDeque<ViewId>,
    stats: HostStats,
}

impl MemoryHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `view`.
    ///
    /// # Panics
    /// If `view` was not issued by this host.
    pub fn view(&self, view: ViewId) -> &SimView {
        &self.views[view.0 as usize]
    }

    /// Attached views in visible-tree order.
    pub fn attached(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.attached.iter().copied()
    }

    /// Positions of attached views in visible-tree order.
    pub fn attached_positions(&self) -> Vec<usize> {
        self.attached
            .iter()
            .map(|&id| self.view(id).position)
            .collect()
    }

    /// Total views ever created.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Views waiting in the reuse pool.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Call counters since creation or the last [`MemoryHost::reset_stats`].
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Zero the call counters.
    pub fn reset_stats(&mut self) {
        self.stats = HostStats::default();
    }

    fn view_mut(&mut self, view: ViewId) -> &mut SimView {
        &mut self.views[view.0 as usize]
    }
}

impl GridHost for MemoryHost {
    type View = ViewId;

    fn obtain_view(&mut self, position: usize) -> ViewId {
        if let Some(id) = self.pool.pop() {
            self.stats.rebound += 1;
            *self.view_mut(id) = SimView {
                position,
                ..SimView::default()
            };
            return id;
        }
        let id = ViewId(self.views.len() as u32);
        self.views.push(SimView {
            position,
            ..SimView::default()
        });
        self.stats.created += 1;
        id
    }

    fn attach(&mut self, view: ViewId, at_front: bool) {
        debug_assert!(!self.view(view).attached, "{view:?} attached twice");
        self.view_mut(view).attached = true;
        if at_front {
            self.attached.push_front(view);
        } else {
            self.attached.push_back(view);
        }
        self.stats.attaches += 1;
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(at) = self.attached.iter().position(|&id| id == view) {
            self.attached.remove(at);
        }
        self.view_mut(view).attached = false;
        self.stats.detaches += 1;
    }

    fn recycle(&mut self, view: ViewId) {
        debug_assert!(!self.view(view).attached, "{view:?} recycled while attached");
        self.pool.push(view);
        self.stats.recycles += 1;
    }

    fn measure_square(&mut self, view: ViewId, size: i32) {
        self.view_mut(view).measured = Some(size);
        self.stats.measures += 1;
    }

    fn position_of(&self, view: ViewId) -> usize {
        self.view(view).position
    }

    fn layout_rect(&mut self, view: ViewId, rect: Rect) {
        self.view_mut(view).rect = Some(rect);
        self.stats.layouts += 1;
    }
}
