//! Host port: the view-system capabilities the layout engine calls into.
//!
//! The engine never creates or draws item views itself. It asks the host for a view
//! bound to a position, tells it where to put that view, and hands views back when they
//! scroll out. Any view system (a retained UI tree, a test double, a terminal renderer)
//! plugs in by implementing [`GridHost`].
//!
//! # Contract
//! - Calls are synchronous and never re-enter the engine.
//! - `obtain_view(p)` returns a handle bound to position `p`; `position_of` on that
//!   handle must keep returning `p` until the handle is recycled.
//! - A handle is attached at most once at a time. The engine always detaches before it
//!   recycles.

use crate::model::Rect;
use std::fmt::Debug;

/// View-system capabilities consumed by [`crate::layout::LayoutEngine`].
pub trait GridHost {
    /// Opaque, cheap-to-copy handle to an item container.
    type View: Copy + Eq + Debug;

    /// Return a view bound to `position`, reusing a recycled one when available.
    fn obtain_view(&mut self, position: usize) -> Self::View;

    /// Make `view` part of the visible tree. `at_front` inserts it before every other
    /// attached view (top-to-bottom order is preserved by the engine).
    fn attach(&mut self, view: Self::View, at_front: bool);

    /// Remove `view` from the visible tree without releasing it.
    fn detach(&mut self, view: Self::View);

    /// Release a detached view to the host's reuse pool.
    fn recycle(&mut self, view: Self::View);

    /// Measure `view` as a `size` x `size` square.
    fn measure_square(&mut self, view: Self::View, size: i32);

    /// Adapter position the view is currently bound to.
    fn position_of(&self, view: Self::View) -> usize;

    /// Place `view` at `rect` in viewport coordinates.
    fn layout_rect(&mut self, view: Self::View, rect: Rect);
}
