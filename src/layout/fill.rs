//! The fill pass: attach exactly the rows that intersect the viewport.
//!
//! Every attached view is detached into a position-keyed scrap cache first. Rows are then
//! placed upward and downward from the anchor; views that were attached before are
//! re-attached at their cached geometry, new positions are obtained from the host,
//! measured and laid out. Whatever is left in the scrap cache is recycled.

use std::collections::{HashMap, VecDeque};

use tracing::{trace, warn};

use super::anchor::{resolve_origin, select_anchor, AnchorState};
use super::frame::GridFrame;
use crate::host::GridHost;
use crate::model::Rect;

/// A view the engine currently has attached, in top-to-bottom, left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedView<V> {
    /// Host handle.
    pub view: V,
    /// Adapter position bound to the view.
    pub position: usize,
    /// Rectangle the view was laid out at.
    pub rect: Rect,
}

/// Counts from one fill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Views re-attached from the scrap cache.
    pub reused: usize,
    /// Views obtained, measured and laid out.
    pub created: usize,
    /// Views returned to the host pool.
    pub recycled: usize,
}

/// Where the pass starts growing from.
#[derive(Debug, Clone, Copy)]
struct Start {
    position: usize,
    left: i32,
    top: i32,
}

/// Mutable state threaded through one pass.
struct Pass<'a, H: GridHost> {
    frame: &'a GridFrame<'a>,
    attached: &'a mut VecDeque<AttachedView<H::View>>,
    scrap: &'a mut HashMap<usize, AttachedView<H::View>>,
    host: &'a mut H,
    stats: FillStats,
}

impl<H: GridHost> Pass<'_, H> {
    fn place(&mut self, position: usize, rect: Rect, at_front: bool) {
        let item = match self.scrap.remove(&position) {
            Some(cached) => {
                self.host.attach(cached.view, at_front);
                self.stats.reused += 1;
                cached
            }
            None => {
                let view = self.host.obtain_view(position);
                self.host.attach(view, at_front);
                self.host.measure_square(view, rect.width());
                self.host.layout_rect(view, rect);
                self.stats.created += 1;
                AttachedView {
                    view,
                    position,
                    rect,
                }
            }
        };
        if at_front {
            self.attached.push_front(item);
        } else {
            self.attached.push_back(item);
        }
    }

    /// Rows above the anchor, and the anchor row's cells left of it. Stops once a row's
    /// bottom is at or above the viewport top, or after row 0.
    fn fill_up(&mut self, start: Start) {
        let frame = self.frame;
        let size = frame.cell_size();
        let column_pitch = frame.geometry.column_pitch();

        let mut position = start.position;
        let mut row = frame.row_of(position);
        let mut index = frame.index_in_row(position);
        let mut left = start.left;
        let mut bottom = start.top + size;

        while bottom > 0 {
            if position != start.position {
                self.place(position, Rect::square(left, bottom - size, size), true);
            }
            if index == 0 {
                if row == 0 {
                    return;
                }
                row -= 1;
                let count = frame.child_count_for_row(row);
                index = count - 1;
                bottom -= frame.geometry.row_pitch();
                left = frame.geometry.left_offset(count, index);
            } else {
                index -= 1;
                left -= column_pitch;
            }
            position -= 1;
        }
    }

    /// The anchor and everything after it, row by row, until a row starts below the
    /// viewport or positions run out.
    fn fill_down(&mut self, start: Start) {
        let frame = self.frame;
        let size = frame.cell_size();
        let column_pitch = frame.geometry.column_pitch();
        let height = frame.viewport.height;
        let item_count = frame.item_count();

        let mut position = start.position;
        let mut row = frame.row_of(position);
        let mut count = frame.child_count_for_row(row);
        let mut index = frame.index_in_row(position);
        let mut left = start.left;
        let mut top = start.top;

        while top <= height && position < item_count {
            self.place(position, Rect::square(left, top, size), false);
            position += 1;
            index += 1;
            if index == count {
                row += 1;
                count = frame.child_count_for_row(row);
                index = 0;
                top += frame.geometry.row_pitch();
                left = frame.geometry.left_offset(count, 0);
            } else {
                left += column_pitch;
            }
        }
    }
}

/// Run one fill pass.
///
/// The anchor is the attached view with the largest visible area; its position and
/// offset become the new `anchor_state`. With nothing attached the pass starts from
/// `anchor_state`, resetting it to `(0, 0)` first if the position no longer exists.
pub(crate) fn fill<H: GridHost>(
    frame: &GridFrame<'_>,
    attached: &mut VecDeque<AttachedView<H::View>>,
    scrap: &mut HashMap<usize, AttachedView<H::View>>,
    anchor_state: &mut AnchorState,
    host: &mut H,
) -> FillStats {
    let anchor = select_anchor(attached.iter(), frame.viewport.bounds()).copied();

    scrap.clear();
    for item in attached.drain(..) {
        debug_assert_eq!(
            host.position_of(item.view),
            item.position,
            "attached view rebound behind the engine's back"
        );
        host.detach(item.view);
        scrap.insert(item.position, item);
    }

    let item_count = frame.item_count();
    if anchor_state.reset_if_out_of_range(item_count) && item_count > 0 {
        warn!(item_count, "Anchor position out of range, resetting to start");
    }

    let start = match anchor {
        Some(anchor) if anchor.position < item_count => {
            *anchor_state = AnchorState::new(
                anchor.position,
                anchor.rect.top - frame.viewport.padding.top,
            );
            Some(Start {
                position: anchor.position,
                left: anchor.rect.left,
                top: anchor.rect.top,
            })
        }
        _ if item_count == 0 => None,
        _ => {
            let (left, top) = resolve_origin(frame, anchor_state);
            Some(Start {
                position: anchor_state.position,
                left,
                top,
            })
        }
    };

    let mut pass = Pass {
        frame,
        attached,
        scrap,
        host,
        stats: FillStats::default(),
    };
    if let Some(start) = start {
        pass.fill_up(start);
        pass.fill_down(start);
    }

    let Pass {
        scrap,
        host,
        mut stats,
        attached,
        ..
    } = pass;
    // recycle in position order so pool reuse is deterministic
    let mut leftovers: Vec<_> = scrap.drain().map(|(_, item)| item).collect();
    leftovers.sort_unstable_by_key(|item| item.position);
    for leftover in leftovers {
        host.recycle(leftover.view);
        stats.recycled += 1;
    }

    trace!(
        anchor = anchor_state.position,
        offset = anchor_state.offset,
        attached = attached.len(),
        reused = stats.reused,
        created = stats.created,
        recycled = stats.recycled,
        "Fill pass"
    );
    stats
}
