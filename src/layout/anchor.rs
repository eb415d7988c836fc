//! Anchor selection and scroll position persistence.
//!
//! The anchor is the item a fill pass grows outward from. While items are attached it is
//! the one with the largest visible area; otherwise the persisted [`AnchorState`] is
//! turned back into an on-screen origin.

use super::fill::AttachedView;
use super::frame::GridFrame;
use crate::model::{Rect, SavedState};

/// Persisted anchor: item position plus the pixel offset of its top edge from the
/// viewport's top padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorState {
    /// Adapter position of the anchor item.
    pub position: usize,
    /// Anchor top edge minus top padding.
    pub offset: i32,
}

impl AnchorState {
    /// Create an anchor state.
    pub fn new(position: usize, offset: i32) -> Self {
        Self { position, offset }
    }

    /// Reset to `(0, 0)` if the anchor no longer exists. Returns whether it was reset.
    pub fn reset_if_out_of_range(&mut self, item_count: usize) -> bool {
        if self.position >= item_count {
            *self = Self::default();
            true
        } else {
            false
        }
    }

    /// Wire form. Positions beyond `i32::MAX` saturate.
    pub fn to_saved(&self) -> SavedState {
        SavedState::new(
            i32::try_from(self.position).unwrap_or(i32::MAX),
            self.offset,
        )
    }

    /// Install a decoded record. A negative position can never be in range, so it
    /// becomes the origin right away.
    pub fn from_saved(state: SavedState) -> Self {
        match usize::try_from(state.anchor_position) {
            Ok(position) => Self::new(position, state.anchor_offset),
            Err(_) => Self::default(),
        }
    }
}

/// Attached item with the strictly largest intersection with `bounds`.
///
/// Ties keep the first item in iteration order. Items that do not intersect at all are
/// never chosen, so `None` means "fall back to the persisted state".
pub fn select_anchor<'a, V: 'a>(
    items: impl IntoIterator<Item = &'a AttachedView<V>>,
    bounds: Rect,
) -> Option<&'a AttachedView<V>> {
    let mut best = None;
    let mut best_area = 0i64;
    for item in items {
        let Some(visible) = item.rect.intersect(&bounds) else {
            continue;
        };
        let area = visible.area();
        if area > best_area {
            best_area = area;
            best = Some(item);
        }
    }
    best
}

/// Natural `(left, top)` of `position` when nothing is attached.
///
/// - Content fits the viewport: rows sit where they would from the top padding.
/// - Content from `position`'s row down fills the viewport: that row is aligned to the
///   top padding.
/// - Otherwise the last row's bottom is aligned to the bottom padding, so there is never
///   dead space below the last row while content could fill it.
pub(crate) fn compute_child_offsets(frame: &GridFrame<'_>, position: usize) -> (i32, i32) {
    let viewport = frame.viewport;
    let padding = viewport.padding;
    let row = frame.row_of(position);
    let left = frame.left_of(position);
    let available_height = viewport.available_height();
    let rows_above = frame.geometry.row_top(row);

    if frame.content_height() < available_height {
        return (left, padding.top + rows_above);
    }

    let rows_below = frame.geometry.rows_height(frame.rows_count() - row);
    if rows_below >= available_height {
        (left, padding.top)
    } else {
        (
            left,
            padding
                .top
                .max(viewport.height - padding.bottom - rows_below),
        )
    }
}

/// On-screen `(left, top)` of the persisted anchor.
///
/// With zero offset this equals [`compute_child_offsets`]. A non-zero offset is applied
/// from the top padding and then clamped twice: the anchor row must stay on screen,
/// and the content may not start below the top padding nor end above the bottom
/// padding. A record taken from a settled layout therefore restores to the exact same
/// placement.
pub(crate) fn resolve_origin(frame: &GridFrame<'_>, state: &AnchorState) -> (i32, i32) {
    let (left, natural_top) = compute_child_offsets(frame, state.position);
    let viewport = frame.viewport;
    let padding = viewport.padding;
    if frame.content_height() < viewport.available_height() {
        return (left, natural_top);
    }

    let size = frame.cell_size();
    let row = frame.row_of(state.position);
    let on_screen = (padding.top + state.offset)
        .max(1 - size)
        .min(viewport.height - 1);

    let rows_below = frame.geometry.rows_height(frame.rows_count() - row);
    let lowest = viewport.height - padding.bottom - rows_below;
    let highest = padding.top + frame.geometry.row_top(row);
    (left, on_screen.max(lowest).min(highest))
}
