//! Vertical scrolling: delta clamping, child shifting and smooth-scroll requests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::anchor::AnchorState;
use super::fill::AttachedView;
use super::frame::GridFrame;
use crate::host::GridHost;

/// Sign of the scroll needed to bring a position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Towards lower positions (content moves down).
    Backward,
    /// Towards higher positions (content moves up).
    Forward,
}

impl ScrollDirection {
    /// Unit vertical vector: `-1` or `+1`.
    pub fn unit(self) -> i32 {
        match self {
            ScrollDirection::Backward => -1,
            ScrollDirection::Forward => 1,
        }
    }
}

/// Where an animated scroll should leave its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPreference {
    /// Target's top edge aligned with the viewport's top padding.
    Start,
}

/// An animated scroll for the host to run.
///
/// The host drives the animation by calling `scroll_by` with per-frame deltas in
/// `direction` until `target` is attached and snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothScroll {
    /// Position to bring on screen.
    pub target: usize,
    /// `None` when nothing is attached to measure against; the host should jump
    /// straight to `target` instead of animating.
    pub direction: Option<ScrollDirection>,
    /// Final alignment.
    pub snap: SnapPreference,
}

/// Direction towards `target` relative to the first attached position.
pub fn scroll_vector_for_position<V>(
    attached: &VecDeque<AttachedView<V>>,
    target: usize,
) -> Option<ScrollDirection> {
    let first = attached.front()?;
    Some(if target < first.position {
        ScrollDirection::Backward
    } else {
        ScrollDirection::Forward
    })
}

/// Clamp a requested delta so content never scrolls past its first or last row.
///
/// The content's top edge is extrapolated from the first attached row and its bottom
/// edge from the last attached row, so the clamp holds even when neither boundary item
/// is attached. Returns 0 when nothing is attached or the content fits.
pub(crate) fn clamp_delta<V>(
    frame: &GridFrame<'_>,
    attached: &VecDeque<AttachedView<V>>,
    dy: i32,
) -> i32 {
    let (Some(first), Some(last)) = (attached.front(), attached.back()) else {
        return 0;
    };
    if dy == 0 || frame.content_fits() {
        return 0;
    }
    let padding = frame.viewport.padding;

    if dy < 0 {
        let content_top = first.rect.top - frame.geometry.row_top(frame.row_of(first.position));
        dy.max(content_top - padding.top).min(0)
    } else {
        let rows_after = frame.rows_count() - 1 - frame.row_of(last.position);
        let content_bottom = last.rect.bottom + frame.geometry.row_top(rows_after);
        dy.min(content_bottom - frame.viewport.height + padding.bottom)
            .max(0)
    }
}

/// Top edge of row 0 extrapolated from the first attached view.
pub(crate) fn content_top<V>(
    frame: &GridFrame<'_>,
    attached: &VecDeque<AttachedView<V>>,
) -> Option<i32> {
    let first = attached.front()?;
    Some(first.rect.top - frame.geometry.row_top(frame.row_of(first.position)))
}

/// Anchor for a scroll that moved every attached row off screen: the first cell of the
/// topmost row whose bottom is still below the viewport top, given row 0 at
/// `content_top`.
pub(crate) fn anchor_after_jump(frame: &GridFrame<'_>, content_top: i32) -> AnchorState {
    let size = frame.cell_size();
    let pitch = frame.geometry.row_pitch();
    let row = if content_top + size > 0 || pitch <= 0 {
        0
    } else {
        ((-content_top - size) / pitch + 1) as usize
    };
    let row = row.min(frame.rows_count().saturating_sub(1));
    let top = content_top + frame.geometry.row_top(row);
    AnchorState::new(
        frame.schedule.first_position_of_row(row),
        top - frame.viewport.padding.top,
    )
}

/// Move every attached view by `-delta` vertically, updating the cached rects.
pub(crate) fn offset_children<H: GridHost>(
    attached: &mut VecDeque<AttachedView<H::View>>,
    delta: i32,
    host: &mut H,
) {
    for item in attached.iter_mut() {
        item.rect = item.rect.offset_vertical(-delta);
        host.layout_rect(item.view, item.rect);
    }
}
