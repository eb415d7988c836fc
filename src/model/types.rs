//! Core geometry newtypes shared by the layout engine and its hosts.
//!
//! All coordinates are integer pixels in the viewport's coordinate space:
//! `(0, 0)` is the top-left corner of the viewport (padding included).

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport pixels.
///
/// `right` and `bottom` are exclusive edges, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of side `size` with its top-left corner at `(left, top)`.
    pub fn square(left: i32, top: i32, size: i32) -> Self {
        Self::new(left, top, left + size, top + size)
    }

    /// Width in pixels (never negative).
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    /// Height in pixels (never negative).
    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    /// Area in square pixels. Widened to avoid overflow on large viewports.
    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Intersection with `other`, or `None` when the rectangles share no area.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Rect::new(left, top, right, bottom))
        } else {
            None
        }
    }

    /// Same rectangle moved vertically by `dy`.
    pub fn offset_vertical(&self, dy: i32) -> Rect {
        Rect::new(self.left, self.top + dy, self.right, self.bottom + dy)
    }
}

/// Inner padding of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    /// Left padding.
    pub left: i32,
    /// Top padding.
    pub top: i32,
    /// Right padding.
    pub right: i32,
    /// Bottom padding.
    pub bottom: i32,
}

impl Padding {
    /// Create padding from explicit sides.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on all four sides.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Scrollable viewport: outer size plus inner padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Outer width in pixels.
    pub width: i32,
    /// Outer height in pixels.
    pub height: i32,
    /// Inner padding.
    pub padding: Padding,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: i32, height: i32, padding: Padding) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Horizontal space left for cells once padding is removed.
    pub fn available_width(&self) -> i32 {
        self.width - self.padding.left - self.padding.right
    }

    /// Vertical space left for cells once padding is removed.
    pub fn available_height(&self) -> i32 {
        self.height - self.padding.top - self.padding.bottom
    }

    /// Outer bounds, used for visibility tests.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}
