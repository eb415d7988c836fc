//! Read-only view over the derived layout state of one pass.

use super::geometry::Geometry;
use super::schedule::{ColumnSchedule, PositionIndex};
use crate::model::Viewport;
#[cfg(test)]
use crate::model::{Margins, Padding};

/// Borrowed bundle of everything a fill or scroll computation reads.
///
/// Built fresh for each pass from the engine's fields, so the attached-view list can be
/// borrowed mutably alongside it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GridFrame<'a> {
    pub schedule: &'a ColumnSchedule,
    pub index: &'a PositionIndex,
    pub geometry: &'a Geometry,
    pub viewport: &'a Viewport,
}

impl GridFrame<'_> {
    pub fn item_count(&self) -> usize {
        self.index.len()
    }

    pub fn rows_count(&self) -> usize {
        self.index.rows_count()
    }

    /// Height of all rows including vertical margins.
    pub fn content_height(&self) -> i32 {
        self.geometry.rows_height(self.rows_count())
    }

    /// Whether every row fits in the viewport at once.
    pub fn content_fits(&self) -> bool {
        self.content_height() <= self.viewport.available_height()
    }

    pub fn cell_size(&self) -> i32 {
        self.geometry.cell_size()
    }

    pub fn row_of(&self, position: usize) -> usize {
        self.index.row_of(position)
    }

    pub fn index_in_row(&self, position: usize) -> usize {
        self.index.index_in_row(position)
    }

    pub fn child_count_for_row(&self, row: usize) -> usize {
        self.schedule.child_count_for_row(row)
    }

    /// Left edge of `position`'s cell.
    pub fn left_of(&self, position: usize) -> i32 {
        let row = self.row_of(position);
        self.geometry
            .left_offset(self.child_count_for_row(row), self.index_in_row(position))
    }
}

/// Owned state behind a [`GridFrame`] for unit tests: 300px of cells, no margins.
#[cfg(test)]
pub(crate) struct FrameFixture {
    pub schedule: ColumnSchedule,
    pub index: PositionIndex,
    pub geometry: Geometry,
    pub viewport: Viewport,
}

#[cfg(test)]
impl FrameFixture {
    pub fn new(counts: &[usize], items: usize, height: i32, padding: Padding) -> Self {
        let schedule = ColumnSchedule::new(counts.to_vec());
        let index = PositionIndex::build(&schedule, items);
        let viewport = Viewport::new(300 + padding.left + padding.right, height, padding);
        let geometry =
            Geometry::compute(&viewport, Margins::default(), schedule.max_column_count())
                .unwrap();
        Self {
            schedule,
            index,
            geometry,
            viewport,
        }
    }

    pub fn frame(&self) -> GridFrame<'_> {
        GridFrame {
            schedule: &self.schedule,
            index: &self.index,
            geometry: &self.geometry,
            viewport: &self.viewport,
        }
    }
}
