//! Square cell sizing and horizontal placement.

use crate::model::{LayoutImpossible, Margins, Viewport};

/// Cell size and spacing derived for one structural layout.
///
/// `cell_size` is the single source of truth for cell dimensions: every cell is
/// `cell_size` x `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    available_width: i32,
    cell_size: i32,
    margins: Margins,
    padding_left: i32,
}

impl Geometry {
    /// Derive geometry for `max_column_count` columns in `viewport`.
    ///
    /// `cell_size = floor((available_width - margin_h * (max - 1)) / max)`.
    ///
    /// # Errors
    /// [`LayoutImpossible::NonPositiveCellSize`] if margins leave no room for cells.
    pub fn compute(
        viewport: &Viewport,
        margins: Margins,
        max_column_count: usize,
    ) -> Result<Self, LayoutImpossible> {
        let available_width = viewport.available_width();
        let columns = max_column_count.max(1) as i64;
        let gaps = i64::from(margins.horizontal) * (columns - 1);
        let cell_size = (i64::from(available_width) - gaps).div_euclid(columns);
        if cell_size <= 0 {
            return Err(LayoutImpossible::NonPositiveCellSize {
                available_width,
                max_column_count,
                cell_size: cell_size.max(i64::from(i32::MIN)) as i32,
            });
        }
        Ok(Self {
            available_width,
            cell_size: cell_size as i32,
            margins,
            padding_left: viewport.padding.left,
        })
    }

    /// Side of every cell.
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Width available to cells.
    pub fn available_width(&self) -> i32 {
        self.available_width
    }

    /// Vertical distance between the tops of consecutive rows.
    pub fn row_pitch(&self) -> i32 {
        self.cell_size + self.margins.vertical
    }

    /// Horizontal distance between the left edges of neighbouring cells.
    pub fn column_pitch(&self) -> i32 {
        self.cell_size + self.margins.horizontal
    }

    /// Offset that centers a row of `count` cells.
    pub fn center_offset(&self, count: usize) -> i32 {
        let count = count as i32;
        (self.available_width - self.cell_size * count - self.margins.horizontal * (count - 1))
            .div_euclid(2)
    }

    /// Left edge of the cell at `index` in a row of `count` cells, padding included.
    pub fn left_offset(&self, count: usize, index: usize) -> i32 {
        self.padding_left + self.center_offset(count) + self.column_pitch() * index as i32
    }

    /// Distance from the top of row 0 to the top of `row`.
    pub fn row_top(&self, row: usize) -> i32 {
        self.row_pitch() * row as i32
    }

    /// Height of `rows` rows including the margins between them.
    pub fn rows_height(&self, rows: usize) -> i32 {
        if rows == 0 {
            0
        } else {
            let rows = rows as i32;
            self.cell_size * rows + self.margins.vertical * (rows - 1)
        }
    }
}
