//! Cyclic column schedule and the position index built from it.

/// Resolved cyclic sequence of per-row column counts.
///
/// # Invariants
/// - Non-empty, every entry > 0
/// - `max_column_count == max(counts)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchedule {
    counts: Vec<usize>,
    max_column_count: usize,
}

impl ColumnSchedule {
    /// Build a schedule from already-validated counts.
    ///
    /// # Panics
    /// In debug builds, if `counts` is empty or contains a zero. Callers go through
    /// [`crate::model::LayoutConfig`] or the adaptive sizer, both of which guarantee this.
    pub fn new(counts: Vec<usize>) -> Self {
        debug_assert!(!counts.is_empty(), "column schedule must not be empty");
        debug_assert!(
            counts.iter().all(|&c| c > 0),
            "column counts must be > 0: {counts:?}"
        );
        let max_column_count = counts.iter().copied().max().unwrap_or(1);
        Self {
            counts,
            max_column_count,
        }
    }

    /// Column count of `row`, cycling through the sequence.
    pub fn child_count_for_row(&self, row: usize) -> usize {
        self.counts[row % self.counts.len()]
    }

    /// Widest row.
    pub fn max_column_count(&self) -> usize {
        self.max_column_count
    }

    /// The raw cycle.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Position of the first cell in `row`.
    pub fn first_position_of_row(&self, row: usize) -> usize {
        let per_cycle: usize = self.counts.iter().sum();
        let len = self.counts.len();
        (row / len) * per_cycle + self.counts[..row % len].iter().sum::<usize>()
    }
}

/// Row and in-row index of every position in `[0, item_count)`.
///
/// Rebuilt from scratch (O(item_count)) only when the item count or the schedule
/// changes. Lookups are O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    rows: Vec<u32>,
    index_in_row: Vec<u32>,
    rows_count: usize,
}

impl PositionIndex {
    /// Walk positions `0..item_count`, filling each row to its capacity before
    /// moving to the next. The final row may be partial.
    pub fn build(schedule: &ColumnSchedule, item_count: usize) -> Self {
        let mut rows = Vec::with_capacity(item_count);
        let mut index_in_row = Vec::with_capacity(item_count);

        let mut row = 0usize;
        let mut capacity = schedule.child_count_for_row(row);
        let mut current = 0usize;

        for position in 0..item_count {
            rows.push(row as u32);
            index_in_row.push(current as u32);
            current += 1;
            if current == capacity && position + 1 < item_count {
                row += 1;
                capacity = schedule.child_count_for_row(row);
                current = 0;
            }
        }

        let rows_count = if item_count == 0 { 0 } else { row + 1 };
        Self {
            rows,
            index_in_row,
            rows_count,
        }
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no positions are indexed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of (possibly partial) rows.
    pub fn rows_count(&self) -> usize {
        self.rows_count
    }

    /// Row of `position`.
    ///
    /// # Panics
    /// If `position >= len()`; a miss is a host contract violation.
    pub fn row_of(&self, position: usize) -> usize {
        self.rows[position] as usize
    }

    /// Index of `position` within its row.
    ///
    /// # Panics
    /// If `position >= len()`.
    pub fn index_in_row(&self, position: usize) -> usize {
        self.index_in_row[position] as usize
    }
}
