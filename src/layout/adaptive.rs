//! Width-driven column count resolution.

use super::schedule::ColumnSchedule;
use crate::model::{AdaptiveParams, LayoutImpossible};

/// Largest number of `min_cell_size` cells that fit in `available_width`.
///
/// # Errors
/// [`LayoutImpossible::NoColumnsFit`] when not even one cell fits.
pub fn resolve_max_column_count(
    available_width: i32,
    params: &AdaptiveParams,
) -> Result<usize, LayoutImpossible> {
    let min_cell_size = params.min_cell_size();
    let max = if available_width > 0 {
        available_width / min_cell_size
    } else {
        0
    };
    if max <= 0 {
        return Err(LayoutImpossible::NoColumnsFit {
            available_width,
            min_cell_size,
        });
    }
    Ok(max as usize)
}

/// Cycle for a resolved maximum: one row per offset, each `max(1, max - offset)`,
/// or just `[max]` when there are no offsets.
pub fn schedule_for(max_column_count: usize, params: &AdaptiveParams) -> ColumnSchedule {
    let offsets = params.offsets();
    if offsets.is_empty() {
        return ColumnSchedule::new(vec![max_column_count]);
    }
    let counts = offsets
        .iter()
        .map(|&offset| max_column_count.saturating_sub(offset).max(1))
        .collect();
    ColumnSchedule::new(counts)
}

/// Recompute the schedule only when the resolved maximum changes.
///
/// `resolved` holds the maximum the current schedule was derived from (`None` right
/// after adaptive mode was switched on). Returns the new schedule when one was
/// derived, `None` when the current one stays. Pixel noise that keeps the same
/// maximum never reshuffles the rows.
pub fn resolve(
    available_width: i32,
    params: &AdaptiveParams,
    resolved: &mut Option<usize>,
) -> Result<Option<ColumnSchedule>, LayoutImpossible> {
    let max = resolve_max_column_count(available_width, params)?;
    if *resolved == Some(max) {
        return Ok(None);
    }
    *resolved = Some(max);
    Ok(Some(schedule_for(max, params)))
}
