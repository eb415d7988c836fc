//! Validated layout configuration.
//!
//! A [`LayoutConfig`] is only ever built through its validating constructors, so the
//! engine can rely on: at least one column count, every count > 0, margins >= 0,
//! adaptive min size > 0 and adaptive offsets >= 0. Reconfiguration replaces the whole
//! value; fields are never patched mid-layout.

use super::error::{InvalidConfig, MarginAxis};

/// Spacing between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Space between cells of the same row.
    pub horizontal: i32,
    /// Space between rows.
    pub vertical: i32,
}

impl Margins {
    /// Validate and create margins.
    pub fn new(horizontal: i32, vertical: i32) -> Result<Self, InvalidConfig> {
        if horizontal < 0 {
            return Err(InvalidConfig::NegativeMargin {
                axis: MarginAxis::Horizontal,
                value: horizontal,
            });
        }
        if vertical < 0 {
            return Err(InvalidConfig::NegativeMargin {
                axis: MarginAxis::Vertical,
                value: vertical,
            });
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }
}

/// Parameters for width-driven column count resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveParams {
    min_cell_size: i32,
    offsets: Vec<usize>,
}

impl AdaptiveParams {
    /// Validate and create adaptive parameters.
    ///
    /// `offsets` holds one entry per row of the resulting cycle; each row gets
    /// `max(1, max_column_count - offset)` columns. Empty means a single-row cycle.
    pub fn new(min_cell_size: i32, offsets: &[i64]) -> Result<Self, InvalidConfig> {
        if min_cell_size <= 0 {
            return Err(InvalidConfig::NonPositiveMinCellSize(min_cell_size));
        }
        let offsets = offsets
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                usize::try_from(value)
                    .map_err(|_| InvalidConfig::NegativeAdaptiveOffset { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            min_cell_size,
            offsets,
        })
    }

    /// Minimum side of a cell in pixels.
    pub fn min_cell_size(&self) -> i32 {
        self.min_cell_size
    }

    /// Per-row column count offsets.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    column_counts: Vec<usize>,
    max_column_count: usize,
    margins: Margins,
    adaptive: Option<AdaptiveParams>,
}

impl LayoutConfig {
    /// Fixed-pattern configuration with zero margins.
    ///
    /// # Errors
    /// [`InvalidConfig::EmptyColumnCounts`] or
    /// [`InvalidConfig::NonPositiveColumnCount`].
    pub fn new(column_counts: &[i64]) -> Result<Self, InvalidConfig> {
        let column_counts = validate_column_counts(column_counts)?;
        let max_column_count = column_counts.iter().copied().max().unwrap_or(1);
        Ok(Self {
            column_counts,
            max_column_count,
            margins: Margins::default(),
            adaptive: None,
        })
    }

    /// Replace the column pattern. Leaves adaptive mode, like an explicit pattern should.
    pub fn with_column_counts(self, column_counts: &[i64]) -> Result<Self, InvalidConfig> {
        let fresh = Self::new(column_counts)?;
        Ok(Self {
            margins: self.margins,
            ..fresh
        })
    }

    /// Replace the child margins.
    pub fn with_margins(self, horizontal: i32, vertical: i32) -> Result<Self, InvalidConfig> {
        let margins = Margins::new(horizontal, vertical)?;
        Ok(Self { margins, ..self })
    }

    /// Enable adaptive mode.
    pub fn with_adaptive(self, min_cell_size: i32, offsets: &[i64]) -> Result<Self, InvalidConfig> {
        let adaptive = AdaptiveParams::new(min_cell_size, offsets)?;
        Ok(Self {
            adaptive: Some(adaptive),
            ..self
        })
    }

    /// Configured column pattern (the starting pattern in adaptive mode).
    pub fn column_counts(&self) -> &[usize] {
        &self.column_counts
    }

    /// Largest entry of [`Self::column_counts`].
    pub fn max_column_count(&self) -> usize {
        self.max_column_count
    }

    /// Child margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Adaptive parameters, when adaptive mode is on.
    pub fn adaptive(&self) -> Option<&AdaptiveParams> {
        self.adaptive.as_ref()
    }

    /// Whether column counts follow the available width.
    pub fn is_adaptive(&self) -> bool {
        self.adaptive.is_some()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_counts: vec![3],
            max_column_count: 3,
            margins: Margins::default(),
            adaptive: None,
        }
    }
}

/// Validate a raw column count sequence.
pub fn validate_column_counts(values: &[i64]) -> Result<Vec<usize>, InvalidConfig> {
    if values.is_empty() {
        return Err(InvalidConfig::EmptyColumnCounts);
    }
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| match usize::try_from(value) {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(InvalidConfig::NonPositiveColumnCount { index, value }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod column_counts {
        use super::*;

        #[test]
        fn accepts_cyclic_pattern() {
            let config = LayoutConfig::new(&[3, 2]).unwrap();
            assert_eq!(config.column_counts(), &[3, 2]);
            assert_eq!(config.max_column_count(), 3);
        }

        #[test]
        fn max_is_running_maximum() {
            let config = LayoutConfig::new(&[1, 5, 2]).unwrap();
            assert_eq!(config.max_column_count(), 5);
        }

        #[test]
        fn rejects_empty() {
            assert_eq!(
                LayoutConfig::new(&[]),
                Err(InvalidConfig::EmptyColumnCounts)
            );
        }

        #[test]
        fn rejects_zero_with_index() {
            assert_eq!(
                LayoutConfig::new(&[3, 0]),
                Err(InvalidConfig::NonPositiveColumnCount { index: 1, value: 0 })
            );
        }

        #[test]
        fn rejects_negative() {
            assert_eq!(
                validate_column_counts(&[-2]),
                Err(InvalidConfig::NonPositiveColumnCount {
                    index: 0,
                    value: -2
                })
            );
        }

        #[test]
        fn replacing_pattern_leaves_adaptive_mode_and_keeps_margins() {
            let config = LayoutConfig::new(&[3])
                .and_then(|c| c.with_margins(4, 6))
                .and_then(|c| c.with_adaptive(100, &[]))
                .and_then(|c| c.with_column_counts(&[2, 1]))
                .unwrap();
            assert!(!config.is_adaptive());
            assert_eq!(config.margins(), Margins::new(4, 6).unwrap());
            assert_eq!(config.max_column_count(), 2);
        }
    }

    mod margins {
        use super::*;

        #[test]
        fn zero_is_valid() {
            assert_eq!(Margins::new(0, 0), Ok(Margins::default()));
        }

        #[test]
        fn rejects_negative_horizontal() {
            assert_eq!(
                Margins::new(-1, 0),
                Err(InvalidConfig::NegativeMargin {
                    axis: MarginAxis::Horizontal,
                    value: -1
                })
            );
        }

        #[test]
        fn rejects_negative_vertical() {
            assert_eq!(
                Margins::new(0, -3),
                Err(InvalidConfig::NegativeMargin {
                    axis: MarginAxis::Vertical,
                    value: -3
                })
            );
        }
    }

    mod adaptive {
        use super::*;

        #[test]
        fn accepts_valid_params() {
            let params = AdaptiveParams::new(100, &[0, 1]).unwrap();
            assert_eq!(params.min_cell_size(), 100);
            assert_eq!(params.offsets(), &[0, 1]);
        }

        #[test]
        fn rejects_zero_min_size() {
            assert_eq!(
                AdaptiveParams::new(0, &[]),
                Err(InvalidConfig::NonPositiveMinCellSize(0))
            );
        }

        #[test]
        fn rejects_negative_offset() {
            assert_eq!(
                AdaptiveParams::new(50, &[0, -1]),
                Err(InvalidConfig::NegativeAdaptiveOffset {
                    index: 1,
                    value: -1
                })
            );
        }

        #[test]
        fn rejected_update_leaves_original_untouched() {
            let config = LayoutConfig::new(&[4]).unwrap();
            let before = config.clone();
            assert!(config.clone().with_adaptive(-5, &[]).is_err());
            assert_eq!(config, before);
        }
    }

    #[test]
    fn default_is_three_columns_without_margins() {
        let config = LayoutConfig::default();
        assert_eq!(config.column_counts(), &[3]);
        assert_eq!(config.max_column_count(), 3);
        assert_eq!(config.margins(), Margins::default());
        assert!(!config.is_adaptive());
    }
}
