//! Tests for the layout engine driven through the in-memory host.

use super::*;
use crate::model::{LayoutImpossible, Padding, Rect};
use crate::sim::{MemoryHost, ViewId};

/// Engine laid out at `width` x `height` with no padding and no margins.
fn grid(
    counts: &[i64],
    items: usize,
    width: i32,
    height: i32,
) -> (LayoutEngine<ViewId>, MemoryHost) {
    let config = LayoutConfig::new(counts).unwrap();
    laid_out(config, items, width, height)
}

fn laid_out(
    config: LayoutConfig,
    items: usize,
    width: i32,
    height: i32,
) -> (LayoutEngine<ViewId>, MemoryHost) {
    let mut engine = LayoutEngine::new(config);
    let mut host = MemoryHost::new();
    engine.on_viewport_changed(Viewport::new(width, height, Padding::default()));
    engine.on_item_count_changed(items);
    engine.layout(&mut host).unwrap();
    (engine, host)
}

fn positions(engine: &LayoutEngine<ViewId>) -> Vec<usize> {
    engine.attached().map(|item| item.position).collect()
}

fn placements(engine: &LayoutEngine<ViewId>) -> Vec<(usize, Rect)> {
    engine
        .attached()
        .map(|item| (item.position, item.rect))
        .collect()
}

fn rect_of(engine: &LayoutEngine<ViewId>, position: usize) -> Rect {
    engine
        .attached()
        .find(|item| item.position == position)
        .map(|item| item.rect)
        .unwrap_or_else(|| panic!("position {position} not attached"))
}

mod layout {
    use super::*;

    #[test]
    fn attaches_only_rows_reaching_into_viewport() {
        // 100px cells, rows 0..=5 start at or above y=500
        let (engine, _host) = grid(&[3], 90, 300, 500);
        assert_eq!(positions(&engine), (0..18).collect::<Vec<_>>());
        assert_eq!(engine.cell_size(), 100);
        assert_eq!(engine.rows_count(), 30);
        assert_eq!(engine.content_height(), 3000);
    }

    #[test]
    fn narrower_rows_are_centered() {
        let (engine, _host) = grid(&[3, 2], 7, 300, 1000);
        assert_eq!(rect_of(&engine, 2), Rect::square(200, 0, 100));
        assert_eq!(rect_of(&engine, 3), Rect::square(50, 100, 100));
        assert_eq!(rect_of(&engine, 4), Rect::square(150, 100, 100));
        assert_eq!(engine.cell_location(4), Some((1, 1)));
        assert_eq!(engine.cell_location(7), None);
    }

    #[test]
    fn partial_last_row_keeps_scheduled_centering() {
        // row 2 is scheduled for 3 cells but only holds 5 and 6
        let (engine, _host) = grid(&[3, 2], 7, 300, 1000);
        assert_eq!(engine.cell_location(6), Some((2, 1)));
        assert_eq!(rect_of(&engine, 5), Rect::square(0, 200, 100));
        assert_eq!(rect_of(&engine, 6), Rect::square(100, 200, 100));

        // a full three-cell row at the same capacity lands on the same columns
        let (full, _host) = grid(&[3, 2], 8, 300, 1000);
        assert_eq!(rect_of(&full, 5), rect_of(&engine, 5));
        assert_eq!(rect_of(&full, 6), rect_of(&engine, 6));
        assert_eq!(rect_of(&full, 7), Rect::square(200, 200, 100));
    }

    #[test]
    fn host_tree_order_matches_engine_order() {
        let (mut engine, mut host) = grid(&[3, 2], 200, 300, 500);
        engine.scroll_by(275, &mut host);
        assert_eq!(host.attached_positions(), positions(&engine));
    }

    #[test]
    fn new_views_are_measured_and_placed() {
        let (engine, host) = grid(&[3], 90, 300, 500);
        for item in engine.attached() {
            let view = host.view(item.view);
            assert!(view.attached);
            assert_eq!(view.position, item.position);
            assert_eq!(view.measured, Some(100));
            assert_eq!(view.rect, Some(item.rect));
        }
    }

    #[test]
    fn empty_dataset_attaches_nothing() {
        let (mut engine, mut host) = grid(&[3], 0, 300, 500);
        assert_eq!(engine.attached_len(), 0);
        assert_eq!(engine.rows_count(), 0);
        assert_eq!(engine.content_height(), 0);
        assert_eq!(engine.scroll_by(100, &mut host), 0);
    }

    #[test]
    fn impossible_width_attaches_nothing() {
        let config = LayoutConfig::default().with_adaptive(100, &[]).unwrap();
        let mut engine = LayoutEngine::new(config);
        let mut host = MemoryHost::new();
        engine.on_viewport_changed(Viewport::new(90, 500, Padding::default()));
        engine.on_item_count_changed(20);

        assert_eq!(
            engine.layout(&mut host),
            Err(LayoutError::LayoutImpossible(
                LayoutImpossible::NoColumnsFit {
                    available_width: 90,
                    min_cell_size: 100
                }
            ))
        );
        assert_eq!(engine.attached_len(), 0);
        assert_eq!(engine.scroll_by(50, &mut host), 0);
        assert_eq!(engine.refill(&mut host), FillStats::default());
    }

    #[test]
    fn relayout_is_idempotent() {
        let (mut engine, mut host) = grid(&[3, 2], 500, 300, 500);
        engine.scroll_by(1_730, &mut host);

        engine.on_item_count_changed(500);
        engine.layout(&mut host).unwrap();
        let first = placements(&engine);

        engine.on_item_count_changed(500);
        engine.layout(&mut host).unwrap();
        assert_eq!(placements(&engine), first);

        engine.refill(&mut host);
        assert_eq!(placements(&engine), first);
    }

    #[test]
    fn relayout_rebinds_pooled_views() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        assert_eq!(host.view_count(), 18);

        engine.on_item_count_changed(90);
        engine.layout(&mut host).unwrap();
        assert_eq!(host.view_count(), 18);
        assert_eq!(host.pooled(), 0);
    }

    #[test]
    fn padding_offsets_cells() {
        let mut engine = LayoutEngine::new(LayoutConfig::new(&[3]).unwrap());
        let mut host = MemoryHost::new();
        engine.on_viewport_changed(Viewport::new(320, 500, Padding::new(10, 20, 10, 0)));
        engine.on_item_count_changed(90);
        engine.layout(&mut host).unwrap();

        assert_eq!(rect_of(&engine, 0), Rect::square(10, 20, 100));
        assert_eq!(rect_of(&engine, 4), Rect::square(110, 120, 100));
    }

    #[test]
    fn margins_space_cells_and_rows() {
        let config = LayoutConfig::new(&[2]).unwrap().with_margins(10, 20).unwrap();
        let (engine, _host) = laid_out(config, 10, 310, 1000);

        assert_eq!(engine.cell_size(), 150);
        assert_eq!(rect_of(&engine, 1), Rect::square(160, 0, 150));
        assert_eq!(rect_of(&engine, 2), Rect::square(0, 170, 150));
        assert_eq!(engine.content_height(), 5 * 150 + 4 * 20);
    }
}

mod scrolling {
    use super::*;

    #[test]
    fn moves_content_up_and_tracks_best_visible_anchor() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);

        assert_eq!(engine.scroll_by(150, &mut host), 150);
        assert_eq!(positions(&engine), (3..21).collect::<Vec<_>>());
        assert_eq!(rect_of(&engine, 3).top, -50);
        assert_eq!(engine.anchor_state(), AnchorState::new(6, 50));
    }

    #[test]
    fn clamps_at_top() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        assert_eq!(engine.scroll_by(-10, &mut host), 0);

        engine.scroll_by(150, &mut host);
        assert_eq!(engine.scroll_by(-1_000, &mut host), -150);
        assert_eq!(rect_of(&engine, 0).top, 0);
    }

    #[test]
    fn clamps_at_bottom() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);

        assert_eq!(engine.scroll_by(10_000, &mut host), 2_500);
        assert_eq!(positions(&engine), (75..90).collect::<Vec<_>>());
        assert_eq!(rect_of(&engine, 89).bottom, 500);
        assert_eq!(engine.scroll_by(1, &mut host), 0);
    }

    #[test]
    fn large_jump_matches_small_steps() {
        let (mut jumped, mut jump_host) = grid(&[3, 2], 400, 300, 500);
        let (mut stepped, mut step_host) = grid(&[3, 2], 400, 300, 500);

        assert_eq!(jumped.scroll_by(1_234, &mut jump_host), 1_234);
        for _ in 0..24 {
            stepped.scroll_by(50, &mut step_host);
        }
        stepped.scroll_by(34, &mut step_host);

        assert_eq!(placements(&jumped), placements(&stepped));
        assert_eq!(positions(&jumped)[0], 30);
    }

    #[test]
    fn small_scroll_reuses_every_view() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        host.reset_stats();

        assert_eq!(engine.scroll_by(10, &mut host), 10);
        assert_eq!(positions(&engine), (0..18).collect::<Vec<_>>());
        assert_eq!(host.stats().created, 0);
        assert_eq!(host.stats().rebound, 0);
        assert_eq!(host.stats().measures, 0);
    }

    #[test]
    fn scrolled_out_rows_are_recycled() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        host.reset_stats();

        engine.scroll_by(150, &mut host);
        // row 6 is placed before row 0 goes back to the pool
        assert_eq!(host.stats().created, 3);
        assert_eq!(host.stats().recycles, 3);
        assert_eq!(host.pooled(), 3);
    }

    #[test]
    fn content_that_fits_never_scrolls() {
        let (mut engine, mut host) = grid(&[3], 6, 300, 500);
        assert_eq!(engine.scroll_by(50, &mut host), 0);
        assert_eq!(engine.scroll_by(-50, &mut host), 0);
    }

    #[test]
    fn pending_layout_blocks_scrolling() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.on_item_count_changed(100);
        assert_eq!(engine.scroll_by(50, &mut host), 0);
    }
}

mod scroll_to_position {
    use super::*;

    #[test]
    fn aligns_target_row_with_top() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);

        engine.scroll_to_position(45, &mut host);
        assert_eq!(engine.attached_len(), 0);
        assert!(engine.is_layout_requested());

        engine.layout(&mut host).unwrap();
        assert_eq!(positions(&engine), (45..63).collect::<Vec<_>>());
        assert_eq!(rect_of(&engine, 45).top, 0);
    }

    #[test]
    fn out_of_range_goes_to_start() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.scroll_by(400, &mut host);

        engine.scroll_to_position(500, &mut host);
        assert_eq!(engine.anchor_state(), AnchorState::default());
        engine.layout(&mut host).unwrap();
        assert_eq!(positions(&engine)[0], 0);
    }

    #[test]
    fn near_end_settles_last_row_at_bottom() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);

        engine.scroll_to_position(88, &mut host);
        engine.layout(&mut host).unwrap();
        assert_eq!(positions(&engine), (75..90).collect::<Vec<_>>());
        assert_eq!(rect_of(&engine, 88).top, 400);
    }
}

mod reconfigure {
    use super::*;
    use crate::model::InvalidConfig;

    #[test]
    fn rejected_column_counts_keep_previous_config() {
        let (mut engine, _host) = grid(&[3], 90, 300, 500);

        assert_eq!(
            engine.set_column_counts(&[3, 0]),
            Err(InvalidConfig::NonPositiveColumnCount { index: 1, value: 0 })
        );
        assert_eq!(engine.column_counts(), &[3]);
        assert!(!engine.is_layout_requested());
    }

    #[test]
    fn unchanged_margins_do_not_request_layout() {
        let (mut engine, _host) = grid(&[3], 90, 300, 500);

        engine.set_child_margins(0, 0).unwrap();
        assert!(!engine.is_layout_requested());

        engine.set_child_margins(4, 4).unwrap();
        assert!(engine.is_layout_requested());
    }

    #[test]
    fn negative_margin_is_rejected() {
        let (mut engine, _host) = grid(&[3], 90, 300, 500);
        assert!(engine.set_child_margins(-1, 0).is_err());
        assert_eq!(engine.config().margins(), crate::model::Margins::default());
    }

    #[test]
    fn new_column_counts_keep_anchor() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.scroll_by(150, &mut host);

        engine.set_column_counts(&[2]).unwrap();
        engine.layout(&mut host).unwrap();

        assert_eq!(engine.cell_size(), 150);
        assert_eq!(rect_of(&engine, 6), Rect::square(0, 50, 150));
    }

    #[test]
    fn adaptive_resolves_from_width() {
        let config = LayoutConfig::default().with_adaptive(100, &[0, 1]).unwrap();
        let (mut engine, mut host) = laid_out(config, 50, 350, 1000);
        assert_eq!(engine.column_counts(), &[3, 2]);
        assert_eq!(engine.cell_size(), 116);

        engine.on_viewport_changed(Viewport::new(360, 1000, Padding::default()));
        engine.layout(&mut host).unwrap();
        assert_eq!(engine.column_counts(), &[3, 2]);
        assert_eq!(engine.cell_size(), 120);

        engine.on_viewport_changed(Viewport::new(400, 1000, Padding::default()));
        engine.layout(&mut host).unwrap();
        assert_eq!(engine.column_counts(), &[4, 3]);
    }

    #[test]
    fn explicit_column_counts_leave_adaptive_mode() {
        let config = LayoutConfig::default().with_adaptive(100, &[]).unwrap();
        let (mut engine, mut host) = laid_out(config, 50, 350, 1000);
        assert_eq!(engine.column_counts(), &[3]);

        engine.set_column_counts(&[2]).unwrap();
        assert!(!engine.config().is_adaptive());
        engine.on_viewport_changed(Viewport::new(800, 1000, Padding::default()));
        engine.layout(&mut host).unwrap();
        assert_eq!(engine.column_counts(), &[2]);
    }
}

mod persistence {
    use super::*;

    #[test]
    fn restored_state_reproduces_layout() {
        let (mut original, mut host) = grid(&[3], 90, 300, 500);
        original.scroll_by(170, &mut host);
        original.scroll_by(-35, &mut host);
        assert_eq!(original.anchor_state(), AnchorState::new(6, 65));

        let bytes = original.serialize_state().to_bytes();
        assert_eq!(bytes.len(), 8);

        let (mut restored, mut restored_host) = grid(&[3], 90, 300, 500);
        restored.restore_state(SavedState::from_bytes(&bytes).unwrap());
        assert!(restored.is_layout_requested());
        restored.layout(&mut restored_host).unwrap();

        assert_eq!(placements(&restored), placements(&original));
    }

    #[test]
    fn shrinking_below_anchor_resets_to_start() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.scroll_by(10_000, &mut host);

        engine.on_item_count_changed(10);
        engine.layout(&mut host).unwrap();

        assert_eq!(engine.anchor_state(), AnchorState::default());
        assert_eq!(positions(&engine), (0..10).collect::<Vec<_>>());
        assert_eq!(rect_of(&engine, 0).top, 0);
    }

    #[test]
    fn rotation_and_back_restores_placement() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.scroll_by(150, &mut host);
        let portrait = placements(&engine);

        engine.on_viewport_changed(Viewport::new(500, 300, Padding::default()));
        engine.layout(&mut host).unwrap();
        assert_eq!(engine.cell_size(), 166);
        assert_eq!(rect_of(&engine, 6), Rect::square(1, 50, 166));

        engine.on_viewport_changed(Viewport::new(300, 500, Padding::default()));
        engine.layout(&mut host).unwrap();
        assert_eq!(placements(&engine), portrait);
    }
}

mod smooth_scroll {
    use super::*;
    use crate::layout::{ScrollDirection, SnapPreference};

    #[test]
    fn missing_target_is_ignored() {
        let (engine, _host) = grid(&[3], 90, 300, 500);
        assert_eq!(engine.smooth_scroll_to(90), None);
    }

    #[test]
    fn direction_is_relative_to_first_attached() {
        let (mut engine, mut host) = grid(&[3], 90, 300, 500);
        engine.scroll_by(10_000, &mut host);

        let back = engine.smooth_scroll_to(10).unwrap();
        assert_eq!(back.direction, Some(ScrollDirection::Backward));
        assert_eq!(back.snap, SnapPreference::Start);

        let forward = engine.smooth_scroll_to(80).unwrap();
        assert_eq!(forward.direction, Some(ScrollDirection::Forward));
        assert_eq!(forward.target, 80);
    }

    #[test]
    fn nothing_attached_means_jump() {
        let mut engine: LayoutEngine<ViewId> = LayoutEngine::new(LayoutConfig::default());
        engine.on_item_count_changed(10);
        let request = engine.smooth_scroll_to(4).unwrap();
        assert_eq!(request.direction, None);
    }
}

mod capability_trait {
    use super::*;

    fn drive<L: GridLayout<MemoryHost>>(layout: &mut L, host: &mut MemoryHost) -> i32 {
        layout.layout(host).unwrap();
        layout.scroll_by(120, host)
    }

    #[test]
    fn engine_is_usable_through_grid_layout() {
        let mut engine = LayoutEngine::new(LayoutConfig::new(&[3]).unwrap());
        let mut host = MemoryHost::new();
        engine.on_viewport_changed(Viewport::new(300, 500, Padding::default()));
        engine.on_item_count_changed(90);

        assert_eq!(drive(&mut engine, &mut host), 120);
        let state = GridLayout::<MemoryHost>::serialize_state(&engine);
        assert_eq!(state, SavedState::new(6, 80));
    }
}
