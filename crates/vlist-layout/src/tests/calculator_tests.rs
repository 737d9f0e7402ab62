use super::*;
use crate::config::{ListLayoutConfig, ListLayoutMode};
use crate::alignment::{HorizontalAlign, VerticalAlign};
use vlist_core::Margin;

fn config(mode: ListLayoutMode) -> ListLayoutConfig {
    ListLayoutConfig::new(mode)
}

fn fit_per_line(config: &ListLayoutConfig, viewport: Size, item: Size) -> usize {
    line_metrics(config, viewport, item).items_per_line
}

#[test]
fn horizontal_flow_fits_three_columns() {
    let config = ListLayoutConfig {
        column_gap: 10.0,
        ..config(ListLayoutMode::FlowHorizontal)
    };
    let per_line = fit_per_line(&config, Size::new(342.0, 500.0), Size::new(100.0, 40.0));
    assert_eq!(per_line, 3);
}

#[test]
fn vertical_flow_uses_height_and_line_gap() {
    let config = ListLayoutConfig {
        line_gap: 5.0,
        ..config(ListLayoutMode::FlowVertical)
    };
    // floor((100 + 5) / (30 + 5)) = 3
    assert_eq!(
        fit_per_line(&config, Size::new(10.0, 100.0), Size::new(80.0, 30.0)),
        3
    );
}

#[test]
fn single_modes_always_have_one_item_per_line() {
    for mode in [ListLayoutMode::SingleColumn, ListLayoutMode::SingleRow] {
        assert_eq!(
            fit_per_line(&config(mode), Size::new(1000.0, 1000.0), Size::new(1.0, 1.0)),
            1
        );
    }
}

#[test]
fn items_per_line_never_drops_below_one() {
    let modes = [
        ListLayoutMode::SingleColumn,
        ListLayoutMode::SingleRow,
        ListLayoutMode::FlowHorizontal,
        ListLayoutMode::FlowVertical,
        ListLayoutMode::Pagination,
    ];
    let viewports = [0.0, 1.0, 49.5, 320.0, 10_000.0];
    let items = [0.5, 1.0, 50.0, 400.0, 1e9];
    for mode in modes {
        for &view in &viewports {
            for &item in &items {
                let per_line =
                    fit_per_line(&config(mode), Size::new(view, view), Size::new(item, item));
                assert!(per_line >= 1, "{mode:?} {view} {item}");
            }
        }
    }
}

#[test]
fn fixed_column_count_wins_over_fit() {
    let config = ListLayoutConfig {
        column_count: 4,
        ..config(ListLayoutMode::FlowHorizontal)
    };
    assert_eq!(
        fit_per_line(&config, Size::new(50.0, 50.0), Size::new(100.0, 10.0)),
        4
    );
}

#[test]
fn pagination_computes_both_axes_independently() {
    let config = ListLayoutConfig {
        column_gap: 10.0,
        line_count: 2,
        ..config(ListLayoutMode::Pagination)
    };
    let grid = page_grid(&config, Size::new(342.0, 1000.0), Size::new(100.0, 40.0));
    assert_eq!(grid, PageGrid { columns: 3, rows: 2 });
    assert_eq!(grid.page_count(13), 3);
}

#[test]
fn invalid_measurements_fall_back_to_default() {
    assert_eq!(sanitize_extent(-5.0, 30.0), 30.0);
    assert_eq!(sanitize_extent(f32::NAN, 30.0), 30.0);
    assert_eq!(sanitize_extent(0.0, 30.0), 0.0);
    let config = ListLayoutConfig {
        default_item_size: Size::new(100.0, 30.0),
        ..config(ListLayoutMode::SingleColumn)
    };
    let sizes = [Size::new(100.0, f32::NAN), Size::new(100.0, -1.0)];
    let content = content_size(&config, Size::new(100.0, 100.0), LineMetrics::SINGLE, &sizes);
    assert_eq!(content.height, 60.0);
}

#[test]
fn flow_content_sums_tallest_item_per_line() {
    let config = ListLayoutConfig {
        line_gap: 4.0,
        column_gap: 2.0,
        ..config(ListLayoutMode::FlowHorizontal)
    };
    let metrics = LineMetrics {
        items_per_line: 2,
        page: None,
    };
    let sizes = [
        Size::new(10.0, 20.0),
        Size::new(10.0, 30.0),
        Size::new(10.0, 5.0),
    ];
    let content = content_size(&config, Size::new(100.0, 100.0), metrics, &sizes);
    assert_eq!(content, Size::new(22.0, 30.0 + 4.0 + 5.0));
}

#[test]
fn auto_resize_collapses_cross_extent_to_viewport() {
    let config = ListLayoutConfig {
        auto_resize_item: true,
        margin: Margin::uniform(3.0),
        ..config(ListLayoutMode::SingleColumn)
    };
    let sizes = [Size::new(500.0, 10.0), Size::new(20.0, 10.0)];
    let content = content_size(&config, Size::new(240.0, 100.0), LineMetrics::SINGLE, &sizes);
    assert_eq!(content, Size::new(240.0, 26.0));
}

#[test]
fn pagination_width_ignores_item_width() {
    let config = config(ListLayoutMode::Pagination);
    let metrics = LineMetrics {
        items_per_line: 2,
        page: Some(PageGrid { columns: 2, rows: 2 }),
    };
    let sizes = vec![Size::new(999.0, 999.0); 9];
    let content = content_size(&config, Size::new(300.0, 200.0), metrics, &sizes);
    assert_eq!(content, Size::new(900.0, 200.0));
}

#[test]
fn alignment_offset_only_applies_to_short_content() {
    let config = ListLayoutConfig {
        align: HorizontalAlign::Center,
        vertical_align: VerticalAlign::Bottom,
        ..config(ListLayoutMode::SingleColumn)
    };
    let offset = alignment_offset(&config, Size::new(60.0, 500.0), Size::new(100.0, 200.0));
    assert_eq!(offset, Point::new(20.0, 0.0));
    let offset = alignment_offset(&config, Size::new(60.0, 50.0), Size::new(100.0, 200.0));
    assert_eq!(offset, Point::new(20.0, 150.0));
}

#[test]
fn fitted_size_shares_line_between_fixed_columns() {
    let config = ListLayoutConfig {
        auto_resize_item: true,
        column_count: 3,
        column_gap: 10.0,
        ..config(ListLayoutMode::FlowHorizontal)
    };
    let metrics = line_metrics(&config, Size::new(320.0, 100.0), Size::new(50.0, 20.0));
    let fitted = fitted_item_size(&config, Size::new(320.0, 100.0), metrics, Size::new(50.0, 20.0));
    assert_eq!(fitted, Size::new(100.0, 20.0));
}
