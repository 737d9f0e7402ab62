use super::*;

fn column(default_height: f32, gap: f32) -> LineGeometry {
    LineGeometry {
        axis: Axis::Vertical,
        metrics: LineMetrics::SINGLE,
        line_spacing: gap,
        item_spacing: 0.0,
        default_size: Size::new(100.0, default_height),
    }
}

fn flow(per_line: usize) -> LineGeometry {
    LineGeometry {
        axis: Axis::Vertical,
        metrics: LineMetrics {
            items_per_line: per_line,
            page: None,
        },
        line_spacing: 0.0,
        item_spacing: 2.0,
        default_size: Size::new(100.0, 30.0),
    }
}

fn window_with(count: usize) -> VirtualWindow {
    let mut window = VirtualWindow::new(false);
    window.set_real_count(count);
    window
}

#[test]
fn refresh_state_only_escalates_until_cleaned() {
    let mut window = VirtualWindow::new(false);
    assert_eq!(window.state(), RefreshState::LayoutDirty);

    window.mark(RefreshState::ContentDirty);
    assert_eq!(window.state(), RefreshState::LayoutDirty);

    window.mark_clean();
    window.mark(RefreshState::ContentDirty);
    assert_eq!(window.state(), RefreshState::ContentDirty);
    window.mark(RefreshState::LayoutDirty);
    assert_eq!(window.state(), RefreshState::LayoutDirty);
}

#[test]
fn looping_window_multiplies_indices_and_maps_back() {
    let mut window = VirtualWindow::new(true);
    window.set_real_count(10);

    assert_eq!(window.len(), 10 * LOOP_MULTIPLIER);
    assert_eq!(window.real_count(), 10);
    assert_eq!(window.real_index(37), 7);
    assert_eq!(window.real_index(59), 9);
}

#[test]
fn shrinking_returns_bound_nodes_past_the_end() {
    let mut window = window_with(5);
    window.info_mut(1).unwrap().node = Some(11);
    window.info_mut(3).unwrap().node = Some(13);
    window.info_mut(4).unwrap().node = Some(14);
    window.set_visible(1..5);
    window.mark_clean();

    let dropped = window.set_real_count(3);

    assert_eq!(dropped, vec![13, 14]);
    assert_eq!(window.len(), 3);
    assert_eq!(window.visible(), 1..3);
    assert_eq!(window.info(1).unwrap().node, Some(11));
    assert_eq!(window.state(), RefreshState::ContentDirty);
}

#[test]
fn fresh_infos_are_unmeasured() {
    let window = window_with(2);
    let info = window.info(0).unwrap();
    assert!(!info.is_measured());
    assert_eq!(info.size_or(Size::new(40.0, 20.0)), Size::new(40.0, 20.0));
}

#[test]
fn locate_covers_partially_visible_lines() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(100);

    let (range, offset) = window.locate(95.0, 100.0, &geo);

    assert_eq!(range, 3..7);
    assert_eq!(offset, 90.0);
}

#[test]
fn locate_walks_back_from_a_later_anchor() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(100);

    let (far, _) = window.locate(900.0, 100.0, &geo);
    assert_eq!(far.start, 30);

    let (near, offset) = window.locate(95.0, 100.0, &geo);
    assert_eq!(near, 3..7);
    assert_eq!(offset, 90.0);
}

#[test]
fn locate_includes_line_gaps() {
    let geo = column(30.0, 10.0);
    let mut window = window_with(20);

    let (range, offset) = window.locate(85.0, 40.0, &geo);

    // Lines start at 0, 40, 80, 120: the one at 80 ends at 110.
    assert_eq!(range.start, 2);
    assert_eq!(offset, 80.0);
    assert_eq!(range.end, 4);
}

#[test]
fn locate_clamps_to_the_last_line() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(4);

    let (range, offset) = window.locate(5_000.0, 100.0, &geo);

    assert_eq!(range, 3..4);
    assert_eq!(offset, 90.0);
}

#[test]
fn resizing_a_line_before_the_anchor_restarts_the_walk() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(100);
    window.locate(95.0, 100.0, &geo);

    assert!(window.record_size(0, Size::new(100.0, 100.0), &geo));
    let (range, offset) = window.locate(95.0, 100.0, &geo);

    assert_eq!(range.start, 0);
    assert_eq!(offset, 0.0);
}

#[test]
fn recording_the_same_size_twice_reports_no_change() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(3);
    assert!(window.record_size(1, Size::new(100.0, 30.0), &geo));
    assert!(!window.record_size(1, Size::new(100.0, 30.0), &geo));
    assert!(!window.record_size(9, Size::new(1.0, 1.0), &geo));
}

#[test]
fn content_extent_sums_lines_and_gaps() {
    let geo = column(30.0, 5.0);
    let mut window = window_with(10);

    window.recompute_content(&geo);

    assert_eq!(window.content_along(), 10.0 * 30.0 + 9.0 * 5.0);
    assert_eq!(window.content_across(), 100.0);
}

#[test]
fn flow_lines_take_the_tallest_item_and_sum_widths() {
    let geo = flow(3);
    let mut window = window_with(7);
    window.record_size(1, Size::new(50.0, 45.0), &geo);

    assert_eq!(window.line_extent(0, &geo), 45.0);
    assert_eq!(window.line_across(0, &geo), 100.0 + 50.0 + 100.0 + 2.0 * 2.0);
    assert_eq!(window.line_across(6, &geo), 100.0);

    window.recompute_content(&geo);
    assert_eq!(window.content_along(), 45.0 + 30.0 + 30.0);
}

#[test]
fn incremental_adjustment_tracks_content_growth() {
    let geo = column(30.0, 0.0);
    let mut window = window_with(4);
    window.recompute_content(&geo);

    window.adjust_content(20.0, 140.0);

    assert_eq!(window.content_along(), 140.0);
    assert_eq!(window.content_across(), 140.0);
}

#[test]
fn pages_cover_every_intersecting_page() {
    let mut window = window_with(10);
    window.mark_clean();
    let grid = PageGrid {
        columns: 2,
        rows: 2,
    };

    assert_eq!(window.locate_pages(0.0, 200.0, grid), 0..4);
    assert_eq!(window.locate_pages(100.0, 200.0, grid), 0..8);
    assert_eq!(window.locate_pages(400.0, 200.0, grid), 8..10);
    assert_eq!(window.locate_pages(10_000.0, 200.0, grid), 8..10);
    assert_eq!(window.locate_pages(0.0, 0.0, grid), 0..0);
}

#[test]
fn offset_of_walks_to_the_line_start() {
    let geo = flow(3);
    let mut window = window_with(9);
    window.record_size(4, Size::new(100.0, 50.0), &geo);

    assert_eq!(window.offset_of(0, &geo), 0.0);
    assert_eq!(window.offset_of(5, &geo), 30.0);
    assert_eq!(window.offset_of(8, &geo), 80.0);
}
