use vlist_core::{ItemNode, Margin, Point, Size};
use vlist_foundation::{ClickModifiers, SelectionMode};
use vlist_layout::{HorizontalAlign, RenderOrder};
use vlist_testing::ListHarness;

const VIEW: Size = Size::new(100.0, 100.0);
const ROW: Size = Size::new(100.0, 30.0);

fn static_list(count: usize) -> ListHarness {
    let harness = ListHarness::new(VIEW, ROW);
    harness.list.set_num_items(count);
    harness
}

fn items(harness: &ListHarness) -> Vec<usize> {
    (0..harness.list.num_items())
        .filter_map(|index| harness.list.item_at(index))
        .collect()
}

#[test]
fn num_items_creates_renders_and_stacks_every_item() {
    let harness = static_list(3);

    assert_eq!(harness.take_renders(), vec![0, 1, 2]);
    assert_eq!(harness.created(), 3);
    let ys: Vec<f32> = items(&harness)
        .into_iter()
        .map(|node| harness.position_of(node).unwrap().y)
        .collect();
    assert_eq!(ys, vec![0.0, 30.0, 60.0]);
    assert_eq!(harness.list.content_size(), Size::new(100.0, 90.0));

    harness.list.set_num_items(1);
    assert_eq!(harness.list.num_items(), 1);
    assert_eq!(harness.pool.borrow().count(), 2);
}

#[test]
fn inserting_and_removing_keeps_selection_on_the_same_item() {
    let harness = static_list(3);
    harness.list.set_selected_index(Some(1));
    let selected_node = harness.list.item_at(1).unwrap();
    let extra = harness.tree.borrow_mut().insert(ItemNode::new("row", ROW));

    assert_eq!(harness.list.add_item_at(extra, 0), Some(0));
    assert_eq!(harness.list.selected_index(), Some(2));
    assert_eq!(harness.list.item_at(2), Some(selected_node));
    assert!(harness.node_selected(selected_node));
    assert_eq!(harness.position_of(extra), Some(Point::new(0.0, 0.0)));
    assert_eq!(harness.position_of(selected_node), Some(Point::new(0.0, 60.0)));

    assert_eq!(harness.list.remove_item_at(0), Some(extra));
    assert_eq!(harness.list.selected_index(), Some(1));
    assert_eq!(harness.tree.borrow().parent(extra), None);
    assert_eq!(harness.list.index_of(selected_node), Some(1));
}

#[test]
fn out_of_range_item_operations_are_ignored() {
    let harness = static_list(2);
    let extra = harness.tree.borrow_mut().insert(ItemNode::new("row", ROW));

    assert_eq!(harness.list.add_item_at(extra, 3), None);
    assert_eq!(harness.list.remove_item_at(5), None);
    assert!(!harness.list.remove_item_to_pool(2));
    harness.list.set_selected_index(Some(9));

    assert_eq!(harness.list.num_items(), 2);
    assert_eq!(harness.list.selected_index(), None);
}

#[test]
fn removing_a_range_pools_items_and_drops_their_selection() {
    let harness = static_list(4);
    harness.list.set_selection_mode(SelectionMode::Multiple);
    harness.list.set_selected_indices(&[1, 3], Some(3));

    assert_eq!(harness.list.remove_items_to_pool(1..10), 3);

    assert_eq!(harness.list.num_items(), 1);
    assert!(harness.list.selection().is_empty());
    assert_eq!(harness.pool.borrow().count(), 3);
    assert_eq!(harness.list.stats().released_count, 3);
}

#[test]
fn add_from_pool_reuses_released_items() {
    let harness = static_list(2);
    let pooled = harness.list.item_at(1).unwrap();
    assert!(harness.list.remove_item_to_pool(1));

    let node = harness.list.add_item_from_pool(None).unwrap();

    assert_eq!(node, pooled);
    assert_eq!(harness.list.index_of(node), Some(1));
    assert_eq!(harness.list.stats().reuse_count, 1);
}

#[test]
fn item_operations_are_rejected_in_virtual_mode() {
    let harness = static_list(3);
    harness.list.set_virtual();
    let extra = harness.tree.borrow_mut().insert(ItemNode::new("row", ROW));

    assert_eq!(harness.list.num_items(), 0);
    assert_eq!(harness.pool.borrow().count(), 3);
    assert_eq!(harness.list.add_item(extra), None);
    assert_eq!(harness.list.add_item_from_pool(None), None);
    assert!(!harness.list.remove_item_to_pool(0));
}

#[test]
fn clicks_follow_the_selection_mode() {
    let harness = static_list(3);
    harness.list.set_selection_mode(SelectionMode::MultipleSingleClick);

    harness.list.click_item(0, ClickModifiers::NONE);
    harness.list.click_item(1, ClickModifiers::NONE);
    harness.list.click_item(0, ClickModifiers::NONE);

    assert_eq!(harness.list.selection(), vec![1]);
    let nodes = items(&harness);
    assert!(!harness.node_selected(nodes[0]));
    assert!(harness.node_selected(nodes[1]));
}

#[test]
fn descending_render_order_reverses_draw_order() {
    let harness = static_list(3);
    let nodes = items(&harness);

    harness.list.set_render_order(RenderOrder::Descending);

    let mut reversed = nodes.clone();
    reversed.reverse();
    assert_eq!(harness.children(), reversed);
    assert_eq!(items(&harness), nodes);
}

#[test]
fn margins_offset_items_and_grow_the_content() {
    let harness = static_list(3);

    harness.list.set_margin(Margin::uniform(5.0));

    let first = harness.list.item_at(0).unwrap();
    let second = harness.list.item_at(1).unwrap();
    assert_eq!(harness.position_of(first), Some(Point::new(5.0, 5.0)));
    assert_eq!(harness.position_of(second), Some(Point::new(5.0, 35.0)));
    assert_eq!(harness.list.content_size(), Size::new(110.0, 100.0));
}

#[test]
fn narrow_content_is_centered() {
    let harness = ListHarness::new(VIEW, Size::new(50.0, 30.0));
    harness.list.set_num_items(2);

    harness.list.set_align(HorizontalAlign::Center);

    let first = harness.list.item_at(0).unwrap();
    assert_eq!(harness.position_of(first), Some(Point::new(25.0, 0.0)));
}

#[test]
fn auto_resize_stretches_items_across_the_column() {
    let harness = ListHarness::new(VIEW, Size::new(50.0, 30.0));
    harness.list.set_num_items(2);

    harness.list.set_auto_resize_item(true);

    let first = harness.list.item_at(0).unwrap();
    assert_eq!(harness.size_of(first), Some(Size::new(100.0, 30.0)));
    assert_eq!(harness.list.content_size(), Size::new(100.0, 60.0));
}

#[test]
fn scrolling_an_item_into_view_moves_the_minimum_distance() {
    let harness = static_list(10);

    harness.list.scroll_to_view(5, false);
    assert_eq!(harness.scroll_position(), Point::new(0.0, 80.0));
    assert_eq!(harness.list.first_visible_index(), Some(2));

    harness.list.scroll_to_view(1, false);
    assert_eq!(harness.scroll_position(), Point::new(0.0, 30.0));

    harness.list.scroll_to_view(9, true);
    assert_eq!(harness.scroll_position(), Point::new(0.0, 200.0));
}
