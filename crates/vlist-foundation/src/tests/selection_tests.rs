use super::*;

fn controller(mode: SelectionMode, count: usize) -> SelectionController {
    let mut controller = SelectionController::new(mode);
    controller.set_item_count(count);
    controller
}

fn assert_invariants(controller: &SelectionController) {
    let selected = controller.selected();
    assert!(selected.iter().all(|&i| i < controller.item_count()));
    if let Some(primary) = controller.primary() {
        assert!(controller.is_selected(primary), "primary {primary} not in {selected:?}");
    }
}

#[test]
fn single_mode_replaces_and_reports_one_deselect() {
    let mut selection = controller(SelectionMode::Single, 10);
    selection.set_selected_index(2);
    let diff = selection.set_selected_index(5);

    assert_eq!(selection.selected(), vec![5]);
    assert_eq!(selection.primary(), Some(5));
    let changes: Vec<_> = diff.changes().collect();
    assert_eq!(
        changes,
        vec![
            SelectionChange {
                index: 2,
                selected: false
            },
            SelectionChange {
                index: 5,
                selected: true
            },
        ]
    );
}

#[test]
fn reselecting_same_index_reports_nothing() {
    let mut selection = controller(SelectionMode::Single, 10);
    selection.set_selected_index(3);
    assert!(selection.set_selected_index(3).is_empty());
}

#[test]
fn multiple_single_click_toggles_each_click() {
    let mut selection = controller(SelectionMode::MultipleSingleClick, 4);
    selection.click(0, ClickModifiers::NONE);
    selection.click(1, ClickModifiers::NONE);
    selection.click(0, ClickModifiers::NONE);

    assert_eq!(selection.selected(), vec![1]);
    assert_eq!(selection.primary(), Some(1));
}

#[test]
fn multiple_first_click_selects_then_toggles() {
    let mut selection = controller(SelectionMode::Multiple, 6);
    selection.click(3, ClickModifiers::NONE);
    selection.click(1, ClickModifiers::NONE);
    assert_eq!(selection.selected(), vec![1, 3]);
    assert_eq!(selection.primary(), Some(1));

    selection.click(3, ClickModifiers::NONE);
    assert_eq!(selection.selected(), vec![1]);
}

#[test]
fn shift_click_selects_range_from_primary() {
    let mut selection = controller(SelectionMode::Multiple, 10);
    selection.click(6, ClickModifiers::NONE);
    let diff = selection.click(3, ClickModifiers::SHIFT);

    assert_eq!(selection.selected(), vec![3, 4, 5, 6]);
    assert_eq!(selection.primary(), Some(3));
    assert_eq!(diff.added.as_slice(), &[3, 4, 5]);
    assert!(diff.removed.is_empty());
}

#[test]
fn none_mode_ignores_clicks_and_clears_on_switch() {
    let mut selection = controller(SelectionMode::Multiple, 5);
    selection.add_selection(1);
    selection.add_selection(2);

    let diff = selection.set_mode(SelectionMode::None);
    assert_eq!(diff.removed.as_slice(), &[1, 2]);
    assert!(selection.is_empty());

    assert!(selection.click(0, ClickModifiers::NONE).is_empty());
    assert!(selection.add_selection(0).is_empty());
    assert!(selection.is_empty());
}

#[test]
fn switching_to_single_keeps_primary() {
    let mut selection = controller(SelectionMode::Multiple, 5);
    selection.add_selection(1);
    selection.add_selection(4);
    selection.set_mode(SelectionMode::Single);
    assert_eq!(selection.selected(), vec![4]);
}

#[test]
fn out_of_range_indices_are_dropped() {
    let mut selection = controller(SelectionMode::Multiple, 3);
    assert!(selection.set_selected_index(3).is_empty());
    assert!(selection.add_selection(99).is_empty());

    selection.set_selected_indices([0, 2, 7], None);
    assert_eq!(selection.selected(), vec![0, 2]);
    assert_eq!(selection.primary(), Some(0));
}

#[test]
fn explicit_primary_is_respected_when_selected() {
    let mut selection = controller(SelectionMode::Multiple, 8);
    selection.set_selected_indices([1, 4, 6], Some(4));
    assert_eq!(selection.primary(), Some(4));

    selection.set_selected_indices([1, 6], Some(4));
    assert_eq!(selection.primary(), Some(1));
}

#[test]
fn removing_primary_falls_back_to_lowest() {
    let mut selection = controller(SelectionMode::Multiple, 8);
    selection.set_selected_indices([2, 5], Some(5));
    selection.remove_selection(5);
    assert_eq!(selection.primary(), Some(2));
    assert!(selection.remove_selection(7).is_empty());
}

#[test]
fn shrinking_item_count_drops_tail_selection() {
    let mut selection = controller(SelectionMode::Multiple, 10);
    selection.set_selected_indices([1, 8, 9], Some(9));

    let diff = selection.set_item_count(5);

    assert_eq!(diff.removed.as_slice(), &[8, 9]);
    assert_eq!(selection.selected(), vec![1]);
    assert_eq!(selection.primary(), Some(1));
}

#[test]
fn insert_and_remove_keep_selection_on_same_item() {
    let mut selection = controller(SelectionMode::Multiple, 5);
    selection.set_selected_indices([1, 3], Some(3));

    selection.on_item_inserted(2);
    assert_eq!(selection.selected(), vec![1, 4]);
    assert_eq!(selection.primary(), Some(4));

    assert!(!selection.on_item_removed(0));
    assert_eq!(selection.selected(), vec![0, 3]);

    assert!(selection.on_item_removed(3));
    assert_eq!(selection.selected(), vec![0]);
    assert_eq!(selection.primary(), Some(0));
    assert_eq!(selection.item_count(), 4);
}

#[test]
fn select_reverse_and_all_only_in_multiple_modes() {
    let mut selection = controller(SelectionMode::Multiple, 4);
    selection.add_selection(1);
    selection.select_reverse();
    assert_eq!(selection.selected(), vec![0, 2, 3]);
    selection.select_all();
    assert_eq!(selection.selected(), vec![0, 1, 2, 3]);

    let mut single = controller(SelectionMode::Single, 4);
    assert!(single.select_all().is_empty());
    assert!(single.select_reverse().is_empty());
}

#[test]
fn invariants_hold_under_mixed_operations() {
    let modes = [
        SelectionMode::Single,
        SelectionMode::Multiple,
        SelectionMode::MultipleSingleClick,
        SelectionMode::None,
    ];
    let mut seed: u32 = 0x2545_f491;
    let mut next = move |bound: u32| {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        (seed % bound) as usize
    };
    for mode in modes {
        let mut selection = controller(mode, 12);
        for _ in 0..500 {
            let index = next(16);
            match next(9) {
                0 => {
                    selection.set_selected_index(index);
                }
                1 => {
                    selection.add_selection(index);
                }
                2 => {
                    selection.remove_selection(index);
                }
                3 => {
                    selection.click(index, ClickModifiers::NONE);
                }
                4 => {
                    selection.click(index, ClickModifiers::SHIFT);
                }
                5 => {
                    selection.set_item_count(next(14));
                }
                6 => {
                    selection.set_selected_indices([index, next(16), next(16)], Some(index));
                }
                7 => selection.on_item_inserted(index.min(selection.item_count())),
                _ => {
                    selection.on_item_removed(index);
                }
            }
            assert_invariants(&selection);
        }
    }
}
