//! Selection state of a list, independent of any node.

use std::collections::BTreeSet;

use smallvec::SmallVec;

/// How clicks change the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Selecting an item deselects every other item.
    #[default]
    Single,
    /// First click selects; later clicks toggle the clicked item. Shift selects a range.
    Multiple,
    /// Every click toggles the clicked item.
    MultipleSingleClick,
    /// Clicks never select, and switching to this mode clears the selection.
    None,
}

impl SelectionMode {
    pub fn is_multiple(self) -> bool {
        matches!(
            self,
            SelectionMode::Multiple | SelectionMode::MultipleSingleClick
        )
    }
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ClickModifiers {
    pub const NONE: ClickModifiers = ClickModifiers {
        ctrl: false,
        shift: false,
    };

    pub const SHIFT: ClickModifiers = ClickModifiers {
        ctrl: false,
        shift: true,
    };
}

/// One item whose selection membership flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub index: usize,
    pub selected: bool,
}

/// Indices whose membership flipped during one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    pub added: SmallVec<[usize; 4]>,
    pub removed: SmallVec<[usize; 4]>,
}

impl SelectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Deselections first, then selections, each in ascending index order.
    pub fn changes(&self) -> impl Iterator<Item = SelectionChange> + '_ {
        let removed = self.removed.iter().map(|&index| SelectionChange {
            index,
            selected: false,
        });
        let added = self.added.iter().map(|&index| SelectionChange {
            index,
            selected: true,
        });
        removed.chain(added)
    }
}

/// Selected indices plus the primary (most recently focused) one.
///
/// Every member is below `item_count`, and the primary index, when set, is a
/// member. Mutations return a [`SelectionDiff`] naming only the indices that
/// actually flipped; out-of-range indices are ignored.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
    primary: Option<usize>,
    item_count: usize,
}

impl SelectionController {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn primary(&self) -> Option<usize> {
        self.primary
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in ascending order.
    pub fn selected(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_mode(&mut self, mode: SelectionMode) -> SelectionDiff {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.replace(BTreeSet::new(), None),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self.primary.or_else(|| self.selected.first().copied());
                self.replace(keep.into_iter().collect(), keep)
            }
            _ => SelectionDiff::default(),
        }
    }

    /// Resizes the addressable range, dropping selected indices that fall outside it.
    pub fn set_item_count(&mut self, item_count: usize) -> SelectionDiff {
        self.item_count = item_count;
        if self.selected.last().is_some_and(|&last| last >= item_count) {
            let kept = self.selected.range(..item_count).copied().collect();
            let primary = self.primary.filter(|&p| p < item_count);
            self.replace(kept, primary)
        } else {
            SelectionDiff::default()
        }
    }

    pub fn set_selected_index(&mut self, index: usize) -> SelectionDiff {
        if !self.accepts(index) {
            return SelectionDiff::default();
        }
        self.replace(BTreeSet::from([index]), Some(index))
    }

    /// Replaces the whole selection; `primary` defaults to the lowest member.
    pub fn set_selected_indices(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
        primary: Option<usize>,
    ) -> SelectionDiff {
        if self.mode == SelectionMode::None {
            return SelectionDiff::default();
        }
        let mut next: BTreeSet<usize> = indices
            .into_iter()
            .filter(|&index| index < self.item_count)
            .collect();
        if self.mode == SelectionMode::Single {
            let keep = primary
                .filter(|p| next.contains(p))
                .or_else(|| next.first().copied());
            next = keep.into_iter().collect();
        }
        self.replace(next, primary)
    }

    pub fn add_selection(&mut self, index: usize) -> SelectionDiff {
        if !self.accepts(index) {
            return SelectionDiff::default();
        }
        if self.mode == SelectionMode::Single {
            return self.set_selected_index(index);
        }
        let mut next = self.selected.clone();
        next.insert(index);
        self.replace(next, Some(index))
    }

    pub fn remove_selection(&mut self, index: usize) -> SelectionDiff {
        if !self.selected.contains(&index) {
            return SelectionDiff::default();
        }
        let mut next = self.selected.clone();
        next.remove(&index);
        self.replace(next, None)
    }

    pub fn clear(&mut self) -> SelectionDiff {
        self.replace(BTreeSet::new(), None)
    }

    /// Selects every index; only meaningful in the multiple modes.
    pub fn select_all(&mut self) -> SelectionDiff {
        if !self.mode.is_multiple() {
            return SelectionDiff::default();
        }
        let primary = self.primary;
        self.replace((0..self.item_count).collect(), primary)
    }

    /// Inverts membership of every index; only meaningful in the multiple modes.
    pub fn select_reverse(&mut self) -> SelectionDiff {
        if !self.mode.is_multiple() {
            return SelectionDiff::default();
        }
        let next = (0..self.item_count)
            .filter(|index| !self.selected.contains(index))
            .collect();
        self.replace(next, None)
    }

    /// Applies a user click on `index` according to the current mode.
    pub fn click(&mut self, index: usize, modifiers: ClickModifiers) -> SelectionDiff {
        if !self.accepts(index) {
            return SelectionDiff::default();
        }
        match self.mode {
            SelectionMode::None => SelectionDiff::default(),
            SelectionMode::Single => self.set_selected_index(index),
            SelectionMode::Multiple => match self.primary {
                Some(anchor) if modifiers.shift => {
                    let (start, end) = if anchor <= index {
                        (anchor, index)
                    } else {
                        (index, anchor)
                    };
                    let mut next: BTreeSet<usize> = if modifiers.ctrl {
                        self.selected.clone()
                    } else {
                        BTreeSet::new()
                    };
                    next.extend(start..=end);
                    self.replace(next, Some(index))
                }
                _ if self.selected.is_empty() => self.add_selection(index),
                _ => self.toggle(index),
            },
            SelectionMode::MultipleSingleClick => self.toggle(index),
        }
    }

    /// Shifts indices at or after `index` up by one after an item insert.
    pub fn on_item_inserted(&mut self, index: usize) {
        self.item_count += 1;
        let shift = |i: usize| if i >= index { i + 1 } else { i };
        self.selected = self.selected.iter().map(|&i| shift(i)).collect();
        self.primary = self.primary.map(shift);
    }

    /// Drops `index` and shifts later indices down after an item removal.
    ///
    /// Returns whether the removed item was selected.
    pub fn on_item_removed(&mut self, index: usize) -> bool {
        if index >= self.item_count {
            return false;
        }
        self.item_count -= 1;
        let was_selected = self.selected.remove(&index);
        self.selected = self
            .selected
            .iter()
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        self.primary = match self.primary {
            Some(p) if p == index => self.selected.first().copied(),
            Some(p) if p > index => Some(p - 1),
            other => other,
        };
        was_selected
    }

    fn accepts(&self, index: usize) -> bool {
        self.mode != SelectionMode::None && index < self.item_count
    }

    fn toggle(&mut self, index: usize) -> SelectionDiff {
        if self.selected.contains(&index) {
            self.remove_selection(index)
        } else {
            let mut next = self.selected.clone();
            next.insert(index);
            self.replace(next, Some(index))
        }
    }

    /// Installs `next`, recomputes the primary and reports what flipped.
    fn replace(&mut self, next: BTreeSet<usize>, primary: Option<usize>) -> SelectionDiff {
        let diff = SelectionDiff {
            added: next.difference(&self.selected).copied().collect(),
            removed: self.selected.difference(&next).copied().collect(),
        };
        self.primary = primary
            .filter(|p| next.contains(p))
            .or_else(|| next.first().copied());
        self.selected = next;
        diff
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
