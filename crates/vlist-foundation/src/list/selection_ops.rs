//! Selection operations on the list, mirroring into item nodes, listeners
//! and an optional paged-state peer.

use vlist_core::{Shared, WeakShared};

use super::{ListContainer, ListInner, PeerBinding};
use crate::controller::PagedState;
use crate::selection::{
    ClickModifiers, SelectionChange, SelectionController, SelectionDiff, SelectionMode,
};

impl ListContainer {
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner.borrow().selection.mode()
    }

    /// Switching to [`SelectionMode::None`] clears the selection.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        self.mutate_selection(|selection| selection.set_mode(mode));
    }

    /// Primary selected index, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.inner.borrow().selection.primary()
    }

    /// All selected indices in ascending order.
    pub fn selection(&self) -> Vec<usize> {
        self.inner.borrow().selection.selected()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.inner.borrow().selection.is_selected(index)
    }

    /// Selects exactly `index`; `None` clears. Out-of-range indices are ignored.
    pub fn set_selected_index(&self, index: Option<usize>) {
        match index {
            Some(index) => self.mutate_selection(|selection| selection.set_selected_index(index)),
            None => self.mutate_selection(SelectionController::clear),
        }
    }

    pub fn set_selected_indices(&self, indices: &[usize], primary: Option<usize>) {
        self.mutate_selection(|selection| {
            selection.set_selected_indices(indices.iter().copied(), primary)
        });
    }

    /// Adds `index` to the selection, optionally scrolling it into view.
    pub fn add_selection(&self, index: usize, scroll_into_view: bool) {
        self.mutate_selection(|selection| selection.add_selection(index));
        if scroll_into_view && self.is_selected(index) {
            self.scroll_to_view(index, false);
        }
    }

    pub fn remove_selection(&self, index: usize) {
        self.mutate_selection(|selection| selection.remove_selection(index));
    }

    pub fn clear_selection(&self) {
        self.mutate_selection(SelectionController::clear);
    }

    pub fn select_all(&self) {
        self.mutate_selection(SelectionController::select_all);
    }

    pub fn select_reverse(&self) {
        self.mutate_selection(SelectionController::select_reverse);
    }

    /// Applies a user click on `index` (virtual index in virtual mode).
    pub fn click_item(&self, index: usize, modifiers: ClickModifiers) {
        self.mutate_selection(|selection| selection.click(index, modifiers));
    }

    /// Registers a listener called once per flipped index, deselections first.
    ///
    /// Listeners run while the list is borrowed and must not call back into it.
    pub fn on_selection_changed(&self, listener: impl FnMut(SelectionChange) + 'static) {
        self.inner
            .borrow_mut()
            .selection_listeners
            .push(Box::new(listener));
    }

    /// Binds (or with `None`, unbinds) a paged-state peer.
    ///
    /// Binding adopts the peer's current page as the selection once. After
    /// that, local selection changes push the primary index to the peer and
    /// peer changes select the matching item; neither side echoes back.
    /// Unbinding keeps the current selection.
    pub fn set_selection_peer(&self, peer: Option<Shared<dyn PagedState>>) {
        let previous = self.inner.borrow_mut().peer.take();
        if let Some(binding) = previous {
            binding.peer.borrow_mut().unsubscribe(binding.subscription);
            log::debug!("selection peer detached");
        }
        let Some(peer) = peer else {
            return;
        };

        let page = peer.borrow().selected_index();
        self.inner.borrow_mut().adopt_page(page);

        let weak: WeakShared<ListInner> = self.inner.downgrade();
        let subscription = peer.borrow_mut().subscribe(Box::new(move |page| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Some(mut inner) = inner.try_borrow_mut() else {
                log::debug!("peer page {page:?} ignored; list is busy");
                return;
            };
            if inner.syncing_peer {
                return;
            }
            inner.adopt_page(page);
        }));
        self.inner.borrow_mut().peer = Some(PeerBinding { peer, subscription });
    }

    pub fn has_selection_peer(&self) -> bool {
        self.inner.borrow().peer.is_some()
    }

    /// Runs one selection mutation and propagates its diff.
    pub(super) fn mutate_selection(
        &self,
        mutate: impl FnOnce(&mut SelectionController) -> SelectionDiff,
    ) {
        let (peer, primary) = {
            let mut inner = self.inner.borrow_mut();
            let diff = mutate(&mut inner.selection);
            if diff.is_empty() {
                return;
            }
            inner.apply_selection_diff(&diff);
            let Some(peer) = inner.peer.as_ref().map(|binding| binding.peer.clone()) else {
                return;
            };
            inner.syncing_peer = true;
            (peer, inner.selection.primary())
        };
        // The peer notifies synchronously; the flag keeps that from echoing back.
        peer.borrow_mut().set_selected_index(primary);
        self.inner.borrow_mut().syncing_peer = false;
    }
}

impl ListInner {
    /// Writes a diff into item infos and nodes, then tells the listeners.
    pub(super) fn apply_selection_diff(&mut self, diff: &SelectionDiff) {
        if diff.is_empty() {
            return;
        }
        let tree = self.tree.clone();
        let mut arena = tree.borrow_mut();
        for change in diff.changes() {
            let node = match self.window.as_mut() {
                Some(window) => window.info_mut(change.index).and_then(|info| {
                    info.selected = change.selected;
                    info.node
                }),
                None => self.items.get(change.index).copied(),
            };
            if let Some(item) = node.and_then(|id| arena.get_mut(id)) {
                item.selected = change.selected;
            }
        }
        drop(arena);
        for change in diff.changes() {
            for listener in self.selection_listeners.iter_mut() {
                listener(change);
            }
        }
    }

    /// Selects the item matching a peer page; `None` clears, out-of-range pages are ignored.
    fn adopt_page(&mut self, page: Option<usize>) {
        let diff = match page {
            Some(index) if index < self.selection.item_count() => {
                self.selection.set_selected_index(index)
            }
            Some(index) => {
                log::debug!("peer page {index} has no item");
                SelectionDiff::default()
            }
            None => self.selection.clear(),
        };
        self.apply_selection_diff(&diff);
    }
}
