//! Paged-state peers a list can mirror its primary selection into.

/// Handle returned by [`PagedState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type PageListener = Box<dyn FnMut(Option<usize>)>;

/// An externally owned object with a selected page.
///
/// Listeners are notified synchronously from `set_selected_index`, and only
/// when the value actually changes.
pub trait PagedState {
    fn selected_index(&self) -> Option<usize>;
    fn set_selected_index(&mut self, index: Option<usize>);
    fn subscribe(&mut self, listener: PageListener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Plain [`PagedState`] with a fixed number of pages.
#[derive(Default)]
pub struct PageController {
    page_count: usize,
    selected: Option<usize>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, PageListener)>,
}

impl PageController {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            selected: if page_count > 0 { Some(0) } else { None },
            ..Self::default()
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Changes the page count, dropping a selection that no longer fits.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count;
        if self.selected.is_some_and(|page| page >= page_count) {
            self.set_selected_index(page_count.checked_sub(1));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PagedState for PageController {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        let index = index.filter(|&page| page < self.page_count);
        if index == self.selected {
            return;
        }
        self.selected = index;
        for (_, listener) in self.listeners.iter_mut() {
            listener(index);
        }
    }

    fn subscribe(&mut self, listener: PageListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}
