//! Keyboard navigation, scrolling items into view, and child/item index mapping.

use vlist_core::{Point, Rect, Size};
use vlist_layout::{leading_margin, Axis, ListLayoutMode};

use super::{ListContainer, ListInner};
use crate::selection::SelectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ListContainer {
    /// Moves the selection one step in the direction of `key` and scrolls the
    /// new item into view. With nothing selected the first item is chosen.
    ///
    /// Returns the newly selected index, or `None` when the key does not move
    /// in the current layout or the step would leave the list.
    pub fn handle_arrow_key(&self, key: ArrowKey) -> Option<usize> {
        let target = self.inner.borrow().arrow_target(key)?;
        self.mutate_selection(|selection| selection.set_selected_index(target));
        self.scroll_to_view(target, false);
        Some(target)
    }

    /// Scrolls the minimum distance that brings `index` fully into view, or
    /// puts it at the start of the viewport with `snap_to_first`.
    pub fn scroll_to_view(&self, index: usize, snap_to_first: bool) {
        let mut inner = self.inner.borrow_mut();
        if inner.scroll_index_into_view(index, snap_to_first) {
            inner.refresh_virtual();
        }
    }

    /// First index intersecting the viewport (a virtual index in virtual mode).
    pub fn first_visible_index(&self) -> Option<usize> {
        self.inner.borrow().first_visible_index()
    }

    /// Maps a position among the attached items (in index order) to its data index.
    pub fn child_index_to_item_index(&self, child: usize) -> Option<usize> {
        let inner = self.inner.borrow();
        match inner.window.as_ref() {
            Some(window) => {
                let visible = window.visible();
                let index = visible.start + child;
                (index < visible.end).then(|| window.real_index(index))
            }
            None => (child < inner.items.len()).then_some(child),
        }
    }

    /// Position among the attached items of the first one showing data `item`.
    pub fn item_index_to_child_index(&self, item: usize) -> Option<usize> {
        let inner = self.inner.borrow();
        match inner.window.as_ref() {
            Some(window) => window
                .visible()
                .position(|index| window.real_index(index) == item),
            None => (item < inner.items.len()).then_some(item),
        }
    }
}

impl ListInner {
    fn arrow_step(&self, key: ArrowKey) -> Option<isize> {
        let per_line = self.metrics.items_per_line.max(1) as isize;
        let step = match (self.config.mode, key) {
            (ListLayoutMode::SingleColumn, ArrowKey::Up) => -1,
            (ListLayoutMode::SingleColumn, ArrowKey::Down) => 1,
            (ListLayoutMode::SingleRow, ArrowKey::Left) => -1,
            (ListLayoutMode::SingleRow, ArrowKey::Right) => 1,
            (ListLayoutMode::FlowHorizontal | ListLayoutMode::Pagination, ArrowKey::Left) => -1,
            (ListLayoutMode::FlowHorizontal | ListLayoutMode::Pagination, ArrowKey::Right) => 1,
            (ListLayoutMode::FlowHorizontal | ListLayoutMode::Pagination, ArrowKey::Up) => -per_line,
            (ListLayoutMode::FlowHorizontal | ListLayoutMode::Pagination, ArrowKey::Down) => per_line,
            (ListLayoutMode::FlowVertical, ArrowKey::Up) => -1,
            (ListLayoutMode::FlowVertical, ArrowKey::Down) => 1,
            (ListLayoutMode::FlowVertical, ArrowKey::Left) => -per_line,
            (ListLayoutMode::FlowVertical, ArrowKey::Right) => per_line,
            _ => return None,
        };
        Some(step)
    }

    fn arrow_target(&self, key: ArrowKey) -> Option<usize> {
        if self.selection.mode() == SelectionMode::None {
            return None;
        }
        let count = self.item_count();
        if count == 0 {
            return None;
        }
        let step = self.arrow_step(key)?;
        match self.selection.primary() {
            None => Some(0),
            Some(current) => {
                let next = current as isize + step;
                (0..count as isize)
                    .contains(&next)
                    .then_some(next as usize)
            }
        }
    }

    /// Bounds of `index` in content coordinates. In virtual mode only the
    /// scroll-axis extent is meaningful; unmeasured items use the probe size.
    fn item_rect(&self, index: usize, view: Size) -> Option<Rect> {
        match self.window.as_ref() {
            Some(window) => {
                if index >= window.len() {
                    return None;
                }
                if let Some(grid) = self.metrics.page {
                    let x = grid.page_of(index) as f32 * view.width;
                    return Some(Rect::from_origin_size(Point::new(x, 0.0), view));
                }
                let geo = self.line_geometry();
                let along = window.offset_of(index, &geo) + leading_margin(&self.config);
                let extent = window.line_extent(self.metrics.line_start(index), &geo);
                Some(Rect::from_origin_size(
                    geo.axis.point(along, 0.0),
                    geo.axis.size(extent, 0.0),
                ))
            }
            None => {
                let arena = self.tree.borrow();
                let node = *self.items.get(index)?;
                arena.get(node).map(|item| item.bounds())
            }
        }
    }

    /// Moves the viewport so `index` is visible. Returns whether it scrolled.
    fn scroll_index_into_view(&mut self, index: usize, snap_to_first: bool) -> bool {
        let (scroll, view) = {
            let viewport = self.viewport.borrow();
            (viewport.scroll_position(), viewport.view_size())
        };
        let Some(rect) = self.item_rect(index, view) else {
            return false;
        };
        let axis = if self.metrics.page.is_some() {
            Axis::Horizontal
        } else {
            self.config.scroll_axis()
        };
        let (start, extent) = match axis {
            Axis::Vertical => (rect.y, rect.height),
            Axis::Horizontal => (rect.x, rect.width),
        };
        let position = axis.coordinate(scroll);
        let view_along = axis.extent(view);
        let target = if snap_to_first || start < position {
            start
        } else if start + extent > position + view_along {
            (start + extent - view_along).min(start)
        } else {
            return false;
        };
        let max = (axis.extent(self.content_size) - view_along).max(0.0);
        let target = target.clamp(0.0, max);
        if target == position {
            return false;
        }
        let moved = match axis {
            Axis::Vertical => Point::new(scroll.x, target),
            Axis::Horizontal => Point::new(target, scroll.y),
        };
        self.viewport.borrow_mut().set_scroll_position(moved);
        true
    }

    fn first_visible_index(&self) -> Option<usize> {
        match self.window.as_ref() {
            Some(window) => {
                let visible = window.visible();
                (!visible.is_empty()).then_some(visible.start)
            }
            None => {
                let (scroll, view) = {
                    let viewport = self.viewport.borrow();
                    (viewport.scroll_position(), viewport.view_size())
                };
                let viewport = Rect::from_origin_size(scroll, view);
                let arena = self.tree.borrow();
                self.items.iter().position(|&node| {
                    arena
                        .get(node)
                        .is_some_and(|item| item.bounds().intersects(&viewport))
                })
            }
        }
    }
}
