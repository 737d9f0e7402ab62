//! Non-virtual mode: the list owns an ordered array of item nodes and lays
//! all of them out after every change.

use std::ops::Range;

use vlist_core::{NodeId, ResourceId, Size};
use vlist_layout::{content_size, fitted_item_size, line_metrics, sanitize_size, LineCursor};

use super::{ListContainer, ListInner};

impl ListContainer {
    /// Appends an existing arena node; returns its index.
    pub fn add_item(&self, node: NodeId) -> Option<usize> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.items.len();
        inner.insert_item(node, index)
    }

    /// Inserts an existing arena node at `index`. An index past the end is rejected.
    pub fn add_item_at(&self, node: NodeId, index: usize) -> Option<usize> {
        let mut inner = self.inner.borrow_mut();
        if index > inner.items.len() {
            return None;
        }
        inner.insert_item(node, index)
    }

    /// Appends a node taken from the pool (or created) for `resource`, or the default item.
    pub fn add_item_from_pool(&self, resource: Option<ResourceId>) -> Option<NodeId> {
        let mut inner = self.inner.borrow_mut();
        if inner.rejects_item_ops("add_item_from_pool") {
            return None;
        }
        let resource = resource.unwrap_or_else(|| inner.default_item.clone());
        let node = inner.push_pooled(&resource)?;
        inner.layout_items();
        Some(node)
    }

    /// Detaches the item at `index` and hands it back to the caller.
    pub fn remove_item_at(&self, index: usize) -> Option<NodeId> {
        let mut inner = self.inner.borrow_mut();
        if inner.rejects_item_ops("remove_item_at") {
            return None;
        }
        let node = inner.take_item(index)?;
        let tree = inner.tree.clone();
        let mut arena = tree.borrow_mut();
        if let Some(item) = arena.get_mut(node) {
            item.selected = false;
        }
        if let Err(err) = arena.detach(node) {
            log::warn!("removed item {index} could not be detached: {err}");
        }
        drop(arena);
        inner.layout_items();
        Some(node)
    }

    /// Removes the item at `index` and returns it to the pool.
    pub fn remove_item_to_pool(&self, index: usize) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.rejects_item_ops("remove_item_to_pool") || !inner.pool_item(index) {
            return false;
        }
        inner.layout_items();
        true
    }

    /// Returns the items in `range` (clamped to the item count) to the pool.
    pub fn remove_items_to_pool(&self, range: Range<usize>) -> usize {
        let mut inner = self.inner.borrow_mut();
        if inner.rejects_item_ops("remove_items_to_pool") {
            return 0;
        }
        let end = range.end.min(inner.items.len());
        let removed = (range.start.min(end)..end)
            .rev()
            .filter(|&index| inner.pool_item(index))
            .count();
        if removed > 0 {
            inner.layout_items();
        }
        removed
    }

    /// Returns every item to the pool.
    pub fn remove_all_items_to_pool(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.rejects_item_ops("remove_all_items_to_pool") {
            return;
        }
        inner.clear_items_to_pool();
        inner.layout_items();
    }

    /// Node at `index` (non-virtual mode).
    pub fn item_at(&self, index: usize) -> Option<NodeId> {
        self.inner.borrow().items.get(index).copied()
    }

    /// Index of `node` among the items (non-virtual mode).
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.inner.borrow().items.iter().position(|&id| id == node)
    }
}

impl ListInner {
    fn rejects_item_ops(&self, op: &str) -> bool {
        if self.window.is_some() {
            log::warn!("{op} is not available on a virtual list; use set_num_items");
            return true;
        }
        false
    }

    fn insert_item(&mut self, node: NodeId, index: usize) -> Option<usize> {
        if self.rejects_item_ops("add_item") {
            return None;
        }
        let tree = self.tree.clone();
        let mut arena = tree.borrow_mut();
        if let Err(err) = arena.insert_child(self.container, node, index) {
            log::warn!("cannot add node {node} to list {}: {err}", self.container);
            return None;
        }
        if let Some(item) = arena.get_mut(node) {
            item.selected = false;
            item.visible = true;
        }
        drop(arena);
        self.items.insert(index, node);
        self.selection.on_item_inserted(index);
        self.layout_items();
        Some(index)
    }

    /// Appends a node for `resource` without laying out.
    fn push_pooled(&mut self, resource: &ResourceId) -> Option<NodeId> {
        let tree = self.tree.clone();
        let pool = self.pool.clone();
        let mut arena = tree.borrow_mut();
        let mut pool = pool.borrow_mut();
        let node = self.acquire(&mut arena, &mut pool, resource)?;
        if let Err(err) = arena.add_child(self.container, node) {
            log::warn!("cannot attach pooled {resource}: {err}");
            pool.put(&mut arena, resource, node);
            return None;
        }
        if let Some(item) = arena.get_mut(node) {
            item.selected = false;
            item.visible = true;
        }
        let index = self.items.len();
        self.items.push(node);
        self.selection.on_item_inserted(index);
        Some(node)
    }

    /// Drops `index` from the item array, keeping selection indices aligned.
    fn take_item(&mut self, index: usize) -> Option<NodeId> {
        if index >= self.items.len() {
            return None;
        }
        let node = self.items.remove(index);
        self.selection.on_item_removed(index);
        Some(node)
    }

    /// Removes `index` and parks its node in the pool, without laying out.
    fn pool_item(&mut self, index: usize) -> bool {
        let Some(node) = self.take_item(index) else {
            return false;
        };
        let tree = self.tree.clone();
        let pool = self.pool.clone();
        let mut arena = tree.borrow_mut();
        let mut pool = pool.borrow_mut();
        self.release(&mut arena, &mut pool, node);
        true
    }

    pub(super) fn clear_items_to_pool(&mut self) {
        for index in (0..self.items.len()).rev() {
            self.pool_item(index);
        }
    }

    /// Creates or pools items until there are `count`, then re-renders all of them.
    pub(super) fn resize_items(&mut self, count: usize) {
        let current = self.items.len();
        if count < current {
            for index in (count..current).rev() {
                self.pool_item(index);
            }
        }
        for index in current..count {
            let resource = self.resource_for(index);
            if self.push_pooled(&resource).is_none() {
                log::warn!("list {} stopped at {} of {count} items", self.container, self.items.len());
                break;
            }
        }
        self.render_items();
        self.layout_items();
    }

    fn render_items(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let tree = self.tree.clone();
        let mut arena = tree.borrow_mut();
        for (index, &node) in self.items.iter().enumerate() {
            if let Some(item) = arena.get_mut(node) {
                renderer.render(index, item);
                self.stats.render_count += 1;
            }
        }
    }

    /// Positions every item in one forward pass and publishes the content size.
    pub(super) fn layout_items(&mut self) {
        let view = self.viewport.borrow().view_size();
        let fallback = self.config.default_item_size;
        let tree = self.tree.clone();
        let mut arena = tree.borrow_mut();

        self.item_size = self
            .items
            .first()
            .and_then(|&node| arena.get(node))
            .map_or(fallback, |item| sanitize_size(item.size, fallback));
        self.metrics = line_metrics(&self.config, view, self.item_size);

        let mut sizes: Vec<Size> = Vec::with_capacity(self.items.len());
        for &node in &self.items {
            if let Some(item) = arena.get_mut(node) {
                let size = fitted_item_size(
                    &self.config,
                    view,
                    self.metrics,
                    sanitize_size(item.size, self.item_size),
                );
                item.size = size;
                sizes.push(size);
            }
        }
        let content = content_size(&self.config, view, self.metrics, &sizes);
        let origin = self.content_origin(content, view);
        let mut cursor = LineCursor::new(&self.config, view, self.metrics, origin, 0, 0.0);
        for &node in &self.items {
            if let Some(item) = arena.get_mut(node) {
                item.position = cursor.place(item.size);
                item.selected = false;
            }
        }
        for index in self.selection.selected() {
            if let Some(item) = self.items.get(index).and_then(|&node| arena.get_mut(node)) {
                item.selected = true;
            }
        }
        self.apply_render_order(&mut arena, &self.items, 0);
        if let Some(container) = arena.get_mut(self.container) {
            container.size = view;
        }
        drop(arena);
        self.publish_content_size(content);
    }
}
