//! Keyed recycle pool for item nodes.
//!
//! One pool is normally built at the composition root and shared by every
//! list through a [`Shared`](vlist_core::Shared) handle, so an item released
//! by one list can be reused by another.

use std::collections::VecDeque;

use vlist_core::hash::{IdSet, KeyMap};
use vlist_core::{NodeArena, NodeId, ResourceId};

/// Released item nodes, bucketed by resource and handed back oldest first.
///
/// A pooled node has no parent; its coordinates are meaningless until it is
/// attached again.
#[derive(Debug, Default)]
pub struct ItemPool {
    buckets: KeyMap<ResourceId, VecDeque<NodeId>>,
    pooled: IdSet<NodeId>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest released node for `resource`, if any.
    pub fn get(&mut self, resource: &ResourceId) -> Option<NodeId> {
        let node = self.buckets.get_mut(resource)?.pop_front()?;
        self.pooled.remove(&node);
        Some(node)
    }

    /// Detaches `node` from its parent and appends it to the `resource` bucket.
    ///
    /// Returns `false` (and keeps the pool unchanged) when the node is already
    /// pooled or no longer exists.
    pub fn put(&mut self, arena: &mut NodeArena, resource: &ResourceId, node: NodeId) -> bool {
        if self.pooled.contains(&node) {
            log::warn!("node {node} returned to the pool twice; ignoring");
            return false;
        }
        if let Err(err) = arena.detach(node) {
            log::warn!("cannot pool {resource}: {err}");
            return false;
        }
        self.pooled.insert(node);
        self.buckets
            .entry(resource.clone())
            .or_default()
            .push_back(node);
        true
    }

    /// Drops every pooled node from the arena. Nodes attached to lists are untouched.
    pub fn clear(&mut self, arena: &mut NodeArena) {
        let dropped = self.pooled.len();
        for (_, bucket) in self.buckets.drain() {
            for node in bucket {
                // A pooled node may have been removed by its owner meanwhile.
                let _ = arena.remove(node);
            }
        }
        self.pooled.clear();
        log::debug!("item pool cleared ({dropped} nodes dropped)");
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.pooled.contains(&node)
    }

    /// Total pooled nodes across all buckets.
    pub fn count(&self) -> usize {
        self.pooled.len()
    }

    pub fn count_for(&self, resource: &ResourceId) -> usize {
        self.buckets.get(resource).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlist_core::{ItemNode, Size};

    fn row() -> ResourceId {
        ResourceId::from("row")
    }

    #[test]
    fn get_after_put_returns_same_node() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let mut counts = vec![pool.count()];
        assert_eq!(pool.get(&row()), None);
        let node = arena.insert(ItemNode::new("row", Size::ZERO));

        assert!(pool.put(&mut arena, &row(), node));
        counts.push(pool.count());
        assert_eq!(pool.get(&row()), Some(node));
        counts.push(pool.count());
        assert_eq!(pool.get(&row()), None);
        counts.push(pool.count());

        assert_eq!(counts, vec![0, 1, 0, 0]);
    }

    #[test]
    fn hands_back_oldest_first() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let a = arena.insert(ItemNode::new("row", Size::ZERO));
        let b = arena.insert(ItemNode::new("row", Size::ZERO));
        pool.put(&mut arena, &row(), a);
        pool.put(&mut arena, &row(), b);

        assert_eq!(pool.get(&row()), Some(a));
        assert_eq!(pool.get(&row()), Some(b));
    }

    #[test]
    fn put_detaches_from_parent() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let list = arena.insert(ItemNode::new("list", Size::ZERO));
        let node = arena.insert(ItemNode::new("row", Size::ZERO));
        arena.add_child(list, node).unwrap();

        pool.put(&mut arena, &row(), node);

        assert!(arena.children(list).is_empty());
        assert_eq!(arena.parent(node), None);
    }

    #[test]
    fn double_put_is_rejected() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let node = arena.insert(ItemNode::new("row", Size::ZERO));

        assert!(pool.put(&mut arena, &row(), node));
        assert!(!pool.put(&mut arena, &ResourceId::from("other"), node));
        assert_eq!(pool.count(), 1);
        assert_eq!(pool.count_for(&ResourceId::from("other")), 0);
    }

    #[test]
    fn buckets_are_separate() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let header = ResourceId::from("header");
        let node = arena.insert(ItemNode::new("header", Size::ZERO));
        pool.put(&mut arena, &header, node);

        assert_eq!(pool.get(&row()), None);
        assert_eq!(pool.count_for(&header), 1);
    }

    #[test]
    fn clear_removes_pooled_nodes_only() {
        let mut arena = NodeArena::new();
        let mut pool = ItemPool::new();
        let list = arena.insert(ItemNode::new("list", Size::ZERO));
        let visible = arena.insert(ItemNode::new("row", Size::ZERO));
        let pooled = arena.insert(ItemNode::new("row", Size::ZERO));
        arena.add_child(list, visible).unwrap();
        pool.put(&mut arena, &row(), pooled);

        pool.clear(&mut arena);

        assert_eq!(pool.count(), 0);
        assert!(!arena.contains(pooled));
        assert!(arena.contains(visible));
        assert_eq!(arena.children(list), &[visible]);
    }
}
