//! Arena-backed display node tree.
//!
//! Parent/child links are plain [`NodeId`] fields. Ids are handed out
//! monotonically and never reused, so a stale handle can only ever resolve to
//! `NodeError::Missing`, never to some other node.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::geometry::{Point, Rect, Size};

pub type NodeId = usize;

/// Identifier of an item template; pool buckets are keyed by it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(Rc<str>);

impl ResourceId {
    pub fn new(id: &str) -> Self {
        Self(Rc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
    InvalidParent { parent: NodeId, child: NodeId },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} payload type mismatch; expected {expected}")
            }
            NodeError::InvalidParent { parent, child } => {
                write!(f, "node {parent} cannot adopt node {child}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

/// A display node as the list engine sees it.
///
/// Renderers fill `payload` and may resize the node; the engine owns
/// `position`, `visible`, `selected` and the parent link.
pub struct ItemNode {
    pub resource: ResourceId,
    pub position: Point,
    pub size: Size,
    pub visible: bool,
    pub selected: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Option<Box<dyn Any>>,
}

impl ItemNode {
    pub fn new(resource: impl Into<ResourceId>, size: Size) -> Self {
        Self {
            resource: resource.into(),
            position: Point::ZERO,
            size,
            visible: true,
            selected: false,
            parent: None,
            children: Vec::new(),
            payload: None,
        }
    }

    pub fn with_payload<T: Any>(mut self, payload: T) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    pub fn set_payload<T: Any>(&mut self, payload: T) {
        self.payload = Some(Box::new(payload));
    }

    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    pub fn payload_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.payload.as_deref_mut().and_then(|p| p.downcast_mut::<T>())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

impl fmt::Debug for ItemNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemNode")
            .field("resource", &self.resource)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("selected", &self.selected)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Option<ItemNode>>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut node: ItemNode) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.push(Some(node));
        self.nodes.len() - 1
    }

    /// Removes `id` and its whole subtree, detaching it from its parent first.
    pub fn remove(&mut self, id: NodeId) -> Result<ItemNode, NodeError> {
        self.detach(id)?;
        let mut node = self
            .nodes
            .get_mut(id)
            .and_then(Option::take)
            .ok_or(NodeError::Missing { id })?;
        for child in std::mem::take(&mut node.children) {
            if let Some(slot) = self.nodes.get_mut(child) {
                if let Some(child_node) = slot.as_mut() {
                    child_node.parent = None;
                }
            }
            // Children were attached to `id`, so they exist.
            let _ = self.remove(child);
        }
        Ok(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&ItemNode> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ItemNode> {
        self.nodes.get_mut(id).and_then(Option::as_mut)
    }

    pub fn node(&self, id: NodeId) -> Result<&ItemNode, NodeError> {
        self.get(id).ok_or(NodeError::Missing { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut ItemNode, NodeError> {
        self.get_mut(id).ok_or(NodeError::Missing { id })
    }

    pub fn payload_mut<T: Any>(&mut self, id: NodeId) -> Result<&mut T, NodeError> {
        self.node_mut(id)?
            .payload_mut::<T>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        let end = self.children(parent).len();
        self.insert_child(parent, child, end)
    }

    /// Attaches `child` under `parent` at `index` (clamped), moving it from any previous parent.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), NodeError> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(NodeError::InvalidParent { parent, child });
        }
        self.detach(child)?;
        let parent_node = self.node_mut(parent)?;
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlinks `child` from its parent. A node without a parent is left untouched.
    pub fn detach(&mut self, child: NodeId) -> Result<(), NodeError> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        self.node_mut(child)?.parent = None;
        Ok(())
    }

    /// Rewrites the child order of `parent`; `order` must be a permutation of its children.
    pub fn reorder_children(&mut self, parent: NodeId, order: &[NodeId]) -> Result<(), NodeError> {
        let parent_node = self.node_mut(parent)?;
        if order.len() != parent_node.children.len() {
            return Err(NodeError::InvalidParent {
                parent,
                child: order.first().copied().unwrap_or(parent),
            });
        }
        if let Some(&stray) = order.iter().find(|id| !parent_node.children.contains(*id)) {
            return Err(NodeError::InvalidParent {
                parent,
                child: stray,
            });
        }
        parent_node.children.clear();
        parent_node.children.extend_from_slice(order);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.get(id) {
            Some(node) => {
                output.push_str(&format!(
                    "{indent}[{id}] {} @({:.1}, {:.1}) {:.1}x{:.1}{}\n",
                    node.resource,
                    node.position.x,
                    node.position.y,
                    node.size.width,
                    node.size.height,
                    if node.selected { " *" } else { "" }
                ));
                for &child in &node.children {
                    self.dump_node(output, child, depth + 1);
                }
            }
            None => output.push_str(&format!("{indent}[{id}] (missing)\n")),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
