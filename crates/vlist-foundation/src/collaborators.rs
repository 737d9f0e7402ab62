//! Contracts the list consumes from the surrounding UI.
//!
//! Closures implement the item traits directly, so a list can be wired with
//! `|index, node| ...` style renderers.

use vlist_core::{ItemNode, Point, ResourceId, Size};

/// Builds a fresh item node when the pool has none for `resource`.
pub trait ItemCreator {
    fn create(&mut self, resource: &ResourceId) -> Option<ItemNode>;
}

impl<F> ItemCreator for F
where
    F: FnMut(&ResourceId) -> Option<ItemNode>,
{
    fn create(&mut self, resource: &ResourceId) -> Option<ItemNode> {
        self(resource)
    }
}

/// Binds data `index` to `node`.
///
/// Called every time a node is (re)bound, so it must be idempotent and must
/// only mutate the node it is given. It must not call back into the list or
/// the pool.
pub trait ItemRenderer {
    fn render(&mut self, index: usize, node: &mut ItemNode);
}

impl<F> ItemRenderer for F
where
    F: FnMut(usize, &mut ItemNode),
{
    fn render(&mut self, index: usize, node: &mut ItemNode) {
        self(index, node)
    }
}

/// Chooses the item template per data index (virtual mode).
pub trait ItemProvider {
    fn provide(&self, index: usize) -> ResourceId;
}

impl<F> ItemProvider for F
where
    F: Fn(usize) -> ResourceId,
{
    fn provide(&self, index: usize) -> ResourceId {
        self(index)
    }
}

/// The scroll pane hosting the list.
///
/// Scroll position grows as content moves up/left out of view. Calls made by
/// the list must not re-enter the list synchronously.
pub trait ScrollViewport {
    fn scroll_position(&self) -> Point;
    fn view_size(&self) -> Size;
    fn set_content_size(&mut self, size: Size);
    fn set_scroll_position(&mut self, position: Point);
}
