use std::cell::RefCell;
use std::rc::Rc;

use vlist_core::{NodeArena, NodeId, Point, Shared, Size};
use vlist_foundation::{ItemPool, ListContainer, ScrollViewport};

use crate::collaborators::{CountingCreator, CreatorProbe, RecordingRenderer, RenderLog};
use crate::viewport::FakeViewport;

/// A list wired to in-memory collaborators.
///
/// Every item node starts at `item_size`; the renderer stores each node's
/// data index as its payload.
pub struct ListHarness {
    pub tree: Shared<NodeArena>,
    pub pool: Shared<ItemPool>,
    pub viewport: Shared<FakeViewport>,
    pub list: ListContainer,
    pub renders: RenderLog,
    pub creator: Shared<CreatorProbe>,
}

impl ListHarness {
    pub fn new(view: Size, item_size: Size) -> Self {
        Self::with_shared(
            Shared::new(NodeArena::new()),
            Shared::new(ItemPool::new()),
            view,
            CountingCreator::new(item_size),
        )
    }

    /// Builds a harness on an existing arena and pool, e.g. to share a pool between lists.
    pub fn with_shared(
        tree: Shared<NodeArena>,
        pool: Shared<ItemPool>,
        view: Size,
        (creator, probe): (CountingCreator, Shared<CreatorProbe>),
    ) -> Self {
        let fake = Rc::new(RefCell::new(FakeViewport::new(view)));
        let dyn_viewport: Rc<RefCell<dyn ScrollViewport>> = fake.clone();
        let list = ListContainer::new(
            tree.clone(),
            pool.clone(),
            Shared::from_rc(dyn_viewport),
            creator,
        );
        let (renderer, renders) = RecordingRenderer::new();
        list.set_item_renderer(renderer);
        Self {
            tree,
            pool,
            viewport: Shared::from_rc(fake),
            list,
            renders,
            creator: probe,
        }
    }

    /// Scrolls to `along` on the vertical axis and lets the list react.
    pub fn scroll_to(&self, along: f32) {
        self.scroll_to_point(Point::new(0.0, along));
    }

    pub fn scroll_to_point(&self, position: Point) {
        self.viewport.borrow_mut().scroll_to(position);
        self.list.handle_scroll();
    }

    pub fn resize(&self, view: Size) {
        self.viewport.borrow_mut().resize(view);
        self.list.handle_resize();
    }

    pub fn scroll_position(&self) -> Point {
        self.viewport.borrow().scroll_position()
    }

    /// Drains the render log.
    pub fn take_renders(&self) -> Vec<usize> {
        std::mem::take(&mut *self.renders.borrow_mut())
    }

    pub fn created(&self) -> usize {
        self.creator.with(|probe| probe.created)
    }

    /// Makes the next `count` creator calls fail.
    pub fn fail_next_creations(&self, count: usize) {
        self.creator.borrow_mut().fail_next = count;
    }

    /// Data index last rendered into `node`.
    pub fn rendered_index(&self, node: NodeId) -> Option<usize> {
        self.tree.borrow().get(node)?.payload::<usize>().copied()
    }

    pub fn position_of(&self, node: NodeId) -> Option<Point> {
        self.tree.borrow().get(node).map(|item| item.position)
    }

    pub fn size_of(&self, node: NodeId) -> Option<Size> {
        self.tree.borrow().get(node).map(|item| item.size)
    }

    pub fn node_selected(&self, node: NodeId) -> bool {
        self.tree.borrow().get(node).is_some_and(|item| item.selected)
    }

    /// Children of the list container in draw order.
    pub fn children(&self) -> Vec<NodeId> {
        let container = self.list.container_node();
        self.tree.borrow().children(container).to_vec()
    }

    /// Node bound to virtual `index` after the last pass.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.list
            .visible_items()
            .into_iter()
            .find_map(|(i, node)| (i == index).then_some(node))
    }
}
