//! Headless walkthrough of the vlist engine.
//!
//! A looping carousel and a paged tile grid share one node arena and one item
//! pool. A scripted viewport drives them frame by frame, the way a scroll pane
//! would, and the run ends with a [`DemoReport`] of pool traffic.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use anyhow::{ensure, Context, Result};
use vlist_core::{ItemNode, NodeArena, Point, ResourceId, Shared, Size};
use vlist_foundation::{
    ArrowKey, ItemPool, ListContainer, ListStats, PageController, PagedState, ScrollViewport,
};
use vlist_layout::{ListLayoutMode, VerticalAlign};

pub const CARD_SIZE: Size = Size::new(80.0, 48.0);
pub const TILE_SIZE: Size = Size::new(100.0, 50.0);
pub const CARD_COUNT: usize = 12;
pub const TILE_COUNT: usize = 40;

/// Text a renderer writes into each node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(pub String);

/// Scroll pane that clamps user drags to the published content.
///
/// Positions set by the list itself are taken as is; a looping list moves
/// the pane before it publishes its first content size.
#[derive(Debug, Default)]
pub struct DemoViewport {
    scroll: Point,
    view: Size,
    content: Size,
}

impl DemoViewport {
    pub fn new(view: Size) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Drags the pane by `delta` as a user would.
    pub fn scroll_by(&mut self, delta: Point) {
        let max = self.max_scroll();
        self.scroll = Point::new(
            (self.scroll.x + delta.x).clamp(0.0, max.x),
            (self.scroll.y + delta.y).clamp(0.0, max.y),
        );
    }

    fn max_scroll(&self) -> Point {
        Point::new(
            (self.content.width - self.view.width).max(0.0),
            (self.content.height - self.view.height).max(0.0),
        )
    }
}

impl ScrollViewport for DemoViewport {
    fn scroll_position(&self) -> Point {
        self.scroll
    }

    fn view_size(&self) -> Size {
        self.view
    }

    fn set_content_size(&mut self, size: Size) {
        self.content = size;
        let max = self.max_scroll();
        self.scroll = Point::new(self.scroll.x.min(max.x), self.scroll.y.min(max.y));
    }

    fn set_scroll_position(&mut self, position: Point) {
        self.scroll = position;
    }
}

/// A list together with the pane it scrolls in.
pub struct DemoList {
    pub list: ListContainer,
    pub viewport: Rc<RefCell<DemoViewport>>,
}

impl DemoList {
    fn new(tree: &Shared<NodeArena>, pool: &Shared<ItemPool>, view: Size, item: Size) -> Self {
        let viewport = Rc::new(RefCell::new(DemoViewport::new(view)));
        let pane: Rc<RefCell<dyn ScrollViewport>> = viewport.clone();
        let list = ListContainer::new(
            tree.clone(),
            pool.clone(),
            Shared::from_rc(pane),
            move |resource: &ResourceId| Some(ItemNode::new(resource.clone(), item)),
        );
        Self { list, viewport }
    }

    /// One frame of user scrolling.
    pub fn drag(&self, delta: Point) {
        self.viewport.borrow_mut().scroll_by(delta);
        self.list.handle_scroll();
    }

    pub fn jump_to(&self, position: Point) {
        self.viewport.borrow_mut().set_scroll_position(position);
        self.list.handle_scroll();
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub frames: usize,
    pub carousel: ListStats,
    pub grid: ListStats,
    pub pooled: usize,
    pub carousel_selection: Option<usize>,
    pub page: Option<usize>,
    pub tree_dump: String,
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames: {}", self.frames)?;
        for (name, stats) in [("carousel", &self.carousel), ("grid", &self.grid)] {
            writeln!(
                f,
                "{name}: in use {}, created {}, reused {} ({:.0}%), released {}, renders {}",
                stats.items_in_use,
                stats.total_created,
                stats.reuse_count,
                stats.reuse_ratio() * 100.0,
                stats.released_count,
                stats.render_count,
            )?;
        }
        writeln!(f, "pooled nodes: {}", self.pooled)?;
        writeln!(f, "carousel selection: {:?}", self.carousel_selection)?;
        write!(f, "grid page: {:?}", self.page)
    }
}

fn build_carousel(tree: &Shared<NodeArena>, pool: &Shared<ItemPool>) -> DemoList {
    let carousel = DemoList::new(tree, pool, Size::new(320.0, 48.0), CARD_SIZE);
    carousel.list.set_layout_mode(ListLayoutMode::SingleRow);
    carousel.list.set_column_gap(4.0);
    carousel.list.set_vertical_align(VerticalAlign::Middle);
    carousel
        .list
        .set_item_renderer(|index: usize, node: &mut ItemNode| {
            node.set_payload(Label(format!("card {index}")));
        });
    carousel.list.set_virtual_and_loop();
    carousel.list.set_num_items(CARD_COUNT);
    carousel
}

fn build_grid(tree: &Shared<NodeArena>, pool: &Shared<ItemPool>) -> DemoList {
    let grid = DemoList::new(tree, pool, Size::new(300.0, 100.0), TILE_SIZE);
    grid.list.set_layout_mode(ListLayoutMode::Pagination);
    grid.list.set_item_provider(|index: usize| {
        ResourceId::new(if index % 5 == 0 { "tile:header" } else { "tile" })
    });
    grid.list
        .set_item_renderer(|index: usize, node: &mut ItemNode| {
            node.set_payload(Label(format!("tile {index}")));
        });
    grid.list.set_virtual();
    grid.list.set_num_items(TILE_COUNT);
    grid
}

/// Scrolls both lists through a fixed script and reports what the pool did.
pub fn run() -> Result<DemoReport> {
    let tree = Shared::new(NodeArena::new());
    let pool = Shared::new(ItemPool::new());

    let carousel = build_carousel(&tree, &pool);
    let grid = build_grid(&tree, &pool);
    log::info!(
        "carousel spans {} px for {} cards",
        carousel.list.content_size().width,
        carousel.list.num_items()
    );

    let mut frames = 0;
    for frame in 0..60 {
        carousel.drag(Point::new(42.0, 0.0));
        frames += 1;
        if frame % 20 == 19 {
            log::debug!(
                "frame {frame}: scroll {:?}, first card {:?}",
                carousel.viewport.borrow().scroll_position(),
                carousel.list.first_visible_index()
            );
        }
    }
    let in_view = carousel.list.visible_items().len();
    ensure!(
        carousel.list.stats().items_in_use == in_view,
        "carousel holds nodes outside its window"
    );

    let first = carousel
        .list
        .first_visible_index()
        .context("carousel shows no cards")?;
    carousel.list.set_selected_index(Some(first));
    for _ in 0..3 {
        carousel.list.handle_arrow_key(ArrowKey::Right);
    }

    let pages = Rc::new(RefCell::new(PageController::new(TILE_COUNT)));
    let peer: Rc<RefCell<dyn PagedState>> = pages.clone();
    grid.list.set_selection_peer(Some(Shared::from_rc(peer)));

    let page_width = grid.viewport.borrow().view_size().width;
    for page in 0..4 {
        grid.jump_to(Point::new(page as f32 * page_width, 0.0));
        frames += 1;
    }
    pages.borrow_mut().set_selected_index(Some(17));
    ensure!(
        grid.list.selected_index() == Some(17),
        "grid did not follow its page controller"
    );
    grid.list.handle_arrow_key(ArrowKey::Right);

    let container = grid.list.container_node();
    let tree_dump = {
        let arena = tree.borrow();
        arena
            .node(container)
            .context("grid container left the arena")?;
        arena.dump_tree(Some(container))
    };
    log::debug!("grid tree:\n{tree_dump}");

    let page = pages.borrow().selected_index();
    let pooled = pool.borrow().count();
    Ok(DemoReport {
        frames,
        carousel: carousel.list.stats(),
        grid: grid.list.stats(),
        pooled,
        carousel_selection: carousel.list.selected_index(),
        page,
        tree_dump,
    })
}
