//! The list container: one public handle over shared state that the pool,
//! the node arena and selection peers all reach through [`Shared`] handles.
//!
//! A list starts in non-virtual mode, where it owns an ordered array of item
//! nodes. [`ListContainer::set_virtual`] switches it to a sliding window over
//! `num_items` data items; from then on only the visible indices hold nodes.

mod items;
mod navigation;
mod selection_ops;
mod virtual_pass;

use vlist_core::{ItemNode, Margin, NodeArena, NodeId, Point, ResourceId, Shared, Size};
use vlist_layout::{
    alignment_offset, line_metrics, render_sequence, sanitize_size, HorizontalAlign, LineMetrics,
    ListLayoutConfig, ListLayoutMode, RenderOrder, VerticalAlign,
};

use crate::collaborators::{ItemCreator, ItemProvider, ItemRenderer, ScrollViewport};
use crate::controller::{PagedState, SubscriptionId};
use crate::pool::ItemPool;
use crate::selection::{SelectionChange, SelectionController};
use crate::stats::ListStats;
use crate::window::{ItemInfo, LineGeometry, RefreshState, VirtualWindow};

pub use navigation::ArrowKey;

const CONTAINER_RESOURCE: &str = "vlist:container";
const DEFAULT_ITEM_RESOURCE: &str = "item";

type SelectionListener = Box<dyn FnMut(SelectionChange)>;

struct PeerBinding {
    peer: Shared<dyn PagedState>,
    subscription: SubscriptionId,
}

struct ListInner {
    tree: Shared<NodeArena>,
    pool: Shared<ItemPool>,
    viewport: Shared<dyn ScrollViewport>,
    container: NodeId,
    config: ListLayoutConfig,
    default_item: ResourceId,
    creator: Box<dyn ItemCreator>,
    renderer: Option<Box<dyn ItemRenderer>>,
    provider: Option<Box<dyn ItemProvider>>,
    /// Item nodes in non-virtual mode.
    items: Vec<NodeId>,
    window: Option<VirtualWindow>,
    /// Size used for unmeasured items and for line metrics.
    item_size: Size,
    metrics: LineMetrics,
    content_size: Size,
    published: Option<Size>,
    selection: SelectionController,
    selection_listeners: Vec<SelectionListener>,
    peer: Option<PeerBinding>,
    syncing_peer: bool,
    stats: ListStats,
}

/// A scrollable list of item nodes, optionally virtualized.
///
/// The handle owns the list; dropping it removes the container node (and
/// every attached item) from the arena and unsubscribes from a selection
/// peer. Pooled items stay in the pool.
pub struct ListContainer {
    inner: Shared<ListInner>,
}

impl ListContainer {
    /// Creates an empty, non-virtual list whose container node is sized to the viewport.
    pub fn new(
        tree: Shared<NodeArena>,
        pool: Shared<ItemPool>,
        viewport: Shared<dyn ScrollViewport>,
        creator: impl ItemCreator + 'static,
    ) -> Self {
        let view = viewport.borrow().view_size();
        let container = tree
            .borrow_mut()
            .insert(ItemNode::new(CONTAINER_RESOURCE, view));
        let config = ListLayoutConfig::default();
        let item_size = config.default_item_size;
        let inner = ListInner {
            tree,
            pool,
            viewport,
            container,
            config,
            default_item: ResourceId::new(DEFAULT_ITEM_RESOURCE),
            creator: Box::new(creator),
            renderer: None,
            provider: None,
            items: Vec::new(),
            window: None,
            item_size,
            metrics: LineMetrics::SINGLE,
            content_size: Size::ZERO,
            published: None,
            selection: SelectionController::default(),
            selection_listeners: Vec::new(),
            peer: None,
            syncing_peer: false,
            stats: ListStats::default(),
        };
        log::debug!("list container {container} created");
        Self {
            inner: Shared::new(inner),
        }
    }

    /// Node the list attaches its items to.
    pub fn container_node(&self) -> NodeId {
        self.inner.borrow().container
    }

    pub fn set_item_renderer(&self, renderer: impl ItemRenderer + 'static) {
        self.inner.borrow_mut().renderer = Some(Box::new(renderer));
    }

    /// Chooses the item resource per data index and re-renders the visible items.
    pub fn set_item_provider(&self, provider: impl ItemProvider + 'static) {
        let mut inner = self.inner.borrow_mut();
        inner.provider = Some(Box::new(provider));
        inner.invalidate(RefreshState::ContentDirty);
    }

    /// Resource used when no provider is set.
    pub fn set_default_item(&self, resource: impl Into<ResourceId>) {
        let mut inner = self.inner.borrow_mut();
        inner.default_item = resource.into();
        if inner.window.is_some() {
            inner.item_size = inner.probe_item_size();
        }
        inner.invalidate(RefreshState::LayoutDirty);
    }

    pub fn default_item(&self) -> ResourceId {
        self.inner.borrow().default_item.clone()
    }

    pub fn is_virtual(&self) -> bool {
        self.inner.borrow().window.is_some()
    }

    pub fn is_looping(&self) -> bool {
        self.inner
            .borrow()
            .window
            .as_ref()
            .is_some_and(VirtualWindow::is_looping)
    }

    /// Switches to virtual mode. Existing items go back to the pool.
    pub fn set_virtual(&self) {
        self.inner.borrow_mut().enable_virtual(false);
    }

    /// Switches to virtual mode with the data repeated [`LOOP_MULTIPLIER`](crate::LOOP_MULTIPLIER) times.
    ///
    /// Scrolling near either end jumps back by half the content, so the list
    /// appears endless.
    pub fn set_virtual_and_loop(&self) {
        self.inner.borrow_mut().enable_virtual(true);
    }

    /// Data item count. In virtual mode this sizes the window; otherwise nodes
    /// are created or pooled to match and every item is re-rendered.
    pub fn set_num_items(&self, count: usize) {
        self.inner.borrow_mut().set_num_items(count);
    }

    /// Data item count (not multiplied in loop mode).
    pub fn num_items(&self) -> usize {
        let inner = self.inner.borrow();
        match inner.window.as_ref() {
            Some(window) => window.real_count(),
            None => inner.items.len(),
        }
    }

    /// Re-renders what is visible. Use after the data behind the items changed.
    pub fn refresh(&self) {
        self.inner.borrow_mut().invalidate(RefreshState::ContentDirty);
    }

    /// Runs a refresh pass now. Without pending changes or a scroll it changes nothing.
    pub fn refresh_virtual_list(&self) {
        self.inner.borrow_mut().refresh_virtual();
    }

    /// Must be called after the viewport scrolled.
    pub fn handle_scroll(&self) {
        self.inner.borrow_mut().refresh_virtual();
    }

    /// Must be called after the viewport changed size.
    pub fn handle_resize(&self) {
        self.inner.borrow_mut().invalidate(RefreshState::LayoutDirty);
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.inner
            .borrow()
            .window
            .as_ref()
            .map_or(RefreshState::Clean, VirtualWindow::state)
    }

    pub fn content_size(&self) -> Size {
        self.inner.borrow().content_size
    }

    /// Item infos of a virtual list, indexed by virtual index.
    pub fn item_info(&self, index: usize) -> Option<ItemInfo> {
        self.inner
            .borrow()
            .window
            .as_ref()
            .and_then(|window| window.info(index).cloned())
    }

    /// Virtual indices of the last pass with their nodes, in index order.
    ///
    /// In non-virtual mode every item is listed.
    pub fn visible_items(&self) -> Vec<(usize, NodeId)> {
        let inner = self.inner.borrow();
        match inner.window.as_ref() {
            Some(window) => window
                .visible()
                .filter_map(|index| window.info(index)?.node.map(|node| (index, node)))
                .collect(),
            None => inner.items.iter().copied().enumerate().collect(),
        }
    }

    pub fn stats(&self) -> ListStats {
        let inner = self.inner.borrow();
        let items_in_use = match inner.window.as_ref() {
            Some(window) => window.infos().iter().filter(|info| info.node.is_some()).count(),
            None => inner.items.len(),
        };
        let items_in_pool = inner.pool.borrow().count();
        ListStats {
            items_in_use,
            items_in_pool,
            ..inner.stats.clone()
        }
    }

    pub fn layout_config(&self) -> ListLayoutConfig {
        self.inner.borrow().config.clone()
    }

    /// Replaces every layout setting at once.
    pub fn set_layout_config(&self, config: ListLayoutConfig) {
        self.inner.borrow_mut().apply_config(config);
    }

    pub fn set_layout_mode(&self, mode: ListLayoutMode) {
        self.update_config(|config| config.mode = mode);
    }

    pub fn set_line_gap(&self, gap: f32) {
        self.update_config(|config| config.line_gap = gap);
    }

    pub fn set_column_gap(&self, gap: f32) {
        self.update_config(|config| config.column_gap = gap);
    }

    pub fn set_line_count(&self, count: usize) {
        self.update_config(|config| config.line_count = count);
    }

    pub fn set_column_count(&self, count: usize) {
        self.update_config(|config| config.column_count = count);
    }

    pub fn set_align(&self, align: HorizontalAlign) {
        self.update_config(|config| config.align = align);
    }

    pub fn set_vertical_align(&self, align: VerticalAlign) {
        self.update_config(|config| config.vertical_align = align);
    }

    pub fn set_auto_resize_item(&self, enabled: bool) {
        self.update_config(|config| config.auto_resize_item = enabled);
    }

    pub fn set_margin(&self, margin: Margin) {
        self.update_config(|config| config.margin = margin);
    }

    pub fn set_render_order(&self, order: RenderOrder) {
        self.update_config(|config| config.render_order = order);
    }

    pub fn set_apex_index(&self, index: usize) {
        self.update_config(|config| config.apex_index = index);
    }

    fn update_config(&self, edit: impl FnOnce(&mut ListLayoutConfig)) {
        let mut inner = self.inner.borrow_mut();
        let mut config = inner.config.clone();
        edit(&mut config);
        inner.apply_config(config);
    }
}

impl Drop for ListContainer {
    fn drop(&mut self) {
        let Some(mut inner) = self.inner.try_borrow_mut() else {
            log::warn!("list dropped while borrowed; container left in the arena");
            return;
        };
        if let Some(binding) = inner.peer.take() {
            match binding.peer.try_borrow_mut() {
                Some(mut peer) => peer.unsubscribe(binding.subscription),
                None => log::warn!("selection peer busy; subscription left behind"),
            }
        }
        inner.selection_listeners.clear();
        let container = inner.container;
        let tree = inner.tree.clone();
        drop(inner);
        if let Some(mut arena) = tree.try_borrow_mut() {
            if let Err(err) = arena.remove(container) {
                log::warn!("cannot dispose list container: {err}");
            }
        };
    }
}

impl ListInner {
    /// Number of addressable indices: virtual indices in virtual mode.
    fn item_count(&self) -> usize {
        match self.window.as_ref() {
            Some(window) => window.len(),
            None => self.items.len(),
        }
    }

    fn resource_for(&self, index: usize) -> ResourceId {
        match self.provider.as_ref() {
            Some(provider) => provider.provide(index),
            None => self.default_item.clone(),
        }
    }

    fn line_geometry(&self) -> LineGeometry {
        LineGeometry {
            axis: self.config.scroll_axis(),
            metrics: self.metrics,
            line_spacing: self.config.line_spacing(),
            item_spacing: self.config.item_spacing(),
            default_size: self.item_size,
        }
    }

    /// Takes a node for `resource` from the pool, or builds one.
    ///
    /// Creation failures are counted and logged; the caller skips the item.
    fn acquire(
        &mut self,
        arena: &mut NodeArena,
        pool: &mut ItemPool,
        resource: &ResourceId,
    ) -> Option<NodeId> {
        if let Some(node) = pool.get(resource) {
            self.stats.reuse_count += 1;
            return Some(node);
        }
        match self.creator.create(resource) {
            Some(node) => {
                self.stats.total_created += 1;
                Some(arena.insert(node))
            }
            None => {
                self.stats.creation_failures += 1;
                log::warn!("item creator returned nothing for {resource}");
                None
            }
        }
    }

    /// Returns `node` to the pool under its own resource.
    fn release(&mut self, arena: &mut NodeArena, pool: &mut ItemPool, node: NodeId) {
        let Some(item) = arena.get_mut(node) else {
            log::warn!("released node {node} no longer exists");
            return;
        };
        item.selected = false;
        let resource = item.resource.clone();
        if pool.put(arena, &resource, node) {
            self.stats.released_count += 1;
        }
    }

    /// Measures the default item by borrowing one from the pool (or creating it).
    fn probe_item_size(&mut self) -> Size {
        let fallback = self.config.default_item_size;
        let resource = self.default_item.clone();
        let tree = self.tree.clone();
        let pool = self.pool.clone();
        let mut arena = tree.borrow_mut();
        let mut pool = pool.borrow_mut();
        let Some(node) = self.acquire(&mut arena, &mut pool, &resource) else {
            return fallback;
        };
        let size = arena
            .get(node)
            .map_or(fallback, |item| sanitize_size(item.size, fallback));
        if !pool.put(&mut arena, &resource, node) {
            log::warn!("probe item for {resource} could not be pooled");
        }
        size
    }

    fn enable_virtual(&mut self, looping: bool) {
        if let Some(window) = self.window.as_ref() {
            if window.is_looping() != looping {
                log::warn!("list is already virtual (looping: {})", window.is_looping());
            }
            return;
        }
        self.clear_items_to_pool();
        self.item_size = self.probe_item_size();
        let view = self.viewport.borrow().view_size();
        self.metrics = line_metrics(&self.config, view, self.item_size);
        self.window = Some(VirtualWindow::new(looping));
        let diff = self.selection.set_item_count(0);
        self.apply_selection_diff(&diff);
        log::debug!(
            "list {} is now virtual (looping: {looping}, item size {:?})",
            self.container,
            self.item_size
        );
        self.refresh_virtual();
    }

    fn set_num_items(&mut self, count: usize) {
        if self.window.is_none() {
            self.resize_items(count);
            return;
        }
        let dropped = match self.window.as_mut() {
            Some(window) => window.set_real_count(count),
            None => Vec::new(),
        };
        if !dropped.is_empty() {
            let tree = self.tree.clone();
            let pool = self.pool.clone();
            let mut arena = tree.borrow_mut();
            let mut pool = pool.borrow_mut();
            for node in dropped {
                self.release(&mut arena, &mut pool, node);
            }
        }
        let len = self.item_count();
        let diff = self.selection.set_item_count(len);
        self.apply_selection_diff(&diff);
        self.refresh_virtual();
    }

    /// Marks pending work and runs the matching pass right away.
    fn invalidate(&mut self, state: RefreshState) {
        match self.window.as_mut() {
            Some(window) => {
                window.mark(state);
                self.refresh_virtual();
            }
            None => self.layout_items(),
        }
    }

    fn apply_config(&mut self, config: ListLayoutConfig) {
        let config = config.sanitized();
        if config == self.config {
            return;
        }
        self.config = config;
        self.invalidate(RefreshState::LayoutDirty);
    }

    /// Top-left corner of the first item: margins plus alignment offset.
    ///
    /// Pages are laid out edge to edge, so pagination ignores margins.
    fn content_origin(&self, content: Size, view: Size) -> Point {
        if self.metrics.page.is_some() {
            return Point::ZERO;
        }
        let offset = alignment_offset(&self.config, content, view);
        Point::new(
            self.config.margin.left + offset.x,
            self.config.margin.top + offset.y,
        )
    }

    /// Publishes the content size to the viewport when it changed.
    fn publish_content_size(&mut self, size: Size) {
        self.content_size = size;
        if self.published == Some(size) {
            return;
        }
        self.published = Some(size);
        self.viewport.borrow_mut().set_content_size(size);
    }

    /// Reorders the container's children so they draw in the configured order.
    ///
    /// `nodes` are the attached items in index order, the first one at `first_index`.
    fn apply_render_order(&self, arena: &mut NodeArena, nodes: &[NodeId], first_index: usize) {
        let apex = self.config.apex_index.saturating_sub(first_index);
        let ordered: Vec<NodeId> = render_sequence(nodes.len(), self.config.render_order, apex)
            .into_iter()
            .filter_map(|position| nodes.get(position).copied())
            .collect();
        if arena.children(self.container) == ordered.as_slice() {
            return;
        }
        if let Err(err) = arena.reorder_children(self.container, &ordered) {
            log::debug!("render order not applied: {err}");
        }
    }
}
