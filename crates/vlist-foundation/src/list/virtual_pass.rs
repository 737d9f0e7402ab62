//! One refresh pass over a virtual list.
//!
//! A pass finds the index range the viewport covers, returns nodes that left
//! the range to the pool, binds nodes to indices that entered it, and then
//! positions the whole range in one forward sweep. Released nodes go back
//! before new ones are taken, so a scroll step reuses its own nodes.

use std::ops::Range;

use vlist_core::{NodeArena, NodeId, Point, Size};
use vlist_layout::{
    assemble_content_size, fitted_item_size, leading_margin, line_metrics, sanitize_size, Axis,
    LineCursor,
};
use web_time::Instant;

use super::ListInner;
use crate::pool::ItemPool;
use crate::window::{LineGeometry, RefreshState, VirtualWindow};

/// Scroll distance from the start that counts as "at the start" for loop recentering.
const LOOP_EDGE: f32 = 0.001;

/// Values fixed for the duration of one pass.
struct Pass {
    view: Size,
    geo: LineGeometry,
    /// Dirty pass: every bound item is re-rendered.
    force: bool,
    generation: u32,
}

impl ListInner {
    /// Runs a pass if the list is virtual.
    pub(super) fn refresh_virtual(&mut self) {
        let Some(mut window) = self.window.take() else {
            return;
        };
        self.run_pass(&mut window);
        self.window = Some(window);
    }

    fn run_pass(&mut self, window: &mut VirtualWindow) {
        let started = Instant::now();
        let (scroll, view) = {
            let viewport = self.viewport.borrow();
            (viewport.scroll_position(), viewport.view_size())
        };
        let state = window.state();
        if state == RefreshState::LayoutDirty {
            self.metrics = line_metrics(&self.config, view, self.item_size);
        }
        let geo = self.line_geometry();
        if state != RefreshState::Clean {
            window.invalidate_anchor();
            if self.metrics.page.is_none() {
                window.recompute_content(&geo);
            }
        }

        let scroll = if window.is_looping() && self.metrics.page.is_none() {
            self.recenter_loop(window, scroll, view)
        } else {
            scroll
        };
        let from = geo.axis.coordinate(scroll) - leading_margin(&self.config);
        let limit = from + geo.axis.extent(view);
        let (located, first_offset) = match self.metrics.page {
            Some(grid) => (window.locate_pages(scroll.x, view.width, grid), 0.0),
            None => window.locate(from, geo.axis.extent(view), &geo),
        };

        let pass = Pass {
            view,
            geo,
            force: state != RefreshState::Clean,
            generation: window.begin_pass(),
        };
        let tree = self.tree.clone();
        let pool_handle = self.pool.clone();
        let mut arena = tree.borrow_mut();
        let mut pool = pool_handle.borrow_mut();

        let previous = window.visible();
        let mut released = self.release_outside(window, &mut arena, &mut pool, previous, &located);
        let (range, acquired) = match self.metrics.page {
            Some(_) => {
                let acquired = self.bind_range(window, &mut arena, &mut pool, &located, &pass);
                (located, acquired)
            }
            None => {
                let bound = self.bind_lines(
                    window,
                    &mut arena,
                    &mut pool,
                    located.start,
                    first_offset,
                    limit,
                    &pass,
                );
                // Measured lines may reach the limit earlier than the estimate did.
                released += self.release_outside(window, &mut arena, &mut pool, located, &bound.0);
                bound
            }
        };
        let content = self.virtual_content_size(window, view);
        self.position_range(window, &mut arena, &range, first_offset, content, view);

        let nodes: Vec<NodeId> = range
            .clone()
            .filter_map(|index| window.info(index).and_then(|info| info.node))
            .collect();
        self.apply_render_order(&mut arena, &nodes, range.start);
        if let Some(container) = arena.get_mut(self.container) {
            container.size = view;
        }
        drop(pool);
        drop(arena);

        self.publish_content_size(content);
        window.set_visible(range.clone());
        window.mark_clean();
        log::trace!(
            "list {} pass over {:?} ({:?}): {} acquired, {} released in {:?}",
            self.container,
            range,
            state,
            acquired,
            released,
            started.elapsed()
        );
    }

    /// Jumps back by half the content when a looping list reaches either end.
    fn recenter_loop(&mut self, window: &VirtualWindow, scroll: Point, view: Size) -> Point {
        let axis = self.config.scroll_axis();
        let view_along = axis.extent(view);
        let total = axis.extent(self.virtual_content_size(window, view));
        if window.is_empty() || total <= view_along {
            return scroll;
        }
        let along = axis.coordinate(scroll);
        let half = window.content_along() / 2.0;
        let moved = if along < LOOP_EDGE {
            along + half
        } else if along >= total - view_along {
            along - half
        } else {
            return scroll;
        };
        let recentered = match axis {
            Axis::Vertical => Point::new(scroll.x, moved),
            Axis::Horizontal => Point::new(moved, scroll.y),
        };
        log::debug!("list {} loop recentered {along} -> {moved}", self.container);
        self.viewport.borrow_mut().set_scroll_position(recentered);
        recentered
    }

    /// Returns nodes of `candidates` outside `keep`, keeping their selection in the info.
    fn release_outside(
        &mut self,
        window: &mut VirtualWindow,
        arena: &mut NodeArena,
        pool: &mut ItemPool,
        candidates: Range<usize>,
        keep: &Range<usize>,
    ) -> usize {
        let mut released = 0;
        for index in candidates {
            if keep.contains(&index) {
                continue;
            }
            let Some(info) = window.info_mut(index) else {
                continue;
            };
            let Some(node) = info.node.take() else {
                continue;
            };
            if let Some(item) = arena.get(node) {
                info.selected = item.selected;
            }
            self.release(arena, pool, node);
            released += 1;
        }
        released
    }

    /// Binds whole pages of a pagination window.
    fn bind_range(
        &mut self,
        window: &mut VirtualWindow,
        arena: &mut NodeArena,
        pool: &mut ItemPool,
        range: &Range<usize>,
        pass: &Pass,
    ) -> usize {
        range
            .clone()
            .filter(|&index| self.bind_slot(window, arena, pool, index, pass))
            .count()
    }

    /// Binds lines from `start` until the measured lines reach `limit`.
    ///
    /// Each line is rendered and measured before the walk decides whether the
    /// next one is needed, so small items fill the viewport in one pass.
    /// Returns the bound range and the number of newly acquired nodes.
    #[allow(clippy::too_many_arguments)]
    fn bind_lines(
        &mut self,
        window: &mut VirtualWindow,
        arena: &mut NodeArena,
        pool: &mut ItemPool,
        start: usize,
        start_offset: f32,
        limit: f32,
        pass: &Pass,
    ) -> (Range<usize>, usize) {
        let len = window.len();
        let per_line = pass.geo.metrics.items_per_line.max(1);
        let mut acquired = 0;
        let mut end = start;
        let mut cursor = start_offset;
        while end < len && cursor < limit {
            let line_end = (end + per_line).min(len);
            let before = window.line_extent(end, &pass.geo);
            for index in end..line_end {
                if self.bind_slot(window, arena, pool, index, pass) {
                    acquired += 1;
                }
            }
            let after = window.line_extent(end, &pass.geo);
            let across = window.line_across(end, &pass.geo);
            window.adjust_content(after - before, across);
            cursor += after + pass.geo.line_spacing;
            end = line_end;
        }
        (start..end, acquired)
    }

    /// Makes sure `index` has a node and renders it when needed.
    ///
    /// Returns `true` when a node was newly acquired. A failed creation
    /// leaves the slot empty; the next pass tries again.
    fn bind_slot(
        &mut self,
        window: &mut VirtualWindow,
        arena: &mut NodeArena,
        pool: &mut ItemPool,
        index: usize,
        pass: &Pass,
    ) -> bool {
        let Some(info) = window.info(index) else {
            return false;
        };
        let selected = info.selected;
        let bound = info.node;
        let real = window.real_index(index);
        let resource = self.resource_for(real);

        let current = match bound {
            Some(id) if pass.force && arena.get(id).map(|item| &item.resource) != Some(&resource) => {
                if let Some(info) = window.info_mut(index) {
                    info.node = None;
                }
                self.release(arena, pool, id);
                None
            }
            other => other,
        };
        let (id, fresh) = match current {
            Some(id) => (id, false),
            None => {
                let Some(id) = self.acquire(arena, pool, &resource) else {
                    return false;
                };
                if let Err(err) = arena.add_child(self.container, id) {
                    log::warn!("cannot attach item {index}: {err}");
                    pool.put(arena, &resource, id);
                    return false;
                }
                (id, true)
            }
        };
        if let Some(info) = window.info_mut(index) {
            info.node = Some(id);
            info.generation = pass.generation;
        }

        if fresh || pass.force {
            let Some(item) = arena.get_mut(id) else {
                return fresh;
            };
            item.selected = selected;
            item.visible = true;
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.render(real, item);
                self.stats.render_count += 1;
            }
            let size = fitted_item_size(
                &self.config,
                pass.view,
                pass.geo.metrics,
                sanitize_size(item.size, self.item_size),
            );
            item.size = size;
            window.record_size(index, size, &pass.geo);
        }
        fresh
    }

    fn position_range(
        &self,
        window: &VirtualWindow,
        arena: &mut NodeArena,
        range: &Range<usize>,
        first_offset: f32,
        content: Size,
        view: Size,
    ) {
        let origin = self.content_origin(content, view);
        let mut cursor = LineCursor::new(
            &self.config,
            view,
            self.metrics,
            origin,
            range.start,
            first_offset,
        );
        for index in range.clone() {
            let Some(info) = window.info(index) else {
                break;
            };
            let position = cursor.place(info.size_or(self.item_size));
            if let Some(item) = info.node.and_then(|id| arena.get_mut(id)) {
                item.position = position;
            }
        }
    }

    fn virtual_content_size(&self, window: &VirtualWindow, view: Size) -> Size {
        match self.metrics.page {
            Some(grid) => Size::new(
                grid.page_count(window.len()) as f32 * view.width,
                view.height,
            ),
            None => assemble_content_size(
                &self.config,
                view,
                window.content_along(),
                window.content_across(),
            ),
        }
    }
}
