//! Bookkeeping for virtual mode: one [`ItemInfo`] per virtual index, the
//! dirty state, and the line walk that finds which indices the viewport
//! currently covers.

use std::ops::Range;

use vlist_core::{NodeId, Size};
use vlist_layout::{sanitize_size, Axis, LineMetrics, PageGrid};

/// Data copies laid out back to back in loop mode.
pub const LOOP_MULTIPLIER: usize = 6;

const UNMEASURED: f32 = -1.0;

/// Per-index slot of a virtual list.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemInfo {
    /// Node bound to this index while it is inside the visible window.
    pub node: Option<NodeId>,
    /// Last measured width; negative until the item is first rendered.
    pub width: f32,
    /// Last measured height; negative until the item is first rendered.
    pub height: f32,
    /// Selection flag kept while the index has no node.
    pub selected: bool,
    /// Refresh pass that last touched this slot.
    pub generation: u32,
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            node: None,
            width: UNMEASURED,
            height: UNMEASURED,
            selected: false,
            generation: 0,
        }
    }
}

impl ItemInfo {
    pub fn is_measured(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Measured size, with unmeasured extents replaced by `default`.
    pub fn size_or(&self, default: Size) -> Size {
        sanitize_size(Size::new(self.width, self.height), default)
    }
}

/// What the next refresh pass has to redo.
///
/// Ordered by severity: a pending layout change also covers content changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RefreshState {
    #[default]
    Clean,
    /// Item count or data changed; visible items are re-rendered.
    ContentDirty,
    /// Viewport or layout settings changed; line metrics are recomputed too.
    LayoutDirty,
}

/// Geometry a line walk needs, captured once per pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineGeometry {
    pub axis: Axis,
    pub metrics: LineMetrics,
    pub line_spacing: f32,
    pub item_spacing: f32,
    pub default_size: Size,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Anchor {
    index: usize,
    offset: f32,
}

/// Item infos plus the walk state for a virtual list.
///
/// The window remembers the line that started the previous visible range
/// (the anchor) so the next pass walks from there instead of from index 0.
#[derive(Debug)]
pub struct VirtualWindow {
    infos: Vec<ItemInfo>,
    real_count: usize,
    looping: bool,
    state: RefreshState,
    visible: Range<usize>,
    generation: u32,
    anchor: Option<Anchor>,
    content_along: f32,
    content_across: f32,
}

impl VirtualWindow {
    pub fn new(looping: bool) -> Self {
        Self {
            infos: Vec::new(),
            real_count: 0,
            looping,
            state: RefreshState::LayoutDirty,
            visible: 0..0,
            generation: 0,
            anchor: None,
            content_along: 0.0,
            content_across: 0.0,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Number of data items.
    pub fn real_count(&self) -> usize {
        self.real_count
    }

    /// Number of virtual indices: the data count, times [`LOOP_MULTIPLIER`] when looping.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Indices that were backed by nodes after the last pass.
    pub fn visible(&self) -> Range<usize> {
        self.visible.clone()
    }

    pub fn info(&self, index: usize) -> Option<&ItemInfo> {
        self.infos.get(index)
    }

    pub(crate) fn info_mut(&mut self, index: usize) -> Option<&mut ItemInfo> {
        self.infos.get_mut(index)
    }

    pub fn infos(&self) -> &[ItemInfo] {
        &self.infos
    }

    /// Data index shown at virtual `index`.
    pub fn real_index(&self, index: usize) -> usize {
        if self.looping && self.real_count > 0 {
            index % self.real_count
        } else {
            index
        }
    }

    /// Total extent of all lines along the scroll axis, margins excluded.
    pub fn content_along(&self) -> f32 {
        self.content_along
    }

    /// Widest line across the scroll axis, margins excluded.
    pub fn content_across(&self) -> f32 {
        self.content_across
    }

    /// Resizes the info array for `count` data items.
    ///
    /// Returns the nodes that were bound to indices past the new end; the
    /// caller must release them.
    pub(crate) fn set_real_count(&mut self, count: usize) -> Vec<NodeId> {
        self.real_count = count;
        let len = if self.looping {
            count * LOOP_MULTIPLIER
        } else {
            count
        };
        let dropped = if len < self.infos.len() {
            self.infos
                .drain(len..)
                .filter_map(|info| info.node)
                .collect()
        } else {
            self.infos.resize_with(len, ItemInfo::default);
            Vec::new()
        };
        self.visible = self.visible.start.min(len)..self.visible.end.min(len);
        self.mark(RefreshState::ContentDirty);
        dropped
    }

    /// Raises the pending state; a lower state never downgrades a higher one.
    pub fn mark(&mut self, state: RefreshState) {
        self.state = self.state.max(state);
    }

    pub(crate) fn mark_clean(&mut self) {
        self.state = RefreshState::Clean;
    }

    /// Starts a new pass and returns its generation stamp.
    pub(crate) fn begin_pass(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub(crate) fn set_visible(&mut self, range: Range<usize>) {
        self.visible = range;
    }

    pub(crate) fn invalidate_anchor(&mut self) {
        self.anchor = None;
    }

    /// Stores a new measurement for `index`.
    ///
    /// A size change on a line before the anchor shifts every later line, so
    /// the anchor is dropped and the next walk starts from index 0.
    pub(crate) fn record_size(&mut self, index: usize, size: Size, geo: &LineGeometry) -> bool {
        let Some(info) = self.infos.get_mut(index) else {
            return false;
        };
        if info.width == size.width && info.height == size.height {
            return false;
        }
        info.width = size.width;
        info.height = size.height;
        if let Some(anchor) = self.anchor {
            if geo.metrics.line_start(index) < anchor.index {
                self.anchor = None;
            }
        }
        true
    }

    /// Extent along the scroll axis of the line starting at `line_start`.
    pub(crate) fn line_extent(&self, line_start: usize, geo: &LineGeometry) -> f32 {
        let end = (line_start + geo.metrics.items_per_line).min(self.infos.len());
        self.infos
            .get(line_start..end)
            .unwrap_or_default()
            .iter()
            .map(|info| geo.axis.extent(info.size_or(geo.default_size)))
            .fold(0.0, f32::max)
    }

    /// Extent across the scroll axis of the line starting at `line_start`, gaps included.
    pub(crate) fn line_across(&self, line_start: usize, geo: &LineGeometry) -> f32 {
        let end = (line_start + geo.metrics.items_per_line).min(self.infos.len());
        let line = self.infos.get(line_start..end).unwrap_or_default();
        if line.is_empty() {
            return 0.0;
        }
        let across = geo.axis.cross_axis();
        line.iter()
            .map(|info| across.extent(info.size_or(geo.default_size)))
            .sum::<f32>()
            + geo.item_spacing * (line.len() - 1) as f32
    }

    /// Recomputes the content extent from every info. Only run on dirty passes.
    pub(crate) fn recompute_content(&mut self, geo: &LineGeometry) {
        let mut along = 0.0f32;
        let mut across = 0.0f32;
        let step = geo.metrics.items_per_line.max(1);
        for (line, start) in (0..self.infos.len()).step_by(step).enumerate() {
            if line > 0 {
                along += geo.line_spacing;
            }
            along += self.line_extent(start, geo);
            across = across.max(self.line_across(start, geo));
        }
        self.content_along = along;
        self.content_across = across;
    }

    /// Applies the change of one re-measured line to the content extent.
    pub(crate) fn adjust_content(&mut self, along_delta: f32, line_across: f32) {
        self.content_along = (self.content_along + along_delta).max(0.0);
        self.content_across = self.content_across.max(line_across);
    }

    /// Finds the lines covering `scroll..scroll + view_extent`.
    ///
    /// Offsets are relative to the first line, margins excluded. Returns the
    /// covered index range (whole lines) and the offset of its first line.
    pub(crate) fn locate(
        &mut self,
        scroll: f32,
        view_extent: f32,
        geo: &LineGeometry,
    ) -> (Range<usize>, f32) {
        let len = self.infos.len();
        if len == 0 {
            self.anchor = None;
            return (0..0, 0.0);
        }
        let per_line = geo.metrics.items_per_line.max(1);
        let (mut index, mut offset) = match self.anchor {
            Some(anchor) if anchor.index < len && anchor.index % per_line == 0 => {
                (anchor.index, anchor.offset)
            }
            _ => (0, 0.0),
        };

        while index > 0 && offset > scroll {
            index -= per_line;
            offset -= self.line_extent(index, geo) + geo.line_spacing;
        }
        if index == 0 {
            offset = 0.0;
        }
        loop {
            let next = index + per_line;
            if next >= len {
                break;
            }
            let extent = self.line_extent(index, geo);
            if offset + extent > scroll {
                break;
            }
            offset += extent + geo.line_spacing;
            index = next;
        }
        self.anchor = Some(Anchor { index, offset });

        let limit = scroll + view_extent;
        let mut end = index;
        let mut cursor = offset;
        while end < len && cursor < limit {
            cursor += self.line_extent(end, geo) + geo.line_spacing;
            end += per_line;
        }
        (index..end.min(len), offset)
    }

    /// Whole pages intersecting a horizontal scroll window of `view_width`.
    pub(crate) fn locate_pages(&self, scroll: f32, view_width: f32, grid: PageGrid) -> Range<usize> {
        let len = self.infos.len();
        if len == 0 || !(view_width > 0.0) {
            return 0..0;
        }
        let per_page = grid.per_page();
        let pages = grid.page_count(len);
        let first_page = ((scroll / view_width).floor().max(0.0) as usize).min(pages - 1);
        let end_page = (((scroll + view_width) / view_width).ceil().max(0.0) as usize)
            .clamp(first_page + 1, pages);
        first_page * per_page..(end_page * per_page).min(len)
    }

    /// Offset of the line holding `index`, walking from the anchor when it precedes it.
    pub(crate) fn offset_of(&self, index: usize, geo: &LineGeometry) -> f32 {
        let target = geo.metrics.line_start(index.min(self.infos.len().saturating_sub(1)));
        let (mut line, mut offset) = match self.anchor {
            Some(anchor) if anchor.index <= target && anchor.index % geo.metrics.items_per_line == 0 => {
                (anchor.index, anchor.offset)
            }
            _ => (0, 0.0),
        };
        while line < target {
            offset += self.line_extent(line, geo) + geo.line_spacing;
            line += geo.metrics.items_per_line;
        }
        offset
    }
}

#[cfg(test)]
#[path = "tests/window_tests.rs"]
mod tests;
