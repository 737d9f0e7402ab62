//! Single forward pass that positions items line by line.

use vlist_core::{Point, Size};

use crate::axis::Axis;
use crate::calculator::{LineMetrics, PageGrid};
use crate::config::ListLayoutConfig;

/// Places consecutive items, wrapping after `items_per_line` of them.
///
/// The cursor never revisits a placed item, so a pass over the visible
/// window costs time proportional to the window alone. It must be started on
/// the first item of a line (or of a page in pagination mode).
#[derive(Debug, Clone)]
pub struct LineCursor {
    axis: Axis,
    items_per_line: usize,
    line_spacing: f32,
    item_spacing: f32,
    origin: Point,
    line_start: f32,
    within: f32,
    line_extent: f32,
    in_line: usize,
    pages: Option<PageCursor>,
}

#[derive(Debug, Clone)]
struct PageCursor {
    grid: PageGrid,
    page_width: f32,
    page: usize,
    in_page: usize,
}

impl LineCursor {
    /// Starts a pass at `start_index` whose line begins `start_offset` along the scroll axis.
    ///
    /// `origin` is the top-left corner of the content (margins plus alignment offset).
    pub fn new(
        config: &ListLayoutConfig,
        viewport: Size,
        metrics: LineMetrics,
        origin: Point,
        start_index: usize,
        start_offset: f32,
    ) -> Self {
        let pages = metrics.page.map(|grid| PageCursor {
            grid,
            page_width: viewport.width,
            page: grid.page_of(start_index),
            in_page: 0,
        });
        let (axis, line_start) = if pages.is_some() {
            // Pages scroll horizontally, but rows inside a page stack vertically.
            (Axis::Vertical, 0.0)
        } else {
            (config.scroll_axis(), start_offset)
        };
        let (line_spacing, item_spacing) = match axis {
            Axis::Vertical => (config.line_gap, config.column_gap),
            Axis::Horizontal => (config.column_gap, config.line_gap),
        };
        Self {
            axis,
            items_per_line: metrics.items_per_line.max(1),
            line_spacing,
            item_spacing,
            origin,
            line_start,
            within: 0.0,
            line_extent: 0.0,
            in_line: 0,
            pages,
        }
    }

    /// Returns the position of the next item of size `size` and advances past it.
    pub fn place(&mut self, size: Size) -> Point {
        if let Some(pages) = self.pages.as_mut() {
            if pages.in_page == pages.grid.per_page() {
                pages.page += 1;
                pages.in_page = 0;
                self.line_start = 0.0;
                self.within = 0.0;
                self.line_extent = 0.0;
                self.in_line = 0;
            }
            pages.in_page += 1;
        }

        if self.in_line == self.items_per_line {
            self.line_start += self.line_extent + self.line_spacing;
            self.within = 0.0;
            self.line_extent = 0.0;
            self.in_line = 0;
        }

        let local = self.axis.point(self.line_start, self.within);
        self.within += self.axis.cross_axis().extent(size) + self.item_spacing;
        self.line_extent = self.line_extent.max(self.axis.extent(size));
        self.in_line += 1;

        let page_x = self
            .pages
            .as_ref()
            .map(|p| p.page as f32 * p.page_width)
            .unwrap_or(0.0);
        Point::new(self.origin.x + page_x + local.x, self.origin.y + local.y)
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
