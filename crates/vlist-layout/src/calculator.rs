//! Pure layout arithmetic: items per line, page grids, content extent and
//! alignment offsets.

use vlist_core::{Point, Size};

use crate::axis::Axis;
use crate::config::{ListLayoutConfig, ListLayoutMode};

/// Rows and columns of one pagination page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageGrid {
    pub columns: usize,
    pub rows: usize,
}

impl PageGrid {
    pub fn per_page(&self) -> usize {
        self.columns * self.rows
    }

    pub fn page_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.per_page())
    }

    /// Page holding `index`.
    pub fn page_of(&self, index: usize) -> usize {
        index / self.per_page()
    }
}

/// Line structure derived from the config, the viewport and the item size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMetrics {
    /// Items per line; always at least 1. For pagination this is the columns per page row.
    pub items_per_line: usize,
    /// Set only in pagination mode.
    pub page: Option<PageGrid>,
}

impl LineMetrics {
    pub const SINGLE: LineMetrics = LineMetrics {
        items_per_line: 1,
        page: None,
    };

    /// First index of the line holding `index`.
    pub fn line_start(&self, index: usize) -> usize {
        index - index % self.items_per_line
    }
}

/// Measured extent, or `default` when the measurement is negative or NaN.
pub fn sanitize_extent(measured: f32, default: f32) -> f32 {
    if measured.is_finite() && measured >= 0.0 {
        measured
    } else {
        default
    }
}

pub fn sanitize_size(measured: Size, default: Size) -> Size {
    Size::new(
        sanitize_extent(measured.width, default.width),
        sanitize_extent(measured.height, default.height),
    )
}

/// `floor((available + gap) / (item + gap))`, never below 1.
pub fn fit_count(available: f32, item: f32, gap: f32) -> usize {
    let step = item + gap;
    if !(step > 0.0) || !available.is_finite() {
        return 1;
    }
    let count = ((available.max(0.0) + gap) / step).floor();
    if count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Columns and rows of a pagination page, each computed independently.
pub fn page_grid(config: &ListLayoutConfig, viewport: Size, item_size: Size) -> PageGrid {
    let item = sanitize_size(item_size, config.default_item_size);
    let columns = if config.column_count > 0 {
        config.column_count
    } else {
        fit_count(viewport.width, item.width, config.column_gap)
    };
    let rows = if config.line_count > 0 {
        config.line_count
    } else {
        fit_count(viewport.height, item.height, config.line_gap)
    };
    PageGrid { columns, rows }
}

pub fn line_metrics(config: &ListLayoutConfig, viewport: Size, item_size: Size) -> LineMetrics {
    let item = sanitize_size(item_size, config.default_item_size);
    match config.mode {
        ListLayoutMode::SingleColumn | ListLayoutMode::SingleRow => LineMetrics::SINGLE,
        ListLayoutMode::FlowHorizontal => LineMetrics {
            items_per_line: if config.column_count > 0 {
                config.column_count
            } else {
                fit_count(viewport.width, item.width, config.column_gap)
            },
            page: None,
        },
        ListLayoutMode::FlowVertical => LineMetrics {
            items_per_line: if config.line_count > 0 {
                config.line_count
            } else {
                fit_count(viewport.height, item.height, config.line_gap)
            },
            page: None,
        },
        ListLayoutMode::Pagination => {
            let grid = page_grid(config, viewport, item);
            LineMetrics {
                items_per_line: grid.columns,
                page: Some(grid),
            }
        }
    }
}

/// Extent of one line along the scroll axis: its tallest (or widest) item.
pub fn line_extent(axis: Axis, sizes: impl IntoIterator<Item = Size>) -> f32 {
    sizes
        .into_iter()
        .map(|size| axis.extent(size))
        .fold(0.0, f32::max)
}

/// Total content size for `sizes`, margins included.
///
/// Pagination always spans `page_count * viewport.width` by the viewport
/// height, whatever the items measure.
pub fn content_size(
    config: &ListLayoutConfig,
    viewport: Size,
    metrics: LineMetrics,
    sizes: &[Size],
) -> Size {
    if let Some(grid) = metrics.page {
        let pages = grid.page_count(sizes.len());
        return Size::new(pages as f32 * viewport.width, viewport.height);
    }

    let axis = config.scroll_axis();
    let across_axis = axis.cross_axis();
    let default = config.default_item_size;
    let mut along = 0.0f32;
    let mut across = 0.0f32;
    for (line, chunk) in sizes.chunks(metrics.items_per_line).enumerate() {
        if line > 0 {
            along += config.line_spacing();
        }
        along += line_extent(axis, chunk.iter().map(|s| sanitize_size(*s, default)));
        let line_across: f32 = chunk
            .iter()
            .map(|s| across_axis.extent(sanitize_size(*s, default)))
            .sum::<f32>()
            + config.item_spacing() * (chunk.len() - 1) as f32;
        across = across.max(line_across);
    }

    assemble_content_size(config, viewport, along, across)
}

/// Adds margins to raw line totals and turns them into a content size.
///
/// `along` is the summed line extent (gaps included) on the scroll axis,
/// `across` the widest line on the other axis. With `auto_resize_item` the
/// cross extent is the viewport's.
pub fn assemble_content_size(
    config: &ListLayoutConfig,
    viewport: Size,
    along: f32,
    across: f32,
) -> Size {
    let axis = config.scroll_axis();
    let margin = config.margin;
    let (along_margin, across_margin) = match axis {
        Axis::Vertical => (margin.vertical_sum(), margin.horizontal_sum()),
        Axis::Horizontal => (margin.horizontal_sum(), margin.vertical_sum()),
    };
    let across = if config.auto_resize_item {
        axis.cross_axis().extent(viewport)
    } else {
        across + across_margin
    };
    axis.size(along + along_margin, across)
}

/// Leading margin on the scroll axis.
pub fn leading_margin(config: &ListLayoutConfig) -> f32 {
    match config.scroll_axis() {
        Axis::Vertical => config.margin.top,
        Axis::Horizontal => config.margin.left,
    }
}

/// Offset applied to every item when the content is smaller than the viewport.
pub fn alignment_offset(config: &ListLayoutConfig, content: Size, viewport: Size) -> Point {
    if config.mode == ListLayoutMode::Pagination {
        return Point::ZERO;
    }
    Point::new(
        config.align.offset(viewport.width, content.width),
        config.vertical_align.offset(viewport.height, content.height),
    )
}

/// Size an item takes once `auto_resize_item` stretches it across its line.
pub fn fitted_item_size(
    config: &ListLayoutConfig,
    viewport: Size,
    metrics: LineMetrics,
    measured: Size,
) -> Size {
    if !config.auto_resize_item {
        return measured;
    }
    let margin = config.margin;
    let share = |available: f32, count: usize, gap: f32| {
        ((available - gap * (count - 1) as f32) / count as f32).max(0.0)
    };
    let inner_width = viewport.width - margin.horizontal_sum();
    let inner_height = viewport.height - margin.vertical_sum();
    let mut size = measured;
    match config.mode {
        ListLayoutMode::SingleColumn => size.width = inner_width.max(0.0),
        ListLayoutMode::SingleRow => size.height = inner_height.max(0.0),
        ListLayoutMode::FlowHorizontal if config.column_count > 0 => {
            size.width = share(inner_width, metrics.items_per_line, config.column_gap);
        }
        ListLayoutMode::FlowVertical if config.line_count > 0 => {
            size.height = share(inner_height, metrics.items_per_line, config.line_gap);
        }
        ListLayoutMode::Pagination => {
            if let Some(grid) = metrics.page {
                if config.column_count > 0 {
                    size.width = share(inner_width, grid.columns, config.column_gap);
                }
                if config.line_count > 0 {
                    size.height = share(inner_height, grid.rows, config.line_gap);
                }
            }
        }
        _ => {}
    }
    size
}

#[cfg(test)]
#[path = "tests/calculator_tests.rs"]
mod tests;
