//! Layout configuration of a list container.

use vlist_core::{Margin, Size};

use crate::alignment::{HorizontalAlign, VerticalAlign};
use crate::axis::Axis;

/// Item size assumed before anything has been measured.
pub const DEFAULT_ITEM_SIZE: Size = Size::new(100.0, 30.0);

/// Arrangement of items inside a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListLayoutMode {
    /// One item per row, scrolling vertically.
    #[default]
    SingleColumn,
    /// One item per column, scrolling horizontally.
    SingleRow,
    /// Items fill rows left to right, rows stack downwards.
    FlowHorizontal,
    /// Items fill columns top to bottom, columns stack rightwards.
    FlowVertical,
    /// Viewport-sized pages of rows, paged horizontally.
    Pagination,
}

impl ListLayoutMode {
    /// Axis along which lines stack and the list scrolls.
    pub fn scroll_axis(self) -> Axis {
        match self {
            ListLayoutMode::SingleColumn | ListLayoutMode::FlowHorizontal => Axis::Vertical,
            ListLayoutMode::SingleRow
            | ListLayoutMode::FlowVertical
            | ListLayoutMode::Pagination => Axis::Horizontal,
        }
    }
}

/// Draw order of the visible children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderOrder {
    #[default]
    Ascending,
    Descending,
    /// Ascending up to the apex item, descending after it; the apex is drawn last.
    Arch,
}

/// Everything a layout pass reads. Mutated only between passes.
#[derive(Clone, Debug, PartialEq)]
pub struct ListLayoutConfig {
    pub mode: ListLayoutMode,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Gap between rows.
    pub line_gap: f32,
    /// Gap between columns.
    pub column_gap: f32,
    /// Fixed number of rows (vertical flow, pagination); 0 means fit to viewport.
    pub line_count: usize,
    /// Fixed number of columns (horizontal flow, pagination); 0 means fit to viewport.
    pub column_count: usize,
    /// Stretch items across the line instead of keeping their measured size.
    pub auto_resize_item: bool,
    pub margin: Margin,
    pub render_order: RenderOrder,
    /// Index of the topmost item for [`RenderOrder::Arch`].
    pub apex_index: usize,
    pub default_item_size: Size,
}

impl Default for ListLayoutConfig {
    fn default() -> Self {
        Self {
            mode: ListLayoutMode::SingleColumn,
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_gap: 0.0,
            column_gap: 0.0,
            line_count: 0,
            column_count: 0,
            auto_resize_item: false,
            margin: Margin::default(),
            render_order: RenderOrder::Ascending,
            apex_index: 0,
            default_item_size: DEFAULT_ITEM_SIZE,
        }
    }
}

impl ListLayoutConfig {
    pub fn new(mode: ListLayoutMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Copy with every numeric field clamped to something a pass can use.
    ///
    /// Negative or NaN gaps and margins become zero; an unusable default item
    /// size falls back to [`DEFAULT_ITEM_SIZE`].
    pub fn sanitized(&self) -> Self {
        let gap = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let default_item_size = if self.default_item_size.is_valid()
            && self.default_item_size.width > 0.0
            && self.default_item_size.height > 0.0
        {
            self.default_item_size
        } else {
            DEFAULT_ITEM_SIZE
        };
        Self {
            line_gap: gap(self.line_gap),
            column_gap: gap(self.column_gap),
            margin: self.margin.clamped(),
            default_item_size,
            ..self.clone()
        }
    }

    pub fn scroll_axis(&self) -> Axis {
        self.mode.scroll_axis()
    }

    /// Gap between consecutive lines.
    pub fn line_spacing(&self) -> f32 {
        match self.scroll_axis() {
            Axis::Vertical => self.line_gap,
            Axis::Horizontal => self.column_gap,
        }
    }

    /// Gap between consecutive items of one line.
    pub fn item_spacing(&self) -> f32 {
        match self.scroll_axis() {
            Axis::Vertical => self.column_gap,
            Axis::Horizontal => self.line_gap,
        }
    }
}
