//! Layout calculator for virtualized list containers.
//!
//! Everything here is a pure function of a [`ListLayoutConfig`], a viewport
//! size and item sizes; nothing touches the node arena.

mod alignment;
mod axis;
mod calculator;
mod config;
mod cursor;
mod render_order;

pub use alignment::*;
pub use axis::*;
pub use calculator::*;
pub use config::*;
pub use cursor::*;
pub use render_order::*;

pub mod prelude {
    pub use crate::alignment::{HorizontalAlign, VerticalAlign};
    pub use crate::axis::Axis;
    pub use crate::config::{ListLayoutConfig, ListLayoutMode, RenderOrder};
    pub use crate::cursor::LineCursor;
}
