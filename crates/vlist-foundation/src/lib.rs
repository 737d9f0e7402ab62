//! Virtualized list container, item pool and selection for the vlist engine.
//!
//! A [`ListContainer`] lays out either a plain ordered array of item nodes or,
//! in virtual mode, a sliding window over a much larger data set whose item
//! nodes are recycled through a shared [`ItemPool`].

mod collaborators;
mod controller;
mod list;
mod pool;
mod selection;
mod stats;
mod window;

pub use collaborators::*;
pub use controller::*;
pub use list::{ArrowKey, ListContainer};
pub use pool::ItemPool;
pub use selection::*;
pub use stats::ListStats;
pub use window::{ItemInfo, RefreshState, VirtualWindow, LOOP_MULTIPLIER};

pub mod prelude {
    pub use crate::collaborators::{ItemCreator, ItemProvider, ItemRenderer, ScrollViewport};
    pub use crate::controller::{PageController, PagedState};
    pub use crate::list::{ArrowKey, ListContainer};
    pub use crate::pool::ItemPool;
    pub use crate::selection::{ClickModifiers, SelectionChange, SelectionMode};
    pub use vlist_core::prelude::*;
    pub use vlist_layout::prelude::*;
}
