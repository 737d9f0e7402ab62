//! Node arena, geometry and shared handles for the vlist engine.
//!
//! Everything above this crate addresses display nodes through [`NodeId`]
//! handles into a [`NodeArena`]; nothing owns a node by pointer.

mod geometry;
pub mod hash;
mod shared;
mod tree;

pub use geometry::*;
pub use shared::{Shared, WeakShared};
pub use tree::*;

pub mod prelude {
    pub use crate::geometry::{Margin, Point, Rect, Size};
    pub use crate::shared::Shared;
    pub use crate::tree::{ItemNode, NodeArena, NodeError, NodeId, ResourceId};
}
