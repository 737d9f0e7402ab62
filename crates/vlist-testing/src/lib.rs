//! Test doubles for the vlist engine.
//!
//! [`ListHarness`] wires a [`ListContainer`](vlist_foundation::ListContainer)
//! to an in-memory arena, a pool, a [`FakeViewport`] and recording
//! collaborators so tests can drive scrolling without any UI.

mod collaborators;
mod harness;
mod viewport;

pub use collaborators::{CountingCreator, CreatorProbe, RecordingRenderer, RenderLog};
pub use harness::ListHarness;
pub use viewport::FakeViewport;
