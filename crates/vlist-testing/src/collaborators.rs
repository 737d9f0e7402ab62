use std::collections::HashMap;

use vlist_core::{ItemNode, ResourceId, Shared, Size};
use vlist_foundation::{ItemCreator, ItemRenderer};

/// Data indices in the order the renderer saw them.
pub type RenderLog = Shared<Vec<usize>>;

/// Counters shared between a [`CountingCreator`] and the test that owns it.
#[derive(Debug, Clone, Default)]
pub struct CreatorProbe {
    pub created: usize,
    pub failed: usize,
    /// Upcoming `create` calls that return `None`.
    pub fail_next: usize,
}

/// Creator that builds plain nodes with a per-resource size and counts calls.
pub struct CountingCreator {
    probe: Shared<CreatorProbe>,
    default_size: Size,
    sizes: HashMap<ResourceId, Size>,
}

impl CountingCreator {
    pub fn new(default_size: Size) -> (Self, Shared<CreatorProbe>) {
        let probe = Shared::new(CreatorProbe::default());
        let creator = Self {
            probe: probe.clone(),
            default_size,
            sizes: HashMap::new(),
        };
        (creator, probe)
    }

    /// Nodes created for `resource` start at `size`.
    pub fn with_size(mut self, resource: impl Into<ResourceId>, size: Size) -> Self {
        self.sizes.insert(resource.into(), size);
        self
    }
}

impl ItemCreator for CountingCreator {
    fn create(&mut self, resource: &ResourceId) -> Option<ItemNode> {
        let mut probe = self.probe.borrow_mut();
        if probe.fail_next > 0 {
            probe.fail_next -= 1;
            probe.failed += 1;
            log::debug!("creator failing {resource} on request");
            return None;
        }
        probe.created += 1;
        let size = self.sizes.get(resource).copied().unwrap_or(self.default_size);
        Some(ItemNode::new(resource.clone(), size))
    }
}

/// Renderer that logs every call and stores the data index as the node payload.
///
/// An optional size function lets tests model items whose measured size
/// depends on their data.
pub struct RecordingRenderer {
    log: RenderLog,
    sizes: Option<Box<dyn Fn(usize) -> Size>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, RenderLog) {
        let log = Shared::new(Vec::new());
        let renderer = Self {
            log: log.clone(),
            sizes: None,
        };
        (renderer, log)
    }

    pub fn with_sizes(mut self, sizes: impl Fn(usize) -> Size + 'static) -> Self {
        self.sizes = Some(Box::new(sizes));
        self
    }
}

impl ItemRenderer for RecordingRenderer {
    fn render(&mut self, index: usize, node: &mut ItemNode) {
        self.log.borrow_mut().push(index);
        node.set_payload(index);
        if let Some(sizes) = self.sizes.as_ref() {
            node.size = sizes(index);
        }
    }
}
