use vlist_core::{Point, Size};
use vlist_foundation::ScrollViewport;

/// In-memory scroll pane. It never clamps, so tests can park the scroll
/// position anywhere.
#[derive(Debug, Clone, Default)]
pub struct FakeViewport {
    scroll: Point,
    view: Size,
    content: Size,
    content_updates: usize,
}

impl FakeViewport {
    pub fn new(view: Size) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    /// Moves the scroll position as a user drag would; the list is not told.
    pub fn scroll_to(&mut self, position: Point) {
        self.scroll = position;
    }

    pub fn resize(&mut self, view: Size) {
        self.view = view;
    }

    /// Last content size the list published.
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// How often the list published a content size.
    pub fn content_updates(&self) -> usize {
        self.content_updates
    }
}

impl ScrollViewport for FakeViewport {
    fn scroll_position(&self) -> Point {
        self.scroll
    }

    fn view_size(&self) -> Size {
        self.view
    }

    fn set_content_size(&mut self, size: Size) {
        self.content = size;
        self.content_updates += 1;
    }

    fn set_scroll_position(&mut self, position: Point) {
        self.scroll = position;
    }
}
