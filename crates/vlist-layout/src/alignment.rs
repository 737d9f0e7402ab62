//! Alignment of list content that is smaller than its viewport.

/// Alignment along the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    /// Content hugs the left edge.
    #[default]
    Left,
    /// Content is centered.
    Center,
    /// Content hugs the right edge.
    Right,
}

impl HorizontalAlign {
    /// Offset of content of extent `content` inside `available`; zero when it does not fit.
    pub fn offset(&self, available: f32, content: f32) -> f32 {
        // also catches NaN
        if !(content < available) {
            return 0.0;
        }
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => ((available - content) / 2.0).floor(),
            HorizontalAlign::Right => available - content,
        }
    }
}

/// Alignment along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn offset(&self, available: f32, content: f32) -> f32 {
        // also catches NaN
        if !(content < available) {
            return 0.0;
        }
        match self {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => ((available - content) / 2.0).floor(),
            VerticalAlign::Bottom => available - content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_content_is_never_offset() {
        assert_eq!(HorizontalAlign::Right.offset(100.0, 150.0), 0.0);
        assert_eq!(VerticalAlign::Middle.offset(100.0, 100.0), 0.0);
    }

    #[test]
    fn center_rounds_down_to_whole_pixels() {
        assert_eq!(HorizontalAlign::Center.offset(101.0, 50.0), 25.0);
        assert_eq!(VerticalAlign::Bottom.offset(80.0, 50.0), 30.0);
    }
}
