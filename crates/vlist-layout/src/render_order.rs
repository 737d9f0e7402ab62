use crate::config::RenderOrder;

/// Draw sequence for `count` children: positions in the order they are drawn.
///
/// With [`RenderOrder::Arch`] children before the apex ascend, children after
/// it descend, and the apex comes last so it ends up on top.
pub fn render_sequence(count: usize, order: RenderOrder, apex_index: usize) -> Vec<usize> {
    match order {
        RenderOrder::Ascending => (0..count).collect(),
        RenderOrder::Descending => (0..count).rev().collect(),
        RenderOrder::Arch => {
            if count == 0 {
                return Vec::new();
            }
            let apex = apex_index.min(count - 1);
            let mut sequence: Vec<usize> = (0..apex).collect();
            sequence.extend((apex + 1..count).rev());
            sequence.push(apex);
            sequence
        }
    }
}
