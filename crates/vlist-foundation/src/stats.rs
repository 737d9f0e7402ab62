/// Counters describing pool traffic and rendering for one list.
///
/// `items_in_use` and `items_in_pool` are snapshots taken when the stats are
/// read; the rest accumulate over the list's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    /// Item nodes currently attached to the list.
    pub items_in_use: usize,
    /// Nodes parked in the shared pool (all lists, all resources).
    pub items_in_pool: usize,
    /// Nodes this list had to build through its creator.
    pub total_created: usize,
    /// Acquisitions served from the pool.
    pub reuse_count: usize,
    /// Nodes this list returned to the pool.
    pub released_count: usize,
    /// Creator calls that produced nothing.
    pub creation_failures: usize,
    pub render_count: usize,
}

impl ListStats {
    /// Share of acquisitions served by the pool, in `0.0..=1.0`.
    pub fn reuse_ratio(&self) -> f32 {
        let acquired = self.total_created + self.reuse_count;
        if acquired == 0 {
            0.0
        } else {
            self.reuse_count as f32 / acquired as f32
        }
    }
}
