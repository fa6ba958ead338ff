//! Pool statistics snapshot

/// Counters captured by [`ChunkPool::stats`].
///
/// [`ChunkPool::stats`]: super::ChunkPool::stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Total successful acquisitions, including zero-sized ones.
    pub acquires: u64,
    /// Total releases. Releases never return memory; the count exists so
    /// callers can check that every acquire was paired.
    pub releases: u64,
    /// Chunks currently backing the pool.
    pub chunks_allocated: usize,
    /// Bytes handed out, not counting alignment padding.
    pub bytes_allocated: usize,
    /// Usable bytes per chunk.
    pub chunk_capacity: usize,
}

impl PoolStats {
    /// Acquires that have not been paired with a release yet.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.acquires.saturating_sub(self.releases)
    }
}
