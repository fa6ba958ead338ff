//! Threshold-routed pool strategy

use core::alloc::Layout;
use core::ptr::NonNull;
use std::alloc::{GlobalAlloc, System};

use crate::error::{AllocResult, MemoryError, MemoryResult};
use crate::pool::{ChunkPool, DEFAULT_SMALL_THRESHOLD, PoolConfig, PoolStats};

use super::traits::{Allocator, AllocatorId};

/// Strategy that serves small requests from a [`ChunkPool`] and large ones
/// from the global allocator.
///
/// A request routes to the pool when `layout.size()` is at most the
/// configured threshold. Deallocation repeats the same size test, so a block
/// always returns to the source that produced it.
///
/// Cloning creates an allocator with a fresh, empty pool. Containers use
/// that through [`Allocator::select_for_clone`], so a cloned container never
/// shares chunks with the original. To share one pool across containers,
/// borrow the allocator instead: `&PoolAllocator` is itself a strategy.
///
/// # Examples
///
/// ```
/// use core::alloc::Layout;
/// use fastalloc::allocator::{Allocator, PoolAllocator};
///
/// let alloc = PoolAllocator::new();
/// assert!(alloc.routes_to_pool(Layout::new::<u64>()));
/// assert!(!alloc.routes_to_pool(Layout::new::<[u8; 128]>()));
/// ```
#[derive(Debug)]
pub struct PoolAllocator {
    pool: ChunkPool,
    small_threshold: usize,
}

impl PoolAllocator {
    /// Creates an allocator with default chunk capacity and threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: ChunkPool::new(),
            small_threshold: DEFAULT_SMALL_THRESHOLD,
        }
    }

    /// Creates an allocator from a validated [`PoolConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidConfig`] if the configuration is
    /// inconsistent.
    ///
    /// [`MemoryError::InvalidConfig`]: crate::MemoryError::InvalidConfig
    pub fn with_config(config: PoolConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self {
            pool: ChunkPool::with_capacity(config.chunk_capacity)?,
            small_threshold: config.small_threshold,
        })
    }

    /// Size threshold, in bytes, at or below which requests go to the pool.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.small_threshold
    }

    /// The backing pool, mainly for [`ChunkPool::stats`].
    #[must_use]
    pub fn pool(&self) -> &ChunkPool {
        &self.pool
    }

    /// Snapshot of the backing pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Identity token of this instance.
    #[must_use]
    pub fn id(&self) -> AllocatorId {
        self.pool.id()
    }

    /// Returns `true` if a request for `layout` would be served by the pool.
    #[must_use]
    pub fn routes_to_pool(&self, layout: Layout) -> bool {
        layout.size() <= self.small_threshold
    }
}

impl Default for PoolAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PoolAllocator {
    /// Clones keep the configuration but start with a fresh, empty pool.
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            small_threshold: self.small_threshold,
        }
    }
}

impl PartialEq for PoolAllocator {
    /// Follows the backing pool's identity: equal only to itself.
    fn eq(&self, other: &Self) -> bool {
        self.pool == other.pool
    }
}

impl Eq for PoolAllocator {}

// SAFETY:
// - Pool blocks live until the pool is dropped; heap blocks live until
//   deallocated. Both outlive any use between allocate and deallocate.
// - `deallocate` repeats the routing test on the same layout, so blocks go
//   back to the source that produced them.
// - Equal instances are the same instance.
unsafe impl Allocator for PoolAllocator {
    fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        if self.routes_to_pool(layout) {
            self.pool
                .acquire(layout)
                .map(|ptr| NonNull::slice_from_raw_parts(ptr, layout.size()))
        } else {
            // SAFETY:
            // - Sizes above the threshold are non-zero.
            let raw = unsafe { System.alloc(layout) };
            let ptr = NonNull::new(raw)
                .ok_or_else(|| MemoryError::allocation_failed_with_layout(layout))?;
            Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if self.routes_to_pool(layout) {
            self.pool.release(ptr, layout);
        } else {
            // SAFETY:
            // - The routing test matches the one in `allocate`, so this
            //   block came from `System.alloc` with the same layout.
            unsafe { System.dealloc(ptr.as_ptr(), layout) };
        }
    }
}
