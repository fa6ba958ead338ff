//! Chunked memory pool
//!
//! [`ChunkPool`] hands out small allocations by bumping a cursor through
//! fixed-capacity chunks. Chunks are requested from the global allocator on
//! demand and kept in a singly linked list, newest first. Individual
//! allocations are never returned to a chunk; [`ChunkPool::release`] only
//! updates bookkeeping, and all memory is freed at once when the pool is
//! dropped.
//!
//! # Invariants
//!
//! - `cursor <= end` at all times; both are null until the first chunk is
//!   allocated.
//! - The head of the chunk list is the only chunk the cursor points into.
//! - Every pointer returned by [`ChunkPool::acquire`] stays valid until the
//!   pool itself is dropped.
//!
//! # Examples
//!
//! ```
//! use core::alloc::Layout;
//! use fastalloc::pool::ChunkPool;
//!
//! let pool = ChunkPool::new();
//! let layout = Layout::new::<u64>();
//! let ptr = pool.acquire(layout)?;
//! pool.release(ptr, layout);
//! assert_eq!(pool.stats().acquires, 1);
//! # Ok::<(), fastalloc::MemoryError>(())
//! ```

mod chunk;
mod config;
mod stats;

pub use config::{DEFAULT_CHUNK_CAPACITY, DEFAULT_SMALL_THRESHOLD, PoolConfig};
pub use stats::PoolStats;

use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::ptr::NonNull;

#[cfg(feature = "logging")]
use tracing::debug;

use crate::allocator::AllocatorId;
use crate::error::{MemoryError, MemoryResult};
use crate::utils::align_up;

use chunk::{CHUNK_ALIGN, Chunk};

/// Bump allocator over a list of fixed-capacity chunks.
///
/// The pool is single-threaded: interior mutability goes through [`Cell`] and
/// [`RefCell`], so a pool can be moved across threads but never shared.
///
/// Two pools never compare equal. Each pool carries a fresh [`AllocatorId`],
/// and cloning produces an independent empty pool with a new id, so pointer
/// ownership can always be attributed to exactly one pool.
pub struct ChunkPool {
    /// Head of the chunk list; the newest chunk, which the cursor points into.
    chunks: RefCell<Option<Box<Chunk>>>,
    /// Next free byte in the head chunk. Null until the first chunk exists.
    cursor: Cell<*mut u8>,
    /// One past the last usable byte of the head chunk.
    end: Cell<*mut u8>,
    /// Usable bytes per chunk.
    chunk_capacity: usize,
    id: AllocatorId,
    acquires: Cell<u64>,
    releases: Cell<u64>,
    chunk_count: Cell<usize>,
    bytes_allocated: Cell<usize>,
}

impl ChunkPool {
    /// Creates a pool with [`DEFAULT_CHUNK_CAPACITY`] bytes per chunk.
    ///
    /// No memory is allocated until the first [`acquire`](Self::acquire).
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunks: RefCell::new(None),
            cursor: Cell::new(core::ptr::null_mut()),
            end: Cell::new(core::ptr::null_mut()),
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            id: AllocatorId::fresh(),
            acquires: Cell::new(0),
            releases: Cell::new(0),
            chunk_count: Cell::new(0),
            bytes_allocated: Cell::new(0),
        }
    }

    /// Creates a pool with a custom chunk capacity in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::InvalidConfig`] if `chunk_capacity` is zero.
    pub fn with_capacity(chunk_capacity: usize) -> MemoryResult<Self> {
        if chunk_capacity == 0 {
            return Err(MemoryError::invalid_config(
                "chunk capacity must be non-zero",
            ));
        }
        let mut pool = Self::new();
        pool.chunk_capacity = chunk_capacity;
        Ok(pool)
    }

    /// Hands out `layout.size()` bytes aligned to `layout.align()`.
    ///
    /// Zero-sized layouts succeed without touching any chunk and return a
    /// dangling, well-aligned pointer.
    ///
    /// # Errors
    ///
    /// - [`MemoryError::ChunkCapacityExceeded`] if the layout can never fit
    ///   in a chunk of this pool's capacity.
    /// - [`MemoryError::AllocationFailed`] if growing the pool fails.
    pub fn acquire(&self, layout: Layout) -> MemoryResult<NonNull<u8>> {
        if layout.size() == 0 {
            self.acquires.set(self.acquires.get() + 1);
            // SAFETY:
            // - `layout.align()` is non-zero, so the pointer is non-null.
            // - Zero-sized reads and writes are valid at any aligned address.
            return Ok(unsafe { NonNull::new_unchecked(layout.align() as *mut u8) });
        }

        if let Some(ptr) = self.try_bump(layout) {
            self.acquires.set(self.acquires.get() + 1);
            self.bytes_allocated
                .set(self.bytes_allocated.get() + layout.size());
            return Ok(ptr);
        }

        // A fresh chunk starts CHUNK_ALIGN-aligned, so alignment above that
        // can eat up to `align - CHUNK_ALIGN` bytes of padding.
        let padding = layout.align().saturating_sub(CHUNK_ALIGN);
        if layout.size() + padding > self.chunk_capacity {
            return Err(MemoryError::chunk_capacity_exceeded(
                layout.size(),
                self.chunk_capacity,
            ));
        }

        self.grow()?;

        // The fit check above guarantees the bump succeeds in the new chunk.
        if let Some(ptr) = self.try_bump(layout) {
            self.acquires.set(self.acquires.get() + 1);
            self.bytes_allocated
                .set(self.bytes_allocated.get() + layout.size());
            Ok(ptr)
        } else {
            Err(MemoryError::allocation_failed_with_layout(layout))
        }
    }

    /// Records that `ptr` is no longer in use.
    ///
    /// Pool memory is only reclaimed when the pool is dropped, so this
    /// updates statistics and nothing else. `ptr` must have come from
    /// [`acquire`](Self::acquire) on this pool with the same `layout`.
    pub fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        debug_assert!(
            layout.size() == 0 || self.contains(ptr),
            "pointer released to a pool that did not allocate it"
        );
        self.releases.set(self.releases.get() + 1);
    }

    /// Returns `true` if `ptr` points into one of this pool's chunks.
    #[must_use]
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        let chunks = self.chunks.borrow();
        let mut current = chunks.as_deref();
        while let Some(chunk) = current {
            if chunk.contains(ptr.as_ptr()) {
                return true;
            }
            current = chunk.next.as_deref();
        }
        false
    }

    /// Snapshot of allocation counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            acquires: self.acquires.get(),
            releases: self.releases.get(),
            chunks_allocated: self.chunk_count.get(),
            bytes_allocated: self.bytes_allocated.get(),
            chunk_capacity: self.chunk_capacity,
        }
    }

    /// Number of chunks currently backing the pool.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count.get()
    }

    /// Usable bytes per chunk.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Identity token distinguishing this pool from every other pool.
    #[must_use]
    pub fn id(&self) -> AllocatorId {
        self.id
    }

    /// Bumps the cursor if the current chunk has room for `layout`.
    fn try_bump(&self, layout: Layout) -> Option<NonNull<u8>> {
        let cursor = self.cursor.get();
        if cursor.is_null() {
            return None;
        }
        let aligned = align_up(cursor as usize, layout.align());
        let next = aligned.checked_add(layout.size())?;
        if next > self.end.get() as usize {
            return None;
        }
        self.cursor.set(next as *mut u8);
        // SAFETY:
        // - `aligned >= cursor as usize` and `next <= end`, so the address
        //   lies inside the head chunk's live allocation.
        // - The chunk allocation is non-null, so `aligned` is non-zero.
        Some(unsafe { NonNull::new_unchecked(aligned as *mut u8) })
    }

    /// Allocates a new chunk and makes it the head of the list.
    fn grow(&self) -> MemoryResult<()> {
        let mut chunk = Chunk::new(self.chunk_capacity)?;
        let start = chunk.as_mut_ptr();
        // SAFETY:
        // - `start + capacity` is one past the end of the chunk's allocation,
        //   which is within the same allocated object.
        let end = unsafe { start.add(self.chunk_capacity) };

        chunk.next = self.chunks.borrow_mut().take();
        *self.chunks.borrow_mut() = Some(chunk);
        self.cursor.set(start);
        self.end.set(end);
        self.chunk_count.set(self.chunk_count.get() + 1);

        #[cfg(feature = "logging")]
        debug!(
            capacity = self.chunk_capacity,
            chunks = self.chunk_count.get(),
            "chunk pool grew"
        );

        Ok(())
    }
}

impl Default for ChunkPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChunkPool {
    fn drop(&mut self) {
        // Unlink chunks one at a time so a long list cannot overflow the
        // stack with nested drops.
        let mut current = self.chunks.borrow_mut().take();
        while let Some(mut chunk) = current {
            current = chunk.next.take();
        }
    }
}

impl Clone for ChunkPool {
    /// Clones produce an independent empty pool with the same chunk capacity
    /// and a fresh identity, never a second handle to the same memory.
    fn clone(&self) -> Self {
        let mut pool = Self::new();
        pool.chunk_capacity = self.chunk_capacity;
        pool
    }
}

impl PartialEq for ChunkPool {
    /// Pools are equal only to themselves; see [`AllocatorId`].
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChunkPool {}

impl fmt::Debug for ChunkPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkPool")
            .field("id", &self.id)
            .field("chunk_capacity", &self.chunk_capacity)
            .field("chunks", &self.chunk_count.get())
            .field("acquires", &self.acquires.get())
            .field("releases", &self.releases.get())
            .finish()
    }
}

// SAFETY:
// - All interior mutability is through `Cell`/`RefCell`, which is sound to
//   move between threads as long as the pool is not shared.
// - `ChunkPool` is not `Sync`, so `&ChunkPool` never crosses threads.
unsafe impl Send for ChunkPool {}
