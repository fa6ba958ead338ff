//! Fixed-capacity chunk backing the pool

use core::alloc::Layout;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

use crate::error::{MemoryError, MemoryResult};

/// Alignment of every chunk allocation. A fresh chunk needs no padding for
/// requests aligned up to this.
pub(super) const CHUNK_ALIGN: usize = 16;

/// One slab of pool memory, linked to the next older chunk.
pub(super) struct Chunk {
    ptr: NonNull<u8>,
    capacity: usize,
    pub(super) next: Option<Box<Chunk>>,
}

impl Chunk {
    /// Allocates a chunk of `capacity` bytes from the global allocator.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::AllocationFailed`] if the global allocator
    /// returns null.
    pub(super) fn new(capacity: usize) -> MemoryResult<Box<Chunk>> {
        debug_assert!(capacity > 0);
        let layout = Layout::from_size_align(capacity, CHUNK_ALIGN)
            .map_err(|_| MemoryError::invalid_layout("chunk capacity overflows isize"))?;
        // SAFETY:
        // - `layout` has non-zero size.
        let raw = unsafe { alloc(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| MemoryError::allocation_failed(capacity, CHUNK_ALIGN))?;
        Ok(Box::new(Chunk {
            ptr,
            capacity,
            next: None,
        }))
    }

    /// Start of the chunk's usable memory.
    pub(super) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Returns `true` if `ptr` points into this chunk's allocation.
    pub(super) fn contains(&self, ptr: *const u8) -> bool {
        let start = self.ptr.as_ptr() as usize;
        let addr = ptr as usize;
        addr >= start && addr < start + self.capacity
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        // SAFETY:
        // - `ptr` was returned by `alloc` in `new` with exactly this size
        //   and alignment, and is deallocated only here.
        unsafe {
            dealloc(
                self.ptr.as_ptr(),
                Layout::from_size_align_unchecked(self.capacity, CHUNK_ALIGN),
            );
        }
    }
}
