//! Global-allocator-backed strategy

use core::alloc::Layout;
use core::ptr::NonNull;
use std::alloc::{GlobalAlloc, System};

use crate::error::{AllocResult, MemoryError};

use super::traits::{Allocator, AllocatorId, dangling_for};

/// Strategy that forwards every request to the global allocator.
///
/// This is the default strategy for [`LinkedList`]. Each instance still
/// carries its own [`AllocatorId`], so equality follows identity like every
/// other strategy in the crate, and cloning mints a fresh instance.
///
/// [`LinkedList`]: crate::list::LinkedList
#[derive(Debug)]
pub struct SystemAllocator {
    id: AllocatorId,
}

impl SystemAllocator {
    /// Creates a strategy instance with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: AllocatorId::fresh(),
        }
    }

    /// Identity token of this instance.
    #[must_use]
    pub fn id(&self) -> AllocatorId {
        self.id
    }
}

impl Default for SystemAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SystemAllocator {
    /// Clones are new instances with their own identity.
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl PartialEq for SystemAllocator {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SystemAllocator {}

// SAFETY:
// - Blocks come from the global allocator and stay valid until deallocated,
//   independent of this value's moves or lifetime.
// - Equal instances are the same instance, so interchangeability is trivial.
unsafe impl Allocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        if layout.size() == 0 {
            return Ok(NonNull::slice_from_raw_parts(dangling_for(layout), 0));
        }
        // SAFETY:
        // - `layout` has non-zero size.
        let raw = unsafe { System.alloc(layout) };
        let ptr = NonNull::new(raw)
            .ok_or_else(|| MemoryError::allocation_failed_with_layout(layout))?;
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }
        // SAFETY:
        // - The caller guarantees `ptr` came from `allocate` with `layout`,
        //   and non-zero-sized blocks come from `System.alloc`.
        unsafe { System.dealloc(ptr.as_ptr(), layout) };
    }
}
