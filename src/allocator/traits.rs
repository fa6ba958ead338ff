//! Allocator contract and identity tokens

use core::alloc::Layout;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::AllocResult;

/// Source of unique allocator identities. Starts at 1 so 0 can never be a
/// valid token.
static NEXT_ALLOCATOR_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one allocator instance.
///
/// Tokens are minted from a process-wide counter, so no two instances ever
/// share one. Cloning an allocator mints a fresh token for the clone, which
/// makes allocator equality mean exactly "memory from one can be released
/// through the other": true for self-comparison, false for everything else.
///
/// # Examples
///
/// ```
/// use fastalloc::allocator::AllocatorId;
///
/// let a = AllocatorId::fresh();
/// let b = AllocatorId::fresh();
/// assert_eq!(a, a);
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocatorId(u64);

impl AllocatorId {
    /// Mints a token no other instance has.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_ALLOCATOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value, for logging.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Memory allocation strategy used by containers in this crate.
///
/// An allocator hands out raw blocks described by [`Layout`] and takes them
/// back through [`deallocate`](Self::deallocate). The typed helpers
/// ([`allocate_one`](Self::allocate_one), [`construct`](Self::construct),
/// [`destroy`](Self::destroy), [`deallocate_one`](Self::deallocate_one))
/// cover the allocate, placement-write, drop, free cycle containers go
/// through for each node.
///
/// `Clone` is a supertrait because containers hold their strategy by value
/// and spawn new strategy instances when they are copied. Two hooks control
/// how a strategy travels with copied data:
///
/// - [`select_for_clone`](Self::select_for_clone) picks the strategy a
///   cloned container starts with.
/// - [`PROPAGATE_ON_COPY_ASSIGN`](Self::PROPAGATE_ON_COPY_ASSIGN) decides
///   whether clone-assignment replaces the destination's strategy with a
///   clone of the source's.
///
/// # Safety
///
/// Implementations must uphold all of the following:
///
/// - Blocks returned by [`allocate`](Self::allocate) are valid for reads and
///   writes of `layout.size()` bytes at `layout.align()` alignment until
///   they are deallocated or the allocator is dropped, whichever comes
///   first.
/// - A block stays valid when the allocator value that produced it is moved
///   or borrowed.
/// - Instances that compare equal are interchangeable: a block from one must
///   be safe to release through the other.
pub unsafe trait Allocator: Clone {
    /// Whether clone-assignment carries the source's strategy to the
    /// destination.
    ///
    /// When `false`, a container being overwritten by a clone keeps its own
    /// strategy and allocates the copied elements through it. When `true`,
    /// the destination first switches to a clone of the source's strategy.
    const PROPAGATE_ON_COPY_ASSIGN: bool = false;

    /// Allocates a block of memory for `layout`.
    ///
    /// Zero-sized layouts must succeed with a dangling, well-aligned block.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying memory source is exhausted or the
    /// layout cannot be served.
    fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>>;

    /// Releases a block previously returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// - `ptr` must have been returned by `allocate` on this allocator (or a
    ///   clone that compares equal to it).
    /// - `layout` must be the layout the block was allocated with.
    /// - The block must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Allocates uninitialized space for one `T`.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`allocate`](Self::allocate).
    fn allocate_one<T>(&self) -> AllocResult<NonNull<T>> {
        self.allocate(Layout::new::<T>()).map(NonNull::cast)
    }

    /// Releases space obtained from [`allocate_one`](Self::allocate_one).
    ///
    /// # Safety
    ///
    /// Same contract as [`deallocate`](Self::deallocate), with `T`'s layout.
    /// Any value in the slot must already be destroyed or moved out.
    unsafe fn deallocate_one<T>(&self, ptr: NonNull<T>) {
        // SAFETY:
        // - The caller guarantees `ptr` came from `allocate_one::<T>` on
        //   this allocator, which used `Layout::new::<T>()`.
        unsafe { self.deallocate(ptr.cast(), Layout::new::<T>()) };
    }

    /// Moves `value` into the uninitialized slot at `slot`.
    ///
    /// # Safety
    ///
    /// - `slot` must be valid for writes of `T` and properly aligned.
    /// - The slot must not contain a live `T`, or it will leak.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) {
        // SAFETY:
        // - The caller guarantees the slot is writable and aligned.
        unsafe { slot.as_ptr().write(value) };
    }

    /// Drops the value at `slot` in place without freeing its memory.
    ///
    /// # Safety
    ///
    /// - `slot` must point at a live, properly aligned `T`.
    /// - The value must not be used again after this call.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY:
        // - The caller guarantees the slot holds a live `T`.
        unsafe { slot.as_ptr().drop_in_place() };
    }

    /// Strategy a cloned container should start with.
    ///
    /// The default hands out an ordinary clone. Strategies whose clones are
    /// independent instances (such as [`PoolAllocator`]) rely on this to
    /// give every cloned container its own memory.
    ///
    /// [`PoolAllocator`]: super::PoolAllocator
    #[must_use]
    fn select_for_clone(&self) -> Self {
        self.clone()
    }
}

/// Well-aligned dangling pointer for zero-sized blocks.
pub(crate) fn dangling_for(layout: Layout) -> NonNull<u8> {
    // SAFETY:
    // - `Layout` alignments are non-zero, so the address is non-null.
    unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
}

// SAFETY:
// - Every call forwards to `A`, so `&A` serves and releases exactly the
//   blocks `A` does.
// - Copies of the reference are interchangeable because they all denote the
//   same underlying allocator.
unsafe impl<A: Allocator> Allocator for &A {
    const PROPAGATE_ON_COPY_ASSIGN: bool = A::PROPAGATE_ON_COPY_ASSIGN;

    fn allocate(&self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY:
        // - The caller's contract carries over unchanged to the referent.
        unsafe { (**self).deallocate(ptr, layout) };
    }
}
