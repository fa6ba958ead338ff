//! Allocation-strategy-aware doubly linked list
//!
//! [`LinkedList`] keeps its elements in a circular ring of heap nodes
//! anchored by a sentinel node. The sentinel is allocated when the list is
//! created, never holds a value, and doubles as the "one past the end"
//! position, so push, pop, insert and erase all run without branching on
//! emptiness.
//!
//! Every node goes through the list's [`Allocator`] strategy. With the
//! default [`SystemAllocator`] that means the global allocator; with
//! [`PoolAllocator`](crate::allocator::PoolAllocator) small nodes land in a
//! chunk pool that frees them all at once when the strategy is dropped.
//!
//! # Invariants
//!
//! - `sentinel.next` walks the elements front to back and returns to the
//!   sentinel; `prev` links mirror `next` links exactly.
//! - `len` equals the number of element nodes in the ring.
//! - Element nodes hold an initialized value; the sentinel never does.
//!
//! # Examples
//!
//! ```
//! use fastalloc::list::LinkedList;
//!
//! let mut list = LinkedList::new()?;
//! list.push_back(1)?;
//! list.push_back(2)?;
//! list.push_front(0)?;
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
//! assert_eq!(list.pop_front(), Some(0));
//! # Ok::<(), fastalloc::MemoryError>(())
//! ```

mod cursor;
mod iter;

pub use cursor::{Cursor, CursorMut, ReverseCursor};
pub use iter::{IntoIter, Iter, IterMut};

use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

use crate::allocator::{Allocator, SystemAllocator};
use crate::error::MemoryResult;

/// One link in the ring. The sentinel is a `Node` whose `value` is never
/// initialized.
struct Node<T> {
    next: NonNull<Node<T>>,
    prev: NonNull<Node<T>>,
    value: MaybeUninit<T>,
}

/// Doubly linked list with a pluggable allocation strategy.
///
/// All operations that create nodes are fallible and surface the strategy's
/// error, which is why the container implements [`try_clone`] instead of
/// [`Clone`]. Everything else about the interface follows
/// `std::collections::LinkedList`.
///
/// Copying interacts with the strategy through two hooks:
///
/// - [`try_clone`] asks [`Allocator::select_for_clone`] which strategy the
///   copy should use.
/// - [`try_clone_from`] consults [`Allocator::PROPAGATE_ON_COPY_ASSIGN`] to
///   decide whether the destination keeps its own strategy or takes over a
///   clone of the source's.
///
/// [`try_clone`]: Self::try_clone
/// [`try_clone_from`]: Self::try_clone_from
pub struct LinkedList<T, A: Allocator = SystemAllocator> {
    sentinel: NonNull<Node<T>>,
    len: usize,
    alloc: A,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedList<T, SystemAllocator> {
    /// Creates an empty list backed by the global allocator.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel node cannot be allocated.
    pub fn new() -> MemoryResult<Self> {
        Self::new_in(SystemAllocator::new())
    }

    /// Creates a list of `count` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails.
    pub fn filled(count: usize, value: T) -> MemoryResult<Self>
    where
        T: Clone,
    {
        Self::filled_in(count, value, SystemAllocator::new())
    }

    /// Creates a list of `count` default-constructed elements.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails.
    pub fn with_default(count: usize) -> MemoryResult<Self>
    where
        T: Default,
    {
        Self::with_default_in(count, SystemAllocator::new())
    }
}

impl<T, A: Allocator> LinkedList<T, A> {
    /// Creates an empty list using `alloc` for every node.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel node cannot be allocated.
    pub fn new_in(alloc: A) -> MemoryResult<Self> {
        let sentinel = alloc.allocate_one::<Node<T>>()?;
        // SAFETY:
        // - `sentinel` is a fresh uninitialized slot for a `Node<T>`.
        // - The sentinel links to itself and its value stays uninitialized.
        unsafe {
            alloc.construct(
                sentinel,
                Node {
                    next: sentinel,
                    prev: sentinel,
                    value: MaybeUninit::uninit(),
                },
            );
        }
        Ok(Self {
            sentinel,
            len: 0,
            alloc,
            marker: PhantomData,
        })
    }

    /// Creates a list of `count` clones of `value` using `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails.
    pub fn filled_in(count: usize, value: T, alloc: A) -> MemoryResult<Self>
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc)?;
        for _ in 0..count {
            list.push_back(value.clone())?;
        }
        Ok(list)
    }

    /// Creates a list of `count` default-constructed elements using `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails.
    pub fn with_default_in(count: usize, alloc: A) -> MemoryResult<Self>
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc)?;
        for _ in 0..count {
            list.push_back(T::default())?;
        }
        Ok(list)
    }

    /// Number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The strategy this list allocates nodes with.
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns an error if the node allocation fails; the list is unchanged.
    pub fn push_back(&mut self, value: T) -> MemoryResult<()> {
        self.link_before(self.sentinel, value).map(|_| ())
    }

    /// Prepends `value` at the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the node allocation fails; the list is unchanged.
    pub fn push_front(&mut self, value: T) -> MemoryResult<()> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        let first = unsafe { (*self.sentinel.as_ptr()).next };
        self.link_before(first, value).map(|_| ())
    }

    /// Removes and returns the last element, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - The list is non-empty, so `sentinel.prev` is an element node.
        unsafe {
            let last = (*self.sentinel.as_ptr()).prev;
            Some(self.unlink(last))
        }
    }

    /// Removes and returns the first element, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - The list is non-empty, so `sentinel.next` is an element node.
        unsafe {
            let first = (*self.sentinel.as_ptr()).next;
            Some(self.unlink(first))
        }
    }

    /// First element, or `None` if the list is empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - Non-empty list, so `sentinel.next` holds an initialized value.
        unsafe { Some((*(*self.sentinel.as_ptr()).next.as_ptr()).value.assume_init_ref()) }
    }

    /// Mutable borrow of the first element.
    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - Non-empty list, so `sentinel.next` holds an initialized value.
        // - `&mut self` guarantees exclusive access.
        unsafe { Some((*(*self.sentinel.as_ptr()).next.as_ptr()).value.assume_init_mut()) }
    }

    /// Last element, or `None` if the list is empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - Non-empty list, so `sentinel.prev` holds an initialized value.
        unsafe { Some((*(*self.sentinel.as_ptr()).prev.as_ptr()).value.assume_init_ref()) }
    }

    /// Mutable borrow of the last element.
    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - Non-empty list, so `sentinel.prev` holds an initialized value.
        // - `&mut self` guarantees exclusive access.
        unsafe { Some((*(*self.sentinel.as_ptr()).prev.as_ptr()).value.assume_init_mut()) }
    }

    /// Drops every element, leaving the list empty.
    ///
    /// The sentinel and the strategy stay in place, so the list is immediately
    /// usable again.
    pub fn clear(&mut self) {
        // SAFETY:
        // - The walk visits each element node exactly once and reads `next`
        //   before the node is freed.
        // - Element values are initialized, so `destroy` is valid.
        unsafe {
            let mut cur = (*self.sentinel.as_ptr()).next;
            while cur != self.sentinel {
                let next = (*cur.as_ptr()).next;
                self.alloc
                    .destroy(NonNull::new_unchecked((*cur.as_ptr()).value.as_mut_ptr()));
                self.alloc.deallocate_one(cur);
                cur = next;
            }
            (*self.sentinel.as_ptr()).next = self.sentinel;
            (*self.sentinel.as_ptr()).prev = self.sentinel;
        }
        self.len = 0;
    }

    /// Copies this list into a new one.
    ///
    /// The copy's strategy comes from [`Allocator::select_for_clone`], so a
    /// pool-backed list yields a copy with its own fresh pool.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails; the partially built
    /// copy is dropped.
    pub fn try_clone(&self) -> MemoryResult<Self>
    where
        T: Clone,
    {
        let mut clone = Self::new_in(self.alloc.select_for_clone())?;
        for item in self.iter() {
            clone.push_back(item.clone())?;
        }
        Ok(clone)
    }

    /// Replaces this list's contents with clones of `source`'s elements.
    ///
    /// When [`Allocator::PROPAGATE_ON_COPY_ASSIGN`] is `false` (the default)
    /// the list keeps its own strategy and reuses it for the new nodes; on
    /// error it is left holding the elements copied so far. When the policy
    /// is `true`, the copy is built aside with a clone of `source`'s
    /// strategy and swapped in only on success, so an error leaves this list
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any node allocation fails.
    pub fn try_clone_from(&mut self, source: &Self) -> MemoryResult<()>
    where
        T: Clone,
    {
        if A::PROPAGATE_ON_COPY_ASSIGN {
            let mut fresh = Self::new_in(source.alloc.clone())?;
            for item in source.iter() {
                fresh.push_back(item.clone())?;
            }
            *self = fresh;
        } else {
            self.clear();
            for item in source.iter() {
                self.push_back(item.clone())?;
            }
        }
        Ok(())
    }

    /// Cursor over shared borrows, starting at the front element (or the
    /// ghost position if the list is empty).
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T, A> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        let node = unsafe { (*self.sentinel.as_ptr()).next };
        Cursor::new(node, self)
    }

    /// Cursor over shared borrows, starting at the back element (or the
    /// ghost position if the list is empty).
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, T, A> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        let node = unsafe { (*self.sentinel.as_ptr()).prev };
        Cursor::new(node, self)
    }

    /// Editing cursor starting at the front element (or the ghost position
    /// if the list is empty).
    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        let node = unsafe { (*self.sentinel.as_ptr()).next };
        CursorMut::new(node, self)
    }

    /// Editing cursor starting at the back element (or the ghost position
    /// if the list is empty).
    #[must_use]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        let node = unsafe { (*self.sentinel.as_ptr()).prev };
        CursorMut::new(node, self)
    }

    /// Back-to-front cursor starting at the last element.
    ///
    /// Equivalent to [`cursor_back`](Self::cursor_back) followed by
    /// [`Cursor::into_reverse`].
    #[must_use]
    pub fn reverse_cursor(&self) -> ReverseCursor<'_, T, A> {
        self.cursor_back().into_reverse()
    }

    /// Iterator over shared borrows, front to back.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        unsafe {
            Iter::new(
                (*self.sentinel.as_ptr()).next,
                (*self.sentinel.as_ptr()).prev,
                self.len,
            )
        }
    }

    /// Iterator over exclusive borrows, front to back.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY:
        // - The sentinel is always a valid node of this list.
        unsafe {
            IterMut::new(
                (*self.sentinel.as_ptr()).next,
                (*self.sentinel.as_ptr()).prev,
                self.len,
            )
        }
    }

    /// Links a new node holding `value` immediately before `pos`.
    ///
    /// `pos` may be the sentinel, which appends at the back.
    fn link_before(&mut self, pos: NonNull<Node<T>>, value: T) -> MemoryResult<NonNull<Node<T>>> {
        let node = self.alloc.allocate_one::<Node<T>>()?;
        // SAFETY:
        // - `pos` is a node of this list, so `pos.prev` is too.
        // - `node` is a fresh slot; `construct` initializes it fully before
        //   it is linked in.
        unsafe {
            let prev = (*pos.as_ptr()).prev;
            self.alloc.construct(
                node,
                Node {
                    next: pos,
                    prev,
                    value: MaybeUninit::new(value),
                },
            );
            (*prev.as_ptr()).next = node;
            (*pos.as_ptr()).prev = node;
        }
        self.len += 1;
        Ok(node)
    }

    /// Unlinks `node` from the ring and returns its value.
    ///
    /// # Safety
    ///
    /// - `node` must be an element node of this list, not the sentinel.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        debug_assert!(node != self.sentinel);
        // SAFETY:
        // - The caller guarantees `node` is a live element node, so its
        //   neighbors are valid and its value is initialized.
        // - The value is read out before the slot is freed.
        let value = unsafe {
            let next = (*node.as_ptr()).next;
            let prev = (*node.as_ptr()).prev;
            (*prev.as_ptr()).next = next;
            (*next.as_ptr()).prev = prev;
            let value = (*node.as_ptr()).value.assume_init_read();
            self.alloc.deallocate_one(node);
            value
        };
        self.len -= 1;
        value
    }

    /// Walks the ring both ways and asserts it is consistent with `len`.
    #[cfg(test)]
    fn assert_links(&self) {
        // SAFETY:
        // - Only follows `next`/`prev` pointers of live nodes.
        unsafe {
            let mut count = 0;
            let mut prev = self.sentinel;
            let mut cur = (*self.sentinel.as_ptr()).next;
            while cur != self.sentinel {
                assert_eq!((*cur.as_ptr()).prev, prev, "prev link out of sync");
                prev = cur;
                cur = (*cur.as_ptr()).next;
                count += 1;
            }
            assert_eq!((*self.sentinel.as_ptr()).prev, prev, "tail link out of sync");
            assert_eq!(count, self.len, "len out of sync with ring");
        }
    }
}

impl<T, A: Allocator> Drop for LinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY:
        // - The sentinel was allocated through this strategy in `new_in` and
        //   its value was never initialized, so only the slot is freed.
        unsafe { self.alloc.deallocate_one(self.sentinel) };
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for LinkedList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<LinkedList<T, B>> for LinkedList<T, A> {
    /// Element-wise equality; the strategies are not compared.
    fn eq(&self, other: &LinkedList<T, B>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for LinkedList<T, A> {}

// SAFETY:
// - The list uniquely owns its nodes; moving it to another thread moves
//   ownership of every element and of the strategy.
unsafe impl<T: Send, A: Allocator + Send> Send for LinkedList<T, A> {}

// SAFETY:
// - `&LinkedList` only hands out shared borrows of elements and of the
//   strategy.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for LinkedList<T, A> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::PoolAllocator;
    use core::cell::Cell;

    struct DropTally<'a>(&'a Cell<usize>);

    impl Drop for DropTally<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_push_back_orders_front_to_back() {
        let mut list = LinkedList::new().expect("list");
        for n in [1, 2, 3] {
            list.push_back(n).expect("push_back failed");
        }
        list.assert_links();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_push_front_reverses_order() {
        let mut list = LinkedList::new().expect("list");
        for n in [1, 2, 3] {
            list.push_front(n).expect("push_front failed");
        }
        list.assert_links();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn test_len_tracks_every_operation() {
        let mut list = LinkedList::new().expect("list");
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());

        list.push_back(1).expect("push_back failed");
        list.push_front(0).expect("push_front failed");
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.len(), 0);
        list.assert_links();
    }

    #[test]
    fn test_pops_on_empty_return_none() {
        let mut list: LinkedList<i32> = LinkedList::new().expect("list");
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn test_front_back_accessors() {
        let mut list = LinkedList::new().expect("list");
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);

        list.push_back(10).expect("push_back failed");
        list.push_back(20).expect("push_back failed");
        assert_eq!(list.front(), Some(&10));
        assert_eq!(list.back(), Some(&20));

        if let Some(front) = list.front_mut() {
            *front = 11;
        }
        if let Some(back) = list.back_mut() {
            *back = 21;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [11, 21]);
    }

    #[test]
    fn test_filled_constructor() {
        let list = LinkedList::filled(4, 7u32).expect("list");
        assert_eq!(list.len(), 4);
        assert!(list.iter().all(|&n| n == 7));
    }

    #[test]
    fn test_with_default_constructor() {
        let list: LinkedList<u32> = LinkedList::with_default(3).expect("list");
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 0, 0]);
    }

    #[test]
    fn test_clear_drops_all_elements() {
        let drops = Cell::new(0);
        let mut list = LinkedList::new().expect("list");
        for _ in 0..5 {
            list.push_back(DropTally(&drops)).expect("push_back failed");
        }

        list.clear();
        assert_eq!(drops.get(), 5);
        assert!(list.is_empty());
        list.assert_links();

        list.push_back(DropTally(&drops)).expect("push_back failed");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_drop_destroys_every_element_once() {
        let drops = Cell::new(0);
        {
            let mut list = LinkedList::new().expect("list");
            for _ in 0..4 {
                list.push_back(DropTally(&drops)).expect("push_back failed");
            }
            list.pop_front();
            assert_eq!(drops.get(), 1);
        }
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut original = LinkedList::new().expect("list");
        for n in [1, 2, 3] {
            original.push_back(n).expect("push_back failed");
        }

        let mut copy = original.try_clone().expect("clone");
        copy.push_back(4).expect("push_back failed");
        copy.pop_front();

        assert_eq!(original.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
    }

    #[test]
    fn test_try_clone_selects_fresh_pool() {
        let mut original =
            LinkedList::new_in(PoolAllocator::new()).expect("list");
        for n in [1u64, 2, 3] {
            original.push_back(n).expect("push_back failed");
        }

        let copy = original.try_clone().expect("clone");
        assert_ne!(copy.allocator().id(), original.allocator().id());
        assert_eq!(copy.allocator().stats().acquires, 4);
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_try_clone_from_keeps_own_strategy() {
        let mut source = LinkedList::new().expect("list");
        for n in [5, 6] {
            source.push_back(n).expect("push_back failed");
        }

        let mut dest = LinkedList::new().expect("list");
        dest.push_back(99).expect("push_back failed");
        let dest_id = dest.allocator().id();

        dest.try_clone_from(&source).expect("clone_from");
        assert_eq!(dest.iter().copied().collect::<Vec<_>>(), [5, 6]);
        assert_eq!(dest.allocator().id(), dest_id);
        dest.assert_links();
    }

    #[test]
    fn test_debug_formats_like_a_sequence() {
        let mut list = LinkedList::new().expect("list");
        for n in [1, 2, 3] {
            list.push_back(n).expect("push_back failed");
        }
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    fn test_equality_ignores_strategy() {
        let mut a = LinkedList::new().expect("list");
        let mut b = LinkedList::new_in(PoolAllocator::new()).expect("list");
        for n in [1, 2, 3] {
            a.push_back(n).expect("push_back failed");
            b.push_back(n).expect("push_back failed");
        }
        assert_eq!(a, b);

        b.push_back(4).expect("push_back failed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_pool_backed_list_uses_the_pool() {
        let mut list = LinkedList::new_in(PoolAllocator::new()).expect("list");
        for n in 0..10u32 {
            list.push_back(n).expect("push_back failed");
        }
        // Ten element nodes plus the sentinel.
        assert_eq!(list.allocator().stats().acquires, 11);
        assert!(list.allocator().pool().chunk_count() >= 1);
    }

    #[test]
    fn test_zero_sized_elements() {
        let mut list = LinkedList::new().expect("list");
        for _ in 0..3 {
            list.push_back(()).expect("push_back failed");
        }
        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_back(), Some(()));
        list.assert_links();
    }
}
