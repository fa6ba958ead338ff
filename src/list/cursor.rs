//! Cursors over [`LinkedList`]
//!
//! A cursor rests either on an element or on the ghost position, the gap
//! between the back and the front where the sentinel sits. Moving past
//! either end lands on the ghost, and moving again wraps around to the other
//! end, so a cursor is always valid.
//!
//! [`Cursor`] reads through a shared borrow and is freely copyable.
//! [`CursorMut`] holds the list exclusively and can edit at its position.
//! A `CursorMut` can be downgraded to a `Cursor`, never the other way.

use core::fmt;
use core::ptr::NonNull;

use crate::allocator::{Allocator, SystemAllocator};
use crate::error::MemoryResult;

use super::{LinkedList, Node};

/// Read-only cursor. Copyable, so positions can be saved and compared.
pub struct Cursor<'a, T, A: Allocator = SystemAllocator> {
    node: NonNull<Node<T>>,
    list: &'a LinkedList<T, A>,
}

impl<T, A: Allocator> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Allocator> Copy for Cursor<'_, T, A> {}

impl<'a, T, A: Allocator> Cursor<'a, T, A> {
    pub(super) fn new(node: NonNull<Node<T>>, list: &'a LinkedList<T, A>) -> Self {
        Self { node, list }
    }

    /// Element under the cursor, or `None` at the ghost position.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        if self.node == self.list.sentinel {
            return None;
        }
        // SAFETY:
        // - Non-sentinel nodes hold an initialized value, and the shared
        //   borrow of the list keeps it alive for `'a`.
        unsafe { Some((*self.node.as_ptr()).value.assume_init_ref()) }
    }

    /// Moves one step toward the back, wrapping through the ghost position.
    pub fn move_next(&mut self) {
        // SAFETY:
        // - Every node in the ring has a valid `next`.
        self.node = unsafe { (*self.node.as_ptr()).next };
    }

    /// Moves one step toward the front, wrapping through the ghost position.
    pub fn move_prev(&mut self) {
        // SAFETY:
        // - Every node in the ring has a valid `prev`.
        self.node = unsafe { (*self.node.as_ptr()).prev };
    }

    /// Adapts this cursor to walk back to front from the same element.
    #[must_use]
    pub fn into_reverse(self) -> ReverseCursor<'a, T, A> {
        ReverseCursor { inner: self }
    }
}

impl<T, A: Allocator> PartialEq for Cursor<'_, T, A> {
    /// Cursors are equal when they rest on the same position.
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T, A: Allocator> Eq for Cursor<'_, T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

/// Editing cursor. Holds the list exclusively and can insert and remove at
/// its position.
pub struct CursorMut<'a, T, A: Allocator = SystemAllocator> {
    node: NonNull<Node<T>>,
    list: &'a mut LinkedList<T, A>,
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    pub(super) fn new(node: NonNull<Node<T>>, list: &'a mut LinkedList<T, A>) -> Self {
        Self { node, list }
    }

    /// Element under the cursor, or `None` at the ghost position.
    #[must_use]
    pub fn current(&mut self) -> Option<&mut T> {
        if self.node == self.list.sentinel {
            return None;
        }
        // SAFETY:
        // - Non-sentinel nodes hold an initialized value.
        // - The exclusive borrow of the cursor guarantees no other access.
        unsafe { Some((*self.node.as_ptr()).value.assume_init_mut()) }
    }

    /// Moves one step toward the back, wrapping through the ghost position.
    pub fn move_next(&mut self) {
        // SAFETY:
        // - Every node in the ring has a valid `next`.
        self.node = unsafe { (*self.node.as_ptr()).next };
    }

    /// Moves one step toward the front, wrapping through the ghost position.
    pub fn move_prev(&mut self) {
        // SAFETY:
        // - Every node in the ring has a valid `prev`.
        self.node = unsafe { (*self.node.as_ptr()).prev };
    }

    /// Inserts `value` before the cursor's position; the cursor stays on its
    /// current element.
    ///
    /// At the ghost position this appends at the back.
    ///
    /// # Errors
    ///
    /// Returns an error if the node allocation fails; the list is unchanged.
    pub fn insert_before(&mut self, value: T) -> MemoryResult<()> {
        self.list.link_before(self.node, value).map(|_| ())
    }

    /// Inserts `value` after the cursor's position; the cursor stays on its
    /// current element.
    ///
    /// At the ghost position this prepends at the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the node allocation fails; the list is unchanged.
    pub fn insert_after(&mut self, value: T) -> MemoryResult<()> {
        // SAFETY:
        // - The cursor's node is in the ring, so `next` is valid.
        let next = unsafe { (*self.node.as_ptr()).next };
        self.list.link_before(next, value).map(|_| ())
    }

    /// Removes and returns the element under the cursor, advancing to the
    /// next position. Returns `None` at the ghost position.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.node == self.list.sentinel {
            return None;
        }
        let node = self.node;
        // SAFETY:
        // - `node` is an element node of this list; the cursor steps off it
        //   before it is unlinked.
        unsafe {
            self.node = (*node.as_ptr()).next;
            Some(self.list.unlink(node))
        }
    }

    /// Read-only view of this cursor, borrowing it for the view's lifetime.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self.node, self.list)
    }

    /// Downgrades into a read-only cursor at the same position, giving up
    /// editing for the rest of the borrow.
    #[must_use]
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        Cursor::new(self.node, self.list)
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&self.as_cursor().current())
            .finish()
    }
}

/// Cursor adapter that walks back to front.
///
/// The adapter rests on the element it yields, and [`base`](Self::base)
/// recovers the forward cursor one step toward the back. A reverse cursor at
/// the last element therefore has the ghost position as its base, and one at
/// the ghost position has the first element as its base.
pub struct ReverseCursor<'a, T, A: Allocator = SystemAllocator> {
    inner: Cursor<'a, T, A>,
}

impl<T, A: Allocator> Clone for ReverseCursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Allocator> Copy for ReverseCursor<'_, T, A> {}

impl<'a, T, A: Allocator> ReverseCursor<'a, T, A> {
    /// Element under the cursor, or `None` at the ghost position.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.inner.current()
    }

    /// Moves one step in reverse direction, toward the front of the list.
    pub fn move_next(&mut self) {
        self.inner.move_prev();
    }

    /// Moves one step against reverse direction, toward the back of the
    /// list.
    pub fn move_prev(&mut self) {
        self.inner.move_next();
    }

    /// Forward cursor one step toward the back of the element this cursor
    /// rests on.
    #[must_use]
    pub fn base(&self) -> Cursor<'a, T, A> {
        let mut base = self.inner;
        base.move_next();
        base
    }
}

impl<T, A: Allocator> PartialEq for ReverseCursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, A: Allocator> Eq for ReverseCursor<'_, T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ReverseCursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReverseCursor").field(&self.current()).finish()
    }
}
