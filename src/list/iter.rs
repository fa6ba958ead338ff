//! Iterators over [`LinkedList`]
//!
//! [`Iter`] and [`IterMut`] walk the ring from both ends with a remaining
//! count, so they never touch the sentinel and fuse cleanly when the ends
//! meet. [`IntoIter`] owns the list and drains it front to back.

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::allocator::{Allocator, SystemAllocator};

use super::{LinkedList, Node};

/// Iterator over shared borrows of a list's elements.
pub struct Iter<'a, T> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(head: NonNull<Node<T>>, tail: NonNull<Node<T>>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - `len > 0`, so `head` is an element node with an initialized
        //   value, and its `next` is valid.
        unsafe {
            let node = self.head;
            self.head = (*node.as_ptr()).next;
            self.len -= 1;
            Some((*node.as_ptr()).value.assume_init_ref())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - `len > 0`, so `tail` is an element node with an initialized
        //   value, and its `prev` is valid.
        unsafe {
            let node = self.tail;
            self.tail = (*node.as_ptr()).prev;
            self.len -= 1;
            Some((*node.as_ptr()).value.assume_init_ref())
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over exclusive borrows of a list's elements.
pub struct IterMut<'a, T> {
    head: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(head: NonNull<Node<T>>, tail: NonNull<Node<T>>, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - `len > 0`, so `head` is an element node with an initialized
        //   value.
        // - Each node is visited at most once, so the borrows never alias.
        unsafe {
            let node = self.head;
            self.head = (*node.as_ptr()).next;
            self.len -= 1;
            Some((*node.as_ptr()).value.assume_init_mut())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY:
        // - `len > 0`, so `tail` is an element node with an initialized
        //   value.
        // - Each node is visited at most once, so the borrows never alias.
        unsafe {
            let node = self.tail;
            self.tail = (*node.as_ptr()).prev;
            self.len -= 1;
            Some((*node.as_ptr()).value.assume_init_mut())
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator that drains the list front to back.
pub struct IntoIter<T, A: Allocator = SystemAllocator> {
    list: LinkedList<T, A>,
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIterator for LinkedList<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { list: self }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a LinkedList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut LinkedList<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
