//! Property tests pitting the list against a `Vec` model.
//!
//! Random operation sequences must keep the list's contents, length, ring
//! structure, and pool bookkeeping in lockstep with the model.

use fastalloc::prelude::*;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    InsertAt(usize, i32),
    RemoveAt(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushBack),
        any::<i32>().prop_map(Op::PushFront),
        Just(Op::PopBack),
        Just(Op::PopFront),
        (any::<u16>(), any::<i32>()).prop_map(|(at, value)| Op::InsertAt(at as usize, value)),
        any::<u16>().prop_map(|at| Op::RemoveAt(at as usize)),
    ]
}

/// Editing cursor resting on the element at `idx` (or the ghost position
/// when `idx` equals the length).
fn cursor_at<'a, A: Allocator>(
    list: &'a mut LinkedList<i32, A>,
    idx: usize,
) -> CursorMut<'a, i32, A> {
    let mut cursor = list.cursor_front_mut();
    for _ in 0..idx {
        cursor.move_next();
    }
    cursor
}

// ---------------------------------------------------------------------------
// Property: the list mirrors the model under arbitrary operations
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn list_matches_vec_model(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let alloc = PoolAllocator::new();
        let mut list = LinkedList::new_in(&alloc).expect("list");
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::PushBack(value) => {
                    list.push_back(value).expect("push_back failed");
                    model.push(value);
                }
                Op::PushFront(value) => {
                    list.push_front(value).expect("push_front failed");
                    model.insert(0, value);
                }
                Op::PopBack => {
                    prop_assert_eq!(list.pop_back(), model.pop());
                }
                Op::PopFront => {
                    let expected = if model.is_empty() {
                        None
                    } else {
                        Some(model.remove(0))
                    };
                    prop_assert_eq!(list.pop_front(), expected);
                }
                Op::InsertAt(at, value) => {
                    let idx = at % (model.len() + 1);
                    let mut cursor = cursor_at(&mut list, idx);
                    cursor.insert_before(value).expect("insert failed");
                    model.insert(idx, value);
                }
                Op::RemoveAt(at) => {
                    if !model.is_empty() {
                        let idx = at % model.len();
                        let mut cursor = cursor_at(&mut list, idx);
                        prop_assert_eq!(cursor.remove_current(), Some(model.remove(idx)));
                    }
                }
            }

            // INVARIANT: length and end accessors agree with the model.
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.front(), model.first());
            prop_assert_eq!(list.back(), model.last());

            // INVARIANT: walking the ring `len` steps from the front lands
            // on the ghost position.
            let mut walk = list.cursor_front();
            for _ in 0..model.len() {
                prop_assert!(walk.current().is_some());
                walk.move_next();
            }
            prop_assert!(walk.current().is_none());

            // INVARIANT: one live pool block per node, plus the sentinel.
            prop_assert_eq!(alloc.stats().outstanding(), (model.len() + 1) as u64);
        }

        // Contents agree in both directions.
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model.clone());
        let mut reversed = model.clone();
        reversed.reverse();
        prop_assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), reversed.clone());

        // A reverse cursor sees the same back-to-front order.
        let mut reverse_seen = Vec::new();
        let mut reverse = list.reverse_cursor();
        while let Some(&value) = reverse.current() {
            reverse_seen.push(value);
            reverse.move_next();
        }
        prop_assert_eq!(reverse_seen, reversed);

        // Walking `len` steps from the front lands exactly on the ghost
        // position, and one more step wraps to the front.
        let mut cursor = list.cursor_front();
        for _ in 0..list.len() {
            prop_assert!(cursor.current().is_some());
            cursor.move_next();
        }
        prop_assert!(cursor.current().is_none());
        cursor.move_next();
        prop_assert_eq!(cursor.current(), model.first());

        // Teardown pairs every acquire with a release.
        drop(list);
        prop_assert_eq!(alloc.stats().outstanding(), 0);
    }
}

// ---------------------------------------------------------------------------
// Deterministic companions
// ---------------------------------------------------------------------------

/// A fixed mixed sequence, checked step by step.
#[test]
fn mixed_sequence_matches_model() {
    let mut list = LinkedList::new().expect("list");

    list.push_back(2).expect("push_back failed");
    list.push_front(1).expect("push_front failed");
    list.push_back(3).expect("push_back failed");
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    let mut cursor = cursor_at(&mut list, 1);
    cursor.insert_before(10).expect("insert failed");
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 10, 2, 3]);

    let mut cursor = cursor_at(&mut list, 2);
    assert_eq!(cursor.remove_current(), Some(2));
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 10, 3]);

    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_back(), Some(10));
    assert_eq!(list.pop_back(), None);
}

/// Inserting at every index of a short list hits all link positions.
#[test]
fn insert_at_every_position() {
    for idx in 0..=3usize {
        let mut list = LinkedList::new().expect("list");
        for n in [0, 1, 2] {
            list.push_back(n).expect("push_back failed");
        }

        let mut cursor = cursor_at(&mut list, idx);
        cursor.insert_before(9).expect("insert failed");

        let mut expected = vec![0, 1, 2];
        expected.insert(idx, 9);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }
}
