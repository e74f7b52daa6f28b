//! Generic tests for both PriorityQueue implementations
//!
//! Every helper is written against the trait and instantiated once per engine
//! at the bottom of the file.

use lab_heaps::array_heap::ArrayHeap;
use lab_heaps::multi_tree::MultiTreeHeap;
use lab_heaps::PriorityQueue;

/// Test that an empty heap behaves correctly
fn test_empty_heap<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.peek_min(), None);
    assert_eq!(heap.extract_min(), None);
    assert!(heap.validate().is_ok());
}

/// Test the six-key scenario: both engines must sort identically
fn test_six_key_scenario<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    for key in [5, 3, 8, 1, 9, 2] {
        heap.insert(key);
    }

    assert_eq!(heap.len(), 6);
    assert_eq!(heap.extract_min(), Some(1));
    assert_eq!(heap.extract_min(), Some(2));
    assert_eq!(heap.extract_min(), Some(3));
    assert_eq!(heap.extract_min(), Some(5));
    assert_eq!(heap.extract_min(), Some(8));
    assert_eq!(heap.extract_min(), Some(9));
    assert_eq!(heap.extract_min(), None);
}

/// Test that a fully drained heap behaves like a fresh one and can be refilled
fn test_drained_heap<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    heap.insert(10);
    heap.insert(20);
    assert_eq!(heap.extract_min(), Some(10));
    assert_eq!(heap.extract_min(), Some(20));

    assert!(heap.is_empty());
    assert_eq!(heap.peek_min(), None);
    assert_eq!(heap.extract_min(), None);

    heap.insert(7);
    assert_eq!(heap.peek_min(), Some(&7));
    assert_eq!(heap.len(), 1);
}

/// Test that peek is idempotent and does not change the structure
fn test_peek_idempotent<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    for key in [40, 10, 30, 20] {
        heap.insert(key);
    }
    heap.extract_min();

    for _ in 0..10 {
        assert_eq!(heap.peek_min(), Some(&20));
        assert_eq!(heap.len(), 3);
    }
    assert!(heap.validate().is_ok());
    assert_eq!(heap.extract_min(), Some(20));
}

/// Test a single element
fn test_single_element<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    heap.insert(42);
    assert_eq!(heap.peek_min(), Some(&42));
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.extract_min(), Some(42));
    assert!(heap.is_empty());
}

/// Test duplicate keys are all returned
fn test_duplicates<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    for key in [3, 1, 3, 1, 2, 2, 1] {
        heap.insert(key);
    }

    let drained: Vec<_> = std::iter::from_fn(|| heap.extract_min()).collect();
    assert_eq!(drained, vec![1, 1, 1, 2, 2, 3, 3]);
}

/// Test that the minimum tracks interleaved inserts and extractions
fn test_interleaved<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    heap.insert(50);
    heap.insert(40);
    assert_eq!(heap.extract_min(), Some(40));
    heap.insert(45);
    heap.insert(60);
    assert_eq!(heap.peek_min(), Some(&45));
    heap.insert(5);
    assert_eq!(heap.peek_min(), Some(&5));
    assert_eq!(heap.extract_min(), Some(5));
    assert_eq!(heap.extract_min(), Some(45));
    assert_eq!(heap.extract_min(), Some(50));
    assert_eq!(heap.extract_min(), Some(60));
    assert!(heap.validate().is_ok());
}

/// Test extreme key values
fn test_extreme_keys<H: PriorityQueue<i32>>() {
    let mut heap = H::new();
    heap.insert(i32::MAX);
    heap.insert(0);
    heap.insert(i32::MIN);
    heap.insert(-1);

    assert_eq!(heap.extract_min(), Some(i32::MIN));
    assert_eq!(heap.extract_min(), Some(-1));
    assert_eq!(heap.extract_min(), Some(0));
    assert_eq!(heap.extract_min(), Some(i32::MAX));
}

/// Test count conservation: k inserts, m extractions leave the k - m largest
fn test_count_conservation<H: PriorityQueue<i32>>() {
    let keys: Vec<i32> = (0..64).map(|i| (i * 37) % 64).collect();
    let mut heap = H::new();
    for &key in &keys {
        heap.insert(key);
    }

    for expected in 0..20 {
        assert_eq!(heap.extract_min(), Some(expected));
    }
    assert_eq!(heap.len(), 44);

    let rest: Vec<_> = std::iter::from_fn(|| heap.extract_min()).collect();
    assert_eq!(rest, (20..64).collect::<Vec<_>>());
}

macro_rules! heap_tests {
    ($module:ident, $heap:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn empty_heap() {
                test_empty_heap::<$heap>();
            }

            #[test]
            fn six_key_scenario() {
                test_six_key_scenario::<$heap>();
            }

            #[test]
            fn drained_heap() {
                test_drained_heap::<$heap>();
            }

            #[test]
            fn peek_idempotent() {
                test_peek_idempotent::<$heap>();
            }

            #[test]
            fn single_element() {
                test_single_element::<$heap>();
            }

            #[test]
            fn duplicates() {
                test_duplicates::<$heap>();
            }

            #[test]
            fn interleaved() {
                test_interleaved::<$heap>();
            }

            #[test]
            fn extreme_keys() {
                test_extreme_keys::<$heap>();
            }

            #[test]
            fn count_conservation() {
                test_count_conservation::<$heap>();
            }
        }
    };
}

heap_tests!(array_heap, ArrayHeap<i32>);
heap_tests!(multi_tree_heap, MultiTreeHeap<i32>);

#[test]
fn test_engines_agree_on_same_input() {
    let keys: Vec<i32> = (0..500).map(|i| (i * 7919) % 1000 - 500).collect();

    let mut array: ArrayHeap<i32> = keys.iter().copied().collect();
    let mut multi: MultiTreeHeap<i32> = keys.iter().copied().collect();

    while let Some(expected) = array.extract_min() {
        assert_eq!(multi.minimum(), Some(&expected));
        assert_eq!(multi.extract_min(), Some(expected));
    }
    assert!(multi.is_empty());
}
