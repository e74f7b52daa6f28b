//! Common traits for the priority-queue engines
//!
//! Both engines in this crate implement [`PriorityQueue`], so callers such as
//! the [`workload`](crate::workload) driver can run identical operation
//! sequences against either one without knowing which representation sits
//! underneath.
//!
//! The engines are min-heaps over bare keys: there is no separate payload,
//! the key itself is the item.

use std::fmt;

/// Structural problem reported by [`PriorityQueue::validate`]
///
/// Regular operations never produce this error. It exists so tests (and
/// curious callers) can walk the whole structure and confirm that every
/// invariant still holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child holds a smaller key than its parent
    HeapOrder,
    /// The number of reachable keys differs from `len()`
    LengthMismatch {
        /// Value reported by `len()`
        expected: usize,
        /// Keys actually reachable from the root(s)
        found: usize,
    },
    /// Sibling links are not symmetric or a parent link points elsewhere
    BrokenRing,
    /// A node's stored degree differs from the size of its child ring
    DegreeMismatch,
    /// The minimum reference does not hold the smallest root key
    StaleMinimum,
    /// Two roots share the same degree right after consolidation
    DuplicateRootDegree(usize),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder => {
                write!(f, "child key is smaller than its parent key")
            }
            InvariantViolation::LengthMismatch { expected, found } => {
                write!(f, "expected {} keys but found {}", expected, found)
            }
            InvariantViolation::BrokenRing => {
                write!(f, "sibling ring links are inconsistent")
            }
            InvariantViolation::DegreeMismatch => {
                write!(f, "stored degree differs from child count")
            }
            InvariantViolation::StaleMinimum => {
                write!(f, "minimum does not point at the smallest root")
            }
            InvariantViolation::DuplicateRootDegree(degree) => {
                write!(f, "more than one root has degree {}", degree)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Shared capability interface for min-priority queues
///
/// Operations on an empty queue are not errors: `peek_min` and `extract_min`
/// simply return `None`.
///
/// # Example
///
/// ```rust
/// use lab_heaps::PriorityQueue;
/// use lab_heaps::array_heap::ArrayHeap;
///
/// let mut heap = ArrayHeap::new();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.peek_min(), Some(&1));
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait PriorityQueue<K: Ord> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Creates a new empty queue with storage reserved for `capacity` keys
    fn with_capacity(capacity: usize) -> Self;

    /// Returns true if the queue holds no keys
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the queue
    fn len(&self) -> usize;

    /// Inserts a key
    ///
    /// # Time Complexity
    /// O(log n) for [`ArrayHeap`](crate::array_heap::ArrayHeap), O(1) for
    /// [`MultiTreeHeap`](crate::multi_tree::MultiTreeHeap).
    fn insert(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1) for both engines
    fn peek_min(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    ///
    /// # Time Complexity
    /// O(log n) worst case for the array heap, O(log n) amortized for the
    /// multi-tree heap.
    fn extract_min(&mut self) -> Option<K>;

    /// Checks every structural invariant of the queue
    ///
    /// This walks the entire structure and is O(n); it is meant for tests.
    fn validate(&self) -> Result<(), InvariantViolation>;
}
