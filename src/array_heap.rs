//! Array-backed binary heap
//!
//! A binary min-heap stored as a dense vector that represents an implicit
//! complete binary tree: the children of index `i` live at `2i + 1` and
//! `2i + 2`, and there are never gaps.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(log n)   |
//! | `extract_min` | O(log n)   |
//! | `peek_min`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use lab_heaps::PriorityQueue;
//! use lab_heaps::array_heap::ArrayHeap;
//!
//! let mut heap = ArrayHeap::new();
//! for key in [5, 3, 8, 1, 9, 2] {
//!     heap.insert(key);
//! }
//!
//! assert_eq!(heap.peek_min(), Some(&1));
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(2));
//! assert_eq!(heap.extract_min(), Some(3));
//! ```

use crate::traits::{InvariantViolation, PriorityQueue};

/// A binary min-heap over bare keys
#[derive(Debug, Clone)]
pub struct ArrayHeap<K: Ord> {
    /// Keys in implicit-tree order; `data[0]` is the minimum
    data: Vec<K>,
}

impl<K: Ord> PriorityQueue<K> for ArrayHeap<K> {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn insert(&mut self, key: K) {
        self.data.push(key);
        self.sift_up(self.data.len() - 1);
    }

    fn peek_min(&self) -> Option<&K> {
        self.data.first()
    }

    fn extract_min(&mut self) -> Option<K> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        // Every non-root key must be >= its parent's
        for index in 1..self.data.len() {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                return Err(InvariantViolation::HeapOrder);
            }
        }
        Ok(())
    }
}

impl<K: Ord> ArrayHeap<K> {
    /// The backing tree in index order
    pub fn as_slice(&self) -> &[K] {
        &self.data
    }

    /// Move element at index up while its parent is strictly greater
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down, swapping with the smaller child.
    /// Equal children resolve to the left one.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<K: Ord> Default for ArrayHeap<K> {
    fn default() -> Self {
        <Self as PriorityQueue<K>>::new()
    }
}

impl<K: Ord> Extend<K> for ArrayHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for ArrayHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}
