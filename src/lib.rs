//! Binary heap vs. Fibonacci heap
//!
//! Two min-priority queues with the same contract and different cost profiles:
//!
//! - **ArrayHeap**: binary heap in a dense vector. O(log n) insert and
//!   extract-min, O(1) peek.
//! - **MultiTreeHeap**: Fibonacci heap whose nodes live in an index arena.
//!   O(1) insert and minimum, O(log n) amortized extract-min; restructuring is
//!   deferred until an extraction consolidates the root list.
//!
//! Both implement [`PriorityQueue`], and the [`workload`] module drives either
//! one through identical timed operation sequences.
//!
//! # Example
//!
//! ```rust
//! use lab_heaps::array_heap::ArrayHeap;
//! use lab_heaps::multi_tree::MultiTreeHeap;
//! use lab_heaps::PriorityQueue;
//!
//! fn drain<H: PriorityQueue<i32>>(keys: &[i32]) -> Vec<i32> {
//!     let mut heap = H::new();
//!     for &key in keys {
//!         heap.insert(key);
//!     }
//!     std::iter::from_fn(|| heap.extract_min()).collect()
//! }
//!
//! let keys = [5, 3, 8, 1, 9, 2];
//! assert_eq!(drain::<ArrayHeap<i32>>(&keys), vec![1, 2, 3, 5, 8, 9]);
//! assert_eq!(drain::<MultiTreeHeap<i32>>(&keys), vec![1, 2, 3, 5, 8, 9]);
//! ```

pub mod array_heap;
pub mod multi_tree;
pub mod traits;
pub mod workload;

// Re-export the main trait for convenience
pub use traits::{InvariantViolation, PriorityQueue};
