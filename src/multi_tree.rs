//! Fibonacci heap over an index arena
//!
//! A Fibonacci heap is a forest of heap-ordered multi-way trees whose roots are
//! linked in a circular doubly linked list (the *root ring*). The heap keeps a
//! reference to the root holding the smallest key.
//!
//! - `insert` only splices a singleton tree into the root ring: O(1)
//! - `minimum` reads the cached minimum root: O(1)
//! - `extract_min` promotes the children of the minimum to roots and then
//!   *consolidates*, linking roots of equal degree until every degree occurs
//!   at most once: O(log n) amortized
//!
//! Nodes live in a [`SlotMap`] and refer to each other through [`NodeId`]
//! keys, so ring and parent links are plain indices rather than raw pointers.
//! A node alone in its ring has `left == right == self`.
//!
//! Decrease-key, arbitrary deletion and melding are deliberately not offered;
//! the only node that ever leaves the structure is the current minimum.
//!
//! # Example
//!
//! ```rust
//! use lab_heaps::PriorityQueue;
//! use lab_heaps::multi_tree::MultiTreeHeap;
//!
//! let mut heap = MultiTreeHeap::new();
//! for key in [5, 3, 8, 1, 9, 2] {
//!     heap.insert(key);
//! }
//!
//! assert_eq!(heap.minimum(), Some(&1));
//! assert_eq!(heap.extract_min(), Some(1));
//! assert_eq!(heap.extract_min(), Some(2));
//! ```

use crate::traits::{InvariantViolation, PriorityQueue};
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::fmt;

new_key_type! {
    /// Arena key identifying a node of a [`MultiTreeHeap`]
    pub struct NodeId;
}

/// Degree tables this size or smaller stay on the stack.
/// A heap needs more than 64 slots only past 2^62 nodes.
type DegreeTable = SmallVec<[Option<NodeId>; 64]>;

#[derive(Debug)]
struct Node<K> {
    key: K,
    /// Number of direct children
    degree: usize,
    /// Cleared whenever the node gains a parent; nothing sets it while
    /// decrease-key is absent.
    #[allow(dead_code)]
    marked: bool,
    parent: Option<NodeId>,
    /// One member of the child ring, `None` for leaves
    child: Option<NodeId>,
    left: NodeId,
    right: NodeId,
}

/// Fibonacci heap (multi-tree heap)
///
/// # Example
///
/// ```rust
/// use lab_heaps::PriorityQueue;
/// use lab_heaps::multi_tree::MultiTreeHeap;
///
/// let mut heap: MultiTreeHeap<u32> = [7, 4, 9].into_iter().collect();
/// assert_eq!(heap.extract_min(), Some(4));
/// assert_eq!(heap.root_degrees(), vec![1]);
/// ```
pub struct MultiTreeHeap<K: Ord> {
    nodes: SlotMap<NodeId, Node<K>>,
    min: Option<NodeId>,
    /// Reused between extractions for ring snapshots
    scratch: Vec<NodeId>,
}

impl<K: Ord> PriorityQueue<K> for MultiTreeHeap<K> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            scratch: Vec::new(),
        }
    }

    /// Also reserves the snapshot buffer: the first extraction after
    /// `capacity` inserts walks a root ring of that length.
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            min: None,
            scratch: Vec::with_capacity(capacity),
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, key: K) {
        let node = self.nodes.insert_with_key(|id| Node {
            key,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: id,
            right: id,
        });

        match self.min {
            Some(min) => {
                self.splice_right(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }
    }

    fn peek_min(&self) -> Option<&K> {
        self.min.map(|id| &self.nodes[id].key)
    }

    fn extract_min(&mut self) -> Option<K> {
        let min = self.min?;

        // Promote every child to the root ring
        if let Some(child) = self.nodes[min].child.take() {
            let mut children = std::mem::take(&mut self.scratch);
            children.clear();
            self.collect_ring(child, &mut children);
            for &c in &children {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
                self.splice_right(min, c);
            }
            self.nodes[min].degree = 0;
            self.scratch = children;
        }

        let right = self.nodes[min].right;
        if right == min {
            self.min = None;
        } else {
            self.unlink(min);
            self.min = Some(right);
            self.consolidate();
        }

        self.nodes.remove(min).map(|node| node.key)
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::LengthMismatch {
                    expected: self.nodes.len(),
                    found: 0,
                })
            };
        };

        let roots = self.walk_ring(min)?;
        let mut found = 0;
        let mut pending = Vec::new();
        for &root in &roots {
            if self.nodes[root].parent.is_some() {
                return Err(InvariantViolation::BrokenRing);
            }
            if self.nodes[root].key < self.nodes[min].key {
                return Err(InvariantViolation::StaleMinimum);
            }
            pending.push(root);
        }

        while let Some(id) = pending.pop() {
            found += 1;
            let node = &self.nodes[id];
            let children = match node.child {
                Some(child) => self.walk_ring(child)?,
                None => Vec::new(),
            };
            if children.len() != node.degree {
                return Err(InvariantViolation::DegreeMismatch);
            }
            for c in children {
                if self.nodes[c].parent != Some(id) {
                    return Err(InvariantViolation::BrokenRing);
                }
                if self.nodes[c].key < node.key {
                    return Err(InvariantViolation::HeapOrder);
                }
                pending.push(c);
            }
        }

        if found != self.nodes.len() {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.nodes.len(),
                found,
            });
        }
        Ok(())
    }
}

impl<K: Ord> MultiTreeHeap<K> {
    /// Returns the minimum key without removing it
    ///
    /// Same as [`PriorityQueue::peek_min`].
    pub fn minimum(&self) -> Option<&K> {
        self.peek_min()
    }

    /// Degrees of the current roots, in ring order starting at the minimum
    pub fn root_degrees(&self) -> Vec<usize> {
        let mut roots = Vec::new();
        if let Some(min) = self.min {
            self.collect_ring(min, &mut roots);
        }
        roots.into_iter().map(|id| self.nodes[id].degree).collect()
    }

    /// Checks that no two roots share a degree
    ///
    /// Holds right after any `extract_min` that leaves the heap non-empty.
    /// Inserts add degree-0 roots freely, so it is not a permanent invariant.
    pub fn validate_consolidated(&self) -> Result<(), InvariantViolation> {
        let mut seen: SmallVec<[bool; 64]> = SmallVec::new();
        for degree in self.root_degrees() {
            if degree >= seen.len() {
                seen.resize(degree + 1, false);
            }
            if seen[degree] {
                return Err(InvariantViolation::DuplicateRootDegree(degree));
            }
            seen[degree] = true;
        }
        Ok(())
    }

    /// Links roots of equal degree until every degree occurs at most once,
    /// then rebuilds the root ring and recomputes the minimum.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        // Snapshot the ring first; linking rewires it underneath us
        let mut roots = std::mem::take(&mut self.scratch);
        roots.clear();
        self.collect_ring(start, &mut roots);

        let slots = self.nodes.len().checked_ilog2().unwrap_or(0) as usize + 2;
        let mut table: DegreeTable = smallvec![None; slots];

        for &root in &roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;
            loop {
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                let Some(mut y) = table[degree].take() else {
                    break;
                };
                // On equal keys the root being placed stays on top
                if self.nodes[y].key < self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(x, y);
                degree += 1;
            }
            table[degree] = Some(x);
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            let node = &mut self.nodes[root];
            node.left = root;
            node.right = root;
            match self.min {
                Some(min) => {
                    self.splice_right(min, root);
                    if self.nodes[root].key < self.nodes[min].key {
                        self.min = Some(root);
                    }
                }
                None => self.min = Some(root),
            }
        }

        self.scratch = roots;
    }

    /// Makes `child` a child of `parent`; `child` must currently be a root.
    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.unlink(child);

        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        let first_child = self.nodes[parent].child;
        match first_child {
            Some(first) => self.splice_right(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Inserts `node` into the ring of `anchor`, immediately to its right.
    /// Whatever ring `node` was in before is not updated.
    fn splice_right(&mut self, anchor: NodeId, node: NodeId) {
        let next = self.nodes[anchor].right;
        self.nodes[node].left = anchor;
        self.nodes[node].right = next;
        self.nodes[next].left = node;
        self.nodes[anchor].right = node;
    }

    /// Removes `node` from its ring, leaving it as a singleton ring.
    fn unlink(&mut self, node: NodeId) {
        let (left, right) = (self.nodes[node].left, self.nodes[node].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
    }

    fn collect_ring(&self, start: NodeId, out: &mut Vec<NodeId>) {
        let mut current = start;
        loop {
            out.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }
    }

    /// Like `collect_ring`, but bounded and checking link symmetry
    fn walk_ring(&self, start: NodeId) -> Result<Vec<NodeId>, InvariantViolation> {
        let mut ring = Vec::new();
        let mut current = start;
        loop {
            let node = self.nodes.get(current).ok_or(InvariantViolation::BrokenRing)?;
            let back = self
                .nodes
                .get(node.right)
                .ok_or(InvariantViolation::BrokenRing)?;
            if back.left != current || ring.len() >= self.nodes.len() {
                return Err(InvariantViolation::BrokenRing);
            }
            ring.push(current);
            current = node.right;
            if current == start {
                return Ok(ring);
            }
        }
    }
}

impl<K: Ord> Default for MultiTreeHeap<K> {
    fn default() -> Self {
        <Self as PriorityQueue<K>>::new()
    }
}

impl<K: Ord> Extend<K> for MultiTreeHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for MultiTreeHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for MultiTreeHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiTreeHeap")
            .field("len", &self.len())
            .field("roots", &self.root_degrees().len())
            .field("min", &self.peek_min())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = MultiTreeHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5);
        heap.insert(3);
        heap.insert(7);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.minimum(), Some(&3));

        assert_eq!(heap.extract_min(), Some(3));
        assert_eq!(heap.minimum(), Some(&5));
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_insert_does_not_consolidate() {
        let mut heap = MultiTreeHeap::new();
        heap.extend([4, 2, 6, 8]);

        assert_eq!(heap.root_degrees(), vec![0, 0, 0, 0]);
        assert_eq!(
            heap.validate_consolidated(),
            Err(InvariantViolation::DuplicateRootDegree(0))
        );
    }

    #[test]
    fn test_extract_consolidates_roots() {
        let mut heap: MultiTreeHeap<i32> = (1..=9).collect();

        // 8 remaining nodes link into a single binomial tree of degree 3
        assert_eq!(heap.extract_min(), Some(1));
        assert_eq!(heap.root_degrees(), vec![3]);
        assert!(heap.validate().is_ok());

        // Removing that root leaves trees of degrees 0, 1 and 2
        assert_eq!(heap.extract_min(), Some(2));
        let mut degrees = heap.root_degrees();
        degrees.sort_unstable();
        assert_eq!(degrees, vec![0, 1, 2]);
        assert!(heap.validate_consolidated().is_ok());
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_mixed_scenario() {
        let mut heap = MultiTreeHeap::new();
        for key in [5, 3, 8, 1, 9, 2] {
            heap.insert(key);
        }

        let mut drained = Vec::new();
        while let Some(key) = heap.extract_min() {
            assert!(heap.validate().is_ok());
            assert!(heap.validate_consolidated().is_ok());
            drained.push(key);
        }
        assert_eq!(drained, vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_equal_keys_link_deterministically() {
        let mut heap = MultiTreeHeap::new();
        heap.extend([0, 4, 4]);

        assert_eq!(heap.extract_min(), Some(0));
        assert_eq!(heap.root_degrees(), vec![1]);
        assert_eq!(heap.extract_min(), Some(4));
        assert_eq!(heap.extract_min(), Some(4));
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut heap = MultiTreeHeap::new();
        for round in 0..10 {
            heap.insert(round);
            heap.insert(round + 100);
            assert_eq!(heap.extract_min(), Some(round));
        }
        assert_eq!(heap.len(), 10);
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_validate_detects_heap_order() {
        let mut heap: MultiTreeHeap<i32> = (0..5).collect();
        heap.extract_min();

        let root = heap.min.unwrap();
        let child = heap.nodes[root].child.unwrap();
        heap.nodes[child].key = -1;
        assert_eq!(heap.validate(), Err(InvariantViolation::HeapOrder));
    }

    #[test]
    fn test_validate_detects_degree_mismatch() {
        let mut heap: MultiTreeHeap<i32> = (0..5).collect();
        heap.extract_min();

        let root = heap.min.unwrap();
        heap.nodes[root].degree += 1;
        assert_eq!(heap.validate(), Err(InvariantViolation::DegreeMismatch));
    }

    #[test]
    fn test_with_capacity_does_not_reallocate() {
        let mut heap = MultiTreeHeap::with_capacity(256);
        let reserved = heap.nodes.capacity();
        assert!(reserved >= 256);

        heap.extend(0..256);
        assert_eq!(heap.nodes.capacity(), reserved);

        // The first extraction snapshots the remaining 255 roots
        let scratch = heap.scratch.capacity();
        assert_eq!(heap.extract_min(), Some(0));
        assert_eq!(heap.scratch.capacity(), scratch);
        assert!(heap.validate().is_ok());
    }

    #[test]
    fn test_debug_summary() {
        let heap: MultiTreeHeap<i32> = [3, 1].into_iter().collect();
        let rendered = format!("{:?}", heap);
        assert!(rendered.contains("len: 2"));
        assert!(rendered.contains("min: Some(1)"));
    }
}
