//! Disjoint-set structure backing the clustering traversals.
//!
//! Sequential union-find with iterative path compression and union by rank.
//! Each traversal constructs and owns its own instance, so no interior
//! mutability or locking is needed; the parent table always forms a forest
//! and `find` terminates for every in-range index.

use super::ClusterError;

/// Tracks a partition of `0..len` into disjoint components.
///
/// # Examples
/// ```
/// use cumulo_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4);
/// assert_eq!(set.components(), 4);
/// assert!(set.union(0, 1)?);
/// assert!(!set.union(1, 0)?);
/// assert_eq!(set.components(), 3);
/// assert_eq!(set.find(0)?, set.find(1)?);
/// # Ok::<(), cumulo_core::ClusterError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parents: Vec<usize>,
    ranks: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates a partition of `len` singleton components.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parents: (0..len).collect(),
            ranks: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of elements in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns whether the partition contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the current number of distinct components.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the representative of `index`'s component.
    ///
    /// Every node visited on the way to the root is re-pointed directly at
    /// the root, so repeated lookups amortise to near-constant time. The
    /// compression loop is iterative; no chain length can exhaust the stack.
    ///
    /// # Errors
    /// Returns [`ClusterError::IndexOutOfRange`] when `index >= len`.
    pub fn find(&mut self, index: usize) -> Result<usize, ClusterError> {
        if index >= self.parents.len() {
            return Err(ClusterError::IndexOutOfRange {
                index,
                len: self.parents.len(),
            });
        }
        Ok(self.compress_to_root(index))
    }

    /// Merges the components containing `left` and `right`.
    ///
    /// Union by rank: the root of the lower-ranked tree is attached under the
    /// root of the higher-ranked tree. On a rank tie the root of `right`'s
    /// tree becomes the new root and its rank increments by exactly one, so
    /// the outcome is deterministic. A successful merge decrements the live
    /// component count by exactly one.
    ///
    /// Returns `true` when a merge occurred and `false` when both indices
    /// were already in the same component (no state change).
    ///
    /// # Errors
    /// Returns [`ClusterError::IndexOutOfRange`] when either index is out of
    /// bounds.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, ClusterError> {
        let left_root = self.find(left)?;
        let right_root = self.find(right)?;

        if left_root == right_root {
            return Ok(false);
        }

        if self.ranks[left_root] > self.ranks[right_root] {
            self.parents[right_root] = left_root;
        } else {
            if self.ranks[left_root] == self.ranks[right_root] {
                self.ranks[right_root] += 1;
            }
            self.parents[left_root] = right_root;
        }

        self.components -= 1;
        Ok(true)
    }

    /// Returns the size of every current component.
    ///
    /// One entry per distinct root; the order is unspecified. The sizes
    /// always sum to [`Self::len`].
    pub fn component_sizes(&mut self) -> Vec<usize> {
        let mut tally = vec![0usize; self.parents.len()];
        for index in 0..self.parents.len() {
            let root = self.compress_to_root(index);
            tally[root] += 1;
        }

        tally.into_iter().filter(|&size| size > 0).collect()
    }

    /// Finds `index`'s root and compresses the chain behind it.
    ///
    /// Callers guarantee `index < self.parents.len()`.
    fn compress_to_root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = index;
        while current != root {
            let parent = self.parents[current];
            self.parents[current] = root;
            current = parent;
        }

        root
    }
}
