use std::cell::Cell;

use crate::node::*;

/// Disjoint-set forest over dense handles `0..n` with union by rank and path compression.
///
/// Parent pointers are kept in `Cell`s so that [`UnionFind::find`] can compress paths
/// through a shared reference.
///
/// # Examples
/// ```
/// use pgraphs::utils::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// assert!(uf.union(0, 1));
/// assert!(!uf.union(1, 0));
/// assert!(uf.same_set(0, 1));
/// assert_eq!(uf.size(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: Vec<Cell<Node>>,
    rank: Vec<u8>,
    sets: NumNodes,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n - 1}`
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).map(Cell::new).collect(),
            rank: vec![0; n as usize],
            sets: n,
        }
    }

    /// Registers `u` as a singleton set. Returns *false* if `u` was already an element.
    /// Elements are dense: handles between the previous largest element and `u` become
    /// singletons as well.
    pub fn add(&mut self, u: Node) -> bool {
        if (u as usize) < self.parent.len() {
            return false;
        }

        for v in self.parent.len() as Node..=u {
            self.parent.push(Cell::new(v));
            self.rank.push(0);
            self.sets += 1;
        }
        true
    }

    /// Returns the representative of the set containing `u`.
    /// ** Panics if `u` was never added **
    pub fn find(&self, u: Node) -> Node {
        let mut root = u;
        loop {
            let parent = self.parent[root as usize].get();
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut cur = u;
        while cur != root {
            let next = self.parent[cur as usize].replace(root);
            cur = next;
        }

        root
    }

    /// Merges the sets containing `u` and `v`.
    /// Returns *true* if they were different sets before.
    pub fn union(&mut self, u: Node, v: Node) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }

        let (low, high) = if self.rank[ru as usize] < self.rank[rv as usize] {
            (ru, rv)
        } else {
            (rv, ru)
        };

        self.parent[low as usize].set(high);
        if self.rank[low as usize] == self.rank[high as usize] {
            self.rank[high as usize] += 1;
        }

        self.sets -= 1;
        true
    }

    /// Returns *true* if `u` and `v` are in the same set
    pub fn same_set(&self, u: Node, v: Node) -> bool {
        self.find(u) == self.find(v)
    }

    /// Returns the number of disjoint sets
    pub fn size(&self) -> NumNodes {
        self.sets
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns *true* if there are no elements
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
