/*!
# Bipartite Graphs

Testing whether an undirected graph is bipartite and computing a bipartition.

A bipartition is represented by a [`NodeBitSet`]:
- nodes **not** in the set are on the left side (group A),
- nodes in the set are on the right side (group B).
*/

use tracing::debug;

use super::*;

pub trait BipartiteTest: AdjacencyList + GraphType<Dir = Undirected> + Labelled {
    /// Tests whether every edge of the graph crosses the given bipartition.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
    /// assert!(g.is_bipartition(&NodeBitSet::new_with_bits_set(4, [1 as Node, 3])));
    /// assert!(!g.is_bipartition(&NodeBitSet::new_with_bits_set(4, [1 as Node, 2])));
    /// ```
    fn is_bipartition(&self, bipartition: &NodeBitSet) -> bool {
        self.first_violation(bipartition).is_none()
    }

    /// Computes a bipartition by 2-colouring a breadth-first forest (every root on the
    /// left side) or fails with [`GraphError::NotBipartite`] naming an edge inside one side.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 0)]).unwrap();
    /// assert!(matches!(g.compute_bipartition(), Err(GraphError::NotBipartite(_, _))));
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.number_of_nodes()))]
    fn compute_bipartition(&self) -> Result<NodeBitSet, Self::Label> {
        let mut colouring = Colouring(self.vertex_bitset_unset());
        self.bfs_walk(self.vertices(), &mut colouring);

        match self.first_violation(&colouring.0) {
            None => Ok(colouring.0),
            Some(Edge(u, v)) => {
                let (a, b) = (self.label_of(u).clone(), self.label_of(v).clone());
                debug!(?a, ?b, "odd cycle");
                Err(GraphError::NotBipartite(a, b))
            }
        }
    }

    /// Returns both sides of a bipartition as sorted identifiers: (left, right)
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<char> = UnGraph::from_edges([('x', 'a'), ('a', 'y'), ('b', 'y')]).unwrap();
    /// assert_eq!(g.bipartition(), Ok((vec!['x', 'y'], vec!['a', 'b'])));
    /// ```
    fn bipartition(&self) -> Result<(Vec<Self::Label>, Vec<Self::Label>), Self::Label> {
        let right = self.compute_bipartition()?;
        let (right, left): (Vec<Node>, Vec<Node>) =
            self.vertices().partition(|&u| right.get_bit(u));

        let mut left = self.labels_of(left);
        let mut right = self.labels_of(right);
        left.sort_unstable();
        right.sort_unstable();

        Ok((left, right))
    }

    /// Returns *true* if the graph admits a bipartition
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    /// assert!(g.is_bipartite());
    /// ```
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_ok()
    }

    /// Returns the first edge (in node order) whose endpoints are on the same side
    fn first_violation(&self, bipartition: &NodeBitSet) -> Option<Edge> {
        self.edges(true)
            .find(|&Edge(u, v)| bipartition.get_bit(u) == bipartition.get_bit(v))
    }
}

impl<G> BipartiteTest for G where G: AdjacencyList + GraphType<Dir = Undirected> + Labelled {}

/// Every discovered node gets the side opposite to its parent
struct Colouring(NodeBitSet);

impl TraversalStrategy for Colouring {
    fn on_discover_edge(&mut self, u: Node, v: Node) {
        if !self.0.get_bit(u) {
            self.0.set_bit(v);
        }
    }
}
