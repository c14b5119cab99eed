use std::{fmt::Debug, hash::Hash, ops::Range};

use itertools::Itertools;

use crate::{edge::*, error::*, node::*, weight::Weight};

/// Requirements on the identifiers of vertices.
///
/// Identifiers are opaque to the algorithms; equality and ordering of vertices are
/// those of their identifiers.
pub trait VertexId: Clone + Eq + Ord + Hash + Debug {}

impl<T> VertexId for T where T: Clone + Eq + Ord + Hash + Debug {}

/// Marker for the orientation semantics of a graph
pub trait Direction: Clone + Copy + Default + Debug {
    /// Returns *true* if the edge `(u, v)` differs from `(v, u)`
    fn is_directed() -> bool;
}

/// Edges have an orientation: `(u, v)` and `(v, u)` are distinct
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Directed;

/// Edges have no orientation: `(u, v)` and `(v, u)` denote the same edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

impl Direction for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl Direction for Undirected {
    fn is_directed() -> bool {
        false
    }
}

/// Associates a graph with its [`Direction`].
///
/// Algorithms restricted to one kind of graph bound on `GraphType<Dir = Directed>`
/// or `GraphType<Dir = Undirected>`, so misuse is rejected at compile time.
pub trait GraphType {
    type Dir: Direction;

    /// Returns *true* if the graph is directed
    fn is_directed() -> bool {
        Self::Dir::is_directed()
    }

    /// Returns *true* if the graph is undirected
    fn is_undirected() -> bool {
        !Self::is_directed()
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over all node handles.
    /// The range does not borrow `self`.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn has_no_edges(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, this is the out-neighborhood
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`.
    /// A self-loop is listed once and thus counts once.
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.vertices().map(|u| self.degree_of(u)).max().unwrap_or(0)
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in the graph in sorted order.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted().collect_vec()
    }
}

macro_rules! propagate {
    ($out_fn:ident => $fn:ident($($arg:ident : $type:ty),*) -> $ret:ty) => {
        #[inline]
        fn $out_fn(&self, $($arg: $type),*) -> $ret {
            self.$fn($($arg),*)
        }
    };
}

/// Adjacency getters that only make sense for directed graphs
pub trait DirectedAdjacencyList: AdjacencyList {
    propagate!(out_neighbors_of => neighbors_of(u : Node) -> impl Iterator<Item = Node> + '_);
    propagate!(out_degree_of => degree_of(u : Node) -> NumNodes);

    /// Returns an iterator over nodes `v` with edges `(v, u)`
    /// ** Panics if `u >= n` **
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of incoming neighbors of a given vertex
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumNodes;

    /// Returns the out-degree and in-degree of a given vertex
    /// ** Panics if `u >= n` **
    #[inline]
    fn total_degree_of(&self, u: Node) -> NumNodes {
        self.out_degree_of(u) + self.in_degree_of(u)
    }

    /// Returns the in-degree of every node, indexed by node
    fn in_degrees(&self) -> Vec<NumNodes> {
        self.vertices().map(|u| self.in_degree_of(u)).collect()
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Translation between node handles and the identifiers callers know vertices by
pub trait Labelled: GraphNodeOrder {
    type Label: VertexId;

    /// Returns the identifier of a node handle
    /// ** Panics if `u >= n` **
    fn label_of(&self, u: Node) -> &Self::Label;

    /// Returns the handle of an identifier, if the vertex exists
    fn node_of(&self, label: &Self::Label) -> Option<Node>;

    /// Returns the handle of an identifier or [`GraphError::UnknownVertex`]
    fn try_node_of(&self, label: &Self::Label) -> Result<Node, Self::Label> {
        self.node_of(label)
            .ok_or_else(|| GraphError::UnknownVertex(label.clone()))
    }

    /// Clones the identifiers of a sequence of nodes
    fn labels_of<I>(&self, nodes: I) -> Vec<Self::Label>
    where
        I: IntoIterator<Item = Node>,
    {
        nodes.into_iter().map(|u| self.label_of(u).clone()).collect()
    }

    /// Returns a ranking of all nodes by ascending identifier: `rank[u]` is the
    /// position of `u` if all vertices were sorted by their identifiers.
    fn label_ranks(&self) -> Vec<NumNodes> {
        let mut rank = vec![0; self.len()];
        for (r, u) in self
            .vertices()
            .sorted_by(|&a, &b| self.label_of(a).cmp(self.label_of(b)))
            .enumerate()
        {
            rank[u as usize] = r as NumNodes;
        }
        rank
    }
}

/// Adjacency whose edges carry numeric weights.
///
/// Edges without a property yield `None`; weighted algorithms reject such graphs
/// via [`WeightedAdjacencyList::weighted_adjacency`].
pub trait WeightedAdjacencyList: AdjacencyList + Labelled {
    type Weight: Weight;

    /// Returns an iterator over `(neighbor, weight)` of the outgoing edges of `u`.
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(
        &self,
        u: Node,
    ) -> impl Iterator<Item = (Node, Option<Self::Weight>)> + '_;

    /// Materializes the weighted adjacency of all nodes, or fails with
    /// [`GraphError::MissingWeight`] on the first edge without weight.
    fn weighted_adjacency(&self) -> Result<Vec<Vec<(Node, Self::Weight)>>, Self::Label> {
        self.vertices()
            .map(|u| {
                self.weighted_neighbors_of(u)
                    .map(|(v, w)| {
                        w.map(|w| (v, w)).ok_or_else(|| {
                            GraphError::MissingWeight(
                                self.label_of(u).clone(),
                                self.label_of(v).clone(),
                            )
                        })
                    })
                    .collect()
            })
            .collect()
    }
}
