use crate::prelude::*;

/// Zero-copy view of a directed graph in which every edge is flipped:
/// out-neighbors of the view are in-neighbors of the wrapped graph and vice versa.
pub struct Reversed<'a, G> {
    graph: &'a G,
}

impl<G> Clone for Reversed<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for Reversed<'_, G> {}

impl<'a, G> Reversed<'a, G> {
    /// Wraps a directed graph
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// Returns the wrapped graph
    pub fn inner(&self) -> &'a G {
        self.graph
    }
}

impl<G> GraphType for Reversed<'_, G>
where
    G: GraphType<Dir = Directed>,
{
    type Dir = Directed;
}

impl<G: GraphNodeOrder> GraphNodeOrder for Reversed<'_, G> {
    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }
}

impl<G: GraphEdgeOrder> GraphEdgeOrder for Reversed<'_, G> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl<G: DirectedAdjacencyList> AdjacencyList for Reversed<'_, G> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.graph.in_neighbors_of(u)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.graph.in_degree_of(u)
    }
}

impl<G: DirectedAdjacencyList> DirectedAdjacencyList for Reversed<'_, G> {
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.graph.out_neighbors_of(u)
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        self.graph.out_degree_of(u)
    }
}

impl<G: AdjacencyTest> AdjacencyTest for Reversed<'_, G> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.graph.has_edge(v, u)
    }
}

impl<G: Labelled> Labelled for Reversed<'_, G> {
    type Label = G::Label;

    fn label_of(&self, u: Node) -> &Self::Label {
        self.graph.label_of(u)
    }

    fn node_of(&self, label: &Self::Label) -> Option<Node> {
        self.graph.node_of(label)
    }
}
