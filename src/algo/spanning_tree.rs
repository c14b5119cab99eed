use tracing::debug;

use super::*;

/// Edges of a minimum spanning tree (or forest) and their total weight
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree<V, W> {
    /// Sum of the weights of all selected edges
    pub weight: W,
    /// Selected edges `(u, v, weight)` in the order they were chosen
    pub edges: Vec<(V, V, W)>,
}

impl<W: Weight> SpanningTree<Node, W> {
    fn empty() -> Self {
        Self {
            weight: W::zero(),
            edges: Vec::new(),
        }
    }

    fn push(&mut self, u: Node, v: Node, w: W) {
        self.weight = self.weight + w;
        self.edges.push((u, v, w));
    }

    fn into_labels<G: Labelled>(self, graph: &G) -> SpanningTree<G::Label, W> {
        SpanningTree {
            weight: self.weight,
            edges: self
                .edges
                .into_iter()
                .map(|(u, v, w)| (graph.label_of(u).clone(), graph.label_of(v).clone(), w))
                .collect(),
        }
    }
}

/// Algorithm used by [`SpanningTreeSearch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MstMethod {
    /// Globally lightest edges first, merged with a union-find
    #[default]
    Kruskal,
    /// Grows one tree at a time from a root by its lightest outgoing edge
    Prim,
}

pub trait SpanningTrees: WeightedAdjacencyList + GraphType<Dir = Undirected> {
    /// Kruskal's algorithm. On a disconnected graph the result is a minimum spanning forest.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<char, (), u32> = UnGraph::from_edges_with([
    ///     ('a', 'b', 1), ('b', 'c', 4), ('a', 'c', 2), ('c', 'd', 3),
    /// ]).unwrap();
    ///
    /// let mst = g.kruskal().unwrap();
    /// assert_eq!(mst.weight, 6);
    /// assert_eq!(mst.edges, vec![('a', 'b', 1), ('a', 'c', 2), ('c', 'd', 3)]);
    /// ```
    fn kruskal(&self) -> Result<SpanningTree<Self::Label, Self::Weight>, Self::Label> {
        SpanningTreeSearch::new(self).compute()
    }

    /// Prim's algorithm starting at `source`. Only the component of `source` is spanned.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let mut g: UnGraph<u32, (), f64> =
    ///     UnGraph::from_edges_with([(0, 1, 1.5), (1, 2, 0.5), (0, 2, 1.0)]).unwrap();
    /// g.add_vertex(3).unwrap();
    ///
    /// let mst = g.prim(&2).unwrap();
    /// assert_eq!(mst.weight, 1.5);
    /// assert_eq!(mst.edges, vec![(2, 1, 0.5), (2, 0, 1.0)]);
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.number_of_nodes(), source = ?source))]
    fn prim(
        &self,
        source: &Self::Label,
    ) -> Result<SpanningTree<Self::Label, Self::Weight>, Self::Label> {
        let s = self.try_node_of(source)?;
        let adjacency = self.weighted_adjacency()?;
        let tree = prim(self, &adjacency, [s]);

        debug!(edges = tree.edges.len(), "prim");
        Ok(tree.into_labels(self))
    }
}

impl<G> SpanningTrees for G where G: WeightedAdjacencyList + GraphType<Dir = Undirected> {}

/// Minimum spanning forest of an undirected weighted graph.
///
/// With [`MstMethod::Prim`] every vertex not yet spanned starts a new tree (in node
/// order), so both methods span all components and agree on the total weight.
pub struct SpanningTreeSearch<'a, G> {
    graph: &'a G,
    method: MstMethod,
}

impl<'a, G> SpanningTreeSearch<'a, G>
where
    G: WeightedAdjacencyList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            method: MstMethod::default(),
        }
    }

    /// Selects the algorithm
    pub fn set_method(&mut self, method: MstMethod) {
        self.method = method;
    }

    /// Selects the algorithm
    pub fn method(mut self, method: MstMethod) -> Self {
        self.set_method(method);
        self
    }

    /// Computes the spanning forest on node handles
    #[tracing::instrument(skip_all, fields(n = self.graph.number_of_nodes(), method = ?self.method))]
    pub fn compute_nodes(&self) -> Result<SpanningTree<Node, G::Weight>, G::Label> {
        let adjacency = self.graph.weighted_adjacency()?;

        let tree = match self.method {
            MstMethod::Kruskal => kruskal(self.graph, &adjacency),
            MstMethod::Prim => prim(self.graph, &adjacency, self.graph.vertices()),
        };

        debug!(edges = tree.edges.len(), "spanning forest");
        Ok(tree)
    }

    /// Computes the spanning forest on identifiers
    pub fn compute(&self) -> Result<SpanningTree<G::Label, G::Weight>, G::Label> {
        Ok(self.compute_nodes()?.into_labels(self.graph))
    }
}

fn kruskal<G, W>(graph: &G, adjacency: &[Vec<(Node, W)>]) -> SpanningTree<Node, W>
where
    G: GraphNodeOrder,
    W: Weight,
{
    // every undirected edge appears in both lists; loops never join two components
    let mut queue: MinHeap<W, Edge> = adjacency
        .iter()
        .enumerate()
        .flat_map(|(u, neighbors)| {
            let u = u as Node;
            neighbors
                .iter()
                .filter(move |&&(v, _)| u < v)
                .map(move |&(v, w)| (w, Edge(u, v)))
        })
        .collect();

    let mut components = UnionFind::new(graph.number_of_nodes());
    let mut tree = SpanningTree::empty();

    while components.size() > 1 {
        let Some((w, Edge(u, v))) = queue.pop_min() else {
            break;
        };

        if components.union(u, v) {
            tree.push(u, v, w);
        }
    }

    tree
}

fn prim<G, W, I>(graph: &G, adjacency: &[Vec<(Node, W)>], roots: I) -> SpanningTree<Node, W>
where
    G: GraphNodeOrder,
    W: Weight,
    I: IntoIterator<Item = Node>,
{
    let mut settled = graph.vertex_bitset_unset();
    let mut candidates: MinHeap<W, (Node, Node)> = MinHeap::new();
    let mut tree = SpanningTree::empty();

    for root in roots {
        if settled.set_bit(root) {
            continue;
        }
        candidates.extend(
            adjacency[root as usize]
                .iter()
                .map(|&(v, w)| (w, (v, root))),
        );

        while let Some((w, (v, via))) = candidates.pop_min() {
            if settled.set_bit(v) {
                continue;
            }
            tree.push(via, v, w);

            candidates.extend(
                adjacency[v as usize]
                    .iter()
                    .filter(|&&(x, _)| !settled.get_bit(x))
                    .map(|&(x, wx)| (wx, (x, v))),
            );
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn is_spanning_forest<G: AdjacencyList>(graph: &G, tree: &SpanningTree<Node, i64>) -> bool {
        let mut forest = UnionFind::new(graph.number_of_nodes());
        let acyclic = tree.edges.iter().all(|&(u, v, _)| forest.union(u, v));

        let mut reach = UnionFind::new(graph.number_of_nodes());
        for Edge(u, v) in graph.edges(true) {
            reach.union(u, v);
        }

        acyclic && forest.size() == reach.size()
    }

    #[test]
    fn square_with_diagonal() {
        let g: UnGraph<char, (), i32> = UnGraph::from_edges_with([
            ('a', 'b', 1),
            ('b', 'c', 2),
            ('c', 'd', 1),
            ('d', 'a', 3),
            ('a', 'c', 2),
        ])
        .unwrap();

        for method in [MstMethod::Kruskal, MstMethod::Prim] {
            let mst = SpanningTreeSearch::new(&g).method(method).compute().unwrap();
            assert_eq!(mst.weight, 4);
            assert_eq!(mst.edges.len(), 3);
            assert!(mst.edges.iter().all(|&(_, _, w)| w < 3));
        }
    }

    #[test]
    fn disconnected_input() {
        init_tracing();

        let mut g: UnGraph<u32, (), i64> =
            UnGraph::from_edges_with([(0, 1, 5), (1, 2, 1), (3, 4, 2), (4, 4, -9)]).unwrap();
        g.add_vertex(5).unwrap();

        let forest = g.kruskal().unwrap();
        assert_eq!(forest.weight, 8);
        assert_eq!(forest.edges.len(), 3);

        let tree = g.prim(&4).unwrap();
        assert_eq!(tree.edges, vec![(4, 3, 2)]);

        assert!(g.prim(&5).unwrap().edges.is_empty());
        assert_eq!(g.prim(&7), Err(GraphError::UnknownVertex(7)));
    }

    #[test]
    fn empty_and_unweighted() {
        let g: UnGraph<u32, (), u8> = UnGraph::new();
        assert_eq!(g.kruskal().unwrap().weight, 0);

        let mut g: UnGraph<u32, (), u8> = UnGraph::with_vertices([0, 1]).unwrap();
        g.add_edge(&0, &1).unwrap();
        assert_eq!(g.kruskal(), Err(GraphError::MissingWeight(0, 1)));
    }

    #[test]
    fn random_kruskal_and_prim_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x357);

        for _ in 0..20 {
            let g = random_connected_ungraph(rng, 25, 50, -10..30);

            let kruskal = SpanningTreeSearch::new(&g).compute_nodes().unwrap();
            assert_eq!(kruskal.edges.len(), 24);
            assert!(is_spanning_forest(&g, &kruskal));

            for source in 0..25u32 {
                let prim = g.prim(&source).unwrap();
                assert_eq!(prim.weight, kruskal.weight);
                assert_eq!(prim.edges.len(), 24);
            }
        }
    }

    #[test]
    fn random_forests() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x358);

        for _ in 0..20 {
            let g = random_weighted_ungraph(rng, 30, 25, 0..10);

            let kruskal = SpanningTreeSearch::new(&g).compute_nodes().unwrap();
            let prim = SpanningTreeSearch::new(&g)
                .method(MstMethod::Prim)
                .compute_nodes()
                .unwrap();

            assert!(is_spanning_forest(&g, &kruskal));
            assert!(is_spanning_forest(&g, &prim));
            assert_eq!(kruskal.weight, prim.weight);
        }
    }
}
