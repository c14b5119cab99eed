use tracing::debug;

use super::*;

/// Bridges and articulation points of an undirected graph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CutStructure<V> {
    /// Edges whose removal increases the number of connected components.
    /// Each bridge `(u, v)` satisfies `u <= v`; the list is sorted.
    pub bridges: Vec<(V, V)>,
    /// Vertices whose removal increases the number of connected components (sorted)
    pub articulation_points: Vec<V>,
}

pub trait Bridges: AdjacencyList + GraphType<Dir = Undirected> + Labelled {
    /// Computes bridges and articulation points in a single depth-first walk
    fn compute_cut_structure(&self) -> CutStructure<Self::Label> {
        CutSearch::new(self).compute()
    }

    /// Returns all bridges `(u, v)` with `u <= v` in ascending order
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
    /// assert_eq!(g.compute_bridges(), vec![(2, 3)]);
    /// ```
    fn compute_bridges(&self) -> Vec<(Self::Label, Self::Label)> {
        self.compute_cut_structure().bridges
    }

    /// Returns all articulation points in ascending order
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
    /// assert_eq!(g.compute_articulation_points(), vec![2]);
    /// ```
    fn compute_articulation_points(&self) -> Vec<Self::Label> {
        self.compute_cut_structure().articulation_points
    }
}

impl<G> Bridges for G where G: AdjacencyList + GraphType<Dir = Undirected> + Labelled {}

/// Low-link search for bridges and articulation points.
///
/// For every node `u` the walk computes its depth in the depth-first forest and
/// `low[u]`, the minimum depth reachable from the subtree of `u` using at most one
/// non-tree edge. Then
/// - the tree edge `(parent, u)` is a bridge iff `low[u] == depth[u]`,
/// - a non-root `p` is an articulation point iff it has a child `c` with `low[c] >= depth[p]`,
/// - a root is an articulation point iff it has at least two children.
///
/// Each connected component is rooted independently.
pub struct CutSearch<'a, G> {
    graph: &'a G,
    walk: DfsWalk,
}

impl<'a, G> CutSearch<'a, G>
where
    G: AdjacencyList + GraphType<Dir = Undirected>,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            walk: DfsWalk::default(),
        }
    }

    /// Selects the depth-first walk
    pub fn set_walk(&mut self, walk: DfsWalk) {
        self.walk = walk;
    }

    /// Selects the depth-first walk
    pub fn walk(mut self, walk: DfsWalk) -> Self {
        self.set_walk(walk);
        self
    }

    /// Computes the cut structure on node handles; bridges are normalized and sorted
    #[tracing::instrument(skip_all, fields(n = self.graph.number_of_nodes(), walk = ?self.walk))]
    pub fn compute_nodes(&self) -> CutStructure<Node> {
        let mut low_link = LowLink::new(self.graph.number_of_nodes());
        self.graph
            .traverse(self.walk.into(), self.graph.vertices(), &mut low_link);

        let mut bridges = low_link
            .bridges
            .into_iter()
            .map(|e| {
                let Edge(u, v) = e.normalized();
                (u, v)
            })
            .collect::<Vec<_>>();
        bridges.sort_unstable();

        let articulation_points = low_link.articulation_points.iter_set_bits().collect::<Vec<_>>();

        debug!(
            bridges = bridges.len(),
            articulation_points = articulation_points.len(),
            "cut structure"
        );

        CutStructure {
            bridges,
            articulation_points,
        }
    }

    /// Computes the cut structure on identifiers, sorted by identifier
    pub fn compute(&self) -> CutStructure<G::Label>
    where
        G: Labelled,
    {
        let nodes = self.compute_nodes();

        let mut bridges = nodes
            .bridges
            .into_iter()
            .map(|(u, v)| {
                let (a, b) = (self.graph.label_of(u), self.graph.label_of(v));
                if a <= b {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                }
            })
            .collect::<Vec<_>>();
        bridges.sort_unstable();

        let mut articulation_points = self.graph.labels_of(nodes.articulation_points);
        articulation_points.sort_unstable();

        CutStructure {
            bridges,
            articulation_points,
        }
    }
}

struct LowLink {
    parent: Vec<Node>,
    depth: Vec<Node>,
    low: Vec<Node>,
    children: Vec<NumNodes>,
    bridges: Vec<Edge>,
    articulation_points: NodeBitSet,
}

impl LowLink {
    fn new(n: NumNodes) -> Self {
        Self {
            parent: vec![INVALID_NODE; n as usize],
            depth: vec![0; n as usize],
            low: vec![0; n as usize],
            children: vec![0; n as usize],
            bridges: Vec::new(),
            articulation_points: NodeBitSet::new(n),
        }
    }
}

impl TraversalStrategy for LowLink {
    fn on_root(&mut self, root: Node) {
        self.parent[root as usize] = INVALID_NODE;
        self.depth[root as usize] = 0;
    }

    fn on_discover_edge(&mut self, u: Node, v: Node) {
        self.parent[v as usize] = u;
        self.depth[v as usize] = self.depth[u as usize] + 1;
        self.children[u as usize] += 1;
    }

    fn on_enter(&mut self, u: Node) {
        self.low[u as usize] = self.depth[u as usize];
    }

    fn on_edge_to_visited(&mut self, u: Node, v: Node) {
        if v != self.parent[u as usize] {
            self.low[u as usize] = self.low[u as usize].min(self.depth[v as usize]);
        }
    }

    fn on_exit(&mut self, u: Node) {
        let parent = self.parent[u as usize];
        if parent == INVALID_NODE {
            if self.children[u as usize] >= 2 {
                self.articulation_points.set_bit(u);
            }
            return;
        }

        let low = self.low[u as usize];
        self.low[parent as usize] = self.low[parent as usize].min(low);

        if low == self.depth[u as usize] {
            self.bridges.push(Edge(parent, u));
        }

        if self.parent[parent as usize] != INVALID_NODE && low >= self.depth[parent as usize] {
            self.articulation_points.set_bit(parent);
        }
    }
}
