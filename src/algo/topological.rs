use itertools::Itertools;
use tracing::debug;

use super::*;

/// Algorithm used by [`TopologicalSort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopoMethod {
    /// Repeatedly removes the smallest vertex without incoming edges
    #[default]
    Kahn,
    /// Reversed finishing order of a depth-first walk
    Dfs,
}

pub trait TopologicalSorting: DirectedAdjacencyList + GraphType<Dir = Directed> + Labelled {
    /// Kahn's algorithm; among several vertices without remaining incoming edges the
    /// smallest identifier is removed first. Fails with [`GraphError::CycleDetected`]
    /// naming a vertex on a cycle.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: DiGraph<u32> = DiGraph::from_edges([(3, 1), (1, 2), (0, 2)]).unwrap();
    /// assert_eq!(g.topological_sort(), Ok(vec![0, 3, 1, 2]));
    ///
    /// let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (1, 0)]).unwrap();
    /// assert!(g.topological_sort().is_err());
    /// ```
    fn topological_sort(&self) -> Result<Vec<Self::Label>, Self::Label> {
        TopologicalSort::new(self).compute()
    }

    /// Depth-first variant: roots are tried in descending identifier order and the
    /// finishing order is reversed. Fails with [`GraphError::CycleDetected`] as soon as an
    /// edge leads back into a vertex that has not been exited yet.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: DiGraph<u32> = DiGraph::from_edges([(3, 1), (1, 2), (0, 2)]).unwrap();
    /// assert_eq!(g.topological_sort_dfs(), Ok(vec![0, 3, 1, 2]));
    ///
    /// let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (1, 1)]).unwrap();
    /// assert_eq!(g.topological_sort_dfs(), Err(GraphError::CycleDetected(1)));
    /// ```
    fn topological_sort_dfs(&self) -> Result<Vec<Self::Label>, Self::Label> {
        TopologicalSort::new(self).method(TopoMethod::Dfs).compute()
    }
}

impl<G> TopologicalSorting for G where G: DirectedAdjacencyList + GraphType<Dir = Directed> + Labelled {}

/// Topological ordering of a directed graph
pub struct TopologicalSort<'a, G> {
    graph: &'a G,
    method: TopoMethod,
    walk: DfsWalk,
}

impl<'a, G> TopologicalSort<'a, G>
where
    G: DirectedAdjacencyList + Labelled,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            method: TopoMethod::default(),
            walk: DfsWalk::default(),
        }
    }

    /// Selects the algorithm
    pub fn set_method(&mut self, method: TopoMethod) {
        self.method = method;
    }

    /// Selects the algorithm
    pub fn method(mut self, method: TopoMethod) -> Self {
        self.set_method(method);
        self
    }

    /// Selects the walk of [`TopoMethod::Dfs`]
    pub fn set_walk(&mut self, walk: DfsWalk) {
        self.walk = walk;
    }

    /// Selects the walk of [`TopoMethod::Dfs`]
    pub fn walk(mut self, walk: DfsWalk) -> Self {
        self.set_walk(walk);
        self
    }

    /// Computes the order on node handles
    #[tracing::instrument(skip_all, fields(n = self.graph.number_of_nodes(), method = ?self.method))]
    pub fn compute_nodes(&self) -> Result<Vec<Node>, G::Label> {
        let result = match self.method {
            TopoMethod::Kahn => self.kahn(),
            TopoMethod::Dfs => self.dfs(),
        };

        result.map_err(|u| {
            let vertex = self.graph.label_of(u).clone();
            debug!(?vertex, "cycle detected");
            GraphError::CycleDetected(vertex)
        })
    }

    /// Computes the order on identifiers
    pub fn compute(&self) -> Result<Vec<G::Label>, G::Label> {
        Ok(self.graph.labels_of(self.compute_nodes()?))
    }

    /// On failure returns a node on a cycle
    fn kahn(&self) -> std::result::Result<Vec<Node>, Node> {
        let graph = self.graph;
        let rank = graph.label_ranks();
        let mut in_degree = graph.in_degrees();

        let mut ready: MinHeap<NumNodes, Node> = graph
            .vertices()
            .filter(|&u| in_degree[u as usize] == 0)
            .map(|u| (rank[u as usize], u))
            .collect();

        let mut order = Vec::with_capacity(graph.len());
        while let Some((_, u)) = ready.pop_min() {
            order.push(u);
            for v in graph.neighbors_of(u) {
                in_degree[v as usize] -= 1;
                if in_degree[v as usize] == 0 {
                    ready.push(rank[v as usize], v);
                }
            }
        }

        if order.len() == graph.len() {
            return Ok(order);
        }

        // every remaining node keeps a remaining predecessor; walking backwards
        // `n` times ends on a cycle
        let Some(mut u) = graph.vertices().find(|&u| in_degree[u as usize] > 0) else {
            return Ok(order);
        };
        for _ in graph.vertices() {
            u = graph
                .in_neighbors_of(u)
                .find(|&p| in_degree[p as usize] > 0)
                .unwrap_or(u);
        }
        Err(u)
    }

    fn dfs(&self) -> std::result::Result<Vec<Node>, Node> {
        let graph = self.graph;
        let roots = graph
            .vertices()
            .sorted_unstable_by(|&a, &b| graph.label_of(b).cmp(graph.label_of(a)));

        let mut post_order = PostOrder::new(graph.number_of_nodes());
        graph.traverse(self.walk.into(), roots, &mut post_order);

        match post_order.cycle {
            Some(u) => Err(u),
            None => {
                post_order.order.reverse();
                Ok(post_order.order)
            }
        }
    }
}

struct PostOrder {
    order: Vec<Node>,
    in_progress: NodeBitSet,
    cycle: Option<Node>,
}

impl PostOrder {
    fn new(n: NumNodes) -> Self {
        Self {
            order: Vec::with_capacity(n as usize),
            in_progress: NodeBitSet::new(n),
            cycle: None,
        }
    }
}

impl TraversalStrategy for PostOrder {
    fn on_enter(&mut self, u: Node) {
        self.in_progress.set_bit(u);
    }

    fn on_edge_to_visited(&mut self, _u: Node, v: Node) {
        if self.cycle.is_none() && self.in_progress.get_bit(v) {
            self.cycle = Some(v);
        }
    }

    fn on_exit(&mut self, u: Node) {
        self.in_progress.clear_bit(u);
        self.order.push(u);
    }
}
