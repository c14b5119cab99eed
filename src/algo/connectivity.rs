use tracing::debug;

use super::*;

pub trait Connectivity: DirectedAdjacencyList + GraphType<Dir = Directed> + Labelled {
    /// Returns the strongly connected components of the graph. Every vertex belongs to
    /// exactly one component; each component is sorted and the components are listed in
    /// topological order of the condensation (no edge leads into an earlier component).
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let mut g: DiGraph<char> = DiGraph::from_edges([('a', 'b'), ('b', 'a'), ('b', 'c')]).unwrap();
    /// g.add_vertex('d').unwrap();
    ///
    /// let mut sccs = g.strongly_connected_components();
    /// sccs.sort();
    /// assert_eq!(sccs, vec![vec!['a', 'b'], vec!['c'], vec!['d']]);
    /// ```
    fn strongly_connected_components(&self) -> Vec<Vec<Self::Label>> {
        StronglyConnected::new(self).compute()
    }
}

impl<G> Connectivity for G where G: DirectedAdjacencyList + GraphType<Dir = Directed> + Labelled {}

/// Kosaraju's algorithm for strongly connected components.
///
/// A first depth-first walk records all nodes in the order they are finished. A second
/// walk over the reversed graph, rooted in decreasing finishing order, then discovers
/// exactly one component per tree.
pub struct StronglyConnected<'a, G> {
    graph: &'a G,
    walk: DfsWalk,
}

impl<'a, G> StronglyConnected<'a, G>
where
    G: DirectedAdjacencyList,
{
    /// Kosaraju with recursive walks
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            walk: DfsWalk::default(),
        }
    }

    /// Selects the depth-first walk used in both passes
    pub fn set_walk(&mut self, walk: DfsWalk) {
        self.walk = walk;
    }

    /// Selects the depth-first walk used in both passes
    pub fn walk(mut self, walk: DfsWalk) -> Self {
        self.set_walk(walk);
        self
    }

    /// Computes the components as node handles in topological order of the condensation;
    /// nodes within a component are in discovery order.
    #[tracing::instrument(skip_all, fields(n = self.graph.number_of_nodes(), walk = ?self.walk))]
    pub fn compute_nodes(&self) -> Vec<Vec<Node>> {
        let mut finished = FinishOrder(Vec::with_capacity(self.graph.len()));
        self.graph
            .traverse(self.walk.into(), self.graph.vertices(), &mut finished);

        let mut components = ComponentCollector::default();
        Reversed::new(self.graph).traverse(
            self.walk.into(),
            finished.0.into_iter().rev(),
            &mut components,
        );

        debug!(components = components.0.len(), "strongly connected components");
        components.0
    }

    /// Computes the components as sorted identifiers (see [`Connectivity::strongly_connected_components`])
    pub fn compute(&self) -> Vec<Vec<G::Label>>
    where
        G: Labelled,
    {
        self.compute_nodes()
            .into_iter()
            .map(|nodes| {
                let mut component = self.graph.labels_of(nodes);
                component.sort_unstable();
                component
            })
            .collect()
    }
}

struct FinishOrder(Vec<Node>);

impl TraversalStrategy for FinishOrder {
    fn on_exit(&mut self, u: Node) {
        self.0.push(u);
    }
}

/// Every tree of the walk is one component
#[derive(Default)]
struct ComponentCollector(Vec<Vec<Node>>);

impl TraversalStrategy for ComponentCollector {
    fn on_root(&mut self, _root: Node) {
        self.0.push(Vec::new());
    }

    fn on_enter(&mut self, u: Node) {
        if let Some(component) = self.0.last_mut() {
            component.push(u);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn example() -> DiGraph<u32> {
        let mut g = DiGraph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 3), (5, 5)])
            .unwrap();
        g.add_vertex(6).unwrap();
        g
    }

    #[test]
    fn components_in_topological_order() {
        init_tracing();

        let g = example();
        for walk in [DfsWalk::Recursive, DfsWalk::Iterative] {
            assert_eq!(
                StronglyConnected::new(&g).walk(walk).compute(),
                vec![vec![6], vec![5], vec![0, 1, 2], vec![3, 4]]
            );
        }
    }

    #[test]
    fn empty_graph() {
        let g: DiGraph<u32> = DiGraph::new();
        assert!(g.strongly_connected_components().is_empty());
    }

    #[test]
    fn directed_tree_has_singletons_only() {
        let g: DiGraph<u32> =
            DiGraph::from_edges([(0, 1), (1, 2), (1, 3), (1, 4), (3, 5), (3, 6)]).unwrap();
        let sccs = g.strongly_connected_components();
        assert_eq!(sccs.len(), 7);
        assert!(sccs.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn random_components_match_reachability() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1234);

        for _ in 0..30 {
            let g = random_digraph(rng, 40, 60);
            let reach = reachability(&g);

            let sccs = StronglyConnected::new(&g).compute_nodes();

            let mut component_of = vec![INVALID_NODE; g.len()];
            for (i, scc) in sccs.iter().enumerate() {
                for &u in scc {
                    assert_eq!(component_of[u as usize], INVALID_NODE);
                    component_of[u as usize] = i as Node;
                }
            }
            assert!(component_of.iter().all(|&c| c != INVALID_NODE));

            for u in g.vertices() {
                for v in g.vertices() {
                    let mutual = reach[u as usize].get_bit(v) && reach[v as usize].get_bit(u);
                    assert_eq!(mutual, component_of[u as usize] == component_of[v as usize]);
                }
            }

            // no edge points into an earlier component
            for Edge(u, v) in g.edges(false) {
                assert!(component_of[u as usize] <= component_of[v as usize]);
            }

            let iterative = StronglyConnected::new(&g)
                .walk(DfsWalk::Iterative)
                .compute_nodes()
                .into_iter()
                .map(|c| c.into_iter().sorted().collect_vec())
                .collect_vec();
            let recursive = sccs
                .into_iter()
                .map(|c| c.into_iter().sorted().collect_vec())
                .collect_vec();
            assert_eq!(iterative, recursive);
        }
    }
}
