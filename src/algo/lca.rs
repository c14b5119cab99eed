/*!
# Lowest Common Ancestors

Binary lifting over the depth-first tree of a rooted tree.

The preprocessing walks the tree once from its root, recording enter/exit timestamps
(an Euler tour) and the parent of every node. From the parents it builds the table
`ancestor[v][k]`, the `2^k`-th ancestor of `v` (the root is its own ancestor).

A query first checks whether one vertex is an ancestor of the other by comparing their
timestamp intervals. Otherwise it lifts `a` to the highest ancestor that is **not** an
ancestor of `b`; the parent of that vertex is the answer.

If the graph is not a tree, queries refer to the depth-first tree rooted at `root`.
*/

use tracing::debug;

use super::*;

/// Answers lowest-common-ancestor queries on the tree reachable from a root
pub struct LowestCommonAncestor<'a, G> {
    graph: &'a G,
    root: Node,
    enter: Vec<Node>,
    exit: Vec<Node>,
    levels: usize,
    /// `ancestor[v * levels + k]` is the `2^k`-th ancestor of `v`
    ancestor: Vec<Node>,
}

impl<'a, G> LowestCommonAncestor<'a, G>
where
    G: AdjacencyList + Labelled,
{
    /// Preprocesses the tree rooted at `root` using a recursive walk
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// //        1
    /// //      /   \
    /// //     2     3
    /// //    / \
    /// //   4   5
    /// let g: UnGraph<u32> = UnGraph::from_edges([(1, 2), (1, 3), (2, 4), (2, 5)]).unwrap();
    ///
    /// let lca = LowestCommonAncestor::new(&g, &1).unwrap();
    /// assert_eq!(lca.lca(&4, &5), Ok(2));
    /// assert_eq!(lca.lca(&4, &3), Ok(1));
    /// assert_eq!(lca.lca(&2, &5), Ok(2));
    /// ```
    pub fn new(graph: &'a G, root: &G::Label) -> Result<Self, G::Label> {
        Self::with_walk(graph, root, DfsWalk::Recursive)
    }

    /// Preprocesses the tree rooted at `root` using the given depth-first walk
    #[tracing::instrument(skip_all, fields(n = graph.number_of_nodes(), root = ?root, walk = ?walk))]
    pub fn with_walk(graph: &'a G, root: &G::Label, walk: DfsWalk) -> Result<Self, G::Label> {
        let root = graph.try_node_of(root)?;

        let mut tour = EulerTour::new(graph.number_of_nodes());
        let reached = graph.traverse(walk.into(), [root], &mut tour);
        tour.parent[root as usize] = root;

        // 2^(levels - 1) exceeds every depth
        let levels = graph.len().max(1).next_power_of_two().trailing_zeros() as usize + 2;

        let mut ancestor = vec![INVALID_NODE; graph.len() * levels];
        for v in reached.iter_set_bits() {
            ancestor[v as usize * levels] = tour.parent[v as usize];
        }
        for k in 1..levels {
            for v in reached.iter_set_bits() {
                let half = ancestor[v as usize * levels + k - 1];
                ancestor[v as usize * levels + k] = ancestor[half as usize * levels + k - 1];
            }
        }

        debug!(reached = reached.cardinality() as usize, levels, "lifting table");

        Ok(Self {
            graph,
            root,
            enter: tour.enter,
            exit: tour.exit,
            levels,
            ancestor,
        })
    }

    /// Returns the root of the tree
    pub fn root(&self) -> &G::Label {
        self.graph.label_of(self.root)
    }

    /// Returns *true* if `v` belongs to the tree
    pub fn contains(&self, v: Node) -> bool {
        self.enter[v as usize] != INVALID_NODE
    }

    /// Returns *true* if `a` is an ancestor of `b` (every node is its own ancestor).
    /// Both nodes must belong to the tree.
    pub fn is_ancestor(&self, a: Node, b: Node) -> bool {
        self.enter[a as usize] <= self.enter[b as usize]
            && self.exit[b as usize] <= self.exit[a as usize]
    }

    /// Returns the lowest common ancestor of two nodes of the tree
    /// ** Panics if a node does not belong to the tree **
    pub fn lca_nodes(&self, a: Node, b: Node) -> Node {
        assert!(self.contains(a) && self.contains(b));

        if self.is_ancestor(a, b) {
            return a;
        }
        if self.is_ancestor(b, a) {
            return b;
        }

        let mut a = a;
        for k in (0..self.levels).rev() {
            let up = self.ancestor[a as usize * self.levels + k];
            if !self.is_ancestor(up, b) {
                a = up;
            }
        }
        self.ancestor[a as usize * self.levels]
    }

    /// Returns the lowest common ancestor of `a` and `b`. Fails with
    /// [`GraphError::UnknownVertex`] if a vertex is not in the graph and with
    /// [`GraphError::NotInSameTree`] if a vertex is not reachable from the root.
    pub fn lca(&self, a: &G::Label, b: &G::Label) -> Result<G::Label, G::Label> {
        let u = self.graph.try_node_of(a)?;
        let v = self.graph.try_node_of(b)?;

        if !self.contains(u) || !self.contains(v) {
            debug!(?a, ?b, "query outside of the tree");
            return Err(GraphError::NotInSameTree(a.clone(), b.clone()));
        }

        Ok(self.graph.label_of(self.lca_nodes(u, v)).clone())
    }
}

struct EulerTour {
    time: Node,
    enter: Vec<Node>,
    exit: Vec<Node>,
    parent: Vec<Node>,
}

impl EulerTour {
    fn new(n: NumNodes) -> Self {
        Self {
            time: 0,
            enter: vec![INVALID_NODE; n as usize],
            exit: vec![INVALID_NODE; n as usize],
            parent: vec![INVALID_NODE; n as usize],
        }
    }
}

impl TraversalStrategy for EulerTour {
    fn on_discover_edge(&mut self, u: Node, v: Node) {
        self.parent[v as usize] = u;
    }

    fn on_enter(&mut self, u: Node) {
        self.enter[u as usize] = self.time;
        self.time += 1;
    }

    fn on_exit(&mut self, u: Node) {
        self.exit[u as usize] = self.time;
        self.time += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;
    use std::collections::VecDeque;

    /// Parents and depths by breadth-first search from `root`
    fn naive_tree<G: AdjacencyList>(g: &G, root: Node) -> (Vec<Node>, Vec<NumNodes>) {
        let mut parent = vec![INVALID_NODE; g.len()];
        let mut depth = vec![0; g.len()];
        parent[root as usize] = root;

        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for v in g.neighbors_of(u) {
                if parent[v as usize] == INVALID_NODE {
                    parent[v as usize] = u;
                    depth[v as usize] = depth[u as usize] + 1;
                    queue.push_back(v);
                }
            }
        }

        (parent, depth)
    }

    fn naive_lca(parent: &[Node], depth: &[NumNodes], mut a: Node, mut b: Node) -> Node {
        while a != b {
            if depth[a as usize] >= depth[b as usize] {
                a = parent[a as usize];
            } else {
                b = parent[b as usize];
            }
        }
        a
    }

    fn example() -> UnGraph<u32> {
        UnGraph::from_edges([(1, 2), (1, 3), (2, 4), (2, 5), (3, 6), (5, 7)]).unwrap()
    }

    #[test]
    fn small_tree() {
        let g = example();
        for walk in [DfsWalk::Recursive, DfsWalk::Iterative] {
            let lca = LowestCommonAncestor::with_walk(&g, &1, walk).unwrap();
            assert_eq!(lca.root(), &1);
            assert_eq!(lca.lca(&4, &7), Ok(2));
            assert_eq!(lca.lca(&7, &6), Ok(1));
            assert_eq!(lca.lca(&5, &7), Ok(5));
            assert_eq!(lca.lca(&1, &1), Ok(1));
        }

        // rerooting changes the answers
        let lca = LowestCommonAncestor::new(&g, &7).unwrap();
        assert_eq!(lca.lca(&4, &6), Ok(2));
        assert_eq!(lca.lca(&1, &5), Ok(5));
    }

    #[test]
    fn directed_tree() {
        let g: DiGraph<&str> =
            DiGraph::from_edges([("r", "a"), ("r", "b"), ("a", "c"), ("a", "d")]).unwrap();
        let lca = LowestCommonAncestor::new(&g, &"r").unwrap();
        assert_eq!(lca.lca(&"c", &"d"), Ok("a"));
        assert_eq!(lca.lca(&"c", &"b"), Ok("r"));

        // only the subtree below the root is part of the tree
        let lca = LowestCommonAncestor::new(&g, &"a").unwrap();
        assert_eq!(lca.lca(&"c", &"d"), Ok("a"));
        assert_eq!(lca.lca(&"c", &"b"), Err(GraphError::NotInSameTree("c", "b")));
    }

    #[test]
    fn errors() {
        init_tracing();

        let mut g = example();
        g.add_vertex(9).unwrap();

        assert!(matches!(
            LowestCommonAncestor::new(&g, &0),
            Err(GraphError::UnknownVertex(0))
        ));

        let lca = LowestCommonAncestor::new(&g, &1).unwrap();
        assert_eq!(lca.lca(&4, &0), Err(GraphError::UnknownVertex(0)));
        assert_eq!(lca.lca(&9, &4), Err(GraphError::NotInSameTree(9, 4)));

        let single = LowestCommonAncestor::new(&g, &9).unwrap();
        assert_eq!(single.lca(&9, &9), Ok(9));
    }

    #[test]
    fn random_trees_match_naive() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x1ca);

        for n in [1, 2, 3, 17, 64, 65, 150] {
            let g = random_tree(rng, n);
            let root = rng.random_range(0..n);
            let (parent, depth) = naive_tree(&g, root);

            let recursive = LowestCommonAncestor::new(&g, g.label_of(root)).unwrap();
            let iterative =
                LowestCommonAncestor::with_walk(&g, g.label_of(root), DfsWalk::Iterative).unwrap();

            for _ in 0..300 {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);

                let expected = naive_lca(&parent, &depth, a, b);
                assert_eq!(recursive.lca_nodes(a, b), expected);
                assert_eq!(recursive.lca_nodes(b, a), expected);
                assert_eq!(iterative.lca_nodes(a, b), expected);
                assert_eq!(recursive.lca_nodes(a, a), a);

                assert_eq!(
                    recursive.lca(g.label_of(a), g.label_of(b)),
                    Ok(*g.label_of(expected))
                );
            }
        }
    }
}
