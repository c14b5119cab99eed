/*!
Graph traversal engine.

A traversal walks the graph from a sequence of roots and reports what it sees to a
[`TraversalStrategy`] through five hooks. Three interchangeable walks exist:
- [`Walk::Bfs`]: FIFO queue, a node is marked visited when it is **enqueued**,
- [`Walk::DfsIterative`]: explicit stack, a node is marked visited when it is **popped**
  for the first time (later pops of the same node are filtered),
- [`Walk::DfsRecursive`]: native recursion, a node is marked visited on entry.

All walks reach the same set of nodes and report properly nested `on_enter`/`on_exit`
pairs. Both depth-first walks report nodes in the same order, whereas the point in time
at which an edge into an already visited node is reported may differ.

For every scanned edge `(u, v)` exactly one of the following happens:
- `v` was not visited yet: `on_discover_edge(u, v)` fires before `v` is entered,
- `v` was visited in the tree of the **current** root: `on_edge_to_visited(u, v)` fires
  (self-loops, back, forward and cross edges),
- `v` belongs to the tree of an earlier root: nothing is reported.

Roots are processed in the order given. A root already visited by an earlier root is
skipped without any callback; otherwise `on_root` fires before the walk starts.

Algorithms of this crate that build on the engine implement a strategy and choose the
walk, for example strongly connected components, bridges, topological sorting and the
preprocessing of lowest common ancestors.
*/

use std::collections::VecDeque;

use super::*;

/// Callbacks of a traversal; every hook defaults to a no-op.
pub trait TraversalStrategy {
    /// A (not yet visited) root is about to be walked
    fn on_root(&mut self, _root: Node) {}

    /// `u` is entered: for depth-first walks all nodes discovered from `u` are entered and
    /// exited before `u` is exited; for breadth-first walks enter/exit bracket the scan of `u`
    fn on_enter(&mut self, _u: Node) {}

    /// The edge `(u, v)` leads to the unvisited node `v`, which is entered next (depth-first)
    /// or enqueued (breadth-first)
    fn on_discover_edge(&mut self, _u: Node, _v: Node) {}

    /// The edge `(u, v)` leads to `v`, already visited in the current root's tree
    fn on_edge_to_visited(&mut self, _u: Node, _v: Node) {}

    /// All edges of `u` have been scanned
    fn on_exit(&mut self, _u: Node) {}
}

/// The strategy that observes nothing; useful for plain reachability
impl TraversalStrategy for () {}

impl<S: TraversalStrategy + ?Sized> TraversalStrategy for &mut S {
    fn on_root(&mut self, root: Node) {
        (**self).on_root(root)
    }

    fn on_enter(&mut self, u: Node) {
        (**self).on_enter(u)
    }

    fn on_discover_edge(&mut self, u: Node, v: Node) {
        (**self).on_discover_edge(u, v)
    }

    fn on_edge_to_visited(&mut self, u: Node, v: Node) {
        (**self).on_edge_to_visited(u, v)
    }

    fn on_exit(&mut self, u: Node) {
        (**self).on_exit(u)
    }
}

/// Selects the walk used by a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Walk {
    Bfs,
    DfsIterative,
    #[default]
    DfsRecursive,
}

/// Depth-first subset of [`Walk`] for algorithms that rely on a depth-first tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DfsWalk {
    Iterative,
    #[default]
    Recursive,
}

impl From<DfsWalk> for Walk {
    fn from(walk: DfsWalk) -> Self {
        match walk {
            DfsWalk::Iterative => Walk::DfsIterative,
            DfsWalk::Recursive => Walk::DfsRecursive,
        }
    }
}

/// Entries of the explicit stack of [`Walk::DfsIterative`]
#[derive(Debug, Clone, Copy)]
enum Step {
    Enter { node: Node, parent: Node },
    Exit(Node),
}

struct Walker<'a, G, S: ?Sized> {
    graph: &'a G,
    strategy: &'a mut S,
    visited: NodeBitSet,
    /// Sequence number of the root whose tree contains the node
    tree_of: Vec<Node>,
    tree: Node,
}

impl<'a, G, S> Walker<'a, G, S>
where
    G: AdjacencyList,
    S: TraversalStrategy + ?Sized,
{
    fn new(graph: &'a G, strategy: &'a mut S) -> Self {
        Self {
            graph,
            strategy,
            visited: graph.vertex_bitset_unset(),
            tree_of: vec![INVALID_NODE; graph.len()],
            tree: 0,
        }
    }

    fn run<I>(mut self, walk: Walk, roots: I) -> NodeBitSet
    where
        I: IntoIterator<Item = Node>,
    {
        for root in roots {
            if self.visited.get_bit(root) {
                continue;
            }

            self.strategy.on_root(root);
            match walk {
                Walk::Bfs => self.bfs(root),
                Walk::DfsIterative => self.dfs_iterative(root),
                Walk::DfsRecursive => self.dfs_recursive(root),
            }
            self.tree += 1;
        }

        self.visited
    }

    fn mark(&mut self, u: Node) {
        self.visited.set_bit(u);
        self.tree_of[u as usize] = self.tree;
    }

    fn in_current_tree(&self, u: Node) -> bool {
        self.tree_of[u as usize] == self.tree
    }

    /// Reports an edge into a visited node if it stays within the current tree
    fn revisit(&mut self, u: Node, v: Node) {
        if self.in_current_tree(v) {
            self.strategy.on_edge_to_visited(u, v);
        }
    }

    fn bfs(&mut self, root: Node) {
        let graph = self.graph;
        let mut queue = VecDeque::from([root]);
        self.mark(root);

        while let Some(u) = queue.pop_front() {
            self.strategy.on_enter(u);
            for v in graph.neighbors_of(u) {
                if self.visited.get_bit(v) {
                    self.revisit(u, v);
                } else {
                    self.mark(v);
                    self.strategy.on_discover_edge(u, v);
                    queue.push_back(v);
                }
            }
            self.strategy.on_exit(u);
        }
    }

    fn dfs_iterative(&mut self, root: Node) {
        let graph = self.graph;
        let mut stack = vec![Step::Enter {
            node: root,
            parent: INVALID_NODE,
        }];

        while let Some(step) = stack.pop() {
            let (u, parent) = match step {
                Step::Exit(u) => {
                    self.strategy.on_exit(u);
                    continue;
                }
                Step::Enter { node, parent } => (node, parent),
            };

            // pushed more than once; processed by an earlier pop
            if self.visited.get_bit(u) {
                self.revisit(parent, u);
                continue;
            }

            self.mark(u);
            if parent != INVALID_NODE {
                self.strategy.on_discover_edge(parent, u);
            }
            self.strategy.on_enter(u);
            stack.push(Step::Exit(u));

            let first = stack.len();
            for v in graph.neighbors_of(u) {
                if self.visited.get_bit(v) {
                    self.revisit(u, v);
                } else {
                    stack.push(Step::Enter { node: v, parent: u });
                }
            }
            // pop neighbors in adjacency order
            stack[first..].reverse();
        }
    }

    fn dfs_recursive(&mut self, u: Node) {
        let graph = self.graph;
        self.mark(u);
        self.strategy.on_enter(u);

        for v in graph.neighbors_of(u) {
            if self.visited.get_bit(v) {
                self.revisit(u, v);
            } else {
                self.strategy.on_discover_edge(u, v);
                self.dfs_recursive(v);
            }
        }

        self.strategy.on_exit(u);
    }
}

/// Exposes the traversal engine on every graph
pub trait Traversal: AdjacencyList {
    /// Walks the graph from `roots` (in order) using `walk` and reports to `strategy`.
    /// Returns the set of all reached nodes.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// #[derive(Default)]
    /// struct Order(Vec<Node>);
    ///
    /// impl TraversalStrategy for Order {
    ///     fn on_enter(&mut self, u: Node) {
    ///         self.0.push(u);
    ///     }
    /// }
    ///
    /// let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
    ///
    /// let mut order = Order::default();
    /// let reached = g.traverse(Walk::Bfs, [0], &mut order);
    /// assert_eq!(order.0, vec![0, 1, 2, 3]);
    /// assert_eq!(reached.cardinality(), 4);
    ///
    /// let mut order = Order::default();
    /// g.traverse(Walk::DfsIterative, [0], &mut order);
    /// assert_eq!(order.0, vec![0, 1, 3, 2]);
    /// ```
    fn traverse<I, S>(&self, walk: Walk, roots: I, strategy: &mut S) -> NodeBitSet
    where
        I: IntoIterator<Item = Node>,
        S: TraversalStrategy + ?Sized,
    {
        Walker::new(self, strategy).run(walk, roots)
    }

    /// Shorthand for [`Traversal::traverse`] with [`Walk::Bfs`]
    fn bfs_walk<I, S>(&self, roots: I, strategy: &mut S) -> NodeBitSet
    where
        I: IntoIterator<Item = Node>,
        S: TraversalStrategy + ?Sized,
    {
        self.traverse(Walk::Bfs, roots, strategy)
    }

    /// Shorthand for [`Traversal::traverse`] with [`Walk::DfsIterative`]
    fn dfs_walk_iterative<I, S>(&self, roots: I, strategy: &mut S) -> NodeBitSet
    where
        I: IntoIterator<Item = Node>,
        S: TraversalStrategy + ?Sized,
    {
        self.traverse(Walk::DfsIterative, roots, strategy)
    }

    /// Shorthand for [`Traversal::traverse`] with [`Walk::DfsRecursive`]
    fn dfs_walk_recursive<I, S>(&self, roots: I, strategy: &mut S) -> NodeBitSet
    where
        I: IntoIterator<Item = Node>,
        S: TraversalStrategy + ?Sized,
    {
        self.traverse(Walk::DfsRecursive, roots, strategy)
    }

    /// Returns the identifiers of all vertices reachable from `roots`, in the order the
    /// walk enters them
    fn reachable_vertices<'l, I>(
        &self,
        walk: Walk,
        roots: I,
    ) -> Result<Vec<<Self as Labelled>::Label>, <Self as Labelled>::Label>
    where
        Self: Labelled,
        <Self as Labelled>::Label: 'l,
        I: IntoIterator<Item = &'l <Self as Labelled>::Label>,
    {
        let roots = roots
            .into_iter()
            .map(|r| self.try_node_of(r))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order = EnterOrder::default();
        self.traverse(walk, roots, &mut order);
        Ok(self.labels_of(order.0))
    }
}

impl<G: AdjacencyList> Traversal for G {}

#[derive(Default)]
struct EnterOrder(Vec<Node>);

impl TraversalStrategy for EnterOrder {
    fn on_enter(&mut self, u: Node) {
        self.0.push(u);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Root(Node),
        Enter(Node),
        Discover(Node, Node),
        ToVisited(Node, Node),
        Exit(Node),
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl TraversalStrategy for Recorder {
        fn on_root(&mut self, root: Node) {
            self.0.push(Event::Root(root));
        }
        fn on_enter(&mut self, u: Node) {
            self.0.push(Event::Enter(u));
        }
        fn on_discover_edge(&mut self, u: Node, v: Node) {
            self.0.push(Event::Discover(u, v));
        }
        fn on_edge_to_visited(&mut self, u: Node, v: Node) {
            self.0.push(Event::ToVisited(u, v));
        }
        fn on_exit(&mut self, u: Node) {
            self.0.push(Event::Exit(u));
        }
    }

    const WALKS: [Walk; 3] = [Walk::Bfs, Walk::DfsIterative, Walk::DfsRecursive];

    fn record<G: AdjacencyList>(graph: &G, walk: Walk, roots: &[Node]) -> (NodeBitSet, Vec<Event>) {
        let mut recorder = Recorder::default();
        let visited = graph.traverse(walk, roots.iter().copied(), &mut recorder);
        (visited, recorder.0)
    }

    /// Every exit matches the innermost open enter; every node is entered at most once
    fn assert_properly_nested(n: NumNodes, events: &[Event]) {
        let mut open = Vec::new();
        let mut entered = NodeBitSet::new(n);
        for e in events {
            match *e {
                Event::Enter(u) => {
                    assert!(!entered.set_bit(u), "{u} entered twice");
                    open.push(u);
                }
                Event::Exit(u) => assert_eq!(open.pop(), Some(u)),
                Event::Root(_) => assert!(open.is_empty()),
                _ => {}
            }
        }
        assert!(open.is_empty());
    }

    #[test]
    fn no_roots_no_callbacks() {
        let g = bridges_fixture();
        for walk in WALKS {
            let (visited, events) = record(&g, walk, &[]);
            assert_eq!(visited.cardinality(), 0);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn visited_roots_are_skipped() {
        init_tracing();

        let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (1, 2), (3, 4)]).unwrap();
        for walk in WALKS {
            let (visited, events) = record(&g, walk, &[0, 2, 3, 1]);
            let roots = events
                .iter()
                .filter_map(|e| match e {
                    Event::Root(r) => Some(*r),
                    _ => None,
                })
                .collect_vec();

            assert_eq!(roots, vec![0, 3]);
            assert_eq!(visited.cardinality(), 5);
        }
    }

    #[test]
    fn edges_into_earlier_trees_are_silent() {
        let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (2, 1), (2, 2)]).unwrap();
        for walk in WALKS {
            let (_, events) = record(&g, walk, &[0, 2]);
            let to_visited = events
                .iter()
                .filter(|e| matches!(e, Event::ToVisited(..)))
                .collect_vec();
            assert_eq!(to_visited, vec![&Event::ToVisited(2, 2)]);
        }
    }

    #[test]
    fn bfs_marks_on_enqueue() {
        // 0 -> {1, 2}, 1 -> 2: when 1 is scanned, 2 is enqueued but not yet entered
        let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (0, 2), (1, 2)]).unwrap();
        let (_, events) = record(&g, Walk::Bfs, &[0]);
        assert_eq!(
            events,
            vec![
                Event::Root(0),
                Event::Enter(0),
                Event::Discover(0, 1),
                Event::Discover(0, 2),
                Event::Exit(0),
                Event::Enter(1),
                Event::ToVisited(1, 2),
                Event::Exit(1),
                Event::Enter(2),
                Event::Exit(2),
            ]
        );
    }

    #[test]
    fn iterative_dfs_filters_duplicate_pushes() {
        // 2 is pushed by 0 and by 1; it is processed via 1 first
        let g: DiGraph<u32> = DiGraph::from_edges([(0, 1), (0, 2), (1, 2)]).unwrap();
        let (_, events) = record(&g, Walk::DfsIterative, &[0]);
        assert_eq!(
            events,
            vec![
                Event::Root(0),
                Event::Enter(0),
                Event::Discover(0, 1),
                Event::Enter(1),
                Event::Discover(1, 2),
                Event::Enter(2),
                Event::Exit(2),
                Event::Exit(1),
                Event::ToVisited(0, 2),
                Event::Exit(0),
            ]
        );
    }

    #[test]
    fn walks_agree_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xabc);

        for _ in 0..50 {
            let g = random_digraph(rng, 30, 50);
            let roots = [3, 0, 17, 3, 29];

            let runs = WALKS.map(|walk| record(&g, walk, &roots));
            for (visited, events) in &runs {
                assert_eq!(
                    visited.iter_set_bits().collect_vec(),
                    runs[0].0.iter_set_bits().collect_vec()
                );
                assert_properly_nested(g.number_of_nodes(), events);

                // every reached non-root is discovered exactly once
                let discovered = events
                    .iter()
                    .filter(|e| matches!(e, Event::Discover(..)))
                    .count();
                let rooted = events.iter().filter(|e| matches!(e, Event::Root(_))).count();
                assert_eq!(discovered + rooted, visited.cardinality() as usize);
            }

            // both depth-first walks enter, discover and exit in the same order
            let structural = |events: &[Event]| {
                events
                    .iter()
                    .filter(|e| !matches!(e, Event::ToVisited(..)))
                    .copied()
                    .collect_vec()
            };
            assert_eq!(structural(&runs[1].1[..]), structural(&runs[2].1[..]));
        }
    }

    #[test]
    fn reachable_vertices_by_label() {
        let g: DiGraph<&str> = DiGraph::from_edges([("a", "b"), ("b", "c"), ("x", "y")]).unwrap();
        assert_eq!(
            g.reachable_vertices(Walk::DfsRecursive, [&"a"]),
            Ok(vec!["a", "b", "c"])
        );
        assert_eq!(
            g.reachable_vertices(Walk::Bfs, [&"q"]),
            Err(GraphError::UnknownVertex("q"))
        );
    }
}
