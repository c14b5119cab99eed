/*!
# Matching Algorithms

Maximum-cardinality matchings in bipartite graphs via **Hopcroft-Karp**.

A *matching* is a set of edges without shared endpoints. Given the groups `A` and `B`
of a bipartite graph, Hopcroft-Karp repeats phases until no augmenting path is left:
1. a breadth-first search from all free `A` vertices assigns layers, and stops growing
   once a free `B` vertex is reached,
2. a depth-first search from every free `A` vertex follows the layers to free `B`
   vertices and flips every augmenting path it finds.
*/

use std::collections::VecDeque;

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// A matching as a symmetric map: if `a` is matched to `b`, then `b` is matched to `a`
#[derive(Debug, Clone, Default)]
pub struct Matching<V> {
    partner: FxHashMap<V, V>,
}

impl<V: VertexId> PartialEq for Matching<V> {
    fn eq(&self, other: &Self) -> bool {
        self.partner == other.partner
    }
}

impl<V: VertexId> Eq for Matching<V> {}

impl<V: VertexId> Matching<V> {
    /// Returns the vertex `v` is matched to
    pub fn partner(&self, v: &V) -> Option<&V> {
        self.partner.get(v)
    }

    /// Returns *true* if `v` is matched
    pub fn is_matched(&self, v: &V) -> bool {
        self.partner.contains_key(v)
    }

    /// Returns all matched pairs `(a, b)` with `a < b` in ascending order
    pub fn pairs(&self) -> Vec<(V, V)> {
        self.partner
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| (a.clone(), b.clone()))
            .sorted()
            .collect()
    }

    /// Returns the number of matched pairs
    pub fn len(&self) -> usize {
        self.partner.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partner.is_empty()
    }

    /// Returns the symmetric map of partners
    pub fn as_map(&self) -> &FxHashMap<V, V> {
        &self.partner
    }
}

pub trait BipartiteMatching: AdjacencyList + GraphType<Dir = Undirected> + Labelled {
    /// Computes a maximum matching of a bipartite graph. The groups are derived by
    /// 2-colouring, see [`BipartiteTest::compute_bipartition`]; fails with
    /// [`GraphError::NotBipartite`] if the graph has an odd cycle.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32> = UnGraph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
    ///
    /// let matching = g.maximum_matching().unwrap();
    /// assert_eq!(matching.pairs(), vec![(0, 1), (2, 3)]);
    /// assert_eq!(matching.partner(&3), Some(&2));
    /// ```
    fn maximum_matching(&self) -> Result<Matching<Self::Label>, Self::Label> {
        let right = self.compute_bipartition()?;
        let mut hk = HopcroftKarp::new(self, right);
        hk.run();
        Ok(hk.matching())
    }

    /// Computes a maximum matching where `a_side` is group `A` and all other vertices form
    /// group `B`. Fails with [`GraphError::UnknownVertex`] for identifiers not in the graph
    /// and with [`GraphError::NotBipartite`] for an edge that does not cross the groups.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<&str> = UnGraph::from_edges([
    ///     ("ann", "db"), ("bob", "db"), ("bob", "web"), ("cid", "web"),
    /// ]).unwrap();
    ///
    /// let matching = g.maximum_matching_with_group(&["ann", "bob", "cid"]).unwrap();
    /// assert_eq!(matching.len(), 2);
    ///
    /// assert_eq!(
    ///     g.maximum_matching_with_group(&["ann", "db"]),
    ///     Err(GraphError::NotBipartite("ann", "db"))
    /// );
    /// ```
    fn maximum_matching_with_group<'l, I>(
        &self,
        a_side: I,
    ) -> Result<Matching<Self::Label>, Self::Label>
    where
        Self::Label: 'l,
        I: IntoIterator<Item = &'l Self::Label>,
    {
        let mut left = self.vertex_bitset_unset();
        for a in a_side {
            left.set_bit(self.try_node_of(a)?);
        }
        let right = NodeBitSet::new_with_bits_set(
            self.number_of_nodes(),
            self.vertices().filter(|&u| !left.get_bit(u)),
        );

        if let Some(Edge(u, v)) = self.first_violation(&right) {
            let (a, b) = (self.label_of(u).clone(), self.label_of(v).clone());
            debug!(?a, ?b, "edge within a group");
            return Err(GraphError::NotBipartite(a, b));
        }

        let mut hk = HopcroftKarp::new(self, right);
        hk.run();
        Ok(hk.matching())
    }
}

impl<G> BipartiteMatching for G where G: AdjacencyList + GraphType<Dir = Undirected> + Labelled {}

/// State of Hopcroft-Karp on node handles.
///
/// Every edge must cross the bipartition; nodes in `right` form group `B`.
pub struct HopcroftKarp<'a, G> {
    graph: &'a G,
    right: NodeBitSet,
    mate: Vec<Option<OptionalNode>>,
    /// BFS layer of `A` nodes; `INVALID_NODE` if not layered in this phase
    layer: Vec<Node>,
    /// Layer at which free `B` nodes were reached in this phase
    free_layer: Node,
    /// `A` nodes from which no augmenting path exists in this phase
    dead: NodeBitSet,
}

impl<'a, G> HopcroftKarp<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G, right: NodeBitSet) -> Self {
        Self {
            graph,
            right,
            mate: vec![None; graph.len()],
            layer: vec![INVALID_NODE; graph.len()],
            free_layer: INVALID_NODE,
            dead: graph.vertex_bitset_unset(),
        }
    }

    /// Runs phases until no augmenting path is left
    #[tracing::instrument(skip_all, fields(n = self.graph.number_of_nodes()))]
    pub fn run(&mut self) {
        let mut phases = 0;
        while self.phase() > 0 {
            phases += 1;
        }
        debug!(phases, size = self.size(), "maximum matching");
    }

    /// Runs a single phase and returns the number of augmenting paths applied
    pub fn phase(&mut self) -> NumNodes {
        if !self.build_layers() {
            return 0;
        }

        self.dead = self.graph.vertex_bitset_unset();
        let mut augmented = 0;
        for u in self.graph.vertices() {
            if self.is_free_left(u) && self.augment(u) {
                augmented += 1;
            }
        }

        trace!(augmented, layers = self.free_layer, "phase");
        augmented
    }

    /// Returns the partner of `u`, if matched
    pub fn mate(&self, u: Node) -> Option<Node> {
        self.mate[u as usize].map(|m| m.get())
    }

    fn pair(&mut self, u: Node, v: Node) {
        self.mate[u as usize] = OptionalNode::new(v);
        self.mate[v as usize] = OptionalNode::new(u);
    }

    /// Returns the number of matched pairs
    pub fn size(&self) -> NumNodes {
        self.mate.iter().filter(|m| m.is_some()).count() as NumNodes / 2
    }

    /// Translates the current matching to identifiers
    pub fn matching(&self) -> Matching<G::Label>
    where
        G: Labelled,
    {
        let partner = self
            .mate
            .iter()
            .enumerate()
            .filter_map(|(u, m)| {
                m.map(|v| {
                    (
                        self.graph.label_of(u as Node).clone(),
                        self.graph.label_of(v.get()).clone(),
                    )
                })
            })
            .collect();

        Matching { partner }
    }

    fn is_free_left(&self, u: Node) -> bool {
        !self.right.get_bit(u) && self.mate[u as usize].is_none()
    }

    /// Layers `A` nodes by alternating distance from the free `A` nodes; returns *true*
    /// if a free `B` node is reachable
    fn build_layers(&mut self) -> bool {
        let graph = self.graph;
        self.layer.fill(INVALID_NODE);
        self.free_layer = INVALID_NODE;

        let mut queue = VecDeque::new();
        for u in graph.vertices() {
            if self.is_free_left(u) {
                self.layer[u as usize] = 0;
                queue.push_back(u);
            }
        }

        while let Some(u) = queue.pop_front() {
            let next = self.layer[u as usize] + 1;
            if next > self.free_layer {
                break;
            }

            for v in graph.neighbors_of(u) {
                match self.mate(v) {
                    None => self.free_layer = self.free_layer.min(next),
                    Some(w) => {
                        if self.layer[w as usize] == INVALID_NODE {
                            self.layer[w as usize] = next;
                            queue.push_back(w);
                        }
                    }
                }
            }
        }

        self.free_layer != INVALID_NODE
    }

    /// Searches an augmenting path from the `A` node `u` along the layers and flips it
    fn augment(&mut self, u: Node) -> bool {
        let graph = self.graph;
        let next = self.layer[u as usize] + 1;

        for v in graph.neighbors_of(u) {
            let found = match self.mate(v) {
                None => next == self.free_layer,
                Some(w) => {
                    self.layer[w as usize] == next && !self.dead.get_bit(w) && self.augment(w)
                }
            };

            if found {
                self.pair(u, v);
                return true;
            }
        }

        self.dead.set_bit(u);
        false
    }
}
