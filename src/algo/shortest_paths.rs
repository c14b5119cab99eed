/*!
Single-source and all-pairs shortest paths on weighted graphs.

- [`Distances::bellman_ford`] accepts negative weights and rejects reachable negative cycles,
- [`Distances::dijkstra`] requires non-negative weights,
- [`Distances::floyd_warshall`] computes all pairs and does **not** reject negative cycles:
  pairs whose walks can run through one are clamped to `W::min_value()` and reported by
  [`DistanceMatrix::is_unbounded`].

Undirected edges can be used in both directions. Hence, for undirected graphs a single
negative edge already forms a negative cycle.
*/

use fxhash::FxHashMap;
use num::Zero;
use tracing::{debug, trace};

use super::*;

/// Result of a single-source shortest path search.
/// Only vertices reachable from the source have a distance.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V, W> {
    source: V,
    distance: FxHashMap<V, W>,
    predecessor: FxHashMap<V, V>,
}

impl<V: VertexId, W: PartialEq> PartialEq for ShortestPaths<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.distance == other.distance
            && self.predecessor == other.predecessor
    }
}

impl<V: VertexId, W: Eq> Eq for ShortestPaths<V, W> {}

impl<V: VertexId, W: Weight> ShortestPaths<V, W> {
    fn from_nodes<G>(graph: &G, source: Node, distance: Vec<Option<W>>, predecessor: Vec<Node>) -> Self
    where
        G: Labelled<Label = V>,
    {
        let mut result = Self {
            source: graph.label_of(source).clone(),
            distance: FxHashMap::default(),
            predecessor: FxHashMap::default(),
        };

        for (u, d) in distance.into_iter().enumerate() {
            let Some(d) = d else {
                continue;
            };

            let label = graph.label_of(u as Node);
            let p = predecessor[u];
            if p != INVALID_NODE {
                result
                    .predecessor
                    .insert(label.clone(), graph.label_of(p).clone());
            }
            result.distance.insert(label.clone(), d);
        }

        result
    }

    /// Returns the source of the search
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Returns the length of a shortest path from the source to `v`, if `v` is reachable
    pub fn distance(&self, v: &V) -> Option<W> {
        self.distance.get(v).copied()
    }

    /// Returns the distances of all reachable vertices
    pub fn distances(&self) -> &FxHashMap<V, W> {
        &self.distance
    }

    /// Returns *true* if `v` is reachable from the source
    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance.contains_key(v)
    }

    /// Returns the vertices of a shortest path from the source to `target` (both included),
    /// or `None` if `target` is not reachable
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(p) = self.predecessor.get(current) {
            path.push(p.clone());
            current = p;
        }
        path.reverse();

        Some(path)
    }
}

/// All-pairs distances computed by [`Distances::floyd_warshall`]
#[derive(Debug, Clone)]
pub struct DistanceMatrix<V, W> {
    index: FxHashMap<V, Node>,
    n: usize,
    dist: Vec<Option<W>>,
    unbounded: Vec<bool>,
}

impl<V: VertexId, W: Weight> DistanceMatrix<V, W> {
    /// Returns the distance from `a` to `b`; `Ok(None)` if `b` is not reachable from `a`.
    /// Unbounded pairs report `W::min_value()`.
    pub fn get(&self, a: &V, b: &V) -> Result<Option<W>, V> {
        let u = self.node(a)?;
        let v = self.node(b)?;
        Ok(self.dist[u * self.n + v])
    }

    /// Returns *true* if some walk from `a` to `b` passes through a negative cycle
    pub fn is_unbounded(&self, a: &V, b: &V) -> Result<bool, V> {
        let u = self.node(a)?;
        let v = self.node(b)?;
        Ok(self.unbounded[u * self.n + v])
    }

    /// Returns *true* if the graph contains a negative cycle
    pub fn has_negative_cycle(&self) -> bool {
        (0..self.n).any(|u| self.unbounded[u * self.n + u])
    }

    fn node(&self, label: &V) -> Result<usize, V> {
        self.index
            .get(label)
            .map(|&u| u as usize)
            .ok_or_else(|| GraphError::UnknownVertex(label.clone()))
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns *true* if the matrix has no vertices
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

pub trait Distances: WeightedAdjacencyList {
    /// Bellman-Ford: `|V| - 1` relaxation rounds over all edges (stopping early once a round
    /// changes nothing), then one detection round. Fails with [`GraphError::NegativeCycle`]
    /// if a negative cycle is reachable from `source`.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: DiGraph<char, (), i32> =
    ///     DiGraph::from_edges_with([('a', 'b', 4), ('a', 'c', 1), ('c', 'b', -2)]).unwrap();
    ///
    /// let paths = g.bellman_ford(&'a').unwrap();
    /// assert_eq!(paths.distance(&'b'), Some(-1));
    /// assert_eq!(paths.path_to(&'b'), Some(vec!['a', 'c', 'b']));
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.number_of_nodes(), source = ?source))]
    fn bellman_ford(
        &self,
        source: &Self::Label,
    ) -> Result<ShortestPaths<Self::Label, Self::Weight>, Self::Label> {
        let s = self.try_node_of(source)?;
        let adjacency = self.weighted_adjacency()?;

        let mut dist: Vec<Option<Self::Weight>> = vec![None; self.len()];
        let mut pred = vec![INVALID_NODE; self.len()];
        dist[s as usize] = Some(Self::Weight::zero());

        for round in 1..self.len() {
            let mut changed = false;
            for u in self.vertices() {
                let Some(du) = dist[u as usize] else {
                    continue;
                };
                for &(v, w) in &adjacency[u as usize] {
                    let candidate = du + w;
                    if dist[v as usize].is_none_or(|dv| candidate < dv) {
                        dist[v as usize] = Some(candidate);
                        pred[v as usize] = u;
                        changed = true;
                    }
                }
            }

            trace!(round, changed, "relaxation round");
            if !changed {
                break;
            }
        }

        for u in self.vertices() {
            let Some(du) = dist[u as usize] else {
                continue;
            };
            for &(v, w) in &adjacency[u as usize] {
                if dist[v as usize].is_none_or(|dv| du + w < dv) {
                    let vertex = self.label_of(v).clone();
                    debug!(?vertex, "negative cycle detected");
                    return Err(GraphError::NegativeCycle(vertex));
                }
            }
        }

        Ok(ShortestPaths::from_nodes(self, s, dist, pred))
    }

    /// Dijkstra with a min-heap keyed by tentative distance; a vertex is final when it is
    /// popped for the first time. Fails with [`GraphError::NegativeWeight`] if any edge of
    /// the graph has a negative weight.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: UnGraph<u32, (), f64> =
    ///     UnGraph::from_edges_with([(0, 1, 0.5), (1, 2, 0.25), (0, 2, 1.0)]).unwrap();
    ///
    /// let paths = g.dijkstra(&2).unwrap();
    /// assert_eq!(paths.distance(&0), Some(0.75));
    /// assert_eq!(paths.path_to(&0), Some(vec![2, 1, 0]));
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.number_of_nodes(), source = ?source))]
    fn dijkstra(
        &self,
        source: &Self::Label,
    ) -> Result<ShortestPaths<Self::Label, Self::Weight>, Self::Label> {
        let s = self.try_node_of(source)?;
        let adjacency = self.weighted_adjacency()?;

        for u in self.vertices() {
            if let Some(&(v, _)) = adjacency[u as usize].iter().find(|(_, w)| w.is_negative()) {
                let (a, b) = (self.label_of(u).clone(), self.label_of(v).clone());
                debug!(?a, ?b, "negative edge weight");
                return Err(GraphError::NegativeWeight(a, b));
            }
        }

        let mut dist: Vec<Option<Self::Weight>> = vec![None; self.len()];
        let mut pred = vec![INVALID_NODE; self.len()];
        let mut settled = self.vertex_bitset_unset();
        let mut heap = MinHeap::new();

        dist[s as usize] = Some(Self::Weight::zero());
        heap.push(Self::Weight::zero(), s);

        while let Some((du, u)) = heap.pop_min() {
            if settled.set_bit(u) {
                continue;
            }

            for &(v, w) in &adjacency[u as usize] {
                if settled.get_bit(v) {
                    continue;
                }

                let candidate = du + w;
                if dist[v as usize].is_none_or(|dv| candidate < dv) {
                    dist[v as usize] = Some(candidate);
                    pred[v as usize] = u;
                    heap.push(candidate, v);
                }
            }
        }

        debug!(reached = settled.cardinality() as usize, "dijkstra finished");

        Ok(ShortestPaths::from_nodes(self, s, dist, pred))
    }

    /// Floyd-Warshall over all pairs. The diagonal starts at zero (or a lighter self-loop).
    /// Negative cycles are not an error: sums saturate, and every pair with a walk through
    /// a negative cycle is set to `W::min_value()` and marked as unbounded.
    ///
    /// # Examples
    /// ```
    /// use pgraphs::{prelude::*, algo::*};
    ///
    /// let g: DiGraph<u32, (), u64> = DiGraph::from_edges_with([(0, 1, 3), (1, 2, 4)]).unwrap();
    ///
    /// let matrix = g.floyd_warshall().unwrap();
    /// assert_eq!(matrix.get(&0, &2), Ok(Some(7)));
    /// assert_eq!(matrix.get(&2, &0), Ok(None));
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.number_of_nodes()))]
    fn floyd_warshall(&self) -> Result<DistanceMatrix<Self::Label, Self::Weight>, Self::Label> {
        let adjacency = self.weighted_adjacency()?;
        let n = self.len();

        let mut dist: Vec<Option<Self::Weight>> = vec![None; n * n];
        for u in 0..n {
            dist[u * n + u] = Some(Self::Weight::zero());
        }
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &(v, w) in neighbors {
                let entry = &mut dist[u * n + v as usize];
                if entry.is_none_or(|d| w < d) {
                    *entry = Some(w);
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let Some(dik) = dist[i * n + k] else {
                    continue;
                };
                for j in 0..n {
                    let Some(dkj) = dist[k * n + j] else {
                        continue;
                    };
                    let candidate = dik.saturating_sum(dkj);
                    if dist[i * n + j].is_none_or(|dij| candidate < dij) {
                        dist[i * n + j] = Some(candidate);
                    }
                }
            }
        }

        let mut unbounded = vec![false; n * n];
        for k in 0..n {
            if !dist[k * n + k].is_some_and(|d| d.is_negative()) {
                continue;
            }
            for i in 0..n {
                if dist[i * n + k].is_none() {
                    continue;
                }
                for j in 0..n {
                    if dist[k * n + j].is_none() {
                        continue;
                    }
                    unbounded[i * n + j] = true;
                    dist[i * n + j] = Some(<Self::Weight as num::Bounded>::min_value());
                }
            }
        }

        let cycle_pairs = unbounded.iter().filter(|&&x| x).count();
        if cycle_pairs > 0 {
            debug!(cycle_pairs, "negative cycles make pairs unbounded");
        }

        let index = self
            .vertices()
            .map(|u| (self.label_of(u).clone(), u))
            .collect();

        Ok(DistanceMatrix {
            index,
            n,
            dist,
            unbounded,
        })
    }
}

impl<G: WeightedAdjacencyList> Distances for G {}
