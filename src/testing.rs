//! Fixture graphs and seeded random graph builders shared by the unit tests.
//! Random graphs label vertex `i` by `i as u32`, so labels and nodes coincide
//! unless stated otherwise.

use std::ops::Range;

use rand::{Rng, seq::SliceRandom};
use tracing_subscriber::EnvFilter;

use crate::prelude::*;

/// Routes log output of the calling test through the test harness, filtered by `RUST_LOG`.
/// Only the first call per process installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Graph on `0..n` with up to `m` random edges (duplicates are dropped, loops are kept)
pub fn random_graph<D, EP, R, F>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
    mut property: F,
) -> Graph<u32, (), EP, D>
where
    D: Direction,
    R: Rng,
    F: FnMut(&mut R) -> EP,
{
    let mut graph = Graph::with_vertices(0..n).unwrap();
    for _ in 0..m {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if !graph.contains_edge(&u, &v) {
            let p = property(&mut *rng);
            graph.add_edge_with(&u, &v, p).unwrap();
        }
    }
    graph
}

pub fn random_digraph<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> DiGraph<u32, (), ()> {
    random_graph(rng, n, m, |_| ())
}

pub fn random_ungraph<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> UnGraph<u32, (), ()> {
    random_graph(rng, n, m, |_| ())
}

pub fn random_weighted_digraph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
    weights: Range<i64>,
) -> DiGraph<u32, (), i64> {
    random_graph(rng, n, m, |rng| rng.random_range(weights.clone()))
}

pub fn random_weighted_ungraph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    m: NumEdges,
    weights: Range<i64>,
) -> UnGraph<u32, (), i64> {
    random_graph(rng, n, m, |rng| rng.random_range(weights.clone()))
}

/// Connected weighted graph: a random spanning tree plus `extra` random edges
pub fn random_connected_ungraph<R: Rng>(
    rng: &mut R,
    n: NumNodes,
    extra: NumEdges,
    weights: Range<i64>,
) -> UnGraph<u32, (), i64> {
    let mut graph = random_weighted_ungraph(rng, n, extra, weights.clone());
    for v in 1..n {
        let u = rng.random_range(0..v);
        if !graph.contains_edge(&u, &v) {
            graph
                .add_edge_with(&u, &v, rng.random_range(weights.clone()))
                .unwrap();
        }
    }
    graph
}

/// Random tree on `0..n`; vertices are inserted in shuffled order so that labels
/// and nodes differ
pub fn random_tree<R: Rng>(rng: &mut R, n: NumNodes) -> UnGraph<u32> {
    let mut ids = (0..n).collect::<Vec<_>>();
    ids.shuffle(rng);

    let mut graph = UnGraph::with_vertices(ids).unwrap();
    for v in 1..n {
        let u = rng.random_range(0..v);
        graph.add_edge(&u, &v).unwrap();
    }
    graph
}

/// Random DAG on `0..n` whose edges point from smaller to larger label; vertices are
/// inserted in shuffled order so that nodes are not already sorted
pub fn random_dag<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> DiGraph<u32> {
    let mut ids = (0..n).collect::<Vec<_>>();
    ids.shuffle(rng);

    let mut graph = DiGraph::with_vertices(ids).unwrap();
    for _ in 0..m {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        if u != v {
            let (u, v) = (u.min(v), u.max(v));
            if !graph.contains_edge(&u, &v) {
                graph.add_edge(&u, &v).unwrap();
            }
        }
    }
    graph
}

/// Random bipartite graph with sides `0..a` and `a..a + b`
pub fn random_bipartite<R: Rng>(rng: &mut R, a: NumNodes, b: NumNodes, m: NumEdges) -> UnGraph<u32> {
    let mut graph = UnGraph::with_vertices(0..a + b).unwrap();
    for _ in 0..m {
        let u = rng.random_range(0..a);
        let v = rng.random_range(a..a + b);
        if !graph.contains_edge(&u, &v) {
            graph.add_edge(&u, &v).unwrap();
        }
    }
    graph
}

/// Directed weighted graph on `{1, ..., 9}`; from `1` every vertex except `2` is
/// reachable with distances `{1: 0, 4: 7, 5: 8, 6: 12, 7: 12, 8: 10, 3: 17, 9: 13}`
pub fn shortest_path_fixture() -> DiGraph<u32, (), i64> {
    let mut graph = DiGraph::with_vertices([1, 2, 4, 7, 5, 3, 6, 8, 9]).unwrap();
    for (u, v, w) in [
        (1, 4, 7),
        (1, 7, 12),
        (4, 5, 1),
        (4, 3, 10),
        (5, 6, 4),
        (5, 8, 2),
        (7, 5, 2),
        (7, 8, 6),
        (8, 9, 3),
        (9, 6, 1),
        (6, 3, 9),
        (2, 4, 1),
        (2, 9, 2),
    ] {
        graph.add_edge_with(&u, &v, w).unwrap();
    }
    graph
}

/// Undirected graph on `0..12` with bridges `{0, 7}, {5, 6}` and articulation
/// points `0, 1, 5, 7`
pub fn bridges_fixture() -> UnGraph<u32> {
    UnGraph::from_edges([
        (0, 1),
        (0, 2),
        (0, 7),
        (1, 2),
        (1, 3),
        (1, 4),
        (3, 5),
        (4, 5),
        (5, 6),
        (7, 8),
        (7, 9),
        (7, 11),
        (8, 9),
        (9, 10),
        (9, 11),
        (10, 11),
    ])
    .unwrap()
}

/// Naive reachability matrix: `reach[u]` contains all nodes reachable from `u`
pub fn reachability<G: AdjacencyList>(graph: &G) -> Vec<NodeBitSet> {
    graph
        .vertices()
        .map(|u| {
            let mut reached = graph.vertex_bitset_unset();
            let mut stack = vec![u];
            reached.set_bit(u);
            while let Some(x) = stack.pop() {
                for y in graph.neighbors_of(x) {
                    if !reached.set_bit(y) {
                        stack.push(y);
                    }
                }
            }
            reached
        })
        .collect()
}

mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    /// Node-level adjacency must match a naive adjacency matrix built from the edge list
    fn assert_adjacency_matches<D: Direction>(graph: &Graph<u32, (), (), D>) {
        let n = graph.number_of_nodes();
        let mut matrix = vec![NodeBitSet::new(n); n as usize];
        for (u, v) in graph.edge_list() {
            let (u, v) = (graph.node_of(u).unwrap(), graph.node_of(v).unwrap());
            matrix[u as usize].set_bit(v);
            if D::is_directed() {
                continue;
            }
            matrix[v as usize].set_bit(u);
        }

        for u in graph.vertices() {
            assert_eq!(
                graph.neighbors_of(u).sorted().collect_vec(),
                matrix[u as usize].iter_set_bits().collect_vec()
            );
            assert_eq!(graph.degree_of(u), matrix[u as usize].cardinality() as NumNodes);
            for v in graph.vertices() {
                assert_eq!(graph.has_edge(u, v), matrix[u as usize].get_bit(v));
            }
        }
    }

    #[test]
    fn random_graphs_are_consistent() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for n in [1, 10, 30] {
            for m in [0, n, 4 * n] {
                assert_adjacency_matches(&random_digraph(rng, n, m));
                assert_adjacency_matches(&random_ungraph(rng, n, m));
            }
        }
    }

    #[test]
    fn in_neighbors_invert_out_neighbors() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let g = random_digraph(rng, 25, 80);
        for u in g.vertices() {
            for v in g.in_neighbors_of(u) {
                assert!(g.has_edge(v, u));
            }
        }
        assert_eq!(
            g.in_degrees().iter().map(|&d| d as usize).sum::<usize>(),
            g.number_of_edges() as usize
        );
    }

    #[test]
    fn fixtures_have_expected_size() {
        let g = shortest_path_fixture();
        assert_eq!(g.number_of_nodes(), 9);
        assert_eq!(g.number_of_edges(), 13);

        let g = bridges_fixture();
        assert_eq!(g.number_of_nodes(), 12);
        assert_eq!(g.number_of_edges(), 16);
    }
}
