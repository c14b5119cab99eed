/*!
# Errors

All fallible operations of this crate report a [`GraphError`], generic over the vertex
identifier so that every failure names the vertices involved.

The variants fall into three groups:
- **structural**: a vertex or edge is unknown, duplicated, or lacks the weight a
  weighted algorithm needs;
- **precondition**: the input violates an algorithm's contract (negative weights for
  Dijkstra, vertices outside the LCA tree, a non-bipartite matching input);
- **infeasibility**: the algorithm discovered that no result exists (a cycle for
  topological sorting, a reachable negative cycle for Bellman-Ford).
*/

use std::fmt::Debug;

use thiserror::Error;

/// Failure of a graph operation or algorithm
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V: Debug> {
    #[error("vertex {0:?} is not part of the graph")]
    UnknownVertex(V),

    #[error("vertex {0:?} already exists")]
    DuplicateVertex(V),

    #[error("edge ({0:?}, {1:?}) is not part of the graph")]
    UnknownEdge(V, V),

    #[error("edge ({0:?}, {1:?}) already exists")]
    DuplicateEdge(V, V),

    #[error("edge ({0:?}, {1:?}) has no weight")]
    MissingWeight(V, V),

    #[error("edge ({0:?}, {1:?}) has a negative weight")]
    NegativeWeight(V, V),

    #[error("vertices {0:?} and {1:?} are not in the same tree")]
    NotInSameTree(V, V),

    #[error("edge ({0:?}, {1:?}) does not cross the bipartition")]
    NotBipartite(V, V),

    #[error("graph contains a cycle through vertex {0:?}")]
    CycleDetected(V),

    #[error("negative cycle reachable through vertex {0:?}")]
    NegativeCycle(V),
}

/// Shorthand used throughout the crate
pub type Result<T, V> = std::result::Result<T, GraphError<V>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_vertices() {
        let err: GraphError<&str> = GraphError::DuplicateEdge("a", "b");
        assert_eq!(err.to_string(), "edge (\"a\", \"b\") already exists");

        let err: GraphError<u32> = GraphError::NegativeCycle(3);
        assert_eq!(err.to_string(), "negative cycle reachable through vertex 3");
    }
}
