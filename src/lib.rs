/*!
`pgraphs` is a library of classical graph algorithms on top of a single generic,
**p**roperty-annotated graph store.

# Representation

A [`Graph<V, VP, EP, D>`](crate::repr::Graph) stores
- vertices identified by any `V: Clone + Eq + Ord + Hash + Debug`, each with an optional property `VP`,
- edges between existing vertices, each with an optional property `EP`,
- either **directed** (`D = Directed`) or **undirected** (`D = Undirected`) semantics.

Internally, every vertex is assigned a dense handle `Node = u32` in the range `0..n` (in
insertion order) and every edge a handle `EdgeId` in `0..m`. All algorithms run on these
handles through the traits of [`ops`] and translate back to identifiers only when
returning results. Hence, algorithms are also available for any other type implementing
the traits.

### Weights

Weighted algorithms read weights from edge properties implementing [`Weighted`](crate::weight::Weighted).
All primitive numbers are weights of themselves, so `DiGraph<&str, (), f64>` is a weighted graph.

# Design

Algorithms are implemented as traits on the graph itself, so that the most common use is a
single method call:
```
use pgraphs::{prelude::*, algo::*};

let g: DiGraph<u32> = DiGraph::from_edges([(1, 2), (2, 1), (2, 3)]).unwrap();
assert_eq!(g.strongly_connected_components(), vec![vec![1, 2], vec![3]]);
```
Where an algorithm can be configured (for example which walk to use), it is additionally
provided as a struct following the *Builder* / *Setter* pattern.

Restrictions on the direction of a graph are enforced at compile time: strongly connected
components are only implemented for directed graphs, bridges only for undirected ones.

All failures are reported as [`GraphError`](crate::error::GraphError) naming the vertices
involved. The library logs through [`tracing`] but never installs a subscriber.

# Usage

In most use-cases, `use pgraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;
pub mod weight;

/// `pgraphs::prelude` includes definitions for nodes and edges, all basic graph operation
/// traits, the graph store and the error type.
pub mod prelude {
    pub use super::{
        edge::*,
        error::GraphError,
        node::*,
        ops::*,
        repr::*,
        weight::{Weight, Weighted},
    };
}
