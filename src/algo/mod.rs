/*!
# Graph Algorithms

This module provides a suite of **graph algorithms** built on top of the [`Graph`](crate::repr::Graph) store.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use pgraphs::algo::*;
```
and gain access to traversal, connectivity, shortest paths, spanning trees, matching and
ancestor queries.

Algorithms are exposed as traits implemented for every graph that provides the required
adjacency (see [`ops`](crate::ops)); most of them take and return vertex identifiers.
Configurable algorithms are additionally exposed as structs with setters.
*/

mod bipartite;
mod bridges;
mod connectivity;
mod lca;
mod matching;
mod shortest_paths;
mod spanning_tree;
mod topological;
mod traversal;

use crate::{error::*, prelude::*, utils::*};

pub use bipartite::*;
pub use bridges::*;
pub use connectivity::*;
pub use lca::*;
pub use matching::*;
pub use shortest_paths::*;
pub use spanning_tree::*;
pub use topological::*;
pub use traversal::*;
