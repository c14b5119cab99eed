/*!
# Utilities

Small containers the algorithms are built on:
- [`UnionFind`]: a disjoint-set forest over node handles (Kruskal),
- [`MinHeap`]: a min-priority-queue with deterministic tie-breaking (Dijkstra, Prim,
  Kruskal's edge ordering, Kahn's topological sort).

You probably do not need to interact with this module directly.
*/

mod heap;
mod union_find;

pub use heap::MinHeap;
pub use union_find::UnionFind;
