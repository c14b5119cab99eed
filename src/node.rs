/*!
# Node Handles

Vertices of a [`Graph`](crate::repr::Graph) carry arbitrary identifiers, but every
algorithm in this crate runs on dense handles `Node = u32` in the range `0..n`,
assigned in insertion order. Identifiers are translated to handles (and back) only at
the API boundary, see [`Labelled`](crate::ops::Labelled).
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Dense vertex handle in `0..n`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper to assign a constant value (often)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}
