//! Dense node identifiers.
//!
//! Every distinct node identity (distinct under the graph's [`Comparer`](crate::Comparer))
//! is assigned a [`NodeId`] the first time it is passed to [`Graph::add`](crate::Graph::add).
//! Identifiers are handed out sequentially from 0, so they double as indices into the flat
//! per-node arrays the analyses work on, and their order is the graph's node enumeration order.

use std::fmt;

/// A dense, strongly-typed index of a node inside one graph.
///
/// `NodeId` wraps a `usize`. A smaller id means the identity was referenced
/// earlier: within a single `add(from, to)` call `from` is interned before `to`.
///
/// `NodeId` values are only meaningful for the graph that produced them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index value of this node identifier.
    ///
    /// Use it to index into vectors that store per-node data.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}
