//! Per-analysis node state.
//!
//! Every analysis starts by snapshotting the graph into an [`Arena`]: a compressed
//! adjacency layout (targets of node `i` are `targets[offsets[i]..offsets[i + 1]]`) plus one
//! [`NodeState`] and one [`EdgeFlags`] per edge. All transient algorithm fields live here,
//! indexed by [`NodeId`], so the traversals only ever need `&mut Arena` and never alias the
//! graph's shared storage.

use std::ops::Range;

use bitflags::bitflags;

use crate::graph::NodeId;

bitflags! {
    /// Transient state bits of a node during an analysis.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub(crate) struct NodeFlags: u8 {
        /// Node is the target of at least one edge and therefore not a root candidate
        const DESCENDANT = 0x01;
        /// Node is on the Tarjan stack
        const ON_STACK = 0x02;
        /// Tarjan DFS has been started on this node
        const VISIT_STARTED = 0x04;
        /// Exit discovery has run over this node's edges
        const EXITS_COMPUTED = 0x08;
    }
}

bitflags! {
    /// Transient state bits of a single edge during an analysis.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub(crate) struct EdgeFlags: u8 {
        /// Exit discovery already crossed this edge
        const EXITS_SEARCHED = 0x01;
    }
}

/// Tarjan numbering, cycle membership and exits of one node.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeState {
    /// Discovery index, valid once `VISIT_STARTED` is set
    pub(crate) index: usize,
    /// Smallest index reachable through the DFS subtree and one back edge
    pub(crate) low_link: usize,
    /// Root of this node's SCC, assigned when the node leaves the stack
    pub(crate) representative: Option<NodeId>,
    /// Targets of edges leaving this node's SCC (representatives only)
    pub(crate) exits: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
}

/// Flat, index-addressed working set of one analysis.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    offsets: Vec<usize>,
    targets: Vec<NodeId>,
    pub(crate) edge_flags: Vec<EdgeFlags>,
    pub(crate) nodes: Vec<NodeState>,
}

impl Arena {
    /// Starts an arena for `node_count` nodes and roughly `edge_count` edges.
    ///
    /// Nodes must then be pushed in `NodeId` order with [`Arena::push_node`].
    pub(crate) fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        Self {
            offsets,
            targets: Vec::with_capacity(edge_count),
            edge_flags: Vec::with_capacity(edge_count),
            nodes: Vec::with_capacity(node_count),
        }
    }

    /// Appends the next node with its successors.
    pub(crate) fn push_node(&mut self, successors: &[NodeId], descendant: bool) {
        self.targets.extend_from_slice(successors);
        self.edge_flags.resize(self.targets.len(), EdgeFlags::empty());
        self.offsets.push(self.targets.len());

        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::DESCENDANT, descendant);
        self.nodes.push(NodeState {
            flags,
            ..NodeState::default()
        });
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Edge slots of `node`; index with [`Arena::target`] and `edge_flags`.
    pub(crate) fn edges(&self, node: NodeId) -> Range<usize> {
        self.offsets[node.index()]..self.offsets[node.index() + 1]
    }

    pub(crate) fn target(&self, edge: usize) -> NodeId {
        self.targets[edge]
    }

    pub(crate) fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.targets[self.edges(node)]
    }

    pub(crate) fn state(&self, node: NodeId) -> &NodeState {
        &self.nodes[node.index()]
    }

    pub(crate) fn state_mut(&mut self, node: NodeId) -> &mut NodeState {
        &mut self.nodes[node.index()]
    }

    pub(crate) fn has_flag(&self, node: NodeId, flag: NodeFlags) -> bool {
        self.nodes[node.index()].flags.contains(flag)
    }
}
