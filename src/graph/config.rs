//! Construction-time configuration for [`Graph`](crate::Graph).

/// Sizing hints for a new graph.
///
/// Both capacities are hints only; the graph grows past them as needed.
///
/// # Examples
///
/// ```rust
/// use cycleforest::{Graph, GraphConfig, NaturalComparer};
///
/// let config = GraphConfig::default()
///     .with_node_capacity(1024)
///     .with_edge_capacity(4096);
/// let graph: Graph<u64> = Graph::with_config(&config, NaturalComparer);
/// assert!(graph.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Expected number of distinct node identities (default: 0).
    pub node_capacity: usize,

    /// Expected number of distinct edges (default: 0).
    pub edge_capacity: usize,
}

impl GraphConfig {
    /// Creates a configuration sized for `node_capacity` nodes.
    #[must_use]
    pub fn new(node_capacity: usize) -> Self {
        Self {
            node_capacity,
            ..Self::default()
        }
    }

    /// Sets the expected number of nodes.
    #[must_use]
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Sets the expected number of edges.
    #[must_use]
    pub fn with_edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }
}
