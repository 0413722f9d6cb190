//! Directed graph with cycle decomposition.
//!
//! This module provides [`Graph`], an append-only directed graph over arbitrary node
//! identities, and the two analyses it supports:
//!
//! - [`Graph::tarjan`] - partition into strongly connected components
//! - [`Graph::to_representative_forest`] - components plus a forest over the edges that
//!   leave them, streamed through callbacks
//!
//! # Architecture
//!
//! Node identities are interned into dense [`NodeId`]s on first reference. Edge insertion
//! only touches concurrent maps, so [`Graph::add`] takes `&self` and may be called from
//! many threads at once. Analyses take `&mut self`; each one snapshots the graph into a
//! flat arena of per-node state and runs iterative traversals over it, so neither the
//! graph's shared storage nor the native call stack is involved in the hot loop.
//!
//! # Key Components
//!
//! - [`Graph`] - Edge insertion and analysis entry points
//! - [`Comparer`] - Pluggable identity equality and hashing
//! - [`Edge`] - `(representative, member)` values reported per component member
//! - [`TreeNode`] / [`HierarchyPath`] - Positioned forest nodes
//! - [`RepresentativeForest`] - Collected form of both forest streams
//!
//! # Examples
//!
//! ```rust
//! use cycleforest::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add("app", "core");
//! graph.add("core", "io");
//! graph.add("io", "core");
//!
//! let mut paths = Vec::new();
//! graph.to_representative_forest(
//!     |_cycle| Ok(()),
//!     |node| {
//!         paths.push(format!("{} {}", node.path(), node.node()));
//!         Ok::<(), cycleforest::Error>(())
//!     },
//! )?;
//!
//! assert_eq!(paths, vec!["/0/ app", "/0/0/ core"]);
//! # Ok::<(), cycleforest::Error>(())
//! ```

mod algorithms;
mod comparer;
mod config;
mod edge;
mod indexed;
mod node;
mod state;
mod tree;

pub use comparer::{Comparer, KeyComparer, NaturalComparer};
pub use config::GraphConfig;
pub use edge::Edge;
pub use node::NodeId;
pub use tree::{HierarchyPath, RepresentativeForest, TreeNode};

use std::{fmt, hash::Hash};

use dashmap::{DashMap, DashSet};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    graph::{
        algorithms::{representative_forest, strongly_connected_components},
        indexed::NodeIndex,
        state::Arena,
    },
    Error, Result,
};

/// An append-only directed graph over node identities of type `T`.
///
/// Identities are compared through the comparer `C`; identities it considers equal are
/// the same node. Parallel edges collapse into one, self-loops are kept.
///
/// # Lifecycle
///
/// 1. Create with [`Graph::new`], [`Graph::create`] or one of the `with_*` constructors
/// 2. Populate with [`Graph::add`] (from any number of threads)
/// 3. Analyse with [`Graph::tarjan`], [`Graph::cycles`] or
///    [`Graph::to_representative_forest`]
///
/// Analyses may be repeated, and the graph may be extended between them; every analysis
/// starts from fresh per-node state.
///
/// # Thread Safety
///
/// `Graph<T, C>` is [`Sync`] when `T` is `Send + Sync`. Insertion needs only a shared
/// reference; analyses need exclusive access, which the borrow checker enforces.
pub struct Graph<T, C = NaturalComparer> {
    nodes: NodeIndex<T, C>,
    /// Successors per source node, in insertion order
    adjacency: DashMap<NodeId, Vec<NodeId>>,
    /// Distinct `(from, to)` pairs, guards against parallel edges
    edges: DashSet<(NodeId, NodeId)>,
}

impl<T> Graph<T, NaturalComparer>
where
    T: Eq + Hash,
{
    /// Creates an empty graph comparing identities with their own `Eq` and `Hash`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty graph sized for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(&GraphConfig::new(capacity), NaturalComparer)
    }
}

impl<T, C> Graph<T, C>
where
    C: Comparer<T>,
{
    /// Creates an empty graph sized for `capacity` nodes.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Expected number of distinct nodes; must not be negative
    /// * `comparer` - Identity equality and hashing
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is negative.
    pub fn create(capacity: isize, comparer: C) -> Result<Self> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            Error::InvalidArgument(format!("capacity must not be negative, got {capacity}"))
        })?;
        Ok(Self::with_config(&GraphConfig::new(capacity), comparer))
    }

    /// Creates an empty graph that compares identities with `comparer`.
    #[must_use]
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_config(&GraphConfig::default(), comparer)
    }

    /// Creates an empty graph pre-sized according to `config`.
    #[must_use]
    pub fn with_config(config: &GraphConfig, comparer: C) -> Self {
        Self {
            nodes: NodeIndex::with_capacity(config.node_capacity, comparer),
            adjacency: DashMap::with_capacity(config.node_capacity),
            edges: DashSet::with_capacity(config.edge_capacity),
        }
    }

    /// Adds the edge `from -> to`.
    ///
    /// Both identities become nodes if they are new, `from` first. Adding an edge that
    /// already exists changes nothing. `to` is marked as having an incoming edge, which
    /// disqualifies it as a natural forest root.
    pub fn add(&self, from: T, to: T) {
        let from = self.nodes.intern(from);
        let to = self.nodes.intern(to);
        self.nodes.mark_descendant(to);

        if self.edges.insert((from, to)) {
            self.adjacency.entry(from).or_default().push(to);
        }
    }

    /// Adds every edge yielded by `edges`, in order.
    pub fn add_all<I>(&self, edges: I)
    where
        I: IntoIterator<Item = (T, T)>,
    {
        for (from, to) in edges {
            self.add(from, to);
        }
    }

    /// Adds every edge yielded by `edges` on the rayon thread pool.
    ///
    /// The resulting structure is the same as with [`Graph::add_all`], but node ids (and
    /// with them enumeration order) depend on scheduling.
    pub fn par_add_all<I>(&self, edges: I)
    where
        I: IntoParallelIterator<Item = (T, T)>,
        T: Send + Sync,
    {
        edges
            .into_par_iter()
            .for_each(|(from, to)| self.add(from, to));
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct edges, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Returns `true` if `node` is part of the graph.
    #[must_use]
    pub fn contains(&self, node: &T) -> bool {
        self.nodes.get(node).is_some()
    }

    /// Returns every node identity in enumeration order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.nodes.identities().map(|(_, identity)| identity)
    }

    /// Returns the comparer used for node identities.
    #[must_use]
    pub fn comparer(&self) -> &C {
        self.nodes.comparer()
    }

    /// Returns the direct successors of `node` in insertion order.
    ///
    /// Unknown nodes have no successors.
    #[must_use]
    pub fn successors(&self, node: &T) -> Vec<T>
    where
        T: Clone,
    {
        let Some(id) = self.nodes.get(node) else {
            return Vec::new();
        };
        self.adjacency
            .get(&id)
            .map(|targets| self.resolve_all(&targets))
            .unwrap_or_default()
    }

    /// Computes the strongly connected components of the graph.
    ///
    /// Nodes are visited in enumeration order (the order in which they were first
    /// referenced). Components are returned in completion order, which is a reverse
    /// topological order of the condensed graph: a component appears before every
    /// component that has an edge into it. Within a component the representative comes
    /// first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cycleforest::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.add('a', 'b');
    /// graph.add('b', 'a');
    /// graph.add('b', 'c');
    ///
    /// let sccs = graph.tarjan();
    /// assert_eq!(sccs, vec![vec!['c'], vec!['a', 'b']]);
    /// ```
    #[must_use]
    pub fn tarjan(&mut self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        let mut arena = self.snapshot();
        let sccs = strongly_connected_components(&mut arena);
        debug!(
            nodes = arena.node_count(),
            edges = arena.edge_count(),
            components = sccs.len(),
            "tarjan complete"
        );

        sccs.iter().map(|scc| self.resolve_all(scc)).collect()
    }

    /// Returns only the components that form real cycles.
    ///
    /// A component is a cycle if it has at least two members or its single member has a
    /// self-loop.
    #[must_use]
    pub fn cycles(&mut self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        let mut arena = self.snapshot();
        strongly_connected_components(&mut arena)
            .iter()
            .filter(|scc| match scc.as_slice() {
                [single] => arena.successors(*single).contains(single),
                members => members.len() > 1,
            })
            .map(|scc| self.resolve_all(scc))
            .collect()
    }

    /// Decomposes the graph into components and positions them in a forest.
    ///
    /// `on_cycle` receives one `(representative, member)` edge per node, the
    /// representative reporting itself last as `(r, r)`. `on_tree_node` receives one
    /// [`TreeNode`] per placed node, in depth-first pre-order. All `on_cycle` calls
    /// happen before the first `on_tree_node` call.
    ///
    /// Roots are the nodes without incoming edges, in enumeration order. Components that
    /// are not reachable from any such node (a cycle nothing points into) are rooted at
    /// their first node in enumeration order. Below a node come the targets of edges that
    /// leave the node's component; every other component member is reported only through
    /// `on_cycle`.
    ///
    /// # Arguments
    ///
    /// * `on_cycle` - Receives component membership as it is discovered
    /// * `on_tree_node` - Receives positioned forest nodes
    ///
    /// # Errors
    ///
    /// The first `Err` returned by either callback aborts the traversal and is returned
    /// unchanged. [`Error::InvalidState`] (converted into `E`) signals a broken internal
    /// invariant.
    pub fn to_representative_forest<E, FC, FT>(
        &mut self,
        mut on_cycle: FC,
        mut on_tree_node: FT,
    ) -> std::result::Result<(), E>
    where
        T: Clone,
        E: From<Error>,
        FC: FnMut(Edge<T>) -> std::result::Result<(), E>,
        FT: FnMut(TreeNode<T>) -> std::result::Result<(), E>,
    {
        let mut arena = self.snapshot();
        representative_forest(
            &mut arena,
            |representative, member| {
                on_cycle(Edge::new(
                    self.resolve(representative)?,
                    self.resolve(member)?,
                ))
            },
            |node, path| on_tree_node(TreeNode::new(self.resolve(node)?, path)),
        )?;
        Ok(())
    }

    /// Runs [`Graph::to_representative_forest`] and collects both streams.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if an internal invariant is broken.
    pub fn representative_forest(&mut self) -> Result<RepresentativeForest<T>>
    where
        T: Clone,
    {
        let mut cycles = Vec::new();
        let mut nodes = Vec::new();
        self.to_representative_forest(
            |edge| {
                cycles.push(edge);
                Ok(())
            },
            |node| {
                nodes.push(node);
                Ok::<(), Error>(())
            },
        )?;
        Ok(RepresentativeForest::new(cycles, nodes))
    }

    /// Copies the graph into a fresh arena, nodes in `NodeId` order.
    fn snapshot(&self) -> Arena {
        let node_count = self.nodes.len();
        let mut arena = Arena::with_capacity(node_count, self.edges.len());

        for index in 0..node_count {
            let id = NodeId::new(index);
            let descendant = self.nodes.is_descendant(id);
            match self.adjacency.get(&id) {
                Some(targets) => arena.push_node(&targets, descendant),
                None => arena.push_node(&[], descendant),
            }
        }

        arena
    }

    fn resolve(&self, id: NodeId) -> Result<T>
    where
        T: Clone,
    {
        self.nodes
            .identity(id)
            .cloned()
            .ok_or_else(|| invalid_state!("node {} has no identity", id))
    }

    fn resolve_all(&self, ids: &[NodeId]) -> Vec<T>
    where
        T: Clone,
    {
        ids.iter()
            .filter_map(|&id| self.nodes.identity(id).cloned())
            .collect()
    }
}

impl<T> Default for Graph<T, NaturalComparer>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> fmt::Debug for Graph<T, C>
where
    C: Comparer<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish_non_exhaustive()
    }
}

impl<T, C> Extend<(T, T)> for Graph<T, C>
where
    C: Comparer<T>,
{
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T> FromIterator<(T, T)> for Graph<T, NaturalComparer>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let graph = Self::new();
        graph.add_all(iter);
        graph
    }
}
