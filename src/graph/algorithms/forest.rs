//! Representative forest construction.
//!
//! The forest collapses every strongly connected component into its representative and
//! arranges the collapsed graph as a forest along the edges that leave a component
//! ("exits"). It runs in three phases over one [`Arena`]:
//!
//! 1. **Root selection & SCC** - nodes without incoming edges start Tarjan walks and become
//!    roots. Whatever is still unvisited afterwards (pure cycles with no entry point) is
//!    picked up by promoting the first unvisited node, in enumeration order, to a root.
//! 2. **Exit discovery** - starting from the roots, every edge is crossed once; an edge
//!    `(v, w)` whose endpoints have different representatives records `w` as an exit of
//!    `v`'s representative.
//! 3. **Forest traversal** - a depth-first walk from the roots over the exits, numbering
//!    every emitted node with its [`HierarchyPath`](crate::HierarchyPath).
//!
//! The exit relation between distinct representatives is the condensation of the graph and
//! hence acyclic, which is what makes phase 3 terminate. The walk still tracks the
//! representatives on its current path and reports a violation as
//! [`Error::InvalidState`](crate::Error::InvalidState) rather than looping.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    graph::{
        algorithms::scc::StrongConnect,
        state::{Arena, EdgeFlags, NodeFlags},
        NodeId,
    },
    utils::BitSet,
    Error,
};

/// Counters describing one forest run, used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ForestSummary {
    /// Roots found without incoming edges
    pub(crate) natural_roots: usize,
    /// Roots promoted because they were unreachable from any natural root
    pub(crate) fallback_roots: usize,
    /// Number of strongly connected components
    pub(crate) components: usize,
    /// Number of recorded exits across all representatives
    pub(crate) exits: usize,
    /// Number of emitted tree nodes
    pub(crate) tree_nodes: usize,
}

/// Builds the representative forest of `arena`.
///
/// `on_cycle(representative, member)` is called once per node as it leaves the Tarjan stack;
/// the representative itself is reported last within its component, as `(r, r)`.
/// `on_tree_node(node, path)` is called once per node placed in the forest, in depth-first
/// pre-order.
///
/// # Errors
///
/// Returns the first error produced by a callback, or [`Error::InvalidState`] if an internal
/// invariant is broken. Either way the traversal stops at once.
pub(crate) fn representative_forest<E, FC, FT>(
    arena: &mut Arena,
    mut on_cycle: FC,
    mut on_tree_node: FT,
) -> Result<ForestSummary, E>
where
    E: From<Error>,
    FC: FnMut(NodeId, NodeId) -> Result<(), E>,
    FT: FnMut(NodeId, &[usize]) -> Result<(), E>,
{
    let mut summary = ForestSummary::default();
    if arena.node_count() == 0 {
        return Ok(summary);
    }

    let roots = select_roots(arena, &mut on_cycle, &mut summary)?;
    summary.exits = discover_exits(arena, &roots)?;
    summary.tree_nodes = traverse_forest(arena, &roots, &mut on_tree_node)?;

    debug!(
        nodes = arena.node_count(),
        edges = arena.edge_count(),
        components = summary.components,
        natural_roots = summary.natural_roots,
        fallback_roots = summary.fallback_roots,
        exits = summary.exits,
        tree_nodes = summary.tree_nodes,
        "representative forest complete"
    );
    Ok(summary)
}

/// Phase 1: chooses roots and runs Tarjan from each of them.
fn select_roots<E, FC>(
    arena: &mut Arena,
    on_cycle: &mut FC,
    summary: &mut ForestSummary,
) -> Result<Vec<NodeId>, E>
where
    FC: FnMut(NodeId, NodeId) -> Result<(), E>,
{
    let mut roots = Vec::new();
    let mut tarjan = StrongConnect::new();
    let mut components = 0;

    let mut emit = |representative: NodeId, members: &[NodeId]| -> Result<(), E> {
        components += 1;
        // Stack order has the representative first; report in pop order instead
        members
            .iter()
            .rev()
            .try_for_each(|&member| on_cycle(representative, member))
    };

    for node in (0..arena.node_count()).map(NodeId::new) {
        let flags = arena.state(node).flags;
        if flags.intersects(NodeFlags::DESCENDANT | NodeFlags::VISIT_STARTED) {
            continue;
        }
        trace!(root = %node, "natural root");
        roots.push(node);
        tarjan.run(arena, node, &mut emit)?;
    }
    summary.natural_roots = roots.len();

    // Nodes only reachable from cycles without an entry point
    if tarjan.discovered() < arena.node_count() {
        for node in (0..arena.node_count()).map(NodeId::new) {
            if arena.has_flag(node, NodeFlags::VISIT_STARTED) {
                continue;
            }
            trace!(root = %node, "fallback root");
            arena.state_mut(node).flags.remove(NodeFlags::DESCENDANT);
            roots.push(node);
            tarjan.run(arena, node, &mut emit)?;
        }
    }
    summary.fallback_roots = roots.len() - summary.natural_roots;

    summary.components = components;
    Ok(roots)
}

/// Phase 2: records, for every representative, the targets of edges leaving its component.
///
/// Returns the number of recorded exits.
fn discover_exits(arena: &mut Arena, roots: &[NodeId]) -> Result<usize, Error> {
    let mut recorded: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut pending: Vec<NodeId> = Vec::new();

    for &root in roots {
        if arena.has_flag(root, NodeFlags::DESCENDANT) {
            continue;
        }
        pending.push(root);

        while let Some(v) = pending.pop() {
            if arena.has_flag(v, NodeFlags::EXITS_COMPUTED) {
                continue;
            }
            arena.state_mut(v).flags.insert(NodeFlags::EXITS_COMPUTED);
            let v_rep = representative(arena, v)?;

            for edge in arena.edges(v) {
                if arena.edge_flags[edge].contains(EdgeFlags::EXITS_SEARCHED) {
                    continue;
                }
                arena.edge_flags[edge].insert(EdgeFlags::EXITS_SEARCHED);

                let w = arena.target(edge);
                if representative(arena, w)? != v_rep && recorded.insert((v_rep, w)) {
                    arena.state_mut(v_rep).exits.push(w);
                }
                if !arena.has_flag(w, NodeFlags::EXITS_COMPUTED) {
                    pending.push(w);
                }
            }
        }
    }

    Ok(recorded.len())
}

/// One representative whose exits are being walked.
struct Frame {
    representative: NodeId,
    next_exit: usize,
}

/// Phase 3: depth-first walk over the exits, emitting positioned nodes.
///
/// `path` always holds the position the next emitted node will get: its last entry is the
/// sibling counter of the level currently being filled. Returns the number of emitted nodes.
fn traverse_forest<E, FT>(
    arena: &Arena,
    roots: &[NodeId],
    on_tree_node: &mut FT,
) -> Result<usize, E>
where
    E: From<Error>,
    FT: FnMut(NodeId, &[usize]) -> Result<(), E>,
{
    let node_count = arena.node_count();
    let mut emitted = BitSet::new(node_count);
    let mut expanded = BitSet::new(node_count);
    let mut on_path = BitSet::new(node_count);
    let mut frames: Vec<Frame> = Vec::new();
    let mut path: Vec<usize> = vec![0];

    for &root in roots {
        if !emitted.insert(root.index()) {
            continue;
        }
        on_tree_node(root, &path)?;

        let root_rep = representative(arena, root)?;
        if expanded.insert(root_rep.index()) {
            on_path.insert(root_rep.index());
            frames.push(Frame {
                representative: root_rep,
                next_exit: 0,
            });
            path.push(0);
        }

        while let Some(frame) = frames.last_mut() {
            let exits = &arena.state(frame.representative).exits;
            let Some(&child) = exits.get(frame.next_exit) else {
                on_path.remove(frame.representative.index());
                frames.pop();
                path.pop();
                if !frames.is_empty() {
                    bump(&mut path);
                }
                continue;
            };
            frame.next_exit += 1;

            let child_rep = representative(arena, child)?;
            if on_path.contains(child_rep.index()) {
                return Err(invalid_state!(
                    "exit relation is cyclic at {} (representative {})",
                    child,
                    child_rep
                )
                .into());
            }
            if !emitted.insert(child.index()) {
                continue;
            }
            on_tree_node(child, &path)?;

            if expanded.insert(child_rep.index()) {
                on_path.insert(child_rep.index());
                frames.push(Frame {
                    representative: child_rep,
                    next_exit: 0,
                });
                path.push(0);
            } else {
                bump(&mut path);
            }
        }

        bump(&mut path);
    }

    Ok(emitted.count())
}

fn bump(path: &mut [usize]) {
    if let Some(last) = path.last_mut() {
        *last += 1;
    }
}

fn representative(arena: &Arena, node: NodeId) -> Result<NodeId, Error> {
    arena
        .state(node)
        .representative
        .ok_or_else(|| invalid_state!("node {} has no representative", node))
}
