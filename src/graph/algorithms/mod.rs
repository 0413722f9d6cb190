//! Graph decomposition algorithms.
//!
//! Both algorithms operate on an [`Arena`] snapshot rather than on the [`Graph`](crate::Graph)
//! itself. They are re-exported at crate level only through the `Graph` methods that drive
//! them.
//!
//! - [`strongly_connected_components`]: Tarjan's algorithm, one walk per unvisited node
//! - [`representative_forest`]: SCCs plus the exit forest over their representatives

mod forest;
mod scc;

pub(crate) use forest::representative_forest;
pub(crate) use scc::strongly_connected_components;

#[cfg(test)]
use crate::graph::{state::Arena, NodeId};

/// Builds an arena of `node_count` nodes from raw `(from, to)` index pairs.
///
/// Successors keep the order in which they appear in `edges`, and every edge target is
/// marked as a descendant, mirroring what [`Graph`](crate::Graph) does on insertion.
#[cfg(test)]
pub(crate) fn build_arena(node_count: usize, edges: &[(usize, usize)]) -> Arena {
    let mut successors = vec![Vec::new(); node_count];
    let mut descendant = vec![false; node_count];
    for &(from, to) in edges {
        successors[from].push(NodeId::new(to));
        descendant[to] = true;
    }

    let mut arena = Arena::with_capacity(node_count, edges.len());
    for (targets, is_descendant) in successors.iter().zip(descendant) {
        arena.push_node(targets, is_descendant);
    }
    arena
}
