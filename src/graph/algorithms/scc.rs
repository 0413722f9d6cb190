//! Strongly Connected Components (SCC) using Tarjan's algorithm.
//!
//! A strongly connected component is a maximal set of vertices such that there is a path
//! from every vertex to every other vertex in the set.
//!
//! The traversal is the classic single-pass algorithm, but driven by an explicit frame stack
//! instead of native recursion: each frame remembers the node and the next edge slot to look
//! at. Chains of any length therefore only grow heap vectors.
//!
//! [`StrongConnect`] is the reusable core. It is shared by plain decomposition
//! ([`strongly_connected_components`]) and by the representative forest, which differ only in
//! how they choose roots and what they do with each finished component.

use std::convert::Infallible;

use crate::graph::{
    state::{Arena, NodeFlags},
    NodeId,
};

/// One suspended `StrongConnect` invocation.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    /// Next edge slot of `node` to examine
    next_edge: usize,
}

/// Tarjan traversal state that survives across roots.
///
/// The discovery counter and stacks are shared by all roots of one analysis, so indices
/// stay globally monotonic as required for low-link comparisons.
#[derive(Debug, Default)]
pub(crate) struct StrongConnect {
    counter: usize,
    stack: Vec<NodeId>,
    frames: Vec<Frame>,
}

impl StrongConnect {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of nodes discovered so far.
    pub(crate) fn discovered(&self) -> usize {
        self.counter
    }

    /// Runs Tarjan's algorithm from `root`, which must not have been visited yet.
    ///
    /// For every completed component `on_component(representative, members)` is called once.
    /// `members` lists the component in stack order: the representative first, then the
    /// nodes pushed after it. By the time the callback runs every member already carries its
    /// `representative` and has left the stack.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `on_component`; the traversal stops there.
    pub(crate) fn run<E, F>(
        &mut self,
        arena: &mut Arena,
        root: NodeId,
        mut on_component: F,
    ) -> Result<(), E>
    where
        F: FnMut(NodeId, &[NodeId]) -> Result<(), E>,
    {
        self.enter(arena, root);

        while let Some(frame) = self.frames.last_mut() {
            let v = frame.node;

            if frame.next_edge < arena.edges(v).end {
                let w = arena.target(frame.next_edge);
                frame.next_edge += 1;

                let w_flags = arena.state(w).flags;
                if !w_flags.contains(NodeFlags::VISIT_STARTED) {
                    // Tree edge; the low-link update happens when w's frame completes
                    self.enter(arena, w);
                } else if w_flags.contains(NodeFlags::ON_STACK) {
                    let w_index = arena.state(w).index;
                    let state = arena.state_mut(v);
                    state.low_link = state.low_link.min(w_index);
                }
                continue;
            }

            self.frames.pop();
            let (v_index, v_low_link) = {
                let state = arena.state(v);
                (state.index, state.low_link)
            };

            if v_low_link == v_index {
                self.pop_component(arena, v, &mut on_component)?;
            }

            if let Some(parent) = self.frames.last() {
                let state = arena.state_mut(parent.node);
                state.low_link = state.low_link.min(v_low_link);
            }
        }

        Ok(())
    }

    fn enter(&mut self, arena: &mut Arena, node: NodeId) {
        let first_edge = arena.edges(node).start;
        let state = arena.state_mut(node);
        state.index = self.counter;
        state.low_link = self.counter;
        state.flags |= NodeFlags::VISIT_STARTED | NodeFlags::ON_STACK;
        self.counter += 1;

        self.stack.push(node);
        self.frames.push(Frame {
            node,
            next_edge: first_edge,
        });
    }

    /// Unwinds the stack down to and including `root`.
    fn pop_component<E, F>(
        &mut self,
        arena: &mut Arena,
        root: NodeId,
        on_component: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(NodeId, &[NodeId]) -> Result<(), E>,
    {
        let start = self
            .stack
            .iter()
            .rposition(|&node| node == root)
            .unwrap_or(0);

        for &member in &self.stack[start..] {
            let state = arena.state_mut(member);
            state.flags.remove(NodeFlags::ON_STACK);
            state.representative = Some(root);
        }

        let result = on_component(root, &self.stack[start..]);
        self.stack.truncate(start);
        result
    }
}

/// Computes the strongly connected components of the arena.
///
/// Every node not yet visited, taken in enumeration order, starts a new depth-first walk.
///
/// # Returns
///
/// A vector of SCCs, where each SCC is a vector of `NodeId`s whose first element is the
/// component's representative. The SCCs are returned in **reverse topological order**
/// (if there's an edge from SCC A to SCC B, then A appears after B in the result).
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
pub(crate) fn strongly_connected_components(arena: &mut Arena) -> Vec<Vec<NodeId>> {
    let mut sccs = Vec::new();
    let mut tarjan = StrongConnect::new();

    for node in 0..arena.node_count() {
        let node = NodeId::new(node);
        if arena.has_flag(node, NodeFlags::VISIT_STARTED) {
            continue;
        }

        let collected: Result<(), Infallible> = tarjan.run(arena, node, |_, members| {
            sccs.push(members.to_vec());
            Ok(())
        });
        if let Err(never) = collected {
            match never {}
        }
    }

    sccs
}
