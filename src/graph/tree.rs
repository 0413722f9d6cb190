//! Positioned nodes of a representative forest.
//!
//! The forest produced by [`Graph::to_representative_forest`](crate::Graph::to_representative_forest)
//! is never materialised as a tree structure. Each node is reported once as a [`TreeNode`],
//! carrying a [`HierarchyPath`] that spells out where it sits: entry `i` of the path is the
//! zero-based sibling ordinal at depth `i`.
//!
//! ```text
//! A        [0]
//! ├── B    [0, 0]
//! │   └── D [0, 0, 0]
//! └── C    [0, 1]
//! E        [1]
//! ```

use std::fmt;

use crate::graph::{Comparer, Edge};

/// The position of a node in a forest, as a list of sibling ordinals.
///
/// `[2, 0]` reads "third root, then first child of that root". Paths are never
/// empty for emitted nodes: a root has a path of length one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchyPath(Vec<usize>);

impl HierarchyPath {
    /// Creates a path from its sibling ordinals.
    #[must_use]
    pub fn new(ordinals: Vec<usize>) -> Self {
        Self(ordinals)
    }

    /// Returns the ordinals, outermost first.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the zero-based depth of the node (0 for roots).
    ///
    /// An empty path reports depth 0 as well.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Returns the ordinal of the node among its siblings.
    #[must_use]
    pub fn sibling_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Returns the path of the parent node, or `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<HierarchyPath> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    /// Returns `true` if `self` lies strictly below `other` in the forest.
    #[must_use]
    pub fn is_descendant_of(&self, other: &HierarchyPath) -> bool {
        self.0.len() > other.0.len() && self.0.starts_with(&other.0)
    }
}

impl From<Vec<usize>> for HierarchyPath {
    fn from(ordinals: Vec<usize>) -> Self {
        Self(ordinals)
    }
}

impl From<&[usize]> for HierarchyPath {
    fn from(ordinals: &[usize]) -> Self {
        Self(ordinals.to_vec())
    }
}

impl fmt::Display for HierarchyPath {
    /// Renders the path as `/i0/i1/.../`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for ordinal in &self.0 {
            write!(f, "{ordinal}/")?;
        }
        Ok(())
    }
}

/// A node identity together with its position in the representative forest.
///
/// Two tree nodes are equal iff their identities and full paths are equal.
///
/// # Examples
///
/// ```rust
/// use cycleforest::TreeNode;
///
/// let node = TreeNode::new("io", vec![2, 0]);
/// assert_eq!(node.path(), "/2/0/");
/// assert_eq!(node.hierarchy().depth(), 1);
/// assert_eq!(node.hierarchy().sibling_index(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeNode<T> {
    node: T,
    hierarchy: HierarchyPath,
}

impl<T> TreeNode<T> {
    /// Creates a tree node at the given position.
    #[must_use]
    pub fn new(node: T, hierarchy: impl Into<HierarchyPath>) -> Self {
        Self {
            node,
            hierarchy: hierarchy.into(),
        }
    }

    /// Returns the node identity.
    #[must_use]
    pub const fn node(&self) -> &T {
        &self.node
    }

    /// Returns the node's position.
    #[must_use]
    pub const fn hierarchy(&self) -> &HierarchyPath {
        &self.hierarchy
    }

    /// Returns the position rendered as `/i0/i1/.../`.
    #[must_use]
    pub fn path(&self) -> String {
        self.hierarchy.to_string()
    }

    /// Returns `true` for nodes at depth 0.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.hierarchy.0.len() == 1
    }

    /// Consumes the tree node, returning the identity and its position.
    #[must_use]
    pub fn into_parts(self) -> (T, HierarchyPath) {
        (self.node, self.hierarchy)
    }

    /// Compares identities with `comparer` and paths structurally.
    #[must_use]
    pub fn eq_with<C: Comparer<T>>(&self, other: &Self, comparer: &C) -> bool {
        self.hierarchy == other.hierarchy && comparer.equals(&self.node, &other.node)
    }
}

impl<T: fmt::Display> fmt::Display for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hierarchy, self.node)
    }
}

/// Both result streams of a representative forest run, collected.
///
/// Returned by [`Graph::representative_forest`](crate::Graph::representative_forest) for
/// callers that prefer a value over callbacks. Cycle edges and tree nodes keep the order in
/// which the analysis produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentativeForest<T> {
    cycles: Vec<Edge<T>>,
    nodes: Vec<TreeNode<T>>,
}

impl<T> RepresentativeForest<T> {
    pub(crate) fn new(cycles: Vec<Edge<T>>, nodes: Vec<TreeNode<T>>) -> Self {
        Self { cycles, nodes }
    }

    /// Returns the `(representative, member)` edges, one per node of the graph.
    #[must_use]
    pub fn cycle_edges(&self) -> &[Edge<T>] {
        &self.cycles
    }

    /// Returns the positioned nodes in depth-first pre-order.
    #[must_use]
    pub fn tree_nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    /// Returns the tree nodes at depth 0.
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode<T>> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    /// Returns the distinct SCC representatives in reporting order.
    ///
    /// Each component reports its representative as `(r, r)`, which is what this looks for.
    pub fn representatives(&self) -> impl Iterator<Item = &T>
    where
        T: PartialEq,
    {
        self.cycles
            .iter()
            .filter(|edge| edge.from() == edge.to())
            .map(Edge::from)
    }

    /// Returns the members of the component represented by `representative`.
    ///
    /// The representative is part of its own component and appears last.
    pub fn members<'a>(&'a self, representative: &'a T) -> impl Iterator<Item = &'a T> + 'a
    where
        T: PartialEq,
    {
        self.cycles
            .iter()
            .filter(move |edge| edge.from() == representative)
            .map(Edge::to)
    }

    /// Returns the tree node emitted for `node`, if it was placed in the forest.
    pub fn position_of(&self, node: &T) -> Option<&HierarchyPath>
    where
        T: PartialEq,
    {
        self.nodes
            .iter()
            .find(|tree_node| tree_node.node() == node)
            .map(TreeNode::hierarchy)
    }

    /// Consumes the forest, returning the cycle edges and the tree nodes.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Edge<T>>, Vec<TreeNode<T>>) {
        (self.cycles, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rendering() {
        assert_eq!(HierarchyPath::new(vec![0]).to_string(), "/0/");
        assert_eq!(HierarchyPath::new(vec![2, 0, 11]).to_string(), "/2/0/11/");
        assert_eq!(HierarchyPath::default().to_string(), "/");
    }

    #[test]
    fn test_path_relations() {
        let root = HierarchyPath::from(vec![1]);
        let child = HierarchyPath::from(vec![1, 3]);
        let other = HierarchyPath::from(vec![2, 3]);

        assert_eq!(root.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);
        assert!(child.is_descendant_of(&root));
        assert!(!other.is_descendant_of(&root));
        assert!(!root.is_descendant_of(&root));
    }

    #[test]
    fn test_tree_node_equality_includes_path() {
        let a = TreeNode::new('x', vec![0, 1]);
        let b = TreeNode::new('x', vec![0, 1]);
        let c = TreeNode::new('x', vec![0, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_root());
        assert_eq!(a.to_string(), "/0/1/ x");
    }

    #[test]
    fn test_collected_forest_queries() {
        let forest = RepresentativeForest::new(
            vec![
                Edge::new("b", "c"),
                Edge::new("b", "b"),
                Edge::new("a", "a"),
            ],
            vec![TreeNode::new("a", vec![0]), TreeNode::new("b", vec![0, 0])],
        );

        assert_eq!(forest.representatives().collect::<Vec<_>>(), vec![&"b", &"a"]);
        assert_eq!(forest.members(&"b").collect::<Vec<_>>(), vec![&"c", &"b"]);
        assert_eq!(forest.members(&"z").count(), 0);
        assert_eq!(forest.roots().map(TreeNode::node).collect::<Vec<_>>(), vec![&"a"]);
        assert_eq!(
            forest.position_of(&"b").map(HierarchyPath::as_slice),
            Some(&[0usize, 0][..])
        );
        assert_eq!(forest.position_of(&"c"), None);
    }
}
