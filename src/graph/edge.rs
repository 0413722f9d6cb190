//! Directed edge values reported by the analyses.
//!
//! [`Edge`] is a plain `(from, to)` pair. The graph never uses it as an internal key; it
//! exists so [`Graph::to_representative_forest`](crate::Graph::to_representative_forest) can
//! report cycle membership as `(representative, member)` pairs.

use std::fmt;

use crate::graph::Comparer;

/// An immutable directed edge between two node identities.
///
/// The derived `PartialEq`/`Hash` use the identities' own implementations. When the
/// graph was built with a custom [`Comparer`], use [`Edge::eq_with`] and
/// [`Edge::hash_with`] to compare edges the same way the graph compares nodes.
///
/// # Examples
///
/// ```rust
/// use cycleforest::{Edge, NaturalComparer};
///
/// let edge = Edge::new("a", "b");
/// assert_eq!(edge.from(), &"a");
/// assert_eq!(edge.to(), &"b");
/// assert!(edge.eq_with(&Edge::new("a", "b"), &NaturalComparer));
/// assert_eq!(edge.to_string(), "a -> b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<T> {
    from: T,
    to: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from `from` to `to`.
    #[must_use]
    pub const fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Returns the source identity.
    #[must_use]
    pub const fn from(&self) -> &T {
        &self.from
    }

    /// Returns the target identity.
    #[must_use]
    pub const fn to(&self) -> &T {
        &self.to
    }

    /// Consumes the edge, returning `(from, to)`.
    #[must_use]
    pub fn into_parts(self) -> (T, T) {
        (self.from, self.to)
    }

    /// Compares two edges endpoint by endpoint using `comparer`.
    ///
    /// Two edges are equal iff both their sources and both their targets compare equal.
    #[must_use]
    pub fn eq_with<C: Comparer<T>>(&self, other: &Self, comparer: &C) -> bool {
        comparer.equals(&self.from, &other.from) && comparer.equals(&self.to, &other.to)
    }

    /// Hashes the edge consistently with [`Edge::eq_with`].
    #[must_use]
    pub fn hash_with<C: Comparer<T>>(&self, comparer: &C) -> u64 {
        comparer
            .hash(&self.from)
            .rotate_left(5)
            .wrapping_mul(0x0100_0000_01b3)
            ^ comparer.hash(&self.to)
    }

    /// Returns `true` if both endpoints denote the same node under `comparer`.
    #[must_use]
    pub fn is_self_loop_with<C: Comparer<T>>(&self, comparer: &C) -> bool {
        comparer.equals(&self.from, &self.to)
    }
}

impl<T: fmt::Display> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
