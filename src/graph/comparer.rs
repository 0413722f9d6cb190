//! Pluggable node identity comparison.
//!
//! A [`Graph`](crate::Graph) never assumes its node type is orderable, nor that the
//! type's own `Eq` is the right notion of identity. Instead it is parameterised by a
//! [`Comparer`], which supplies both equality and a hash consistent with it.
//!
//! - [`NaturalComparer`] - delegates to `T: Eq + Hash` (the default)
//! - [`KeyComparer`] - compares the key returned by a projection closure
//!
//! # Examples
//!
//! ```rust
//! use cycleforest::{Graph, KeyComparer};
//!
//! // Case-insensitive node identities
//! let graph = Graph::with_comparer(KeyComparer::<String, _, _>::new(|s: &String| s.to_lowercase()));
//! graph.add("Core".to_string(), "io".to_string());
//! graph.add("CORE".to_string(), "IO".to_string());
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

use std::{
    collections::hash_map::DefaultHasher,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    marker::PhantomData,
};

/// Equality and hashing capability for node identities.
///
/// Implementations must be consistent: whenever `equals(a, b)` holds,
/// `hash(a) == hash(b)` must hold as well. Identities that compare equal are
/// folded into a single node.
///
/// Comparers are shared by every thread inserting into the graph, hence the
/// `Send + Sync` bound.
pub trait Comparer<T: ?Sized>: Send + Sync {
    /// Returns `true` if `a` and `b` denote the same node.
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Returns a hash of `value` consistent with [`Comparer::equals`].
    fn hash(&self, value: &T) -> u64;
}

/// Compares identities with their own `Eq` and `Hash` implementations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalComparer;

impl<T> Comparer<T> for NaturalComparer
where
    T: Eq + Hash + ?Sized,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        BuildHasherDefault::<DefaultHasher>::default().hash_one(value)
    }
}

/// Compares identities by a key derived from them.
///
/// Two identities are the same node when the projection yields equal keys.
/// The projection runs on every lookup, so it should be cheap.
pub struct KeyComparer<T: ?Sized, K, F> {
    project: F,
    _marker: PhantomData<fn(&T) -> K>,
}

impl<T, K, F> KeyComparer<T, K, F>
where
    T: ?Sized,
    F: Fn(&T) -> K,
{
    /// Creates a comparer from a key projection.
    #[must_use]
    pub fn new(project: F) -> Self {
        Self {
            project,
            _marker: PhantomData,
        }
    }
}

impl<T, K, F> Comparer<T> for KeyComparer<T, K, F>
where
    T: ?Sized,
    K: Eq + Hash,
    F: Fn(&T) -> K + Send + Sync,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.project)(a) == (self.project)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        BuildHasherDefault::<DefaultHasher>::default().hash_one((self.project)(value))
    }
}

impl<T: ?Sized, K, F: Clone> Clone for KeyComparer<T, K, F> {
    fn clone(&self) -> Self {
        Self {
            project: self.project.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, K, F> std::fmt::Debug for KeyComparer<T, K, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyComparer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_comparer() {
        let cmp = NaturalComparer;
        assert!(cmp.equals(&"a", &"a"));
        assert!(!cmp.equals(&"a", &"b"));
        assert_eq!(
            Comparer::<&str>::hash(&cmp, &"a"),
            Comparer::<&str>::hash(&cmp, &"a")
        );
        assert_ne!(
            Comparer::<&str>::hash(&cmp, &"a"),
            Comparer::<&str>::hash(&cmp, &"b")
        );
    }

    #[test]
    fn test_natural_comparer_unsized() {
        let cmp = NaturalComparer;
        assert!(Comparer::<str>::equals(&cmp, "x", "x"));
    }

    #[test]
    fn test_key_comparer_consistent_hash() {
        let cmp: KeyComparer<(u32, &str), u32, _> = KeyComparer::new(|v: &(u32, &str)| v.0);
        let a = (7, "left");
        let b = (7, "right");
        let c = (8, "left");

        assert!(cmp.equals(&a, &b));
        assert!(!cmp.equals(&a, &c));
        assert_eq!(cmp.hash(&a), cmp.hash(&b));
    }
}
