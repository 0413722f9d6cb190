//! Low-level helpers shared by the graph algorithms.

mod bitset;

pub use bitset::{BitSet, BitSetIter};
