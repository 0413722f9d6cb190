//! # cycleforest Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the cycleforest library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cycleforest operations
pub use crate::Error;

/// The result type used throughout cycleforest
pub use crate::Result;

// ================================================================================================
// Graph Construction
// ================================================================================================

/// The graph itself and its sizing hints
pub use crate::{Graph, GraphConfig};

/// Identity comparison
pub use crate::{Comparer, KeyComparer, NaturalComparer};

// ================================================================================================
// Analysis Results
// ================================================================================================

/// Cycle membership edges and positioned forest nodes
pub use crate::{Edge, HierarchyPath, RepresentativeForest, TreeNode};
