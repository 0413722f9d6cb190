// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cycleforest
//!
//! Strongly connected components and representative forests for directed graphs over
//! arbitrary node identities.
//!
//! ## Features
//!
//! - **Pluggable identity** - nodes are compared through a [`Comparer`], not through `Ord`
//! - **Concurrent construction** - [`Graph::add`] takes `&self` and is safe to call from
//!   many threads
//! - **Iterative traversals** - no recursion, so chains of any depth are fine
//! - **Streaming results** - forest output is pushed through callbacks that may abort the
//!   traversal by returning `Err`
//!
//! ## Quick Start
//!
//! ```rust
//! use cycleforest::prelude::*;
//!
//! let mut graph = Graph::new();
//! graph.add("A", "B");
//! graph.add("B", "A");
//! graph.add("B", "C");
//!
//! // Two components: {A, B} and {C}
//! assert_eq!(graph.tarjan().len(), 2);
//!
//! // {A, B} collapses into A, which has a single exit to C
//! let forest = graph.representative_forest()?;
//! let placed: Vec<String> = forest.tree_nodes().iter().map(ToString::to_string).collect();
//! assert_eq!(placed, vec!["/0/ A", "/0/0/ C"]);
//! # Ok::<(), cycleforest::Error>(())
//! ```
//!
//! ## Representative Forests
//!
//! [`Graph::to_representative_forest`] runs three phases over a snapshot of the graph:
//!
//! 1. **Components** - Tarjan's algorithm from every node without incoming edges. Cycles
//!    that nothing points into are picked up afterwards, rooted at their first node in
//!    enumeration order. Every node is reported as a `(representative, member)` [`Edge`].
//! 2. **Exits** - every edge whose endpoints lie in different components is recorded on
//!    the source component's representative.
//! 3. **Forest** - a depth-first walk over the exits from the roots, reporting each placed
//!    node as a [`TreeNode`] with its [`HierarchyPath`].
//!
//! Enumeration order is the order in which nodes were first passed to [`Graph::add`].
//!
//! ## Logging
//!
//! Analyses emit [`tracing`] events: `debug` when an analysis completes, `trace` per
//! forest root. The library never installs a subscriber.

#[macro_use]
pub(crate) mod error;

pub mod utils;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use cycleforest::prelude::*;
///
/// let graph: Graph<u32> = [(1, 2), (2, 3)].into_iter().collect();
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub mod prelude;

/// Directed graphs, node identities and the decomposition analyses.
///
/// See [`Graph`] for the entry point.
pub mod graph;

/// `cycleforest` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use cycleforest::{Graph, NaturalComparer, Result};
///
/// fn sized(capacity: isize) -> Result<Graph<String>> {
///     Graph::create(capacity, NaturalComparer)
/// }
///
/// assert!(sized(8).is_ok());
/// assert!(sized(-8).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `cycleforest` Error type
///
/// Returned for invalid arguments and for broken analysis invariants; callback errors
/// are passed through in their own type.
pub use error::Error;

/// The graph and its configuration.
pub use graph::{Graph, GraphConfig};

/// Identity comparison.
pub use graph::{Comparer, KeyComparer, NaturalComparer};

/// Values reported by the analyses.
pub use graph::{Edge, HierarchyPath, NodeId, RepresentativeForest, TreeNode};
