//! Concurrent mapping between node identities and dense [`NodeId`]s.
//!
//! Analyses work on flat per-node arrays, while callers speak in terms of their own
//! identity type. [`NodeIndex`] bridges the two: it assigns each distinct identity (distinct
//! under the graph's [`Comparer`]) a sequential `NodeId` on first sight, and keeps the
//! identity around so results can be mapped back.
//!
//! Lookups hash through the comparer and bucket candidates by that hash; the comparer's
//! `equals` then picks the matching id inside a bucket. Buckets live in a [`DashMap`], node
//! slots in an append-only [`boxcar::Vec`], so interning only takes `&self` and may run on
//! many threads at once.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use crate::graph::{Comparer, NodeId};

/// Everything recorded about a node at insertion time.
struct NodeSlot<T> {
    identity: T,
    /// Set once the node has been the target of any edge
    descendant: AtomicBool,
}

/// Identity interning table for one graph.
pub(crate) struct NodeIndex<T, C> {
    comparer: C,
    /// Slot `i` belongs to `NodeId(i)`
    slots: boxcar::Vec<NodeSlot<T>>,
    /// Comparer hash -> ids whose identity has that hash
    buckets: DashMap<u64, Vec<NodeId>>,
}

impl<T, C> NodeIndex<T, C>
where
    C: Comparer<T>,
{
    /// Creates an empty index pre-sized for `capacity` identities.
    pub(crate) fn with_capacity(capacity: usize, comparer: C) -> Self {
        Self {
            comparer,
            slots: boxcar::Vec::with_capacity(capacity),
            buckets: DashMap::with_capacity(capacity),
        }
    }

    /// Returns the `NodeId` of `identity`, assigning the next free id if it is new.
    ///
    /// The bucket's shard stays locked between the lookup and the insertion, so two
    /// threads interning equal identities always agree on a single id.
    pub(crate) fn intern(&self, identity: T) -> NodeId {
        let hash = self.comparer.hash(&identity);
        if let Some(bucket) = self.buckets.get(&hash) {
            if let Some(id) = self.find_in(&bucket, &identity) {
                return id;
            }
        }

        let mut bucket = self.buckets.entry(hash).or_default();
        if let Some(id) = self.find_in(&bucket, &identity) {
            return id;
        }

        let id = NodeId::new(self.slots.push(NodeSlot {
            identity,
            descendant: AtomicBool::new(false),
        }));
        bucket.push(id);
        id
    }

    /// Returns the `NodeId` of `identity` without inserting it.
    pub(crate) fn get(&self, identity: &T) -> Option<NodeId> {
        let bucket = self.buckets.get(&self.comparer.hash(identity))?;
        self.find_in(&bucket, identity)
    }

    fn find_in(&self, bucket: &[NodeId], identity: &T) -> Option<NodeId> {
        bucket.iter().copied().find(|id| {
            self.slots
                .get(id.index())
                .is_some_and(|slot| self.comparer.equals(&slot.identity, identity))
        })
    }

    /// Returns the identity stored for `id`.
    pub(crate) fn identity(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.index()).map(|slot| &slot.identity)
    }

    /// Records that `id` has an incoming edge.
    pub(crate) fn mark_descendant(&self, id: NodeId) {
        if let Some(slot) = self.slots.get(id.index()) {
            slot.descendant.store(true, Ordering::Relaxed);
        }
    }

    /// Returns `true` if `id` has been the target of an edge.
    pub(crate) fn is_descendant(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|slot| slot.descendant.load(Ordering::Relaxed))
    }

    /// Returns the number of interned identities.
    pub(crate) fn len(&self) -> usize {
        self.slots.count()
    }

    /// Returns the comparer used for identities.
    pub(crate) fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Iterates identities in `NodeId` order.
    pub(crate) fn identities(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .map(|(index, slot)| (NodeId::new(index), &slot.identity))
    }
}
