//! Spatial Index Module
//!
//! R-tree over node bounding boxes (world space) for hit testing. Point
//! queries are O(log n) instead of a scan over every node.

use crate::types::{Bounds, NodeId};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A node's bounding box as stored in the tree.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub node_id: NodeId,
    pub bounds: Bounds,
}

impl SpatialEntry {
    pub fn new(node_id: NodeId, bounds: Bounds) -> Self {
        Self { node_id, bounds }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node_id == other.node_id
    }
}

/// Spatial index keyed by node id.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<NodeId, Bounds>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(id, bounds)` pairs in one bulk load.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: Iterator<Item = (NodeId, Bounds)>,
    {
        let entries: Vec<SpatialEntry> = nodes.map(|(id, b)| SpatialEntry::new(id, b)).collect();
        let map = entries
            .iter()
            .map(|e| (e.node_id.clone(), e.bounds))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            entries: map,
        }
    }

    /// Insert or move a node's box.
    pub fn upsert(&mut self, node_id: &NodeId, bounds: Bounds) {
        if let Some(old) = self.entries.remove(node_id) {
            self.tree.remove(&SpatialEntry::new(node_id.clone(), old));
        }
        self.tree.insert(SpatialEntry::new(node_id.clone(), bounds));
        self.entries.insert(node_id.clone(), bounds);
    }

    pub fn remove(&mut self, node_id: &NodeId) -> bool {
        match self.entries.remove(node_id) {
            Some(bounds) => {
                self.tree.remove(&SpatialEntry::new(node_id.clone(), bounds));
                true
            }
            None => false,
        }
    }

    /// All nodes whose box contains the point (unordered).
    pub fn query_point(&self, x: f32, y: f32) -> Vec<NodeId> {
        let envelope = AABB::from_point([x, y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.node_id.clone())
            .collect()
    }
}
