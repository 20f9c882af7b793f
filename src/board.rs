//! Graph store: the single owner of every node and edge.
//!
//! All geometry mutation funnels through [`Board::update_node_geometry`]. That
//! one function updates the node, the hit-test index and the curve of every
//! incident edge, and records a change notification that the editor drains
//! into scene patches. There is no `&mut Node` anywhere in the public API, so
//! a caller cannot move a node and forget the connector refresh.

use crate::constants::{COMPANY_CARD_SIZE, DEFAULT_NODE_SIZE, IMAGE_MAX_WIDTH, PERSON_CARD_SIZE};
use crate::error::{EngineError, EngineResult};
use crate::geometry::{CubicCurve, auto_anchors, curve_between};
use crate::persistence::BoardSnapshot;
use crate::spatial_index::SpatialIndex;
use crate::types::{
    AnchorSide, Bounds, ContentPatch, Edge, EdgeId, EntityKind, Node, NodeContent, NodeGeometry,
    NodeId, Point, Size,
};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::{debug, trace};

/// What changed since the last [`Board::take_changes`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoardChanges {
    /// Nodes or edges were added, removed or had their content replaced
    pub structural: bool,
    /// Nodes whose position or size changed
    pub geometry: IndexSet<NodeId>,
}

impl BoardChanges {
    pub fn is_empty(&self) -> bool {
        !self.structural && self.geometry.is_empty()
    }
}

/// A node removed by [`Board::delete_node`] together with its cascaded edges.
#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: Node,
    pub edges: Vec<Edge>,
}

/// Read-only projection of the board for exporters.
#[derive(Debug, Clone)]
pub struct ExportView<'a> {
    /// Content bounds including padding; `None` only for an empty board
    pub bounds: Option<Bounds>,
    pub nodes: Vec<&'a Node>,
    pub edges: Vec<(&'a Edge, CubicCurve)>,
}

pub struct Board {
    /// Insertion order is z-order: later nodes draw (and hit-test) on top
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    incident: HashMap<NodeId, Vec<EdgeId>>,
    curves: HashMap<EdgeId, CubicCurve>,
    spatial: SpatialIndex,
    changes: BoardChanges,
}

impl Default for Board {
    fn default() -> Self {
        Self::new("Main Topic", Point::ZERO)
    }
}

impl Board {
    /// A board holding only the root node.
    pub fn new(root_label: &str, root_center: Point) -> Self {
        let mut board = Self::empty();
        board.insert_node(Node::new(
            NodeId::root(),
            root_center,
            Size::from(DEFAULT_NODE_SIZE),
            NodeContent::text(root_label),
        ));
        board
    }

    fn empty() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            incident: HashMap::new(),
            curves: HashMap::new(),
            spatial: SpatialIndex::new(),
            changes: BoardChanges::default(),
        }
    }

    /// Rebuild a board from a snapshot, validating its structure.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> EngineResult<Self> {
        snapshot.validate()?;
        let spatial = SpatialIndex::from_nodes(
            snapshot
                .nodes
                .values()
                .map(|node| (node.id.clone(), node.bounds())),
        );
        let mut board = Self {
            spatial,
            ..Self::empty()
        };
        for (_, node) in snapshot.nodes {
            board.incident.entry(node.id.clone()).or_default();
            board.nodes.insert(node.id.clone(), node);
        }
        for (_, edge) in snapshot.edges {
            board.insert_edge(edge);
        }
        board.changes.structural = true;
        debug!(
            nodes = board.nodes.len(),
            edges = board.edges.len(),
            "Board rebuilt from snapshot"
        );
        Ok(board)
    }

    /// Serializable copy of every node and edge.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in z-order (bottom first)
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Ids of every edge with `id` as source or target.
    pub fn incident_edges(&self, id: &NodeId) -> &[EdgeId] {
        self.incident.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current connector curve of an edge.
    pub fn curve(&self, id: &EdgeId) -> Option<&CubicCurve> {
        self.curves.get(id)
    }

    /// Topmost node containing the world-space point.
    pub fn node_at(&self, world: Point) -> Option<&NodeId> {
        self.spatial
            .query_point(world.x, world.y)
            .into_iter()
            .filter_map(|id| self.nodes.get_full(&id).map(|(z, key, _)| (z, key)))
            .max_by_key(|(z, _)| *z)
            .map(|(_, key)| key)
    }

    /// Union of all node boxes grown by `padding`.
    pub fn content_bounds(&self, padding: f32) -> Option<Bounds> {
        self.nodes
            .values()
            .map(Node::bounds)
            .reduce(|acc, b| acc.union(&b))
            .map(|b| b.expanded(padding))
    }

    /// Geometry, content and curves for an exporter, no live scene needed.
    pub fn export_view(&self, padding: f32) -> ExportView<'_> {
        ExportView {
            bounds: self.content_bounds(padding),
            nodes: self.nodes.values().collect(),
            edges: self
                .edges
                .values()
                .filter_map(|edge| self.curves.get(&edge.id).map(|c| (edge, *c)))
                .collect(),
        }
    }

    /// Drain pending change notifications.
    pub fn take_changes(&mut self) -> BoardChanges {
        std::mem::take(&mut self.changes)
    }

    // ------------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------------

    /// Insert a node with the default size for its content.
    pub fn add_node(&mut self, content: NodeContent, position: Point) -> NodeId {
        let size = default_size(&content);
        self.add_node_sized(content, position, size)
    }

    /// Insert a node with an explicit size (floored to stay positive).
    pub fn add_node_sized(&mut self, content: NodeContent, position: Point, size: Size) -> NodeId {
        let id = NodeId::generate();
        debug!(node = %id, kind = content.kind_name(), "Adding node");
        self.insert_node(Node::new(id.clone(), position, size, content));
        id
    }

    fn insert_node(&mut self, node: Node) {
        let id = node.id.clone();
        self.spatial.upsert(&id, node.bounds());
        self.incident.entry(id.clone()).or_default();
        self.nodes.insert(id, node);
        self.changes.structural = true;
    }

    /// Remove a node and every edge referencing it. The root is protected.
    pub fn delete_node(&mut self, id: &NodeId) -> EngineResult<RemovedNode> {
        if id.is_root() {
            return Err(EngineError::ProtectedEntity(id.clone()));
        }
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| EngineError::missing_node(id))?;
        self.spatial.remove(id);

        let edge_ids = self.incident.remove(id).unwrap_or_default();
        let mut edges = Vec::with_capacity(edge_ids.len());
        for edge_id in edge_ids {
            if let Some(edge) = self.remove_edge_record(&edge_id) {
                edges.push(edge);
            }
        }
        debug!(node = %id, cascaded = edges.len(), "Deleted node");
        self.changes.structural = true;
        self.changes.geometry.shift_remove(id);
        Ok(RemovedNode { node, edges })
    }

    /// Move and/or resize a node, refreshing incident curves and the
    /// hit-test index. Sizes are floored so they stay positive.
    pub fn update_node_geometry(&mut self, id: &NodeId, geometry: NodeGeometry) -> EngineResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| EngineError::missing_node(id))?;
        let size = geometry.size.floored();
        node.x = geometry.center.x;
        node.y = geometry.center.y;
        node.width = size.width;
        node.height = size.height;
        let bounds = node.bounds();

        self.spatial.upsert(id, bounds);
        let refreshed = self.refresh_incident_curves(id);
        trace!(node = %id, refreshed, "Geometry updated");
        self.changes.geometry.insert(id.clone());
        Ok(())
    }

    pub fn move_node(&mut self, id: &NodeId, center: Point) -> EngineResult<()> {
        let size = self.node(id).ok_or_else(|| EngineError::missing_node(id))?.size();
        self.update_node_geometry(id, NodeGeometry { center, size })
    }

    pub fn resize_node(&mut self, id: &NodeId, size: Size) -> EngineResult<()> {
        let center = self.node(id).ok_or_else(|| EngineError::missing_node(id))?.center();
        self.update_node_geometry(id, NodeGeometry { center, size })
    }

    /// Merge `patch` into the node's content. Returns whether anything changed.
    pub fn update_node_content(&mut self, id: &NodeId, patch: &ContentPatch) -> EngineResult<bool> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| EngineError::missing_node(id))?;
        let changed = patch.apply_to(&mut node.content);
        if changed {
            self.changes.structural = true;
        }
        Ok(changed)
    }

    /// Recompute every incident curve; returns how many were refreshed.
    fn refresh_incident_curves(&mut self, id: &NodeId) -> usize {
        let Some(edge_ids) = self.incident.get(id) else {
            return 0;
        };
        let mut refreshed = 0;
        for edge_id in edge_ids {
            let Some(edge) = self.edges.get(edge_id) else {
                continue;
            };
            if let Some(curve) = edge_curve(&self.nodes, edge) {
                self.curves.insert(edge_id.clone(), curve);
                refreshed += 1;
            }
        }
        refreshed
    }

    // ------------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------------

    /// Connect two existing, distinct nodes.
    pub fn add_edge(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        source_anchor: AnchorSide,
        target_anchor: AnchorSide,
    ) -> EngineResult<EdgeId> {
        if source == target {
            return Err(EngineError::DegenerateLink(source.clone()));
        }
        for id in [source, target] {
            if !self.nodes.contains_key(id) {
                return Err(EngineError::missing_node(id));
            }
        }
        let id = EdgeId::generate();
        self.insert_edge(Edge {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            source_anchor,
            target_anchor,
        });
        debug!(edge = %id, %source, %target, "Added edge");
        Ok(id)
    }

    /// Connect two nodes with automatically chosen anchor sides.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> EngineResult<EdgeId> {
        if source == target {
            return Err(EngineError::DegenerateLink(source.clone()));
        }
        let (source_anchor, target_anchor) = match (self.node(source), self.node(target)) {
            (Some(s), Some(t)) => auto_anchors(s, t),
            (None, _) => return Err(EngineError::missing_node(source)),
            (_, None) => return Err(EngineError::missing_node(target)),
        };
        self.add_edge(source, target, source_anchor, target_anchor)
    }

    pub fn delete_edge(&mut self, id: &EdgeId) -> EngineResult<Edge> {
        let edge = self
            .remove_edge_record(id)
            .ok_or_else(|| EngineError::missing_edge(id))?;
        self.changes.structural = true;
        Ok(edge)
    }

    fn insert_edge(&mut self, edge: Edge) {
        let id = edge.id.clone();
        if let Some(curve) = edge_curve(&self.nodes, &edge) {
            self.curves.insert(id.clone(), curve);
        }
        for endpoint in [&edge.source, &edge.target] {
            self.incident
                .entry(endpoint.clone())
                .or_default()
                .push(id.clone());
        }
        self.edges.insert(id, edge);
        self.changes.structural = true;
    }

    fn remove_edge_record(&mut self, id: &EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(id)?;
        self.curves.remove(id);
        for endpoint in [&edge.source, &edge.target] {
            if let Some(list) = self.incident.get_mut(endpoint) {
                list.retain(|e| e != id);
            }
        }
        Some(edge)
    }
}

fn edge_curve(nodes: &IndexMap<NodeId, Node>, edge: &Edge) -> Option<CubicCurve> {
    let source = nodes.get(&edge.source)?;
    let target = nodes.get(&edge.target)?;
    Some(curve_between(
        source,
        edge.source_anchor,
        target,
        edge.target_anchor,
    ))
}

/// Size a node of this content gets before anything is measured.
pub fn default_size(content: &NodeContent) -> Size {
    match content {
        NodeContent::Text { .. } => Size::from(DEFAULT_NODE_SIZE),
        NodeContent::Image { .. } => Size::from((IMAGE_MAX_WIDTH, IMAGE_MAX_WIDTH)),
        NodeContent::Entity(card) => match card.kind {
            EntityKind::Person { .. } => Size::from(PERSON_CARD_SIZE),
            EntityKind::Company { .. } => Size::from(COMPANY_CARD_SIZE),
        },
    }
}
