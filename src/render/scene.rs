//! Scene description - the renderable projection of a board
//!
//! A [`Scene`] is derived entirely from the [`Board`] plus the session
//! highlights and can be thrown away and rebuilt at any time. Edges come
//! first so they draw beneath nodes; nodes follow in z-order.
//!
//! ## Performance Notes
//!
//! Full rebuilds happen only on structural changes. Drags and text edits go
//! through [`Scene::patch_node`], which touches one node element and the
//! paths of its incident edges.

use crate::board::Board;
use crate::camera::Camera;
use crate::constants::CONTENT_INSET;
use crate::geometry::CubicCurve;
use crate::input::coords::AffineTransform;
use crate::profile_scope;
use crate::types::{Bounds, EdgeId, EntityKind, Node, NodeContent, NodeId, Point, point, size};
use serde::Serialize;
use std::collections::HashMap;

/// Per-node session flags the renderer needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
    /// Node currently in text edit, with its live draft
    pub editing: Option<(NodeId, String)>,
}

impl Highlights {
    fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    fn is_hovered(&self, id: &NodeId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    fn draft_for(&self, id: &NodeId) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|(node, _)| node == id)
            .map(|(_, draft)| draft.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeElement {
    pub id: EdgeId,
    pub curve: CubicCurve,
    /// SVG path data for the curve
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeElement {
    pub id: NodeId,
    /// World-space center; everything below is relative to it
    pub translate: Point,
    /// Background rect `(-w/2, -h/2, w, h)`
    pub rect: Bounds,
    /// Area available to the body, inset from the rect
    pub content_box: Bounds,
    pub selected: bool,
    pub hovered: bool,
    pub body: NodeBody,
}

/// What to draw inside a node's content box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeBody {
    Text {
        lines: Vec<String>,
        /// The host shows an editor instead of static text
        editing: bool,
    },
    Image {
        source: String,
        caption: String,
    },
    Person {
        photo: Option<String>,
        name: String,
        age: String,
        details: String,
    },
    Company {
        photo: Option<String>,
        name: String,
        registration_id: String,
    },
}

impl NodeBody {
    fn from_content(content: &NodeContent, draft: Option<&str>) -> Self {
        match content {
            NodeContent::Text { label } => NodeBody::Text {
                lines: draft.unwrap_or(label).split('\n').map(str::to_owned).collect(),
                editing: draft.is_some(),
            },
            NodeContent::Image { image_data, label } => NodeBody::Image {
                source: image_data.clone(),
                caption: label.clone(),
            },
            NodeContent::Entity(card) => match &card.kind {
                EntityKind::Person { name, age, details } => NodeBody::Person {
                    photo: card.photo.clone(),
                    name: name.clone(),
                    age: age.clone(),
                    details: details.clone(),
                },
                EntityKind::Company {
                    name,
                    registration_id,
                } => NodeBody::Company {
                    photo: card.photo.clone(),
                    name: name.clone(),
                    registration_id: registration_id.clone(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Camera matrix applied to the whole world layer
    pub view: AffineTransform,
    pub edges: Vec<EdgeElement>,
    pub nodes: Vec<NodeElement>,
    edge_slots: HashMap<EdgeId, usize>,
    node_slots: HashMap<NodeId, usize>,
}

impl Scene {
    /// Rebuild everything from the board.
    pub fn build(board: &Board, camera: &Camera, highlights: &Highlights) -> Self {
        profile_scope!("Scene::build");
        let edges: Vec<EdgeElement> = board
            .edges()
            .filter_map(|edge| board.curve(&edge.id).map(|curve| edge_element(&edge.id, curve)))
            .collect();
        let nodes: Vec<NodeElement> = board
            .nodes()
            .map(|node| node_element(node, highlights))
            .collect();

        Self {
            view: camera.matrix(),
            edge_slots: edges
                .iter()
                .enumerate()
                .map(|(i, e)| (e.id.clone(), i))
                .collect(),
            node_slots: nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id.clone(), i))
                .collect(),
            edges,
            nodes,
        }
    }

    /// Refresh one node's element and its incident edge paths in place.
    /// Returns false if the node has no element yet (a rebuild is needed).
    pub fn patch_node(&mut self, board: &Board, id: &NodeId, highlights: &Highlights) -> bool {
        let (Some(node), Some(&slot)) = (board.node(id), self.node_slots.get(id)) else {
            return false;
        };
        self.nodes[slot] = node_element(node, highlights);

        for edge_id in board.incident_edges(id) {
            let (Some(curve), Some(&edge_slot)) = (board.curve(edge_id), self.edge_slots.get(edge_id))
            else {
                return false;
            };
            self.edges[edge_slot] = edge_element(edge_id, curve);
        }
        true
    }

    /// Update selected/hovered/editing flags without touching geometry.
    pub fn apply_highlights(&mut self, board: &Board, highlights: &Highlights) {
        for element in &mut self.nodes {
            element.selected = highlights.is_selected(&element.id);
            element.hovered = highlights.is_hovered(&element.id);
            if let Some(node) = board.node(&element.id) {
                element.body = NodeBody::from_content(&node.content, highlights.draft_for(&node.id));
            }
        }
    }

    pub fn set_view(&mut self, camera: &Camera) {
        self.view = camera.matrix();
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeElement> {
        self.node_slots.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeElement> {
        self.edge_slots.get(id).map(|&slot| &self.edges[slot])
    }
}

fn edge_element(id: &EdgeId, curve: &CubicCurve) -> EdgeElement {
    EdgeElement {
        id: id.clone(),
        curve: *curve,
        path: curve.to_svg_path(),
    }
}

fn node_element(node: &Node, highlights: &Highlights) -> NodeElement {
    let rect = Bounds::from_center(Point::ZERO, node.size());
    let inset = CONTENT_INSET * 2.0;
    let content_box = Bounds::from_center(
        Point::ZERO,
        size(
            (node.width - inset).max(0.0),
            (node.height - inset).max(0.0),
        ),
    );
    NodeElement {
        id: node.id.clone(),
        translate: point(node.x, node.y),
        rect,
        content_box,
        selected: highlights.is_selected(&node.id),
        hovered: highlights.is_hovered(&node.id),
        body: NodeBody::from_content(&node.content, highlights.draft_for(&node.id)),
    }
}
