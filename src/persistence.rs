//! Board snapshots: the persisted shape of a diagram.
//!
//! The native format is the serde encoding of [`BoardSnapshot`]. Files written
//! by the older browser editor use a flat record per node (`label`, `type`,
//! `imageData`, `entityType`, ...) and camelCase edge anchors; those are
//! accepted through a secondary decode path.

use crate::board::default_size;
use crate::error::{EngineError, EngineResult};
use crate::types::{
    AnchorSide, Edge, EdgeId, EntityCard, EntityKind, Node, NodeContent, NodeId, Size,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Every node and edge of a board, keyed by id in z-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub nodes: IndexMap<NodeId, Node>,
    pub edges: IndexMap<EdgeId, Edge>,
}

impl BoardSnapshot {
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a snapshot, trying the native format first and the legacy flat
    /// record format second. Only fails if neither decodes to a valid board.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let native = serde_json::from_str::<BoardSnapshot>(json)
            .map_err(EngineError::from)
            .and_then(|snapshot| snapshot.validate().map(|()| snapshot));
        let native_err = match native {
            Ok(snapshot) => return Ok(snapshot),
            Err(err) => err,
        };
        debug!(error = %native_err, "Native decode failed, trying legacy format");

        let legacy = serde_json::from_str::<LegacySnapshot>(json)
            .map_err(EngineError::from)
            .map(LegacySnapshot::into_snapshot)
            .and_then(|snapshot| snapshot.validate().map(|()| snapshot));
        match legacy {
            Ok(snapshot) => {
                debug!(nodes = snapshot.nodes.len(), "Decoded legacy snapshot");
                Ok(snapshot)
            }
            Err(legacy_err) => {
                warn!(native = %native_err, legacy = %legacy_err, "Import rejected");
                Err(EngineError::MalformedImport(format!(
                    "{native_err}; legacy decode: {legacy_err}"
                )))
            }
        }
    }

    /// Structural checks a board relies on: the root exists, keys match
    /// record ids, geometry is finite with positive size and every edge
    /// joins two distinct existing nodes.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.nodes.contains_key(&NodeId::root()) {
            return Err(malformed("missing root node"));
        }
        for (key, node) in &self.nodes {
            if key != &node.id {
                return Err(malformed(format!("node key {key} does not match id {}", node.id)));
            }
            let finite = [node.x, node.y, node.width, node.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || node.width <= 0.0 || node.height <= 0.0 {
                return Err(malformed(format!("node {key} has invalid geometry")));
            }
        }
        for (key, edge) in &self.edges {
            if key != &edge.id {
                return Err(malformed(format!("edge key {key} does not match id {}", edge.id)));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(malformed(format!("edge {key} references missing node {endpoint}")));
                }
            }
            if edge.source == edge.target {
                return Err(malformed(format!("edge {key} links node {} to itself", edge.source)));
            }
        }
        Ok(())
    }
}

fn malformed(msg: impl Into<String>) -> EngineError {
    EngineError::MalformedImport(msg.into())
}

// ============================================================================
// Legacy flat records
// ============================================================================

#[derive(Deserialize)]
struct LegacySnapshot {
    nodes: IndexMap<String, LegacyNode>,
    #[serde(default)]
    edges: IndexMap<String, LegacyEdge>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyNode {
    #[serde(default)]
    id: Option<String>,
    x: f32,
    y: f32,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    image_data: Option<String>,
    #[serde(default)]
    entity_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    cnpj: Option<String>,
    #[serde(default)]
    photo_data: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEdge {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    source_anchor: AnchorSide,
    target_anchor: AnchorSide,
}

impl LegacySnapshot {
    fn into_snapshot(self) -> BoardSnapshot {
        let nodes = self
            .nodes
            .into_iter()
            .map(|(key, record)| {
                let node = record.into_node(key);
                (node.id.clone(), node)
            })
            .collect();
        let edges = self
            .edges
            .into_iter()
            .map(|(key, record)| {
                let id = EdgeId::new(record.id.unwrap_or(key));
                let edge = Edge {
                    id: id.clone(),
                    source: NodeId::new(record.source),
                    target: NodeId::new(record.target),
                    source_anchor: record.source_anchor,
                    target_anchor: record.target_anchor,
                };
                (id, edge)
            })
            .collect();
        BoardSnapshot { nodes, edges }
    }
}

impl LegacyNode {
    fn into_node(self, key: String) -> Node {
        let content = match self.kind.as_deref() {
            Some("image") => NodeContent::Image {
                image_data: self.image_data.unwrap_or_default(),
                label: self.label.unwrap_or_default(),
            },
            Some("entity") => {
                let name = self.name.unwrap_or_default();
                let kind = match self.entity_type.as_deref() {
                    Some("person") => EntityKind::Person {
                        name,
                        age: self.age.unwrap_or_default(),
                        details: self.details.unwrap_or_default(),
                    },
                    // the old renderer drew every non-person entity as a company
                    _ => EntityKind::Company {
                        name,
                        registration_id: self.cnpj.unwrap_or_default(),
                    },
                };
                NodeContent::Entity(EntityCard {
                    kind,
                    photo: self.photo_data,
                })
            }
            _ => NodeContent::text(self.label.unwrap_or_default()),
        };
        let fallback = default_size(&content);
        let size = Size {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        };
        Node {
            id: NodeId::new(self.id.unwrap_or(key)),
            x: self.x,
            y: self.y,
            width: size.width,
            height: size.height,
            content,
        }
    }
}
