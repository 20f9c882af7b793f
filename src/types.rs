//! Core types for the diagram engine.
//!
//! This module defines the records owned by the graph store (nodes, edges and
//! their content variants) together with the small geometric value types the
//! rest of the engine passes around.

use crate::constants::{MIN_NODE_HEIGHT, MIN_NODE_WIDTH, ROOT_NODE_ID};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use uuid::Uuid;

// ============================================================================
// Geometry Values
// ============================================================================

/// A 2D point. Whether it is in screen or world space depends on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Shorthand constructor for [`Point`].
#[inline]
pub const fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

impl Point {
    pub const ZERO: Point = point(0.0, 0.0);

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Point) -> Point {
        point((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        point(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[inline]
pub const fn size(width: f32, height: f32) -> Size {
    Size { width, height }
}

impl Size {
    /// Apply the node size floor so neither dimension can reach zero.
    pub fn floored(self) -> Size {
        size(
            sanitize_extent(self.width, MIN_NODE_WIDTH),
            sanitize_extent(self.height, MIN_NODE_HEIGHT),
        )
    }

    pub fn center(self) -> Point {
        point(self.width / 2.0, self.height / 2.0)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        size(width, height)
    }
}

/// NaN and non-positive extents collapse to the floor.
fn sanitize_extent(value: f32, floor: f32) -> f32 {
    if value.is_finite() { value.max(floor) } else { floor }
}

/// Axis-aligned rectangle given by its min and max corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn from_center(center: Point, size: Size) -> Self {
        let half = point(size.width / 2.0, size.height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: point(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: point(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn expanded(&self, padding: f32) -> Bounds {
        Bounds {
            min: self.min - point(padding, padding),
            max: self.max + point(padding, padding),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Unique, stable identifier of a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The protected root node's id
    pub fn root() -> Self {
        Self(ROOT_NODE_ID.to_string())
    }

    /// Generate a fresh id (`node_<uuid>`)
    pub fn generate() -> Self {
        Self(format!("node_{}", Uuid::new_v4().simple()))
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_NODE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id (`edge_<uuid>`)
    pub fn generate() -> Self {
        Self(format!("edge_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Anchors
// ============================================================================

/// Side of a node's bounding box where a connector attaches.
///
/// Also used as the direction of "add child" controls, since a child created
/// to the right of its parent is connected from the parent's right side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl AnchorSide {
    pub const ALL: [AnchorSide; 4] = [
        AnchorSide::Top,
        AnchorSide::Bottom,
        AnchorSide::Left,
        AnchorSide::Right,
    ];

    /// Outward unit normal of this side in world space (y grows downward).
    pub fn normal(self) -> Point {
        match self {
            AnchorSide::Top => point(0.0, -1.0),
            AnchorSide::Bottom => point(0.0, 1.0),
            AnchorSide::Left => point(-1.0, 0.0),
            AnchorSide::Right => point(1.0, 0.0),
        }
    }

    pub fn opposite(self) -> AnchorSide {
        match self {
            AnchorSide::Top => AnchorSide::Bottom,
            AnchorSide::Bottom => AnchorSide::Top,
            AnchorSide::Left => AnchorSide::Right,
            AnchorSide::Right => AnchorSide::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnchorSide::Top => "top",
            AnchorSide::Bottom => "bottom",
            AnchorSide::Left => "left",
            AnchorSide::Right => "right",
        }
    }
}

// ============================================================================
// Content
// ============================================================================

/// What a node displays. Sizing and rendering match on this exhaustively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    /// Plain text label; the node is sized from the measured text
    Text { label: String },
    /// Embedded image (data URI) with a caption
    Image { image_data: String, label: String },
    /// Structured person/company card
    Entity(EntityCard),
}

impl NodeContent {
    pub fn text(label: impl Into<String>) -> Self {
        NodeContent::Text {
            label: label.into(),
        }
    }

    /// Short name of the variant, for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeContent::Text { .. } => "text",
            NodeContent::Image { .. } => "image",
            NodeContent::Entity(card) => match card.kind {
                EntityKind::Person { .. } => "person",
                EntityKind::Company { .. } => "company",
            },
        }
    }

    /// The text a user would recognise the node by
    pub fn display_label(&self) -> &str {
        match self {
            NodeContent::Text { label } | NodeContent::Image { label, .. } => label,
            NodeContent::Entity(card) => card.kind.name(),
        }
    }
}

/// An entity card: a person or company record plus an optional photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityCard {
    pub kind: EntityKind,
    /// Photo as a data URI
    #[serde(default)]
    pub photo: Option<String>,
}

impl EntityCard {
    pub fn person() -> Self {
        Self {
            kind: EntityKind::Person {
                name: String::new(),
                age: String::new(),
                details: String::new(),
            },
            photo: None,
        }
    }

    pub fn company() -> Self {
        Self {
            kind: EntityKind::Company {
                name: String::new(),
                registration_id: String::new(),
            },
            photo: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum EntityKind {
    Person {
        name: String,
        age: String,
        details: String,
    },
    Company {
        name: String,
        registration_id: String,
    },
}

impl EntityKind {
    pub fn name(&self) -> &str {
        match self {
            EntityKind::Person { name, .. } | EntityKind::Company { name, .. } => name,
        }
    }
}

/// Which entity card to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityType {
    Person,
    Company,
}

/// A field-wise merge applied to a node's content.
///
/// Fields that do not exist on the target variant are ignored, so one patch
/// type serves text edits and entity dialogs alike.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentPatch {
    pub label: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub details: Option<String>,
    pub registration_id: Option<String>,
    /// `Some(None)` removes the photo
    pub photo: Option<Option<String>>,
}

impl ContentPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_registration_id(mut self, id: impl Into<String>) -> Self {
        self.registration_id = Some(id.into());
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Merge the patch into `content`. Returns true if anything changed.
    pub fn apply_to(&self, content: &mut NodeContent) -> bool {
        let before = content.clone();
        match content {
            NodeContent::Text { label } | NodeContent::Image { label, .. } => {
                if let Some(new_label) = &self.label {
                    label.clone_from(new_label);
                }
            }
            NodeContent::Entity(card) => {
                if let Some(photo) = &self.photo {
                    card.photo.clone_from(photo);
                }
                match &mut card.kind {
                    EntityKind::Person { name, age, details } => {
                        if let Some(v) = &self.name {
                            name.clone_from(v);
                        }
                        if let Some(v) = &self.age {
                            age.clone_from(v);
                        }
                        if let Some(v) = &self.details {
                            details.clone_from(v);
                        }
                    }
                    EntityKind::Company {
                        name,
                        registration_id,
                    } => {
                        if let Some(v) = &self.name {
                            name.clone_from(v);
                        }
                        if let Some(v) = &self.registration_id {
                            registration_id.clone_from(v);
                        }
                    }
                }
            }
        }
        *content != before
    }
}

// ============================================================================
// Records
// ============================================================================

/// A positioned node. `x`/`y` is the center in world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub content: NodeContent,
}

impl Node {
    pub fn new(id: NodeId, center: Point, size: Size, content: NodeContent) -> Self {
        let size = size.floored();
        Self {
            id,
            x: center.x,
            y: center.y,
            width: size.width,
            height: size.height,
            content,
        }
    }

    pub fn center(&self) -> Point {
        point(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        size(self.width, self.height)
    }

    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry {
            center: self.center(),
            size: self.size(),
        }
    }

    /// World-space bounding box
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center(), self.size())
    }
}

/// Position and size of a node, the unit of geometry mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
    pub center: Point,
    pub size: Size,
}

/// A directed connector between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_anchor: AnchorSide,
    pub target_anchor: AnchorSide,
}
