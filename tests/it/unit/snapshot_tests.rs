//! Snapshot tests using the insta crate.
//!
//! Inline snapshots pin the JSON field names hosts and saved documents rely
//! on. To update them after an intentional change:
//! ```sh
//! cargo insta test --accept
//! ```

use linkboard::error::EngineError;
use linkboard::geometry::curve_between;
use linkboard::notifications::{Notice, NoticeQueue};
use linkboard::types::{
    AnchorSide, Edge, EdgeId, EntityCard, EntityKind, Node, NodeContent, NodeId, point, size,
};

// ============================================================================
// Serialized records
// ============================================================================

#[test]
fn snapshot_edge_record() {
    let edge = Edge {
        id: EdgeId::new("edge_1"),
        source: NodeId::root(),
        target: NodeId::new("node_a"),
        source_anchor: AnchorSide::Right,
        target_anchor: AnchorSide::Left,
    };
    insta::assert_json_snapshot!(edge, @r#"
    {
      "id": "edge_1",
      "source": "root",
      "target": "node_a",
      "source_anchor": "right",
      "target_anchor": "left"
    }
    "#);
}

#[test]
fn snapshot_person_card_content() {
    let content = NodeContent::Entity(EntityCard {
        kind: EntityKind::Person {
            name: "Ada".into(),
            age: "36".into(),
            details: "Analyst".into(),
        },
        photo: None,
    });
    insta::assert_json_snapshot!(content, @r#"
    {
      "type": "entity",
      "kind": {
        "entity_type": "person",
        "name": "Ada",
        "age": "36",
        "details": "Analyst"
      },
      "photo": null
    }
    "#);
}

#[test]
fn snapshot_text_content() {
    insta::assert_json_snapshot!(NodeContent::text("Main Topic"), @r#"
    {
      "type": "text",
      "label": "Main Topic"
    }
    "#);
}

#[test]
fn snapshot_protected_root_notice() {
    let mut queue = NoticeQueue::new();
    queue.push(Notice::from_error(&EngineError::ProtectedEntity(NodeId::root())));
    let notices = queue.drain();
    insta::assert_json_snapshot!(notices[0], @r#"
    {
      "id": 1,
      "level": "warning",
      "message": "The main topic cannot be removed.",
      "blocking": true
    }
    "#);
}

// ============================================================================
// Connector paths
// ============================================================================

#[test]
fn snapshot_horizontal_connector_path() {
    let root = Node::new(NodeId::root(), point(0.0, 0.0), size(150.0, 50.0), NodeContent::text("a"));
    let child = Node::new(
        NodeId::new("node_a"),
        point(180.0, 0.0),
        size(150.0, 50.0),
        NodeContent::text("b"),
    );
    let curve = curve_between(&root, AnchorSide::Right, &child, AnchorSide::Left);
    insta::assert_snapshot!(curve.to_svg_path(), @"M 75 0 C 175 0, 5 0, 105 0");
}

#[test]
fn snapshot_vertical_connector_path() {
    let root = Node::new(NodeId::root(), point(0.0, 0.0), size(150.0, 50.0), NodeContent::text("a"));
    let child = Node::new(
        NodeId::new("node_b"),
        point(0.0, 80.0),
        size(150.0, 50.0),
        NodeContent::text("b"),
    );
    let curve = curve_between(&root, AnchorSide::Bottom, &child, AnchorSide::Top);
    insta::assert_snapshot!(curve.to_svg_path(), @"M 0 25 C 0 125, 0 -45, 0 55");
}
