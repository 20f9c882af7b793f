//! Editing Workflow Integration Tests

use crate::helpers::{
    TestEditorBuilder, assert_edge, assert_node_center, assert_node_count, mouse_click,
    root_only_editor, screen_center,
};
use linkboard::commands::Command;
use linkboard::editor::EditorEvent;
use linkboard::error::EngineError;
use linkboard::types::{AnchorSide, EntityCard, EntityType, NodeContent, NodeId, Point, point};

#[test]
fn test_add_child_to_the_right_of_root() {
    let mut editor = root_only_editor();
    let root = NodeId::root();

    editor.execute(Command::AddChild(AnchorSide::Right)).unwrap();

    assert_node_count(&editor, 2);
    let child = editor.selected().cloned().expect("child is selected");
    assert_ne!(child, root);
    assert_node_center(&editor, &child, (180.0, 0.0));
    assert_edge(&editor, &root, &child, (AnchorSide::Right, AnchorSide::Left));
    assert_eq!(
        editor.board().node(&child).unwrap().content,
        NodeContent::text("New Node")
    );
    assert_eq!(editor.scene().nodes.len(), 2);
    assert_eq!(editor.scene().edges.len(), 1);
}

#[test]
fn test_add_child_in_every_direction() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    let expected = [
        (AnchorSide::Top, (0.0, -80.0)),
        (AnchorSide::Bottom, (0.0, 80.0)),
        (AnchorSide::Left, (-180.0, 0.0)),
        (AnchorSide::Right, (180.0, 0.0)),
    ];
    for (side, center) in expected {
        let child = editor.add_child(&root, side).unwrap();
        assert_node_center(&editor, &child, center);
        assert_edge(&editor, &root, &child, (side, side.opposite()));
    }
    assert_eq!(editor.board().incident_edges(&root).len(), 4);
}

#[test]
fn test_protected_root_cannot_be_deleted() {
    let mut editor = root_only_editor();
    assert_eq!(editor.selected(), Some(&NodeId::root()));

    let result = editor.execute(Command::DeleteSelection);

    assert_eq!(result, Err(EngineError::ProtectedEntity(NodeId::root())));
    assert_node_count(&editor, 1);
    assert!(editor.notices().has_blocking());
    let notices = editor.take_notices();
    assert_eq!(notices[0].message, "The main topic cannot be removed.");
}

#[test]
fn test_delete_removes_exactly_incident_edges() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    let right = editor.add_child(&root, AnchorSide::Right).unwrap();
    let left = editor.add_child(&root, AnchorSide::Left).unwrap();
    let below = editor.add_child(&root, AnchorSide::Bottom).unwrap();
    editor.connect(&right, &below).unwrap();
    editor.connect(&left, &below).unwrap();
    assert_eq!(editor.board().edge_count(), 5);

    editor.delete_node(&right).unwrap();

    assert_node_count(&editor, 3);
    assert_eq!(editor.board().edge_count(), 3);
    assert!(editor.board().edges().all(|e| e.source != right && e.target != right));
    assert_eq!(editor.scene().edges.len(), 3);
    assert!(editor.scene().node(&right).is_none());
}

#[test]
fn test_delete_clears_hover_and_selection() {
    let mut editor = root_only_editor();
    let child = editor.add_child(&NodeId::root(), AnchorSide::Right).unwrap();
    editor.handle_pointer(&linkboard::PointerEvent::mouse_move(point(180.0, 0.0), 0));
    assert_eq!(editor.hovered(), Some(&child));

    editor.delete_selection().unwrap();

    assert_eq!(editor.selected(), None);
    assert_eq!(editor.hovered(), None);
    assert!(editor.overlays().layout().is_none());
}

#[test]
fn test_linking_connects_to_clicked_node() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Target", (400.0, 0.0))
        .build();
    let root = NodeId::root();
    let target = ids[0].clone();

    assert!(editor.start_linking());
    assert!(editor.input_state().is_linking());
    assert!(editor.overlays().is_suppressed());

    let at = screen_center(&editor, &target);
    mouse_click(&mut editor, at, 0);

    assert!(editor.input_state().is_idle());
    assert_edge(&editor, &root, &target, (AnchorSide::Right, AnchorSide::Left));
    // pressing while linking never drags
    assert_node_center(&editor, &target, (400.0, 0.0));
    let events = editor.drain_events();
    assert!(matches!(
        events.last(),
        Some(EditorEvent::LinkingEnded { edge: Some(_), .. })
    ));
}

#[test]
fn test_linking_cancels_on_same_node_or_empty_canvas() {
    let mut editor = root_only_editor();

    editor.start_linking();
    mouse_click(&mut editor, Point::ZERO, 0);
    assert!(editor.input_state().is_idle());
    assert_eq!(editor.board().edge_count(), 0);

    editor.start_linking();
    mouse_click(&mut editor, point(500.0, 500.0), 1000);
    assert!(editor.input_state().is_idle());
    assert_eq!(editor.board().edge_count(), 0);
    // empty canvas while linking does not clear the selection
    assert_eq!(editor.selected(), Some(&NodeId::root()));

    editor.start_linking();
    assert!(editor.handle_shortcut("Escape", false));
    assert!(editor.input_state().is_idle());
    assert!(!editor.notices().has_blocking());
}

#[test]
fn test_linking_uses_vertical_anchors_for_nodes_far_below() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Below", (-300.0, 200.0))
        .build();
    editor.start_linking();
    let at = screen_center(&editor, &ids[0]);
    mouse_click(&mut editor, at, 0);
    assert_edge(
        &editor,
        &NodeId::root(),
        &ids[0],
        (AnchorSide::Bottom, AnchorSide::Top),
    );
}

#[test]
fn test_self_link_is_blocked_with_notice() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    let err = editor.connect(&root, &root).unwrap_err();
    assert_eq!(err, EngineError::DegenerateLink(root));
    assert!(editor.notices().has_blocking());
}

#[test]
fn test_double_click_edits_text_and_commit_resizes() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    mouse_click(&mut editor, Point::ZERO, 0);
    mouse_click(&mut editor, Point::ZERO, 120);

    assert_eq!(editor.input_state().editing_node(), Some(&root));
    assert!(editor.overlays().is_suppressed());

    editor.update_text_draft("first line\nsecond, longer line");
    let size = editor.board().node(&root).unwrap().size();
    assert_eq!(size.width, 19.0 * 8.0 + 40.0);
    assert_eq!(size.height, 2.0 * 20.0 + 20.0);

    // pressing the canvas commits the edit
    mouse_click(&mut editor, point(600.0, 600.0), 2000);
    assert!(editor.input_state().is_idle());
    assert_eq!(
        editor.board().node(&root).unwrap().content,
        NodeContent::text("first line\nsecond, longer line")
    );
    let events = editor.drain_events();
    assert!(events.contains(&EditorEvent::TextEditStarted { node: root.clone() }));
    assert!(events.contains(&EditorEvent::TextEditFinished {
        node: root,
        committed: true
    }));
}

#[test]
fn test_empty_draft_keeps_positive_size() {
    let mut editor = root_only_editor();
    editor.execute(Command::EditText).unwrap();
    editor.update_text_draft("");
    let node = editor.board().node(&NodeId::root()).unwrap();
    assert!(node.width >= 60.0);
    assert!(node.height >= 40.0);
}

#[test]
fn test_double_click_on_image_and_entity_emits_events() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_node(
            NodeContent::Image {
                image_data: "data:image/png;base64,AAAA".into(),
                label: "photo.png".into(),
            },
            (500.0, 0.0),
        )
        .with_node(NodeContent::Entity(EntityCard::person()), (0.0, 500.0))
        .build();

    for (i, id) in ids.iter().enumerate() {
        let at = screen_center(&editor, id);
        let t = i as u64 * 1000;
        mouse_click(&mut editor, at, t);
        mouse_click(&mut editor, at, t + 100);
    }

    let events = editor.drain_events();
    assert_eq!(
        events,
        vec![
            EditorEvent::OpenImage {
                node: ids[0].clone(),
                image_data: "data:image/png;base64,AAAA".into()
            },
            EditorEvent::EditEntity {
                node: ids[1].clone()
            },
        ]
    );
    assert!(editor.input_state().is_idle());
}

#[test]
fn test_shortcuts_drive_commands() {
    let mut editor = root_only_editor();
    assert!(editor.handle_shortcut("a", false));
    assert!(editor.handle_shortcut("e", false));
    assert!(editor.handle_shortcut("Tab", false));
    assert_node_count(&editor, 4);

    assert!(editor.handle_shortcut("l", false));
    assert!(editor.input_state().is_linking());
    assert!(editor.handle_shortcut("Escape", false));
    assert!(editor.input_state().is_idle());

    // Escape while idle dismisses the selection
    assert!(editor.handle_shortcut("Escape", false));
    assert_eq!(editor.selected(), None);
    assert!(!editor.handle_shortcut("q", false));
}

#[test]
fn test_rejected_shortcut_is_still_handled() {
    let mut editor = root_only_editor();
    assert!(editor.handle_shortcut("Delete", false));
    assert_node_count(&editor, 1);
    let notices = editor.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "The main topic cannot be removed.");
}

#[test]
fn test_image_shortcut_asks_host_for_a_file() {
    let mut editor = root_only_editor();
    editor.drain_events();
    assert!(editor.handle_shortcut("i", false));
    assert_eq!(editor.drain_events(), vec![EditorEvent::ImageRequested]);
    assert_node_count(&editor, 1);

    editor.begin_text_edit(&NodeId::root()).unwrap();
    editor.drain_events();
    assert!(!editor.handle_shortcut("i", false));
    assert!(editor.drain_events().is_empty());
}

#[test]
fn test_unreadable_image_pushes_notice() {
    let mut editor = root_only_editor();
    let err = editor.add_image_node("data:image/png;base64,AAAA", "broken.png");
    assert!(matches!(err, Err(EngineError::InvalidImage(_))));
    assert_node_count(&editor, 1);

    let notices = editor.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "The image could not be read.");
    assert!(notices[0].blocking);
}

#[test]
fn test_commands_act_on_the_node_the_controls_surround() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    let root = NodeId::root();
    assert_eq!(editor.selected(), Some(&root));

    let at = screen_center(&editor, &ids[0]);
    editor.handle_pointer(&linkboard::input::PointerEvent::mouse_move(at, 0));
    assert_eq!(editor.hovered(), Some(&ids[0]));
    assert_eq!(editor.overlays().visible_layout().unwrap().target, root);

    assert!(editor.handle_shortcut("Tab", false));
    assert_eq!(editor.board().incident_edges(&root).len(), 1);
    assert!(editor.board().incident_edges(&ids[0]).is_empty());
}

#[test]
fn test_delete_without_target_asks_for_selection() {
    let mut editor = root_only_editor();
    editor.execute(Command::DismissSelection).unwrap();
    editor.execute(Command::DeleteSelection).unwrap();
    assert_node_count(&editor, 1);
    assert_eq!(editor.notices().count(), 1);
}

#[test]
fn test_entity_dialog_update() {
    let mut editor = root_only_editor();
    let id = editor.add_entity_node(EntityType::Company);
    let patch = linkboard::ContentPatch::default()
        .with_name("ACME")
        .with_registration_id("12.345.678/0001-00");
    editor.update_entity(&id, &patch).unwrap();

    let node = editor.board().node(&id).unwrap();
    assert_eq!(node.content.display_label(), "ACME");
    assert_eq!(node.size(), linkboard::types::size(280.0, 130.0));
}
