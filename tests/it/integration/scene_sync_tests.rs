//! The scene and overlays must always match the board, whichever path
//! (full rebuild or per-node patch) produced them.

use crate::helpers::{
    TestEditorBuilder, assert_close, assert_scene_consistent, mouse_click, mouse_drag,
    root_only_editor, screen_center,
};
use linkboard::input::PointerEvent;
use linkboard::render::NodeBody;
use linkboard::types::{AnchorSide, NodeId, Point, point};

#[test]
fn test_patched_scene_matches_rebuild_after_drag() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    let child = editor.add_child(&root, AnchorSide::Right).unwrap();
    editor.add_child(&child, AnchorSide::Bottom).unwrap();

    editor.handle_pointer(&PointerEvent::mouse_down(point(180.0, 0.0), 0));
    for step in 1..=10 {
        let at = point(180.0 + step as f32 * 7.0, step as f32 * -4.0);
        editor.handle_pointer(&PointerEvent::mouse_move(at, step * 10));
        assert_scene_consistent(&editor);
    }
    editor.handle_pointer(&PointerEvent::mouse_up(point(250.0, -40.0), 200));
    assert_scene_consistent(&editor);

    let element = editor.scene().node(&child).unwrap();
    assert_close(element.translate, point(250.0, -40.0));
}

#[test]
fn test_scene_tracks_camera_and_highlights() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();

    editor.handle_wheel(point(50.0, 50.0), -120.0);
    mouse_drag(&mut editor, point(500.0, 500.0), point(520.0, 480.0), 2, 0);
    assert_scene_consistent(&editor);

    let at = screen_center(&editor, &ids[0]);
    mouse_click(&mut editor, at, 1000);
    assert_scene_consistent(&editor);
    assert!(editor.scene().node(&ids[0]).unwrap().selected);
    assert!(!editor.scene().node(&NodeId::root()).unwrap().selected);
}

#[test]
fn test_scene_shows_live_draft() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    editor.begin_text_edit(&root).unwrap();
    editor.update_text_draft("draft\ntext");

    match &editor.scene().node(&root).unwrap().body {
        NodeBody::Text { lines, editing } => {
            assert!(editing);
            assert_eq!(lines, &vec!["draft".to_string(), "text".to_string()]);
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert_scene_consistent(&editor);
}

#[test]
fn test_overlays_follow_camera_changes() {
    let mut editor = root_only_editor();
    let before = editor.overlays().visible_layout().unwrap().context_menu;
    editor.pan_by(point(25.0, 10.0));
    let after = editor.overlays().visible_layout().unwrap().context_menu;
    assert_close(after, before + point(25.0, 10.0));

    editor.handle_wheel(Point::ZERO, 500.0);
    let layout = editor.overlays().visible_layout().unwrap();
    let zoom = editor.camera().zoom();
    assert_close(
        layout.screen_bounds.max,
        editor.world_to_screen(point(75.0, 25.0)),
    );
    assert!(zoom < 1.0);
}

#[test]
fn test_edge_paths_are_svg() {
    let mut editor = root_only_editor();
    let child = editor.add_child(&NodeId::root(), AnchorSide::Right).unwrap();
    let edge_id = editor.board().incident_edges(&child)[0].clone();
    let element = editor.scene().edge(&edge_id).unwrap();
    insta::assert_snapshot!(element.path, @"M 75 0 C 175 0, 5 0, 105 0");
}
