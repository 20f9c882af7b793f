//! Pointer and touch gesture tests: drag, pan, pinch, tap classification.

use crate::helpers::{
    TestEditorBuilder, assert_close, assert_node_center, mouse_drag, root_only_editor,
    screen_center, touch_press_release,
};
use linkboard::constants::{MAX_ZOOM, MIN_ZOOM};
use linkboard::geometry::anchor_point;
use linkboard::input::PointerEvent;
use linkboard::types::{AnchorSide, NodeId, Point, point};

#[test]
fn test_mouse_drag_moves_node_by_200px() {
    let mut editor = root_only_editor();
    let root = NodeId::root();
    let child = editor.add_child(&root, AnchorSide::Right).unwrap();
    editor.select(&root).unwrap();

    mouse_drag(&mut editor, Point::ZERO, point(0.0, 200.0), 4, 0);

    assert_node_center(&editor, &root, (0.0, 200.0));
    assert_node_center(&editor, &child, (180.0, 0.0));
    let edge_id = editor.board().incident_edges(&root)[0].clone();
    let curve = editor.board().curve(&edge_id).unwrap();
    let root_node = editor.board().node(&root).unwrap();
    assert_close(curve.start, anchor_point(root_node, AnchorSide::Right));
    assert!(editor.input_state().is_idle());
    assert!(editor.overlays().is_visible());
}

#[test]
fn test_drag_keeps_grab_offset() {
    let mut editor = root_only_editor();
    // grab 30px right of the center
    mouse_drag(&mut editor, point(30.0, 0.0), point(130.0, 50.0), 5, 0);
    assert_node_center(&editor, &NodeId::root(), (100.0, 50.0));
}

#[test]
fn test_overlays_hidden_during_drag_only() {
    let mut editor = root_only_editor();
    editor.handle_pointer(&PointerEvent::mouse_down(Point::ZERO, 0));
    editor.handle_pointer(&PointerEvent::mouse_move(point(40.0, 0.0), 10));
    assert!(editor.input_state().is_dragging());
    assert!(editor.overlays().is_suppressed());
    // the layout still tracks the node while hidden
    let layout = editor.overlays().layout().unwrap();
    assert_close(layout.add_buttons.right, point(40.0 + 75.0 + 20.0, 0.0));

    editor.handle_pointer(&PointerEvent::mouse_up(point(40.0, 0.0), 20));
    assert!(editor.overlays().is_visible());
}

#[test]
fn test_drag_at_zoom_moves_in_world_units() {
    let (mut editor, _) = TestEditorBuilder::new().with_zoom(0.5).build();
    mouse_drag(&mut editor, Point::ZERO, point(100.0, 0.0), 2, 0);
    assert_node_center(&editor, &NodeId::root(), (200.0, 0.0));
}

#[test]
fn test_short_still_touch_is_tap_not_drag() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    let at = screen_center(&editor, &ids[0]);

    touch_press_release(&mut editor, 1, at, point(3.0, 0.0), 0, 50, 150);

    assert_eq!(editor.selected(), Some(&ids[0]));
    assert_node_center(&editor, &ids[0], (300.0, 0.0));
}

#[test]
fn test_held_still_touch_past_drag_delay_is_still_a_tap() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    let at = screen_center(&editor, &ids[0]);

    // the move at 120ms promotes the press, the release at 150ms is a tap
    editor.handle_pointer(&PointerEvent::touch_start(1, at, 0));
    editor.handle_pointer(&PointerEvent::touch_move(1, at + point(3.0, 0.0), 120));
    assert!(editor.input_state().is_dragging());
    editor.handle_pointer(&PointerEvent::touch_end(1, at + point(3.0, 0.0), 150));

    assert_eq!(editor.selected(), Some(&ids[0]));
    assert_node_center(&editor, &ids[0], (300.0, 0.0));
    assert!(editor.input_state().is_idle());
    crate::helpers::assert_scene_consistent(&editor);
}

#[test]
fn test_moving_touch_drags_instead_of_tapping() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    let at = screen_center(&editor, &ids[0]);

    touch_press_release(&mut editor, 1, at, point(20.0, 0.0), 0, 50, 150);

    assert_eq!(editor.selected(), None);
    assert_node_center(&editor, &ids[0], (320.0, 0.0));
    assert!(editor.input_state().is_idle());
}

#[test]
fn test_long_touch_is_not_a_tap() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    let at = screen_center(&editor, &ids[0]);

    touch_press_release(&mut editor, 1, at, Point::ZERO, 0, 50, 400);

    assert_eq!(editor.selected(), None);
}

#[test]
fn test_held_touch_promotes_to_drag_on_tick() {
    let mut editor = root_only_editor();
    editor.handle_pointer(&PointerEvent::touch_start(7, Point::ZERO, 0));
    assert!(editor.input_state().is_idle());

    editor.tick(50);
    assert!(editor.input_state().is_idle());
    editor.tick(100);
    assert!(editor.input_state().is_dragging());

    editor.handle_pointer(&PointerEvent::touch_move(7, point(0.0, 60.0), 150));
    editor.handle_pointer(&PointerEvent::touch_end(7, point(0.0, 60.0), 200));
    assert_node_center(&editor, &NodeId::root(), (0.0, 60.0));
}

#[test]
fn test_pan_on_empty_canvas() {
    let mut editor = root_only_editor();
    mouse_drag(&mut editor, point(300.0, 300.0), point(350.0, 280.0), 3, 0);
    assert_close(editor.world_to_screen(Point::ZERO), point(50.0, -20.0));
    assert_eq!(editor.camera().zoom(), 1.0);
    assert_node_center(&editor, &NodeId::root(), (0.0, 0.0));
}

#[test]
fn test_pinch_zoom_keeps_midpoint_anchored_then_pans() {
    let mut editor = root_only_editor();
    let a = point(100.0, 100.0);
    let b = point(200.0, 100.0);
    let anchor = editor.screen_to_world(a.midpoint(b));

    editor.handle_pointer(&PointerEvent::touch_start(1, a, 0));
    editor.handle_pointer(&PointerEvent::touch_start(2, b, 10));
    assert!(editor.input_state().is_pinching());

    // fingers 150px apart: 1.5x
    let b2 = point(250.0, 100.0);
    editor.handle_pointer(&PointerEvent::touch_move(2, b2, 20));
    assert!((editor.camera().zoom() - 1.5).abs() < 1e-5);
    assert_close(editor.screen_to_world(a.midpoint(b2)), anchor);

    editor.handle_pointer(&PointerEvent::touch_end(2, b2, 30));
    assert!(editor.input_state().is_panning());

    let before = editor.world_to_screen(Point::ZERO);
    editor.handle_pointer(&PointerEvent::touch_move(1, point(110.0, 100.0), 40));
    assert_close(editor.world_to_screen(Point::ZERO), before + point(10.0, 0.0));

    editor.handle_pointer(&PointerEvent::touch_end(1, point(110.0, 100.0), 50));
    assert!(editor.input_state().is_idle());
    // a multi-touch gesture never taps, so the selection survives
    assert_eq!(editor.selected(), Some(&NodeId::root()));
}

#[test]
fn test_pinch_zoom_is_clamped() {
    let mut editor = root_only_editor();
    editor.handle_pointer(&PointerEvent::touch_start(1, point(0.0, 0.0), 0));
    editor.handle_pointer(&PointerEvent::touch_start(2, point(100.0, 0.0), 0));

    editor.handle_pointer(&PointerEvent::touch_move(2, point(1000.0, 0.0), 10));
    assert_eq!(editor.camera().zoom(), MAX_ZOOM);

    editor.handle_pointer(&PointerEvent::touch_move(2, point(5.0, 0.0), 20));
    assert_eq!(editor.camera().zoom(), MIN_ZOOM);
}

#[test]
fn test_second_finger_during_drag_becomes_pinch() {
    let mut editor = root_only_editor();
    editor.handle_pointer(&PointerEvent::touch_start(1, Point::ZERO, 0));
    editor.handle_pointer(&PointerEvent::touch_move(1, point(10.0, 0.0), 20));
    assert!(editor.input_state().is_dragging());

    editor.handle_pointer(&PointerEvent::touch_start(2, point(110.0, 0.0), 30));
    assert!(editor.input_state().is_pinching());
    assert!(!editor.overlays().is_suppressed());
}

#[test]
fn test_cancel_aborts_drag_without_tap() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    let at = screen_center(&editor, &ids[0]);

    editor.handle_pointer(&PointerEvent::touch_start(1, at, 0));
    editor.handle_pointer(&PointerEvent::touch_move(1, at + point(8.0, 0.0), 20));
    assert!(editor.input_state().is_dragging());
    editor.handle_pointer(&PointerEvent::touch_cancel(1, at + point(8.0, 0.0), 30));

    assert!(editor.input_state().is_idle());
    assert_eq!(editor.selected(), None);
    assert_node_center(&editor, &ids[0], (308.0, 0.0));
}

#[test]
fn test_mouse_hover_drives_overlays_without_selection() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_node("Other", (300.0, 0.0))
        .build();
    editor.clear_selection();
    assert!(editor.overlays().layout().is_none());

    editor.handle_pointer(&PointerEvent::mouse_move(point(300.0, 0.0), 0));
    assert_eq!(editor.hovered(), Some(&ids[0]));
    let layout = editor.overlays().visible_layout().unwrap();
    assert_eq!(layout.target, ids[0]);

    editor.handle_pointer(&PointerEvent::mouse_move(point(600.0, 400.0), 10));
    assert_eq!(editor.hovered(), None);
    assert!(editor.overlays().layout().is_none());
}

#[test]
fn test_click_on_empty_canvas_clears_selection() {
    let mut editor = root_only_editor();
    crate::helpers::mouse_click(&mut editor, point(400.0, 400.0), 0);
    assert_eq!(editor.selected(), None);
}
