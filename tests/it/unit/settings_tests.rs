//! Unit tests for settings persistence.

use linkboard::editor::Editor;
use linkboard::settings::EditorSettings;
use linkboard::types::{NodeContent, NodeId, size};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = EditorSettings::default();
    settings.wheel_zoom_speed = 0.002;
    settings.gestures.drag_start_delay_ms = 250;
    settings.labels.root = "Case".to_string();
    settings.save_to(&path).unwrap();

    let loaded = EditorSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "labels": { "new_child": "Branch" } }"#).unwrap();

    let loaded = EditorSettings::load_from(&path).unwrap();
    let defaults = EditorSettings::default();
    assert_eq!(loaded.labels.new_child, "Branch");
    assert_eq!(loaded.labels.root, defaults.labels.root);
    assert_eq!(loaded.gestures, defaults.gestures);
    assert_eq!(loaded.overlays, defaults.overlays);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(EditorSettings::load_from(&path).is_err());
    assert!(EditorSettings::load_from(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_editor_uses_configured_labels() {
    let mut settings = EditorSettings::default();
    settings.labels.root = "Case".to_string();
    settings.labels.new_node = "Lead".to_string();

    let mut editor = Editor::with_settings(settings, size(0.0, 0.0));
    let root = editor.board().node(&NodeId::root()).unwrap();
    assert_eq!(root.content, NodeContent::text("Case"));

    let id = editor.add_node();
    assert_eq!(
        editor.board().node(&id).unwrap().content,
        NodeContent::text("Lead")
    );
}
