//! Named editor operations.
//!
//! Toolbar buttons, node controls and keyboard shortcuts all end up here, so
//! nothing is reachable from only one of them.

use crate::types::{AnchorSide, EntityType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// New text node at the viewport center
    AddNode,
    /// New text node next to the active node, connected to it
    AddChild(AnchorSide),
    /// New entity card at the viewport center
    AddEntity(EntityType),
    /// Ask the host for an image file; it answers with `add_image_node`
    AddImage,
    /// Delete the active node: the one the overlay controls surround
    DeleteSelection,
    /// Enter linking mode from the active node
    StartLinking,
    /// Start editing the selected text node
    EditText,
    /// Store the current text draft
    CommitText,
    /// Escape: cancel the text edit or linking, else clear the selection
    Cancel,
    /// Clear selection and hover
    DismissSelection,
}

impl Command {
    /// Map a key press to a command. `key` uses DOM key names (`"a"`,
    /// `"Delete"`, `"Tab"`, `"F2"`, ...); `ctrl` is Ctrl or Cmd.
    pub fn from_shortcut(key: &str, ctrl: bool) -> Option<Command> {
        if ctrl {
            return match key {
                "Enter" => Some(Command::CommitText),
                _ => None,
            };
        }
        match key {
            "Delete" | "Backspace" => Some(Command::DeleteSelection),
            "Tab" => Some(Command::AddChild(AnchorSide::Right)),
            "F2" => Some(Command::EditText),
            "Escape" => Some(Command::Cancel),
            _ => match key.to_lowercase().as_str() {
                "a" => Some(Command::AddNode),
                "e" => Some(Command::AddEntity(EntityType::Person)),
                "i" => Some(Command::AddImage),
                "l" => Some(Command::StartLinking),
                _ => None,
            },
        }
    }

    /// Commands that still apply while a text field has focus.
    pub fn allowed_while_editing(&self) -> bool {
        matches!(self, Command::CommitText | Command::Cancel)
    }
}
