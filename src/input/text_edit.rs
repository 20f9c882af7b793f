//! In-place text editing of text nodes.
//!
//! The label itself only changes on commit. While the edit is open the
//! node is resized to fit the draft on every keystroke, through the regular
//! geometry path so connectors follow.

use crate::editor::{Editor, EditorEvent};
use crate::error::{EngineError, EngineResult};
use crate::input::InputState;
use crate::measure::text_node_size;
use crate::types::{ContentPatch, NodeContent, NodeId};
use tracing::{debug, warn};

impl Editor {
    /// Open a text edit on `id`, seeded with its label. Returns false for
    /// nodes that are not text nodes. An edit already open elsewhere is
    /// committed first.
    pub fn begin_text_edit(&mut self, id: &NodeId) -> EngineResult<bool> {
        let Some(node) = self.canvas.board.node(id) else {
            return Err(self.rejected(EngineError::missing_node(id)));
        };
        let NodeContent::Text { label } = &node.content else {
            return Ok(false);
        };
        if self.canvas.input_state.editing_node() == Some(id) {
            return Ok(true);
        }
        let label = label.clone();
        let original_size = node.size();

        if self.canvas.input_state.is_editing_text() {
            self.commit_text_edit();
        } else if self.canvas.input_state.is_linking() {
            self.cancel_linking();
        }

        debug!(node = %id, "Text edit started");
        self.canvas.input_state = InputState::EditingText {
            node: id.clone(),
            draft: label.clone(),
            original_label: label.clone(),
            original_size,
        };
        self.events.push(EditorEvent::TextEditStarted { node: id.clone() });
        self.fit_to_draft(id, &label);
        self.sync();
        Ok(true)
    }

    /// Replace the draft text and resize the node to fit it.
    pub fn update_text_draft(&mut self, text: &str) -> bool {
        let InputState::EditingText { node, draft, .. } = &mut self.canvas.input_state else {
            return false;
        };
        draft.clear();
        draft.push_str(text);
        let node = node.clone();
        self.fit_to_draft(&node, text);
        self.sync();
        true
    }

    /// Store the draft as the label. Returns false when no edit is open.
    pub fn commit_text_edit(&mut self) -> bool {
        if !self.canvas.input_state.is_editing_text() {
            return false;
        }
        let InputState::EditingText { node, draft, .. } = std::mem::take(&mut self.canvas.input_state)
        else {
            return false;
        };
        if let Err(e) = self
            .canvas
            .board
            .update_node_content(&node, &ContentPatch::label(draft))
        {
            warn!(error = %e, "Edited node is gone");
        }
        debug!(%node, "Text edit committed");
        self.events.push(EditorEvent::TextEditFinished {
            node,
            committed: true,
        });
        self.sync();
        true
    }

    /// Drop the draft, restoring the label and the size from before the edit.
    pub fn cancel_text_edit(&mut self) -> bool {
        if !self.canvas.input_state.is_editing_text() {
            return false;
        }
        let InputState::EditingText {
            node,
            original_label,
            original_size,
            ..
        } = std::mem::take(&mut self.canvas.input_state)
        else {
            return false;
        };
        if self.canvas.board.contains_node(&node) {
            let restored = self
                .canvas
                .board
                .update_node_content(&node, &ContentPatch::label(original_label))
                .and_then(|_| self.canvas.board.resize_node(&node, original_size));
            if let Err(e) = restored {
                warn!(error = %e, "Could not restore node");
            }
        }
        debug!(%node, "Text edit cancelled");
        self.events.push(EditorEvent::TextEditFinished {
            node,
            committed: false,
        });
        self.sync();
        true
    }

    fn fit_to_draft(&mut self, id: &NodeId, draft: &str) {
        let fitted = text_node_size(draft, self.measurer.as_ref());
        let unchanged = self.canvas.board.node(id).is_some_and(|n| n.size() == fitted);
        if !unchanged {
            if let Err(e) = self.canvas.board.resize_node(id, fitted) {
                warn!(error = %e, "Could not fit node to draft");
            }
        }
    }
}
