//! Node and edge operations, selection, and command dispatch.

use super::state::{Editor, EditorEvent};
use crate::board::default_size;
use crate::commands::Command;
use crate::constants::{CHILD_GAP, IMAGE_LABEL_MAX_CHARS};
use crate::error::{EngineError, EngineResult};
use crate::image_payload::image_dimensions;
use crate::input::InputState;
use crate::measure::{content_size, image_node_size};
use crate::notifications::Notice;
use crate::perf::measure;
use crate::types::{
    AnchorSide, ContentPatch, EdgeId, EntityCard, EntityType, NodeContent, NodeId, Point, point,
};
use tracing::{debug, info};

impl Editor {
    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    /// New text node at the viewport center.
    pub fn add_node(&mut self) -> NodeId {
        let content = NodeContent::text(self.settings.labels.new_node.clone());
        let center = self.viewport_center_world();
        self.add_node_at(content, center)
    }

    /// New node with `content` centered on a world position.
    pub fn add_node_at(&mut self, content: NodeContent, world: Point) -> NodeId {
        let id = self.canvas.board.add_node(content, world);
        self.sync();
        id
    }

    /// New text node beside `parent`, connected to it from the matching side.
    /// The child becomes the selection.
    pub fn add_child(&mut self, parent: &NodeId, direction: AnchorSide) -> EngineResult<NodeId> {
        let Some(parent_node) = self.canvas.board.node(parent) else {
            return Err(self.rejected(EngineError::missing_node(parent)));
        };
        let content = NodeContent::text(self.settings.labels.new_child.clone());
        let child_size = default_size(&content);
        let offset = match direction {
            AnchorSide::Top | AnchorSide::Bottom => {
                parent_node.height / 2.0 + child_size.height / 2.0 + CHILD_GAP
            }
            AnchorSide::Left | AnchorSide::Right => {
                parent_node.width / 2.0 + child_size.width / 2.0 + CHILD_GAP
            }
        };
        let normal = direction.normal();
        let parent_center = parent_node.center();
        let center = point(
            parent_center.x + normal.x * offset,
            parent_center.y + normal.y * offset,
        );

        let child = self.canvas.board.add_node_sized(content, center, child_size);
        if let Err(e) = self
            .canvas
            .board
            .add_edge(parent, &child, direction, direction.opposite())
        {
            self.sync();
            return Err(self.rejected(e));
        }
        debug!(%parent, %child, direction = direction.label(), "Added child");
        self.session.selected = Some(child.clone());
        self.sync();
        Ok(child)
    }

    /// New image node from a data URI; the pixel size is read from the
    /// payload. `file_name` becomes the caption.
    pub fn add_image_node(&mut self, image_data: &str, file_name: &str) -> EngineResult<NodeId> {
        let (width, height) = image_dimensions(image_data).map_err(|e| self.rejected(e))?;
        Ok(self.add_image_node_with_size(image_data, file_name, width, height))
    }

    /// New image node when the host already decoded the pixel dimensions.
    pub fn add_image_node_with_size(
        &mut self,
        image_data: impl Into<String>,
        label: &str,
        width: u32,
        height: u32,
    ) -> NodeId {
        let content = NodeContent::Image {
            image_data: image_data.into(),
            label: label.chars().take(IMAGE_LABEL_MAX_CHARS).collect(),
        };
        let center = self.viewport_center_world();
        let id = self
            .canvas
            .board
            .add_node_sized(content, center, image_node_size(width, height));
        self.sync();
        id
    }

    /// New empty person or company card at the viewport center.
    pub fn add_entity_node(&mut self, entity_type: EntityType) -> NodeId {
        let card = match entity_type {
            EntityType::Person => EntityCard::person(),
            EntityType::Company => EntityCard::company(),
        };
        let center = self.viewport_center_world();
        self.add_node_at(NodeContent::Entity(card), center)
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Delete a node and its connectors. Anything pointing at it (selection,
    /// hover, a drag, an open edit, a pending link) is dropped as well.
    pub fn delete_node(&mut self, id: &NodeId) -> EngineResult<()> {
        let removed = match self.canvas.board.delete_node(id) {
            Ok(removed) => removed,
            Err(e) => return Err(self.rejected(e)),
        };
        self.session.forget(id);
        self.abort_interactions_on(id);
        info!(node = %id, edges = removed.edges.len(), "Node deleted");
        self.sync();
        Ok(())
    }

    /// Delete the active node. With nothing active the user is told to pick
    /// a node first.
    pub fn delete_selection(&mut self) -> EngineResult<()> {
        match self.session.active().cloned() {
            Some(id) => self.delete_node(&id),
            None => {
                self.notices.push(Notice::warning("Select a node to delete first."));
                Ok(())
            }
        }
    }

    pub fn delete_edge(&mut self, id: &EdgeId) -> EngineResult<()> {
        if let Err(e) = self.canvas.board.delete_edge(id) {
            return Err(self.rejected(e));
        }
        self.sync();
        Ok(())
    }

    fn abort_interactions_on(&mut self, id: &NodeId) {
        match &self.canvas.input_state {
            InputState::Dragging { node, .. } if node == id => {
                self.canvas.input_state.reset();
                self.canvas.gestures.cancel_all();
            }
            InputState::EditingText { node, .. } if node == id => {
                self.canvas.input_state.reset();
                self.events.push(EditorEvent::TextEditFinished {
                    node: id.clone(),
                    committed: false,
                });
            }
            InputState::Linking { source } if source == id => {
                self.canvas.input_state.reset();
                self.events.push(EditorEvent::LinkingEnded {
                    source: id.clone(),
                    edge: None,
                });
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------------

    /// Connect two nodes with automatically chosen anchors.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> EngineResult<EdgeId> {
        match self.canvas.board.connect(source, target) {
            Ok(edge) => {
                self.sync();
                Ok(edge)
            }
            Err(e) => Err(self.rejected(e)),
        }
    }

    /// Enter linking mode from the active node. Returns false (and queues a
    /// notice) when there is no node to link from.
    pub fn start_linking(&mut self) -> bool {
        if self.canvas.input_state.is_pointer_gesture() {
            debug!(state = self.canvas.input_state.name(), "Linking ignored during gesture");
            return false;
        }
        if self.canvas.input_state.is_editing_text() {
            self.commit_text_edit();
        }
        let Some(source) = self.session.active().cloned() else {
            self.notices
                .push(Notice::warning("Select a node to link from first."));
            return false;
        };
        info!(%source, "Linking started");
        self.canvas.input_state = InputState::Linking {
            source: source.clone(),
        };
        self.events.push(EditorEvent::LinkingStarted { source });
        self.sync();
        true
    }

    pub fn cancel_linking(&mut self) -> bool {
        if !self.canvas.input_state.is_linking() {
            return false;
        }
        self.finish_linking(None);
        self.sync();
        true
    }

    /// Resolve linking mode with the activated node (`None` for empty
    /// canvas). The same node or empty canvas cancels.
    pub(crate) fn finish_linking(&mut self, target: Option<&NodeId>) {
        let Some(source) = self.canvas.input_state.linking_source().cloned() else {
            return;
        };
        self.canvas.input_state.reset();
        let edge = match target {
            Some(target) if *target != source => match self.canvas.board.connect(&source, target) {
                Ok(edge) => Some(edge),
                Err(e) => {
                    self.report(&e);
                    None
                }
            },
            _ => None,
        };
        debug!(%source, linked = edge.is_some(), "Linking ended");
        self.events.push(EditorEvent::LinkingEnded { source, edge });
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Merge dialog fields into a node's content and resize it to fit.
    pub fn update_entity(&mut self, id: &NodeId, patch: &ContentPatch) -> EngineResult<()> {
        let changed = self
            .canvas
            .board
            .update_node_content(id, patch)
            .map_err(|e| self.rejected(e))?;
        if changed {
            if let Some(node) = self.canvas.board.node(id) {
                let current = node.size();
                let fitted = content_size(
                    &node.content,
                    current,
                    self.settings.text.details_wrap_width,
                    self.measurer.as_ref(),
                );
                if fitted != current {
                    self.canvas.board.resize_node(id, fitted)?;
                }
            }
        }
        self.sync();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn select(&mut self, id: &NodeId) -> EngineResult<()> {
        if !self.canvas.board.contains_node(id) {
            return Err(self.rejected(EngineError::missing_node(id)));
        }
        self.session.selected = Some(id.clone());
        self.sync();
        Ok(())
    }

    /// Clear selection and hover.
    pub fn clear_selection(&mut self) {
        self.session.clear();
        self.sync();
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Run a command; the single entry point for controls and shortcuts.
    pub fn execute(&mut self, command: Command) -> EngineResult<()> {
        let (result, elapsed_ms) = measure(|| self.run_command(command));
        self.perf.record("command", elapsed_ms);
        result
    }

    /// Map a key press to a command and run it. Returns whether the key was
    /// handled. While a text edit is open only Escape and Ctrl+Enter apply.
    pub fn handle_shortcut(&mut self, key: &str, ctrl: bool) -> bool {
        let Some(command) = Command::from_shortcut(key, ctrl) else {
            return false;
        };
        if self.canvas.input_state.is_editing_text() && !command.allowed_while_editing() {
            return false;
        }
        debug!(key, ?command, "Shortcut");
        // rejections are already surfaced as notices
        if let Err(err) = self.execute(command) {
            debug!(error = %err, key, "Shortcut command rejected");
        }
        true
    }

    fn run_command(&mut self, command: Command) -> EngineResult<()> {
        match command {
            Command::AddNode => {
                self.add_node();
            }
            Command::AddChild(direction) => match self.session.active().cloned() {
                Some(parent) => {
                    self.add_child(&parent, direction)?;
                }
                None => debug!("No node to add a child to"),
            },
            Command::AddEntity(entity_type) => {
                self.add_entity_node(entity_type);
            }
            Command::AddImage => self.events.push(EditorEvent::ImageRequested),
            Command::DeleteSelection => self.delete_selection()?,
            Command::StartLinking => {
                self.start_linking();
            }
            Command::EditText => {
                if let Some(id) = self.session.active().cloned() {
                    self.begin_text_edit(&id)?;
                }
            }
            Command::CommitText => {
                self.commit_text_edit();
            }
            Command::Cancel => self.cancel(),
            Command::DismissSelection => self.clear_selection(),
        }
        Ok(())
    }

    /// Escape: close a text edit, else leave linking, else clear the selection.
    pub fn cancel(&mut self) {
        if self.canvas.input_state.is_editing_text() {
            self.cancel_text_edit();
        } else if self.canvas.input_state.is_linking() {
            self.cancel_linking();
        } else {
            self.clear_selection();
        }
    }

    /// Report and hand back an error for `return Err(...)`.
    pub(crate) fn rejected(&mut self, err: EngineError) -> EngineError {
        self.report(&err);
        err
    }
}
