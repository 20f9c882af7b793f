//! Editor state - the `Editor` context object and its sub-structs.

use crate::board::Board;
use crate::camera::Camera;
use crate::input::InputState;
use crate::input::gesture::GestureTracker;
use crate::measure::TextMeasurer;
use crate::notifications::{Notice, NoticeQueue};
use crate::perf::InteractionStats;
use crate::render::{Highlights, OverlayState, Scene};
use crate::settings::EditorSettings;
use crate::types::{EdgeId, NodeId, Point, Size};

/// Something the host has to act on, drained with [`Editor::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Double activation on an image node
    OpenImage { node: NodeId, image_data: String },
    /// The host should open its image picker
    ImageRequested,
    /// Double activation on an entity card; the host opens its edit dialog
    EditEntity { node: NodeId },
    TextEditStarted { node: NodeId },
    TextEditFinished { node: NodeId, committed: bool },
    LinkingStarted { source: NodeId },
    /// `edge` is `None` when linking was cancelled
    LinkingEnded { source: NodeId, edge: Option<EdgeId> },
}

/// The board, the camera and the pointer state machine.
pub struct CanvasState {
    pub(crate) board: Board,
    pub(crate) camera: Camera,
    /// Viewport size in screen pixels
    pub(crate) viewport: Size,
    pub(crate) input_state: InputState,
    pub(crate) gestures: GestureTracker,
}

/// Selection and hover. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
}

impl SessionState {
    /// The node the overlay controls surround and act on: the selection,
    /// else the hovered node
    pub fn active(&self) -> Option<&NodeId> {
        self.selected.as_ref().or(self.hovered.as_ref())
    }

    /// Drop every reference to a removed node.
    pub fn forget(&mut self, id: &NodeId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.hovered = None;
    }
}

/// Derived, rebuildable output.
pub struct ViewState {
    pub(crate) scene: Scene,
    pub(crate) overlays: OverlayState,
    /// Highlights the scene was last built or patched with
    pub(crate) highlights: Highlights,
}

/// Explicit context for one open diagram.
///
/// Every public mutating method leaves the scene and overlays consistent
/// with the board before it returns.
pub struct Editor {
    pub(crate) canvas: CanvasState,
    pub(crate) session: SessionState,
    pub(crate) view: ViewState,
    pub(crate) notices: NoticeQueue,
    pub(crate) events: Vec<EditorEvent>,
    pub(crate) settings: EditorSettings,
    pub(crate) measurer: Box<dyn TextMeasurer>,
    pub(crate) perf: InteractionStats,
}

impl Editor {
    pub fn board(&self) -> &Board {
        &self.canvas.board
    }

    pub fn camera(&self) -> &Camera {
        &self.canvas.camera
    }

    pub fn viewport(&self) -> Size {
        self.canvas.viewport
    }

    pub fn input_state(&self) -> &InputState {
        &self.canvas.input_state
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.session.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.session.hovered.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.view.scene
    }

    pub fn overlays(&self) -> &OverlayState {
        &self.view.overlays
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn perf(&self) -> &InteractionStats {
        &self.perf
    }

    /// Drop notices the host has shown.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        self.notices.dismiss(id)
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// World position under a screen position.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.canvas.camera.screen_to_world(screen)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.canvas.camera.world_to_screen(world)
    }

    /// World position at the center of the viewport.
    pub fn viewport_center_world(&self) -> Point {
        self.screen_to_world(self.canvas.viewport.center())
    }

    /// Text of the node being edited, if an edit is open.
    pub fn editing_draft(&self) -> Option<&str> {
        match &self.canvas.input_state {
            InputState::EditingText { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub(crate) fn current_highlights(&self) -> Highlights {
        let editing = match &self.canvas.input_state {
            InputState::EditingText { node, draft, .. } => Some((node.clone(), draft.clone())),
            _ => None,
        };
        Highlights {
            selected: self.session.selected.clone(),
            hovered: self.session.hovered.clone(),
            editing,
        }
    }
}
