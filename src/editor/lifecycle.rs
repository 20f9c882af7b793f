//! Editor lifecycle - construction, loading and keeping the view in sync.

use super::state::{CanvasState, Editor, SessionState, ViewState};
use crate::board::{Board, ExportView};
use crate::camera::Camera;
use crate::constants::EXPORT_PADDING;
use crate::error::{EngineError, EngineResult};
use crate::input::InputState;
use crate::input::gesture::GestureTracker;
use crate::measure::TextMeasurer;
use crate::notifications::{Notice, NoticeQueue};
use crate::perf::InteractionStats;
use crate::persistence::BoardSnapshot;
use crate::profile_scope;
use crate::render::{OverlayState, Scene};
use crate::settings::EditorSettings;
use crate::types::Size;
use tracing::{debug, info, warn};

impl Editor {
    /// An editor with default settings and a board holding only the root.
    pub fn new(viewport: Size) -> Self {
        Self::with_settings(EditorSettings::default(), viewport)
    }

    /// The root is placed at the viewport center and starts out selected.
    pub fn with_settings(settings: EditorSettings, viewport: Size) -> Self {
        let camera = Camera::default();
        let root_center = camera.screen_to_world(viewport.center());
        let board = Board::new(&settings.labels.root, root_center);
        let measurer = Box::new(settings.text.measurer());

        let mut editor = Self {
            canvas: CanvasState {
                board,
                camera,
                viewport,
                input_state: InputState::default(),
                gestures: GestureTracker::new(),
            },
            session: SessionState {
                selected: Some(crate::types::NodeId::root()),
                hovered: None,
            },
            view: ViewState {
                scene: Scene::default(),
                overlays: OverlayState::default(),
                highlights: Default::default(),
            },
            notices: NoticeQueue::new(),
            events: Vec::new(),
            settings,
            measurer,
            perf: InteractionStats::new(),
        };
        editor.rebuild_scene();
        debug!(width = viewport.width, height = viewport.height, "Editor created");
        editor
    }

    /// Replace the text measurer (a host with real font metrics plugs in here).
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.canvas.viewport = viewport;
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.canvas.camera = camera;
        self.sync();
    }

    /// Back to the default pan and zoom.
    pub fn reset_view(&mut self) {
        self.canvas.camera.reset();
        self.sync();
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> BoardSnapshot {
        self.canvas.board.snapshot()
    }

    pub fn save_json(&self) -> EngineResult<String> {
        self.canvas.board.snapshot().to_json()
    }

    /// Replace the whole board. Camera, selection, hover and any gesture in
    /// flight are reset; on failure the current board is kept.
    pub fn load_snapshot(&mut self, snapshot: BoardSnapshot) -> EngineResult<()> {
        let board = match Board::from_snapshot(snapshot) {
            Ok(board) => board,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };
        self.replace_board(board);
        Ok(())
    }

    /// Decode (native or legacy format) and load a saved document.
    pub fn load_json(&mut self, json: &str) -> EngineResult<()> {
        match BoardSnapshot::from_json(json) {
            Ok(snapshot) => self.load_snapshot(snapshot),
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    fn replace_board(&mut self, board: Board) {
        self.canvas.board = board;
        self.canvas.camera.reset();
        self.canvas.input_state.reset();
        self.canvas.gestures.cancel_all();
        self.canvas.gestures.clear_activation();
        self.session.clear();
        info!(
            nodes = self.canvas.board.node_count(),
            edges = self.canvas.board.edge_count(),
            "Board loaded"
        );
        self.rebuild_scene();
    }

    /// Read-only projection for exporters, padded like the image export.
    pub fn export_view(&self) -> ExportView<'_> {
        self.canvas.board.export_view(EXPORT_PADDING)
    }

    // ------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------

    /// Log a rejected operation; blocking errors and unreadable input also
    /// queue a notice.
    pub(crate) fn report(&mut self, err: &EngineError) {
        warn!(error = %err, "Operation rejected");
        if err.is_blocking()
            || matches!(
                err,
                EngineError::MalformedImport(_) | EngineError::InvalidImage(_)
            )
        {
            self.notices.push(Notice::from_error(err));
        }
    }

    // ------------------------------------------------------------------------
    // Scene sync
    // ------------------------------------------------------------------------

    fn rebuild_scene(&mut self) {
        // anything pending is covered by the full build
        self.canvas.board.take_changes();
        let highlights = self.current_highlights();
        self.view.scene = Scene::build(&self.canvas.board, &self.canvas.camera, &highlights);
        self.view.highlights = highlights;
        self.refresh_overlays();
    }

    /// Drain board changes into the scene, then reposition overlays.
    ///
    /// Structural changes rebuild; geometry changes patch the touched nodes
    /// and their connectors.
    pub(crate) fn sync(&mut self) {
        profile_scope!("Editor::sync");
        let changes = self.canvas.board.take_changes();
        let highlights = self.current_highlights();
        let board = &self.canvas.board;
        let scene = &mut self.view.scene;

        let mut rebuild = changes.structural;
        if !rebuild {
            for id in &changes.geometry {
                if !scene.patch_node(board, id, &highlights) {
                    rebuild = true;
                    break;
                }
            }
        }
        if rebuild {
            *scene = Scene::build(board, &self.canvas.camera, &highlights);
        } else {
            if highlights != self.view.highlights {
                scene.apply_highlights(board, &highlights);
            }
            scene.set_view(&self.canvas.camera);
        }
        self.view.highlights = highlights;
        self.refresh_overlays();
    }

    fn refresh_overlays(&mut self) {
        let target = self
            .session
            .active()
            .and_then(|id| self.canvas.board.node(id));
        self.view
            .overlays
            .refresh(target, &self.canvas.camera, &self.settings.overlays);
        if self.canvas.input_state.hides_overlays() {
            self.view.overlays.suppress();
        } else {
            self.view.overlays.restore();
        }
    }
}
