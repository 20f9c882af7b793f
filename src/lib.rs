//! Linkboard - scene graph and interaction engine for a pannable, zoomable
//! diagram editor.
//!
//! The [`Editor`] owns one diagram: the [`Board`] of nodes and connectors,
//! the [`Camera`], the pointer state machine and the derived [`Scene`] and
//! overlay layout a host draws from. Hosts feed it [`PointerEvent`]s, wheel
//! deltas and [`Command`]s, and drain [`EditorEvent`]s and notices.

pub mod board;
pub mod camera;
pub mod commands;
pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod image_payload;
pub mod input;
pub mod logging;
pub mod measure;
pub mod notifications;
pub mod perf;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod spatial_index;
pub mod types;

pub use board::Board;
pub use camera::Camera;
pub use commands::Command;
pub use editor::{Editor, EditorEvent};
pub use error::{EngineError, EngineResult};
pub use input::{InputState, PointerDevice, PointerEvent, PointerPhase};
pub use persistence::BoardSnapshot;
pub use render::{OverlayLayout, Scene};
pub use settings::EditorSettings;
pub use types::{AnchorSide, ContentPatch, EdgeId, NodeContent, NodeId, Point, Size};
