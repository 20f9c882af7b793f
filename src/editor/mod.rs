//! Editor module - the context object every handler runs against.
//!
//! This module is organized into several submodules:
//! - `state` - The Editor struct, its sub-structs and outbound events
//! - `lifecycle` - Construction, loading, viewport changes and scene sync
//! - `node_ops` - Node and edge operations, selection and commands
//!
//! Pointer, wheel and text-edit handlers live in `crate::input`.

mod lifecycle;
mod node_ops;
mod state;

pub use state::{CanvasState, Editor, EditorEvent, SessionState, ViewState};
