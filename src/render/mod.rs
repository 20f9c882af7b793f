//! Render projections: the world-space scene and the screen-space overlays.

pub mod overlays;
pub mod scene;

pub use overlays::{AddButtons, OverlayLayout, OverlayOffsets, OverlayState};
pub use scene::{EdgeElement, Highlights, NodeBody, NodeElement, Scene};
