//! Engine-wide constants.
//!
//! Centralizes geometry, gesture and layout values so the magic numbers
//! shared by the store, the renderer and the input state machine live in
//! one place.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.25;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 1.5;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom change per wheel delta unit (`factor = 1 - delta_y * speed`)
pub const WHEEL_ZOOM_SPEED: f32 = 0.001;

/// Wheel factors closer to 1.0 than this are ignored
pub const MIN_WHEEL_FACTOR_DELTA: f32 = 0.0001;

// ============================================================================
// Node Defaults
// ============================================================================

/// Id of the protected root node
pub const ROOT_NODE_ID: &str = "root";

/// Size of a freshly created text node
pub const DEFAULT_NODE_SIZE: (f32, f32) = (150.0, 50.0);

/// Smallest width any node may have
pub const MIN_NODE_WIDTH: f32 = 60.0;

/// Smallest height any node may have
pub const MIN_NODE_HEIGHT: f32 = 40.0;

/// Horizontal padding added to the longest measured line of a text node
pub const TEXT_PADDING_X: f32 = 40.0;

/// Vertical padding added to the wrapped text height of a text node
pub const TEXT_PADDING_Y: f32 = 20.0;

/// Inset between a node's rectangle and its content box
pub const CONTENT_INSET: f32 = 5.0;

/// Image nodes wider than this are scaled down, keeping aspect ratio
pub const IMAGE_MAX_WIDTH: f32 = 250.0;

/// Captions taken from file names are truncated to this many characters
pub const IMAGE_LABEL_MAX_CHARS: usize = 40;

/// Person card width and default height
pub const PERSON_CARD_SIZE: (f32, f32) = (320.0, 150.0);

/// Person card height before the details text is added
pub const PERSON_BASE_HEIGHT: f32 = 100.0;

/// Company card size (fixed)
pub const COMPANY_CARD_SIZE: (f32, f32) = (280.0, 130.0);

// ============================================================================
// Connectors
// ============================================================================

/// Distance control points are pushed out along an anchor's normal
pub const CURVE_FACTOR: f32 = 100.0;

/// Vertical offset beyond which auto-anchoring switches to top/bottom
pub const ANCHOR_VERTICAL_THRESHOLD: f32 = 50.0;

/// Gap between a parent and a child created from a directional control
pub const CHILD_GAP: f32 = 30.0;

// ============================================================================
// Gestures
// ============================================================================

/// Movement (screen px) after which a touch press becomes a drag
pub const DRAG_START_DISTANCE: f32 = 5.0;

/// Hold time after which an unreleased touch press becomes a drag
pub const DRAG_START_DELAY_MS: u64 = 100;

/// Longest press still counted as a tap
pub const TAP_MAX_DURATION_MS: u64 = 300;

/// Largest total movement (screen px) still counted as a tap
pub const TAP_MAX_MOVEMENT: f32 = 10.0;

/// Two taps on the same node within this window form a double tap
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

// ============================================================================
// Overlays
// ============================================================================

/// Distance of the add-node buttons beyond each side of the node (screen px)
pub const ADD_BUTTON_OFFSET: f32 = 20.0;

/// Horizontal offset of the context menu from the node's right edge
pub const CONTEXT_MENU_OFFSET_X: f32 = 35.0;

/// Vertical offset of the context menu above the node's top edge
pub const CONTEXT_MENU_OFFSET_Y: f32 = 15.0;

// ============================================================================
// Export
// ============================================================================

/// Padding added around the content bounds for export
pub const EXPORT_PADDING: f32 = 50.0;
