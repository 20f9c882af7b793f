//! Text measurement and content-driven node sizing.
//!
//! The engine has no font rasterizer of its own, so measurement sits behind
//! [`TextMeasurer`]. Hosts with real text layout plug in their own measurer;
//! the default estimates widths from a fixed average glyph advance.

use crate::constants::{
    COMPANY_CARD_SIZE, IMAGE_MAX_WIDTH, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, PERSON_BASE_HEIGHT,
    PERSON_CARD_SIZE, TEXT_PADDING_X, TEXT_PADDING_Y,
};
use crate::types::{EntityKind, NodeContent, Size, size};

/// Measures text extents in world units at zoom 1.0.
pub trait TextMeasurer {
    /// Width of a single line (no line breaks)
    fn line_width(&self, line: &str) -> f32;

    /// Height of one line of text
    fn line_height(&self) -> f32;

    /// Height of `text` when wrapped to `max_width`. Every hard line break
    /// starts a new line and empty lines still take up one line.
    fn wrapped_height(&self, text: &str, max_width: f32) -> f32 {
        let lines: usize = text
            .split('\n')
            .map(|line| {
                let width = self.line_width(line);
                if max_width > 0.0 && width > max_width {
                    (width / max_width).ceil() as usize
                } else {
                    1
                }
            })
            .sum();
        lines.max(1) as f32 * self.line_height()
    }
}

/// Estimates text extents from an average glyph advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatedMeasurer {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for EstimatedMeasurer {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
        }
    }
}

impl TextMeasurer for EstimatedMeasurer {
    fn line_width(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.char_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Size of a text node showing `label`.
///
/// Width is the longest line plus padding, height the wrapped text plus
/// padding. An empty label measures as a single space so the node keeps a
/// usable footprint; the result is floored either way.
pub fn text_node_size(label: &str, measurer: &dyn TextMeasurer) -> Size {
    let longest = label
        .split('\n')
        .map(|line| measurer.line_width(line))
        .fold(0.0_f32, f32::max);
    let longest = if longest > 0.0 {
        longest
    } else {
        measurer.line_width(" ")
    };
    let height = measurer.wrapped_height(label, longest);
    size(longest + TEXT_PADDING_X, height + TEXT_PADDING_Y).floored()
}

/// Height of a person card whose details text wraps at `wrap_width`.
pub fn person_card_height(details: &str, wrap_width: f32, measurer: &dyn TextMeasurer) -> f32 {
    let text = if details.is_empty() { " " } else { details };
    PERSON_BASE_HEIGHT + measurer.wrapped_height(text, wrap_width)
}

/// Size of an image node for an image of the given pixel dimensions.
/// Images wider than [`IMAGE_MAX_WIDTH`] are scaled down uniformly; images
/// below the node floor are scaled up uniformly until both sides clear it.
pub fn image_node_size(width: u32, height: u32) -> Size {
    let (w, h) = (width as f32, height as f32);
    if w <= 0.0 || h <= 0.0 {
        return size(w, h).floored();
    }
    let scale = if w > IMAGE_MAX_WIDTH { IMAGE_MAX_WIDTH / w } else { 1.0 };
    let (w, h) = (w * scale, h * scale);
    let grow = (MIN_NODE_WIDTH / w).max(MIN_NODE_HEIGHT / h).max(1.0);
    size(w * grow, h * grow)
}

/// Size a node should take after its content changed.
///
/// Images keep their current size: it comes from the decoded pixels, not
/// from anything a content edit can change.
pub fn content_size(
    content: &NodeContent,
    current: Size,
    details_wrap_width: f32,
    measurer: &dyn TextMeasurer,
) -> Size {
    match content {
        NodeContent::Text { label } => text_node_size(label, measurer),
        NodeContent::Image { .. } => current.floored(),
        NodeContent::Entity(card) => match &card.kind {
            EntityKind::Person { details, .. } => size(
                PERSON_CARD_SIZE.0,
                person_card_height(details, details_wrap_width, measurer),
            )
            .floored(),
            EntityKind::Company { .. } => Size::from(COMPANY_CARD_SIZE),
        },
    }
}
