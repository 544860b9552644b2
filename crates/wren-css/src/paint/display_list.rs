//! Drawing commands and the canvas interface they execute against.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Every command exposes `top` and `bottom` so the viewport can cull
//! instructions wholly outside the visible band without interpreting them.

use std::fmt;

use crate::fonts::FontHandle;

/// The drawing surface the display list executes against.
///
/// The windowing toolkit provides the real implementation; the scroll
/// offset has already been subtracted from the y coordinates it receives.
pub trait Canvas {
    /// Draw `text` with its top-left corner at (x, y).
    fn create_text(&mut self, x: f32, y: f32, text: &str, font: &FontHandle, color: &str);
    /// Fill the axis-aligned rectangle (x1, y1)–(x2, y2) with a color, no
    /// border.
    fn create_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str);
    /// Wipe all pending drawings.
    fn clear(&mut self);
}

/// A single drawing command at absolute document coordinates.
#[derive(Clone)]
pub enum DisplayCommand {
    /// Draw a run of text anchored at its top-left corner.
    DrawText {
        /// Left edge.
        left: f32,
        /// Top edge.
        top: f32,
        /// Bottom edge (top plus the font's linespace).
        bottom: f32,
        /// Font handle for measurement and rendering.
        font: FontHandle,
        /// CSS color value.
        color: String,
        /// The text to draw.
        text: String,
    },
    /// Fill a rectangle.
    DrawRect {
        /// Left edge.
        left: f32,
        /// Top edge.
        top: f32,
        /// Right edge.
        right: f32,
        /// Bottom edge.
        bottom: f32,
        /// CSS color value.
        color: String,
    },
}

impl DisplayCommand {
    /// Top edge in document coordinates, for viewport culling.
    #[must_use]
    pub fn top(&self) -> f32 {
        match self {
            Self::DrawText { top, .. } | Self::DrawRect { top, .. } => *top,
        }
    }

    /// Bottom edge in document coordinates, for viewport culling.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        match self {
            Self::DrawText { bottom, .. } | Self::DrawRect { bottom, .. } => *bottom,
        }
    }

    /// Execute this command on a canvas, shifted up by the scroll offset.
    pub fn execute(&self, scroll: f32, canvas: &mut dyn Canvas) {
        match self {
            Self::DrawText {
                left,
                top,
                font,
                color,
                text,
                ..
            } => canvas.create_text(*left, top - scroll, text, font, color),
            Self::DrawRect {
                left,
                top,
                right,
                bottom,
                color,
            } => canvas.create_rectangle(*left, top - scroll, *right, bottom - scroll, color),
        }
    }
}

// Fonts compare by cache key: two commands are the same drawing if they
// name the same variant, regardless of handle identity.
impl PartialEq for DisplayCommand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::DrawText {
                    left,
                    top,
                    bottom,
                    font,
                    color,
                    text,
                },
                Self::DrawText {
                    left: other_left,
                    top: other_top,
                    bottom: other_bottom,
                    font: other_font,
                    color: other_color,
                    text: other_text,
                },
            ) => {
                left == other_left
                    && top == other_top
                    && bottom == other_bottom
                    && font.key() == other_font.key()
                    && color == other_color
                    && text == other_text
            }
            (
                Self::DrawRect {
                    left,
                    top,
                    right,
                    bottom,
                    color,
                },
                Self::DrawRect {
                    left: other_left,
                    top: other_top,
                    right: other_right,
                    bottom: other_bottom,
                    color: other_color,
                },
            ) => {
                left == other_left
                    && top == other_top
                    && right == other_right
                    && bottom == other_bottom
                    && color == other_color
            }
            _ => false,
        }
    }
}

impl fmt::Debug for DisplayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrawText {
                left,
                top,
                bottom,
                font,
                color,
                text,
            } => f
                .debug_struct("DrawText")
                .field("left", left)
                .field("top", top)
                .field("bottom", bottom)
                .field("font", &font.key())
                .field("color", color)
                .field("text", text)
                .finish(),
            Self::DrawRect {
                left,
                top,
                right,
                bottom,
                color,
            } => f
                .debug_struct("DrawRect")
                .field("left", left)
                .field("top", top)
                .field("right", right)
                .field("bottom", bottom)
                .field("color", color)
                .finish(),
        }
    }
}
