//! Shared helpers for wren-browser integration tests.

use std::sync::Arc;

use wren_css::{Canvas, Font, FontHandle, FontKey, FontMetrics, FontProvider};

/// Deterministic font service: every character advances size/2 pixels,
/// ascent is 3/4 of the size, descent 1/4, linespace 5/4.
pub struct FixedFonts;

struct FixedFont {
    key: FontKey,
}

impl Font for FixedFont {
    fn key(&self) -> FontKey {
        self.key
    }

    fn measure(&self, text: &str) -> i32 {
        text.chars().count() as i32 * (self.key.size / 2)
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: self.key.size * 3 / 4,
            descent: self.key.size / 4,
            linespace: self.key.size * 5 / 4,
        }
    }
}

impl FontProvider for FixedFonts {
    fn font(&self, key: FontKey) -> FontHandle {
        Arc::new(FixedFont { key })
    }
}

/// One recorded canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    /// `create_text` with the scroll already subtracted from y.
    Text {
        x: f32,
        y: f32,
        text: String,
        color: String,
    },
    /// `create_rectangle` with the scroll already subtracted.
    Rect {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: String,
    },
}

/// A canvas that records what it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&CanvasOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Text { .. }))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn create_text(&mut self, x: f32, y: f32, text: &str, _font: &FontHandle, color: &str) {
        self.ops.push(CanvasOp::Text {
            x,
            y,
            text: text.to_string(),
            color: color.to_string(),
        });
    }

    fn create_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str) {
        self.ops.push(CanvasOp::Rect {
            x1,
            y1,
            x2,
            y2,
            color: color.to_string(),
        });
    }

    fn clear(&mut self) {
        self.ops.clear();
    }
}
