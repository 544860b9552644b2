//! A canvas that records draw calls for headless output.

use wren_css::{Canvas, FontHandle};

/// One recorded drawing operation, already scroll-adjusted.
pub enum Drawn {
    /// A text run.
    Text {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// The text.
        text: String,
        /// CSS color.
        color: String,
    },
    /// A filled rectangle.
    Rect {
        /// Left edge.
        x1: f32,
        /// Top edge.
        y1: f32,
        /// Right edge.
        x2: f32,
        /// Bottom edge.
        y2: f32,
        /// CSS color.
        color: String,
    },
}

/// Records what the viewport asks to draw so it can be printed.
#[derive(Default)]
pub struct TextCanvas {
    /// Operations since the last clear.
    pub drawn: Vec<Drawn>,
}

impl TextCanvas {
    /// An empty canvas.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for TextCanvas {
    fn create_text(&mut self, x: f32, y: f32, text: &str, _font: &FontHandle, color: &str) {
        self.drawn.push(Drawn::Text {
            x,
            y,
            text: text.to_string(),
            color: color.to_string(),
        });
    }

    fn create_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str) {
        self.drawn.push(Drawn::Rect {
            x1,
            y1,
            x2,
            y2,
            color: color.to_string(),
        });
    }

    fn clear(&mut self) {
        self.drawn.clear();
    }
}
