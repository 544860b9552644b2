//! Block layout: vertical stacking and inline line-box flow.
//!
//! [CSS 2.1 § 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//! [CSS 2.1 § 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! A block in inline mode flows its subtree's words left to right,
//! wrapping before a word would overflow the block's width. Line boxes are
//! committed in two phases: words are buffered with provisional x offsets,
//! then the flush aligns them on a shared baseline once the line's tallest
//! ascent is known.

use wren_dom::{DomTree, NodeId, NodeType, StyleMap};

use super::{layout_mode, Containing, LayoutMode};
use crate::cascade::font_size_px;
use crate::fonts::{FontHandle, FontKey, FontProvider, FontSlant, FontWeight};

/// A word committed to an absolute position by a line flush.
#[derive(Clone)]
pub struct PlacedWord {
    /// Absolute left edge.
    pub x: f32,
    /// Absolute top edge (baseline minus the word's ascent).
    pub y: f32,
    /// The word itself.
    pub text: String,
    /// Font the word was measured with.
    pub font: FontHandle,
    /// CSS color value.
    pub color: String,
}

/// A word buffered on the current line, not yet baseline-aligned.
struct LineItem {
    x_rel: f32,
    text: String,
    font: FontHandle,
    color: String,
}

/// One block of the layout tree.
#[derive(Debug)]
pub struct BlockLayout {
    /// The DOM node this block lays out.
    pub node: NodeId,
    /// Absolute left edge.
    pub x: f32,
    /// Absolute top edge.
    pub y: f32,
    /// Width inherited from the containing block.
    pub width: f32,
    /// Height: sum of children (block mode) or final cursor_y (inline mode).
    pub height: f32,
    /// Mode decided during layout.
    pub mode: LayoutMode,
    /// Child blocks (block mode only).
    pub children: Vec<BlockLayout>,
    /// Words at absolute positions (inline mode only).
    pub words: Vec<PlacedWord>,

    line: Vec<LineItem>,
    cursor_x: f32,
    cursor_y: f32,
}

impl std::fmt::Debug for PlacedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacedWord")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("text", &self.text)
            .field("font", &self.font.key())
            .field("color", &self.color)
            .finish()
    }
}

impl std::fmt::Debug for LineItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineItem")
            .field("x_rel", &self.x_rel)
            .field("text", &self.text)
            .field("font", &self.font.key())
            .field("color", &self.color)
            .finish()
    }
}

impl BlockLayout {
    /// Create an unlaid-out block over a DOM node.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            mode: LayoutMode::Block,
            children: Vec::new(),
            words: Vec::new(),
            line: Vec::new(),
            cursor_x: 0.0,
            cursor_y: 0.0,
        }
    }

    /// Position this block and lay out its content.
    ///
    /// Phase 1: x and width come from the containing block; y continues
    /// below the previous in-flow sibling, or starts at the container's top.
    /// Phase 2 depends on the mode: block mode wraps each DOM child in a
    /// child block and stacks them; inline mode flows the subtree's words.
    /// A sibling's geometry is finished before the next sibling starts, so
    /// the `previous` pair is always final.
    pub(crate) fn layout(
        &mut self,
        tree: &DomTree,
        fonts: &dyn FontProvider,
        containing: Containing,
        previous: Option<(f32, f32)>,
    ) {
        self.x = containing.x;
        self.width = containing.width;
        self.y = previous.map_or(containing.y, |(prev_y, prev_height)| prev_y + prev_height);

        self.mode = layout_mode(tree, self.node);
        self.children.clear();
        self.words.clear();

        match self.mode {
            LayoutMode::Block => {
                // <head> holds metadata, not boxes.
                self.children = tree
                    .children(self.node)
                    .iter()
                    .filter(|&&child| {
                        !tree.as_element(child).is_some_and(|e| e.tag_name == "head")
                    })
                    .map(|&child| Self::new(child))
                    .collect();
            }
            LayoutMode::Inline => {
                self.cursor_x = 0.0;
                self.cursor_y = 0.0;
                self.line.clear();
                self.walk_inline(tree, fonts, self.node);
                self.flush();
                self.height = self.cursor_y;
            }
        }

        let own = Containing {
            x: self.x,
            y: self.y,
            width: self.width,
        };
        let mut previous = None;
        for child in &mut self.children {
            child.layout(tree, fonts, own, previous);
            previous = Some((child.y, child.height));
        }

        if self.mode == LayoutMode::Block {
            self.height = self.children.iter().map(|c| c.height).sum();
        }
    }

    /// Preorder walk of the subtree feeding the line builder: text nodes
    /// emit words, `<br>` forces a line break, other elements just descend
    /// (their styles are already baked into descendant text nodes).
    fn walk_inline(&mut self, tree: &DomTree, fonts: &dyn FontProvider, node: NodeId) {
        let Some(dom_node) = tree.get(node) else {
            return;
        };
        match &dom_node.node_type {
            NodeType::Text(text) => {
                for word in text.split_ascii_whitespace() {
                    self.place_word(tree, fonts, node, word);
                }
            }
            NodeType::Element(data) if data.tag_name == "br" => self.flush(),
            NodeType::Element(_) => {
                for &child in &dom_node.children {
                    self.walk_inline(tree, fonts, child);
                }
            }
        }
    }

    /// Buffer one word on the current line, wrapping first if it would
    /// overflow the block's width.
    fn place_word(&mut self, tree: &DomTree, fonts: &dyn FontProvider, text_node: NodeId, word: &str) {
        let style = tree.style(text_node);
        let font = fonts.font(font_key_for(style, underline_for(tree, text_node)));
        let color = style
            .and_then(|s| s.get("color"))
            .cloned()
            .unwrap_or_else(|| "black".to_string());

        let word_width = font.measure(word) as f32;
        if self.cursor_x + word_width > self.width {
            self.flush();
        }

        self.line.push(LineItem {
            x_rel: self.cursor_x,
            text: word.to_string(),
            font: font.clone(),
            color,
        });
        self.cursor_x += word_width + font.measure(" ") as f32;
    }

    /// Commit the buffered line with baseline alignment.
    ///
    /// The baseline sits 1.25 × the tallest ascent below the cursor; every
    /// word's top is the baseline minus its own ascent, so mixed font sizes
    /// share one baseline. The cursor then drops past the deepest descent
    /// with the same 1.25 leading factor.
    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let metrics: Vec<_> = self.line.iter().map(|item| item.font.metrics()).collect();
        let max_ascent = metrics.iter().map(|m| m.ascent).max().unwrap_or(0) as f32;
        let baseline = self.cursor_y + 1.25 * max_ascent;

        for item in self.line.drain(..) {
            let ascent = item.font.metrics().ascent as f32;
            self.words.push(PlacedWord {
                x: self.x + item.x_rel,
                y: self.y + baseline - ascent,
                text: item.text,
                font: item.font,
                color: item.color,
            });
        }

        let max_descent = metrics.iter().map(|m| m.descent).max().unwrap_or(0) as f32;
        self.cursor_y = baseline + 1.25 * max_descent;
        self.cursor_x = 0.0;
    }
}

/// Derive the font cache key from a text node's resolved style.
///
/// The point size is the pixel size scaled by 0.75 and truncated.
fn font_key_for(style: Option<&StyleMap>, underline: bool) -> FontKey {
    let get = |name: &str| style.and_then(|s| s.get(name)).map(String::as_str);
    let size_px = get("font-size").and_then(font_size_px).unwrap_or(16.0);
    FontKey {
        size: (size_px * 0.75) as i32,
        weight: FontWeight::from_css(get("font-weight").unwrap_or("normal")),
        slant: FontSlant::from_css(get("font-style").unwrap_or("normal")),
        underline,
    }
}

/// Underline comes from the parent element's `text-decoration`, not the
/// text node itself.
fn underline_for(tree: &DomTree, text_node: NodeId) -> bool {
    tree.parent(text_node)
        .and_then(|p| tree.style(p))
        .and_then(|s| s.get("text-decoration"))
        .is_some_and(|v| v == "underline")
}
