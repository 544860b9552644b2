//! Layout: from styled DOM to a tree with absolute geometry.
//!
//! [CSS Display Level 3](https://www.w3.org/TR/css-display-3/)
//!
//! Two node kinds exist: the document root and blocks. Layout runs in two
//! phases per node: position from the parent and previous in-flow sibling,
//! then content (child blocks stacked vertically, or words flowed into
//! lines). Heights propagate back up after children finish.

mod block;

pub use block::{BlockLayout, PlacedWord};

use strum_macros::Display;
use wren_dom::{DomTree, NodeId};

use crate::fonts::FontProvider;

/// Horizontal padding: the document's left inset in pixels.
pub const HSTEP: f32 = 13.0;
/// Vertical padding: the document's top inset in pixels.
pub const VSTEP: f32 = 18.0;

/// [HTML § 15.3.2 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
///
/// Elements that establish block layout when they appear among a node's
/// children.
const BLOCK_ELEMENTS: &[&str] = &[
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// How a block lays out its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LayoutMode {
    /// Children are wrapped in child blocks and stacked vertically.
    Block,
    /// The subtree's words are flowed into line boxes.
    Inline,
}

/// Classify a DOM node's layout mode.
///
/// Text is inline; an element with any block-level child is block; an
/// element with only inline children is inline; a childless element is
/// block.
#[must_use]
pub fn layout_mode(tree: &DomTree, node: NodeId) -> LayoutMode {
    if tree.as_text(node).is_some() {
        return LayoutMode::Inline;
    }
    let children = tree.children(node);
    let has_block_child = children.iter().any(|&child| {
        tree.as_element(child)
            .is_some_and(|e| BLOCK_ELEMENTS.contains(&e.tag_name.as_str()))
    });
    if has_block_child {
        LayoutMode::Block
    } else if children.is_empty() {
        LayoutMode::Block
    } else {
        LayoutMode::Inline
    }
}

/// Geometry a block inherits from its containing box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Containing {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// The layout tree root, covering the whole document.
#[derive(Debug)]
pub struct DocumentLayout {
    /// The DOM root this layout was built over.
    pub node: NodeId,
    /// Left edge (always [`HSTEP`] after layout).
    pub x: f32,
    /// Top edge (always [`VSTEP`] after layout).
    pub y: f32,
    /// Full viewport width given at construction.
    pub width: f32,
    /// Content height, known after [`layout`](Self::layout).
    pub height: f32,
    /// The single block child covering the DOM root.
    pub children: Vec<BlockLayout>,
}

impl DocumentLayout {
    /// Create an unlaid-out document covering `node` at a viewport width.
    #[must_use]
    pub fn new(node: NodeId, width: f32) -> Self {
        Self {
            node,
            x: 0.0,
            y: 0.0,
            width,
            height: 0.0,
            children: Vec::new(),
        }
    }

    /// Build and lay out the block tree.
    ///
    /// The child receives the content-area width (the viewport width minus
    /// the horizontal insets on both sides), so resizing the viewport
    /// reflows to the real available width.
    pub fn layout(&mut self, tree: &DomTree, fonts: &dyn FontProvider) {
        self.x = HSTEP;
        self.y = VSTEP;

        let mut child = BlockLayout::new(self.node);
        child.layout(
            tree,
            fonts,
            Containing {
                x: self.x,
                y: self.y,
                width: self.width - 2.0 * HSTEP,
            },
            None,
        );
        self.height = child.height;
        self.children = vec![child];
    }
}
