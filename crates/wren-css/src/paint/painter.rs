//! Painter: walk the layout tree, emit drawing commands.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The walk is preorder, so a block's background lands in the list before
//! its content and before any descendant: back to front.

use wren_dom::DomTree;

use super::display_list::DisplayCommand;
use crate::layout::{BlockLayout, DocumentLayout};
use crate::LayoutMode;

/// Paint a laid-out document into `list`.
///
/// The document node itself draws nothing.
pub fn paint_tree(tree: &DomTree, document: &DocumentLayout, list: &mut Vec<DisplayCommand>) {
    for child in &document.children {
        paint_block(tree, child, list);
    }
}

fn paint_block(tree: &DomTree, block: &BlockLayout, list: &mut Vec<DisplayCommand>) {
    // [CSS Backgrounds § 3.10 background-color](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    if let Some(color) = tree.style(block.node).and_then(|s| s.get("background-color"))
        && color != "transparent"
    {
        list.push(DisplayCommand::DrawRect {
            left: block.x,
            top: block.y,
            right: block.x + block.width,
            bottom: block.y + block.height,
            color: color.clone(),
        });
    }

    if block.mode == LayoutMode::Inline {
        for word in &block.words {
            let linespace = word.font.metrics().linespace as f32;
            list.push(DisplayCommand::DrawText {
                left: word.x,
                top: word.y,
                bottom: word.y + linespace,
                font: word.font.clone(),
                color: word.color.clone(),
                text: word.text.clone(),
            });
        }
    }

    for child in &block.children {
        paint_block(tree, child, list);
    }
}
