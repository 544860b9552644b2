//! HTML tokenizer and parser for the Wren browser.
//!
//! # Scope
//!
//! - Single-pass tokenization with an in-tag boolean state ([`tokenizer`]).
//! - Tree construction over a stack of open elements with implicit-tag
//!   recovery and a fixed self-closing set ([`parser`]).
//!
//! The parser never fails: malformed input is recovered heuristically and
//! the result is always a tree rooted at `<html>`.
//!
//! # Not implemented
//!
//! Character references, raw-text elements (`<script>`/`<style>` content is
//! treated as ordinary text), CDATA, and the WHATWG insertion modes.

pub mod parser;
pub mod tokenizer;

pub use parser::{HTMLParser, SELF_CLOSING_TAGS};
pub use tokenizer::{HTMLTokenizer, Token};

use wren_dom::{DomTree, NodeId, NodeType};

/// Parse an HTML string into a DOM tree.
///
/// Convenience wrapper running [`HTMLTokenizer`] then [`HTMLParser`].
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run()
}

/// Serialize the subtree rooted at `id` back to HTML.
///
/// [§ 13.3 Serialising HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
///
/// Only what the parser can produce is emitted: start tags with their
/// attributes, children, and end tags. Void elements take no children and
/// get no end tag. Text is written verbatim (the parser performs no entity
/// decoding, so none is re-encoded).
#[must_use]
pub fn serialize_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_html(tree, id, &mut out);
    out
}

fn write_html(tree: &DomTree, id: NodeId, out: &mut String) {
    use std::fmt::Write as _;

    let Some(node) = tree.get(id) else { return };
    match &node.node_type {
        NodeType::Text(text) => out.push_str(text),
        NodeType::Element(data) => {
            let _ = write!(out, "<{}", data.tag_name);
            for attr in &data.attrs {
                if attr.value.is_empty() {
                    let _ = write!(out, " {}", attr.name);
                } else {
                    let _ = write!(out, " {}=\"{}\"", attr.name, attr.value);
                }
            }
            out.push('>');
            if SELF_CLOSING_TAGS.contains(&data.tag_name.as_str()) {
                return;
            }
            for &child in &node.children {
                write_html(tree, child, out);
            }
            let _ = write!(out, "</{}>", data.tag_name);
        }
    }
}

/// Print an indented debug dump of a DOM subtree to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Element(data)) => {
            print!("{indent}<{}", data.tag_name);
            for attr in &data.attrs {
                print!(" {}={:?}", attr.name, attr.value);
            }
            println!(">");
        }
        Some(NodeType::Text(text)) => println!("{indent}{text:?}"),
        None => return,
    }
    for &child in tree.children(id) {
        print_tree(tree, child, depth + 1);
    }
}
