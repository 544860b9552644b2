//! CSS parsing, selector matching, cascade, layout, and paint for the Wren
//! browser.
//!
//! # Scope
//!
//! - **Parser** - a tolerant recursive-descent parser over a character
//!   index; malformed declarations skip to the next `;`/`}`, malformed
//!   rules skip to the next `}` ([`parser`]).
//! - **Selectors** - tag and descendant selectors with specificity
//!   ([`selector`]).
//! - **Cascade** - user-agent + author rules sorted by specificity, property
//!   inheritance, inline `style` attributes, percentage font-size
//!   resolution ([`cascade`]).
//! - **Layout** - two-phase block/inline layout producing a tree with
//!   absolute geometry ([`layout`]).
//! - **Paint** - lowering the layout tree to a flat display list of
//!   viewport-clippable drawing commands ([`paint`]).
//! - **Fonts** - the abstract measurement service layout depends on
//!   ([`fonts`]); the browser crate supplies the real implementation.
//!
//! # Not implemented
//!
//! Class/ID/attribute selectors, box-model margins/padding/borders, floats,
//! positioning, tables, media queries.

pub mod cascade;
pub mod fonts;
pub mod layout;
pub mod paint;
pub mod parser;
pub mod selector;
pub mod ua_stylesheet;

pub use cascade::{resolve_styles, sort_by_cascade, INHERITED_PROPERTIES};
pub use fonts::{Font, FontHandle, FontKey, FontMetrics, FontProvider, FontSlant, FontWeight};
pub use layout::{layout_mode, BlockLayout, DocumentLayout, LayoutMode, HSTEP, VSTEP};
pub use paint::{paint_tree, Canvas, DisplayCommand};
pub use parser::{CSSParser, Declaration, Rule, Stylesheet};
pub use selector::Selector;
pub use ua_stylesheet::ua_stylesheet;

use wren_dom::{DomTree, NodeId};

/// [HTML § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// Extract the CSS text of all `<style>` elements in document order.
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    collect_style_content(tree, tree.root(), &mut css);
    css
}

fn collect_style_content(tree: &DomTree, id: NodeId, css: &mut String) {
    if tree.as_element(id).is_some_and(|e| e.tag_name == "style") {
        for &child in tree.children(id) {
            if let Some(text) = tree.as_text(child) {
                css.push_str(text);
                css.push('\n');
            }
        }
        return;
    }
    for &child in tree.children(id) {
        collect_style_content(tree, child, css);
    }
}
