//! Cascading and style resolution.
//!
//! [CSS Cascading Level 4 § 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! The resolver walks the DOM in preorder and rewrites every node's style
//! map from scratch: inherited defaults first, then matching rules in
//! cascade order, then the inline `style` attribute, then percentage
//! font-size resolution against the parent's already-resolved value. The
//! preorder is load-bearing: a child's percentage resolves against a pixel
//! value only because its parent was finished first.

use wren_common::warn_once;
use wren_dom::{DomTree, NodeId, StyleMap};

use crate::parser::{CSSParser, Rule};

/// [§ 7.1 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// The inherited properties and their root defaults.
pub const INHERITED_PROPERTIES: &[(&str, &str)] = &[
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

/// Root default font size in pixels.
const DEFAULT_FONT_SIZE: f64 = 16.0;

/// [§ 6.4.3 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
///
/// Sort rules ascending by specificity so that later application wins. The
/// sort is stable: among equal specificities, source order is preserved and
/// the later rule overrides. Caller prepends user-agent rules so author
/// rules of equal specificity beat them.
pub fn sort_by_cascade(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| rule.selector.priority());
}

/// Resolve styles for the whole tree against a cascade-sorted rule list.
pub fn resolve_styles(tree: &mut DomTree, rules: &[Rule]) {
    if tree.is_empty() {
        return;
    }
    resolve_node(tree, tree.root(), rules);
}

fn resolve_node(tree: &mut DomTree, id: NodeId, rules: &[Rule]) {
    let parent = tree.parent(id);
    let mut style = StyleMap::new();

    // Inherited properties: copy from the parent (already resolved by the
    // preorder) or take the default at the root.
    for &(property, default) in INHERITED_PROPERTIES {
        let value = parent
            .and_then(|p| tree.style(p).and_then(|s| s.get(property)))
            .cloned()
            .unwrap_or_else(|| default.to_string());
        let _ = style.insert(property.to_string(), value);
    }

    // Matching rules in cascade order; every declaration overwrites.
    for rule in rules {
        if rule.selector.matches(tree, id) {
            for declaration in &rule.declarations {
                let _ = style.insert(declaration.name.clone(), declaration.value.clone());
            }
        }
    }

    // The inline style attribute has the highest precedence.
    if let Some(inline) = tree.as_element(id).and_then(|e| e.attr("style")) {
        for declaration in CSSParser::new(inline).body() {
            let _ = style.insert(declaration.name, declaration.value);
        }
    }

    // Percentage font-size resolves against the parent's resolved pixels
    // before any child sees it.
    let percentage = style
        .get("font-size")
        .and_then(|v| v.strip_suffix('%'))
        .map(str::to_string);
    if let Some(percentage) = percentage {
        match percentage.parse::<f64>() {
            Ok(percentage) => {
                let parent_px = parent
                    .and_then(|p| tree.style(p))
                    .and_then(|s| s.get("font-size"))
                    .and_then(|v| font_size_px(v))
                    .unwrap_or(DEFAULT_FONT_SIZE);
                let resolved = parent_px * percentage / 100.0;
                // {:?} keeps a trailing .0 on whole numbers ("8.0px"), the
                // format chained percentages are resolved against.
                let _ = style.insert("font-size".to_string(), format!("{resolved:?}px"));
            }
            Err(_) => {
                warn_once("CSS", &format!("unparseable font-size {percentage}%"));
            }
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.style = style;
    }

    for child in tree.children(id).to_vec() {
        resolve_node(tree, child, rules);
    }
}

/// Numeric prefix of a `<n>px` value.
pub(crate) fn font_size_px(value: &str) -> Option<f64> {
    value.strip_suffix("px")?.parse().ok()
}
