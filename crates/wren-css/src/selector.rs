//! Selector matching and specificity.
//!
//! [Selectors Level 4 § 5.1 Type selectors](https://www.w3.org/TR/selectors-4/#type-selectors)
//! [Selectors Level 4 § 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
//!
//! Two selector forms exist: a bare type selector and a descendant chain of
//! type selectors. The chain is kept flat and matched right-to-left against
//! the ancestor walk, which is linear in tree depth × chain length; the
//! nested pairwise representation would be quadratic on deep trees.

use wren_dom::{DomTree, NodeId};

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `p`: matches elements with this (lowercased) tag name.
    Tag(String),
    /// `body p`: whitespace-separated chain in source order; the rightmost
    /// part is the subject, earlier parts must appear somewhere above it.
    /// The chain is never empty.
    Descendant(Vec<String>),
}

impl Selector {
    /// [§ 17 Calculating a selector's specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// Each type selector counts 1; a descendant chain sums its parts.
    #[must_use]
    pub fn priority(&self) -> usize {
        match self {
            Self::Tag(_) => 1,
            Self::Descendant(parts) => parts.len(),
        }
    }

    /// Whether this selector matches the given node.
    ///
    /// Text nodes never match. For a descendant chain, the selector index
    /// advances right-to-left while the walk moves up through the node and
    /// its ancestors; the match succeeds when all parts are consumed before
    /// the ancestor chain runs out.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Self::Tag(tag) => element_has_tag(tree, node, tag),
            Self::Descendant(parts) => {
                let mut remaining = parts.len();
                let mut current = Some(node);
                while remaining > 0 {
                    let Some(id) = current else { break };
                    if element_has_tag(tree, id, &parts[remaining - 1]) {
                        remaining -= 1;
                    }
                    current = tree.parent(id);
                }
                remaining == 0
            }
        }
    }
}

fn element_has_tag(tree: &DomTree, node: NodeId, tag: &str) -> bool {
    tree.as_element(node).is_some_and(|e| e.tag_name == tag)
}
