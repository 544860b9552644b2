//! Integration tests for selector matching and specificity.

use wren_css::Selector;
use wren_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};
use wren_html::parse_html;

fn tag(name: &str) -> Selector {
    Selector::Tag(name.to_string())
}

fn descendant(parts: &[&str]) -> Selector {
    Selector::Descendant(parts.iter().map(|p| (*p).to_string()).collect())
}

/// First element with the given tag, depth-first.
fn find(tree: &DomTree, tag: &str) -> NodeId {
    tree.iter_all()
        .find(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == tag))
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

/// First text node, depth-first.
fn find_text(tree: &DomTree) -> NodeId {
    tree.iter_all()
        .find(|&id| tree.as_text(id).is_some())
        .expect("no text node in tree")
}

#[test]
fn tag_selector_matches_by_name() {
    let tree = parse_html("<body><p>x</p></body>");
    let p = find(&tree, "p");
    assert!(tag("p").matches(&tree, p));
    assert!(!tag("div").matches(&tree, p));
}

#[test]
fn tag_selector_never_matches_text() {
    let tree = parse_html("<body><p>x</p></body>");
    let text = find_text(&tree);
    assert!(!tag("p").matches(&tree, text));
}

#[test]
fn descendant_selector_matches_across_gaps() {
    // body > div > span > p: "body p" must match through the two
    // intermediate elements.
    let tree = parse_html("<body><div><span><p>x</p></span></div></body>");
    let p = find(&tree, "p");
    assert!(descendant(&["body", "p"]).matches(&tree, p));
    assert!(descendant(&["html", "div", "p"]).matches(&tree, p));
}

#[test]
fn descendant_selector_requires_order() {
    let tree = parse_html("<body><div><p>x</p></div></body>");
    let p = find(&tree, "p");
    assert!(descendant(&["body", "div", "p"]).matches(&tree, p));
    assert!(!descendant(&["div", "body", "p"]).matches(&tree, p));
}

#[test]
fn descendant_selector_fails_when_ancestors_run_out() {
    let tree = parse_html("<body><p>x</p></body>");
    let p = find(&tree, "p");
    assert!(!descendant(&["article", "p"]).matches(&tree, p));
    assert!(!descendant(&["p", "p"]).matches(&tree, p));
}

#[test]
fn specificity_is_part_count() {
    assert_eq!(tag("p").priority(), 1);
    assert_eq!(descendant(&["body", "p"]).priority(), 2);
    assert_eq!(descendant(&["html", "body", "div", "p"]).priority(), 4);
}

#[test]
fn deep_chain_matches_in_linear_time() {
    // A 500-deep div chain matched by a 500-part selector: the flat
    // right-to-left walk handles this instantly; the nested pairwise
    // representation would blow up combinatorially.
    let depth = 500;
    let mut tree = DomTree::new();
    let root = tree.alloc(NodeType::Element(ElementData {
        tag_name: "div".to_string(),
        attrs: Vec::<Attribute>::new(),
    }));
    tree.set_root(root);
    let mut current = root;
    for _ in 1..depth {
        let child = tree.alloc(NodeType::Element(ElementData {
            tag_name: "div".to_string(),
            attrs: Vec::new(),
        }));
        tree.append_child(current, child);
        current = child;
    }

    let selector = Selector::Descendant(vec!["div".to_string(); depth]);
    assert!(selector.matches(&tree, current));

    let too_long = Selector::Descendant(vec!["div".to_string(); depth + 1]);
    assert!(!too_long.matches(&tree, current));
}
