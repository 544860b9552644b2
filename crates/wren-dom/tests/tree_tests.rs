//! Integration tests for the DOM arena.

use std::collections::HashMap;

use wren_dom::{Attribute, DomTree, ElementData, NodeId, NodeType};

fn element(tag: &str) -> NodeType {
    NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: Vec::new(),
    })
}

fn text(s: &str) -> NodeType {
    NodeType::Text(s.to_string())
}

#[test]
fn append_child_sets_both_directions() {
    let mut tree = DomTree::new();
    let html = tree.alloc(element("html"));
    let body = tree.alloc(element("body"));
    tree.set_root(html);
    tree.append_child(html, body);

    assert_eq!(tree.parent(body), Some(html));
    assert_eq!(tree.children(html), &[body]);
    assert_eq!(tree.parent(html), None);
}

#[test]
fn every_child_appears_exactly_once_in_its_parent() {
    let mut tree = DomTree::new();
    let html = tree.alloc(element("html"));
    tree.set_root(html);
    let body = tree.alloc(element("body"));
    tree.append_child(html, body);
    let p = tree.alloc(element("p"));
    tree.append_child(body, p);
    let t = tree.alloc(text("hi"));
    tree.append_child(p, t);

    for id in tree.iter_all() {
        if let Some(parent) = tree.parent(id) {
            let occurrences = tree
                .children(parent)
                .iter()
                .filter(|&&c| c == id)
                .count();
            assert_eq!(occurrences, 1, "node {id:?} not exactly once in parent");
        } else {
            assert_eq!(id, tree.root(), "only the root may lack a parent");
        }
    }
}

#[test]
fn ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let html = tree.alloc(element("html"));
    tree.set_root(html);
    let body = tree.alloc(element("body"));
    tree.append_child(html, body);
    let div = tree.alloc(element("div"));
    tree.append_child(body, div);

    let chain: Vec<NodeId> = tree.ancestors(div).collect();
    assert_eq!(chain, vec![body, html]);
}

#[test]
fn descendants_are_preorder() {
    let mut tree = DomTree::new();
    let html = tree.alloc(element("html"));
    tree.set_root(html);
    let head = tree.alloc(element("head"));
    let body = tree.alloc(element("body"));
    tree.append_child(html, head);
    tree.append_child(html, body);
    let p = tree.alloc(element("p"));
    tree.append_child(body, p);

    let order: Vec<NodeId> = tree.descendants(html).collect();
    assert_eq!(order, vec![head, body, p]);
}

#[test]
fn attributes_keep_insertion_order() {
    let data = ElementData {
        tag_name: "meta".to_string(),
        attrs: vec![
            Attribute {
                name: "charset".to_string(),
                value: "utf-8".to_string(),
            },
            Attribute {
                name: "disabled".to_string(),
                value: String::new(),
            },
        ],
    };

    assert_eq!(data.attr("charset"), Some("utf-8"));
    assert_eq!(data.attr("disabled"), Some(""));
    assert_eq!(data.attr("missing"), None);
    let names: Vec<&str> = data.attrs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["charset", "disabled"]);
}

#[test]
fn style_maps_start_empty_and_are_writable() {
    let mut tree = DomTree::new();
    let html = tree.alloc(element("html"));
    tree.set_root(html);
    assert!(tree.style(html).is_some_and(HashMap::is_empty));

    if let Some(node) = tree.get_mut(html) {
        let _ = node
            .style
            .insert("color".to_string(), "black".to_string());
    }
    assert_eq!(
        tree.style(html).and_then(|s| s.get("color")).map(String::as_str),
        Some("black")
    );
}
