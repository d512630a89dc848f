//! Tests for element tree construction and traversal.

use fennec_dom::{ElementData, NodeId, NodeTree, Tag};

fn new_tree() -> NodeTree {
    NodeTree::new(ElementData::new(Tag::Root))
}

// ========== construction ==========

#[test]
fn test_append_links_parent_and_children() {
    let mut tree = new_tree();
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let b = tree.append(NodeId::ROOT, ElementData::new(Tag::Text));

    assert_eq!(tree.children(NodeId::ROOT), &[a, b]);
    assert_eq!(tree.parent(a), Some(NodeId::ROOT));
    assert_eq!(tree.parent(NodeId::ROOT), None);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_append_child_rejects_cycles() {
    let mut tree = new_tree();
    let outer = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let inner = tree.append(outer, ElementData::new(Tag::View));

    // Attaching an ancestor below its descendant is ignored.
    tree.append_child(inner, outer);
    assert_eq!(tree.parent(outer), Some(NodeId::ROOT));
    assert!(tree.children(inner).is_empty());

    // So is attaching a node to itself, or re-attaching an attached node.
    tree.append_child(inner, inner);
    tree.append_child(NodeId::ROOT, inner);
    assert_eq!(tree.children(NodeId::ROOT), &[outer]);
}

#[test]
fn test_remove_child_detaches() {
    let mut tree = new_tree();
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let b = tree.append(NodeId::ROOT, ElementData::new(Tag::View));

    tree.remove_child(NodeId::ROOT, a);

    assert_eq!(tree.children(NodeId::ROOT), &[b]);
    assert_eq!(tree.parent(a), None);

    // A detached node can be attached again.
    tree.append_child(b, a);
    assert_eq!(tree.parent(a), Some(b));
}

// ========== traversal ==========

#[test]
fn test_descendants_are_in_document_order() {
    let mut tree = new_tree();
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let a1 = tree.append(a, ElementData::new(Tag::Text));
    let a2 = tree.append(a, ElementData::new(Tag::Text));
    let b = tree.append(NodeId::ROOT, ElementData::new(Tag::View));

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![NodeId::ROOT, a, a1, a2, b]);
}

#[test]
fn test_ancestors_and_depth() {
    let mut tree = new_tree();
    let a = tree.append(NodeId::ROOT, ElementData::new(Tag::View));
    let b = tree.append(a, ElementData::new(Tag::View));
    let c = tree.append(b, ElementData::new(Tag::Icon));

    assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![b, a, NodeId::ROOT]);
    assert_eq!(tree.depth(c), 3);
    assert_eq!(tree.depth(NodeId::ROOT), 0);
}

#[test]
fn test_find_by_id() {
    let mut tree = new_tree();
    let _ = tree.append(NodeId::ROOT, ElementData::new(Tag::View).with_id("sidebar"));
    let header = tree.append(NodeId::ROOT, ElementData::new(Tag::View).with_id("header"));

    assert_eq!(tree.find_by_id("header"), Some(header));
    assert_eq!(tree.find_by_id("footer"), None);
}

#[test]
fn test_element_builders() {
    let element = ElementData::new(Tag::Button)
        .with_id("ok")
        .with_class("primary")
        .with_attr("role", "confirm")
        .with_text("OK");

    assert_eq!(element.id(), Some("ok"));
    assert!(element.has_class("primary"));
    assert_eq!(element.attrs.get("role").map(String::as_str), Some("confirm"));
    assert_eq!(element.text_content(), Some("OK"));
}
