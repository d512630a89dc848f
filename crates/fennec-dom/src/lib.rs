//! Element tree for the Fennec style and layout core.
//!
//! The tree is supplied by the host toolkit (built from markup, code, or a
//! widget description) and treated as read-only by the cascade and the
//! layout engine.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parent
//! links are plain indices, so the tree can never form an ownership cycle.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use strum_macros::{EnumString, IntoStaticStr};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Attribute holding the text of a [`Tag::Text`] leaf.
pub const TEXT_ATTRIBUTE: &str = "text";

/// A type-safe index into the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The closed set of element kinds.
///
/// Style and layout code only switch on the tag where element-specific
/// sizing matters (see [`Tag::is_content_leaf`]); everything else is
/// driven by the computed style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tag {
    /// The top-level window or surface.
    Root,
    /// A generic container.
    View,
    /// A run of text, measured by the host's text shaper.
    Text,
    /// A raster image with intrinsic dimensions.
    Image,
    /// A vector icon.
    Icon,
    /// A pressable container.
    Button,
    /// A single-line editable field.
    Input,
    /// A host-defined element kind, matched by name.
    #[strum(default)]
    Custom(String),
}

impl Tag {
    /// The name a type selector uses to match this tag.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Custom(name) => name.as_str(),
            other => other.into(),
        }
    }

    /// Content leaves get their size from the host's measurement callback
    /// when they have no children. Any other childless element has an
    /// empty content box.
    #[must_use]
    pub const fn is_content_leaf(&self) -> bool {
        matches!(self, Self::Text | Self::Image | Self::Icon | Self::Input)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Element-specific data: everything a selector can look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The element kind.
    pub tag: Tag,
    /// Unique identifier within the tree, if any.
    pub id: Option<String>,
    /// Class names. Unordered semantically; a `BTreeSet` keeps iteration
    /// deterministic and rejects duplicates.
    pub classes: BTreeSet<String>,
    /// Free-form attributes (text content, image dimensions, ...).
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create an element with no id, classes, or attributes.
    #[must_use]
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: BTreeSet::new(),
            attrs: AttributesMap::new(),
        }
    }

    /// Set the element's id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class name.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let _ = self.classes.insert(class.into());
        self
    }

    /// Add every whitespace-separated class name in `list`.
    #[must_use]
    pub fn with_class_list(mut self, list: &str) -> Self {
        self.classes
            .extend(list.split_ascii_whitespace().map(str::to_string));
        self
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the text content of a text leaf.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_attr(TEXT_ATTRIBUTE, text)
    }

    /// Returns the element's id if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// The text content of a text leaf, if any.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.attrs.get(TEXT_ATTRIBUTE).map(String::as_str)
    }
}

/// A node in the arena: element data plus its tree links.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element this node represents.
    pub data: ElementData,
    /// Parent index; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector and refer to each other by index.
/// The root is always at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    /// Create a tree containing only `root`.
    #[must_use]
    pub fn new(root: ElementData) -> Self {
        Self {
            nodes: vec![Node {
                data: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Only the host mutates the tree, and never during a style or layout
    /// pass.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the element data of a node.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).map(|n| &n.data)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, data: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// The call is ignored if `child` is already attached, is the root, or is
    /// `parent` itself or one of its ancestors: the tree stays acyclic by
    /// construction.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child.0 >= self.nodes.len() || parent.0 >= self.nodes.len() {
            return;
        }
        if child == NodeId::ROOT || self.nodes[child.0].parent.is_some() {
            return;
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach `child` from `parent`. The node stays allocated and can be
    /// re-attached elsewhere; detached subtrees are skipped by traversal
    /// from the root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return;
        };
        let before = node.children.len();
        node.children.retain(|&c| c != child);
        if node.children.len() != before {
            self.nodes[child.0].parent = None;
        }
    }

    /// Allocate `data` and append it under `parent` in one step.
    pub fn append(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(data);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: if self.get(id).is_some() { vec![id] } else { Vec::new() },
        }
    }

    /// Find the element whose id is `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .find(|&node| self.element(node).and_then(ElementData::id) == Some(id))
    }

    /// Depth of a node (the root has depth 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a NodeTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip_through_selectors() {
        assert_eq!("view".parse::<Tag>(), Ok(Tag::View));
        assert_eq!("TEXT".parse::<Tag>(), Ok(Tag::Text));
        assert_eq!(Tag::Image.name(), "image");
        assert_eq!(
            "color-picker".parse::<Tag>(),
            Ok(Tag::Custom("color-picker".to_string()))
        );
        assert_eq!(Tag::Custom("slider".to_string()).name(), "slider");
    }

    #[test]
    fn test_content_leaves() {
        assert!(Tag::Text.is_content_leaf());
        assert!(Tag::Image.is_content_leaf());
        assert!(!Tag::View.is_content_leaf());
        assert!(!Tag::Button.is_content_leaf());
    }

    #[test]
    fn test_class_list_deduplicates() {
        let element = ElementData::new(Tag::View).with_class_list("card  card primary");
        assert_eq!(element.classes.len(), 2);
        assert!(element.has_class("card"));
        assert!(element.has_class("primary"));
    }
}
