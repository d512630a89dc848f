//! Cascading and Style Computation
//!
//! This module implements style computation per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/),
//! restricted to a single author origin: no importance, layers or scoping.

use std::collections::BTreeMap;

use serde::Serialize;

use fennec_dom::{NodeId, NodeTree};

use crate::error::Diagnostic;
use crate::style::ComputedStyle;
use crate::stylesheet::StyleSheet;

/// Computed styles for every node of a tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleTree {
    styles: BTreeMap<NodeId, ComputedStyle>,
    #[serde(skip)]
    diagnostics: Vec<Diagnostic>,
}

impl StyleTree {
    /// The computed style of `id`, if it was part of the styled tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(&id)
    }

    /// Number of styled nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no node was styled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Diagnostics from compiling the stylesheet that produced this tree.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
/// "The cascade takes an unordered list of declared values for a given property
/// on a given element, sorts them by their declaration's precedence..."
///
/// Compute the style of a single node. `parent` is the parent's computed
/// style, or `None` at the root. The result depends only on the inputs:
/// calling this twice yields identical styles.
#[must_use]
pub fn resolve(
    tree: &NodeTree,
    node: NodeId,
    stylesheet: &StyleSheet,
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let initial = ComputedStyle::default();
    let parent = parent.unwrap_or(&initial);

    // [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    // Start with inherited styles
    let mut computed = ComputedStyle::inheriting_from(parent);

    let Some(element) = tree.element(node) else {
        return computed;
    };

    // [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    // Lowest precedence first, so later declarations override earlier ones
    // property by property.
    for rule in stylesheet.matching_rules(element) {
        for declaration in &rule.declarations {
            computed.apply_declaration(declaration, parent);
        }
    }

    computed
}

/// Compute styles for the whole tree, root first, so every node sees its
/// parent's finished style.
#[must_use]
pub fn compute_styles(tree: &NodeTree, stylesheet: &StyleSheet) -> StyleTree {
    let mut styles = BTreeMap::new();

    for id in tree.descendants(tree.root()) {
        let parent = tree.parent(id).and_then(|p| styles.get(&p));
        let style = resolve(tree, id, stylesheet, parent);
        let _ = styles.insert(id, style);
    }

    StyleTree {
        styles,
        diagnostics: stylesheet.diagnostics().to_vec(),
    }
}
