//! Flexbox Layout Engine
//!
//! This module turns a node tree and its computed styles into absolute
//! geometry for every node.
//!
//! # Relevant Specifications
//!
//! - [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS Box Alignment Module Level 3](https://www.w3.org/TR/css-align-3/)
//! - [CSS Overflow Module Level 3](https://www.w3.org/TR/css-overflow-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, points and sizes
//! - [`measure`] - Content measurement callback for leaf elements
//! - `flex` - The flex layout algorithm
//!
//! Layout is pure: each call to [`layout`] recomputes the subtree from
//! scratch and returns a fresh [`LayoutTree`].

pub mod box_model;
mod flex;
pub mod measure;

use std::collections::HashMap;

use serde::Serialize;

use fennec_dom::{NodeId, NodeTree};

pub use box_model::{BoxDimensions, EdgeSizes, Point, Rect, Size};
pub use measure::{ApproximateMeasure, Measure};

use crate::cascade::StyleTree;
use crate::error::Diagnostic;
use crate::style::ComputedStyle;
use flex::{Axes, FlexEngine};

/// The geometry of one node after a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// The node this box belongs to.
    pub node: NodeId,
    /// Content rect plus padding, border and margin thickness.
    pub dimensions: BoxDimensions,
    /// Paint clip from `overflow: hidden` ancestors, if any. The node's own
    /// `overflow` does not clip its own paint.
    pub clip: Option<Rect>,
}

impl LayoutBox {
    /// The content rect.
    #[must_use]
    pub const fn content_rect(&self) -> Rect {
        self.dimensions.content_box()
    }

    /// The padding rect (content + padding).
    #[must_use]
    pub fn padding_rect(&self) -> Rect {
        self.dimensions.padding_box()
    }

    /// The border rect (content + padding + border). This is the painted
    /// and hit-tested area.
    #[must_use]
    pub fn border_rect(&self) -> Rect {
        self.dimensions.border_box()
    }

    /// The margin rect.
    #[must_use]
    pub fn margin_rect(&self) -> Rect {
        self.dimensions.margin_box()
    }
}

/// The result of a layout pass: one [`LayoutBox`] per node of the laid-out
/// subtree, in paint (document pre-) order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
    #[serde(skip)]
    diagnostics: Vec<Diagnostic>,
}

impl LayoutTree {
    fn new(boxes: Vec<LayoutBox>, diagnostics: Vec<Diagnostic>) -> Self {
        let index = boxes
            .iter()
            .enumerate()
            .map(|(position, layout_box)| (layout_box.node, position))
            .collect();
        Self {
            boxes,
            index,
            diagnostics,
        }
    }

    /// The box of `id`, if it was part of the pass.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&LayoutBox> {
        self.index.get(&id).map(|&position| &self.boxes[position])
    }

    /// All boxes in paint order: a parent before its children, siblings in
    /// document order.
    #[must_use]
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the pass produced no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Warnings raised during the pass, at most one per node and property.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The topmost box whose border rect contains `point` and whose clip,
    /// if any, also contains it. Later boxes paint over earlier ones.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&LayoutBox> {
        self.boxes.iter().rev().find(|layout_box| {
            layout_box.border_rect().contains(point)
                && layout_box.clip.is_none_or(|clip| clip.contains(point))
        })
    }

    /// The union of every border rect, or `None` for an empty tree.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.boxes
            .iter()
            .map(LayoutBox::border_rect)
            .reduce(|bounds, rect| bounds.union(&rect))
    }
}

/// Lay out the subtree rooted at `node` inside `available` space.
///
/// An infinite extent on an axis means the root sizes to its content on
/// that axis. Otherwise the root uses its explicit size (percentages
/// resolve against `available`), or fills `available` minus its margins.
/// The root's margin box starts at the origin.
///
/// Layout never fails: anomalies such as unresolvable percentages are
/// recorded in [`LayoutTree::diagnostics`] and degrade to zero.
#[must_use]
pub fn layout<M: Measure + ?Sized>(
    tree: &NodeTree,
    styles: &StyleTree,
    node: NodeId,
    available: Size,
    measure: &M,
) -> LayoutTree {
    if tree.get(node).is_none() {
        return LayoutTree::default();
    }

    let finite = |extent: f32| extent.is_finite().then_some(extent.max(0.0));
    let base = Axes::new(finite(available.width), finite(available.height));

    let fallback = ComputedStyle::default();
    let mut engine = FlexEngine::new(tree, styles, measure, &fallback);
    engine.layout_root(node, base);

    let (boxes, diagnostics) = engine.finish();
    LayoutTree::new(boxes, diagnostics)
}
