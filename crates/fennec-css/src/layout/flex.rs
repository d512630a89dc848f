//! CSS Flexbox Layout Algorithm.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! Every element is a flex container for its children. Supported:
//! - `direction: row | column`
//! - single-line and multi-line (`wrap`) containers with greedy line breaking
//! - `flexBasis` / `flexGrow` / `flexShrink` with the § 9.7 freeze loop,
//!   including min/max violations
//! - `justify` (six keywords), `align` / `alignSelf` (four keywords),
//!   `alignContent` (seven keywords)
//! - `gap` between items and between lines
//! - `overflow: hidden` clipping of descendant paint
//!
//! Not implemented: `order`, auto margins, baseline alignment, reverse
//! directions, absolutely positioned children.
//!
//! Sizes (`width`, `height`, `flexBasis`, min/max) are border-box sizes.
//!
//! A box is computed in one of two modes. In *measure* mode only its
//! border-box size is returned; results are memoized because a parent may
//! ask for the same child twice (basis, then cross size). In *place* mode
//! the box is also recorded with an absolute position and its children are
//! placed in turn. Every node is placed exactly once per pass.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use fennec_dom::{NodeId, NodeTree};

use super::LayoutBox;
use super::box_model::{BoxDimensions, EdgeSizes, Point, Rect, Size};
use super::measure::Measure;
use crate::cascade::StyleTree;
use crate::error::{Diagnostic, LayoutWarning};
use crate::style::{
    Align, AlignContent, ComputedStyle, Dimension, Edges, Justify, Length, Overflow,
};

/// Overflow smaller than this is rounding noise, not a warning.
const OVERFLOW_TOLERANCE: f32 = 0.5;

/// A value per physical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(super) struct Axes<T> {
    pub(super) width: T,
    pub(super) height: T,
}

impl<T: Copy> Axes<T> {
    pub(super) const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    fn from_main_cross(row: bool, main: T, cross: T) -> Self {
        if row {
            Self::new(main, cross)
        } else {
            Self::new(cross, main)
        }
    }

    fn main(self, row: bool) -> T {
        if row { self.width } else { self.height }
    }

    fn cross(self, row: bool) -> T {
        if row { self.height } else { self.width }
    }
}

impl From<Size> for Axes<f32> {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<Axes<f32>> for Size {
    fn from(axes: Axes<f32>) -> Self {
        Self::new(axes.width, axes.height)
    }
}

/// What a parent tells a child before computing it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Inputs {
    /// Border-box sizes the parent has already decided.
    pub(super) known: Axes<Option<f32>>,
    /// Whether a known size counts as definite for the child's own
    /// percentage children.
    pub(super) definite: Axes<bool>,
    /// The parent's definite content size, the base for the child's
    /// percentages. `None` on a content-sized axis.
    pub(super) percent_base: Axes<Option<f32>>,
}

/// Where a placed box goes.
#[derive(Debug, Clone, Copy)]
pub(super) struct Place {
    /// Top-left corner of the border box.
    pub(super) origin: Point,
    /// Paint clip inherited from `overflow: hidden` ancestors.
    pub(super) clip: Option<Rect>,
}

/// A container's content rect and the clip its children paint under.
#[derive(Debug, Clone, Copy)]
struct Placement {
    content: Rect,
    clip: Option<Rect>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    node: NodeId,
    known: Axes<Option<u32>>,
    definite: Axes<bool>,
    base: Axes<Option<u32>>,
}

impl CacheKey {
    fn new(node: NodeId, inputs: &Inputs) -> Self {
        let bits = |axes: Axes<Option<f32>>| {
            Axes::new(axes.width.map(f32::to_bits), axes.height.map(f32::to_bits))
        };
        Self {
            node,
            known: bits(inputs.known),
            definite: inputs.definite,
            base: bits(inputs.percent_base),
        }
    }
}

/// A box's own edges and size constraints, resolved against its parent's
/// content size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    padding: EdgeSizes,
    border: EdgeSizes,
    margin: EdgeSizes,
    min: Axes<f32>,
    max: Axes<Option<f32>>,
    explicit: Axes<Option<f32>>,
}

impl Frame {
    fn pb(&self) -> EdgeSizes {
        self.padding.plus(&self.border)
    }
}

/// Per-item data collected during flex layout.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
#[derive(Debug)]
struct FlexItem {
    node: NodeId,
    frame: Frame,
    align: Align,
    /// Percentages of the item's own children can rely on its main size.
    definite_main: bool,
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size.
    base_size: f32,
    /// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The base size clamped by min/max and floored at padding + border.
    hypothetical_size: f32,
    grow: f32,
    shrink: f32,
    /// Lower bound for the target size: max(min, padding + border).
    floor: f32,
    ceiling: Option<f32>,
    /// The resolved main size after § 9.7.
    target_size: f32,
    frozen: bool,
    /// Main-axis margins.
    outer_main: f32,
    /// Cross-axis margins.
    outer_cross: f32,
    /// Hypothetical cross size (border box).
    cross_size: f32,
}

impl FlexItem {
    fn outer_target(&self) -> f32 {
        self.target_size + self.outer_main
    }
}

fn main_sum(edges: &EdgeSizes, row: bool) -> f32 {
    if row {
        edges.horizontal()
    } else {
        edges.vertical()
    }
}

fn cross_sum(edges: &EdgeSizes, row: bool) -> f32 {
    main_sum(edges, !row)
}

fn main_start(edges: &EdgeSizes, row: bool) -> f32 {
    if row { edges.left } else { edges.top }
}

fn cross_start(edges: &EdgeSizes, row: bool) -> f32 {
    main_start(edges, !row)
}

fn cross_end(edges: &EdgeSizes, row: bool) -> f32 {
    if row { edges.bottom } else { edges.right }
}

/// [§ 4.4 box-sizing](https://www.w3.org/TR/css-box-4/#box-sizing)
///
/// Clamp a border-box size. `min` wins over `max`, and nothing is smaller
/// than the box's own padding + border.
fn clamp(value: f32, min: f32, max: Option<f32>, floor: f32) -> f32 {
    let capped = max.map_or(value, |max| value.min(max));
    capped.max(min).max(floor)
}

#[allow(clippy::cast_precision_loss)]
fn gaps(gap: f32, count: usize) -> f32 {
    gap * count.saturating_sub(1) as f32
}

/// Flex layout state for one pass.
pub(super) struct FlexEngine<'a, M: Measure + ?Sized> {
    tree: &'a NodeTree,
    styles: &'a StyleTree,
    measure: &'a M,
    fallback: &'a ComputedStyle,
    cache: HashMap<CacheKey, Size>,
    warned: HashSet<(NodeId, &'static str)>,
    boxes: Vec<LayoutBox>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, M: Measure + ?Sized> FlexEngine<'a, M> {
    /// `fallback` is used for nodes the style tree has no entry for.
    pub(super) fn new(
        tree: &'a NodeTree,
        styles: &'a StyleTree,
        measure: &'a M,
        fallback: &'a ComputedStyle,
    ) -> Self {
        Self {
            tree,
            styles,
            measure,
            fallback,
            cache: HashMap::new(),
            warned: HashSet::new(),
            boxes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Placed boxes in paint order and the warnings raised while placing.
    pub(super) fn finish(self) -> (Vec<LayoutBox>, Vec<Diagnostic>) {
        (self.boxes, self.diagnostics)
    }

    fn style(&self, node: NodeId) -> &'a ComputedStyle {
        self.styles.get(node).unwrap_or(self.fallback)
    }

    /// Lay out `node` as the root of a pass. `base` is the finite part of
    /// the available size.
    ///
    /// An explicit size wins; otherwise the root fills the available size
    /// minus its margins, and sizes to content on an unbounded axis.
    pub(super) fn layout_root(&mut self, node: NodeId, base: Axes<Option<f32>>) {
        let style = self.style(node);
        let frame = self.frame(node, style, base, true);

        let fill = |available: Option<f32>, explicit: Option<f32>, margins: f32| {
            if explicit.is_some() {
                None
            } else {
                available.map(|a| (a - margins).max(0.0))
            }
        };
        let known = Axes::new(
            fill(base.width, frame.explicit.width, frame.margin.horizontal()),
            fill(base.height, frame.explicit.height, frame.margin.vertical()),
        );
        let inputs = Inputs {
            known,
            definite: Axes::new(base.width.is_some(), base.height.is_some()),
            percent_base: base,
        };
        let place = Place {
            origin: Point::new(frame.margin.left, frame.margin.top),
            clip: None,
        };
        let _ = self.compute_box(node, inputs, Some(place));
    }

    fn warn(&mut self, node: NodeId, key: &'static str, warning: LayoutWarning) {
        if !self.warned.insert((node, key)) {
            return;
        }
        let diagnostic = Diagnostic::from(warning);
        diagnostic.report();
        self.diagnostics.push(diagnostic);
    }

    /// Resolve a length against `base`. A percentage against an indefinite
    /// base yields `None`; when `warn` is set this is reported once per node
    /// and property.
    fn resolve(
        &mut self,
        node: NodeId,
        property: &'static str,
        length: Length,
        base: Option<f32>,
        warn: bool,
    ) -> Option<f32> {
        let resolved = length.resolve(base);
        if resolved.is_none() && warn {
            self.warn(
                node,
                property,
                LayoutWarning::UnresolvedPercentage { node, property },
            );
        }
        resolved
    }

    fn edges(
        &mut self,
        node: NodeId,
        property: &'static str,
        edges: &Edges<Length>,
        base: Option<f32>,
        warn: bool,
    ) -> EdgeSizes {
        let mut side = |length| self.resolve(node, property, length, base, warn).unwrap_or(0.0);
        EdgeSizes {
            top: side(edges.top),
            right: side(edges.right),
            bottom: side(edges.bottom),
            left: side(edges.left),
        }
    }

    /// [§ 8.3 Percentage padding and margins](https://www.w3.org/TR/css-box-3/#padding-physical)
    ///
    /// "Percentages: refer to logical width of containing block", on every
    /// edge. Sizes and min/max resolve against their own axis.
    fn frame(
        &mut self,
        node: NodeId,
        style: &ComputedStyle,
        base: Axes<Option<f32>>,
        warn: bool,
    ) -> Frame {
        let padding = self.edges(node, "padding", &style.padding, base.width, warn);
        let margin = self.edges(node, "margin", &style.margin, base.width, warn);
        let border = EdgeSizes::uniform(style.border_width);

        let mut explicit = |property, dimension: Dimension, base| {
            dimension
                .length()
                .map(|length| self.resolve(node, property, length, base, warn).unwrap_or(0.0))
        };
        let explicit = Axes::new(
            explicit("width", style.width, base.width),
            explicit("height", style.height, base.height),
        );

        // An unresolvable min or max limit is ignored.
        let min = Axes::new(
            self.resolve(node, "minWidth", style.min_width, base.width, warn)
                .unwrap_or(0.0),
            self.resolve(node, "minHeight", style.min_height, base.height, warn)
                .unwrap_or(0.0),
        );
        let max = Axes::new(
            style
                .max_width
                .and_then(|length| self.resolve(node, "maxWidth", length, base.width, warn)),
            style
                .max_height
                .and_then(|length| self.resolve(node, "maxHeight", length, base.height, warn)),
        );

        Frame {
            padding,
            border,
            margin,
            min,
            max,
            explicit,
        }
    }

    /// Compute the border-box size of `node`, and place it (and its
    /// subtree) when `place` is given.
    pub(super) fn compute_box(
        &mut self,
        node: NodeId,
        inputs: Inputs,
        place: Option<Place>,
    ) -> Size {
        let key = CacheKey::new(node, &inputs);
        let cached = if place.is_none() {
            self.cache.get(&key).copied()
        } else {
            None
        };
        if let Some(size) = cached {
            return size;
        }

        let style = self.style(node);
        let frame = self.frame(node, style, inputs.percent_base, place.is_some());
        let pb = frame.pb();

        // STEP 1: Sizes decided before looking at content: imposed by the
        // parent, or explicit in the style.
        let fixed = Axes::new(
            inputs
                .known
                .width
                .or(frame.explicit.width)
                .map(|w| clamp(w, frame.min.width, frame.max.width, pb.horizontal())),
            inputs
                .known
                .height
                .or(frame.explicit.height)
                .map(|h| clamp(h, frame.min.height, frame.max.height, pb.vertical())),
        );
        let definite = Axes::new(
            fixed.width.is_some()
                && (inputs.definite.width
                    || (inputs.known.width.is_none() && frame.explicit.width.is_some())),
            fixed.height.is_some()
                && (inputs.definite.height
                    || (inputs.known.height.is_none() && frame.explicit.height.is_some())),
        );
        let inner = Axes::new(
            fixed.width.map(|w| (w - pb.horizontal()).max(0.0)),
            fixed.height.map(|h| (h - pb.vertical()).max(0.0)),
        );
        let child_base = Axes::new(
            inner.width.filter(|_| definite.width),
            inner.height.filter(|_| definite.height),
        );

        // STEP 2: Content-sized axes. Width first, then height with the
        // width known, so wrapping content reports its real height.
        let width = match fixed.width {
            Some(width) => width,
            None => {
                let content = self.flex(node, style, Axes::new(None, inner.height), child_base, None);
                clamp(
                    content.width + pb.horizontal(),
                    frame.min.width,
                    frame.max.width,
                    pb.horizontal(),
                )
            }
        };
        let height = match fixed.height {
            Some(height) => height,
            None => {
                let inner_width = (width - pb.horizontal()).max(0.0);
                let content =
                    self.flex(node, style, Axes::new(Some(inner_width), None), child_base, None);
                clamp(
                    content.height + pb.vertical(),
                    frame.min.height,
                    frame.max.height,
                    pb.vertical(),
                )
            }
        };
        let size = Size::new(width, height);

        match place {
            None => {
                let _ = self.cache.insert(key, size);
            }
            Some(place) => self.place(node, style, &frame, size, definite, place),
        }
        size
    }

    /// STEP 3: Record the box, then place its children inside the content
    /// rect.
    fn place(
        &mut self,
        node: NodeId,
        style: &'a ComputedStyle,
        frame: &Frame,
        size: Size,
        definite: Axes<bool>,
        place: Place,
    ) {
        let pb = frame.pb();
        let content = Rect::new(
            place.origin.x + pb.left,
            place.origin.y + pb.top,
            (size.width - pb.horizontal()).max(0.0),
            (size.height - pb.vertical()).max(0.0),
        );
        self.boxes.push(LayoutBox {
            node,
            dimensions: BoxDimensions {
                content,
                padding: frame.padding,
                border: frame.border,
                margin: frame.margin,
            },
            clip: place.clip,
        });

        // [§ 3 Scrolling and Clipping](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
        // "hidden: This value indicates that the box's content is clipped to
        // its padding box." Descendants are clipped to this box's content
        // rect, within whatever clip already applies to it. The box's own
        // paint is not affected.
        let child_clip = match style.overflow {
            Overflow::Hidden => Some(place.clip.map_or(content, |clip| content.intersect(&clip))),
            Overflow::Visible => place.clip,
        };

        let inner = Axes::new(Some(content.width), Some(content.height));
        let child_base = Axes::new(
            inner.width.filter(|_| definite.width),
            inner.height.filter(|_| definite.height),
        );
        let placement = Placement {
            content,
            clip: child_clip,
        };
        let _ = self.flex(node, style, inner, child_base, Some(placement));
    }

    /// [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
    ///
    /// Lay out the children of `node` inside a content box of `inner` size
    /// (`None` on a content-sized axis) and return the content size. With a
    /// `placement`, children are also placed.
    fn flex(
        &mut self,
        node: NodeId,
        style: &'a ComputedStyle,
        inner: Axes<Option<f32>>,
        child_base: Axes<Option<f32>>,
        placement: Option<Placement>,
    ) -> Size {
        let tree = self.tree;
        let children = tree.children(node);

        if children.is_empty() {
            // Content leaves are sized by the host; any other empty box has
            // no content.
            return tree
                .element(node)
                .filter(|element| element.tag.is_content_leaf())
                .map_or_else(Size::default, |element| {
                    let measured = self.measure.measure(element, style);
                    Size::new(measured.width.max(0.0), measured.height.max(0.0))
                });
        }

        let row = style.direction.is_row();
        let warn = placement.is_some();
        let gap = style.gap.max(0.0);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[FLEX] node {} {} children, direction={}, inner={:?}, place={}",
            node.0,
            children.len(),
            style.direction,
            inner,
            warn
        );

        // STEP 1 (§ 9.2): Determine the flex base size and hypothetical main
        // size of each item.
        let mut items: Vec<FlexItem> = Vec::with_capacity(children.len());
        for &child in children {
            let item = self.collect_item(child, style, inner, child_base, row, warn);
            items.push(item);
        }

        // STEP 2 (§ 9.3): Collect flex items into flex lines.
        let lines = collect_lines(&items, inner.main(row).filter(|_| style.wrap), gap);

        // STEP 3 (§ 9.7): Resolve flexible lengths on each line.
        for line in &lines {
            let line_items = &mut items[line.clone()];
            match inner.main(row) {
                Some(available) => {
                    let available = available - gaps(gap, line_items.len());
                    resolve_flexible_lengths(line_items, available);

                    let used: f32 = line_items.iter().map(FlexItem::outer_target).sum();
                    if warn && used - available > OVERFLOW_TOLERANCE {
                        self.warn(
                            node,
                            "shrink",
                            LayoutWarning::ShrinkFloor {
                                node,
                                overflow: used - available,
                            },
                        );
                    }
                }
                None => {
                    for item in line_items {
                        item.target_size = item.hypothetical_size;
                    }
                }
            }
        }

        // STEP 4 (§ 9.4): Determine the hypothetical cross size of each item
        // by laying it out with its used main size.
        for item in &mut items {
            let cross = self.hypothetical_cross(item, style, inner, child_base, row);
            item.cross_size = cross;
        }

        // STEP 5 (§ 9.4 step 8): Cross size of each line. A single-line
        // container with a definite cross size uses that size.
        let single_line_cross = inner.cross(row).filter(|_| !style.wrap);
        let mut line_cross: Vec<f32> = lines
            .iter()
            .map(|line| {
                single_line_cross.unwrap_or_else(|| {
                    items[line.clone()]
                        .iter()
                        .map(|item| item.cross_size + item.outer_cross)
                        .fold(0.0, f32::max)
                })
            })
            .collect();

        let main_extent = lines
            .iter()
            .map(|line| {
                let line_items = &items[line.clone()];
                line_items.iter().map(FlexItem::outer_target).sum::<f32>()
                    + gaps(gap, line_items.len())
            })
            .fold(0.0, f32::max);
        let lines_extent = line_cross.iter().sum::<f32>() + gaps(gap, lines.len());
        let content_main = inner.main(row).unwrap_or(main_extent);
        let content_cross = inner.cross(row).unwrap_or(lines_extent);

        let Some(placement) = placement else {
            return Axes::from_main_cross(row, content_main, content_cross).into();
        };

        // STEP 6 (§ 9.4 step 15): align-content distributes the lines.
        let free_cross = (content_cross - lines_extent).max(0.0);
        let (leading_cross, between_lines) = if style.align_content == AlignContent::Stretch {
            #[allow(clippy::cast_precision_loss)]
            let extra = free_cross / line_cross.len() as f32;
            for cross in &mut line_cross {
                *cross += extra;
            }
            (0.0, 0.0)
        } else {
            compute_justify_offsets(
                content_distribution(style.align_content),
                free_cross,
                lines.len(),
            )
        };

        // STEP 7 (§ 9.5 / § 9.6): Main-axis alignment and cross-axis
        // alignment, then place each item.
        let origin = Axes::new(placement.content.x, placement.content.y);
        let mut line_position = origin.cross(row) + leading_cross;

        for (line, &cross) in lines.iter().zip(&line_cross) {
            let line_items = &items[line.clone()];
            let used: f32 =
                line_items.iter().map(FlexItem::outer_target).sum::<f32>() + gaps(gap, line_items.len());
            let (leading, between) =
                compute_justify_offsets(style.justify, content_main - used, line_items.len());
            let mut main_position = origin.main(row) + leading;

            for item in line_items {
                let cross_size = used_cross(item, cross, row);
                let margin = &item.frame.margin;

                // [§ 8.3 align-items](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
                let cross_offset = match item.align {
                    Align::Start | Align::Stretch => cross_start(margin, row),
                    Align::End => cross - cross_size - cross_end(margin, row),
                    Align::Center => {
                        (cross - cross_size - item.outer_cross) / 2.0 + cross_start(margin, row)
                    }
                };
                let position = Axes::from_main_cross(
                    row,
                    main_position + main_start(margin, row),
                    line_position + cross_offset,
                );

                #[cfg(feature = "layout-trace")]
                eprintln!(
                    "[FLEX] node {} placing child {} at ({}, {}) size main={} cross={}",
                    node.0, item.node.0, position.width, position.height, item.target_size, cross_size
                );

                let stretched = item.align == Align::Stretch && item.frame.explicit.cross(row).is_none();
                let definite_cross = child_base.cross(row).is_some()
                    && (stretched || item.frame.explicit.cross(row).is_some());
                let inputs = Inputs {
                    known: Axes::from_main_cross(row, Some(item.target_size), Some(cross_size)),
                    definite: Axes::from_main_cross(row, item.definite_main, definite_cross),
                    percent_base: child_base,
                };
                let place = Place {
                    origin: Point::new(position.width, position.height),
                    clip: placement.clip,
                };
                let _ = self.compute_box(item.node, inputs, Some(place));

                main_position += item.outer_target() + gap + between;
            }

            line_position += cross + gap + between_lines;
        }

        Axes::from_main_cross(row, content_main, content_cross).into()
    }

    /// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    fn collect_item(
        &mut self,
        child: NodeId,
        container: &ComputedStyle,
        inner: Axes<Option<f32>>,
        child_base: Axes<Option<f32>>,
        row: bool,
        warn: bool,
    ) -> FlexItem {
        let style = self.style(child);
        let frame = self.frame(child, style, child_base, warn);
        let pb = frame.pb();
        let align = style.align_self.unwrap_or(container.align);
        let outer_main = main_sum(&frame.margin, row);
        let outer_cross = cross_sum(&frame.margin, row);
        let floor = frame.min.main(row).max(main_sum(&pb, row));
        let ceiling = frame.max.main(row);

        let main_dimension = if row { style.width } else { style.height };
        let definite_main = child_base.main(row).is_some()
            || main_dimension.length().is_some_and(|length| !length.is_percent());

        // [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
        // "Determine the flex base size of each item": an explicit flex
        // basis, else the main size property, else the content size.
        let base_size = match style.flex_basis.length() {
            Some(basis) => self
                .resolve(child, "flexBasis", basis, child_base.main(row), warn)
                .unwrap_or(0.0),
            None => match frame.explicit.main(row) {
                Some(main) => main,
                None => {
                    let stretch_cross = stretch_cross(&frame, align, container, inner, row);
                    let inputs = Inputs {
                        known: Axes::from_main_cross(row, None, stretch_cross),
                        definite: Axes::from_main_cross(
                            row,
                            false,
                            child_base.cross(row).is_some(),
                        ),
                        percent_base: child_base,
                    };
                    Axes::from(self.compute_box(child, inputs, None)).main(row)
                }
            },
        };

        // [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
        // "The hypothetical main size is the item's flex base size clamped
        // according to its used min and max main sizes."
        let hypothetical_size = clamp(base_size, floor, ceiling, floor);

        FlexItem {
            node: child,
            frame,
            align,
            definite_main,
            base_size,
            hypothetical_size,
            grow: style.flex_grow.max(0.0),
            shrink: style.flex_shrink.max(0.0),
            floor,
            ceiling,
            target_size: hypothetical_size,
            frozen: false,
            outer_main,
            outer_cross,
            cross_size: 0.0,
        }
    }

    /// [§ 9.4 step 7](https://www.w3.org/TR/css-flexbox-1/#algo-cross-item)
    /// "Determine the hypothetical cross size of each item by performing
    /// layout with the used main size and the available space."
    fn hypothetical_cross(
        &mut self,
        item: &FlexItem,
        container: &ComputedStyle,
        inner: Axes<Option<f32>>,
        child_base: Axes<Option<f32>>,
        row: bool,
    ) -> f32 {
        let frame = &item.frame;
        if let Some(cross) = frame.explicit.cross(row) {
            return clamp(
                cross,
                frame.min.cross(row),
                frame.max.cross(row),
                cross_sum(&frame.pb(), row),
            );
        }
        if let Some(cross) = stretch_cross(frame, item.align, container, inner, row) {
            return cross;
        }
        let inputs = Inputs {
            known: Axes::from_main_cross(row, Some(item.target_size), None),
            definite: Axes::from_main_cross(row, item.definite_main, false),
            percent_base: child_base,
        };
        Axes::from(self.compute_box(item.node, inputs, None)).cross(row)
    }
}

/// The cross size a stretched item gets in a single-line container with
/// a definite cross size, known before the line is built.
fn stretch_cross(
    frame: &Frame,
    align: Align,
    container: &ComputedStyle,
    inner: Axes<Option<f32>>,
    row: bool,
) -> Option<f32> {
    if align != Align::Stretch || frame.explicit.cross(row).is_some() || container.wrap {
        return None;
    }
    inner.cross(row).map(|cross| {
        clamp(
            cross - cross_sum(&frame.margin, row),
            frame.min.cross(row),
            frame.max.cross(row),
            cross_sum(&frame.pb(), row),
        )
    })
}

/// [§ 9.4 step 11](https://www.w3.org/TR/css-flexbox-1/#algo-stretch)
/// "If a flex item has align-self: stretch, its computed cross size
/// property is auto, and neither of its cross-axis margins are auto, the
/// used outer cross size is the used cross size of its flex line,
/// clamped according to the item's used min and max cross sizes."
fn used_cross(item: &FlexItem, line_cross: f32, row: bool) -> f32 {
    let frame = &item.frame;
    if item.align != Align::Stretch || frame.explicit.cross(row).is_some() {
        return item.cross_size;
    }
    clamp(
        line_cross - item.outer_cross,
        frame.min.cross(row),
        frame.max.cross(row),
        cross_sum(&frame.pb(), row),
    )
}

/// [§ 9.3 step 5](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)
///
/// "Collect flex items into flex lines: If the flex container is
/// single-line, collect all the flex items into a single flex line.
/// Otherwise, starting from the first uncollected item, collect consecutive
/// items one by one until the first time that the next collected item would
/// not fit into the flex container's inner main size."
///
/// `limit` is `None` for a single-line container. An item that does not
/// fit on an empty line still gets a line of its own.
fn collect_lines(items: &[FlexItem], limit: Option<f32>, gap: f32) -> Vec<Range<usize>> {
    let Some(limit) = limit else {
        return vec![0..items.len()];
    };

    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0_f32;
    for (index, item) in items.iter().enumerate() {
        let outer = item.hypothetical_size + item.outer_main;
        if index == start {
            used = outer;
        } else if used + gap + outer > limit + f32::EPSILON {
            lines.push(start..index);
            start = index;
            used = outer;
        } else {
            used += gap + outer;
        }
    }
    lines.push(start..items.len());
    lines
}

/// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
///
/// Full iterative freeze loop. `available_main` is the line's inner main
/// size minus its gaps.
fn resolve_flexible_lengths(items: &mut [FlexItem], available_main: f32) {
    if items.is_empty() {
        return;
    }

    // STEP 1: "Determine the used flex factor."
    //
    // "If the sum of the outer hypothetical main sizes of all items on the
    // line is less than the flex container's inner main size, use the flex
    // grow factor for the rest of this algorithm; otherwise, use the flex
    // shrink factor."
    let sum_outer_hypo: f32 = items
        .iter()
        .map(|item| item.hypothetical_size + item.outer_main)
        .sum();
    let growing = sum_outer_hypo < available_main;

    // STEP 2: "Size inflexible items."
    //
    // "Freeze, setting its target main size to its hypothetical main size…
    //   - any item that has a flex factor of zero
    //   - if using the flex grow factor: any item that has a flex base size
    //     greater than its hypothetical main size
    //   - if using the flex shrink factor: any item that has a flex base size
    //     less than its hypothetical main size"
    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        item.target_size = item.hypothetical_size;
        item.frozen = factor <= 0.0
            || (growing && item.base_size > item.hypothetical_size)
            || (!growing && item.base_size < item.hypothetical_size);
    }

    // STEP 3: "Calculate initial free space."
    let free_space = |items: &[FlexItem]| {
        available_main
            - items
                .iter()
                .map(|item| {
                    let size = if item.frozen {
                        item.target_size
                    } else {
                        item.base_size
                    };
                    size + item.outer_main
                })
                .sum::<f32>()
    };
    let initial_free_space = free_space(&*items);

    // STEP 4: Loop until all items are frozen.
    while !items.iter().all(|item| item.frozen) {
        // 4b. Calculate remaining free space.
        let remaining_free = free_space(&*items);

        // 4c. "If the sum of the unfrozen flex factors is less than one,
        //      multiply the initial free space by this sum."
        let unfrozen_factor_sum: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| if growing { item.grow } else { item.shrink })
            .sum();
        let free = if unfrozen_factor_sum < 1.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            // "…if the magnitude of this value is less than the magnitude
            // of the remaining free space, use this as the used free space."
            if scaled.abs() < remaining_free.abs() {
                scaled
            } else {
                remaining_free
            }
        } else {
            remaining_free
        };

        // 4d. Distribute free space.
        if growing {
            // "Find the ratio of the item's flex grow factor to the sum of
            // the flex grow factors of all unfrozen items on the line. Set
            // the item's target main size to its flex base size plus a
            // fraction of the remaining free space proportional to the
            // ratio."
            for item in items.iter_mut().filter(|item| !item.frozen) {
                item.target_size = item.base_size + free * item.grow / unfrozen_factor_sum;
            }
        } else {
            // "For every unfrozen item on the line, multiply its flex shrink
            // factor by its inner flex base size, and note this as its
            // scaled flex shrink factor. [...] Set the item's target main
            // size to its flex base size minus a fraction of the absolute
            // value of the remaining free space proportional to the ratio."
            let scaled_shrink_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(|item| item.shrink * item.base_size)
                .sum();
            for item in items.iter_mut().filter(|item| !item.frozen) {
                item.target_size = if scaled_shrink_sum > 0.0 {
                    let ratio = item.shrink * item.base_size / scaled_shrink_sum;
                    free.abs().mul_add(-ratio, item.base_size)
                } else {
                    item.base_size
                };
            }
        }

        // 4e. "Fix min/max violations." Clamp each unfrozen item's target
        // size by its used min and max main sizes and floor it at zero
        // content size.
        let mut total_violation = 0.0_f32;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let clamped = clamp(item.target_size, item.floor, item.ceiling, item.floor);
            total_violation += clamped - item.target_size;
            item.target_size = clamped;
        }

        // 4f. "Freeze over-flexed items."
        //
        // "If the total violation is:
        //   - Zero: freeze all items.
        //   - Positive: freeze all items with min violations.
        //   - Negative: freeze all items with max violations."
        if total_violation.abs() < 0.01 {
            for item in items.iter_mut() {
                item.frozen = true;
            }
        } else if total_violation > 0.0 {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.target_size <= item.floor + 0.01 {
                    item.frozen = true;
                }
            }
        } else {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.ceiling.is_some_and(|max| item.target_size >= max - 0.01) {
                    item.frozen = true;
                }
            }
        }
    }
}

/// Map an `alignContent` keyword onto the matching distribution.
/// `stretch` is handled by the caller before distribution.
const fn content_distribution(align: AlignContent) -> Justify {
    match align {
        AlignContent::Start | AlignContent::Stretch => Justify::Start,
        AlignContent::End => Justify::End,
        AlignContent::Center => Justify::Center,
        AlignContent::SpaceBetween => Justify::SpaceBetween,
        AlignContent::SpaceAround => Justify::SpaceAround,
        AlignContent::SpaceEvenly => Justify::SpaceEvenly,
    }
}

/// Compute justify-content alignment offsets.
///
/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Returns `(initial_offset, extra_space_between_items)`. Negative free
/// space always packs toward the start.
fn compute_justify_offsets(justify: Justify, free_space: f32, item_count: usize) -> (f32, f32) {
    if item_count == 0 || free_space <= 0.0 {
        return (0.0, 0.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = item_count as f32;
    match justify {
        // "Flex items are packed toward the start of the line."
        Justify::Start => (0.0, 0.0),

        // "Flex items are packed toward the end of the line."
        Justify::End => (free_space, 0.0),

        // "Flex items are packed toward the center of the line."
        Justify::Center => (free_space / 2.0, 0.0),

        // "If the leftover free-space is negative or there is only a single
        // flex item on the line, this value is identical to flex-start."
        Justify::SpaceBetween => {
            if item_count == 1 {
                (0.0, 0.0)
            } else {
                (0.0, free_space / (count - 1.0))
            }
        }

        // "Flex items are evenly distributed in the line, with half-size
        // spaces on either end."
        Justify::SpaceAround => {
            let space = free_space / count;
            (space / 2.0, space)
        }

        // "...with a full-size space on either end."
        Justify::SpaceEvenly => {
            let space = free_space / (count + 1.0);
            (space, space)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(base: f32, grow: f32, shrink: f32) -> FlexItem {
        FlexItem {
            node: NodeId(1),
            frame: Frame {
                padding: EdgeSizes::default(),
                border: EdgeSizes::default(),
                margin: EdgeSizes::default(),
                min: Axes::default(),
                max: Axes::default(),
                explicit: Axes::default(),
            },
            align: Align::Stretch,
            definite_main: true,
            base_size: base,
            hypothetical_size: base,
            grow,
            shrink,
            floor: 0.0,
            ceiling: None,
            target_size: base,
            frozen: false,
            outer_main: 0.0,
            outer_cross: 0.0,
            cross_size: 0.0,
        }
    }

    #[test]
    fn test_grow_proportional() {
        let mut items = vec![item(0.0, 1.0, 1.0), item(0.0, 2.0, 1.0)];
        resolve_flexible_lengths(&mut items, 90.0);
        assert!((items[0].target_size - 30.0).abs() < 0.01);
        assert!((items[1].target_size - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_shrink_weighted_by_basis() {
        let mut items = vec![item(100.0, 0.0, 1.0), item(200.0, 0.0, 1.0)];
        resolve_flexible_lengths(&mut items, 240.0);
        assert!((items[0].target_size - 80.0).abs() < 0.01);
        assert!((items[1].target_size - 160.0).abs() < 0.01);
    }

    #[test]
    fn test_max_violation_refreezes() {
        let mut capped = item(0.0, 1.0, 1.0);
        capped.ceiling = Some(20.0);
        let mut items = vec![capped, item(0.0, 1.0, 1.0)];
        resolve_flexible_lengths(&mut items, 100.0);
        assert!((items[0].target_size - 20.0).abs() < 0.01);
        assert!((items[1].target_size - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_min_violation_refreezes() {
        let mut floored = item(100.0, 0.0, 1.0);
        floored.floor = 90.0;
        let mut items = vec![floored, item(100.0, 0.0, 1.0)];
        resolve_flexible_lengths(&mut items, 150.0);
        assert!((items[0].target_size - 90.0).abs() < 0.01);
        assert!((items[1].target_size - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_greedy_lines() {
        let items = vec![item(40.0, 0.0, 1.0), item(40.0, 0.0, 1.0), item(40.0, 0.0, 1.0)];
        let lines = collect_lines(&items, Some(90.0), 8.0);
        assert_eq!(lines, vec![0..2, 2..3]);
        assert_eq!(collect_lines(&items, None, 8.0), vec![0..3]);
    }

    #[test]
    fn test_justify_offsets() {
        assert_eq!(compute_justify_offsets(Justify::End, 30.0, 3), (30.0, 0.0));
        assert_eq!(compute_justify_offsets(Justify::Center, 30.0, 3), (15.0, 0.0));
        assert_eq!(compute_justify_offsets(Justify::SpaceBetween, 30.0, 3), (0.0, 15.0));
        assert_eq!(compute_justify_offsets(Justify::SpaceAround, 30.0, 3), (5.0, 10.0));
        assert_eq!(compute_justify_offsets(Justify::SpaceEvenly, 40.0, 3), (10.0, 10.0));
        assert_eq!(compute_justify_offsets(Justify::Center, -10.0, 3), (0.0, 0.0));
    }
}
