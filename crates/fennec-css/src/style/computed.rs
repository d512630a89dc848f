//! Computed style for one element.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! "The computed value is the result of resolving the specified value as
//! defined in the 'Computed Value' line of the property definition table."
//!
//! Percentages are kept as percentages here: they are resolved during
//! layout, once the size they refer to is known.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::property::{Declaration, FontSize, Longhand, Property};
use super::values::{
    Align, AlignContent, Color, Corners, Dimension, Direction, Edges, Justify, Length, Overflow,
    Paint,
};

/// Initial font size in px when no ancestor sets one.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Initial font weight ("normal").
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// The resolved style of one element.
///
/// Every node of a styled tree owns exactly one of these. All fields have
/// the documented initial values when no rule sets them (see
/// [`ComputedStyle::default`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    /// [§ 5.1 flex-direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    pub direction: Direction,
    /// [§ 5.2 flex-wrap](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
    pub wrap: bool,
    /// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
    pub justify: Justify,
    /// [§ 8.3 align-items](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
    pub align: Align,
    /// [§ 8.3 align-self](https://www.w3.org/TR/css-flexbox-1/#align-items-property).
    /// `None` is `auto`: use the container's `align`.
    pub align_self: Option<Align>,
    /// [§ 8.4 align-content](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
    pub align_content: AlignContent,
    /// [CSS Box Alignment § 8.1 gap](https://www.w3.org/TR/css-align-3/#gap-shorthand), in px.
    pub gap: f32,
    /// [§ 6.3 Padding](https://www.w3.org/TR/css-box-4/#paddings)
    pub padding: Edges<Length>,
    /// [§ 6.2 Margins](https://www.w3.org/TR/css-box-4/#margins)
    pub margin: Edges<Length>,
    /// Preferred border-box width.
    pub width: Dimension,
    /// Preferred border-box height.
    pub height: Dimension,
    /// Minimum border-box width.
    pub min_width: Length,
    /// Minimum border-box height.
    pub min_height: Length,
    /// Maximum border-box width; `None` is no limit.
    pub max_width: Option<Length>,
    /// Maximum border-box height; `None` is no limit.
    pub max_height: Option<Length>,
    /// [§ 7.3.3 flex-basis](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
    pub flex_basis: Dimension,
    /// [§ 7.3.1 flex-grow](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
    pub flex_grow: f32,
    /// [§ 7.3.2 flex-shrink](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property)
    pub flex_shrink: f32,
    /// Corner radii in px.
    pub border_radius: Corners<f32>,
    /// Border thickness in px, the same on every side.
    pub border_width: f32,
    /// Border color; `None` is `currentColor`.
    pub border_color: Option<Color>,
    /// Background paint, if any.
    pub background: Option<Paint>,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    /// Whether descendant paint is clipped.
    pub overflow: Overflow,
    /// Foreground color (inherited).
    pub color: Color,
    /// Font size in px (inherited).
    pub font_size: f32,
    /// Font weight, 1-1000 (inherited).
    pub font_weight: u16,
    /// Font family (inherited); `None` is the host default.
    pub font_family: Option<String>,
    /// Properties outside the vocabulary, kept verbatim for the renderer.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            direction: Direction::Row,
            wrap: false,
            justify: Justify::Start,
            align: Align::Stretch,
            align_self: None,
            align_content: AlignContent::Start,
            gap: 0.0,
            padding: Edges::default(),
            margin: Edges::default(),
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Length::ZERO,
            min_height: Length::ZERO,
            max_width: None,
            max_height: None,
            flex_basis: Dimension::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            border_radius: Corners::default(),
            border_width: 0.0,
            border_color: None,
            background: None,
            opacity: 1.0,
            overflow: Overflow::Visible,
            color: Color::BLACK,
            font_size: DEFAULT_FONT_SIZE_PX,
            font_weight: DEFAULT_FONT_WEIGHT,
            font_family: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ComputedStyle {
    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// A fresh style whose inherited properties come from `parent` and whose
    /// other properties hold their initial values.
    #[must_use]
    pub fn inheriting_from(parent: &Self) -> Self {
        Self {
            color: parent.color,
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_family: parent.font_family.clone(),
            ..Self::default()
        }
    }

    /// The color the border is painted with.
    #[must_use]
    pub fn used_border_color(&self) -> Color {
        self.border_color.unwrap_or(self.color)
    }

    /// Apply one declaration on top of the current values.
    ///
    /// `parent` is the parent element's computed style (or the initial
    /// style at the root); it resolves `inherit` and relative font sizes.
    pub fn apply_declaration(&mut self, declaration: &Declaration, parent: &Self) {
        match declaration {
            Declaration::Value(longhand) => self.apply_longhand(longhand, parent),
            Declaration::Inherit(property) => self.copy_property(parent, *property),
            Declaration::Initial(property) => self.copy_property(&Self::default(), *property),
        }
    }

    fn apply_longhand(&mut self, longhand: &Longhand, parent: &Self) {
        match longhand {
            Longhand::Width(v) => self.width = *v,
            Longhand::Height(v) => self.height = *v,
            Longhand::MinWidth(v) => self.min_width = *v,
            Longhand::MinHeight(v) => self.min_height = *v,
            Longhand::MaxWidth(v) => self.max_width = *v,
            Longhand::MaxHeight(v) => self.max_height = *v,
            Longhand::FlexBasis(v) => self.flex_basis = *v,
            Longhand::Background(v) => self.background.clone_from(v),
            Longhand::Padding(edge, v) => self.padding.set(*edge, *v),
            Longhand::Margin(edge, v) => self.margin.set(*edge, *v),
            Longhand::Direction(v) => self.direction = *v,
            Longhand::Wrap(v) => self.wrap = *v,
            Longhand::Justify(v) => self.justify = *v,
            Longhand::Align(v) => self.align = *v,
            Longhand::AlignSelf(v) => self.align_self = *v,
            Longhand::AlignContent(v) => self.align_content = *v,
            Longhand::Gap(v) => self.gap = *v,
            Longhand::FlexGrow(v) => self.flex_grow = *v,
            Longhand::FlexShrink(v) => self.flex_shrink = *v,
            Longhand::BorderWidth(v) => self.border_width = *v,
            Longhand::BorderColor(v) => self.border_color = *v,
            Longhand::BorderRadius(corner, v) => self.border_radius.set(*corner, *v),
            Longhand::Opacity(v) => self.opacity = *v,
            Longhand::Overflow(v) => self.overflow = *v,
            Longhand::Color(v) => self.color = *v,
            // [CSS Fonts 4 § 2.5](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
            // "Percentages: refer to parent element's font size"
            Longhand::FontSize(FontSize::Px(px)) => self.font_size = *px,
            Longhand::FontSize(FontSize::Relative(scale)) => {
                self.font_size = parent.font_size * scale;
            }
            Longhand::FontWeight(v) => self.font_weight = *v,
            Longhand::FontFamily(v) => self.font_family = Some(v.clone()),
            Longhand::Extra(name, value) => {
                let _ = self.extra.insert(name.clone(), value.clone());
            }
        }
    }

    /// Copy a single property's computed value from `source`.
    fn copy_property(&mut self, source: &Self, property: Property) {
        match property {
            Property::Width => self.width = source.width,
            Property::Height => self.height = source.height,
            Property::MinWidth => self.min_width = source.min_width,
            Property::MinHeight => self.min_height = source.min_height,
            Property::MaxWidth => self.max_width = source.max_width,
            Property::MaxHeight => self.max_height = source.max_height,
            Property::FlexBasis => self.flex_basis = source.flex_basis,
            Property::Background => self.background.clone_from(&source.background),
            Property::PaddingTop => self.padding.top = source.padding.top,
            Property::PaddingRight => self.padding.right = source.padding.right,
            Property::PaddingBottom => self.padding.bottom = source.padding.bottom,
            Property::PaddingLeft => self.padding.left = source.padding.left,
            Property::MarginTop => self.margin.top = source.margin.top,
            Property::MarginRight => self.margin.right = source.margin.right,
            Property::MarginBottom => self.margin.bottom = source.margin.bottom,
            Property::MarginLeft => self.margin.left = source.margin.left,
            Property::Direction => self.direction = source.direction,
            Property::Wrap => self.wrap = source.wrap,
            Property::Justify => self.justify = source.justify,
            Property::Align => self.align = source.align,
            Property::AlignSelf => self.align_self = source.align_self,
            Property::AlignContent => self.align_content = source.align_content,
            Property::Gap => self.gap = source.gap,
            Property::FlexGrow => self.flex_grow = source.flex_grow,
            Property::FlexShrink => self.flex_shrink = source.flex_shrink,
            Property::BorderWidth => self.border_width = source.border_width,
            Property::BorderColor => self.border_color = source.border_color,
            Property::BorderTopLeftRadius => {
                self.border_radius.top_left = source.border_radius.top_left;
            }
            Property::BorderTopRightRadius => {
                self.border_radius.top_right = source.border_radius.top_right;
            }
            Property::BorderBottomRightRadius => {
                self.border_radius.bottom_right = source.border_radius.bottom_right;
            }
            Property::BorderBottomLeftRadius => {
                self.border_radius.bottom_left = source.border_radius.bottom_left;
            }
            Property::Opacity => self.opacity = source.opacity,
            Property::Overflow => self.overflow = source.overflow,
            Property::Color => self.color = source.color,
            Property::FontSize => self.font_size = source.font_size,
            Property::FontWeight => self.font_weight = source.font_weight,
            Property::FontFamily => self.font_family.clone_from(&source.font_family),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::property::parse_declaration;
    use serde_json::json;

    fn apply(style: &mut ComputedStyle, parent: &ComputedStyle, name: &str, value: &Value) {
        for decl in parse_declaration(name, value).unwrap() {
            style.apply_declaration(&decl, parent);
        }
    }

    #[test]
    fn test_defaults() {
        let style = ComputedStyle::default();
        assert_eq!(style.direction, Direction::Row);
        assert_eq!(style.align, Align::Stretch);
        assert!((style.flex_shrink - 1.0).abs() < f32::EPSILON);
        assert!((style.font_size - 16.0).abs() < f32::EPSILON);
        assert_eq!(style.used_border_color(), Color::BLACK);
    }

    #[test]
    fn test_inheriting_copies_only_text_properties() {
        let mut parent = ComputedStyle::default();
        parent.color = Color::WHITE;
        parent.font_size = 20.0;
        parent.gap = 12.0;
        let child = ComputedStyle::inheriting_from(&parent);
        assert_eq!(child.color, Color::WHITE);
        assert!((child.font_size - 20.0).abs() < f32::EPSILON);
        assert!(child.gap.abs() < f32::EPSILON);
    }

    #[test]
    fn test_relative_font_size_uses_parent() {
        let mut parent = ComputedStyle::default();
        parent.font_size = 20.0;
        let mut child = ComputedStyle::inheriting_from(&parent);
        apply(&mut child, &parent, "fontSize", &json!("150%"));
        apply(&mut child, &parent, "fontSize", &json!("150%"));
        assert!((child.font_size - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_inherit_and_initial_keywords() {
        let mut parent = ComputedStyle::default();
        parent.gap = 7.0;
        let mut child = ComputedStyle::inheriting_from(&parent);
        apply(&mut child, &parent, "gap", &json!("inherit"));
        assert!((child.gap - 7.0).abs() < f32::EPSILON);

        apply(&mut child, &parent, "color", &json!("red"));
        apply(&mut child, &parent, "color", &json!("initial"));
        assert_eq!(child.color, Color::BLACK);
    }

    #[test]
    fn test_border_color_follows_current_color() {
        let parent = ComputedStyle::default();
        let mut style = ComputedStyle::default();
        apply(&mut style, &parent, "color", &json!("#00f"));
        assert_eq!(style.used_border_color(), Color::rgb(0, 0, 255));
        apply(&mut style, &parent, "borderColor", &json!("red"));
        assert_eq!(style.used_border_color(), Color::rgb(255, 0, 0));
    }
}
