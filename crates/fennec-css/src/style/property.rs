//! Property vocabulary and declaration parsing.
//!
//! Declarations arrive as `(name, JSON value)` pairs. Each one is parsed
//! once, when the stylesheet is compiled, into typed longhand
//! [`Declaration`]s: shorthands such as `padding` are expanded here, so the
//! cascade only ever merges longhands.
//!
//! Property names are camelCase (`paddingTop`); kebab-case (`padding-top`)
//! is accepted and normalized. Names outside the vocabulary are carried
//! through opaquely as [`Longhand::Extra`].

use std::borrow::Cow;

use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

use crate::error::StyleValueError;

use super::values::length::{
    dimension_from_json, length_from_json, non_negative_length, number, px_from_json,
};
use super::values::paint::parse_background;
use super::values::{
    Align, Color, Corner, Dimension, Edge, Edges, Length, Paint, parse_color,
};

/// Every longhand the cascade understands.
///
/// `Display` yields the canonical camelCase name; parsing also accepts the
/// CSS flexbox aliases (`flexDirection`, `justifyContent`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Property {
    /// Preferred border-box width.
    Width,
    /// Preferred border-box height.
    Height,
    /// Lower bound on the width.
    MinWidth,
    /// Lower bound on the height.
    MinHeight,
    /// Upper bound on the width.
    MaxWidth,
    /// Upper bound on the height.
    MaxHeight,
    /// Initial main size before grow/shrink.
    FlexBasis,
    /// Background color or gradient.
    #[strum(to_string = "background", serialize = "backgroundColor")]
    Background,
    /// Top padding.
    PaddingTop,
    /// Right padding.
    PaddingRight,
    /// Bottom padding.
    PaddingBottom,
    /// Left padding.
    PaddingLeft,
    /// Top margin.
    MarginTop,
    /// Right margin.
    MarginRight,
    /// Bottom margin.
    MarginBottom,
    /// Left margin.
    MarginLeft,
    /// Main axis orientation.
    #[strum(to_string = "direction", serialize = "flexDirection")]
    Direction,
    /// Whether items wrap onto multiple lines.
    #[strum(to_string = "wrap", serialize = "flexWrap")]
    Wrap,
    /// Main axis distribution.
    #[strum(to_string = "justify", serialize = "justifyContent")]
    Justify,
    /// Default cross axis alignment for items.
    #[strum(to_string = "align", serialize = "alignItems")]
    Align,
    /// Per-item cross axis alignment override.
    AlignSelf,
    /// Distribution of lines along the cross axis.
    AlignContent,
    /// Space between adjacent items and lines.
    Gap,
    /// Share of positive free space.
    FlexGrow,
    /// Weight for absorbing negative free space.
    FlexShrink,
    /// Border thickness on every side.
    BorderWidth,
    /// Border color.
    BorderColor,
    /// Top-left corner radius.
    BorderTopLeftRadius,
    /// Top-right corner radius.
    BorderTopRightRadius,
    /// Bottom-right corner radius.
    BorderBottomRightRadius,
    /// Bottom-left corner radius.
    BorderBottomLeftRadius,
    /// Opacity of the box and its contents.
    Opacity,
    /// Whether descendants are clipped.
    Overflow,
    /// Foreground color (inherited).
    Color,
    /// Font size (inherited).
    FontSize,
    /// Font weight (inherited).
    FontWeight,
    /// Font family (inherited).
    FontFamily,
}

impl Property {
    /// [§ 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
    ///
    /// Only text properties inherit; every layout property resets.
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        matches!(
            self,
            Self::Color | Self::FontSize | Self::FontWeight | Self::FontFamily
        )
    }

    const fn padding_edge(self) -> Option<Edge> {
        match self {
            Self::PaddingTop => Some(Edge::Top),
            Self::PaddingRight => Some(Edge::Right),
            Self::PaddingBottom => Some(Edge::Bottom),
            Self::PaddingLeft => Some(Edge::Left),
            _ => None,
        }
    }

    const fn margin_edge(self) -> Option<Edge> {
        match self {
            Self::MarginTop => Some(Edge::Top),
            Self::MarginRight => Some(Edge::Right),
            Self::MarginBottom => Some(Edge::Bottom),
            Self::MarginLeft => Some(Edge::Left),
            _ => None,
        }
    }

    const fn corner(self) -> Option<Corner> {
        match self {
            Self::BorderTopLeftRadius => Some(Corner::TopLeft),
            Self::BorderTopRightRadius => Some(Corner::TopRight),
            Self::BorderBottomRightRadius => Some(Corner::BottomRight),
            Self::BorderBottomLeftRadius => Some(Corner::BottomLeft),
            _ => None,
        }
    }

    const fn padding(edge: Edge) -> Self {
        match edge {
            Edge::Top => Self::PaddingTop,
            Edge::Right => Self::PaddingRight,
            Edge::Bottom => Self::PaddingBottom,
            Edge::Left => Self::PaddingLeft,
        }
    }

    const fn margin(edge: Edge) -> Self {
        match edge {
            Edge::Top => Self::MarginTop,
            Edge::Right => Self::MarginRight,
            Edge::Bottom => Self::MarginBottom,
            Edge::Left => Self::MarginLeft,
        }
    }

    const fn radius(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => Self::BorderTopLeftRadius,
            Corner::TopRight => Self::BorderTopRightRadius,
            Corner::BottomRight => Self::BorderBottomRightRadius,
            Corner::BottomLeft => Self::BorderBottomLeftRadius,
        }
    }
}

/// [§ 1.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
///
/// "Some properties are shorthand properties, meaning that they allow
/// authors to specify the values of several properties with a single
/// property."
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "camelCase")]
enum Shorthand {
    Padding,
    Margin,
    BorderRadius,
    Border,
}

impl Shorthand {
    fn longhands(self) -> Vec<Property> {
        match self {
            Self::Padding => Edge::ALL.into_iter().map(Property::padding).collect(),
            Self::Margin => Edge::ALL.into_iter().map(Property::margin).collect(),
            Self::BorderRadius => Corner::ALL.into_iter().map(Property::radius).collect(),
            Self::Border => vec![Property::BorderWidth, Property::BorderColor],
        }
    }
}

/// A specified font size. Relative sizes resolve against the parent's
/// computed font size during the cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Absolute pixels.
    Px(f32),
    /// Multiple of the parent font size (`150%` and `1.5em` are both 1.5).
    Relative(f32),
}

/// A typed value for one longhand.
#[derive(Debug, Clone, PartialEq)]
pub enum Longhand {
    /// `width`
    Width(Dimension),
    /// `height`
    Height(Dimension),
    /// `minWidth`; `auto` is stored as zero.
    MinWidth(Length),
    /// `minHeight`; `auto` is stored as zero.
    MinHeight(Length),
    /// `maxWidth`; `None` means no limit.
    MaxWidth(Option<Length>),
    /// `maxHeight`; `None` means no limit.
    MaxHeight(Option<Length>),
    /// `flexBasis`
    FlexBasis(Dimension),
    /// `background`; `None` means no background.
    Background(Option<Paint>),
    /// One padding edge.
    Padding(Edge, Length),
    /// One margin edge.
    Margin(Edge, Length),
    /// `direction`
    Direction(super::values::Direction),
    /// `wrap`
    Wrap(bool),
    /// `justify`
    Justify(super::values::Justify),
    /// `align`
    Align(Align),
    /// `alignSelf`; `None` defers to the container's `align`.
    AlignSelf(Option<Align>),
    /// `alignContent`
    AlignContent(super::values::AlignContent),
    /// `gap` in px.
    Gap(f32),
    /// `flexGrow`
    FlexGrow(f32),
    /// `flexShrink`
    FlexShrink(f32),
    /// `borderWidth` in px.
    BorderWidth(f32),
    /// `borderColor`; `None` means the element's current `color`.
    BorderColor(Option<Color>),
    /// One corner radius in px.
    BorderRadius(Corner, f32),
    /// `opacity`, clamped to 0.0-1.0.
    Opacity(f32),
    /// `overflow`
    Overflow(super::values::Overflow),
    /// `color`
    Color(Color),
    /// `fontSize`
    FontSize(FontSize),
    /// `fontWeight`, 1-1000.
    FontWeight(u16),
    /// `fontFamily`
    FontFamily(String),
    /// A property outside the vocabulary, kept verbatim for the renderer.
    Extra(String, Value),
}

/// One parsed declaration, ready for the cascade.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A specified value.
    Value(Longhand),
    /// [§ 7.3.3 inherit](https://www.w3.org/TR/css-cascade-4/#inherit)
    /// "The inherit keyword causes the property's specified value to be the
    /// computed value of the parent."
    Inherit(Property),
    /// [§ 7.3.1 initial](https://www.w3.org/TR/css-cascade-4/#initial)
    /// "The initial keyword represents the value defined as the property's
    /// initial value."
    Initial(Property),
}

/// `padding-top` → `paddingTop`; camelCase names pass through unchanged.
fn camel_case(name: &str) -> Cow<'_, str> {
    if !name.contains('-') {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.trim_start_matches('-').chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Parse one `(name, value)` pair into longhand declarations.
///
/// # Errors
///
/// Returns a [`StyleValueError`] when the value does not fit the property;
/// the caller drops the declaration and keeps the rest of the rule.
pub fn parse_declaration(name: &str, value: &Value) -> Result<Vec<Declaration>, StyleValueError> {
    let key = camel_case(name.trim());
    let keyword = value
        .as_str()
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| s == "inherit" || s == "initial");

    let longhands = if let Ok(shorthand) = key.parse::<Shorthand>() {
        shorthand.longhands()
    } else if let Ok(property) = key.parse::<Property>() {
        vec![property]
    } else {
        return Ok(vec![Declaration::Value(Longhand::Extra(
            name.to_string(),
            value.clone(),
        ))]);
    };

    if let Some(keyword) = keyword {
        return Ok(longhands
            .into_iter()
            .map(|p| {
                if keyword == "inherit" {
                    Declaration::Inherit(p)
                } else {
                    Declaration::Initial(p)
                }
            })
            .collect());
    }

    let parsed = match key.parse::<Shorthand>() {
        Ok(Shorthand::Padding) => parse_edges(value, non_negative_length)
            .map(|edges| map_edges(edges, Longhand::Padding)),
        Ok(Shorthand::Margin) => {
            parse_edges(value, length_from_json).map(|edges| map_edges(edges, Longhand::Margin))
        }
        Ok(Shorthand::BorderRadius) => parse_radii(value),
        Ok(Shorthand::Border) => parse_border(value),
        Err(_) => parse_longhand(longhands[0], value).map(|l| vec![l]),
    };
    parsed
        .map(|list| list.into_iter().map(Declaration::Value).collect())
        .map_err(|reason| StyleValueError::new(name, value, reason))
}

fn map_edges(edges: Vec<(Edge, Length)>, make: fn(Edge, Length) -> Longhand) -> Vec<Longhand> {
    edges.into_iter().map(|(edge, length)| make(edge, length)).collect()
}

/// Parse a single longhand value.
fn parse_longhand(property: Property, value: &Value) -> Result<Longhand, String> {
    if let Some(edge) = property.padding_edge() {
        return non_negative_length(value).map(|l| Longhand::Padding(edge, l));
    }
    if let Some(edge) = property.margin_edge() {
        return length_from_json(value).map(|l| Longhand::Margin(edge, l));
    }
    if let Some(corner) = property.corner() {
        return px_from_json(value).map(|r| Longhand::BorderRadius(corner, r));
    }
    let longhand = match property {
        Property::Width => Longhand::Width(dimension_from_json(value)?),
        Property::Height => Longhand::Height(dimension_from_json(value)?),
        Property::FlexBasis => Longhand::FlexBasis(dimension_from_json(value)?),
        Property::MinWidth => Longhand::MinWidth(min_size(value)?),
        Property::MinHeight => Longhand::MinHeight(min_size(value)?),
        Property::MaxWidth => Longhand::MaxWidth(max_size(value)?),
        Property::MaxHeight => Longhand::MaxHeight(max_size(value)?),
        Property::Background => Longhand::Background(parse_background(value)?),
        Property::Direction => Longhand::Direction(keyword(value)?),
        Property::Wrap => Longhand::Wrap(parse_wrap(value)?),
        Property::Justify => Longhand::Justify(keyword(value)?),
        Property::Align => Longhand::Align(keyword(value)?),
        Property::AlignSelf => {
            if is_keyword(value, "auto") {
                Longhand::AlignSelf(None)
            } else {
                Longhand::AlignSelf(Some(keyword(value)?))
            }
        }
        Property::AlignContent => Longhand::AlignContent(keyword(value)?),
        Property::Gap => Longhand::Gap(px_from_json(value)?),
        Property::FlexGrow => Longhand::FlexGrow(flex_factor(value)?),
        Property::FlexShrink => Longhand::FlexShrink(flex_factor(value)?),
        Property::BorderWidth => Longhand::BorderWidth(px_from_json(value)?),
        Property::BorderColor => Longhand::BorderColor(border_color(value)?),
        Property::Opacity => Longhand::Opacity(parse_opacity(value)?),
        Property::Overflow => Longhand::Overflow(keyword(value)?),
        Property::Color => Longhand::Color(color(value)?),
        Property::FontSize => Longhand::FontSize(parse_font_size(value)?),
        Property::FontWeight => Longhand::FontWeight(parse_font_weight(value)?),
        Property::FontFamily => Longhand::FontFamily(parse_font_family(value)?),
        // Edge and corner longhands were handled above.
        _ => return Err(format!("'{property}' cannot be set directly")),
    };
    Ok(longhand)
}

fn is_keyword(value: &Value, word: &str) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case(word))
}

fn keyword<T: std::str::FromStr>(value: &Value) -> Result<T, String> {
    let text = value.as_str().ok_or("expected a keyword string")?;
    text.trim()
        .parse()
        .map_err(|_| format!("unknown keyword '{text}'"))
}

/// `auto` for a minimum size means no minimum.
fn min_size(value: &Value) -> Result<Length, String> {
    if is_keyword(value, "auto") {
        return Ok(Length::ZERO);
    }
    non_negative_length(value)
}

/// `none` for a maximum size means no maximum.
fn max_size(value: &Value) -> Result<Option<Length>, String> {
    if is_keyword(value, "none") {
        return Ok(None);
    }
    non_negative_length(value).map(Some)
}

fn flex_factor(value: &Value) -> Result<f32, String> {
    match number(value) {
        Some(n) if n < 0.0 => Err("negative values are not allowed".to_string()),
        Some(n) => Ok(n),
        None => Err("expected a number".to_string()),
    }
}

/// [§ 5.2 flex-wrap](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
fn parse_wrap(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(wrap) => Ok(*wrap),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "wrap" | "true" => Ok(true),
            "nowrap" | "no-wrap" | "false" => Ok(false),
            other => Err(format!("unknown keyword '{other}'")),
        },
        _ => Err("expected a boolean or 'wrap' / 'nowrap'".to_string()),
    }
}

fn color(value: &Value) -> Result<Color, String> {
    let text = value.as_str().ok_or("expected a color string")?;
    parse_color(text).ok_or_else(|| format!("unknown color '{text}'"))
}

/// `currentColor` defers to the element's `color`.
fn border_color(value: &Value) -> Result<Option<Color>, String> {
    if is_keyword(value, "currentColor") {
        return Ok(None);
    }
    color(value).map(Some)
}

/// [CSS Color 4 § 11.2 opacity](https://www.w3.org/TR/css-color-4/#transparency)
///
/// "Any values outside the range 0 to 1 (inclusive) are clamped to this
/// range."
fn parse_opacity(value: &Value) -> Result<f32, String> {
    let opacity = match value {
        Value::String(s) if s.trim().ends_with('%') => match length_from_json(value)? {
            Length::Percent(pct) => pct / 100.0,
            Length::Px(px) => px,
        },
        _ => number(value).ok_or("expected a number")?,
    };
    Ok(opacity.clamp(0.0, 1.0))
}

/// A pixel size, a percentage, or an `em` multiple of the parent size.
fn parse_font_size(value: &Value) -> Result<FontSize, String> {
    let size = match value {
        Value::String(s) if s.trim().ends_with("em") => {
            let em = s.trim().trim_end_matches("em").trim();
            em.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FontSize::Relative)
                .ok_or_else(|| format!("invalid font size '{s}'"))?
        }
        _ => match non_negative_length(value)? {
            Length::Px(px) => FontSize::Px(px),
            Length::Percent(pct) => FontSize::Relative(pct / 100.0),
        },
    };
    match size {
        FontSize::Relative(v) if v < 0.0 => Err("negative values are not allowed".to_string()),
        size => Ok(size),
    }
}

/// [CSS Fonts 4 § 2.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// "normal: Same as 400. bold: Same as 700." Numeric weights must lie in
/// 1-1000.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_font_weight(value: &Value) -> Result<u16, String> {
    if is_keyword(value, "normal") {
        return Ok(400);
    }
    if is_keyword(value, "bold") {
        return Ok(700);
    }
    match number(value) {
        Some(w) if (1.0..=1000.0).contains(&w) => Ok(w.round() as u16),
        Some(_) => Err("font weight must be between 1 and 1000".to_string()),
        None => Err("expected a number, 'normal' or 'bold'".to_string()),
    }
}

/// A family name, or a fallback list given as an array.
fn parse_font_family(value: &Value) -> Result<String, String> {
    let family = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(names) => names
            .iter()
            .map(|n| n.as_str().map(str::trim).ok_or("font family names must be strings"))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "),
        _ => return Err("expected a font family name".to_string()),
    };
    if family.is_empty() {
        return Err("empty font family".to_string());
    }
    Ok(family)
}

/// Edge shorthand: a number, a CSS 1-4 value string (`"4px 8px"`), or an
/// object `{all, top, right, bottom, left}`. In the object form `all`
/// applies first and named edges override it; unnamed edges are not set.
fn parse_edges(
    value: &Value,
    parse_one: fn(&Value) -> Result<Length, String>,
) -> Result<Vec<(Edge, Length)>, String> {
    match value {
        Value::Number(_) => {
            let length = parse_one(value)?;
            Ok(Edge::ALL.into_iter().map(|edge| (edge, length)).collect())
        }
        Value::String(text) => {
            let values = text
                .split_whitespace()
                .map(|part| parse_one(&Value::String(part.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            let edges = Edges::from_shorthand(&values)
                .ok_or_else(|| format!("expected 1 to 4 values, found {}", values.len()))?;
            Ok(Edge::ALL.into_iter().map(|edge| (edge, edges.get(edge))).collect())
        }
        Value::Object(map) => {
            let mut edges = Vec::new();
            if let Some(all) = map.get("all") {
                let length = parse_one(all)?;
                edges.extend(Edge::ALL.into_iter().map(|edge| (edge, length)));
            }
            for (key, edge) in [
                ("top", Edge::Top),
                ("right", Edge::Right),
                ("bottom", Edge::Bottom),
                ("left", Edge::Left),
            ] {
                if let Some(v) = map.get(key) {
                    edges.push((edge, parse_one(v)?));
                }
            }
            reject_unknown_keys(map, &["all", "top", "right", "bottom", "left"])?;
            Ok(edges)
        }
        _ => Err("expected a number, a string, or an edge object".to_string()),
    }
}

/// `borderRadius`: a number, a CSS 1-4 value string, or an object
/// `{all, topLeft, topRight, bottomRight, bottomLeft}`.
fn parse_radii(value: &Value) -> Result<Vec<Longhand>, String> {
    let per_corner: Vec<(Corner, f32)> = match value {
        Value::Number(_) => {
            let r = px_from_json(value)?;
            Corner::ALL.into_iter().map(|c| (c, r)).collect()
        }
        Value::String(text) => {
            let values = text
                .split_whitespace()
                .map(|part| px_from_json(&Value::String(part.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            // Same 1-4 value expansion as edges, read clockwise from top-left.
            let radii = Edges::from_shorthand(&values)
                .ok_or_else(|| format!("expected 1 to 4 values, found {}", values.len()))?;
            Corner::ALL
                .into_iter()
                .zip(Edge::ALL)
                .map(|(corner, edge)| (corner, radii.get(edge)))
                .collect()
        }
        Value::Object(map) => {
            let mut radii = Vec::new();
            if let Some(all) = map.get("all") {
                let r = px_from_json(all)?;
                radii.extend(Corner::ALL.into_iter().map(|c| (c, r)));
            }
            for (key, corner) in [
                ("topLeft", Corner::TopLeft),
                ("topRight", Corner::TopRight),
                ("bottomRight", Corner::BottomRight),
                ("bottomLeft", Corner::BottomLeft),
            ] {
                if let Some(v) = map.get(key) {
                    radii.push((corner, px_from_json(v)?));
                }
            }
            reject_unknown_keys(
                map,
                &["all", "topLeft", "topRight", "bottomRight", "bottomLeft"],
            )?;
            radii
        }
        _ => return Err("expected a number, a string, or a corner object".to_string()),
    };
    Ok(per_corner
        .into_iter()
        .map(|(corner, r)| Longhand::BorderRadius(corner, r))
        .collect())
}

/// `border`: a width, a color, or both in one string (`"1px solid #ccc"`).
/// Line style keywords are accepted and ignored; `none` sets the width
/// to zero.
fn parse_border(value: &Value) -> Result<Vec<Longhand>, String> {
    if let Value::Number(_) = value {
        return px_from_json(value).map(|w| vec![Longhand::BorderWidth(w)]);
    }
    let text = value.as_str().ok_or("expected a number or a border string")?;
    let mut longhands = Vec::new();
    for token in split_outside_parens(text) {
        let lower = token.to_ascii_lowercase();
        if lower == "none" {
            longhands.push(Longhand::BorderWidth(0.0));
        } else if matches!(lower.as_str(), "solid" | "dashed" | "dotted" | "double") {
            continue;
        } else if let Ok(width) = px_from_json(&Value::String(token.to_string())) {
            longhands.push(Longhand::BorderWidth(width));
        } else if lower == "currentcolor" {
            longhands.push(Longhand::BorderColor(None));
        } else if let Some(color) = parse_color(token) {
            longhands.push(Longhand::BorderColor(Some(color)));
        } else {
            return Err(format!("unrecognized border component '{token}'"));
        }
    }
    if longhands.is_empty() {
        return Err("empty border".to_string());
    }
    Ok(longhands)
}

/// Whitespace-separated tokens, keeping `rgb(1, 2, 3)` together.
fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

fn reject_unknown_keys(map: &Map<String, Value>, allowed: &[&str]) -> Result<(), String> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(format!("unknown key '{key}'")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::values::{Justify, Overflow};
    use serde_json::json;

    fn values(name: &str, value: Value) -> Vec<Longhand> {
        parse_declaration(name, &value)
            .unwrap()
            .into_iter()
            .map(|d| match d {
                Declaration::Value(l) => l,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_kebab_and_camel_names_agree() {
        assert_eq!(camel_case("padding-top"), "paddingTop");
        assert_eq!(camel_case("paddingTop"), "paddingTop");
        assert_eq!(
            values("justify-content", json!("space-between")),
            vec![Longhand::Justify(Justify::SpaceBetween)]
        );
    }

    #[test]
    fn test_padding_string_shorthand() {
        let longhands = values("padding", json!("4px 8px"));
        assert_eq!(
            longhands,
            vec![
                Longhand::Padding(Edge::Top, Length::Px(4.0)),
                Longhand::Padding(Edge::Right, Length::Px(8.0)),
                Longhand::Padding(Edge::Bottom, Length::Px(4.0)),
                Longhand::Padding(Edge::Left, Length::Px(8.0)),
            ]
        );
    }

    #[test]
    fn test_edge_object_sets_only_named_edges() {
        let longhands = values("margin", json!({"left": 5}));
        assert_eq!(longhands, vec![Longhand::Margin(Edge::Left, Length::Px(5.0))]);
        assert!(parse_declaration("margin", &json!({"middle": 5})).is_err());
    }

    #[test]
    fn test_css_wide_keywords_expand_shorthands() {
        let decls = parse_declaration("padding", &json!("inherit")).unwrap();
        assert_eq!(decls.len(), 4);
        assert!(decls.iter().all(|d| matches!(d, Declaration::Inherit(_))));
        assert_eq!(
            parse_declaration("overflow", &json!("initial")).unwrap(),
            vec![Declaration::Initial(Property::Overflow)]
        );
    }

    #[test]
    fn test_border_shorthand() {
        assert_eq!(
            values("border", json!("2px solid rgb(0, 0, 255)")),
            vec![
                Longhand::BorderWidth(2.0),
                Longhand::BorderColor(Some(Color::rgb(0, 0, 255))),
            ]
        );
        assert_eq!(
            values("border", json!("red")),
            vec![Longhand::BorderColor(Some(Color::rgb(255, 0, 0)))]
        );
    }

    #[test]
    fn test_unknown_property_is_extra() {
        let shadow = json!({"x": 0, "y": 2, "blur": 4, "color": "#0004"});
        assert_eq!(
            values("boxShadow", shadow.clone()),
            vec![Longhand::Extra("boxShadow".to_string(), shadow)]
        );
    }

    #[test]
    fn test_rejected_values() {
        assert!(parse_declaration("flexShrink", &json!(-1)).is_err());
        assert!(parse_declaration("width", &json!("wide")).is_err());
        assert!(parse_declaration("padding", &json!("1 2 3 4 5")).is_err());
        assert!(parse_declaration("overflow", &json!("sideways")).is_err());
        assert!(parse_declaration("fontWeight", &json!(0)).is_err());
    }

    #[test]
    fn test_misc_longhands() {
        assert_eq!(values("opacity", json!(1.5)), vec![Longhand::Opacity(1.0)]);
        assert_eq!(values("opacity", json!("50%")), vec![Longhand::Opacity(0.5)]);
        assert_eq!(values("fontWeight", json!("bold")), vec![Longhand::FontWeight(700)]);
        assert_eq!(
            values("fontSize", json!("1.5em")),
            vec![Longhand::FontSize(FontSize::Relative(1.5))]
        );
        assert_eq!(values("wrap", json!(true)), vec![Longhand::Wrap(true)]);
        assert_eq!(values("alignSelf", json!("auto")), vec![Longhand::AlignSelf(None)]);
        assert_eq!(values("maxWidth", json!("none")), vec![Longhand::MaxWidth(None)]);
        assert_eq!(values("overflow", json!("hidden")), vec![Longhand::Overflow(Overflow::Hidden)]);
    }
}
