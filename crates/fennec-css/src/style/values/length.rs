//! Lengths, percentages, and per-edge / per-corner groups.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Numbers in a declaration map are pixels. Strings may carry a `px` or `%`
//! suffix. Percentages stay unresolved until layout knows the base they are
//! relative to.

use serde::Serialize;
use serde_json::Value;

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
/// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
///
/// A length or a percentage of some base decided by the property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    /// Absolute pixels.
    Px(f32),
    /// Percentage (50.0 means 50%).
    Percent(f32),
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::Px(0.0);

    /// Resolve against `base`.
    ///
    /// Returns `None` when this is a percentage and the base is indefinite;
    /// the caller decides how to degrade.
    #[must_use]
    pub fn resolve(self, base: Option<f32>) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(pct) => base.map(|b| b * pct / 100.0),
        }
    }

    /// Whether this value depends on a percentage base.
    #[must_use]
    pub const fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A preferred size: `auto` or a length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Sized by the layout algorithm (fill, stretch or content).
    #[default]
    Auto,
    /// An explicit size.
    Length(Length),
}

impl Dimension {
    /// The explicit length, if any.
    #[must_use]
    pub const fn length(self) -> Option<Length> {
        match self {
            Self::Auto => None,
            Self::Length(length) => Some(length),
        }
    }
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
}

impl Edge {
    /// All edges in CSS shorthand order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

/// A value per box side (padding, margin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Edges<T> {
    /// Top edge value.
    pub top: T,
    /// Right edge value.
    pub right: T,
    /// Bottom edge value.
    pub bottom: T,
    /// Left edge value.
    pub left: T,
}

impl<T: Copy> Edges<T> {
    /// The same value on every side.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// [§ 6.2 Margin shorthand](https://www.w3.org/TR/css-box-4/#margin-shorthand)
    ///
    /// "If there is only one component value, it applies to all sides. If
    /// there are two values, the top and bottom margins are set to the first
    /// value and the right and left margins are set to the second. If there
    /// are three values, the top is set to the first value, the left and
    /// right are set to the second, and the bottom is set to the third. If
    /// there are four values, they apply to the top, right, bottom, and left,
    /// respectively."
    #[must_use]
    pub fn from_shorthand(values: &[T]) -> Option<Self> {
        let (top, right, bottom, left) = match *values {
            [all] => (all, all, all, all),
            [vertical, horizontal] => (vertical, horizontal, vertical, horizontal),
            [top, horizontal, bottom] => (top, horizontal, bottom, horizontal),
            [top, right, bottom, left] => (top, right, bottom, left),
            _ => return None,
        };
        Some(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// The value on `edge`.
    #[must_use]
    pub fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Replace the value on `edge`.
    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Top => self.top = value,
            Edge::Right => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
        }
    }
}

/// One corner of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom-left corner.
    BottomLeft,
}

impl Corner {
    /// All corners in CSS shorthand order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];
}

/// A value per box corner (border radius).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Corners<T> {
    /// Top-left radius.
    pub top_left: T,
    /// Top-right radius.
    pub top_right: T,
    /// Bottom-right radius.
    pub bottom_right: T,
    /// Bottom-left radius.
    pub bottom_left: T,
}

impl<T: Copy> Corners<T> {
    /// The value on `corner`.
    #[must_use]
    pub fn get(&self, corner: Corner) -> T {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }

    /// Replace the value on `corner`.
    pub fn set(&mut self, corner: Corner, value: T) {
        match corner {
            Corner::TopLeft => self.top_left = value,
            Corner::TopRight => self.top_right = value,
            Corner::BottomRight => self.bottom_right = value,
            Corner::BottomLeft => self.bottom_left = value,
        }
    }
}

/// A JSON number, or a string holding a bare number.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn number(value: &Value) -> Option<f32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Parse `"12"`, `"12px"`, `"-4px"` or `"50%"`.
#[must_use]
pub fn parse_length(text: &str) -> Option<Length> {
    let text = text.trim();
    let length = if let Some(pct) = text.strip_suffix('%') {
        Length::Percent(pct.trim_end().parse().ok()?)
    } else {
        let px = text.strip_suffix("px").unwrap_or(text);
        Length::Px(px.trim_end().parse().ok()?)
    };
    match length {
        Length::Px(v) | Length::Percent(v) if v.is_finite() => Some(length),
        _ => None,
    }
}

/// A length from a JSON number (px) or string.
pub(crate) fn length_from_json(value: &Value) -> Result<Length, String> {
    match value {
        Value::Number(_) => number(value)
            .map(Length::Px)
            .ok_or_else(|| "number out of range".to_string()),
        Value::String(s) => {
            parse_length(s).ok_or_else(|| format!("expected a length, found '{s}'"))
        }
        _ => Err("expected a number or a length string".to_string()),
    }
}

/// A non-negative length from a JSON value.
pub(crate) fn non_negative_length(value: &Value) -> Result<Length, String> {
    match length_from_json(value)? {
        Length::Px(v) | Length::Percent(v) if v < 0.0 => {
            Err("negative values are not allowed".to_string())
        }
        length => Ok(length),
    }
}

/// `auto` or a non-negative length.
pub(crate) fn dimension_from_json(value: &Value) -> Result<Dimension, String> {
    if value.as_str().is_some_and(|s| s.trim().eq_ignore_ascii_case("auto")) {
        return Ok(Dimension::Auto);
    }
    non_negative_length(value).map(Dimension::Length)
}

/// A non-negative pixel amount; percentages are rejected.
pub(crate) fn px_from_json(value: &Value) -> Result<f32, String> {
    match non_negative_length(value)? {
        Length::Px(px) => Ok(px),
        Length::Percent(_) => Err("percentages are not supported here".to_string()),
    }
}
