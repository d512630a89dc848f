//! Background paint: solid colors and linear gradients.
//!
//! [CSS Images Level 3 § 3.1 Linear Gradients](https://www.w3.org/TR/css-images-3/#linear-gradients)
//!
//! The layout core never rasterizes a gradient; it only stores the angle
//! and normalized stops for the renderer.

use serde::Serialize;
use serde_json::Value;

use super::color::{Color, parse_color};
use super::length::number;

/// What fills a box's background.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Paint {
    /// A single color.
    Solid {
        /// The fill color.
        color: Color,
    },
    /// A linear gradient.
    LinearGradient(LinearGradient),
}

/// [§ 3.1 linear-gradient()](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    /// "The gradient line's angle of direction", in degrees. 0 points up,
    /// 90 to the right.
    pub angle: f32,
    /// At least two stops with offsets in 0.0-1.0, non-decreasing.
    pub stops: Vec<ColorStop>,
}

/// A color at a position along the gradient line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    /// The stop color.
    pub color: Color,
    /// Position along the gradient line, 0.0-1.0.
    pub offset: f32,
}

/// "If the argument is omitted, it defaults to `to bottom`."
const DEFAULT_ANGLE: f32 = 180.0;

/// Parse a `background` value.
///
/// Accepts a color string, a `linear-gradient(...)` string, `"none"`, or an
/// object `{ "angle": n, "stops": [color | {color, offset}] }`. Returns
/// `Ok(None)` for `"none"`.
pub(crate) fn parse_background(value: &Value) -> Result<Option<Paint>, String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("none") {
                return Ok(None);
            }
            if let Some(args) = strip_function(text, "linear-gradient") {
                return parse_gradient_function(args).map(|g| Some(Paint::LinearGradient(g)));
            }
            parse_color(text)
                .map(|color| Some(Paint::Solid { color }))
                .ok_or_else(|| format!("unknown color '{text}'"))
        }
        Value::Object(map) => {
            let angle = match map.get("angle") {
                Some(angle) => number(angle).ok_or("gradient angle must be a number")?,
                None => DEFAULT_ANGLE,
            };
            let Some(Value::Array(raw_stops)) = map.get("stops") else {
                return Err("gradient object needs a 'stops' array".to_string());
            };
            let stops = raw_stops
                .iter()
                .map(parse_stop_object)
                .collect::<Result<Vec<_>, _>>()?;
            build_gradient(angle, stops).map(|g| Some(Paint::LinearGradient(g)))
        }
        _ => Err("expected a color, a gradient, or a gradient object".to_string()),
    }
}

/// `name(args)` → `args`, with an ASCII case-insensitive name.
fn strip_function<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let (head, rest) = text.split_once('(')?;
    if !head.trim().eq_ignore_ascii_case(name) {
        return None;
    }
    rest.strip_suffix(')')
}

/// Split on commas that are not nested inside parentheses, so that
/// `rgb(0, 0, 0) 50%` stays one argument.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

/// [§ 3.1.1 linear-gradient() syntax](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
///
/// "linear-gradient() = linear-gradient(
///   [ <angle> | to <side-or-corner> ]? ,
///   <color-stop-list>
/// )"
fn parse_gradient_function(args: &str) -> Result<LinearGradient, String> {
    let parts = split_top_level(args);
    let (angle, stop_parts) = match parts.split_first() {
        Some((first, rest)) => match parse_direction(first) {
            Some(angle) => (angle, rest),
            None => (DEFAULT_ANGLE, parts.as_slice()),
        },
        None => return Err("empty gradient".to_string()),
    };
    let stops = stop_parts
        .iter()
        .map(|part| parse_stop_text(part))
        .collect::<Result<Vec<_>, _>>()?;
    build_gradient(angle, stops)
}

/// An `<angle>` (`deg`, `turn`, `rad`) or `to <side-or-corner>`.
fn parse_direction(text: &str) -> Option<f32> {
    let text = text.trim().to_ascii_lowercase();
    if let Some(sides) = text.strip_prefix("to ") {
        // "If the argument instead specifies a corner of the box ... the
        // gradient line must be angled" toward that corner; for a box of
        // unknown aspect ratio the corner directions are the diagonals.
        let mut words: Vec<&str> = sides.split_whitespace().collect();
        words.sort_unstable();
        return match words.as_slice() {
            ["top"] => Some(0.0),
            ["right"] => Some(90.0),
            ["bottom"] => Some(180.0),
            ["left"] => Some(270.0),
            ["right", "top"] => Some(45.0),
            ["bottom", "right"] => Some(135.0),
            ["bottom", "left"] => Some(225.0),
            ["left", "top"] => Some(315.0),
            _ => None,
        };
    }
    if let Some(deg) = text.strip_suffix("deg") {
        return deg.trim().parse().ok();
    }
    if let Some(turn) = text.strip_suffix("turn") {
        return turn.trim().parse::<f32>().ok().map(|t| t * 360.0);
    }
    if let Some(rad) = text.strip_suffix("rad") {
        return rad.trim().parse::<f32>().ok().map(f32::to_degrees);
    }
    None
}

/// `<color> [<percentage>]?`
fn parse_stop_text(text: &str) -> Result<(Color, Option<f32>), String> {
    let positioned = text
        .rsplit_once(char::is_whitespace)
        .and_then(|(color, position)| Some((color, position.strip_suffix('%')?)));
    if let Some((color, pct)) = positioned {
        let offset = pct
            .parse::<f32>()
            .map_err(|_| format!("invalid stop position '{pct}%'"))?;
        let color = parse_color(color).ok_or_else(|| format!("unknown color '{}'", color.trim()))?;
        return Ok((color, Some(offset / 100.0)));
    }
    parse_color(text)
        .map(|color| (color, None))
        .ok_or_else(|| format!("unknown color '{text}'"))
}

/// A stop in the object form: a color string, or `{color, offset}` where a
/// numeric offset is a fraction (0.0-1.0) and a string offset may be a
/// percentage.
fn parse_stop_object(value: &Value) -> Result<(Color, Option<f32>), String> {
    match value {
        Value::String(text) => parse_stop_text(text),
        Value::Object(map) => {
            let color = map
                .get("color")
                .and_then(Value::as_str)
                .ok_or("gradient stop needs a 'color' string")?;
            let color = parse_color(color).ok_or_else(|| format!("unknown color '{color}'"))?;
            let offset = match map.get("offset") {
                None => None,
                Some(Value::String(text)) => {
                    let text = text.trim();
                    let (digits, scale) = text
                        .strip_suffix('%')
                        .map_or((text, 1.0), |pct| (pct, 0.01));
                    let offset = digits
                        .parse::<f32>()
                        .map_err(|_| format!("invalid stop offset '{text}'"))?;
                    Some(offset * scale)
                }
                Some(other) => Some(number(other).ok_or("stop offset must be a number")?),
            };
            Ok((color, offset))
        }
        _ => Err("gradient stop must be a color or an object".to_string()),
    }
}

/// [§ 3.4.3 Color Stop "Fixup"](https://www.w3.org/TR/css-images-3/#color-stop-fixup)
///
/// 1. "If the first color stop does not have a position, set its position
///    to 0%. If the last color stop does not have a position, set its
///    position to 100%."
/// 2. "If a color stop ... has a position that is less than the specified
///    position of any color stop before it in the list, set its position to
///    be equal to the largest specified position of any color stop before it."
/// 3. "If any color stop still does not have a position, then, for each run
///    of adjacent color stops without positions, set their positions so that
///    they are evenly spaced between the preceding and following color stops
///    with positions."
fn build_gradient(angle: f32, stops: Vec<(Color, Option<f32>)>) -> Result<LinearGradient, String> {
    if stops.len() < 2 {
        return Err("a gradient needs at least two color stops".to_string());
    }
    if stops
        .iter()
        .any(|(_, offset)| offset.is_some_and(|offset| !offset.is_finite()))
    {
        return Err("color stop positions must be finite".to_string());
    }
    let last = stops.len() - 1;
    let mut offsets: Vec<Option<f32>> = stops.iter().map(|(_, offset)| *offset).collect();

    // STEP 1
    let _ = offsets[0].get_or_insert(0.0);
    let _ = offsets[last].get_or_insert(1.0);

    // STEP 2
    let mut max_so_far = f32::NEG_INFINITY;
    for offset in offsets.iter_mut().flatten() {
        max_so_far = max_so_far.max(*offset);
        *offset = max_so_far;
    }

    // STEP 3
    let mut i = 1;
    while i < last {
        if offsets[i].is_some() {
            i += 1;
            continue;
        }
        let run_start = i - 1;
        let mut run_end = i;
        while offsets[run_end].is_none() {
            run_end += 1;
        }
        let from = offsets[run_start].unwrap_or(0.0);
        let to = offsets[run_end].unwrap_or(1.0);
        #[allow(clippy::cast_precision_loss)]
        let step = (to - from) / (run_end - run_start) as f32;
        for (k, slot) in offsets[run_start + 1..run_end].iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let position = step.mul_add((k + 1) as f32, from);
            *slot = Some(position);
        }
        i = run_end;
    }

    Ok(LinearGradient {
        angle,
        stops: stops
            .into_iter()
            .zip(offsets)
            .map(|((color, _), offset)| ColorStop {
                color,
                offset: offset.unwrap_or(0.0).clamp(0.0, 1.0),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gradient(value: &Value) -> LinearGradient {
        match parse_background(value) {
            Ok(Some(Paint::LinearGradient(g))) => g,
            other => panic!("expected a gradient, got {other:?}"),
        }
    }

    fn offsets(g: &LinearGradient) -> Vec<f32> {
        g.stops.iter().map(|s| s.offset).collect()
    }

    #[test]
    fn test_solid_and_none() {
        assert_eq!(
            parse_background(&json!("#fff")),
            Ok(Some(Paint::Solid { color: Color::WHITE }))
        );
        assert_eq!(parse_background(&json!("none")), Ok(None));
        assert!(parse_background(&json!("blurple")).is_err());
    }

    #[test]
    fn test_gradient_string_with_angle() {
        let g = gradient(&json!("linear-gradient(90deg, red, rgb(0, 0, 255) 75%)"));
        assert!((g.angle - 90.0).abs() < f32::EPSILON);
        assert_eq!(g.stops[1].color, Color::rgb(0, 0, 255));
        assert_eq!(offsets(&g), vec![0.0, 0.75]);
    }

    #[test]
    fn test_gradient_side_keywords() {
        assert!((gradient(&json!("linear-gradient(to right, red, blue)")).angle - 90.0).abs() < 0.01);
        assert!((gradient(&json!("linear-gradient(to top left, red, blue)")).angle - 315.0).abs() < 0.01);
        assert!((gradient(&json!("linear-gradient(red, blue)")).angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_offsets_are_spaced_evenly() {
        let g = gradient(&json!("linear-gradient(0deg, red, green, blue, black, white)"));
        assert_eq!(offsets(&g), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_gradient_object_form() {
        let g = gradient(&json!({
            "angle": 45,
            "stops": ["#000", {"color": "#fff", "offset": 0.2}, "red"]
        }));
        assert!((g.angle - 45.0).abs() < f32::EPSILON);
        assert_eq!(offsets(&g), vec![0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_decreasing_offsets_are_clamped() {
        let g = gradient(&json!("linear-gradient(red 50%, blue 20%)"));
        assert_eq!(offsets(&g), vec![0.5, 0.5]);
    }

    #[test]
    fn test_out_of_range_offsets_are_clamped() {
        let g = gradient(&json!("linear-gradient(red -20%, green, blue 150%)"));
        let clamped = offsets(&g);
        assert!(clamped[0].abs() < f32::EPSILON);
        assert!((clamped[1] - 0.65).abs() < 1e-6);
        assert!((clamped[2] - 1.0).abs() < f32::EPSILON);

        let g = gradient(&json!({"stops": [{"color": "red", "offset": 2}, "blue"]}));
        assert_eq!(offsets(&g), vec![1.0, 1.0]);
    }

    #[test]
    fn test_non_finite_offsets_are_rejected() {
        assert!(parse_background(&json!("linear-gradient(red NaN%, blue)")).is_err());
        assert!(parse_background(&json!("linear-gradient(red, blue inf%)")).is_err());
        assert!(
            parse_background(&json!({"stops": ["red", {"color": "blue", "offset": "infinity"}]}))
                .is_err()
        );
    }

    #[test]
    fn test_single_stop_is_rejected() {
        assert!(parse_background(&json!("linear-gradient(90deg, red)")).is_err());
        assert!(parse_background(&json!({"stops": ["red"]})).is_err());
    }
}
