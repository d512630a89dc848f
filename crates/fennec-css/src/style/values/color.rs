//! Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::{Serialize, Serializer};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The subset of the named color table UI themes actually use, as
/// `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0x00_ff_ff),
    ("beige", 0xf5_f5_dc),
    ("black", 0x00_00_00),
    ("blue", 0x00_00_ff),
    ("brown", 0xa5_2a_2a),
    ("coral", 0xff_7f_50),
    ("crimson", 0xdc_14_3c),
    ("cyan", 0x00_ff_ff),
    ("darkblue", 0x00_00_8b),
    ("darkgray", 0xa9_a9_a9),
    ("darkgreen", 0x00_64_00),
    ("darkgrey", 0xa9_a9_a9),
    ("darkred", 0x8b_00_00),
    ("dimgray", 0x69_69_69),
    ("dimgrey", 0x69_69_69),
    ("fuchsia", 0xff_00_ff),
    ("gold", 0xff_d7_00),
    ("gray", 0x80_80_80),
    ("green", 0x00_80_00),
    ("grey", 0x80_80_80),
    ("indigo", 0x4b_00_82),
    ("ivory", 0xff_ff_f0),
    ("lavender", 0xe6_e6_fa),
    ("lightblue", 0xad_d8_e6),
    ("lightgray", 0xd3_d3_d3),
    ("lightgreen", 0x90_ee_90),
    ("lightgrey", 0xd3_d3_d3),
    ("lime", 0x00_ff_00),
    ("magenta", 0xff_00_ff),
    ("maroon", 0x80_00_00),
    ("navy", 0x00_00_80),
    ("olive", 0x80_80_00),
    ("orange", 0xff_a5_00),
    ("pink", 0xff_c0_cb),
    ("purple", 0x80_00_80),
    ("red", 0xff_00_00),
    ("salmon", 0xfa_80_72),
    ("silver", 0xc0_c0_c0),
    ("skyblue", 0x87_ce_eb),
    ("slategray", 0x70_80_90),
    ("slategrey", 0x70_80_90),
    ("teal", 0x00_80_80),
    ("tomato", 0xff_63_47),
    ("turquoise", 0x40_e0_d0),
    ("violet", 0xee_82_ee),
    ("wheat", 0xf5_de_b3),
    ("white", 0xff_ff_ff),
    ("whitesmoke", 0xf5_f5_f5),
    ("yellow", 0xff_ff_00),
];

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// [§ 6.3 transparent](https://www.w3.org/TR/css-color-4/#transparent-color)
    /// "The keyword transparent specifies a transparent black."
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (r, g, b, a) = match hex.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            4 => (short(0)?, short(1)?, short(2)?, short(3)?),
            6 => (long(0)?, long(2)?, long(4)?, 255),
            8 => (long(0)?, long(2)?, long(4)?, long(6)?),
            _ => return None,
        };
        Some(Self { r, g, b, a })
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    /// Keywords are ASCII case-insensitive.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .binary_search_by(|(candidate, _)| candidate.cmp(&name.as_str()))
            .ok()
            .map(|i| {
                let [_, r, g, b] = NAMED_COLORS[i].1.to_be_bytes();
                Self::rgb(r, g, b)
            })
    }

    /// Convert to hex string notation (#RRGGBB or #RRGGBBAA if alpha != 255)
    ///
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

/// Parse any supported color notation: hex, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, or a named color.
#[must_use]
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    if text.starts_with('#') {
        return Color::from_hex(text);
    }
    if let Some((name, rest)) = text.split_once('(') {
        let args = rest.strip_suffix(')')?;
        return parse_color_function(name.trim(), args);
    }
    Color::from_named(text)
}

/// [§ 4.1 The RGB Functions: rgb() and rgba()](https://www.w3.org/TR/css-color-4/#rgb-functions)
/// [§ 4.1 The HSL Functions: hsl() and hsla()](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Per CSS Color 4, rgb()/rgba() and hsl()/hsla() are aliases.
fn parse_color_function(name: &str, args: &str) -> Option<Color> {
    let args = extract_color_args(args)?;
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let a = args.get(3).map_or(255, |&alpha| alpha_to_u8(alpha));
    match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => Some(Color {
            r: color_channel_to_u8(args[0]),
            g: color_channel_to_u8(args[1]),
            b: color_channel_to_u8(args[2]),
            a,
        }),
        "hsl" | "hsla" => {
            // "<hue> is a <number> or <angle>, interpreted as degrees."
            let hue = match args[0] {
                ColorArg::Number(v) => v,
                ColorArg::Percentage(v) => v * 3.6,
            };
            let fraction = |arg: ColorArg| match arg {
                ColorArg::Number(v) | ColorArg::Percentage(v) => v / 100.0,
            };
            let (r, g, b) = hsl_to_rgb(hue, fraction(args[1]), fraction(args[2]));
            Some(Color { r, g, b, a })
        }
        _ => None,
    }
}

/// A numeric color function argument.
#[derive(Debug, Clone, Copy)]
enum ColorArg {
    Number(f32),
    Percentage(f32),
}

/// Split arguments on commas, whitespace and the `/` alpha separator, so
/// the legacy comma syntax and the modern space syntax both work.
fn extract_color_args(args: &str) -> Option<Vec<ColorArg>> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_suffix('%') {
            Some(pct) => pct.parse().ok().map(ColorArg::Percentage),
            None => part.parse().ok().map(ColorArg::Number),
        })
        .collect()
}

/// "Values outside these ranges are not invalid, but are clamped to the
/// ranges defined here at parsed-value time."
///
/// Numbers are clamped to 0-255; percentages map 0%-100% to 0-255.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn color_channel_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// "The <alpha-value> can be a <number> (clamped to [0, 1]) or a
/// <percentage> (clamped to [0%, 100%])."
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_to_u8(arg: ColorArg) -> u8 {
    let v = match arg {
        ColorArg::Number(n) => n * 255.0,
        ColorArg::Percentage(p) => p * 255.0 / 100.0,
    };
    v.round().clamp(0.0, 255.0) as u8
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// Hue in degrees (wraps); saturation and lightness in 0.0-1.0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - 2.0f32.mul_add(l, -1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::from_hex("#f00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(
            Color::from_hex("#f008"),
            Some(Color { r: 255, g: 0, b: 0, a: 0x88 })
        );
        assert_eq!(Color::from_hex("#336699"), Some(Color::rgb(0x33, 0x66, 0x99)));
        assert_eq!(
            Color::from_hex("#33669980"),
            Some(Color { r: 0x33, g: 0x66, b: 0x99, a: 0x80 })
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#ggg"), None);
    }

    #[test]
    fn test_hex_string_notation() {
        assert_eq!(Color::rgb(0x33, 0x66, 0x99).to_hex_string(), "#336699");
        assert_eq!(Color { r: 255, g: 0, b: 0, a: 0x80 }.to_hex_string(), "#ff000080");
        assert_eq!(Color::TRANSPARENT.to_hex_string(), "#00000000");
    }

    #[test]
    fn test_named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(Color::from_named("Navy"), Some(Color::rgb(0, 0, 128)));
        assert_eq!(Color::from_named("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::from_named("blurple"), None);
    }

    #[test]
    fn test_color_functions() {
        assert_eq!(parse_color("rgb(255, 128, 0)"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            parse_color("rgba(0, 0, 0, 0.5)"),
            Some(Color { r: 0, g: 0, b: 0, a: 128 })
        );
        assert_eq!(
            parse_color("rgb(100% 0% 0% / 50%)"),
            Some(Color { r: 255, g: 0, b: 0, a: 128 })
        );
        assert_eq!(parse_color("hsl(120, 100%, 25%)"), Some(Color::rgb(0, 128, 0)));
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color("rgb(1, 2, 3"), None);
    }
}
