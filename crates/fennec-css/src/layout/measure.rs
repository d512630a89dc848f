//! Content measurement for leaf elements.
//!
//! The layout engine never shapes text or decodes images itself. When a
//! childless content leaf (`text`, `image`, `icon`, `input`) needs a size,
//! it asks a [`Measure`] implementation supplied by the host.

use fennec_dom::{ElementData, Tag};

use super::box_model::Size;
use crate::style::ComputedStyle;

/// Attribute holding placeholder text for an `input`.
pub const PLACEHOLDER_ATTRIBUTE: &str = "placeholder";

/// Measures the content box of a leaf element.
///
/// Any `Fn(&ElementData, &ComputedStyle) -> Size` closure implements this,
/// so tests can supply fixed sizes inline.
pub trait Measure {
    /// The content size of `element` rendered with `style`, excluding
    /// padding and border.
    fn measure(&self, element: &ElementData, style: &ComputedStyle) -> Size;
}

impl<F> Measure for F
where
    F: Fn(&ElementData, &ComputedStyle) -> Size,
{
    fn measure(&self, element: &ElementData, style: &ComputedStyle) -> Size {
        self(element, style)
    }
}

/// Measurement from fixed glyph ratios.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Without font data, every glyph advances by 0.6× the font size and every
/// line is 1.2× the font size tall. Text is split into lines on `\n` only;
/// no wrapping is performed. Used as a fallback when the host has no text
/// shaper, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasure;

impl ApproximateMeasure {
    /// Average advance width as a fraction of the font size.
    pub const CHAR_WIDTH_RATIO: f32 = 0.6;
    /// `line-height: normal` as a fraction of the font size.
    pub const LINE_HEIGHT_RATIO: f32 = 1.2;

    /// Width and height of `text` at `font_size`.
    #[must_use]
    pub fn text_size(text: &str, font_size: f32) -> Size {
        let mut lines = 0_usize;
        let mut widest = 0_usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        #[allow(clippy::cast_precision_loss)]
        let size = Size::new(
            widest as f32 * font_size * Self::CHAR_WIDTH_RATIO,
            lines as f32 * font_size * Self::LINE_HEIGHT_RATIO,
        );
        size
    }
}

impl Measure for ApproximateMeasure {
    fn measure(&self, element: &ElementData, style: &ComputedStyle) -> Size {
        let font_size = style.font_size;
        match element.tag {
            Tag::Text => Self::text_size(element.text_content().unwrap_or_default(), font_size),
            Tag::Image => {
                let dimension = |name: &str| {
                    element
                        .attrs
                        .get(name)
                        .and_then(|raw| raw.trim().trim_end_matches("px").parse::<f32>().ok())
                        .filter(|v| v.is_finite() && *v >= 0.0)
                        .unwrap_or(0.0)
                };
                Size::new(dimension("width"), dimension("height"))
            }
            Tag::Icon => Size::new(font_size, font_size),
            Tag::Input => {
                let text = element
                    .text_content()
                    .filter(|t| !t.is_empty())
                    .or_else(|| element.attrs.get(PLACEHOLDER_ATTRIBUTE).map(String::as_str))
                    .unwrap_or_default();
                let size = Self::text_size(text, font_size);
                // An empty field still occupies one line.
                Size::new(size.width, size.height.max(font_size * Self::LINE_HEIGHT_RATIO))
            }
            _ => Size::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_uses_widest_line() {
        let style = ComputedStyle::default();
        let element = ElementData::new(Tag::Text).with_text("ab\nabcd");
        let size = ApproximateMeasure.measure(&element, &style);
        assert!((size.width - 4.0 * 16.0 * 0.6).abs() < 1e-4);
        assert!((size.height - 2.0 * 16.0 * 1.2).abs() < 1e-4);
    }

    #[test]
    fn test_image_reads_attributes() {
        let element = ElementData::new(Tag::Image)
            .with_attr("width", "64")
            .with_attr("height", "32px");
        let size = ApproximateMeasure.measure(&element, &ComputedStyle::default());
        assert_eq!(size, Size::new(64.0, 32.0));
    }

    #[test]
    fn test_empty_input_keeps_line_height() {
        let element = ElementData::new(Tag::Input);
        let size = ApproximateMeasure.measure(&element, &ComputedStyle::default());
        assert_eq!(size.width, 0.0);
        assert!((size.height - 16.0 * 1.2).abs() < 1e-4);
    }

    #[test]
    fn test_closure_measure() {
        let fixed = |_: &ElementData, _: &ComputedStyle| Size::new(5.0, 7.0);
        let size = fixed.measure(&ElementData::new(Tag::Icon), &ComputedStyle::default());
        assert_eq!(size, Size::new(5.0, 7.0));
    }
}
