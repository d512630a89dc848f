//! Keyword-valued flex properties.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//! [CSS Box Alignment Module Level 3](https://www.w3.org/TR/css-align-3/)
//!
//! Keywords are ASCII case-insensitive and accept both the short toolkit
//! spelling (`start`, `spaceBetween`) and the CSS spelling (`flex-start`,
//! `space-between`).

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// [§ 5.1 flex-direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
///
/// "The flex-direction property specifies how flex items are placed in the
/// flex container, by setting the direction of the flex container's main
/// axis."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Direction {
    /// "The flex container's main axis has the same orientation as the
    /// inline axis."
    #[default]
    Row,
    /// "The flex container's main axis has the same orientation as the
    /// block axis."
    Column,
}

impl Direction {
    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row)
    }
}

/// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// "The justify-content property aligns flex items along the main axis of
/// the current line of the flex container."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Justify {
    /// "Flex items are packed toward the start of the line."
    #[default]
    #[strum(to_string = "start", serialize = "flex-start", serialize = "flexStart")]
    Start,
    /// "Flex items are packed toward the end of the line."
    #[strum(to_string = "end", serialize = "flex-end", serialize = "flexEnd")]
    End,
    /// "Flex items are packed toward the center of the line."
    #[strum(to_string = "center")]
    Center,
    /// "Flex items are evenly distributed in the line."
    #[strum(to_string = "space-between", serialize = "spaceBetween")]
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size
    /// spaces on either end."
    #[strum(to_string = "space-around", serialize = "spaceAround")]
    SpaceAround,
    /// [CSS Box Alignment § 5.3](https://www.w3.org/TR/css-align-3/#valdef-align-content-space-evenly)
    /// "The alignment subjects are evenly distributed in the alignment
    /// container, with a full-size space on either end."
    #[strum(to_string = "space-evenly", serialize = "spaceEvenly")]
    SpaceEvenly,
}

/// [§ 8.3 align-items / align-self](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
///
/// "Flex items can be aligned in the cross axis of the current line of the
/// flex container, similar to justify-content but in the perpendicular
/// direction."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Align {
    /// "The cross-start margin edge of the flex item is placed flush with
    /// the cross-start edge of the line."
    #[strum(to_string = "start", serialize = "flex-start", serialize = "flexStart")]
    Start,
    /// "The cross-end margin edge of the flex item is placed flush with the
    /// cross-end edge of the line."
    #[strum(to_string = "end", serialize = "flex-end", serialize = "flexEnd")]
    End,
    /// "The flex item's margin box is centered in the cross axis within the
    /// line."
    #[strum(to_string = "center")]
    Center,
    /// "If the cross size property of the flex item computes to auto ...
    /// the used outer cross size is the used cross size of its flex line."
    #[default]
    #[strum(to_string = "stretch")]
    Stretch,
}

/// [§ 8.4 align-content](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
///
/// "The align-content property aligns a flex container's lines within the
/// flex container when there is extra space in the cross-axis."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum AlignContent {
    /// "Lines are packed toward the start of the flex container."
    #[default]
    #[strum(to_string = "start", serialize = "flex-start", serialize = "flexStart")]
    Start,
    /// "Lines are packed toward the end of the flex container."
    #[strum(to_string = "end", serialize = "flex-end", serialize = "flexEnd")]
    End,
    /// "Lines are packed toward the center of the flex container."
    #[strum(to_string = "center")]
    Center,
    /// "Lines stretch to take up the remaining space."
    #[strum(to_string = "stretch")]
    Stretch,
    /// "Lines are evenly distributed in the flex container."
    #[strum(to_string = "space-between", serialize = "spaceBetween")]
    SpaceBetween,
    /// "Lines are evenly distributed in the flex container, with half-size
    /// spaces on either end."
    #[strum(to_string = "space-around", serialize = "spaceAround")]
    SpaceAround,
    /// Lines are evenly distributed with full-size spaces on either end.
    #[strum(to_string = "space-evenly", serialize = "spaceEvenly")]
    SpaceEvenly,
}

/// [§ 3 Scrolling and Clipping](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Overflow {
    /// "There is no special handling of overflow."
    #[default]
    #[strum(to_string = "visible")]
    Visible,
    /// "This value indicates that the box's content is clipped to its
    /// padding box." Descendant paint is clipped to the content box here.
    #[strum(to_string = "hidden", serialize = "clip")]
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_spellings() {
        assert_eq!("flex-start".parse::<Justify>(), Ok(Justify::Start));
        assert_eq!("spaceBetween".parse::<Justify>(), Ok(Justify::SpaceBetween));
        assert_eq!("SPACE-EVENLY".parse::<Justify>(), Ok(Justify::SpaceEvenly));
        assert_eq!("flexEnd".parse::<Align>(), Ok(Align::End));
        assert_eq!("column".parse::<Direction>(), Ok(Direction::Column));
        assert_eq!("clip".parse::<Overflow>(), Ok(Overflow::Hidden));
        assert!("baseline".parse::<Align>().is_err());
    }

    #[test]
    fn test_display_uses_canonical_spelling() {
        assert_eq!(Justify::SpaceAround.to_string(), "space-around");
        assert_eq!(AlignContent::Start.to_string(), "start");
    }
}
