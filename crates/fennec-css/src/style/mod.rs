//! Computed styles and the property values they are built from.
//!
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/)

/// The per-element computed style.
pub mod computed;
/// Property names, shorthand expansion and declaration parsing.
pub mod property;
/// Typed property values.
pub mod values;

pub use computed::{ComputedStyle, DEFAULT_FONT_SIZE_PX, DEFAULT_FONT_WEIGHT};
pub use property::{Declaration, FontSize, Longhand, Property, parse_declaration};
pub use values::{
    Align, AlignContent, Color, ColorStop, Corner, Corners, Dimension, Direction, Edge, Edges,
    Justify, Length, LinearGradient, Overflow, Paint,
};
