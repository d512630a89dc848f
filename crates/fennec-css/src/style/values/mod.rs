//! Typed property values.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

/// Color values and parsing.
pub mod color;
/// Flex keywords: direction, justify, align, align-content, overflow.
pub mod keywords;
/// Lengths, percentages, edges and corners.
pub mod length;
/// Background paint: solid colors and linear gradients.
pub mod paint;

pub use color::{Color, parse_color};
pub use keywords::{Align, AlignContent, Direction, Justify, Overflow};
pub use length::{Corner, Corners, Dimension, Edge, Edges, Length, parse_length};
pub use paint::{ColorStop, LinearGradient, Paint};
