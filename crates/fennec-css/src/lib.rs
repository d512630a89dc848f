//! Selector matching, cascade, style computation, and flexbox layout for
//! the Fennec UI core.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Compound selectors and selector lists
//!   - Specificity calculation
//!
//! - **Stylesheets**
//!   - Compilation of `(selector, declaration map)` rules into typed
//!     longhand declarations
//!   - Diagnostics for invalid selectors and values
//!
//! - **Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Specificity and source-order sorting
//!   - Property inheritance, `inherit` and `initial`
//!   - Shorthand expansion (padding, margin, borderRadius, border)
//!
//! - **Computed Styles** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Colors (hex, named, `rgb()`, `hsl()`), px and % lengths
//!   - Solid and linear-gradient backgrounds
//!
//! - **Layout Engine** ([CSS Flexbox Level 1](https://www.w3.org/TR/css-flexbox-1/))
//!   - Row and column flex containers, wrapping, grow/shrink, alignment
//!   - Box model with padding, border, margin and gap
//!   - `overflow: hidden` paint clipping and hit testing
//!
//! # Not Supported
//!
//! - Descendant and sibling combinators, pseudo-classes, media queries
//! - Grid, absolute and float positioning

/// Cascade and style computation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Typed diagnostics for style and layout anomalies.
pub mod error;
/// Flexbox layout per [CSS Flexbox Level 1](https://www.w3.org/TR/css-flexbox-1/).
pub mod layout;
/// Selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Computed style representation and property values.
pub mod style;
/// Stylesheet compilation from raw rules.
pub mod stylesheet;

// Re-exports for convenience
pub use cascade::{StyleTree, compute_styles, resolve};
pub use error::{Diagnostic, LayoutWarning, SelectorError, StyleValueError};
pub use layout::{
    ApproximateMeasure, BoxDimensions, EdgeSizes, LayoutBox, LayoutTree, Measure, Point, Rect,
    Size, layout,
};
pub use selector::{ParsedSelector, Specificity, parse_selector, parse_selector_list};
pub use style::{ComputedStyle, DEFAULT_FONT_SIZE_PX};
pub use stylesheet::{RawRule, StyleRule, StyleSheet};
