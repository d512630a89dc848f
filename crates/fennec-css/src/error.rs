//! Diagnostics produced while compiling stylesheets and laying out trees.
//!
//! Nothing in this crate fails hard on malformed input. Anomalies are
//! collected as typed values so callers and tests can inspect them, and
//! each one is also reported once through
//! [`warn_once`](fennec_common::warning::warn_once).

use fennec_common::warning::warn_once;
use fennec_dom::NodeId;
use thiserror::Error;

/// A declaration value that could not be parsed for its property.
///
/// The declaration is dropped; the rest of the rule still applies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value} for '{property}': {reason}")]
pub struct StyleValueError {
    /// The property name as written in the stylesheet.
    pub property: String,
    /// The offending value, rendered as JSON.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl StyleValueError {
    /// Build an error for `property` from the raw JSON value.
    #[must_use]
    pub fn new(property: &str, value: &serde_json::Value, reason: impl Into<String>) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A selector outside the supported grammar (compounds of tag, `#id`,
/// `.class` and `*`). The whole rule is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    /// The selector text as written.
    pub selector: String,
    /// Why the selector was rejected.
    pub reason: String,
}

/// A recoverable anomaly found during a layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutWarning {
    /// A percentage was resolved against a size that depends on the
    /// content it sizes. The percentage was treated as 0.
    #[error("node {}: percentage '{property}' against an indefinite size, using 0", .node.0)]
    UnresolvedPercentage {
        /// The node whose style carried the percentage.
        node: NodeId,
        /// The property holding the percentage.
        property: &'static str,
    },

    /// Items still overflow the line after every shrinkable item reached
    /// its floor.
    #[error("node {}: flex items overflow by {overflow}px after shrinking", .node.0)]
    ShrinkFloor {
        /// The flex container.
        node: NodeId,
        /// Remaining overflow in px.
        overflow: f32,
    },
}

/// Any diagnostic the core can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// See [`SelectorError`].
    #[error(transparent)]
    Selector(#[from] SelectorError),
    /// See [`StyleValueError`].
    #[error(transparent)]
    Value(#[from] StyleValueError),
    /// See [`LayoutWarning`].
    #[error(transparent)]
    Layout(#[from] LayoutWarning),
}

impl Diagnostic {
    /// The log component this diagnostic is reported under.
    #[must_use]
    pub const fn component(&self) -> &'static str {
        match self {
            Self::Selector(_) | Self::Value(_) => "CSS",
            Self::Layout(_) => "Layout",
        }
    }

    /// Print the diagnostic unless the same message was already printed.
    pub fn report(&self) {
        let _ = warn_once(self.component(), &self.to_string());
    }
}
