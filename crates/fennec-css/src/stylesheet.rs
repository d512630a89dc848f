//! Stylesheet compilation.
//!
//! A stylesheet arrives as an ordered list of `(selector text, declaration
//! map)` pairs, already parsed from whatever source syntax the host uses.
//! [`StyleSheet::new`] compiles it once: selectors are parsed, every
//! declaration is parsed into typed longhands, and each malformed piece is
//! recorded as a diagnostic and dropped. The cascade then only deals with
//! valid, typed rules.

use serde::Deserialize;
use serde_json::{Map, Value};

use fennec_dom::ElementData;

use crate::error::Diagnostic;
use crate::selector::{ParsedSelector, Specificity, parse_selector_list};
use crate::style::{Declaration, parse_declaration};

/// One uncompiled rule: selector text plus an ordered declaration map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRule {
    /// Selector text, possibly a comma-separated list.
    pub selector: String,
    /// Property name to JSON value, in source order.
    #[serde(default)]
    pub declarations: Map<String, Value>,
}

impl RawRule {
    /// A rule with no declarations yet.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Map::new(),
        }
    }

    /// Add a declaration; a repeated name replaces the earlier value.
    #[must_use]
    pub fn declare(mut self, property: impl Into<String>, value: Value) -> Self {
        let _ = self.declarations.insert(property.into(), value);
        self
    }
}

/// Accepted JSON shapes for [`StyleSheet::from_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum SheetSource {
    /// `[{"selector": ".a", "declarations": {...}}, ...]`
    List(Vec<RawRule>),
    /// `{".a": {...}, "#b": {...}}`, in key order.
    Map(Map<String, Value>),
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// A compiled rule: one selector (a selector list yields one rule per
/// member) with its typed declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The parsed selector.
    pub selector: ParsedSelector,
    /// Cached specificity of `selector`.
    pub specificity: Specificity,
    /// Longhand declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Index of the raw rule this came from; later rules win ties.
    pub source_order: usize,
}

/// A compiled, immutable stylesheet.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
    diagnostics: Vec<Diagnostic>,
}

impl StyleSheet {
    /// Compile raw rules.
    ///
    /// An invalid selector drops its whole rule; an invalid value drops only
    /// that declaration. Each anomaly is recorded once in
    /// [`diagnostics`](Self::diagnostics) and reported through the warning
    /// log.
    #[must_use]
    pub fn new(raw_rules: impl IntoIterator<Item = RawRule>) -> Self {
        let mut sheet = Self::default();

        for (source_order, raw) in raw_rules.into_iter().enumerate() {
            let selectors = match parse_selector_list(&raw.selector) {
                Ok(selectors) => selectors,
                Err(err) => {
                    sheet.record(err.into());
                    continue;
                }
            };

            let mut declarations = Vec::new();
            for (name, value) in &raw.declarations {
                match parse_declaration(name, value) {
                    Ok(parsed) => declarations.extend(parsed),
                    Err(err) => sheet.record(err.into()),
                }
            }

            for selector in selectors {
                sheet.rules.push(StyleRule {
                    specificity: selector.specificity(),
                    selector,
                    declarations: declarations.clone(),
                    source_order,
                });
            }
        }

        sheet
    }

    /// Deserialize and compile a stylesheet from JSON.
    ///
    /// Accepts either a list of `{"selector", "declarations"}` objects or an
    /// object mapping selector text to declaration maps (key order is source
    /// order).
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not one of those two
    /// shapes. Problems inside individual rules are diagnostics, not errors.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw_rules = match serde_json::from_str::<SheetSource>(text)? {
            SheetSource::List(rules) => rules,
            SheetSource::Map(map) => map
                .into_iter()
                .map(|(selector, declarations)| RawRule {
                    selector,
                    declarations: match declarations {
                        Value::Object(map) => map,
                        _ => Map::new(),
                    },
                })
                .collect(),
        };
        Ok(Self::new(raw_rules))
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.report();
        self.diagnostics.push(diagnostic);
    }

    /// Compiled rules in source order.
    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Selector and value errors found while compiling.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    ///
    /// Rules matching `element`, lowest precedence first: ascending
    /// specificity, then ascending source order.
    #[must_use]
    pub fn matching_rules(&self, element: &ElementData) -> Vec<&StyleRule> {
        let mut matched: Vec<&StyleRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(element))
            .collect();
        matched.sort_by_key(|rule| (rule.specificity, rule.source_order));
        matched
    }
}
