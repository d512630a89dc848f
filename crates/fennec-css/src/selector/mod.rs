//! Selector parsing and matching
//!
//! This module implements the compound-selector subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/): type, class,
//! ID and universal selectors, chained without combinators.
//!
//! Anything outside that subset (whitespace, combinators, pseudo-classes,
//! attribute selectors) is rejected with a [`SelectorError`] rather than
//! silently never matching, so a typo in a theme is reported instead of
//! ignored.

use fennec_dom::ElementData;

use crate::error::SelectorError;

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Examples: `view`, `text`, `button`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.card`, `.primary`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#sidebar`, `#ok-button`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    /// "The universal selector is a single asterisk (*) and represents the
    /// qualified name of any element type."
    Universal,
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
            // Tag names are matched ASCII case-insensitively.
            Self::Type(name) => element.tag.name().eq_ignore_ascii_case(name),

            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            Self::Class(class_name) => element.has_class(class_name),

            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            // "An ID selector represents an element instance that has an identifier
            // that matches the identifier in the ID selector."
            Self::Id(id) => element.id() == Some(id.as_str()),

            // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
            Self::Universal => true,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

/// A parsed selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The compound selector.
    pub compound: CompoundSelector,
    /// The specificity of this selector.
    pub specificity: Specificity,
}

impl ParsedSelector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    /// "A selector is said to match an element when..."
    ///
    /// Every simple selector in the compound must match the element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        self.compound
            .simple_selectors
            .iter()
            .all(|simple| simple.matches(element))
    }

    /// The `(ids, classes, tags)` specificity.
    #[must_use]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }
}

/// Calculate specificity for a single compound selector.
fn calculate_compound_specificity(compound: &CompoundSelector) -> Specificity {
    let mut spec = Specificity::default();

    for simple in &compound.simple_selectors {
        match simple {
            // "count the number of ID selectors in the selector (= A)"
            SimpleSelector::Id(_) => spec.0 += 1,
            // "count the number of class selectors ... (= B)"
            SimpleSelector::Class(_) => spec.1 += 1,
            // "count the number of type selectors ... (= C)"
            SimpleSelector::Type(_) => spec.2 += 1,
            // "ignore the universal selector"
            SimpleSelector::Universal => {}
        }
    }

    spec
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Parse a compound selector such as `view.card#main`.
///
/// # Errors
///
/// Returns a [`SelectorError`] for empty input, whitespace or combinators,
/// pseudo-classes, attribute selectors, a `.`/`#` without a name, a type or
/// universal selector that is not first, or more than one ID.
pub fn parse_selector(raw: &str) -> Result<ParsedSelector, SelectorError> {
    let fail = |reason: &str| SelectorError {
        selector: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(fail("empty selector"));
    }

    let mut simple_selectors = Vec::new();
    let mut chars = trimmed.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            '.' | '#' => {
                let _ = chars.next();
                let mut name = String::new();
                while let Some(ch) = chars.next_if(|&ch| is_ident_char(ch)) {
                    name.push(ch);
                }
                if name.is_empty() {
                    return Err(fail(&format!("'{c}' must be followed by a name")));
                }
                simple_selectors.push(if c == '.' {
                    SimpleSelector::Class(name)
                } else {
                    SimpleSelector::Id(name)
                });
            }

            // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
            '*' => {
                let _ = chars.next();
                if !simple_selectors.is_empty() {
                    return Err(fail("'*' must come first in a compound selector"));
                }
                simple_selectors.push(SimpleSelector::Universal);
            }

            // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
            c if is_ident_start_char(c) => {
                if !simple_selectors.is_empty() {
                    return Err(fail("a type selector must come first in a compound selector"));
                }
                let mut name = String::new();
                while let Some(ch) = chars.next_if(|&ch| is_ident_char(ch)) {
                    name.push(ch);
                }
                simple_selectors.push(SimpleSelector::Type(name));
            }

            // [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
            c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                return Err(fail("combinators are not supported"));
            }
            ':' => return Err(fail("pseudo-classes are not supported")),
            '[' => return Err(fail("attribute selectors are not supported")),
            other => return Err(fail(&format!("unexpected character '{other}'"))),
        }
    }

    let ids = simple_selectors
        .iter()
        .filter(|s| matches!(s, SimpleSelector::Id(_)))
        .count();
    if ids > 1 {
        return Err(fail("a compound selector can name at most one id"));
    }

    let compound = CompoundSelector { simple_selectors };
    let specificity = calculate_compound_specificity(&compound);
    Ok(ParsedSelector {
        compound,
        specificity,
    })
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all
/// elements selected by each of the individual selectors in the list."
///
/// "If just one of these selectors were invalid, the entire selector list
/// would be invalid."
///
/// # Errors
///
/// Returns the first member's [`SelectorError`], reported against the whole
/// list text.
pub fn parse_selector_list(raw: &str) -> Result<Vec<ParsedSelector>, SelectorError> {
    raw.split(',')
        .map(|member| {
            parse_selector(member).map_err(|err| SelectorError {
                selector: raw.to_string(),
                reason: err.reason,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fennec_dom::Tag;

    #[test]
    fn test_compound_parts() {
        let parsed = parse_selector("view.card.primary#main").unwrap();
        assert_eq!(
            parsed.compound.simple_selectors,
            vec![
                SimpleSelector::Type("view".to_string()),
                SimpleSelector::Class("card".to_string()),
                SimpleSelector::Class("primary".to_string()),
                SimpleSelector::Id("main".to_string()),
            ]
        );
        assert_eq!(parsed.specificity(), Specificity::new(1, 2, 1));
    }

    #[test]
    fn test_type_match_is_case_insensitive() {
        let element = ElementData::new(Tag::Button);
        assert!(parse_selector("BUTTON").unwrap().matches(&element));
        assert!(parse_selector("*").unwrap().matches(&element));
        assert!(!parse_selector("view").unwrap().matches(&element));
    }

    #[test]
    fn test_list_reports_whole_text() {
        let err = parse_selector_list(".a, .b:hover").unwrap_err();
        assert_eq!(err.selector, ".a, .b:hover");
        assert_eq!(parse_selector_list(".a, #b").unwrap().len(), 2);
    }
}
