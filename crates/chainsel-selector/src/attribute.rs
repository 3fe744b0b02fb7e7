//! Attribute matchers and the `[...]` attribute selector grammar.
//!
//! [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
//!
//! Only double-quoted values are accepted, and the value is decoded with the
//! injected [`Unescape`] function after it has been cut out of the source.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::element::AttributesMap;
use crate::error::ParseError;
use crate::scan::{Scanner, Unescape, is_attribute_name_char, is_attribute_name_start};

/// A single test against an element's attribute map.
///
/// Every variant carries the attribute name first; all but [`HasName`] also
/// carry the value to compare against. Comparisons are case-sensitive.
///
/// [`HasName`]: AttributeMatcher::HasName
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeMatcher {
    /// `[attr]`: the attribute is present, with any value.
    HasName(String),

    /// `[attr="value"]`: the attribute value is exactly `value`.
    Equals(String, String),

    /// `[attr^="value"]`: the attribute value starts with `value`.
    StartsWith(String, String),

    /// `[attr$="value"]`: the attribute value ends with `value`.
    EndsWith(String, String),

    /// `[attr*="value"]`: the attribute value contains `value` anywhere.
    ContainsSubstring(String, String),

    /// `[attr~="value"]`: `value` is one of the tokens of the attribute value
    /// split on U+0020 SPACE. `.name` compiles to this test on `class`.
    ///
    /// Example: `[rel~="next"]` matches `rel="next nofollow"` but not
    /// `rel="nextpage"`.
    ContainsToken(String, String),
}

impl AttributeMatcher {
    /// The attribute name this matcher tests.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::HasName(name)
            | Self::Equals(name, _)
            | Self::StartsWith(name, _)
            | Self::EndsWith(name, _)
            | Self::ContainsSubstring(name, _)
            | Self::ContainsToken(name, _) => name,
        }
    }

    /// The comparison value, or `None` for [`AttributeMatcher::HasName`].
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::HasName(_) => None,
            Self::Equals(_, value)
            | Self::StartsWith(_, value)
            | Self::EndsWith(_, value)
            | Self::ContainsSubstring(_, value)
            | Self::ContainsToken(_, value) => Some(value),
        }
    }

    /// Check this matcher against an element's attributes.
    #[must_use]
    pub fn matches(&self, attributes: &AttributesMap) -> bool {
        let Some(actual) = attributes.get(self.name()) else {
            return false;
        };
        match self {
            Self::HasName(_) => true,
            Self::Equals(_, value) => actual == value,
            Self::StartsWith(_, value) => actual.starts_with(value.as_str()),
            Self::EndsWith(_, value) => actual.ends_with(value.as_str()),
            Self::ContainsSubstring(_, value) => actual.contains(value.as_str()),
            Self::ContainsToken(_, value) => actual.split(' ').any(|token| token == value.as_str()),
        }
    }

    const fn operator(&self) -> &'static str {
        match self {
            Self::HasName(_) => "",
            Self::Equals(..) => "=",
            Self::StartsWith(..) => "^=",
            Self::EndsWith(..) => "$=",
            Self::ContainsSubstring(..) => "*=",
            Self::ContainsToken(..) => "~=",
        }
    }
}

impl fmt::Display for AttributeMatcher {
    /// Writes the bracketed form, e.g. `[lang^="en"]`. `&` and `"` in the
    /// value are written as `&amp;` and `&quot;`, which
    /// [`chainsel_html::unescape`] decodes back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            None => write!(f, "[{}]", self.name()),
            Some(value) => write!(
                f,
                "[{}{}\"{}\"]",
                self.name(),
                self.operator(),
                escape_value(value)
            ),
        }
    }
}

fn escape_value(value: &str) -> Cow<'_, str> {
    if value.contains(['&', '"']) {
        Cow::Owned(value.replace('&', "&amp;").replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Operators that take a quoted value, in the order they are tried. `=` has to
/// come last since every other operator ends with it.
const VALUE_OPERATORS: [(&str, fn(String, String) -> AttributeMatcher); 5] = [
    ("^=", AttributeMatcher::StartsWith),
    ("$=", AttributeMatcher::EndsWith),
    ("*=", AttributeMatcher::ContainsSubstring),
    ("~=", AttributeMatcher::ContainsToken),
    ("=", AttributeMatcher::Equals),
];

/// Parse one attribute selector starting at `source[start]`, looking no
/// further than `source[..end]`.
///
/// Returns the matcher and the index just past the closing `]`. Quoted values
/// are decoded with [`chainsel_html::unescape`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the text at `start` is not a complete attribute
/// selector: missing `[`, an invalid attribute name, an unknown operator, an
/// unquoted or unterminated value, a missing `]`, or the end of data at any
/// point where more input is required.
///
/// # Example
/// ```ignore
/// let (matcher, next) = parse_attribute_selector("[a~=\"b\"]", 0, 8)?;
/// assert_eq!(matcher, AttributeMatcher::ContainsToken("a".into(), "b".into()));
/// assert_eq!(next, 8);
/// ```
pub fn parse_attribute_selector(
    source: &str,
    start: usize,
    end: usize,
) -> Result<(AttributeMatcher, usize), ParseError> {
    parse_attribute_selector_with(source, start, end, chainsel_html::unescape)
}

/// [`parse_attribute_selector`] with a caller-supplied value decoder.
///
/// # Errors
///
/// Same as [`parse_attribute_selector`].
pub fn parse_attribute_selector_with(
    source: &str,
    start: usize,
    end: usize,
    unescape: Unescape,
) -> Result<(AttributeMatcher, usize), ParseError> {
    read_attribute_selector(&Scanner::new(source, end, unescape), start)
}

pub(crate) fn read_attribute_selector(
    scanner: &Scanner<'_>,
    start: usize,
) -> Result<(AttributeMatcher, usize), ParseError> {
    match scanner.peek(start) {
        None => return Err(scanner.end_of_data(start)),
        Some(b'[') => {}
        Some(_) => {
            return Err(scanner.error(
                format!(
                    "expected '[' to start attribute selector, found {}",
                    scanner.describe(start)
                ),
                start,
            ));
        }
    }

    let (name, index) = scanner.read_name(
        start + 1,
        is_attribute_name_start,
        is_attribute_name_char,
        "attribute name",
    )?;
    let name = name.to_string();

    if scanner.starts_with(index, "]") {
        return Ok((AttributeMatcher::HasName(name), index + 1));
    }

    for (operator, build) in VALUE_OPERATORS {
        if scanner.starts_with(index, operator) {
            let (value, next) = read_attribute_value(scanner, index + operator.len())?;
            return Ok((build(name, value), next));
        }
    }

    if index >= scanner.end() {
        Err(scanner.end_of_data(index))
    } else {
        Err(scanner.error(
            format!(
                "could not read any supported operator, found {}",
                scanner.describe(index)
            ),
            index,
        ))
    }
}

/// Read `"value"]` starting at the opening quote. Returns the decoded value
/// and the index just past the `]`.
fn read_attribute_value(scanner: &Scanner<'_>, start: usize) -> Result<(String, usize), ParseError> {
    match scanner.peek(start) {
        None => return Err(scanner.end_of_data(start)),
        Some(b'"') => {}
        Some(_) => {
            return Err(scanner.error(
                format!(
                    "expected '\"' to start attribute value, found {}",
                    scanner.describe(start)
                ),
                start,
            ));
        }
    }

    // There is no escape for the quote itself: the first one closes the value.
    let Some(close) = scanner.find(start + 1, b'"') else {
        return Err(scanner.error("missing '\"' to close attribute value", start));
    };

    match scanner.peek(close + 1) {
        Some(b']') => {}
        None => return Err(scanner.end_of_data(close + 1)),
        Some(_) => {
            return Err(scanner.error(
                format!(
                    "expected ']' after attribute value, found {}",
                    scanner.describe(close + 1)
                ),
                close + 1,
            ));
        }
    }

    let raw = scanner.slice(start + 1, close);
    Ok((scanner.decode(raw), close + 2))
}
