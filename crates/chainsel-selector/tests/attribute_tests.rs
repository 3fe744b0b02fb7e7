//! Integration tests for attribute matchers and the attribute selector parser.

use std::borrow::Cow;

use chainsel_common::warning::recorded_warnings;
use chainsel_selector::{
    AttributeMatcher, AttributesMap, parse_attribute_selector, parse_attribute_selector_with,
};

fn attrs(pairs: &[(&str, &str)]) -> AttributesMap {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn matcher(kind: fn(String, String) -> AttributeMatcher, name: &str, value: &str) -> AttributeMatcher {
    kind(name.to_string(), value.to_string())
}

// Matchers

#[test]
fn test_has_name() {
    let sel = AttributeMatcher::HasName("a".to_string());
    assert!(sel.matches(&attrs(&[("a", "1"), ("b", "2")])));
    assert!(sel.matches(&attrs(&[("a", "")])));
    assert!(!sel.matches(&attrs(&[("b", "2")])));
    assert!(!sel.matches(&attrs(&[])));
}

#[test]
fn test_equals() {
    let sel = matcher(AttributeMatcher::Equals, "a", "1");
    assert!(sel.matches(&attrs(&[("a", "1"), ("b", "2")])));
    assert!(sel.matches(&attrs(&[("a", "1")])));
    assert!(!sel.matches(&attrs(&[("a", "3"), ("b", "2")])));
    assert!(!sel.matches(&attrs(&[("a", "11")])));
    assert!(!sel.matches(&attrs(&[])));
}

#[test]
fn test_starts_with() {
    let sel = matcher(AttributeMatcher::StartsWith, "a", "1");
    assert!(sel.matches(&attrs(&[("a", "123"), ("b", "2")])));
    assert!(!sel.matches(&attrs(&[("a", "321")])));
    assert!(!sel.matches(&attrs(&[])));
}

#[test]
fn test_ends_with() {
    let sel = matcher(AttributeMatcher::EndsWith, "a", "3");
    assert!(sel.matches(&attrs(&[("a", "123"), ("b", "2")])));
    assert!(!sel.matches(&attrs(&[("a", "321")])));
    assert!(!sel.matches(&attrs(&[])));
}

#[test]
fn test_contains_substring() {
    let sel = matcher(AttributeMatcher::ContainsSubstring, "a", "2");
    assert!(sel.matches(&attrs(&[("a", "123")])));
    assert!(!sel.matches(&attrs(&[("a", "3x1"), ("b", "2")])));
    assert!(!sel.matches(&attrs(&[])));
}

#[test]
fn test_contains_token() {
    let sel = matcher(AttributeMatcher::ContainsToken, "a", "2");
    assert!(sel.matches(&attrs(&[("a", "1 2 3"), ("b", "2")])));
    assert!(sel.matches(&attrs(&[("a", "2")])));
    assert!(!sel.matches(&attrs(&[("a", "1 x 3"), ("b", "2")])));
    assert!(!sel.matches(&attrs(&[("a", "123")])));
    assert!(!sel.matches(&attrs(&[])));

    let sel = matcher(AttributeMatcher::ContainsToken, "a", "x");
    assert!(!sel.matches(&attrs(&[("a", "1x3")])));
}

#[test]
fn test_contains_token_splits_on_space_only() {
    let sel = matcher(AttributeMatcher::ContainsToken, "class", "b");
    assert!(!sel.matches(&attrs(&[("class", "a\tb")])));
    assert!(sel.matches(&attrs(&[("class", "a  b")])));
}

#[test]
fn test_matcher_accessors_and_display() {
    let sel = matcher(AttributeMatcher::StartsWith, "href", "https");
    assert_eq!(sel.name(), "href");
    assert_eq!(sel.value(), Some("https"));
    assert_eq!(sel.to_string(), "[href^=\"https\"]");

    let sel = AttributeMatcher::HasName("disabled".to_string());
    assert_eq!(sel.value(), None);
    assert_eq!(sel.to_string(), "[disabled]");
}

// Parser

#[test]
fn test_parse_each_operator() {
    let cases = [
        ("[a]", AttributeMatcher::HasName("a".to_string()), 3),
        ("[a=\"b\"]", matcher(AttributeMatcher::Equals, "a", "b"), 7),
        ("[a^=\"b\"]", matcher(AttributeMatcher::StartsWith, "a", "b"), 8),
        ("[a$=\"b\"]", matcher(AttributeMatcher::EndsWith, "a", "b"), 8),
        ("[a*=\"b\"]", matcher(AttributeMatcher::ContainsSubstring, "a", "b"), 8),
        ("[a~=\"b\"]", matcher(AttributeMatcher::ContainsToken, "a", "b"), 8),
    ];
    for (source, expected, next) in cases {
        let (parsed, index) = parse_attribute_selector(source, 0, source.len()).unwrap();
        assert_eq!(parsed, expected, "parsing {source}");
        assert_eq!(index, next, "next index for {source}");
    }
}

#[test]
fn test_parse_name_characters() {
    let source = "[xml:lang]";
    let (parsed, index) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed, AttributeMatcher::HasName("xml:lang".to_string()));
    assert_eq!(index, 10);

    let source = "[_data-x.y2=\"v\"]";
    let (parsed, _) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed, matcher(AttributeMatcher::Equals, "_data-x.y2", "v"));
}

#[test]
fn test_parse_within_larger_source() {
    let source = "div[title=\"x\"][lang]";
    let (parsed, index) = parse_attribute_selector(source, 3, source.len()).unwrap();
    assert_eq!(parsed, matcher(AttributeMatcher::Equals, "title", "x"));
    assert_eq!(index, 14);

    let (parsed, index) = parse_attribute_selector(source, index, source.len()).unwrap();
    assert_eq!(parsed, AttributeMatcher::HasName("lang".to_string()));
    assert_eq!(index, source.len());
}

#[test]
fn test_parse_value_is_verbatim_then_unescaped() {
    let source = "[a=\"&lt;\"]";
    let (parsed, index) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed.value(), Some("<"));
    assert_eq!(index, source.len());

    let source = "[title=\"a ] b > c, d\"]";
    let (parsed, _) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed.value(), Some("a ] b > c, d"));

    let source = "[title=\"caf\u{e9}\"]";
    let (parsed, index) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed.value(), Some("caf\u{e9}"));
    assert_eq!(index, source.len());
}

#[test]
fn test_parse_keeps_unknown_references_without_side_effects() {
    let source = "[a=\"&nosuchthing;\"]";
    let (parsed, _) = parse_attribute_selector(source, 0, source.len()).unwrap();
    assert_eq!(parsed.value(), Some("&nosuchthing;"));
    // Parsing never reports through the process-wide warning set.
    assert!(recorded_warnings().is_empty());

    assert!(chainsel_selector::parse_selector("a[t=\"&bogus;\"] b").is_ok());
    assert!(recorded_warnings().is_empty());
}

#[test]
fn test_parse_with_injected_unescape() {
    fn shout(text: &str) -> Cow<'_, str> {
        Cow::Owned(text.to_uppercase())
    }
    fn verbatim(text: &str) -> Cow<'_, str> {
        Cow::Borrowed(text)
    }

    let source = "[a=\"b&amp;c\"]";
    let (parsed, _) = parse_attribute_selector_with(source, 0, source.len(), shout).unwrap();
    assert_eq!(parsed.value(), Some("B&AMP;C"));

    let (parsed, _) = parse_attribute_selector_with(source, 0, source.len(), verbatim).unwrap();
    assert_eq!(parsed.value(), Some("b&amp;c"));
}

#[test]
fn test_parse_errors() {
    let cases = [
        // (source, end, offset)
        ("", 0, 0),
        ("abc", 3, 0),
        ("[", 1, 1),
        ("[-a]", 4, 1),
        ("[a b]", 5, 2),
        ("[a", 2, 2),
        ("[a|=\"b\"]", 8, 2),
        ("[a=b]", 5, 3),
        ("[a=\"b]", 6, 3),
        ("[a=\"b\"", 6, 6),
        ("[a=\"b\"x", 7, 6),
        ("[a=", 3, 3),
    ];
    for (source, end, offset) in cases {
        let err = parse_attribute_selector(source, 0, end).unwrap_err();
        assert_eq!(err.offset(), offset, "offset for {source:?}: {err}");
        assert_eq!(err.input(), source);
    }
}

#[test]
fn test_parse_error_messages() {
    let err = parse_attribute_selector("[a b]", 0, 5).unwrap_err();
    assert_eq!(err.message(), "could not read any supported operator, found ' '");
    assert_eq!(
        err.to_string(),
        "could not read any supported operator, found ' ' (\"[a b]\" at 2)"
    );

    let err = parse_attribute_selector("[9]", 0, 3).unwrap_err();
    assert_eq!(err.message(), "invalid character at start of attribute name: '9'");
}

#[test]
fn test_end_bounds_the_parse() {
    // The closing bracket lies outside of [start, end).
    let err = parse_attribute_selector("[a]", 0, 2).unwrap_err();
    assert_eq!(err.message(), "reached end of data while parsing");
    assert_eq!(err.offset(), 2);

    // An end past the source is clamped.
    let (parsed, index) = parse_attribute_selector("[a]", 0, 100).unwrap();
    assert_eq!(parsed, AttributeMatcher::HasName("a".to_string()));
    assert_eq!(index, 3);
}
