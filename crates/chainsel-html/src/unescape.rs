//! Character reference decoding.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Unlike the tokenizer states this is modelled on, decoding here works on a
//! complete string: every `&` either starts a recognized reference, which is
//! replaced, or is copied through unchanged together with whatever follows it.
//!
//! Decoding has no side effects. Callers that want to report unknown named
//! references ask [`unknown_references`] for them.
//!
//! Numeric references to code points that HTML forbids in text are dropped:
//! C0 controls other than tab, line feed, form feed and carriage return, DEL,
//! C1 controls without a Windows-1252 mapping, and noncharacters.

use std::borrow::Cow;

use crate::named_character_references::{any_entity_has_prefix, lookup_entity};

/// U+FFFD REPLACEMENT CHARACTER
const REPLACEMENT: char = '\u{FFFD}';

/// Decode every HTML character reference in `text`.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
///
/// # Example
/// ```ignore
/// assert_eq!(unescape("a &lt; b"), "a < b");
/// assert_eq!(unescape("&#x41;&#66;"), "AB");
/// assert_eq!(unescape("fish & chips"), "fish & chips");
/// ```
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    decode(text, |_| {})
}

/// Names of the `&name;` references in `text` that [`unescape`] leaves as-is
/// because they are not in the table, in order of appearance.
///
/// # Example
/// ```ignore
/// assert_eq!(unknown_references("&lt;&bogus;&nope"), vec!["bogus"]);
/// ```
#[must_use]
pub fn unknown_references(text: &str) -> Vec<&str> {
    let mut unknown = Vec::new();
    let _ = decode(text, |name| unknown.push(name));
    unknown
}

fn decode<'t>(text: &'t str, mut on_unknown: impl FnMut(&'t str)) -> Cow<'t, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        // "U+0023 NUMBER SIGN (#)" switches to the numeric character reference
        // state; "ASCII alphanumeric" to the named one.
        let consumed = match after.strip_prefix('#') {
            Some(numeric) => decode_numeric(numeric, &mut decoded).map(|len| len + 1),
            None => decode_named(after, &mut decoded),
        };

        match consumed {
            Some(len) => rest = &after[len..],
            None => {
                if let Some(name) = unknown_name(after) {
                    on_unknown(name);
                }
                // "Flush code points consumed as a character reference."
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
///
/// "Consume the maximum number of characters possible, where the consumed
/// characters are one of the identifiers in the first column of the named
/// character references table."
///
/// Returns the number of bytes consumed after the `&`, or `None` if nothing
/// matched.
fn decode_named(text: &str, decoded: &mut String) -> Option<usize> {
    let mut longest_match: Option<(usize, &'static str)> = None;

    for (i, c) in text.char_indices() {
        if !(c.is_ascii_alphanumeric() || c == ';') {
            break;
        }
        let candidate = &text[..=i];
        if !any_entity_has_prefix(candidate) {
            break;
        }
        if let Some(replacement) = lookup_entity(candidate) {
            longest_match = Some((candidate.len(), replacement));
        }
        if c == ';' {
            break;
        }
    }

    let (len, replacement) = longest_match?;
    decoded.push_str(replacement);
    Some(len)
}

/// "U+003B SEMICOLON (;): This is an unknown-named-character-reference parse
/// error." Returns the name when `text` has that shape.
fn unknown_name(text: &str) -> Option<&str> {
    let name_len = text.bytes().take_while(u8::is_ascii_alphanumeric).count();
    (name_len > 0 && text[name_len..].starts_with(';')).then_some(&text[..name_len])
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
///
/// `text` starts right after `&#`. Returns the number of bytes consumed, or
/// `None` when no digits follow ("absence-of-digits-in-numeric-character-reference").
fn decode_numeric(text: &str, decoded: &mut String) -> Option<usize> {
    let (radix, prefix_len) = match text.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };

    let digits_len = text[prefix_len..]
        .bytes()
        .take_while(|b| {
            if radix == 16 {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            }
        })
        .count();
    if digits_len == 0 {
        return None;
    }

    let digits = &text[prefix_len..prefix_len + digits_len];
    let mut consumed = prefix_len + digits_len;
    // "missing-semicolon-after-character-reference" is tolerated.
    if text[consumed..].starts_with(';') {
        consumed += 1;
    }

    // Too many digits for a u32 is out of range just like any value above U+10FFFF.
    let code = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);
    if let Some(c) = numeric_reference_char(code) {
        decoded.push(c);
    }
    Some(consumed)
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// `None` means the reference decodes to nothing.
const fn numeric_reference_char(code: u32) -> Option<char> {
    match code {
        // "null-character-reference parse error"
        0 => Some(REPLACEMENT),
        // "If the number is one of the numbers in the first column of the
        // following table, then find the row with that number in the first
        // column, and set the character reference code to the number in the
        // second column of that row." Unmapped C1 controls are dropped.
        0x80..=0x9F => c1_replacement(code),
        // "control-character-reference parse error"
        0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F => None,
        // "noncharacter-character-reference parse error"
        0xFDD0..=0xFDEF => None,
        _ if code <= 0x10_FFFF && code & 0xFFFE == 0xFFFE => None,
        // Surrogates and values above U+10FFFF have no `char`.
        _ => match char::from_u32(code) {
            Some(c) => Some(c),
            None => Some(REPLACEMENT),
        },
    }
}

/// The Windows-1252 interpretation of C1 control references.
const fn c1_replacement(code: u32) -> Option<char> {
    let c = match code {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    };
    Some(c)
}
