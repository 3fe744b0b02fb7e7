//! Byte-level scanning shared by the selector and attribute selector parsers.
//!
//! Every token the grammar cares about is ASCII, so the scanner walks bytes
//! and only ever stops on ASCII positions. Slices taken between such positions
//! are always valid `str` boundaries, even when the source contains non-ASCII
//! text inside a quoted attribute value.

use std::borrow::Cow;

use crate::error::ParseError;

/// Decoder applied to the raw text of every quoted attribute value.
///
/// The default is [`chainsel_html::unescape`], which resolves HTML character
/// references such as `&lt;` and `&#x41;`.
pub type Unescape = fn(&str) -> Cow<'_, str>;

/// `[A-Za-z_:]`
pub(crate) const fn is_attribute_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':'
}

/// `[A-Za-z0-9_:.-]`
pub(crate) const fn is_attribute_name_char(b: u8) -> bool {
    is_attribute_name_start(b) || b.is_ascii_digit() || b == b'-' || b == b'.'
}

/// Tag names, class names and ids start with an ASCII letter.
pub(crate) const fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// `[A-Za-z0-9_-]`
pub(crate) const fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Characters that may appear in the run between two compound selectors.
pub(crate) const fn is_separator_char(b: u8) -> bool {
    matches!(b, b' ' | b'>' | b',')
}

/// A read-only view of `source[..end]` plus the value decoder.
pub(crate) struct Scanner<'a> {
    source: &'a str,
    end: usize,
    unescape: Unescape,
}

impl<'a> Scanner<'a> {
    /// `end` past the length of `source` is clamped to it.
    pub(crate) fn new(source: &'a str, end: usize, unescape: Unescape) -> Self {
        Self {
            source,
            end: end.min(source.len()),
            unescape,
        }
    }

    pub(crate) const fn end(&self) -> usize {
        self.end
    }

    pub(crate) fn peek(&self, index: usize) -> Option<u8> {
        if index < self.end {
            self.source.as_bytes().get(index).copied()
        } else {
            None
        }
    }

    pub(crate) fn starts_with(&self, index: usize, token: &str) -> bool {
        self.source
            .as_bytes()
            .get(index..self.end)
            .is_some_and(|rest| rest.starts_with(token.as_bytes()))
    }

    /// Index of the first byte at or after `start` that does not satisfy `pred`.
    pub(crate) fn skip_while(&self, start: usize, pred: fn(u8) -> bool) -> usize {
        let mut index = start;
        while self.peek(index).is_some_and(pred) {
            index += 1;
        }
        index
    }

    /// Index of the first `needle` byte at or after `start`, within bounds.
    pub(crate) fn find(&self, start: usize, needle: u8) -> Option<usize> {
        self.source
            .as_bytes()
            .get(start..self.end)?
            .iter()
            .position(|&b| b == needle)
            .map(|pos| start + pos)
    }

    /// `source[start..end]`; both ends must sit on ASCII positions.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or_default()
    }

    /// Read a name whose first byte satisfies `is_start` and whose remaining
    /// bytes satisfy `is_char`. `what` names the construct in error messages.
    pub(crate) fn read_name(
        &self,
        start: usize,
        is_start: fn(u8) -> bool,
        is_char: fn(u8) -> bool,
        what: &str,
    ) -> Result<(&'a str, usize), ParseError> {
        match self.peek(start) {
            None => Err(self.end_of_data(start)),
            Some(b) if is_start(b) => {
                let end = self.skip_while(start + 1, is_char);
                Ok((self.slice(start, end), end))
            }
            Some(_) => Err(self.error(
                format!(
                    "invalid character at start of {what}: {}",
                    self.describe(start)
                ),
                start,
            )),
        }
    }

    pub(crate) fn decode(&self, raw: &str) -> String {
        (self.unescape)(raw).into_owned()
    }

    /// The character at `index` quoted for an error message.
    pub(crate) fn describe(&self, index: usize) -> String {
        self.source
            .get(index..)
            .and_then(|rest| rest.chars().next())
            .map_or_else(|| "end of data".to_string(), |c| format!("{c:?}"))
    }

    pub(crate) fn error(&self, message: impl Into<String>, offset: usize) -> ParseError {
        ParseError::new(message, self.source, offset)
    }

    pub(crate) fn end_of_data(&self, offset: usize) -> ParseError {
        self.error("reached end of data while parsing", offset)
    }
}

/// Bounds of `source` without leading and trailing U+0020 SPACE characters.
/// Tabs and newlines are not trimmed. A blank source yields an empty range at
/// its end.
pub(crate) fn strip(source: &str) -> (usize, usize) {
    let bytes = source.as_bytes();
    let start = bytes.iter().take_while(|&&b| b == b' ').count();
    let trailing = bytes[start..].iter().rev().take_while(|&&b| b == b' ').count();
    (start, bytes.len() - trailing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(source: &str) -> Scanner<'_> {
        Scanner::new(source, source.len(), chainsel_html::unescape)
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("abc"), (0, 3));
        assert_eq!(strip("  abc"), (2, 5));
        assert_eq!(strip("abc  "), (0, 3));
        assert_eq!(strip("  abc  "), (2, 5));
        assert_eq!(strip("   "), (3, 3));
        assert_eq!(strip(""), (0, 0));
        assert_eq!(strip("\tabc\n"), (0, 5));
    }

    #[test]
    fn test_end_is_clamped() {
        let s = Scanner::new("abc", 10, chainsel_html::unescape);
        assert_eq!(s.end(), 3);
        assert_eq!(s.peek(2), Some(b'c'));
        assert_eq!(s.peek(3), None);
    }

    #[test]
    fn test_end_bounds_peeking() {
        let s = Scanner::new("abc", 2, chainsel_html::unescape);
        assert_eq!(s.peek(1), Some(b'b'));
        assert_eq!(s.peek(2), None);
        assert!(!s.starts_with(1, "bc"));
        assert_eq!(s.find(0, b'c'), None);
    }

    #[test]
    fn test_read_name() {
        let s = scanner("abc=");
        let (name, index) = s
            .read_name(0, is_attribute_name_start, is_attribute_name_char, "name")
            .unwrap();
        assert_eq!(name, "abc");
        assert_eq!(index, 3);

        let s = scanner("-");
        let err = s
            .read_name(0, is_attribute_name_start, is_attribute_name_char, "name")
            .unwrap_err();
        assert_eq!(err.offset(), 0);
        assert_eq!(err.message(), "invalid character at start of name: '-'");

        let s = scanner("");
        let err = s
            .read_name(0, is_identifier_start, is_identifier_char, "tag")
            .unwrap_err();
        assert_eq!(err.message(), "reached end of data while parsing");
    }

    #[test]
    fn test_character_classes() {
        assert!(is_attribute_name_start(b':'));
        assert!(is_attribute_name_start(b'_'));
        assert!(!is_attribute_name_start(b'1'));
        assert!(is_attribute_name_char(b'.'));
        assert!(is_attribute_name_char(b'-'));
        assert!(!is_identifier_start(b'_'));
        assert!(is_identifier_char(b'_'));
        assert!(!is_identifier_char(b':'));
        assert!(is_separator_char(b','));
        assert!(!is_separator_char(b'\t'));
    }
}
