//! The single error type raised by selector and attribute selector parsing.

use thiserror::Error;

/// A grammar violation found while compiling a selector.
///
/// Parsing stops at the first violation; no partial selector is ever returned.
/// The offset is a byte offset into [`ParseError::input`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({input:?} at {offset})")]
pub struct ParseError {
    message: String,
    input: String,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, input: &str, offset: usize) -> Self {
        Self {
            message: message.into(),
            input: input.to_string(),
            offset,
        }
    }

    /// Human readable description of the violation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The complete source text that was being parsed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset into the source text at which parsing failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
