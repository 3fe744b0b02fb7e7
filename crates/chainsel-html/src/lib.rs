//! HTML character reference decoding for the chainsel selector engine.
//!
//! # Scope
//!
//! Quoted attribute values in a selector (`[title="a &amp; b"]`) are decoded
//! the way an HTML tokenizer decodes attribute values:
//! - **Named character references** ([WHATWG § 13.2.5.73](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state))
//!   from a table of common entities, including the legacy forms that do not
//!   need a trailing semicolon
//! - **Numeric character references** ([WHATWG § 13.2.5.75](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)),
//!   decimal and hexadecimal
//!
//! # Not Yet Implemented
//!
//! - The full 2,231 entry named reference table

/// Named character reference lookup table.
pub mod named_character_references;
/// Decoding of character references in text.
pub mod unescape;

pub use unescape::{unescape, unknown_references};
