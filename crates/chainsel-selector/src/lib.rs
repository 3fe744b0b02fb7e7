//! Selector compilation and ancestor-chain matching.
//!
//! # Scope
//!
//! This crate compiles a restricted dialect of CSS selector syntax into a tree
//! of matcher nodes and evaluates it against an ancestor chain: the elements
//! from the outermost ancestor down to the candidate element.
//!
//! - **Type and universal selectors**: `div`, `*`
//! - **Class and ID selectors**: `.item`, `#main`
//! - **Attribute selectors**: `[href]`, `[lang="en"]`, `[href^="https"]`,
//!   `[src$=".png"]`, `[title*="draft"]`, `[rel~="nofollow"]`
//! - **Combinators**: descendant (whitespace) and child (`>`)
//! - **Selector lists**: `h1, h2, h3`
//!
//! # Not Supported
//!
//! - Pseudo-classes and pseudo-elements
//! - Sibling combinators (`+`, `~`)
//! - Namespaces, case-insensitive attribute matching, attribute flags
//! - Specificity
//!
//! # Example
//! ```ignore
//! use chainsel_selector::{Element, parse_selector};
//!
//! let selector = parse_selector("ul.menu > li")?;
//! let chain = [
//!     Element::new("body"),
//!     Element::new("ul").with_attribute("class", "menu wide"),
//!     Element::new("li"),
//! ];
//! assert!(selector.is_match(&chain));
//! ```

/// Attribute matchers and the attribute selector parser.
pub mod attribute;
/// Elements and ancestor chains.
pub mod element;
/// Parse errors.
pub mod error;
/// The selector parser and tree assembly.
pub mod parser;
mod scan;
/// Selector nodes and the matching engine.
pub mod selector;

pub use attribute::{AttributeMatcher, parse_attribute_selector, parse_attribute_selector_with};
pub use element::{AttributesMap, Element};
pub use error::ParseError;
pub use parser::{parse_selector, parse_selector_with};
pub use scan::Unescape;
pub use selector::{ElementTest, MatchOptions, Selector};
