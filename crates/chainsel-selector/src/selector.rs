//! Selector nodes and the matching engine.
//!
//! A compiled selector is a tree of [`Selector`] nodes. Matching walks an
//! ancestor chain (outermost ancestor first) with an index: each node decides
//! whether it matches at that index and, for combinators, hands the next
//! index on to its far side.
//!
//! The parser always produces the same shape per comma-separated clause:
//!
//! ```text
//! div > ul li   =>   AnchorAnywhere(
//!                      Child(div,
//!                        Descendant(ul,
//!                          Child(li, AnchorLast))))
//! ```
//!
//! so that [`MatchOptions`] decides, at call time, where a match may start and
//! whether it must end at the last element of the chain.

use std::fmt;

use serde::Serialize;

use crate::attribute::AttributeMatcher;
use crate::element::Element;
use crate::scan::{is_identifier_char, is_identifier_start};

/// Call-time switches for [`Selector::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    /// Let an [`Selector::AnchorAnywhere`] node start matching at any index of
    /// the chain. When `false` the match has to start at the outermost element.
    pub match_anywhere: bool,

    /// Let [`Selector::AnchorLast`] accept any index, so a chain whose tail lies
    /// below the matched element still matches. When `false` the selector's
    /// last compound must match the last element of the chain.
    pub match_children: bool,
}

impl MatchOptions {
    /// Options with both switches given explicitly.
    #[must_use]
    pub const fn new(match_anywhere: bool, match_children: bool) -> Self {
        Self {
            match_anywhere,
            match_children,
        }
    }
}

impl Default for MatchOptions {
    /// CSS semantics: the selector may start anywhere in the chain and its
    /// subject is the last element.
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// A compound selector: an optional tag name plus attribute tests that must all
/// hold for the same element.
///
/// Example: `a.external[href^="https"]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ElementTest {
    /// Required element name. Empty matches any name (`*`).
    pub tag: String,
    /// Attribute tests, in source order.
    pub attributes: Vec<AttributeMatcher>,
}

impl ElementTest {
    /// Create a compound selector.
    #[must_use]
    pub fn new(tag: impl Into<String>, attributes: Vec<AttributeMatcher>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
        }
    }

    /// Check the tag and every attribute test against one element.
    #[must_use]
    pub fn matches_element(&self, element: &Element) -> bool {
        (self.tag.is_empty() || self.tag == element.name)
            && self
                .attributes
                .iter()
                .all(|matcher| matcher.matches(&element.attributes))
    }

    /// Check against `chain[index]`. An index past the end never matches.
    #[must_use]
    pub fn matches(&self, chain: &[Element], index: usize) -> bool {
        chain
            .get(index)
            .is_some_and(|element| self.matches_element(element))
    }
}

impl fmt::Display for ElementTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_empty() {
            if self.attributes.is_empty() {
                f.write_str("*")?;
            }
        } else {
            f.write_str(&self.tag)?;
        }
        for matcher in &self.attributes {
            match matcher {
                AttributeMatcher::ContainsToken(name, value)
                    if name == "class" && is_identifier(value) =>
                {
                    write!(f, ".{value}")?;
                }
                AttributeMatcher::Equals(name, value) if name == "id" && is_identifier(value) => {
                    write!(f, "#{value}")?;
                }
                _ => write!(f, "{matcher}")?,
            }
        }
        Ok(())
    }
}

/// Whether `.value` / `#value` would parse back to the same test.
fn is_identifier(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.first().is_some_and(|&b| is_identifier_start(b))
        && bytes.iter().all(|&b| is_identifier_char(b))
}

/// A node of a compiled selector.
///
/// Nodes are immutable once built; the same tree can be matched any number of
/// times, from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Selector {
    /// A compound selector tested against a single element.
    Element(ElementTest),

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    ///
    /// `near far`: `far` matches at any index deeper than the one `near`
    /// matched at, with any number of elements in between.
    Descendant {
        /// The ancestor side.
        near: Box<Selector>,
        /// The descendant side.
        far: Box<Selector>,
    },

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    ///
    /// `near > far`: `far` matches at exactly the next index.
    Child {
        /// The parent side.
        near: Box<Selector>,
        /// The child side.
        far: Box<Selector>,
    },

    /// Wraps every compiled clause. With [`MatchOptions::match_anywhere`] the
    /// inner selector may start at any index, otherwise only at index 0.
    AnchorAnywhere(Box<Selector>),

    /// Terminates every compiled clause. Without
    /// [`MatchOptions::match_children`] it only matches one past the last
    /// index, i.e. when the previous compound consumed the whole chain.
    AnchorLast,

    /// `a, b, c`: matches if any branch matches.
    Alternation(Vec<Selector>),
}

impl Selector {
    /// A single compound selector node.
    #[must_use]
    pub fn element(tag: impl Into<String>, attributes: Vec<AttributeMatcher>) -> Self {
        Self::Element(ElementTest::new(tag, attributes))
    }

    /// `near far`
    #[must_use]
    pub fn descendant(near: Self, far: Self) -> Self {
        Self::Descendant {
            near: Box::new(near),
            far: Box::new(far),
        }
    }

    /// `near > far`
    #[must_use]
    pub fn child(near: Self, far: Self) -> Self {
        Self::Child {
            near: Box::new(near),
            far: Box::new(far),
        }
    }

    /// See [`Selector::AnchorAnywhere`].
    #[must_use]
    pub fn anchor_anywhere(inner: Self) -> Self {
        Self::AnchorAnywhere(Box::new(inner))
    }

    /// See [`Selector::Alternation`].
    #[must_use]
    pub const fn alternation(branches: Vec<Self>) -> Self {
        Self::Alternation(branches)
    }

    /// Match this node against `chain`, starting at `index`.
    ///
    /// Never panics: indices past the end of the chain (and empty chains)
    /// simply fail to match an element.
    ///
    /// The descendant combinator backtracks over every deeper index, so a
    /// selector with many descendant combinators costs up to
    /// O(chain length ^ combinators) on adversarial chains.
    #[must_use]
    pub fn matches(&self, chain: &[Element], index: usize, options: MatchOptions) -> bool {
        match self {
            Self::Element(test) => test.matches(chain, index),

            Self::Child { near, far } => {
                near.matches(chain, index, options)
                    && index
                        .checked_add(1)
                        .is_some_and(|next| far.matches(chain, next, options))
            }

            Self::Descendant { near, far } => {
                near.matches(chain, index, options)
                    && (index.saturating_add(1)..chain.len())
                        .any(|deeper| far.matches(chain, deeper, options))
            }

            Self::AnchorAnywhere(inner) => {
                if options.match_anywhere {
                    (0..chain.len()).any(|start| inner.matches(chain, start, options))
                } else {
                    inner.matches(chain, 0, options)
                }
            }

            Self::AnchorLast => options.match_children || index == chain.len(),

            Self::Alternation(branches) => branches
                .iter()
                .any(|branch| branch.matches(chain, index, options)),
        }
    }

    /// Match from index 0 with [`MatchOptions::default`]: true when the last
    /// element of `chain` is selected.
    #[must_use]
    pub fn is_match(&self, chain: &[Element]) -> bool {
        self.matches(chain, 0, MatchOptions::default())
    }
}

impl fmt::Display for Selector {
    /// Writes selector text that parses back to an equivalent tree with the
    /// default value decoder.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(test) => write!(f, "{test}"),
            Self::Descendant { near, far } | Self::Child { near, far }
                if matches!(**far, Self::AnchorLast) =>
            {
                write!(f, "{near}")
            }
            Self::Descendant { near, far } => write!(f, "{near} {far}"),
            Self::Child { near, far } => write!(f, "{near} > {far}"),
            Self::AnchorAnywhere(inner) => write!(f, "{inner}"),
            Self::AnchorLast => Ok(()),
            Self::Alternation(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{branch}")?;
                }
                Ok(())
            }
        }
    }
}
