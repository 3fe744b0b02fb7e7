//! The selector parser.
//!
//! Parsing runs in two phases per comma-separated clause:
//!
//! 1. **Scanning** reads compound selectors (`div.note[lang="en"]`) and the
//!    separators between them, pushing each compound onto an operand stack
//!    and each combinator onto a pending stack.
//! 2. **Assembly** pushes an [`Selector::AnchorLast`] sentinel on the operand
//!    stack, brackets the pending stack with an anchor at the bottom and a
//!    child combinator at the top, then repeatedly pops one pending entry and
//!    its operands and pushes the node it builds. The rightmost combinator is
//!    therefore resolved first and the tree nests to the right:
//!
//! ```text
//! a b > c
//!   operands: [a, b, c, Last]      pending: [Anywhere, Descendant, Child, Child]
//!   Child       -> [a, b, Child(c, Last)]
//!   Child       -> [a, Child(b, Child(c, Last))]
//!   Descendant  -> [Descendant(a, Child(b, Child(c, Last)))]
//!   Anywhere    -> [AnchorAnywhere(Descendant(...))]
//! ```

use std::mem;
use std::str::FromStr;

use strum_macros::Display;

use crate::attribute::{AttributeMatcher, read_attribute_selector};
use crate::error::ParseError;
use crate::scan::{
    Scanner, Unescape, is_identifier_char, is_identifier_start, is_separator_char, strip,
};
use crate::selector::{ElementTest, Selector};

/// An entry of the pending stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Reduction {
    /// Whitespace between two compounds.
    #[strum(serialize = "descendant combinator")]
    Descendant,
    /// `>` between two compounds, and the link to the trailing sentinel.
    #[strum(serialize = "child combinator")]
    Child,
    /// The wrapper around a whole clause.
    #[strum(serialize = "anchor")]
    AnchorAnywhere,
}

impl Reduction {
    /// Pop this entry's operands (the far side first) and build its node.
    /// Returns `None` if the operand stack runs dry.
    fn reduce(self, operands: &mut Vec<Selector>) -> Option<Selector> {
        match self {
            Self::Descendant => {
                let far = operands.pop()?;
                let near = operands.pop()?;
                Some(Selector::descendant(near, far))
            }
            Self::Child => {
                let far = operands.pop()?;
                let near = operands.pop()?;
                Some(Selector::child(near, far))
            }
            Self::AnchorAnywhere => operands.pop().map(Selector::anchor_anywhere),
        }
    }
}

/// Parse selector text into a matcher tree.
///
/// Leading and trailing spaces are ignored (tabs and newlines are not). A
/// comma-separated list becomes a [`Selector::Alternation`] of its clauses;
/// a single clause is returned as is. Quoted attribute values are decoded
/// with [`chainsel_html::unescape`].
///
/// # Errors
///
/// Returns a [`ParseError`] on empty input and on the first grammar violation.
///
/// # Example
/// ```ignore
/// let selector = parse_selector("nav > a.active, a[aria-current]")?;
/// ```
pub fn parse_selector(source: &str) -> Result<Selector, ParseError> {
    parse_selector_with(source, chainsel_html::unescape)
}

/// [`parse_selector`] with a caller-supplied decoder for quoted attribute
/// values.
///
/// # Errors
///
/// Same as [`parse_selector`].
pub fn parse_selector_with(source: &str, unescape: Unescape) -> Result<Selector, ParseError> {
    let (start, end) = strip(source);
    if start >= end {
        return Err(ParseError::new("selector is empty", source, start));
    }
    SelectorParser::new(Scanner::new(source, end, unescape)).parse(start)
}

impl FromStr for Selector {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse_selector(source)
    }
}

/// Scanning state for one call to [`parse_selector_with`].
struct SelectorParser<'a> {
    scanner: Scanner<'a>,
    /// Roots of the clauses finished so far.
    clauses: Vec<Selector>,
    /// Operand stack of the current clause.
    compounds: Vec<ElementTest>,
    /// Pending combinators of the current clause, one fewer than `compounds`.
    combinators: Vec<Reduction>,
}

impl<'a> SelectorParser<'a> {
    const fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            clauses: Vec::new(),
            compounds: Vec::new(),
            combinators: Vec::new(),
        }
    }

    fn parse(mut self, start: usize) -> Result<Selector, ParseError> {
        let end = self.scanner.end();
        let mut index = start;
        loop {
            let (compound, next) = self.read_compound(index)?;
            self.compounds.push(compound);
            index = next;

            if index >= end {
                self.finish_clause(index)?;
                break;
            }
            index = self.read_separator(index)?;
        }

        match self.clauses.len() {
            0 => Err(self.scanner.error("no selector could be built", start)),
            1 => Ok(self.clauses.swap_remove(0)),
            _ => Ok(Selector::alternation(self.clauses)),
        }
    }

    /// Read a tag followed by any number of `.class`, `#id` and `[...]` tests.
    fn read_compound(&self, start: usize) -> Result<(ElementTest, usize), ParseError> {
        let (tag, mut index) = self.read_tag(start)?;
        let mut attributes = Vec::new();

        loop {
            let matcher = match self.scanner.peek(index) {
                Some(b'.') => {
                    let (class, next) = self.read_identifier(index + 1, "class name")?;
                    index = next;
                    AttributeMatcher::ContainsToken("class".to_string(), class.to_string())
                }
                Some(b'#') => {
                    let (id, next) = self.read_identifier(index + 1, "id")?;
                    index = next;
                    AttributeMatcher::Equals("id".to_string(), id.to_string())
                }
                Some(b'[') => {
                    let (matcher, next) = read_attribute_selector(&self.scanner, index)?;
                    index = next;
                    matcher
                }
                _ => break,
            };
            attributes.push(matcher);
        }

        if index == start {
            return Err(self.scanner.error(
                format!(
                    "expected a tag name, '*', '.', '#' or '[', found {}",
                    self.scanner.describe(start)
                ),
                start,
            ));
        }
        Ok((ElementTest::new(tag, attributes), index))
    }

    /// `*` reads as the empty (universal) tag. Anything that cannot start a
    /// tag name also yields the empty tag, without consuming input.
    fn read_tag(&self, start: usize) -> Result<(&'a str, usize), ParseError> {
        match self.scanner.peek(start) {
            None => Err(self.scanner.end_of_data(start)),
            Some(b'*') => Ok(("", start + 1)),
            Some(b) if is_identifier_start(b) => {
                let end = self.scanner.skip_while(start + 1, is_identifier_char);
                Ok((self.scanner.slice(start, end), end))
            }
            Some(_) => Ok(("", start)),
        }
    }

    fn read_identifier(&self, start: usize, what: &str) -> Result<(&'a str, usize), ParseError> {
        self.scanner
            .read_name(start, is_identifier_start, is_identifier_char, what)
    }

    /// Read the run of spaces, `>` and `,` after a compound and act on it.
    fn read_separator(&mut self, start: usize) -> Result<usize, ParseError> {
        let end = self.scanner.skip_while(start, is_separator_char);
        if end == start {
            return Err(self.scanner.error(
                format!(
                    "expected a combinator or ',' after compound selector, found {}",
                    self.scanner.describe(start)
                ),
                start,
            ));
        }

        let separator = self.scanner.slice(start, end);
        match separator.trim_matches(' ') {
            "" => self.combinators.push(Reduction::Descendant),
            ">" => self.combinators.push(Reduction::Child),
            "," => self.finish_clause(end)?,
            _ => {
                return Err(self
                    .scanner
                    .error(format!("unknown separator: {separator:?}"), start));
            }
        }
        Ok(end)
    }

    /// Assemble the current clause and start a fresh one.
    fn finish_clause(&mut self, offset: usize) -> Result<(), ParseError> {
        let compounds = mem::take(&mut self.compounds);
        let combinators = mem::take(&mut self.combinators);
        let root = self.build(compounds, combinators, offset)?;
        self.clauses.push(root);
        Ok(())
    }

    fn build(
        &self,
        compounds: Vec<ElementTest>,
        combinators: Vec<Reduction>,
        offset: usize,
    ) -> Result<Selector, ParseError> {
        if compounds.is_empty() {
            return Err(self
                .scanner
                .error("no element selector to build a clause from", offset));
        }

        let mut operands: Vec<Selector> = compounds.into_iter().map(Selector::Element).collect();
        operands.push(Selector::AnchorLast);

        let mut pending = Vec::with_capacity(combinators.len() + 2);
        pending.push(Reduction::AnchorAnywhere);
        pending.extend(combinators);
        pending.push(Reduction::Child);

        while let Some(reduction) = pending.pop() {
            let Some(node) = reduction.reduce(&mut operands) else {
                return Err(self
                    .scanner
                    .error(format!("no operand left for {reduction}"), offset));
            };
            operands.push(node);
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(self.scanner.error(
                "combinators and compound selectors do not pair up",
                offset,
            )),
        }
    }
}
