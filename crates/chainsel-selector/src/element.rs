use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// One level of an ancestor chain: an element name and its attributes.
///
/// An ancestor chain is a slice `&[Element]` ordered from the outermost
/// ancestor (index 0) to the element under test (last index). Matching only
/// ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// The element's tag name, e.g. `div`. Compared case-sensitively.
    pub name: String,
    /// The element's attributes.
    #[serde(default)]
    pub attributes: AttributesMap,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributesMap::new(),
        }
    }

    /// Builder-style setter for one attribute, replacing any previous value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// The value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
