//! SAML 1.1 attribute types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque XML markup captured from the document.
///
/// The parser re-serializes the events it saw, so the text is
/// namespace-well-formed but not byte-identical to the input. Declarations
/// inherited from ancestors are added to the fragment root for every prefix
/// the fragment uses, and comments are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XmlFragment(String);

impl XmlFragment {
    /// Wraps already-serialized markup.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fragment, returning the markup.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for XmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single `AttributeValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Plain character content.
    Text(String),
    /// Content containing nested elements, kept uninterpreted.
    Xml(XmlFragment),
}

impl AttributeValue {
    /// Returns the text if this is a plain text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Xml(_) => None,
        }
    }

    /// Returns the fragment if this value holds nested markup.
    #[must_use]
    pub const fn as_xml(&self) -> Option<&XmlFragment> {
        match self {
            Self::Text(_) => None,
            Self::Xml(fragment) => Some(fragment),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// SAML 1.1 Attribute.
///
/// A named, namespaced, multi-valued claim about the subject. Values keep
/// document order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The `AttributeName`.
    pub attribute_name: String,

    /// The `AttributeNamespace` URI.
    pub attribute_namespace: String,

    /// The values, in document order.
    pub values: Vec<AttributeValue>,
}

impl Attribute {
    /// Creates an attribute with no values.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            attribute_name: name.into(),
            attribute_namespace: namespace.into(),
            values: Vec::new(),
        }
    }

    /// Adds a text value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(AttributeValue::Text(value.into()));
        self
    }

    /// Returns whether any text value equals `value`.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.as_text() == Some(value))
    }

    /// Iterates over the text values, skipping structured ones.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(AttributeValue::as_text)
    }
}
