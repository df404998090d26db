//! SAML 1.1 subject types.

use serde::{Deserialize, Serialize};

use super::{AttributeValue, ConfirmationMethod, NameIdentifierFormat, XmlFragment};

/// Subject of a statement.
///
/// The schema describes `NameIdentifier` and `SubjectConfirmation` as a
/// choice, but assertions in the wild carry both, so they are modeled as
/// two independent optionals. Either, both or neither may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// The name identifier for the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_identifier: Option<NameIdentifier>,

    /// How the relying party may confirm the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_confirmation: Option<SubjectConfirmation>,
}

impl Subject {
    /// Creates a subject identified by name.
    #[must_use]
    pub fn new(name_identifier: NameIdentifier) -> Self {
        Self {
            name_identifier: Some(name_identifier),
            subject_confirmation: None,
        }
    }

    /// Sets the subject confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: SubjectConfirmation) -> Self {
        self.subject_confirmation = Some(confirmation);
        self
    }

    /// Returns the name identifier value, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name_identifier.as_ref().map(|n| n.value.as_str())
    }
}

/// SAML 1.1 `NameIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIdentifier {
    /// The identifier value.
    pub value: String,

    /// The format URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// The security or administrative domain that qualifies the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_qualifier: Option<String>,
}

impl NameIdentifier {
    /// Creates a name identifier with no format.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: None,
            name_qualifier: None,
        }
    }

    /// Sets the format.
    #[must_use]
    pub fn with_format(mut self, format: NameIdentifierFormat) -> Self {
        self.format = Some(format.uri().to_string());
        self
    }

    /// Returns the parsed format, if it is one of the SAML 1.1 formats.
    #[must_use]
    pub fn parsed_format(&self) -> Option<NameIdentifierFormat> {
        self.format.as_deref().and_then(NameIdentifierFormat::from_uri)
    }
}

/// SAML 1.1 `SubjectConfirmation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfirmation {
    /// Confirmation method URIs, in document order. Never empty.
    pub confirmation_methods: Vec<String>,

    /// `SubjectConfirmationData`, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_data: Option<AttributeValue>,

    /// `ds:KeyInfo` for holder-of-key confirmation, uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_info: Option<XmlFragment>,
}

impl SubjectConfirmation {
    /// Creates a confirmation with a single method.
    #[must_use]
    pub fn new(method: ConfirmationMethod) -> Self {
        Self {
            confirmation_methods: vec![method.uri().to_string()],
            confirmation_data: None,
            key_info: None,
        }
    }

    /// Returns whether `method` is among the confirmation methods.
    #[must_use]
    pub fn has_method(&self, method: ConfirmationMethod) -> bool {
        self.confirmation_methods
            .iter()
            .any(|m| ConfirmationMethod::from_uri(m) == Some(method))
    }
}
