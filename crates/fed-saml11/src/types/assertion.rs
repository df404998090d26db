//! SAML 1.1 Assertion types.
//!
//! An assertion is a package of statements made by an issuer about one or
//! more subjects, optionally constrained by conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AttributeStatement, AuthenticationStatement, AuthorizationDecisionStatement, Statement,
    XmlFragment,
};
use crate::error::ParseError;

/// SAML 1.1 Assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// `MajorVersion`; always 1 after a successful parse.
    pub major_version: u32,

    /// `MinorVersion`; always 1 after a successful parse.
    pub minor_version: u32,

    /// The `AssertionID`.
    pub id: String,

    /// The issuer.
    pub issuer: String,

    /// When the assertion was issued.
    pub issue_instant: DateTime<Utc>,

    /// Conditions limiting the validity of the assertion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,

    /// Additional information the issuer chose to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<Advice>,

    /// Statements, in document order.
    #[serde(default)]
    pub statements: Vec<Statement>,

    /// The enveloped `ds:Signature`, uninterpreted and unverified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<XmlFragment>,
}

impl Assertion {
    /// Iterates over the authentication statements.
    pub fn authentication_statements(&self) -> impl Iterator<Item = &AuthenticationStatement> {
        self.statements.iter().filter_map(Statement::as_authentication)
    }

    /// Iterates over the attribute statements.
    pub fn attribute_statements(&self) -> impl Iterator<Item = &AttributeStatement> {
        self.statements.iter().filter_map(Statement::as_attribute)
    }

    /// Iterates over the authorization decision statements.
    pub fn authorization_decision_statements(
        &self,
    ) -> impl Iterator<Item = &AuthorizationDecisionStatement> {
        self.statements
            .iter()
            .filter_map(Statement::as_authorization_decision)
    }

    /// Returns whether the assertion carries an enveloped signature.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Conditions for assertion validity.
///
/// The parser only records these; evaluating them against the clock or the
/// relying party is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Time before which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,

    /// Time at or after which the assertion is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_on_or_after: Option<DateTime<Utc>>,

    /// Condition elements, in document order.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Conditions {
    /// Iterates over every audience of every audience restriction.
    pub fn audiences(&self) -> impl Iterator<Item = &str> {
        self.conditions
            .iter()
            .filter_map(Condition::as_audience_restriction)
            .flat_map(|c| c.audiences.iter().map(String::as_str))
    }

    /// Returns whether a `DoNotCacheCondition` is present.
    #[must_use]
    pub fn do_not_cache(&self) -> bool {
        self.conditions.contains(&Condition::DoNotCache)
    }
}

/// A single condition element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// `AudienceRestrictionCondition`.
    AudienceRestriction(AudienceRestrictionCondition),
    /// `DoNotCacheCondition`.
    DoNotCache,
}

impl Condition {
    /// Returns the element name of this condition variant.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::AudienceRestriction(_) => "AudienceRestrictionCondition",
            Self::DoNotCache => "DoNotCacheCondition",
        }
    }

    /// Returns the audience restriction, if this is one.
    #[must_use]
    pub const fn as_audience_restriction(&self) -> Option<&AudienceRestrictionCondition> {
        match self {
            Self::AudienceRestriction(c) => Some(c),
            Self::DoNotCache => None,
        }
    }
}

impl TryFrom<Condition> for AudienceRestrictionCondition {
    type Error = ParseError;

    fn try_from(condition: Condition) -> Result<Self, Self::Error> {
        match condition {
            Condition::AudienceRestriction(c) => Ok(c),
            other => Err(ParseError::TypeMismatch {
                expected: "AudienceRestrictionCondition",
                actual: other.element_name(),
            }),
        }
    }
}

/// Audience restriction condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceRestrictionCondition {
    /// Audience URIs, in document order.
    pub audiences: Vec<String>,
}

/// Assertion advice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// Referenced assertion IDs, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_id_references: Vec<String>,

    /// Embedded assertions, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,

    /// Advice from other namespaces, uninterpreted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<XmlFragment>,
}
