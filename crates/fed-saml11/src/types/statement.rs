//! SAML 1.1 statement types.
//!
//! Statements are a closed set dispatched by element name. Callers match on
//! [`Statement`] or convert with `TryFrom`, which fails with
//! [`ParseError::TypeMismatch`] for the wrong variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Assertion, Attribute, AuthenticationMethod, Subject};
use crate::error::ParseError;

/// A statement about the subject of an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// `AuthenticationStatement`.
    Authentication(AuthenticationStatement),
    /// `AttributeStatement`.
    Attribute(AttributeStatement),
    /// `AuthorizationDecisionStatement`.
    AuthorizationDecision(AuthorizationDecisionStatement),
}

impl Statement {
    /// Returns the element name of this statement variant.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "AuthenticationStatement",
            Self::Attribute(_) => "AttributeStatement",
            Self::AuthorizationDecision(_) => "AuthorizationDecisionStatement",
        }
    }

    /// Returns the subject the statement is about.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        match self {
            Self::Authentication(s) => &s.subject,
            Self::Attribute(s) => &s.subject,
            Self::AuthorizationDecision(s) => &s.subject,
        }
    }

    /// Returns the authentication statement, if this is one.
    #[must_use]
    pub const fn as_authentication(&self) -> Option<&AuthenticationStatement> {
        match self {
            Self::Authentication(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the attribute statement, if this is one.
    #[must_use]
    pub const fn as_attribute(&self) -> Option<&AttributeStatement> {
        match self {
            Self::Attribute(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the authorization decision statement, if this is one.
    #[must_use]
    pub const fn as_authorization_decision(&self) -> Option<&AuthorizationDecisionStatement> {
        match self {
            Self::AuthorizationDecision(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! statement_try_from {
    ($variant:ident, $ty:ty, $name:literal) => {
        impl TryFrom<Statement> for $ty {
            type Error = ParseError;

            fn try_from(statement: Statement) -> Result<Self, Self::Error> {
                match statement {
                    Statement::$variant(s) => Ok(s),
                    other => Err(ParseError::TypeMismatch {
                        expected: $name,
                        actual: other.element_name(),
                    }),
                }
            }
        }

        impl From<$ty> for Statement {
            fn from(statement: $ty) -> Self {
                Self::$variant(statement)
            }
        }
    };
}

statement_try_from!(Authentication, AuthenticationStatement, "AuthenticationStatement");
statement_try_from!(Attribute, AttributeStatement, "AttributeStatement");
statement_try_from!(
    AuthorizationDecision,
    AuthorizationDecisionStatement,
    "AuthorizationDecisionStatement"
);

/// Authentication statement.
///
/// Asserts that the subject authenticated by a given method at a given time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationStatement {
    /// The authentication method URI.
    pub authentication_method: String,

    /// When the authentication took place.
    pub authentication_instant: DateTime<Utc>,

    /// The authenticated subject.
    pub subject: Subject,

    /// Where the subject authenticated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_locality: Option<SubjectLocality>,

    /// Authorities that can be queried for further statements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authority_bindings: Vec<AuthorityBinding>,
}

impl AuthenticationStatement {
    /// Returns the parsed authentication method, if it is a SAML 1.x one.
    #[must_use]
    pub fn parsed_method(&self) -> Option<AuthenticationMethod> {
        AuthenticationMethod::from_uri(&self.authentication_method)
    }
}

/// Subject locality information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLocality {
    /// IP address of the authenticating system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    /// DNS name of the authenticating system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_address: Option<String>,
}

/// Authority binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityBinding {
    /// Qualified name of the query kind the authority answers.
    pub authority_kind: String,

    /// Endpoint location.
    pub location: String,

    /// Protocol binding URI.
    pub binding: String,
}

/// Attribute statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStatement {
    /// The subject the attributes describe.
    pub subject: Subject,

    /// Attributes, in document order.
    pub attributes: Vec<Attribute>,
}

impl AttributeStatement {
    /// Finds the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.attribute_name == name)
    }
}

/// Authorization decision statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecisionStatement {
    /// The subject the decision applies to.
    pub subject: Subject,

    /// The resource URI.
    pub resource: String,

    /// The decision.
    pub decision: Decision,

    /// Actions the decision covers, in document order.
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Evidence the authority relied upon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

/// Authorization decision values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Access is permitted.
    Permit,
    /// Access is denied.
    Deny,
    /// The authority cannot decide.
    Indeterminate,
}

impl Decision {
    /// Returns the schema string for this decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Permit => "Permit",
            Self::Deny => "Deny",
            Self::Indeterminate => "Indeterminate",
        }
    }

    /// Parses a decision from its schema string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Permit" => Some(Self::Permit),
            "Deny" => Some(Self::Deny),
            "Indeterminate" => Some(Self::Indeterminate),
            _ => None,
        }
    }
}

/// An action on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The action namespace URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// The action name.
    pub value: String,
}

/// Evidence supporting an authorization decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Referenced assertion IDs, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_id_references: Vec<String>,

    /// Embedded assertions, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
}
