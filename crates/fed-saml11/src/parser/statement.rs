//! Statement dispatch and parsing.
//!
//! Every statement variant begins with exactly one `Subject`.

use std::io::BufRead;

use super::assertion::parse_assertion;
use super::attribute::parse_attribute;
use super::cursor::{EventCursor, StartElement};
use super::subject::parse_subject;
use super::time::parse_instant;
use crate::error::{ParseError, ParseResult};
use crate::types::{
    Action, AttributeStatement, AuthenticationStatement, AuthorityBinding,
    AuthorizationDecisionStatement, Decision, Evidence, Statement, Subject, SubjectLocality,
};

/// Statement element names this parser understands.
const STATEMENT_ELEMENTS: [&str; 3] = [
    "AuthenticationStatement",
    "AttributeStatement",
    "AuthorizationDecisionStatement",
];

/// Returns whether `element` is a supported statement.
pub(crate) fn is_statement(element: &StartElement) -> bool {
    STATEMENT_ELEMENTS.iter().any(|name| element.is_saml(name))
}

/// Returns the error for an element that is neither a supported statement
/// nor another known child of `Assertion`.
///
/// Statement-like names, including the abstract `Statement` and
/// `SubjectStatement` extension points, are reported as unsupported
/// statement types.
pub(crate) fn unsupported(element: &StartElement) -> ParseError {
    if element.local_name.ends_with("Statement") {
        ParseError::UnsupportedStatementType {
            name: element.local_name.clone(),
            position: element.position,
        }
    } else {
        element.unsupported()
    }
}

/// Parses a statement element accepted by [`is_statement`].
pub(crate) fn parse_statement<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Statement> {
    match element.local_name.as_str() {
        "AuthenticationStatement" => {
            parse_authentication_statement(cursor, element).map(Statement::Authentication)
        }
        "AttributeStatement" => {
            parse_attribute_statement(cursor, element).map(Statement::Attribute)
        }
        "AuthorizationDecisionStatement" => {
            parse_authorization_decision_statement(cursor, element)
                .map(Statement::AuthorizationDecision)
        }
        _ => Err(unsupported(element)),
    }
}

/// Reads the leading `Subject` child of a statement.
///
/// `followers` names the statement's other SAML children: meeting one of
/// them first means the `Subject` is missing. Any other element ahead of
/// the `Subject` goes through the unknown-element policy.
fn parse_leading_subject<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
    followers: &[&str],
) -> ParseResult<Subject> {
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("Subject") {
            return parse_subject(cursor, &child);
        }
        if followers.iter().any(|name| child.is_saml(name)) {
            break;
        }
        cursor.reject_or_skip(&child, child.unsupported())?;
    }
    Err(cursor.missing_child("Subject", element))
}

fn parse_authentication_statement<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<AuthenticationStatement> {
    let authentication_method = element.required_attr("AuthenticationMethod")?;
    let authentication_instant = parse_instant(&element.required_attr("AuthenticationInstant")?)?;
    let subject =
        parse_leading_subject(cursor, element, &["SubjectLocality", "AuthorityBinding"])?;

    let mut subject_locality = None;
    let mut authority_bindings = Vec::new();
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("SubjectLocality") {
            if subject_locality.is_some() {
                return Err(child.duplicate_in(element));
            }
            if !authority_bindings.is_empty() {
                return Err(child.out_of_order_in(element));
            }
            subject_locality = Some(SubjectLocality {
                ip_address: child.optional_attr("IPAddress"),
                dns_address: child.optional_attr("DNSAddress"),
            });
            cursor.read_empty(&child)?;
        } else if child.is_saml("AuthorityBinding") {
            authority_bindings.push(AuthorityBinding {
                authority_kind: child.required_attr("AuthorityKind")?,
                location: child.required_attr("Location")?,
                binding: child.required_attr("Binding")?,
            });
            cursor.read_empty(&child)?;
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    Ok(AuthenticationStatement {
        authentication_method,
        authentication_instant,
        subject,
        subject_locality,
        authority_bindings,
    })
}

fn parse_attribute_statement<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<AttributeStatement> {
    let subject = parse_leading_subject(cursor, element, &["Attribute"])?;

    let mut attributes = Vec::new();
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("Attribute") {
            attributes.push(parse_attribute(cursor, &child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    if attributes.is_empty() {
        return Err(cursor.missing_child("Attribute", element));
    }

    Ok(AttributeStatement {
        subject,
        attributes,
    })
}

fn parse_authorization_decision_statement<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<AuthorizationDecisionStatement> {
    // An empty Resource is legal and refers to the enclosing resource.
    let resource = element
        .attr("Resource")
        .map(|r| r.trim().to_string())
        .ok_or_else(|| element.missing_attr("Resource"))?;
    let raw_decision = element.required_attr("Decision")?;
    let decision = Decision::parse(&raw_decision)
        .ok_or_else(|| element.invalid_attr("Decision", &raw_decision))?;
    let subject = parse_leading_subject(cursor, element, &["Action", "Evidence"])?;

    let mut actions = Vec::new();
    let mut evidence = None;
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("Action") {
            if evidence.is_some() {
                return Err(child.out_of_order_in(element));
            }
            actions.push(Action {
                namespace: child.optional_attr("Namespace"),
                value: cursor.read_text(&child)?,
            });
        } else if child.is_saml("Evidence") {
            if evidence.is_some() {
                return Err(child.duplicate_in(element));
            }
            evidence = Some(parse_evidence(cursor, &child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    Ok(AuthorizationDecisionStatement {
        subject,
        resource,
        decision,
        actions,
        evidence,
    })
}

fn parse_evidence<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Evidence> {
    let mut evidence = Evidence::default();
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("AssertionIDReference") {
            evidence
                .assertion_id_references
                .push(cursor.read_text(&child)?);
        } else if child.is_saml("Assertion") {
            evidence.assertions.push(parse_assertion(cursor, &child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }
    Ok(evidence)
}
