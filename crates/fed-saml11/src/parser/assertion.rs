//! `Assertion` parsing.

use std::io::BufRead;

use super::condition::parse_conditions;
use super::cursor::{EventCursor, StartElement};
use super::statement::{is_statement, parse_statement, unsupported};
use super::time::parse_instant;
use crate::error::{ParseError, ParseResult};
use crate::types::{Advice, Assertion, SAML1_MAJOR_VERSION, SAML1_MINOR_VERSION};

/// Schema position reached among the children of an `Assertion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Start,
    Conditions,
    Advice,
    Statements,
    Signature,
}

/// Parses an `Assertion` element whose start tag has been consumed.
///
/// Used for the document root and, recursively, for assertions embedded in
/// `Advice` and `Evidence`.
pub(crate) fn parse_assertion<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Assertion> {
    let major = element.required_attr("MajorVersion")?;
    let minor = element.required_attr("MinorVersion")?;
    let id = element.required_attr("AssertionID")?;
    let issuer = element.required_attr("Issuer")?;
    let issue_instant = element.required_attr("IssueInstant")?;

    let major_version = parse_version(element, "MajorVersion", &major)?;
    let minor_version = parse_version(element, "MinorVersion", &minor)?;
    if major_version != SAML1_MAJOR_VERSION || minor_version != SAML1_MINOR_VERSION {
        return Err(ParseError::UnsupportedVersion {
            major: major_version,
            minor: minor_version,
        });
    }
    let issue_instant = parse_instant(&issue_instant)?;

    let mut assertion = Assertion {
        major_version,
        minor_version,
        id,
        issuer,
        issue_instant,
        conditions: None,
        advice: None,
        statements: Vec::new(),
        signature: None,
    };

    let mut stage = Stage::Start;
    while let Some(child) = cursor.next_child(element)? {
        let next = if child.is_saml("Conditions") {
            Stage::Conditions
        } else if child.is_saml("Advice") {
            Stage::Advice
        } else if is_statement(&child) {
            Stage::Statements
        } else if child.is_dsig("Signature") {
            Stage::Signature
        } else {
            cursor.reject_or_skip(&child, unsupported(&child))?;
            continue;
        };

        if next < stage {
            return Err(child.out_of_order_in(element));
        }
        if next == stage && next != Stage::Statements {
            return Err(child.duplicate_in(element));
        }
        stage = next;

        match next {
            Stage::Conditions => {
                assertion.conditions = Some(parse_conditions(cursor, &child)?);
            }
            Stage::Advice => assertion.advice = Some(parse_advice(cursor, &child)?),
            Stage::Statements => assertion.statements.push(parse_statement(cursor, &child)?),
            Stage::Signature => assertion.signature = Some(cursor.capture_element(&child)?),
            Stage::Start => {}
        }
    }

    Ok(assertion)
}

fn parse_version(element: &StartElement, attribute: &str, value: &str) -> ParseResult<u32> {
    value
        .parse()
        .map_err(|_| element.invalid_attr(attribute, value))
}

fn parse_advice<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Advice> {
    let mut advice = Advice::default();
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("AssertionIDReference") {
            advice
                .assertion_id_references
                .push(cursor.read_text(&child)?);
        } else if child.is_saml("Assertion") {
            advice.assertions.push(parse_assertion(cursor, &child)?);
        } else if child.is_saml_namespace() {
            cursor.reject_or_skip(&child, child.unsupported())?;
        } else {
            advice.other.push(cursor.capture_element(&child)?);
        }
    }
    Ok(advice)
}
