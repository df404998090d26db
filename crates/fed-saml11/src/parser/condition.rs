//! `Conditions` parsing.
//!
//! Condition elements are dispatched by name. An unrecognized condition is
//! always an error, whatever the unknown-element policy: silently dropping
//! a restriction would widen the assertion's validity.

use std::io::BufRead;

use super::cursor::{EventCursor, StartElement};
use super::time::parse_instant;
use crate::error::{ParseError, ParseResult};
use crate::types::{AudienceRestrictionCondition, Condition, Conditions};

/// Parses a `Conditions` element whose start tag has been consumed.
pub(crate) fn parse_conditions<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Conditions> {
    // Present but blank is an invalid instant, not an open window.
    let not_before = element.attr("NotBefore").map(parse_instant).transpose()?;
    let not_on_or_after = element.attr("NotOnOrAfter").map(parse_instant).transpose()?;

    let mut conditions = Vec::new();
    while let Some(child) = cursor.next_child(element)? {
        conditions.push(parse_condition(cursor, &child)?);
    }

    Ok(Conditions {
        not_before,
        not_on_or_after,
        conditions,
    })
}

fn parse_condition<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Condition> {
    if element.is_saml("AudienceRestrictionCondition") {
        parse_audience_restriction(cursor, element).map(Condition::AudienceRestriction)
    } else if element.is_saml("DoNotCacheCondition") {
        cursor.read_empty(element)?;
        Ok(Condition::DoNotCache)
    } else {
        Err(ParseError::UnsupportedConditionType {
            name: element.local_name.clone(),
            position: element.position,
        })
    }
}

fn parse_audience_restriction<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<AudienceRestrictionCondition> {
    let mut audiences = Vec::new();
    while let Some(child) = cursor.next_child(element)? {
        if !child.is_saml("Audience") {
            return Err(child.unsupported());
        }
        audiences.push(cursor.read_text(&child)?);
    }

    if audiences.is_empty() {
        return Err(cursor.missing_child("Audience", element));
    }

    Ok(AudienceRestrictionCondition { audiences })
}
