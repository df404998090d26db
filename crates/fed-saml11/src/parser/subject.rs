//! `Subject` parsing.

use std::io::BufRead;

use super::cursor::{EventCursor, StartElement};
use crate::error::ParseResult;
use crate::types::{NameIdentifier, Subject, SubjectConfirmation};

/// Parses a `Subject` element whose start tag has been consumed.
///
/// `NameIdentifier` and `SubjectConfirmation` are each optional, in that
/// order. A subject with neither is accepted here; whether that is usable
/// is the relying party's decision.
pub(crate) fn parse_subject<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Subject> {
    let mut subject = Subject::default();

    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("NameIdentifier") {
            if subject.name_identifier.is_some() {
                return Err(child.duplicate_in(element));
            }
            if subject.subject_confirmation.is_some() {
                return Err(child.out_of_order_in(element));
            }
            subject.name_identifier = Some(parse_name_identifier(cursor, &child)?);
        } else if child.is_saml("SubjectConfirmation") {
            if subject.subject_confirmation.is_some() {
                return Err(child.duplicate_in(element));
            }
            subject.subject_confirmation = Some(parse_subject_confirmation(cursor, &child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    Ok(subject)
}

fn parse_name_identifier<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<NameIdentifier> {
    let format = element.optional_attr("Format");
    let name_qualifier = element.optional_attr("NameQualifier");
    let value = cursor.read_text(element)?;

    Ok(NameIdentifier {
        value,
        format,
        name_qualifier,
    })
}

fn parse_subject_confirmation<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<SubjectConfirmation> {
    let mut confirmation_methods = Vec::new();
    let mut confirmation_data = None;
    let mut key_info = None;

    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("ConfirmationMethod") {
            if confirmation_data.is_some() || key_info.is_some() {
                return Err(child.out_of_order_in(element));
            }
            confirmation_methods.push(cursor.read_text(&child)?);
        } else if child.is_saml("SubjectConfirmationData") {
            if confirmation_data.is_some() {
                return Err(child.duplicate_in(element));
            }
            if key_info.is_some() {
                return Err(child.out_of_order_in(element));
            }
            confirmation_data = Some(cursor.read_content(&child)?);
        } else if child.is_dsig("KeyInfo") {
            if key_info.is_some() {
                return Err(child.duplicate_in(element));
            }
            key_info = Some(cursor.capture_element(&child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    if confirmation_methods.is_empty() {
        return Err(cursor.missing_child("ConfirmationMethod", element));
    }

    Ok(SubjectConfirmation {
        confirmation_methods,
        confirmation_data,
        key_info,
    })
}
