//! `Attribute` parsing.

use std::io::BufRead;

use super::cursor::{EventCursor, StartElement};
use crate::error::ParseResult;
use crate::types::Attribute;

/// Parses an `Attribute` element whose start tag has been consumed.
pub(crate) fn parse_attribute<R: BufRead>(
    cursor: &mut EventCursor<R>,
    element: &StartElement,
) -> ParseResult<Attribute> {
    let attribute_name = element.required_attr("AttributeName")?;
    let attribute_namespace = element.required_attr("AttributeNamespace")?;

    let mut values = Vec::new();
    while let Some(child) = cursor.next_child(element)? {
        if child.is_saml("AttributeValue") {
            values.push(cursor.read_content(&child)?);
        } else {
            cursor.reject_or_skip(&child, child.unsupported())?;
        }
    }

    if values.is_empty() {
        return Err(cursor.missing_child("AttributeValue", element));
    }

    Ok(Attribute {
        attribute_name,
        attribute_namespace,
        values,
    })
}
