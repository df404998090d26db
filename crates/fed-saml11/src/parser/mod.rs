//! SAML 1.1 assertion parser.
//!
//! The parser pulls events from a namespace-aware `quick_xml` reader and
//! builds the [`Assertion`] graph in a single pass. Parsing is
//! all-or-nothing: any error aborts the call and no partial result is
//! returned.

mod assertion;
mod attribute;
mod condition;
mod cursor;
mod statement;
mod subject;
mod time;

use std::io::BufRead;

pub use time::parse_instant;

use crate::config::ParserConfig;
use crate::error::{ParseError, ParseResult};
use crate::types::Assertion;
use cursor::{is_blank, EventCursor, XmlEvent};

/// Parser for standalone SAML 1.1 `Assertion` documents.
///
/// Holds only its configuration; every call owns its own reader state, so a
/// single parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Saml11Parser {
    config: ParserConfig,
}

impl Saml11Parser {
    /// Creates a parser with the strict default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an assertion from a string.
    pub fn parse_str(&self, xml: &str) -> ParseResult<Assertion> {
        self.parse_reader(xml.as_bytes())
    }

    /// Parses an assertion from raw bytes.
    pub fn parse_bytes(&self, xml: &[u8]) -> ParseResult<Assertion> {
        self.parse_reader(xml)
    }

    /// Parses an assertion from a buffered reader.
    ///
    /// The reader is consumed up to the end tag of the root element; any
    /// trailing content is left unread.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> ParseResult<Assertion> {
        tracing::debug!(
            unknown_elements = self.config.unknown_elements.as_str(),
            "Parsing SAML 1.1 assertion"
        );

        let mut cursor = EventCursor::new(source, &self.config);
        match parse_document(&mut cursor) {
            Ok(assertion) => {
                tracing::debug!(
                    assertion_id = %assertion.id,
                    issuer = %assertion.issuer,
                    statements = assertion.statements.len(),
                    "Parsed SAML 1.1 assertion"
                );
                Ok(assertion)
            }
            Err(e) => {
                tracing::debug!(kind = e.kind(), "SAML 1.1 assertion rejected: {}", e);
                Err(e)
            }
        }
    }
}

fn parse_document<R: BufRead>(cursor: &mut EventCursor<R>) -> ParseResult<Assertion> {
    loop {
        match cursor.next_event()? {
            XmlEvent::Start(root) if root.is_saml("Assertion") => {
                return assertion::parse_assertion(cursor, &root);
            }
            XmlEvent::Start(root) => return Err(root.unsupported()),
            XmlEvent::Eof => {
                return Err(ParseError::MissingRequiredElement {
                    element: "Assertion".to_string(),
                    parent: "document".to_string(),
                    position: cursor.position(),
                })
            }
            XmlEvent::Text(text) if is_blank(&text) => {}
            XmlEvent::Text(_) | XmlEvent::End(_) => {
                return Err(ParseError::malformed(
                    "content before the root element",
                    cursor.position(),
                ))
            }
        }
    }
}
