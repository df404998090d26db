//! SAML 1.1 Assertion parsing.
//!
//! This crate turns a standalone SAML 1.1 `<saml:Assertion>` document into a
//! strongly typed, immutable object graph:
//!
//! - **Assertion envelope** - versions, identifier, issuer, issue instant,
//!   conditions, advice and an opaque enveloped signature
//! - **Statements** - authentication, attribute and authorization decision
//!   statements as a closed enum, in document order
//! - **Conditions** - validity window, audience restrictions and
//!   `DoNotCache`
//! - **Subjects** - name identifier and subject confirmation
//!
//! Signature verification, trust evaluation and condition enforcement are
//! left to the caller. The parser only reports what the document says.
//!
//! # Architecture
//!
//! - [`parser`] - the pull parser and [`parse_instant`]
//! - [`types`] - the assertion object graph and SAML 1.x constants
//! - [`config`] - parser configuration
//! - [`error`] - error types for parse failures
//!
//! # Example
//!
//! ```rust,ignore
//! use fed_saml11::{parse_assertion, Statement};
//!
//! let assertion = parse_assertion(xml)?;
//! for statement in &assertion.statements {
//!     if let Statement::Attribute(stmt) = statement {
//!         println!("{:?}", stmt.attribute("uid"));
//!     }
//! }
//! ```
//!
//! # SAML Specifications
//!
//! - [SAML 1.1 Core](https://www.oasis-open.org/committees/download.php/3406/oasis-sstc-saml-core-1.1.pdf)
//! - [XML Signature](https://www.w3.org/TR/xmldsig-core1/)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod parser;
pub mod types;

pub use config::{ParserConfig, UnknownElementPolicy};
pub use error::{ParseError, ParseResult};
pub use parser::{parse_instant, Saml11Parser};
pub use types::*;

/// Parses a SAML 1.1 assertion with the default configuration.
///
/// Shorthand for `Saml11Parser::new().parse_str(xml)`.
pub fn parse_assertion(xml: &str) -> ParseResult<Assertion> {
    Saml11Parser::new().parse_str(xml)
}
