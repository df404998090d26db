//! SAML 1.1 types and data structures.
//!
//! This module contains the object graph produced by the parser: the
//! assertion, its conditions, statements, subjects and attributes.

mod assertion;
mod attribute;
mod constants;
mod statement;
mod subject;

pub use assertion::*;
pub use attribute::*;
pub use constants::*;
pub use statement::*;
pub use subject::*;
