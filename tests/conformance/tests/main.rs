//! SAML 1.1 Assertion Conformance Test Suite
//!
//! Fixture-driven tests that parse complete assertion documents from
//! `fixtures/saml1/` and check the resulting object graph.
//!
//! ## Test Groups
//!
//! - Scenarios (the reference assertions and their expected graphs)
//! - Properties (determinism, ordering, timestamp equality)
//! - Errors (required attributes, versions, unknown statements)
//! - Policy (unknown-element handling, document type declarations, depth)
//! - Extensions (advice, signature, `DoNotCache`, key info)
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p saml11-conformance-tests
//! RUST_LOG=fed_saml11=debug cargo test -p saml11-conformance-tests policy
//! ```

mod errors;
mod properties;
mod scenarios;
