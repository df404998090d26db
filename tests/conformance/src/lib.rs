//! Test harness for SAML 1.1 conformance testing.
//!
//! Locates the bundled XML fixtures and installs a test log subscriber.
//! Acquiring the document is the caller's job; the parser only sees a
//! string, a byte slice or a reader.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use fed_saml11::{Assertion, ParseResult, ParserConfig, Saml11Parser};

/// Fixture directory, relative to this crate's manifest.
pub const FIXTURE_DIR: &str = "fixtures/saml1";

/// Returns the absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE_DIR)
        .join(name)
}

/// Reads a fixture into a string.
pub fn fixture(name: &str) -> anyhow::Result<String> {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
}

/// Parses a fixture with the default configuration.
///
/// The outer `Result` covers fixture I/O; the inner one is the parse
/// outcome under test.
pub fn parse_fixture(name: &str) -> anyhow::Result<ParseResult<Assertion>> {
    parse_fixture_with(name, ParserConfig::default())
}

/// Parses a fixture by streaming it from disk.
pub fn parse_fixture_with(
    name: &str,
    config: ParserConfig,
) -> anyhow::Result<ParseResult<Assertion>> {
    init_tracing();
    let path = fixture_path(name);
    let file = File::open(&path).with_context(|| format!("opening fixture {}", path.display()))?;
    Ok(Saml11Parser::with_config(config).parse_reader(BufReader::new(file)))
}

/// Installs a `tracing` subscriber writing to the test output.
///
/// Safe to call from every test; only the first call takes effect. The
/// filter honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
