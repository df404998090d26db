//! `xs:dateTime` parsing.
//!
//! SAML 1.1 timestamps must carry a timezone designator. Values are
//! normalized to UTC and truncated to millisecond resolution, so equality is
//! by instant rather than by lexical form.

use chrono::{DateTime, SubsecRound, Timelike, Utc};

use crate::error::{ParseError, ParseResult};

/// Position of the date/time separator in `YYYY-MM-DDThh:mm:ss`.
const SEPARATOR_INDEX: usize = 10;

/// Parses an `xs:dateTime` with a mandatory `Z` or `±hh:mm` designator.
///
/// # Errors
///
/// Returns [`ParseError::InvalidTemporalFormat`] for anything that is not
/// `YYYY-MM-DDThh:mm:ss[.fraction](Z|±hh:mm)`, including timezone-naive
/// values.
pub fn parse_instant(text: &str) -> ParseResult<DateTime<Utc>> {
    let trimmed = text.trim();

    // RFC 3339 also admits a space or lowercase separator and a lowercase
    // zone designator; xs:dateTime does not.
    if trimmed.as_bytes().get(SEPARATOR_INDEX) != Some(&b'T') || trimmed.ends_with('z') {
        return Err(ParseError::invalid_temporal(text));
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|_| ParseError::invalid_temporal(text))?;

    // chrono reports a leap second as a nanosecond overflow.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::invalid_temporal(text));
    }

    Ok(parsed.with_timezone(&Utc).trunc_subsecs(3))
}
