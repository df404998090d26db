//! SAML 1.1 parse error types.
//!
//! Every failure carries the offending element or attribute name and, where
//! the tokenizer can supply one, the byte offset into the input at which the
//! problem was detected.

use thiserror::Error;

/// Result type for SAML 1.1 parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// SAML 1.1 assertion parse errors.
///
/// A parse either fully succeeds or fails with exactly one of these; callers
/// must treat any error as an unconditional rejection of the assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The underlying XML tokenizer rejected the input.
    #[error("malformed XML at byte {position}: {message}")]
    MalformedInput {
        /// Tokenizer diagnostic.
        message: String,
        /// Byte offset into the input.
        position: u64,
    },

    /// A required attribute is absent or empty.
    #[error("missing required attribute {attribute} on <{element}> at byte {position}")]
    MissingRequiredAttribute {
        /// Attribute local name.
        attribute: String,
        /// Element local name.
        element: String,
        /// Byte offset of the element start tag.
        position: u64,
    },

    /// A required child element is absent.
    #[error("missing required element <{element}> in <{parent}> at byte {position}")]
    MissingRequiredElement {
        /// Expected child local name.
        element: String,
        /// Parent local name.
        parent: String,
        /// Byte offset at which the absence was detected.
        position: u64,
    },

    /// An element that is not allowed at its position.
    #[error("unsupported element <{name}> at byte {position}")]
    UnsupportedElement {
        /// Local name of the element.
        name: String,
        /// Byte offset of the element start tag.
        position: u64,
    },

    /// A statement element with no known statement variant.
    #[error("unsupported statement type <{name}> at byte {position}")]
    UnsupportedStatementType {
        /// Local name of the element.
        name: String,
        /// Byte offset of the element start tag.
        position: u64,
    },

    /// A condition element with no known condition variant.
    #[error("unsupported condition type <{name}> at byte {position}")]
    UnsupportedConditionType {
        /// Local name of the element.
        name: String,
        /// Byte offset of the element start tag.
        position: u64,
    },

    /// The assertion declares a version other than 1.1.
    #[error("unsupported SAML version {major}.{minor}")]
    UnsupportedVersion {
        /// Declared `MajorVersion`.
        major: u32,
        /// Declared `MinorVersion`.
        minor: u32,
    },

    /// A timestamp that is not a valid `xs:dateTime` with a timezone.
    #[error("invalid timestamp: {text:?}")]
    InvalidTemporalFormat {
        /// The rejected text.
        text: String,
    },

    /// A statement or condition was requested as the wrong variant.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Variant the caller asked for.
        expected: &'static str,
        /// Variant actually present.
        actual: &'static str,
    },

    /// An attribute value outside its allowed lexical space.
    #[error("invalid value {value:?} for attribute {attribute} on <{element}> at byte {position}")]
    InvalidAttributeValue {
        /// Attribute local name.
        attribute: String,
        /// Element local name.
        element: String,
        /// The rejected value.
        value: String,
        /// Byte offset of the element start tag.
        position: u64,
    },

    /// A child element that may appear at most once was repeated.
    #[error("duplicate element <{element}> in <{parent}> at byte {position}")]
    DuplicateElement {
        /// Repeated child local name.
        element: String,
        /// Parent local name.
        parent: String,
        /// Byte offset of the repeated start tag.
        position: u64,
    },

    /// A child element appeared after siblings it must precede.
    #[error("element <{element}> out of order in <{parent}> at byte {position}")]
    OutOfOrderElement {
        /// Misplaced child local name.
        element: String,
        /// Parent local name.
        parent: String,
        /// Byte offset of the misplaced start tag.
        position: u64,
    },

    /// Element nesting exceeded the configured bound.
    #[error("element nesting deeper than {limit} at byte {position}")]
    DepthLimitExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Byte offset of the start tag that crossed the bound.
        position: u64,
    },
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>, position: u64) -> Self {
        Self::MalformedInput {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn invalid_temporal(text: impl Into<String>) -> Self {
        Self::InvalidTemporalFormat { text: text.into() }
    }

    /// Returns a stable, machine-readable code for this error.
    ///
    /// Intended for log fields and metrics labels; the `Display` output is
    /// for humans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "malformed_input",
            Self::MissingRequiredAttribute { .. } => "missing_required_attribute",
            Self::MissingRequiredElement { .. } => "missing_required_element",
            Self::UnsupportedElement { .. } => "unsupported_element",
            Self::UnsupportedStatementType { .. } => "unsupported_statement_type",
            Self::UnsupportedConditionType { .. } => "unsupported_condition_type",
            Self::UnsupportedVersion { .. } => "unsupported_version",
            Self::InvalidTemporalFormat { .. } => "invalid_temporal_format",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidAttributeValue { .. } => "invalid_attribute_value",
            Self::DuplicateElement { .. } => "duplicate_element",
            Self::OutOfOrderElement { .. } => "out_of_order_element",
            Self::DepthLimitExceeded { .. } => "depth_limit_exceeded",
        }
    }

    /// Returns the byte offset associated with this error, if any.
    #[must_use]
    pub const fn position(&self) -> Option<u64> {
        match self {
            Self::MalformedInput { position, .. }
            | Self::MissingRequiredAttribute { position, .. }
            | Self::MissingRequiredElement { position, .. }
            | Self::UnsupportedElement { position, .. }
            | Self::UnsupportedStatementType { position, .. }
            | Self::UnsupportedConditionType { position, .. }
            | Self::InvalidAttributeValue { position, .. }
            | Self::DuplicateElement { position, .. }
            | Self::OutOfOrderElement { position, .. }
            | Self::DepthLimitExceeded { position, .. } => Some(*position),
            Self::UnsupportedVersion { .. }
            | Self::InvalidTemporalFormat { .. }
            | Self::TypeMismatch { .. } => None,
        }
    }
}
