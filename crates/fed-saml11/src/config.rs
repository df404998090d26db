//! Parser configuration.
//!
//! The defaults are the strict settings: unknown elements are rejected and
//! document type declarations are refused.

use serde::{Deserialize, Serialize};

/// How the parser treats elements it does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownElementPolicy {
    /// Fail the parse.
    #[default]
    Reject,
    /// Skip the element and its subtree, logging a warning.
    ///
    /// Never applies to conditions: an unknown condition always fails.
    Skip,
}

impl UnknownElementPolicy {
    /// Returns the string value for this policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }
}

/// Configuration for [`Saml11Parser`](crate::Saml11Parser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Handling of unrecognized elements.
    pub unknown_elements: UnknownElementPolicy,

    /// Maximum element nesting depth, counting the root element as 1.
    pub max_depth: usize,

    /// Whether a `<!DOCTYPE>` declaration is tolerated.
    pub allow_doctype: bool,
}

/// Default nesting bound. Real assertions stay well under 10 levels; nested
/// evidence and advice assertions add a handful each.
pub const DEFAULT_MAX_DEPTH: usize = 32;

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            unknown_elements: UnknownElementPolicy::Reject,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_doctype: false,
        }
    }
}

impl ParserConfig {
    /// Creates the default (strict) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that skips unknown elements.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default().with_unknown_elements(UnknownElementPolicy::Skip)
    }

    /// Sets the unknown-element policy.
    #[must_use]
    pub const fn with_unknown_elements(mut self, policy: UnknownElementPolicy) -> Self {
        self.unknown_elements = policy;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether a `<!DOCTYPE>` declaration is tolerated.
    #[must_use]
    pub const fn allow_doctype(mut self, allow: bool) -> Self {
        self.allow_doctype = allow;
        self
    }
}
