//! Parse Options
//!
//! The configuration surface consumed by the parser. Loading these values
//! from a file or command line is left to the caller.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::DocumentKind;

/// Default ceiling on characters produced by entity substitution in one parse
pub const DEFAULT_MAX_ENTITY_EXPANSION: usize = 500_000;

/// What to do with elements and attributes the schema does not know about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum UnknownPolicy {
    /// Skip silently
    #[default]
    Ignore,
    /// Skip and emit a `tracing` warning
    Warn,
}

/// Options for a single parse call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ParseOptions {
    /// Maximum characters all entity substitutions may produce, combined
    pub max_entity_expansion: usize,
    pub unknown: UnknownPolicy,
    /// Reject a repeated scalar child instead of letting the last one win
    pub strict: bool,
    /// Skip root sniffing and require this variant
    pub expected: Option<DocumentKind>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_entity_expansion: DEFAULT_MAX_ENTITY_EXPANSION,
            unknown: UnknownPolicy::Ignore,
            strict: false,
            expected: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with repeated scalars reported as errors
    pub fn new_strict() -> Self {
        ParseOptions {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_max_entity_expansion(mut self, limit: usize) -> Self {
        self.max_entity_expansion = limit;
        self
    }

    pub fn with_unknown(mut self, policy: UnknownPolicy) -> Self {
        self.unknown = policy;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_expected(mut self, kind: DocumentKind) -> Self {
        self.expected = Some(kind);
        self
    }
}
