//! Parse Errors
//!
//! Every failure is returned to the caller of `parse` as a [`ParseError`];
//! nothing is logged, retried or swallowed on the way out.

use std::fmt;

/// Result type used throughout the crate.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Classification of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Tokenization-level syntax error (unterminated tag, mismatched end tag,
    /// invalid character reference, invalid encoding)
    MalformedDocument,
    /// An entity's replacement text refers back to itself
    CyclicEntityDeclaration,
    /// Reference to an external or parameter entity, or to the external subset
    ExternalEntityDisallowed,
    /// Cumulative entity expansion passed the configured ceiling
    EntityExpansionExceeded,
    /// Root element is not one of the known dictionary roots
    UnknownDocumentType,
    /// Root element disagrees with the variant the caller asked for
    RootNameMismatch,
    /// A scalar child appeared more than once (strict mode only)
    UnexpectedRepetition,
    /// Text could not be converted to the field's numeric or enumerated type
    FieldTypeMismatch,
    /// The underlying stream could not be read
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedDocument => "malformed document",
            ErrorKind::CyclicEntityDeclaration => "cyclic entity declaration",
            ErrorKind::ExternalEntityDisallowed => "external entity disallowed",
            ErrorKind::EntityExpansionExceeded => "entity expansion exceeded",
            ErrorKind::UnknownDocumentType => "unknown document type",
            ErrorKind::RootNameMismatch => "root name mismatch",
            ErrorKind::UnexpectedRepetition => "unexpected repetition",
            ErrorKind::FieldTypeMismatch => "field type mismatch",
            ErrorKind::Io => "i/o error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of an error in the (UTF-8) document buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the start of the buffer
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

impl Position {
    /// Compute line and column for a byte offset into `input`
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
        Position { offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A failed parse: what went wrong, where, and which name was involved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}{}", .position.map(|p| format!(" at {p}")).unwrap_or_default())]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
    /// Offending element, attribute, field or entity name, if any
    pub name: Option<String>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            position: None,
            name: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDocument, message)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a position unless one is already set
    pub fn at(mut self, position: Position) -> Self {
        self.position.get_or_insert(position);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::new(ErrorKind::Io, err.to_string())
    }
}
