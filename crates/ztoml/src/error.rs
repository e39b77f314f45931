//! Error types for ztoml

use std::fmt;
use thiserror::Error;

/// Position in the source document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lexical rejection: the input cannot be decoded as TOML
    Decode,
    /// Allocation failure; part of the public vocabulary, never raised here
    Memory,
    /// Could not read from the input source
    Read,
    /// Value is not of the requested type
    Cast { expected: &'static str },
    /// Redefinition rule violation
    DuplicateKey { key: String },
    /// No `=` where one was expected
    MissingSeparator,
    /// `=` with no value after it
    MissingValue,
    /// Child lookup miss
    KeyNotFound { key: String },
    /// A configured limit was exceeded
    BufferOverflow { max: usize },
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => write!(f, "invalid toml"),
            Self::Memory => write!(f, "out of memory"),
            Self::Read => write!(f, "could not read input"),
            Self::Cast { expected } => write!(f, "value is not a {expected}"),
            Self::DuplicateKey { key } => write!(f, "duplicate key: {key}"),
            Self::MissingSeparator => write!(f, "expected = after key"),
            Self::MissingValue => write!(f, "expected a value after ="),
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::BufferOverflow { max } => write!(f, "buffer overflow: limit {max} exceeded"),
            Self::Unknown => write!(f, "unknown error"),
        }
    }
}

/// Main error type for ztoml
///
/// Carries the kind, the scanner position at the point of failure and a
/// human-readable message. The position is rendered as `line:column` with
/// a 1-indexed line.
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Pos,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        let message = kind.to_string();
        Self { kind, pos, message }
    }

    pub fn with_message(kind: ErrorKind, pos: Pos, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos,
            message: message.into(),
        }
    }

    /// Create an error with no meaningful position
    pub fn bare(kind: ErrorKind) -> Self {
        Self::new(kind, Pos::default())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render as `file:line:column: message`
    pub fn display_with_file(&self, file: &str) -> String {
        format!("{file}:{}: {}", self.pos, self.message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

/// Result type alias for ztoml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::MissingSeparator, Pos::new(0, 1, 1));
        assert_eq!(err.kind(), &ErrorKind::MissingSeparator);
        assert_eq!(err.message(), "expected = after key");
    }

    #[test]
    fn test_error_display() {
        let err = Error::new(
            ErrorKind::DuplicateKey {
                key: "a".to_string(),
            },
            Pos::new(10, 2, 5),
        );
        assert_eq!(err.to_string(), "2:5: duplicate key: a");
    }

    #[test]
    fn test_error_display_with_file() {
        let err = Error::new(ErrorKind::MissingValue, Pos::new(3, 4, 9));
        assert_eq!(
            err.display_with_file("config.toml"),
            "config.toml:4:9: expected a value after ="
        );
    }
}
