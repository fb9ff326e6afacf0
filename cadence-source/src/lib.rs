//! Source code representation and error management.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// A byte range into the source code.
pub type Span = Range<usize>;

/// Represents source code.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Returns the 1-based `(line, column)` of the byte `position`.
    /// Positions past the end of the content are clamped to the end.
    pub fn line_col(&self, position: usize) -> (usize, usize) {
        let mut end = position.min(self.content.len());
        while !self.content.is_char_boundary(end) {
            end -= 1;
        }
        let before = &self.content[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Error raised while turning text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unterminated string at position {position}")]
    UnterminatedString { position: usize },
    #[error("Unexpected character {character:?} at position {position}")]
    UnexpectedChar { position: usize, character: char },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedString { position } | LexError::UnexpectedChar { position, .. } => {
                *position
            }
        }
    }
}

/// Represents a syntax error: a token that does not fit the construct being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected {expected}, found {found} at position {position}")]
pub struct ParseError {
    /// Description of the expected construct (e.g. "`)` after arguments").
    pub expected: String,
    /// Rendering of the offending token.
    pub found: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(expected: impl ToString, found: impl fmt::Display, position: usize) -> Self {
        Self {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
        }
    }
}

/// Raised when parsing or evaluation nests deeper than the configured limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Maximum {stage} depth of {max_depth} exceeded")]
pub struct ResourceError {
    /// Either `"parse"` or `"evaluation"`.
    pub stage: &'static str,
    pub max_depth: usize,
    /// Source position where the limit was hit, if known.
    pub position: Option<usize>,
}

/// Any failure that can happen before evaluation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl SyntaxError {
    /// Returns the source position of the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            SyntaxError::Lex(err) => Some(err.position()),
            SyntaxError::Parse(err) => Some(err.position),
            SyntaxError::Resource(err) => err.position,
        }
    }
}
