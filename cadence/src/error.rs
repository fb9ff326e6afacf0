use cadence_eval::{EvalError, RuntimeError};
use cadence_source::{LexError, ParseError, ResourceError, SyntaxError};
use thiserror::Error;

/// The ways a run can fail. The first error aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(LexError),
    #[error("Parse error: {0}")]
    Parse(ParseError),
    #[error("Evaluation error: {0}")]
    Eval(EvalError),
    #[error("Resource error: {0}")]
    Resource(ResourceError),
}

impl Error {
    /// Returns the source position of the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lex(err) => Some(err.position()),
            Error::Parse(err) => Some(err.position),
            Error::Resource(err) => err.position,
            Error::Eval(_) => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::Lex(err) => Error::Lex(err),
            SyntaxError::Parse(err) => Error::Parse(err),
            SyntaxError::Resource(err) => Error::Resource(err),
        }
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Eval(err) => Error::Eval(err),
            RuntimeError::Resource(err) => Error::Resource(err),
        }
    }
}
