//! Runtime evaluation errors.

use cadence_source::ResourceError;
use cadence_value::Value;
use thiserror::Error;

/// Evaluation errors caused by the program itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Name found neither in scope nor in the input record.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),
    /// Callee is not one of the whitelisted helpers.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Function {ident} expects 1 argument, got {got}")]
    ArgumentCount { ident: String, got: usize },
    /// A helper rejected the runtime type of its argument.
    #[error("{helper} expects {expected}, got {found}")]
    HelperType {
        helper: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Expected number, got {value:?}")]
    NotANumber { value: Value },
}

/// Anything that aborts an evaluation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
