//! Tree-walking evaluator and the closed helper registry.

pub mod error;
pub mod eval;
pub mod helpers;
pub mod operators;

pub use error::{EvalError, RuntimeError};
pub use eval::{Evaluator, ExecutionOptions};
pub use helpers::HelperRegistry;
