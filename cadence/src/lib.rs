//! Sandboxed formula language.
//!
//! A program is a sequence of `;`-separated expressions evaluated against a read-only
//! input record. A statement may bind its result with `[name]` for later statements.
//!
//! ```
//! use cadence::{run, Input, Value};
//!
//! let mut input = Input::new();
//! input.insert("score".to_string(), Value::from(14));
//!
//! let program = r#"
//!     floor((score - 10) / 2) [modifier];
//!     modifier < 0 ? "-" : "+" [sign];
//!     sign + abs(modifier)
//! "#;
//! assert_eq!(run(program, &input).unwrap(), Some(Value::from("+2")));
//! ```

mod error;

pub use cadence_eval::{ExecutionOptions, HelperRegistry};
pub use cadence_parser::CompilationOptions;
pub use cadence_source::Source;
pub use cadence_value::{Input, Value};
pub use error::Error;

use cadence_eval::Evaluator;
use once_cell::sync::Lazy;
use tracing::debug;

/// Built on first use and shared by every run.
static HELPERS: Lazy<HelperRegistry> = Lazy::new(HelperRegistry::standard);

/// Configuration for a run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub compilation: CompilationOptions,
    pub execution: ExecutionOptions,
}

/// Evaluates `source` against `input` with default [`Options`].
///
/// Returns the value of the last statement, or `None` if the program has no statements.
pub fn run(source: &str, input: &Input) -> Result<Option<Value>, Error> {
    run_with_options(source, input, &Options::default())
}

/// Evaluates `source` against `input`.
pub fn run_with_options(
    source: &str,
    input: &Input,
    options: &Options,
) -> Result<Option<Value>, Error> {
    let program = cadence_parser::parse(source, &options.compilation)?;
    let result = Evaluator::new(input, &HELPERS, options.execution.clone()).evaluate(&program);
    if let Err(err) = &result {
        debug!(%err, "evaluation failed");
    }
    Ok(result?)
}
