//! Core evaluation logic.

use std::collections::HashMap;

use cadence_parser::ast::{BinaryOp, Expr, Program};
use cadence_source::ResourceError;
use cadence_value::{Input, Value};
use tracing::{debug, trace};

use crate::error::{EvalError, RuntimeError};
use crate::helpers::HelperRegistry;
use crate::operators;

/// Configuration options for expression execution.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 500
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 500 }
    }
}

/// Evaluates one program against an input record.
///
/// Names resolve against the statement bindings made so far, then the input record, and
/// nowhere else. The input record is only ever read.
pub struct Evaluator<'a> {
    input: &'a Input,
    helpers: &'a HelperRegistry,
    /// Bindings created by `[name]` in this run.
    scope: HashMap<String, Value>,
    options: ExecutionOptions,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(input: &'a Input, helpers: &'a HelperRegistry, options: ExecutionOptions) -> Self {
        Self {
            input,
            helpers,
            scope: HashMap::new(),
            options,
            depth: 0,
        }
    }

    /// Runs every statement in order and returns the value of the last one,
    /// or `None` for a program without statements.
    pub fn evaluate(mut self, program: &Program) -> Result<Option<Value>, RuntimeError> {
        debug!(statements = program.body.len(), "evaluating program");

        let mut last = None;
        for stmt in &program.body {
            let value = self.eval_expr(&stmt.expr)?;
            if let Some(binding) = &stmt.binding {
                trace!(%binding, ?value, expr = %stmt.expr, "bound statement result");
                self.scope.insert(binding.clone(), value.clone());
            }
            last = Some(value);
        }
        Ok(last)
    }

    /// Evaluate an expression node.
    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        // Check depth before recursing
        self.check_depth()?;

        self.depth += 1;
        let result = self.eval_expr_inner(expr);
        self.depth -= 1;

        result
    }

    fn check_depth(&self) -> Result<(), RuntimeError> {
        if self.depth >= self.options.max_depth {
            return Err(ResourceError {
                stage: "evaluation",
                max_depth: self.options.max_depth,
                position: None,
            }
            .into());
        }
        Ok(())
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(*val)),
            Expr::StringLit(val) => Ok(Value::Text(val.clone())),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::Identifier(ident) => self.lookup(ident),
            Expr::Grouping(inner) => self.eval_expr(inner),
            Expr::Unary { op, arg } => {
                let arg = self.eval_expr(arg)?;
                Ok(operators::unary(*op, &arg)?)
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_expr(lhs)?;
                // short-circuit: the right operand is only evaluated when it decides the result
                match op {
                    BinaryOp::And if !lhs.is_truthy() => return Ok(lhs),
                    BinaryOp::Or if lhs.is_truthy() => return Ok(lhs),
                    _ => {}
                }
                let rhs = self.eval_expr(rhs)?;
                Ok(operators::binary(*op, lhs, rhs)?)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(test)?.is_truthy() {
                    self.eval_expr(consequent)
                } else {
                    self.eval_expr(alternate)
                }
            }
            Expr::FnCall { ident, args } => {
                let helper = self
                    .helpers
                    .get(ident)
                    .ok_or_else(|| EvalError::UnknownFunction(ident.clone()))?;
                let arg = match args.as_slice() {
                    [arg] => arg,
                    _ => {
                        return Err(EvalError::ArgumentCount {
                            ident: ident.clone(),
                            got: args.len(),
                        }
                        .into())
                    }
                };
                let result = match arg {
                    // helpers only read their argument, so a named value is lent, not copied
                    Expr::Identifier(name) => {
                        self.check_depth()?;
                        helper(self.resolve(name)?)
                    }
                    arg => {
                        let arg = self.eval_expr(arg)?;
                        helper(&arg)
                    }
                };
                Ok(result?)
            }
        }
    }

    /// Resolves a name: statement bindings first, then the input record.
    fn lookup(&self, ident: &str) -> Result<Value, RuntimeError> {
        self.resolve(ident).map(Value::clone)
    }

    fn resolve(&self, ident: &str) -> Result<&Value, RuntimeError> {
        self.scope
            .get(ident)
            .or_else(|| self.input.get(ident))
            .ok_or_else(|| EvalError::UnknownIdentifier(ident.to_string()).into())
    }
}
