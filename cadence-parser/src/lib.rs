//! Tokenizer, AST and precedence-climbing parser for cadence formulas.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::{parse, CompilationOptions, Parser};
