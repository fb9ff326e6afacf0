use crate::ast::{Expr, Program};
use crate::lexer::{tokenize, SpannedToken, Token};
use cadence_source::{ParseError, ResourceError, SyntaxError};
use std::mem;

mod expr;
mod stmt;

/// Configuration options for parsing.
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// Maximum expression nesting (parentheses, unary chains, right operands).
    ///
    /// Default: 128
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

pub struct Parser {
    tokens: Vec<SpannedToken>,
    /// Index of the current token. Never moves past the trailing `Eof`.
    pos: usize,
    /// Current expression nesting.
    depth: usize,
    options: CompilationOptions,
}

impl Parser {
    pub fn new(mut tokens: Vec<SpannedToken>, options: CompilationOptions) -> Self {
        if tokens.last().map(|t| &t.token) != Some(&Token::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(SpannedToken {
                token: Token::Eof,
                span: end..end,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }
}

/// Tokenizes and parses `source` into a [`Program`].
pub fn parse(source: &str, options: &CompilationOptions) -> Result<Program, SyntaxError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens, options.clone()).parse_program()
}

/// Parse utilities
impl Parser {
    fn current(&self) -> &SpannedToken {
        &self.tokens[self.pos]
    }

    fn current_token(&self) -> &Token {
        &self.current().token
    }

    /// Eats the current token and returns it.
    fn next(&mut self) -> SpannedToken {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Predicate that tests whether the current token has the same discriminant and eats it if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if mem::discriminant(self.current_token()) == mem::discriminant(&tok) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token, expected: &str) -> Result<(), ParseError> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds an unexpected token error at the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        let current = self.current();
        ParseError::new(expected, &current.token, current.position())
    }

    /// Runs `f` one nesting level deeper, failing once `max_depth` is exceeded.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= self.options.max_depth {
            return Err(ResourceError {
                stage: "parse",
                max_depth: self.options.max_depth,
                position: Some(self.current().position()),
            }
            .into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

impl Parser {
    /// Parses a single expression and requires the whole input to be consumed.
    pub fn parse_single_expr(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expr()?;
        if *self.current_token() != Token::Eof {
            return Err(self.unexpected("end of input").into());
        }
        Ok(expr)
    }
}
