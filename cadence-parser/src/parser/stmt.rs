use super::*;
use crate::ast::Stmt;
use tracing::debug;

impl Parser {
    /// Parses a whole program: statements separated by `;`.
    /// Stray leading, trailing or repeated `;` are skipped.
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut body = Vec::new();

        loop {
            while self.eat(Token::Semi) {}
            if *self.current_token() == Token::Eof {
                break;
            }

            body.push(self.parse_stmt()?);

            if !self.eat(Token::Semi) && *self.current_token() != Token::Eof {
                return Err(self.unexpected("`;` or end of input").into());
            }
        }

        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    /// Parses a statement: an expression optionally followed by `[name]`.
    pub fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let expr = self.parse_expr()?;

        let binding = if self.eat(Token::OpenBracket) {
            let ident = match self.current_token() {
                Token::Identifier(ident) => ident.clone(),
                _ => return Err(self.unexpected("identifier after `[`").into()),
            };
            self.next();
            self.expect(Token::CloseBracket, "`]` after binding name")?;
            Some(ident)
        } else {
            None
        };

        Ok(Stmt { expr, binding })
    }
}
