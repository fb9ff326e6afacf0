use super::*;
use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::PREFIX_BP;

impl Parser {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, SyntaxError> {
        // NOTE: prefix operators are handled here
        match self.current_token() {
            Token::NumberLit(_) | Token::StringLit(_) => self.parse_literal_expr(),
            Token::Identifier(_) => self.parse_identifier_or_call_expr(),
            Token::OpenParen => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect(Token::CloseParen, "`)` after expression")?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            Token::Plus | Token::Minus => {
                let op = if self.next().token == Token::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                };
                Ok(Expr::Unary {
                    op,
                    arg: Box::new(self.parse_expr_bp(PREFIX_BP)?),
                })
            }
            _ => Err(self.unexpected("expression").into()),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        self.nested(|this| {
            let mut lhs = this.parse_primary_expr()?;

            loop {
                let (l_bp, r_bp) = match this.current_token().infix_bp() {
                    Some(bp) => bp,
                    None => break, // not a valid infix operator, stop parsing
                };
                if l_bp <= min_bp {
                    break; // does not bind tighter than the current level, stop parsing
                }

                // this.current_token() is a valid infix operator
                let token = this.next().token;

                lhs = match BinaryOp::from_token(&token) {
                    Some(op) => {
                        let rhs = this.parse_expr_bp(r_bp)?;
                        Expr::Binary {
                            lhs: Box::new(lhs),
                            op,
                            rhs: Box::new(rhs),
                        }
                    }
                    // `?` is the only infix token that is not a binary operator
                    None => this.parse_conditional_expr(lhs, r_bp)?,
                };
            }

            Ok(lhs)
        })
    }

    /// Parses the rest of `test ? consequent : alternate` after the `?`.
    fn parse_conditional_expr(&mut self, test: Expr, alternate_bp: u8) -> Result<Expr, SyntaxError> {
        let consequent = self.parse_expr()?;
        self.expect(Token::Colon, "`:` in conditional expression")?;
        let alternate = self.parse_expr_bp(alternate_bp)?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either a number literal or a string literal.
    fn parse_literal_expr(&mut self) -> Result<Expr, SyntaxError> {
        let val = match self.current_token() {
            Token::NumberLit(val) => Expr::NumberLit(*val),
            Token::StringLit(val) => Expr::StringLit(val.clone()),
            _ => return Err(self.unexpected("literal").into()),
        };
        self.next(); // eat parsed token
        Ok(val)
    }

    /* Expressions.Identifier */
    /// Parses an identifier, a boolean literal or a call expression.
    fn parse_identifier_or_call_expr(&mut self) -> Result<Expr, SyntaxError> {
        let ident = match self.current_token() {
            Token::Identifier(ident) => ident.clone(),
            _ => return Err(self.unexpected("identifier").into()),
        };
        self.next();

        if self.eat(Token::OpenParen) {
            // parse call expression
            let mut args = Vec::new();

            if !self.eat(Token::CloseParen) {
                loop {
                    args.push(self.parse_expr()?);

                    if self.eat(Token::CloseParen) {
                        break;
                    } else if !self.eat(Token::Comma) {
                        return Err(self.unexpected("`,` or `)` after argument").into());
                    }
                }
            }

            Ok(Expr::FnCall { ident, args })
        } else {
            Ok(match ident.as_str() {
                "true" => Expr::BoolLit(true),
                "false" => Expr::BoolLit(false),
                // parse identifier expression
                _ => Expr::Identifier(ident),
            })
        }
    }
}
