use std::{fmt, mem};

use crate::lexer::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinaryOp {
    /// Maps an infix operator token to its operator. `?` is not a binary operator.
    pub fn from_token(token: &Token) -> Option<Self> {
        let op = match token {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Asterisk => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Caret => BinaryOp::Pow,
            Token::LessThan => BinaryOp::Lt,
            Token::LessThanEquals => BinaryOp::LtEq,
            Token::GreaterThan => BinaryOp::Gt,
            Token::GreaterThanEquals => BinaryOp::GtEq,
            Token::EqualsEquals => BinaryOp::Eq,
            Token::NotEquals => BinaryOp::NotEq,
            Token::AndAnd => BinaryOp::And,
            Token::OrOr => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(f64),
    StringLit(String),
    BoolLit(bool),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A prefix expression (e.g. `-a`).
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// A conditional expression (e.g. `a ? b : c`).
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// A helper call (e.g. `sum(values)`).
    FnCall { ident: String, args: Vec<Expr> },
    /// A parenthesized expression. Kept distinct from its inner expression.
    Grouping(Box<Expr>),
}

/// One expression, optionally bound to a name with `[name]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub expr: Expr,
    pub binding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Expr {
    fn is_leaf(&self) -> bool {
        match self {
            Expr::NumberLit(_) | Expr::StringLit(_) | Expr::BoolLit(_) | Expr::Identifier(_) => {
                true
            }
            Expr::FnCall { args, .. } => args.is_empty(),
            _ => false,
        }
    }

    /// Moves every non-leaf child onto `stack`, leaving leaves in its place.
    fn take_children(&mut self, stack: &mut Vec<Expr>) {
        fn take(child: &mut Expr, stack: &mut Vec<Expr>) {
            if !child.is_leaf() {
                stack.push(mem::replace(child, Expr::BoolLit(false)));
            }
        }
        match self {
            Expr::Unary { arg, .. } => take(arg, stack),
            Expr::Binary { lhs, rhs, .. } => {
                take(lhs, stack);
                take(rhs, stack);
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                take(test, stack);
                take(consequent, stack);
                take(alternate, stack);
            }
            Expr::Grouping(inner) => take(inner, stack),
            Expr::FnCall { args, .. } => stack.extend(args.drain(..)),
            Expr::NumberLit(_) | Expr::StringLit(_) | Expr::BoolLit(_) | Expr::Identifier(_) => {}
        }
    }
}

impl Drop for Expr {
    /// Flat operator chains such as `1 + 1 + ... + 1` nest one level per operator, so the
    /// tree is torn down with an explicit stack instead of recursive drops.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);
        while let Some(mut expr) = stack.pop() {
            expr.take_children(&mut stack);
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the expression back to source form, with every binary and conditional
    /// expression fully parenthesized so precedence is visible.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLit(val) => write!(f, "{}", val),
            Expr::StringLit(val) => write!(f, "{:?}", val),
            Expr::BoolLit(val) => write!(f, "{}", val),
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::Unary { op, arg } => match op {
                UnaryOp::Plus => write!(f, "+{}", arg),
                UnaryOp::Minus => write!(f, "-{}", arg),
            },
            Expr::Binary { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => write!(f, "({} ? {} : {})", test, consequent, alternate),
            Expr::FnCall { ident, args } => {
                write!(f, "{}(", ident)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Grouping(inner) => write!(f, "({})", inner),
        }
    }
}
