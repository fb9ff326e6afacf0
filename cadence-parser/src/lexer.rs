use std::fmt;

use cadence_source::{LexError, Span};
use logos::{Lexer, Logos};
use tracing::debug;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+", lex_number)]
    NumberLit(f64),
    #[token("\"", |lex| lex_string(lex, '"'))]
    #[token("'", |lex| lex_string(lex, '\''))]
    StringLit(String),

    // identifiers (`true` and `false` included, the parser decides)
    #[regex("[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus, // NOTE: can also be unary
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    // - conditional
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // misc
    #[regex(r"[ \t\n\r]+", logos::skip)]
    #[error]
    Error,

    /// Only generated by [`tokenize`] once the lexer is exhausted.
    Eof,
}

/// Binding power of prefix `+` and `-`. Higher than any infix operator so `-a^b` is `(-a)^b`.
pub const PREFIX_BP: u8 = 60;

impl Token {
    /// Returns the `(left, right)` binding power or `None` if the token is not an infix operator.
    /// The parser keeps folding while the left binding power exceeds the current minimum.
    /// Left-associative operators use equal powers, right-associative ones a right power one lower.
    /// For `?` the right power is the one used for the alternate branch.
    pub fn infix_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Exponent */
            Token::Caret => Some((50, 49)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash => Some((40, 40)),
            /* Additive */
            Token::Plus | Token::Minus => Some((30, 30)),
            /* Ordering */
            Token::GreaterThan
            | Token::GreaterThanEquals
            | Token::LessThan
            | Token::LessThanEquals => Some((20, 20)),
            /* Equality */
            Token::EqualsEquals | Token::NotEquals => Some((15, 15)),
            /* Logical */
            Token::AndAnd => Some((10, 10)),
            Token::OrOr => Some((9, 9)),
            /* Conditional */
            Token::Question => Some((2, 2)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Token::NumberLit(val) => return write!(f, "number {}", val),
            Token::StringLit(val) => return write!(f, "string {:?}", val),
            Token::Identifier(ident) => return write!(f, "identifier `{}`", ident),
            Token::Error => return write!(f, "invalid token"),
            Token::Eof => return write!(f, "end of input"),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::EqualsEquals => "==",
            Token::NotEquals => "!=",
            Token::GreaterThan => ">",
            Token::GreaterThanEquals => ">=",
            Token::LessThan => "<",
            Token::LessThanEquals => "<=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Question => "?",
            Token::Colon => ":",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Comma => ",",
            Token::Semi => ";",
        };
        write!(f, "`{}`", symbol)
    }
}

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// Converts `source` into tokens, terminated by a single [`Token::Eof`] at `source.len()`.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        if token == Token::Error {
            return Err(lex_error(source, span));
        }
        tokens.push(SpannedToken { token, span });
    }

    let end = source.len();
    tokens.push(SpannedToken {
        token: Token::Eof,
        span: end..end,
    });
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn lex_error(source: &str, span: Span) -> LexError {
    let position = span.start;
    match source[position..].chars().next() {
        Some('"') | Some('\'') => LexError::UnterminatedString { position },
        Some(character) => LexError::UnexpectedChar {
            position,
            character,
        },
        // logos never yields an empty error span, but stay total
        None => LexError::UnexpectedChar {
            position,
            character: '\0',
        },
    }
}

/// Extends an integer match with a fractional part when a `.` is followed by at least one digit.
fn lex_number(lex: &mut Lexer<Token>) -> Option<f64> {
    let rest = lex.remainder().as_bytes();
    if rest.len() >= 2 && rest[0] == b'.' && rest[1].is_ascii_digit() {
        let fraction = 1 + rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(fraction);
    }
    lex.slice().parse().ok()
}

/// Reads the rest of a string literal opened by `quote`.
/// Returns `None` (an error token) if the closing quote is missing.
fn lex_string(lex: &mut Lexer<Token>, quote: char) -> Option<String> {
    let (consumed, string) = scan_string(lex.remainder(), quote);
    lex.bump(consumed);
    string
}

/// Returns the number of bytes consumed and the unescaped content.
/// Only `\"`, `\'` and `\\` are escapes, any other backslash is kept as is.
fn scan_string(rest: &str, quote: char) -> (usize, Option<String>) {
    let mut string = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == quote {
            return (i + c.len_utf8(), Some(string));
        }
        if c == '\\' {
            if let Some(&(_, next)) = chars.peek() {
                if next == '"' || next == '\'' || next == '\\' {
                    string.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        string.push(c);
    }

    (rest.len(), None)
}
