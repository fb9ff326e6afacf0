//! Runtime values and the caller-supplied input record.

use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;

/// A runtime value. There are no object or record values, only these four.
#[derive(Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<Value>),
}

/// The read-only input record a program is evaluated against.
pub type Input = HashMap<String, Value>;

impl Value {
    /// Name of the runtime type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
        }
    }

    /// `0`, `NaN`, `""` and `false` are falsy. Everything else, including an empty list, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(val) => *val != 0.0 && !val.is_nan(),
            Value::Text(val) => !val.is_empty(),
            Value::Bool(val) => *val,
            Value::List(_) => true,
        }
    }

    /// Coerces the value to a number or returns `None` if it cannot be.
    /// Text is accepted when, once trimmed, it is a non-empty numeric literal.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(val) => Some(*val),
            Value::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                match text {
                    "Infinity" | "+Infinity" => Some(f64::INFINITY),
                    "-Infinity" => Some(f64::NEG_INFINITY),
                    // `f64::from_str` also takes `inf`, `infinity` and `nan` in any case
                    _ if text.bytes().all(|b| {
                        b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
                    }) =>
                    {
                        text.parse::<f64>().ok()
                    }
                    _ => None,
                }
            }
            Value::Bool(_) | Value::List(_) => None,
        }
    }

    /// Attempts to cast the `Value` into a `f64` or `None` if wrong type. No coercion.
    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }

    /// Attempts to cast the `Value` into a list slice or `None` if wrong type.
    pub fn cast_to_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Writes a number the way formulas show it: integral values without a fraction,
/// `Infinity`/`-Infinity`/`NaN` spelled out and negative zero as `0`.
fn write_number(f: &mut fmt::Formatter<'_>, val: f64) -> fmt::Result {
    if val.is_nan() {
        write!(f, "NaN")
    } else if val.is_infinite() {
        write!(f, "{}", if val > 0.0 { "Infinity" } else { "-Infinity" })
    } else if val == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}", val)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(val) => write_number(f, *val),
            Value::Text(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(val) => write!(f, "{:?}", val),
            Value::List(items) => f.debug_list().entries(items).finish(),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Number(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Number(val.into())
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Text(val)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}
