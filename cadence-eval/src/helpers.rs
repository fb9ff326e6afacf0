//! The whitelisted helper functions callable from formulas.

use std::collections::HashMap;

use cadence_value::Value;

use crate::error::EvalError;

/// A helper takes exactly one argument and has no access to anything else.
pub type HelperFn = fn(&Value) -> Result<Value, EvalError>;

/// Immutable mapping from helper name to implementation.
///
/// The set is closed: [`HelperRegistry::standard`] is the only constructor and there is no
/// way to add entries afterwards.
#[derive(Clone)]
pub struct HelperRegistry {
    helpers: HashMap<&'static str, HelperFn>,
}

impl HelperRegistry {
    /// Returns the registry containing the standard helpers.
    pub fn standard() -> Self {
        let entries: [(&'static str, HelperFn); 10] = [
            ("sum", sum),
            ("count", count),
            ("min", min),
            ("max", max),
            ("avg", avg),
            ("any", any),
            ("all", all),
            ("floor", floor),
            ("ceil", ceil),
            ("abs", abs),
        ];
        Self {
            helpers: entries.iter().copied().collect(),
        }
    }

    pub fn get(&self, ident: &str) -> Option<HelperFn> {
        self.helpers.get(ident).copied()
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.helpers.contains_key(ident)
    }

    /// Helper names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.helpers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn expect_list<'v>(helper: &'static str, arg: &'v Value) -> Result<&'v [Value], EvalError> {
    arg.cast_to_list().ok_or(EvalError::HelperType {
        helper,
        expected: "list",
        found: arg.type_name(),
    })
}

fn expect_number(helper: &'static str, arg: &Value) -> Result<f64, EvalError> {
    match arg.cast_to_number() {
        Some(val) if !val.is_nan() => Ok(val),
        _ => Err(EvalError::HelperType {
            helper,
            expected: "number",
            found: arg.type_name(),
        }),
    }
}

/// Numeric entries of a list. Other entries are skipped.
fn numbers(items: &[Value]) -> impl Iterator<Item = f64> + '_ {
    items.iter().filter_map(Value::cast_to_number)
}

pub fn sum(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("sum", arg)?;
    // `Sum for f64` starts at -0.0
    Ok(Value::Number(numbers(items).fold(0.0, |total, val| total + val)))
}

pub fn count(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("count", arg)?;
    Ok(Value::Number(items.len() as f64))
}

/// Smallest numeric entry, `Infinity` if there is none.
pub fn min(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("min", arg)?;
    Ok(Value::Number(numbers(items).fold(f64::INFINITY, f64::min)))
}

/// Largest numeric entry, `-Infinity` if there is none.
pub fn max(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("max", arg)?;
    Ok(Value::Number(numbers(items).fold(f64::NEG_INFINITY, f64::max)))
}

/// Mean of the numeric entries, `0` if there is none.
pub fn avg(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("avg", arg)?;
    let (total, n) = numbers(items).fold((0.0, 0usize), |(total, n), val| (total + val, n + 1));
    if n == 0 {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(total / n as f64))
}

pub fn any(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("any", arg)?;
    Ok(Value::Bool(items.iter().any(Value::is_truthy)))
}

pub fn all(arg: &Value) -> Result<Value, EvalError> {
    let items = expect_list("all", arg)?;
    Ok(Value::Bool(items.iter().all(Value::is_truthy)))
}

pub fn floor(arg: &Value) -> Result<Value, EvalError> {
    Ok(Value::Number(expect_number("floor", arg)?.floor()))
}

pub fn ceil(arg: &Value) -> Result<Value, EvalError> {
    Ok(Value::Number(expect_number("ceil", arg)?.ceil()))
}

pub fn abs(arg: &Value) -> Result<Value, EvalError> {
    Ok(Value::Number(expect_number("abs", arg)?.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(ident: &str, arg: impl Into<Value>) -> Result<Value, EvalError> {
        let helper = HelperRegistry::standard().get(ident).unwrap();
        helper(&arg.into())
    }

    #[test]
    fn test_registry_is_fixed() {
        let registry = HelperRegistry::standard();
        assert_eq!(
            registry.names(),
            vec!["abs", "all", "any", "avg", "ceil", "count", "floor", "max", "min", "sum"]
        );
        assert!(registry.contains("sum"));
        assert!(!registry.contains("eval"));
        assert!(registry.get("Function").is_none());
        assert!(registry.get("SUM").is_none());
    }

    #[test]
    fn test_list_helpers() {
        let values = vec![1, 2, 3, 4];
        assert_eq!(call("sum", values.clone()), Ok(Value::from(10)));
        assert_eq!(call("count", values.clone()), Ok(Value::from(4)));
        assert_eq!(call("avg", values.clone()), Ok(Value::from(2.5)));
        assert_eq!(call("min", values.clone()), Ok(Value::from(1)));
        assert_eq!(call("max", values), Ok(Value::from(4)));
    }

    #[test]
    fn test_mixed_lists() {
        let mixed = || {
            Value::List(vec![
                Value::from(3),
                Value::from("7"),
                Value::from(true),
                Value::from(-1),
            ])
        };
        assert_eq!(call("sum", mixed()), Ok(Value::from(2)));
        assert_eq!(call("count", mixed()), Ok(Value::from(4)));
        assert_eq!(call("avg", mixed()), Ok(Value::from(1)));
        assert_eq!(call("min", mixed()), Ok(Value::from(-1)));
        assert_eq!(call("max", mixed()), Ok(Value::from(3)));
    }

    #[test]
    fn test_empty_lists() {
        let empty = || Vec::<Value>::new();
        assert_eq!(call("sum", empty()), Ok(Value::from(0)));
        assert_eq!(call("count", empty()), Ok(Value::from(0)));
        assert_eq!(call("avg", empty()), Ok(Value::from(0)));
        assert_eq!(call("min", empty()), Ok(Value::from(f64::INFINITY)));
        assert_eq!(call("max", empty()), Ok(Value::from(f64::NEG_INFINITY)));
        assert_eq!(call("any", empty()), Ok(Value::from(false)));
        assert_eq!(call("all", empty()), Ok(Value::from(true)));
        assert_eq!(call("avg", vec!["a", "b"]), Ok(Value::from(0)));

        let positive_zero = |result: Result<Value, EvalError>| match result {
            Ok(Value::Number(val)) => val == 0.0 && val.is_sign_positive(),
            _ => false,
        };
        assert!(positive_zero(call("sum", empty())));
        assert!(positive_zero(call("sum", vec!["a", "b"])));
    }

    #[test]
    fn test_any_all() {
        assert_eq!(call("any", vec![0, 0, 1]), Ok(Value::from(true)));
        assert_eq!(call("any", vec![0, 0]), Ok(Value::from(false)));
        assert_eq!(call("all", vec![1, 2, 3]), Ok(Value::from(true)));
        assert_eq!(call("all", vec![1, 0, 3]), Ok(Value::from(false)));
        assert_eq!(call("all", vec!["x", ""]), Ok(Value::from(false)));
    }

    #[test]
    fn test_number_helpers() {
        assert_eq!(call("floor", 2.7), Ok(Value::from(2)));
        assert_eq!(call("floor", -0.5), Ok(Value::from(-1)));
        assert_eq!(call("ceil", 2.1), Ok(Value::from(3)));
        assert_eq!(call("abs", -4), Ok(Value::from(4)));
    }

    #[test]
    fn test_type_errors() {
        assert_eq!(
            call("sum", 10),
            Err(EvalError::HelperType {
                helper: "sum",
                expected: "list",
                found: "number"
            })
        );
        assert_eq!(
            call("floor", "2.5"),
            Err(EvalError::HelperType {
                helper: "floor",
                expected: "number",
                found: "text"
            })
        );
        assert_eq!(
            call("abs", vec![1]).unwrap_err().to_string(),
            "abs expects number, got list"
        );
        assert!(call("ceil", f64::NAN).is_err());
    }
}
