//! Operator semantics over runtime values.

use cadence_parser::ast::{BinaryOp, UnaryOp};
use cadence_value::Value;

use crate::error::EvalError;

fn number(value: &Value) -> Result<f64, EvalError> {
    value.to_number().ok_or_else(|| EvalError::NotANumber {
        value: value.clone(),
    })
}

pub fn unary(op: UnaryOp, arg: &Value) -> Result<Value, EvalError> {
    let val = number(arg)?;
    Ok(Value::Number(match op {
        UnaryOp::Plus => val,
        UnaryOp::Minus => -val,
    }))
}

/// Applies `op` to two already evaluated operands.
///
/// `&&` and `||` return one of the operands, not a coerced boolean. The evaluator
/// short-circuits them before the right operand is evaluated.
pub fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let value = match op {
        BinaryOp::Add => match (&lhs, &rhs) {
            (Value::Text(_), _) | (_, Value::Text(_)) => Value::Text(format!("{}{}", lhs, rhs)),
            _ => Value::Number(number(&lhs)? + number(&rhs)?),
        },
        BinaryOp::Sub => Value::Number(number(&lhs)? - number(&rhs)?),
        BinaryOp::Mul => Value::Number(number(&lhs)? * number(&rhs)?),
        BinaryOp::Div => Value::Number(number(&lhs)? / number(&rhs)?),
        BinaryOp::Pow => Value::Number(number(&lhs)?.powf(number(&rhs)?)),
        BinaryOp::Lt => Value::Bool(number(&lhs)? < number(&rhs)?),
        BinaryOp::LtEq => Value::Bool(number(&lhs)? <= number(&rhs)?),
        BinaryOp::Gt => Value::Bool(number(&lhs)? > number(&rhs)?),
        BinaryOp::GtEq => Value::Bool(number(&lhs)? >= number(&rhs)?),
        BinaryOp::Eq => Value::Bool(lhs == rhs),
        BinaryOp::NotEq => Value::Bool(lhs != rhs),
        BinaryOp::And => {
            if lhs.is_truthy() {
                rhs
            } else {
                lhs
            }
        }
        BinaryOp::Or => {
            if lhs.is_truthy() {
                lhs
            } else {
                rhs
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(op: BinaryOp, lhs: impl Into<Value>, rhs: impl Into<Value>) -> Result<Value, EvalError> {
        binary(op, lhs.into(), rhs.into())
    }

    #[test]
    fn test_add() {
        assert_eq!(bin(BinaryOp::Add, 1, 2), Ok(Value::from(3)));
        assert_eq!(bin(BinaryOp::Add, "+", 2), Ok(Value::from("+2")));
        assert_eq!(bin(BinaryOp::Add, 2.5, "x"), Ok(Value::from("2.5x")));
        assert_eq!(bin(BinaryOp::Add, "a", true), Ok(Value::from("atrue")));
        assert_eq!(bin(BinaryOp::Add, "n=", vec![1, 2]), Ok(Value::from("n=1,2")));
        assert_eq!(
            bin(BinaryOp::Add, true, 1),
            Err(EvalError::NotANumber {
                value: Value::from(true)
            })
        );
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(bin(BinaryOp::Sub, "10", 4), Ok(Value::from(6)));
        assert_eq!(bin(BinaryOp::Mul, " 3 ", "2"), Ok(Value::from(6)));
        assert_eq!(bin(BinaryOp::Lt, "3", 4), Ok(Value::from(true)));
        assert!(bin(BinaryOp::Sub, "ten", 4).is_err());
        assert!(bin(BinaryOp::Mul, vec![1], 4).is_err());
        assert!(bin(BinaryOp::GtEq, 1, false).is_err());
    }

    #[test]
    fn test_division_and_power() {
        assert_eq!(bin(BinaryOp::Div, 1, 0), Ok(Value::from(f64::INFINITY)));
        assert_eq!(bin(BinaryOp::Div, -1, 0), Ok(Value::from(f64::NEG_INFINITY)));
        match bin(BinaryOp::Div, 0, 0) {
            Ok(Value::Number(val)) => assert!(val.is_nan()),
            other => panic!("expected NaN, got {:?}", other),
        }
        assert_eq!(bin(BinaryOp::Pow, 2, 10), Ok(Value::from(1024)));
        assert_eq!(bin(BinaryOp::Pow, 4, 0.5), Ok(Value::from(2)));
    }

    #[test]
    fn test_equality() {
        assert_eq!(bin(BinaryOp::Eq, 3, 3), Ok(Value::from(true)));
        assert_eq!(bin(BinaryOp::Eq, 3, "3"), Ok(Value::from(false)));
        assert_eq!(bin(BinaryOp::NotEq, 1, true), Ok(Value::from(true)));
        assert_eq!(bin(BinaryOp::Eq, "a", "a"), Ok(Value::from(true)));
    }

    #[test]
    fn test_logical_returns_operand() {
        assert_eq!(bin(BinaryOp::And, 1, 2), Ok(Value::from(2)));
        assert_eq!(bin(BinaryOp::And, 0, 2), Ok(Value::from(0)));
        assert_eq!(bin(BinaryOp::Or, 0, 5), Ok(Value::from(5)));
        assert_eq!(bin(BinaryOp::Or, "x", 5), Ok(Value::from("x")));
    }

    #[test]
    fn test_unary() {
        assert_eq!(unary(UnaryOp::Minus, &Value::from(5)), Ok(Value::from(-5)));
        assert_eq!(unary(UnaryOp::Plus, &Value::from("7")), Ok(Value::from(7)));
        assert!(unary(UnaryOp::Minus, &Value::from("x")).is_err());
    }
}
