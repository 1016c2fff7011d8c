use slip_core::{EvaluationError, Value};

use crate::numeric::Number;

type NumericOp = fn(Number, Number) -> Result<Number, EvaluationError>;

fn fold(
    function: &'static str,
    first: &Value,
    rest: &[Value],
    op: NumericOp,
) -> Result<Value, EvaluationError> {
    let mut result = Number::from_value(function, first)?;
    for arg in rest {
        result = op(result, Number::from_value(function, arg)?)?;
    }
    Ok(result.into())
}

fn binary(
    function: &'static str,
    left: &Value,
    right: &Value,
    op: NumericOp,
) -> Result<Value, EvaluationError> {
    let left = Number::from_value(function, left)?;
    let right = Number::from_value(function, right)?;
    Ok(op(left, right)?.into())
}

pub fn add(first: &Value, rest: &[Value]) -> Result<Value, EvaluationError> {
    fold("+", first, rest, Number::checked_add)
}

/// With one argument, negates it.
pub fn subtract(first: &Value, rest: &[Value]) -> Result<Value, EvaluationError> {
    if rest.is_empty() {
        return Ok(Number::from_value("-", first)?.checked_neg()?.into());
    }
    fold("-", first, rest, Number::checked_sub)
}

pub fn multiply(first: &Value, rest: &[Value]) -> Result<Value, EvaluationError> {
    fold("*", first, rest, Number::checked_mul)
}

/// With one argument, computes the reciprocal (integer division for integers).
pub fn divide(first: &Value, rest: &[Value]) -> Result<Value, EvaluationError> {
    if rest.is_empty() {
        let divisor = Number::from_value("/", first)?;
        return Ok(Number::Integer(1).checked_div(divisor)?.into());
    }
    fold("/", first, rest, Number::checked_div)
}

pub fn modulo(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    binary("mod", left, right, Number::checked_mod)
}

pub fn remainder(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    binary("rem", left, right, Number::checked_rem)
}

pub fn increment(value: &Value) -> Result<Value, EvaluationError> {
    binary("inc", value, &Value::integer(1), Number::checked_add)
}

pub fn decrement(value: &Value) -> Result<Value, EvaluationError> {
    binary("dec", value, &Value::integer(1), Number::checked_sub)
}
