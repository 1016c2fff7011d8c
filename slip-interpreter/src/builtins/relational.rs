use std::cmp::Ordering;

use slip_core::{EvaluationError, Value};

use crate::numeric::Number;

/// `(op a b c)` holds when every adjacent pair satisfies `holds`. Stops at the
/// first failing pair, so later arguments are not type checked.
fn chain(
    function: &'static str,
    args: &[Value],
    holds: fn(Ordering) -> bool,
) -> Result<Value, EvaluationError> {
    for pair in args.windows(2) {
        let left = Number::from_value(function, &pair[0])?;
        let right = Number::from_value(function, &pair[1])?;
        match left.compare(right) {
            Some(ordering) if holds(ordering) => continue,
            _ => return Ok(Value::boolean(false)),
        }
    }
    Ok(Value::boolean(true))
}

pub fn greater_than(args: &[Value]) -> Result<Value, EvaluationError> {
    chain(">", args, Ordering::is_gt)
}

pub fn greater_or_equal(args: &[Value]) -> Result<Value, EvaluationError> {
    chain(">=", args, Ordering::is_ge)
}

pub fn less_or_equal(args: &[Value]) -> Result<Value, EvaluationError> {
    chain("<=", args, Ordering::is_le)
}

pub fn less_than(args: &[Value]) -> Result<Value, EvaluationError> {
    chain("<", args, Ordering::is_lt)
}

/// Structural equality over any values.
pub fn equal(args: &[Value]) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(
        args.windows(2).all(|pair| pair[0] == pair[1]),
    ))
}

pub fn not_equal(args: &[Value]) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(!equal(args)?.is_truthy()))
}
