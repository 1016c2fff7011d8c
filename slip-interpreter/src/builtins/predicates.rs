use std::cmp::Ordering;

use slip_core::{EvaluationError, Value};

use crate::numeric::Number;

fn sign_test(
    function: &'static str,
    value: &Value,
    expected: Ordering,
) -> Result<Value, EvaluationError> {
    let number = Number::from_value(function, value)?;
    Ok(Value::boolean(number.signum() == expected))
}

fn parity_test(
    function: &'static str,
    value: &Value,
    remainder: i64,
) -> Result<Value, EvaluationError> {
    match value {
        Value::Integer(value) => Ok(Value::boolean(value.rem_euclid(2) == remainder)),
        other => Err(EvaluationError::type_mismatch(function, "integer", other)),
    }
}

pub fn not(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(!value.is_truthy()))
}

pub fn is_nil(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(value.is_nil()))
}

pub fn is_zero(value: &Value) -> Result<Value, EvaluationError> {
    sign_test("zero?", value, Ordering::Equal)
}

pub fn is_positive(value: &Value) -> Result<Value, EvaluationError> {
    sign_test("pos?", value, Ordering::Greater)
}

pub fn is_negative(value: &Value) -> Result<Value, EvaluationError> {
    sign_test("neg?", value, Ordering::Less)
}

pub fn is_even(value: &Value) -> Result<Value, EvaluationError> {
    parity_test("even?", value, 0)
}

pub fn is_odd(value: &Value) -> Result<Value, EvaluationError> {
    parity_test("odd?", value, 1)
}

/// True for the empty list and for nil.
pub fn is_empty(value: &Value) -> Result<Value, EvaluationError> {
    match value {
        Value::Nil => Ok(Value::boolean(true)),
        Value::List(list) => Ok(Value::boolean(list.is_empty())),
        other => Err(EvaluationError::type_mismatch("empty?", "list", other)),
    }
}

pub fn is_int(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::Integer(_))))
}

pub fn is_number(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::Integer(_) | Value::Double(_))))
}

pub fn is_double(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::Double(_))))
}

pub fn is_bool(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::Boolean(_))))
}

pub fn is_string(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::String(_))))
}

pub fn is_list(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::List(_))))
}

pub fn is_symbol(value: &Value) -> Result<Value, EvaluationError> {
    Ok(Value::boolean(matches!(value, Value::Symbol(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Predicate = fn(&Value) -> Result<Value, EvaluationError>;

    fn check(function: Predicate, arg: Value, expected: bool) {
        assert_eq!(
            function(&arg),
            Ok(Value::boolean(expected)),
            "argument {}",
            arg
        );
    }

    #[test]
    fn test_not() {
        check(not, Value::boolean(false), true);
        check(not, Value::boolean(true), false);
        check(not, Value::nil(), true);
        check(not, Value::string("str"), false);
        check(not, Value::integer(0), false);
    }

    #[test]
    fn test_numeric_predicates() {
        check(is_zero, Value::integer(0), true);
        check(is_zero, Value::double(0.0), true);
        check(is_zero, Value::integer(1), false);
        check(is_positive, Value::integer(1), true);
        check(is_positive, Value::integer(-1), false);
        check(is_positive, Value::double(0.5), true);
        check(is_negative, Value::integer(-1), true);
        check(is_negative, Value::integer(1), false);
        check(is_negative, Value::double(-0.5), true);
        check(is_even, Value::integer(4), true);
        check(is_even, Value::integer(-3), false);
        check(is_odd, Value::integer(-3), true);
        check(is_odd, Value::integer(0), false);

        assert_eq!(
            is_zero(&Value::string("0")),
            Err(EvaluationError::type_mismatch("zero?", "number", &Value::string("0")))
        );
        assert_eq!(
            is_even(&Value::double(2.0)),
            Err(EvaluationError::type_mismatch("even?", "integer", &Value::double(2.0)))
        );
    }

    #[test]
    fn test_type_predicates() {
        check(is_nil, Value::nil(), true);
        check(is_nil, Value::boolean(false), false);
        check(is_int, Value::integer(1), true);
        check(is_int, Value::double(1.0), false);
        check(is_double, Value::double(1.0), true);
        check(is_double, Value::integer(1), false);
        check(is_number, Value::integer(1), true);
        check(is_number, Value::double(1.0), true);
        check(is_number, Value::string("1"), false);
        check(is_bool, Value::boolean(true), true);
        check(is_bool, Value::integer(1), false);
        check(is_string, Value::string("str"), true);
        check(is_string, Value::integer(1), false);
        check(is_list, Value::empty_list(), true);
        check(is_list, Value::nil(), false);
        check(is_symbol, Value::symbol("a"), true);
        check(is_symbol, Value::string("a"), false);
    }

    #[test]
    fn test_empty() {
        check(is_empty, Value::empty_list(), true);
        check(is_empty, Value::nil(), true);
        check(is_empty, Value::list([Value::integer(1)]), false);
        assert_eq!(
            is_empty(&Value::integer(1)),
            Err(EvaluationError::type_mismatch("empty?", "list", &Value::integer(1)))
        );
    }
}
