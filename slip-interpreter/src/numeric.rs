use std::cmp::Ordering;

use slip_core::{EvaluationError, Value};

/// The numeric tower: exact integers and inexact doubles. Mixing the two in a
/// binary operation promotes the integer to a double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Double(f64),
}

impl Number {
    pub fn from_value(function: &'static str, value: &Value) -> Result<Number, EvaluationError> {
        match value {
            Value::Integer(value) => Ok(Number::Integer(*value)),
            Value::Double(value) => Ok(Number::Double(*value)),
            other => Err(EvaluationError::type_mismatch(function, "number", other)),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Double(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(value) => value == 0,
            Number::Double(value) => value == 0.0,
        }
    }

    pub fn signum(self) -> Ordering {
        self.compare(Number::Integer(0)).unwrap_or(Ordering::Equal)
    }

    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(left), Number::Integer(right)) => Some(left.cmp(&right)),
            (left, right) => left.as_f64().partial_cmp(&right.as_f64()),
        }
    }

    fn binary(
        self,
        other: Number,
        function: &'static str,
        integer_op: fn(i64, i64) -> Option<i64>,
        double_op: fn(f64, f64) -> f64,
    ) -> Result<Number, EvaluationError> {
        match (self, other) {
            (Number::Integer(left), Number::Integer(right)) => integer_op(left, right)
                .map(Number::Integer)
                .ok_or(EvaluationError::IntegerOverflow(function)),
            (left, right) => Ok(Number::Double(double_op(left.as_f64(), right.as_f64()))),
        }
    }

    pub fn checked_add(self, other: Number) -> Result<Number, EvaluationError> {
        self.binary(other, "+", i64::checked_add, |a, b| a + b)
    }

    pub fn checked_sub(self, other: Number) -> Result<Number, EvaluationError> {
        self.binary(other, "-", i64::checked_sub, |a, b| a - b)
    }

    pub fn checked_mul(self, other: Number) -> Result<Number, EvaluationError> {
        self.binary(other, "*", i64::checked_mul, |a, b| a * b)
    }

    /// Integer division truncates toward zero.
    pub fn checked_div(self, other: Number) -> Result<Number, EvaluationError> {
        if other.is_zero() {
            return Err(EvaluationError::DivisionByZero);
        }
        self.binary(other, "/", i64::checked_div, |a, b| a / b)
    }

    /// Truncated remainder; the result takes the sign of the dividend.
    pub fn checked_rem(self, other: Number) -> Result<Number, EvaluationError> {
        if other.is_zero() {
            return Err(EvaluationError::DivisionByZero);
        }
        self.binary(other, "rem", i64::checked_rem, |a, b| a % b)
    }

    /// Floored modulus; the result takes the sign of the divisor.
    pub fn checked_mod(self, other: Number) -> Result<Number, EvaluationError> {
        if other.is_zero() {
            return Err(EvaluationError::DivisionByZero);
        }
        self.binary(
            other,
            "mod",
            |a, b| {
                a.checked_rem(b)
                    .map(|r| if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
            },
            |a, b| {
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            },
        )
    }

    pub fn checked_neg(self) -> Result<Number, EvaluationError> {
        match self {
            Number::Integer(value) => value
                .checked_neg()
                .map(Number::Integer)
                .ok_or(EvaluationError::IntegerOverflow("-")),
            Number::Double(value) => Ok(Number::Double(-value)),
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Integer(value) => Value::Integer(value),
            Number::Double(value) => Value::Double(value),
        }
    }
}
