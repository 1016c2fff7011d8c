use slip_core::{EvaluationError, List, Value};

/// Lists and nil both behave as sequences; nil is the empty one.
fn sequence<'a>(
    function: &'static str,
    value: &'a Value,
) -> Result<Option<&'a List>, EvaluationError> {
    match value {
        Value::Nil => Ok(None),
        Value::List(list) => Ok(Some(list)),
        other => Err(EvaluationError::type_mismatch(function, "list", other)),
    }
}

pub fn first(value: &Value) -> Result<Value, EvaluationError> {
    let list = sequence("first", value)?;
    Ok(list.and_then(List::first).cloned().unwrap_or(Value::Nil))
}

/// The elements after the first, or nil when there are none.
pub fn next(value: &Value) -> Result<Value, EvaluationError> {
    let rest = sequence("next", value)?
        .map(List::rest)
        .unwrap_or_default();
    if rest.is_empty() {
        Ok(Value::Nil)
    } else {
        Ok(Value::List(rest))
    }
}

pub fn cons(head: &Value, tail: &Value) -> Result<Value, EvaluationError> {
    let tail = sequence("cons", tail)?.cloned().unwrap_or_default();
    Ok(Value::List(tail.cons(head.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::list(values.iter().copied().map(Value::integer))
    }

    #[test]
    fn test_first() {
        assert_eq!(first(&ints(&[1, 2])), Ok(Value::integer(1)));
        assert_eq!(first(&ints(&[])), Ok(Value::Nil));
        assert_eq!(first(&Value::Nil), Ok(Value::Nil));
        assert_eq!(
            first(&Value::integer(1)),
            Err(EvaluationError::type_mismatch("first", "list", &Value::integer(1)))
        );
    }

    #[test]
    fn test_next() {
        assert_eq!(next(&ints(&[1, 2, 3])), Ok(ints(&[2, 3])));
        assert_eq!(next(&ints(&[1])), Ok(Value::Nil));
        assert_eq!(next(&ints(&[])), Ok(Value::Nil));
        assert_eq!(next(&Value::Nil), Ok(Value::Nil));
    }

    #[test]
    fn test_cons() {
        let original = ints(&[2, 3]);

        assert_eq!(cons(&Value::integer(1), &original), Ok(ints(&[1, 2, 3])));
        assert_eq!(original, ints(&[2, 3]));
        assert_eq!(cons(&Value::integer(1), &Value::Nil), Ok(ints(&[1])));
        assert_eq!(
            cons(&Value::integer(1), &Value::integer(2)),
            Err(EvaluationError::type_mismatch("cons", "list", &Value::integer(2)))
        );
    }
}
