pub mod builtins;
pub mod evaluator;
pub mod numeric;

use slip_core::{parse, Environment, EvaluationError, LexError, ParseError, Value};
use thiserror::Error;
use tracing::debug;

/// Any failure of [`evaluate_source`], split by the stage that raised it.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum Error {
    #[error("Lexing error: {0}")]
    Lex(LexError),
    #[error("Parsing error: {0}")]
    Parse(ParseError),
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Lex(error) => Error::Lex(error),
            error => Error::Parse(error),
        }
    }
}

/// A fresh global environment holding the standard library. Environments
/// created by separate calls share nothing.
pub fn new_global_environment() -> Environment {
    let environment = Environment::new();
    builtins::register(&environment);
    environment
}

/// Reads every top-level form of `source`, then evaluates them in order in
/// `environment`, returning the value of the last one (nil for empty input).
///
/// Nothing is evaluated when the source fails to read. An evaluation error
/// stops at the failing form; definitions made by earlier forms remain.
pub fn evaluate_source(source: &str, environment: &Environment) -> Result<Value, Error> {
    let forms = parse(source)?;

    let mut result = Value::Nil;
    for form in &forms {
        debug!(%form, "evaluating top-level form");
        result = evaluator::eval(form, environment)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use slip_core::Arity;

    use super::*;

    fn test_source(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let environment = new_global_environment();
            let result = evaluate_source(input, &environment);

            assert_eq!(
                result.map(|value| value.render()),
                Ok(expected.to_string()),
                "evaluating {}",
                input
            );
        }
    }

    fn evaluation_error(input: &str) -> EvaluationError {
        match evaluate_source(input, &new_global_environment()) {
            Err(Error::Evaluation(error)) => error,
            other => panic!("expected an evaluation error for {}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_arithmetic() {
        test_source(vec![
            ("(+ 1)", "1"),
            ("(+ 1 1)", "2"),
            ("(+ 1 2 3)", "6"),
            ("(- 1)", "-1"),
            ("(- 1 1)", "0"),
            ("(- 1 1 2)", "-2"),
            ("(* 4)", "4"),
            ("(* 4 2)", "8"),
            ("(* 4 2 4)", "32"),
            ("(/ 4)", "0"),
            ("(/ 4 2)", "2"),
            ("(/ 4 2 4)", "0"),
            ("(/ 1.0 4)", "0.25"),
            ("(+ 1 2.0)", "3.0"),
            ("(mod 7 3)", "1"),
            ("(mod -7 3)", "2"),
            ("(rem -7 3)", "-1"),
            ("(inc 1)", "2"),
            ("(dec 1)", "0"),
        ]);
    }

    #[test]
    fn test_relational() {
        test_source(vec![
            ("(> 3 2 1)", "true"),
            ("(> 3 1 2)", "false"),
            ("(>= 3 3 1)", "true"),
            ("(< 1 2 3)", "true"),
            ("(< 1 3 2)", "false"),
            ("(<= 1 1 2)", "true"),
            ("(= 1 1 1)", "true"),
            ("(= 1 1 2)", "false"),
            ("(!= 1 2)", "true"),
            ("(= \"abc\" \"abc\")", "true"),
            ("(= '(1 2 3) '(1 2 3))", "true"),
            ("(= '(1 2 3) '(1 2))", "false"),
            ("(= 'a 'a)", "true"),
            ("(= 1 1.0)", "true"),
        ]);
    }

    #[test]
    fn test_predicates_and_lists() {
        test_source(vec![
            ("(nil? nil)", "true"),
            ("(nil? '())", "false"),
            ("(zero? 0)", "true"),
            ("(zero? 0.0)", "true"),
            ("(pos? 2)", "true"),
            ("(neg? 2)", "false"),
            ("(even? 2)", "true"),
            ("(odd? 2)", "false"),
            ("(empty? '())", "true"),
            ("(empty? nil)", "true"),
            ("(empty? '(1))", "false"),
            ("(int? 1)", "true"),
            ("(double? 1.5)", "true"),
            ("(number? 1.5)", "true"),
            ("(bool? false)", "true"),
            ("(string? \"s\")", "true"),
            ("(list? '(1))", "true"),
            ("(symbol? 'a)", "true"),
            ("(not nil)", "true"),
            ("(not 0)", "false"),
            ("(first '(1 2 3))", "1"),
            ("(first '())", "nil"),
            ("(first nil)", "nil"),
            ("(next '(1 2 3))", "(2 3)"),
            ("(next '(1))", "nil"),
            ("(next '())", "nil"),
            ("(cons 1 '(2 3))", "(1 2 3)"),
            ("(cons 1 nil)", "(1)"),
        ]);
    }

    #[test]
    fn test_programs() {
        test_source(vec![
            ("", "nil"),
            ("; only a comment", "nil"),
            ("(def x 1) (def y 2) (+ x y)", "3"),
            ("(def lst '(2 3)) (cons 1 lst) lst", "(2 3)"),
            (
                "(def fact (fn (n) (if (<= n 1) 1 (* n (fact (- n 1)))))) (fact 10)",
                "3628800",
            ),
            (
                "(def len (fn (l) (if (empty? l) 0 (inc (len (next l)))))) (len '(1 2 3 4))",
                "4",
            ),
            ("(do (def a 1) (def f (fn () a)) (def a 2) (f))", "2"),
            (
                "(def make-adder (fn (n) (fn (x) (+ x n)))) ((make-adder 3) 4)",
                "7",
            ),
            ("(let ((x 1) (y 2)) (+ x y))", "3"),
            ("(if nil 1 2)", "2"),
            ("(if '() 1 2)", "1"),
            ("(if 0 1 2)", "1"),
            ("(and 1 2 3)", "3"),
            ("(or nil false 3)", "3"),
            ("(defn sq (x) (* x x)) (sq 5)", "25"),
            ("(println \"hello\" 1)", "nil"),
        ]);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            evaluation_error("undefined"),
            EvaluationError::UnboundSymbol("undefined".into())
        );
        assert_eq!(
            evaluation_error("(1 2)"),
            EvaluationError::CallNonFunction(Value::integer(1))
        );
        assert_eq!(evaluation_error("(/ 1 0)"), EvaluationError::DivisionByZero);
        assert_eq!(
            evaluation_error("(+ 1 \"a\")"),
            EvaluationError::type_mismatch("+", "number", &Value::string("a"))
        );
        assert_eq!(
            evaluation_error("((fn (x) x))"),
            EvaluationError::WrongArgumentCount {
                function: "<fn>".into(),
                expected: Arity::Exactly(1),
                actual: 0
            }
        );
        assert!(matches!(
            evaluation_error("(+ 9223372036854775807 1)"),
            EvaluationError::IntegerOverflow(_)
        ));
        assert!(matches!(
            evaluation_error("(def)"),
            EvaluationError::MalformedSpecialForm { form: "def", .. }
        ));
    }

    #[test]
    fn test_read_errors_are_distinguished() {
        let environment = new_global_environment();

        assert!(matches!(
            evaluate_source("(+ 1 #)", &environment),
            Err(Error::Lex(LexError::UnexpectedCharacter { character: '#', .. }))
        ));
        assert!(matches!(
            evaluate_source("(+ 1 2", &environment),
            Err(Error::Parse(ParseError::UnterminatedList { start: 0 }))
        ));
        assert!(matches!(
            evaluate_source(")", &environment),
            Err(Error::Parse(ParseError::UnexpectedToken(_)))
        ));
    }

    #[test]
    fn test_long_flat_list() {
        let source = format!("(first '({}))", "1 ".repeat(100_000));

        assert_eq!(
            evaluate_source(&source, &new_global_environment()),
            Ok(Value::integer(1))
        );
    }

    #[test]
    fn test_parse_failure_evaluates_nothing() {
        let environment = new_global_environment();

        assert!(evaluate_source("(def x 1) (", &environment).is_err());
        assert!(environment.resolve("x").is_none());
    }

    #[test]
    fn test_environment_persists_between_calls() {
        let environment = new_global_environment();

        assert_eq!(
            evaluate_source("(def x 40) (undefined)", &environment).map(|_| ()),
            Err(Error::Evaluation(EvaluationError::UnboundSymbol(
                "undefined".into()
            )))
        );
        assert_eq!(
            evaluate_source("(+ x 2)", &environment),
            Ok(Value::integer(42))
        );
        assert_eq!(
            evaluate_source("x", &new_global_environment()),
            Err(Error::Evaluation(EvaluationError::UnboundSymbol("x".into())))
        );
    }
}
