use slip_core::Value;
use slip_interpreter::Error;

/// Shows evaluation results on stdout and failures on stderr.
pub struct Printer {}

impl Printer {
    pub fn print(&mut self, result: Result<Value, Error>) {
        match result {
            Ok(value) => println!("{}", value),
            Err(error) => eprintln!("{}", describe_error(&error)),
        }
    }
}

fn describe_error(error: &Error) -> String {
    match error {
        Error::Lex(error) => format!("Error reading input:\n{}", error),
        Error::Parse(error) => format!("Error parsing input:\n{}", error),
        Error::Evaluation(error) => format!("Error evaluating:\n{}", error),
    }
}

#[cfg(test)]
mod tests {
    use slip_interpreter::{evaluate_source, new_global_environment};

    use super::*;

    #[test]
    fn test_describe_error() {
        let tests = vec![
            ("(+ 1 #)", "Error reading input:\n"),
            ("(+ 1", "Error parsing input:\n"),
            ("(car '(1))", "Error evaluating:\nUnbound symbol: car"),
            (
                "(+ 1 \"a\")",
                "Error evaluating:\nInvalid argument for +. Expected number, got string \"a\"",
            ),
        ];

        for (input, expected) in tests {
            let error = evaluate_source(input, &new_global_environment()).unwrap_err();
            let described = describe_error(&error);
            assert!(
                described.starts_with(expected),
                "{:?} does not start with {:?}",
                described,
                expected
            );
        }
    }
}
