use std::io::{self, Write};

use slip_core::{EvaluationError, Value};

/// Renders each argument the way the printer does, separated by single spaces.
pub fn render_arguments(args: &[Value]) -> String {
    args.iter()
        .map(Value::render)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_stdout(text: &str) -> Result<Value, EvaluationError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|error| EvaluationError::Io(error.to_string().into()))?;
    Ok(Value::Nil)
}

pub fn print(args: &[Value]) -> Result<Value, EvaluationError> {
    write_stdout(&render_arguments(args))
}

pub fn println(args: &[Value]) -> Result<Value, EvaluationError> {
    let mut line = render_arguments(args);
    line.push('\n');
    write_stdout(&line)
}

pub fn newline() -> Result<Value, EvaluationError> {
    write_stdout("\n")
}
