use std::fs;
use std::path::Path;

use slip_core::Value;
use slip_interpreter::{evaluate_source, new_global_environment};
use tracing::info;

use crate::error::RunnerError;

/// Runs a script in a fresh global environment. Only output written by the
/// script itself is shown; the value of the last form is discarded.
pub fn execute_file(path: &Path) -> Result<(), RunnerError> {
    let source = fs::read_to_string(path).map_err(|source| RunnerError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "running script");

    evaluate_source(&source, &new_global_environment())?;
    Ok(())
}

pub fn execute_expression(expression: &str) -> Result<Value, RunnerError> {
    Ok(evaluate_source(expression, &new_global_environment())?)
}
