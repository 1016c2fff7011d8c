use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Could not read {}: {source}", .path.display())]
    ReadScript { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Slip(#[from] slip_interpreter::Error),
    #[error("Invalid log level: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}
