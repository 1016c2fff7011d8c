mod error;
mod repl;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use error::RunnerError;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. Without one, an interactive session starts.
    path: Option<PathBuf>,
    /// Evaluate EXPR, print its value and exit.
    #[arg(short, long, value_name = "EXPR", conflicts_with = "path")]
    eval: Option<String>,
    /// Log filter such as `debug` or `slip_interpreter=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn init_logging(log_level: Option<&str>) -> Result<(), RunnerError> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    init_logging(cli.log_level.as_deref())?;

    match (cli.eval, cli.path) {
        (Some(expression), _) => {
            let value = runner::execute_expression(&expression)?;
            println!("{}", value);
            Ok(())
        }
        (None, Some(path)) => runner::execute_file(&path),
        (None, None) => repl::start(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
