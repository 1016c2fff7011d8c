mod printer;
mod reader;

use rustyline::DefaultEditor;
use slip_core::Environment;
use slip_interpreter::{evaluate_source, new_global_environment};

use printer::Printer;
use reader::{ReadOutput, Reader};

use crate::error::RunnerError;

struct Repl {
    reader: Reader,
    environment: Environment,
    printer: Printer,
}

impl Repl {
    fn run(mut self) -> Result<(), RunnerError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Line(line) => {
                    let result = evaluate_source(&line, &self.environment);
                    self.printer.print(result)
                }
            }
        }
        Ok(())
    }
}

/// Reads lines until end of input, evaluating each one in a single global
/// environment so definitions carry over between lines.
pub fn start() -> Result<(), RunnerError> {
    println!("Slip {}", env!("CARGO_PKG_VERSION"));

    Repl {
        reader: Reader::new(DefaultEditor::new()?),
        environment: new_global_environment(),
        printer: Printer {},
    }
    .run()
}
