use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

const PROMPT: &str = "slip> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Line(String),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new(rl: DefaultEditor) -> Self {
        Self { rl }
    }

    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        match self.rl.readline(PROMPT) {
            // Ctrl-C drops the current line
            Err(ReadlineError::Interrupted) => Ok(ReadOutput::Clear),
            Err(ReadlineError::Eof) => Ok(ReadOutput::Exit),
            Err(err) => Err(err),
            Ok(line) if line.trim().is_empty() => Ok(ReadOutput::Clear),
            Ok(line) => {
                if let Err(err) = self.rl.add_history_entry(line.as_str()) {
                    warn!(%err, "could not record history entry");
                }
                Ok(ReadOutput::Line(line))
            }
        }
    }
}
