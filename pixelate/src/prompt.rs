use anyhow::{bail, Context, Result};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, Write};

/// Somewhere answers come from, one line per question.
pub trait LineSource {
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, question: &str) -> Result<Option<String>>;
}

/// Line editor on the controlling terminal.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("Couldn't open terminal for input")?;

        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, question: &str) -> Result<Option<String>> {
        match self.editor.readline(question) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => bail!("Interrupted while waiting for an answer"),
            Err(err) => Err(err).context("Couldn't read from terminal"),
        }
    }
}

/// Asks questions until the answers parse; complaints go to `writer`.
pub struct Prompt<L, W> {
    lines: L,
    writer: W,
}

impl Prompt<Terminal, io::Stdout> {
    pub fn terminal() -> Result<Self> {
        Ok(Self::new(Terminal::new()?, io::stdout()))
    }
}

impl<L, W> Prompt<L, W>
where
    L: LineSource,
    W: Write,
{
    pub fn new(lines: L, writer: W) -> Self {
        Self { lines, writer }
    }

    pub fn ask(&mut self, question: &str) -> Result<String> {
        match self.lines.read_line(question)? {
            Some(line) => Ok(line.trim().to_owned()),
            None => bail!("Input closed while waiting for an answer"),
        }
    }

    /// Validates `initial` (if any) and then keeps asking `question` until
    /// `parse` accepts an answer.
    pub fn resolve<T>(
        &mut self,
        initial: Option<String>,
        question: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T> {
        let mut answer = initial;

        loop {
            let raw = match answer.take() {
                Some(raw) => raw,
                None => self.ask(question)?,
            };

            match parse(raw.trim()) {
                Ok(value) => return Ok(value),
                Err(msg) => writeln!(self.writer, "Error: {}", msg)?,
            }
        }
    }
}
