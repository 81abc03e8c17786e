use crate::domain::error::StoreError;
use crate::domain::model::Candidate;
use crate::domain::traits::Chooser;
use std::io::{BufRead, Write};

/// Line-oriented question/answer over any reader and writer (stdin/stdout in the binary).
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` without a newline and read one answer line.
    /// End of input answers with an empty string.
    pub fn ask(&mut self, question: &str) -> Result<String, StoreError> {
        write!(self.output, "{question}")
            .and_then(|()| self.output.flush())
            .map_err(|e| StoreError::io("writing prompt", e))?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| StoreError::io("reading answer", e))?;

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<(), StoreError> {
        writeln!(self.output, "{}", text.as_ref()).map_err(|e| StoreError::io("writing output", e))
    }

    pub fn write_raw(&mut self, text: &str) -> Result<(), StoreError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| StoreError::io("writing output", e))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Chooser for TerminalPrompter<R, W> {
    fn choose(&mut self, name: &str, candidates: &[Candidate<'_>]) -> Result<String, StoreError> {
        self.say(format!("Multiple bookmarks with the name {name} were found."))?;
        for (idx, candidate) in candidates.iter().enumerate() {
            self.say(format!("Category '{}'", candidate.category))?;
            self.say(format!("--> {idx} {}", candidate.bookmark))?;
        }
        self.ask("Which number corresponds to the bookmark you'd like to select? ")
    }
}
