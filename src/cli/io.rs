use std::collections::VecDeque;
use std::io::{self, BufRead};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::{error::ReadlineError, DefaultEditor};

/// Line-based input seam for the shell and the entry flow.
///
/// `read_line` returns a trimmed string and never raises: an interrupt or
/// end-of-input reads as the empty string. `is_exhausted` reports that the
/// underlying source has ended, so loops can wind down instead of spinning
/// on empty reads.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> String;

    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Interactive reader backed by a rustyline editor with history.
pub struct ConsoleReader {
    editor: DefaultEditor,
    exhausted: bool,
}

impl ConsoleReader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            exhausted: false,
        })
    }
}

impl LineReader for ConsoleReader {
    fn read_line(&mut self, prompt: &str) -> String {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(&trimmed).ok();
                }
                trimmed
            }
            Err(ReadlineError::Interrupted) => String::new(),
            Err(ReadlineError::Eof) => {
                self.exhausted = true;
                String::new()
            }
            Err(_) => {
                self.exhausted = true;
                String::new()
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Script-mode reader consuming stdin line by line, for piped sessions.
pub struct StdinReader {
    exhausted: bool,
}

impl StdinReader {
    pub fn new() -> Self {
        Self { exhausted: false }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, _prompt: &str) -> String {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.exhausted = true;
                String::new()
            }
            Ok(_) => line.trim().to_string(),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Queued reader for tests: yields the scripted lines, then reads as
/// exhausted.
pub struct ScriptedReader {
    lines: VecDeque<String>,
    exhausted: bool,
}

impl ScriptedReader {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            exhausted: false,
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> String {
        match self.lines.pop_front() {
            Some(line) => line.trim().to_string(),
            None => {
                self.exhausted = true;
                String::new()
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
}
