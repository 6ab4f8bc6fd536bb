//! Main command loop: dispatch, suggestions, and the quit-time save guard.

use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::donor::{render_report, DonorStore};
use crate::errors::MailroomError;
use crate::letter::write_all_letters;
use crate::storage::JsonStorage;

use super::entry_flow::run_entry;
use super::io::{confirm_action, ConsoleReader, LineReader, StdinReader};
use super::output::{self, OutputPreferences};

const PROMPT: &str = "mailroom> ";

const COMMANDS: &[(&str, &str)] = &[
    ("enter", "Enter a donation (creates the donor when needed)"),
    ("report", "Show the donor summary report"),
    ("letters", "Write a thank-you letter file for every donor"),
    ("help", "Show this command list"),
    ("quit", "Save donor records and exit"),
];

/// Failures that abort the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] MailroomError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Owns the donor store and its collaborators for one shell session.
pub struct Shell {
    mode: CliMode,
    config: Config,
    storage: JsonStorage,
    store: DonorStore,
}

impl Shell {
    /// Loads config and donor records. A corrupt donor file is fatal here:
    /// the process must stop rather than fabricate or discard data.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::new()?.load()?;
        let storage = JsonStorage::new(config.data_dir.clone())?;
        let store = DonorStore::from_records(storage.load()?);
        Ok(Self::with_parts(mode, config, storage, store))
    }

    /// Assembles a shell from explicit collaborators, letting tests run
    /// sessions against isolated storage.
    pub fn with_parts(
        mode: CliMode,
        config: Config,
        storage: JsonStorage,
        store: DonorStore,
    ) -> Self {
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_mode,
        });
        Self {
            mode,
            config,
            storage,
            store,
        }
    }

    pub fn store(&self) -> &DonorStore {
        &self.store
    }

    fn letters_dir(&self) -> PathBuf {
        let data_root = self
            .storage
            .donor_file()
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        self.config.letters_dir_or(&data_root)
    }

    fn dispatch(&mut self, command: &str, reader: &mut dyn LineReader) -> LoopControl {
        match command {
            "e" | "enter" | "a" | "add" | "s" | "send" => {
                run_entry(&mut self.store, reader);
                LoopControl::Continue
            }
            "l" | "list" | "r" | "report" => {
                println!("\n{}\n", render_report(&self.store));
                LoopControl::Continue
            }
            "p" | "print" | "letters" => {
                self.write_letters();
                LoopControl::Continue
            }
            "h" | "help" | "?" => {
                self.print_help();
                LoopControl::Continue
            }
            "q" | "quit" | "exit" => {
                if self.try_quit() {
                    LoopControl::Exit
                } else {
                    LoopControl::Continue
                }
            }
            other => {
                self.suggest_command(other);
                LoopControl::Continue
            }
        }
    }

    fn print_help(&self) {
        output::info("Available commands:");
        for (name, description) in COMMANDS {
            output::info(format!("  {:<8} {}", name, description));
        }
    }

    fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let best = COMMANDS
            .iter()
            .map(|(name, _)| (levenshtein(name, input), *name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    fn write_letters(&self) {
        let dir = self.letters_dir();
        match write_all_letters(&self.store, &dir) {
            Ok(written) => output::success(format!(
                "{} letter(s) written to {}.",
                written.len(),
                dir.display()
            )),
            Err(err) => output::error(err),
        }
    }

    /// Saves the store before exiting. On a denied write the in-memory
    /// records survive; interactive sessions must explicitly confirm before
    /// abandoning them, script sessions abandon after reporting.
    fn try_quit(&mut self) -> bool {
        match self.storage.save(self.store.donors()) {
            Ok(()) => {
                output::success(format!("{} donor record(s) saved.", self.store.len()));
                true
            }
            Err(err) => {
                output::error(&err);
                output::warning("Donor records are still held in memory.");
                if self.mode == CliMode::Script {
                    return true;
                }
                match confirm_action("Quit anyway and abandon changes?", false) {
                    Ok(abandon) => abandon,
                    Err(_) => false,
                }
            }
        }
    }

    /// Drives the shell until quit or end of input.
    pub fn run(&mut self, reader: &mut dyn LineReader) -> Result<(), CliError> {
        output::info("Donation Wizard — type `help` for commands.");
        loop {
            let line = reader.read_line(PROMPT);
            if line.is_empty() {
                if reader.is_exhausted() {
                    let _ = self.try_quit();
                    break;
                }
                continue;
            }
            let tokens = match shell_words::split(&line) {
                Ok(tokens) => tokens,
                Err(err) => {
                    output::warning(err.to_string());
                    continue;
                }
            };
            let Some(command) = tokens.first() else {
                continue;
            };
            match self.dispatch(&command.to_lowercase(), reader) {
                LoopControl::Continue => {}
                LoopControl::Exit => break,
            }
        }
        output::info("Thank you for using Donation Wizard!");
        Ok(())
    }
}

/// Entry point used by the binary. Script mode is selected with the
/// `MAILROOM_CLI_SCRIPT` environment variable and reads stdin line by line.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("MAILROOM_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut shell = Shell::new(mode)?;
    match mode {
        CliMode::Interactive => {
            let mut reader = ConsoleReader::new()?;
            shell.run(&mut reader)
        }
        CliMode::Script => {
            let mut reader = StdinReader::new();
            shell.run(&mut reader)
        }
    }
}
