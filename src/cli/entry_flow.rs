//! Donation entry: a small state machine that turns raw name and amount
//! input into a store mutation or a no-op cancellation.

use chrono::Utc;

use crate::donor::{render_report, DonorStore, NameParts};
use crate::errors::MailroomError;
use crate::letter::{render_letter, DonorHint};

use super::io::LineReader;
use super::output;

const NAME_PROMPT: &str = "Donor name, (l)ist or (q)uit: ";
const AMOUNT_PROMPT: &str = "Donation amount or (q)uit: ";

/// States of one donation entry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    AwaitName,
    AwaitAmount,
}

/// Terminal result of one entry cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A donation was recorded; `is_new` marks a freshly created donor.
    Completed { full_name: String, is_new: bool },
    /// The operator quit; the store is untouched.
    Cancelled,
}

fn is_quit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "q" | "quit")
}

fn is_list(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "l" | "list")
}

/// Parses a donation amount, requiring a finite, strictly positive number.
pub fn parse_amount(raw: &str) -> Result<f64, MailroomError> {
    let invalid = || MailroomError::InvalidAmount(raw.to_string());
    let amount: f64 = raw.parse().map_err(|_| invalid())?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid());
    }
    Ok(amount)
}

/// Runs one entry cycle against the store.
///
/// At the name prompt, `quit` cancels, `list` renders the report in place,
/// empty input re-prompts, and an unparsable name is reported and looped.
/// At the amount prompt, `quit` cancels with no mutation and a bad amount
/// loops. A valid amount appends the donation dated today and prints the
/// thank-you letter.
pub fn run_entry(store: &mut DonorStore, reader: &mut dyn LineReader) -> EntryOutcome {
    let mut state = EntryState::AwaitName;
    let mut pending: Option<(Option<usize>, NameParts)> = None;

    loop {
        match state {
            EntryState::AwaitName => {
                let line = reader.read_line(NAME_PROMPT);
                if is_quit(&line) || reader.is_exhausted() {
                    return cancel();
                }
                if is_list(&line) {
                    println!("\n{}\n", render_report(store));
                    continue;
                }
                if line.is_empty() {
                    continue;
                }
                match NameParts::parse(&line) {
                    Ok(parts) => {
                        let index = store.find_by_name(&parts);
                        pending = Some((index, parts));
                        state = EntryState::AwaitAmount;
                    }
                    Err(err) => output::error(err),
                }
            }
            EntryState::AwaitAmount => {
                let line = reader.read_line(AMOUNT_PROMPT);
                if is_quit(&line) || reader.is_exhausted() {
                    return cancel();
                }
                match parse_amount(&line) {
                    Ok(amount) => {
                        let (index, parts) =
                            pending.take().expect("amount state requires a parsed name");
                        let today = Utc::now().date_naive();
                        let (donor, is_new) = store.add_donation(index, parts, amount, today);
                        let hint = if is_new {
                            DonorHint::New
                        } else {
                            DonorHint::Returning
                        };
                        println!("\n{}", render_letter(donor, hint));
                        let full_name = donor.full_name.clone();
                        tracing::info!(donor = %full_name, amount, is_new, "donation entry completed");
                        return EntryOutcome::Completed { full_name, is_new };
                    }
                    Err(err) => output::error(err),
                }
            }
        }
    }
}

fn cancel() -> EntryOutcome {
    output::info("Donation cancelled.");
    EntryOutcome::Cancelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::io::ScriptedReader;

    #[test]
    fn records_a_new_donor() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(["Jane Doe", "25.00"]);
        let outcome = run_entry(&mut store, &mut reader);
        assert_eq!(
            outcome,
            EntryOutcome::Completed {
                full_name: "Jane Doe".into(),
                is_new: true
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_name_different_casing_appends_not_duplicates() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(["Jane Doe", "10"]);
        run_entry(&mut store, &mut reader);

        let mut reader = ScriptedReader::new(["  jane doe ", "20.50"]);
        let outcome = run_entry(&mut store, &mut reader);
        assert_eq!(
            outcome,
            EntryOutcome::Completed {
                full_name: "Jane Doe".into(),
                is_new: false
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.donors()[0].donations.len(), 2);
    }

    #[test]
    fn quit_at_name_prompt_cancels() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(["quit"]);
        assert_eq!(run_entry(&mut store, &mut reader), EntryOutcome::Cancelled);
        assert!(store.is_empty());
    }

    #[test]
    fn quit_at_amount_prompt_leaves_store_unchanged() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(["Jane Doe", "q"]);
        assert_eq!(run_entry(&mut store, &mut reader), EntryOutcome::Cancelled);
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_name_and_amount_re_prompt() {
        let mut store = DonorStore::new();
        let mut reader =
            ScriptedReader::new(["Madonna", "", "Jane Doe", "abc", "-5", "0", "25.00"]);
        let outcome = run_entry(&mut store, &mut reader);
        assert!(matches!(outcome, EntryOutcome::Completed { is_new: true, .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.donors()[0].donations[0].amount, 25.0);
    }

    #[test]
    fn list_directive_stays_in_name_state() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(["list", "Jane Doe", "5"]);
        let outcome = run_entry(&mut store, &mut reader);
        assert!(matches!(outcome, EntryOutcome::Completed { .. }));
    }

    #[test]
    fn exhausted_reader_cancels_instead_of_spinning() {
        let mut store = DonorStore::new();
        let mut reader = ScriptedReader::new(Vec::<String>::new());
        assert_eq!(run_entry(&mut store, &mut reader), EntryOutcome::Cancelled);
    }

    #[test]
    fn amount_parser_rejects_non_positive_and_garbage() {
        assert!(parse_amount("10.5").is_ok());
        for bad in ["0", "-1", "abc", "", "NaN", "inf"] {
            assert!(parse_amount(bad).is_err(), "`{bad}` should be rejected");
        }
    }
}
