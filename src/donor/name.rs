use serde::{Deserialize, Serialize};

use crate::errors::MailroomError;

/// Normalized parts of a donor name as entered at the prompt.
///
/// The suffix rides along for display but is deliberately excluded from the
/// deduplication key: a donor entered with and without a suffix is the same
/// person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub suffix: String,
}

impl NameParts {
    /// Parses free text into normalized name parts.
    ///
    /// An optional trailing suffix follows a comma (`"John Smith, Jr"`), is
    /// upper-cased, and reattaches to the canonical `full_name`. The rest is
    /// title-cased; the last whitespace token is the last name and everything
    /// before it the first name. Inputs that do not yield both a first and a
    /// last name are rejected.
    pub fn parse(raw: &str) -> Result<Self, MailroomError> {
        let (informal_raw, suffix_raw) = match raw.split_once(',') {
            Some((head, tail)) => (head, tail),
            None => (raw, ""),
        };
        let suffix = suffix_raw.trim().to_uppercase();

        let tokens: Vec<String> = informal_raw.split_whitespace().map(title_case).collect();
        let (last_name, first_tokens) = match tokens.split_last() {
            Some((last, rest)) => (last.clone(), rest),
            None => return Err(MailroomError::InvalidName(raw.to_string())),
        };
        let first_name = first_tokens.join(" ");
        if first_name.is_empty() || last_name.is_empty() {
            return Err(MailroomError::InvalidName(raw.to_string()));
        }

        let informal_name = format!("{} {}", first_name, last_name);
        let full_name = if suffix.is_empty() {
            informal_name
        } else {
            format!("{}, {}", informal_name, suffix)
        };

        Ok(Self {
            full_name,
            first_name,
            last_name,
            suffix,
        })
    }

    /// Case-folded `"first last"` comparison key, suffix excluded.
    pub fn match_key(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_lowercase()
    }
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
