use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures donor-record and persistence failures.
#[derive(Debug, Error)]
pub enum MailroomError {
    /// The entered name did not yield both a first and a last name.
    #[error("Invalid name `{0}`: a first and a last name are required")]
    InvalidName(String),
    /// The entered donation amount was not a positive number.
    #[error("Invalid amount `{0}`: the amount must be a positive number")]
    InvalidAmount(String),
    /// The donor file exists but cannot be parsed. Fatal at load time.
    #[error("Donor file `{path}` is corrupt: {source}")]
    PersistenceCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The donor file cannot be read or written. In-memory state survives.
    #[error("Donor file `{path}` is inaccessible: {source}")]
    PersistenceDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl MailroomError {
    /// True for errors the entry flow recovers from by re-prompting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MailroomError::InvalidName(_) | MailroomError::InvalidAmount(_)
        )
    }
}
