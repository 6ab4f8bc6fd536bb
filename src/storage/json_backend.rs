use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{donor::Donor, errors::MailroomError};

const DONOR_FILE: &str = "donors.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-backed donor persistence rooted at a data directory.
///
/// Saves stage the full serialized list to a temporary file and rename it
/// into place, so a failed write never clobbers the existing donor file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self, MailroomError> {
        let root = root.unwrap_or_else(default_root);
        fs::create_dir_all(&root).map_err(|source| MailroomError::PersistenceDenied {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self, MailroomError> {
        Self::new(None)
    }

    pub fn donor_file(&self) -> PathBuf {
        self.root.join(DONOR_FILE)
    }

    /// Loads the persisted donor list. A missing file is an empty list; a
    /// present but unparsable file is fatal (`PersistenceCorrupt`), never
    /// silently discarded.
    pub fn load(&self) -> Result<Vec<Donor>, MailroomError> {
        let path = self.donor_file();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no donor file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(MailroomError::PersistenceDenied { path, source }),
        };
        let donors: Vec<Donor> = serde_json::from_str(&data)
            .map_err(|source| MailroomError::PersistenceCorrupt { path, source })?;
        tracing::info!(count = donors.len(), "donor records loaded");
        Ok(donors)
    }

    /// Serializes the full donor list atomically. The caller's in-memory
    /// state is untouched either way; on failure the previous file survives.
    pub fn save(&self, donors: &[Donor]) -> Result<(), MailroomError> {
        let path = self.donor_file();
        let json = serde_json::to_string_pretty(donors)?;
        write_atomic(&path, &json)?;
        tracing::info!(count = donors.len(), path = %path.display(), "donor records saved");
        Ok(())
    }
}

/// Application home override, used by tests and scripted runs to keep all
/// state away from the real user directories.
pub(crate) fn env_home() -> Option<PathBuf> {
    std::env::var_os("MAILROOM_HOME").map(PathBuf::from)
}

fn default_root() -> PathBuf {
    env_home().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailroom")
    })
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<(), MailroomError> {
    let tmp = path.with_extension(TMP_SUFFIX);
    let denied = |source: std::io::Error| MailroomError::PersistenceDenied {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, data).map_err(denied)?;
    fs::rename(&tmp, path).map_err(denied)?;
    Ok(())
}
