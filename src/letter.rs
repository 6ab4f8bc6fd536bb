//! Thank-you letter rendering and per-donor letter files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::donor::{Donor, DonorStore};
use crate::errors::MailroomError;

/// Tone hint interpolated into the letter body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonorHint {
    New,
    Returning,
    Wonderful,
}

impl DonorHint {
    fn word(self) -> &'static str {
        match self {
            DonorHint::New => "new",
            DonorHint::Returning => "returning",
            DonorHint::Wonderful => "wonderful",
        }
    }
}

/// Renders the thank-you letter for one donor. Purely presentational; only
/// `full_name` and `last_name` feed the template.
pub fn render_letter(donor: &Donor, hint: DonorHint) -> String {
    format!(
        "Dearest {full_name},\n\
         \n\
         We are grateful for the generous donation on behalf of\n\
         the {last_name} family.\n\
         \n\
         It is through the donations of {hint} patrons like yourself that\n\
         allows us to continue to support the community.\n\
         \n\
         Sincerely,\n\
         \n\
         Tux Humboldt\n\
         Shark Loss Prevention Institute\n",
        full_name = donor.full_name,
        last_name = donor.last_name,
        hint = hint.word(),
    )
}

/// File stem for a donor letter: `thank_you_<last>_<suffix>_<first>`,
/// lower-cased with spaces collapsed to underscores.
fn letter_file_name(donor: &Donor) -> String {
    let stem = [
        "thank_you",
        donor.last_name.as_str(),
        donor.suffix.as_str(),
        donor.first_name.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .cloned()
    .collect::<Vec<_>>()
    .join("_");
    format!("{}.txt", stem.to_lowercase().replace(' ', "_"))
}

/// Writes one letter file per donor into `dir`, returning the created paths.
pub fn write_all_letters(store: &DonorStore, dir: &Path) -> Result<Vec<PathBuf>, MailroomError> {
    fs::create_dir_all(dir).map_err(|source| MailroomError::PersistenceDenied {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::with_capacity(store.len());
    for donor in store.donors() {
        let path = dir.join(letter_file_name(donor));
        let body = render_letter(donor, DonorHint::Wonderful);
        fs::write(&path, body).map_err(|source| MailroomError::PersistenceDenied {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    tracing::info!(count = written.len(), dir = %dir.display(), "donor letters written");
    Ok(written)
}
