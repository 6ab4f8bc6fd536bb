#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use mailroom_core::donor::{Donation, Donor, DonorStore, NameParts};
use mailroom_core::storage::JsonStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated JSON storage backed by a unique directory.
pub fn setup_storage() -> JsonStorage {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStorage::new(Some(base)).expect("create json storage backend")
}

pub fn donor(name: &str, amounts: &[f64]) -> Donor {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut amounts = amounts.iter();
    let first = *amounts.next().expect("donors need a first donation");
    let mut donor = Donor::new(
        NameParts::parse(name).expect("valid donor name"),
        Donation {
            amount: first,
            date,
        },
        created,
    );
    for &amount in amounts {
        donor.donations.push(Donation { amount, date });
    }
    donor
}

pub fn store_with(records: &[(&str, &[f64])]) -> DonorStore {
    DonorStore::from_records(
        records
            .iter()
            .map(|(name, amounts)| donor(name, amounts))
            .collect(),
    )
}
