mod common;

use std::fs;

use mailroom_core::errors::MailroomError;

use common::{donor, setup_storage};

#[test]
fn save_then_load_round_trips_records_in_order() {
    let storage = setup_storage();
    let donors = vec![
        donor("Jane Doe", &[10.0, 20.5]),
        donor("John Smith, Jr", &[100.0]),
    ];
    storage.save(&donors).expect("save donors");

    let loaded = storage.load().expect("load donors");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].full_name, "Jane Doe");
    assert_eq!(loaded[1].full_name, "John Smith, JR");
    assert_eq!(loaded[0].donations.len(), 2);
    assert_eq!(loaded[0].user_id, donors[0].user_id);
    assert_eq!(loaded[0].created, donors[0].created);
}

#[test]
fn missing_file_loads_as_empty_list() {
    let storage = setup_storage();
    let loaded = storage.load().expect("load with no file");
    assert!(loaded.is_empty());
}

#[test]
fn corrupt_file_is_fatal_not_fabricated() {
    let storage = setup_storage();
    fs::write(storage.donor_file(), "{ this is not json").unwrap();
    let err = storage.load().expect_err("corrupt file must not load");
    assert!(matches!(err, MailroomError::PersistenceCorrupt { .. }));
}

#[test]
fn failed_save_preserves_existing_file_and_memory() {
    let storage = setup_storage();
    let donors = vec![donor("Jane Doe", &[10.0])];
    storage.save(&donors).expect("initial save");
    let original = fs::read_to_string(storage.donor_file()).unwrap();

    // A directory squatting on the staging path forces the write to fail.
    let tmp_path = storage.donor_file().with_extension("tmp");
    fs::create_dir_all(&tmp_path).unwrap();

    let grown = vec![donor("Jane Doe", &[10.0]), donor("Amy Adams", &[5.0])];
    let err = storage.save(&grown).expect_err("staged write should fail");
    assert!(matches!(err, MailroomError::PersistenceDenied { .. }));

    let after = fs::read_to_string(storage.donor_file()).unwrap();
    assert_eq!(after, original, "failed save must not touch the donor file");
    assert_eq!(grown.len(), 2, "in-memory records survive the failure");
}
