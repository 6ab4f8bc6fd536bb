#![doc(test(attr(deny(warnings))))]

//! Mailroom Core offers donor-record, donation-entry, and reporting
//! primitives that power the `mailroom_cli` donor management shell.

pub mod cli;
pub mod config;
pub mod donor;
pub mod errors;
pub mod format;
pub mod letter;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("mailroom_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Mailroom Core tracing initialized.");
    });
}
