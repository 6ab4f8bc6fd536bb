//! Donor domain: name normalization, records, the in-memory store, and the
//! fixed-width donor report.

pub mod name;
pub mod record;
pub mod report;
pub mod store;

pub use name::NameParts;
pub use record::{Donation, Donor};
pub use report::render_report;
pub use store::DonorStore;
