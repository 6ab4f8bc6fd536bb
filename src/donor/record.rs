use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::name::NameParts;

/// A single gift: strictly positive amount on a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub amount: f64,
    pub date: NaiveDate,
}

/// A unique person tracked by normalized name, owning an append-only
/// sequence of donations. Created only alongside a first donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub suffix: String,
    pub user_id: Uuid,
    pub created: DateTime<Utc>,
    pub donations: Vec<Donation>,
}

impl Donor {
    /// Builds a new donor record with its first donation. The id is a
    /// deterministic name-based hash over the canonical full name and the
    /// creation stamp, so it is stable for the record's lifetime.
    pub fn new(parts: NameParts, first_donation: Donation, created: DateTime<Utc>) -> Self {
        let id_source = format!("{}{}", parts.full_name, created.to_rfc3339());
        Self {
            full_name: parts.full_name,
            first_name: parts.first_name,
            last_name: parts.last_name,
            suffix: parts.suffix,
            user_id: Uuid::new_v5(&Uuid::NAMESPACE_OID, id_source.as_bytes()),
            created,
            donations: vec![first_donation],
        }
    }

    /// Case-folded `"first last"` key matching [`NameParts::match_key`].
    pub fn match_key(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_lowercase()
    }

    pub fn total_given(&self) -> f64 {
        self.donations.iter().map(|d| d.amount).sum()
    }

    pub fn donation_count(&self) -> usize {
        self.donations.len()
    }

    /// Average gift. A donor without donations violates the store invariant,
    /// so this fails loudly instead of producing NaN.
    pub fn average_gift(&self) -> f64 {
        assert!(
            !self.donations.is_empty(),
            "donor `{}` has no donations; records must be created with one",
            self.full_name
        );
        self.total_given() / self.donation_count() as f64
    }
}
