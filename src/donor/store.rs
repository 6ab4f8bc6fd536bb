use chrono::{NaiveDate, Utc};

use super::name::NameParts;
use super::record::{Donation, Donor};

/// In-memory donor collection. Append-only: no operation removes or reorders
/// donors or donations, and iteration follows insertion order.
///
/// The store is a pure data structure; amount validation happens at the
/// entry-flow boundary before anything reaches it.
#[derive(Debug, Default)]
pub struct DonorStore {
    donors: Vec<Donor>,
}

impl DonorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a previously persisted donor list.
    pub fn from_records(donors: Vec<Donor>) -> Self {
        Self { donors }
    }

    pub fn donors(&self) -> &[Donor] {
        &self.donors
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    /// Linear scan for a donor whose normalized `"first last"` key equals the
    /// candidate's. First match wins; by invariant there is at most one.
    pub fn find_by_name(&self, candidate: &NameParts) -> Option<usize> {
        let key = candidate.match_key();
        self.donors
            .iter()
            .position(|donor| donor.match_key() == key)
    }

    /// Appends a donation to the donor at `index`, or creates a new donor
    /// when `index` is `None`. Returns the touched donor and whether it was
    /// newly created.
    pub fn add_donation(
        &mut self,
        index: Option<usize>,
        parts: NameParts,
        amount: f64,
        date: NaiveDate,
    ) -> (&Donor, bool) {
        let donation = Donation { amount, date };
        match index {
            Some(idx) => {
                let donor = &mut self.donors[idx];
                donor.donations.push(donation);
                tracing::info!(donor = %donor.full_name, amount, "donation appended");
                (&self.donors[idx], false)
            }
            None => {
                let donor = Donor::new(parts, donation, Utc::now());
                tracing::info!(donor = %donor.full_name, amount, "donor created");
                self.donors.push(donor);
                (self.donors.last().expect("donor just pushed"), true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(name: &str) -> NameParts {
        NameParts::parse(name).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn add_donation_creates_then_appends() {
        let mut store = DonorStore::new();
        let (_, is_new) = store.add_donation(None, parts("Jane Doe"), 10.0, day(1));
        assert!(is_new);

        let idx = store.find_by_name(&parts("Jane Doe"));
        assert_eq!(idx, Some(0));

        let (donor, is_new) = store.add_donation(idx, parts("Jane Doe"), 20.5, day(2));
        assert!(!is_new);
        assert_eq!(donor.donations.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn matching_ignores_case_whitespace_and_suffix() {
        let mut store = DonorStore::new();
        store.add_donation(None, parts("Jane Doe"), 10.0, day(1));

        assert_eq!(store.find_by_name(&parts("  jane   doe ")), Some(0));
        assert_eq!(store.find_by_name(&parts("JANE DOE, III")), Some(0));
        assert_eq!(store.find_by_name(&parts("John Doe")), None);
    }

    #[test]
    fn donations_keep_entry_order() {
        let mut store = DonorStore::new();
        store.add_donation(None, parts("Jane Doe"), 1.0, day(1));
        for (n, amount) in [(2, 2.0), (3, 3.0), (4, 4.0)] {
            let idx = store.find_by_name(&parts("Jane Doe"));
            store.add_donation(idx, parts("Jane Doe"), amount, day(n));
        }
        let amounts: Vec<f64> = store.donors()[0].donations.iter().map(|d| d.amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn donors_keep_insertion_order() {
        let mut store = DonorStore::new();
        store.add_donation(None, parts("Jane Doe"), 1.0, day(1));
        store.add_donation(None, parts("Amy Adams"), 1.0, day(1));
        let names: Vec<&str> = store.donors().iter().map(|d| d.full_name.as_str()).collect();
        assert_eq!(names, vec!["Jane Doe", "Amy Adams"]);
    }
}
