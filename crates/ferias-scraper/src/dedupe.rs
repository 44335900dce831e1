//! First-occurrence deduplication of feria records.

use std::collections::HashSet;

use ferias_core::{FeriaKey, FeriaRecord};

/// Accumulates records, keeping the first of each `(barrio, street, day)`.
///
/// Identity ignores case on barrio and street and ignores the cross streets,
/// so the same feria listed with a different stretch on another page is
/// still a duplicate.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<FeriaKey>,
    kept: Vec<FeriaRecord>,
    duplicates: usize,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record`; returns `false` when an equivalent one was already kept.
    pub fn insert(&mut self, record: FeriaRecord) -> bool {
        if self.seen.insert(record.key()) {
            self.kept.push(record);
            true
        } else {
            tracing::debug!(
                barrio = %record.barrio,
                street = %record.street,
                day = %record.day,
                "dropping duplicate feria"
            );
            self.duplicates += 1;
            false
        }
    }

    /// Number of records dropped so far.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Kept records in first-seen order.
    #[must_use]
    pub fn into_records(self) -> Vec<FeriaRecord> {
        self.kept
    }
}

impl Extend<FeriaRecord> for Deduplicator {
    fn extend<I: IntoIterator<Item = FeriaRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

/// Removes later duplicates from `records`, preserving first-seen order.
pub fn dedupe<I>(records: I) -> Vec<FeriaRecord>
where
    I: IntoIterator<Item = FeriaRecord>,
{
    let mut dedup = Deduplicator::new();
    dedup.extend(records);
    dedup.into_records()
}
