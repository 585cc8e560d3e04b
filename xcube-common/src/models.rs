//! Card list models shared by the generator and its collaborators

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::collector::compare_collector_numbers;

/// One row of a card listing, as extracted from the source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawItem {
    /// Card name, possibly misspelled
    pub name: String,
    /// Grouping label (color identity, card type, ...)
    pub bucket: String,
}

impl RawItem {
    pub fn new(name: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bucket: bucket.into(),
        }
    }
}

/// A whole card listing with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCollection {
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    pub items: Vec<RawItem>,
}

impl RawCollection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A card pinned to one concrete print
///
/// Ordered by name, then collector number (chunked comparison),
/// then set code, then bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub name: String,
    /// Can contain non-digits, e.g. `"mb62sb"` or `"221s★"`
    pub number: String,
    pub set_code: String,
    pub bucket: String,
}

impl ResolvedRecord {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        set_code: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            set_code: set_code.into(),
            bucket: bucket.into(),
        }
    }
}

impl Ord for ResolvedRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| compare_collector_numbers(&self.number, &other.number))
            .then_with(|| self.set_code.cmp(&other.set_code))
            .then_with(|| self.bucket.cmp(&other.bucket))
    }
}

impl PartialOrd for ResolvedRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The resolved listing: a multiset of records with their metadata
///
/// Records keep the order in which they first occurred, which in turn fixes
/// the order of buckets on export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCollection {
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    entries: Vec<(ResolvedRecord, usize)>,
}

impl ResolvedCollection {
    /// Count records into a multiset, preserving first occurrence order
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        author: impl Into<String>,
        records: impl IntoIterator<Item = ResolvedRecord>,
    ) -> Self {
        let mut entries: Vec<(ResolvedRecord, usize)> = Vec::new();
        let mut positions: HashMap<ResolvedRecord, usize> = HashMap::new();

        for record in records {
            match positions.get(&record) {
                Some(&idx) => entries[idx].1 += 1,
                None => {
                    positions.insert(record.clone(), entries.len());
                    entries.push((record, 1));
                }
            }
        }

        Self {
            title: title.into(),
            date,
            author: author.into(),
            entries,
        }
    }

    /// Distinct records with their multiplicities
    pub fn entries(&self) -> &[(ResolvedRecord, usize)] {
        &self.entries
    }

    /// Total multiplicity (number of listing rows resolved)
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multiplicity of one record (0 when absent)
    pub fn count_of(&self, record: &ResolvedRecord) -> usize {
        self.entries
            .iter()
            .find(|(r, _)| r == record)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
