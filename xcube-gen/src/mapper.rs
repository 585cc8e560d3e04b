//! Listing entry → resolved record
//!
//! Each entry is sanitized, then pinned to a print: the override table
//! answers first, the oracle only when the table has nothing. Results are
//! memoized per (name, bucket) for the rest of the run.

use tracing::{debug, info};
use xcube_common::{RawItem, ResolvedRecord, Result};

use crate::memo::Memo;
use crate::overrides::OverrideTable;
use crate::sanitizer::NameSanitizer;
use crate::selector::OldestPrintSelector;

pub struct CardMapper<'a> {
    sanitizer: &'a NameSanitizer,
    overrides: &'a OverrideTable,
    selector: OldestPrintSelector<'a>,
    memo: Memo<RawItem, ResolvedRecord>,
}

impl<'a> CardMapper<'a> {
    pub fn new(
        sanitizer: &'a NameSanitizer,
        overrides: &'a OverrideTable,
        selector: OldestPrintSelector<'a>,
    ) -> Self {
        Self {
            sanitizer,
            overrides,
            selector,
            memo: Memo::new(),
        }
    }

    /// Resolve one listing entry
    pub fn map(&mut self, item: &RawItem) -> Result<ResolvedRecord> {
        let entry = RawItem::new(self.sanitizer.sanitize(&item.name), item.bucket.clone());

        let overrides = self.overrides;
        let selector = &self.selector;
        self.memo
            .get_or_try_insert_with(&entry, || resolve(&entry, overrides, selector))
    }

    /// Resolve every entry, in order; the first failure aborts
    pub fn map_all<'i>(&mut self, items: impl IntoIterator<Item = &'i RawItem>) -> Result<Vec<ResolvedRecord>> {
        items.into_iter().map(|item| self.map(item)).collect()
    }

    /// Distinct entries resolved so far
    pub fn resolved_count(&self) -> usize {
        self.memo.len()
    }

    /// Entries answered from the memo instead of being resolved again
    pub fn memo_hits(&self) -> usize {
        self.memo.hits()
    }
}

fn resolve(
    entry: &RawItem,
    overrides: &OverrideTable,
    selector: &OldestPrintSelector<'_>,
) -> Result<ResolvedRecord> {
    let name = &entry.name;
    debug!("Obtaining card '{}'", name);

    let record = match overrides.lookup(name) {
        Some(fixed) => {
            info!("Fetching card '{}' (source: override table)", name);
            ResolvedRecord::new(fixed.name, fixed.number, fixed.set_code, entry.bucket.clone())
        }
        None => {
            info!("Fetching card '{}' (source: card API)", name);
            let print = selector.select_oldest(name)?;
            ResolvedRecord::new(print.canonical_name, print.number, print.set_code, entry.bucket.clone())
        }
    };

    info!(
        "Obtained card '{}' (set code: {}, collector number: {})",
        record.name, record.set_code, record.number
    );

    Ok(record)
}
