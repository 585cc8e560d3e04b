//! Cube aggregation and bucket grouping

use std::collections::HashMap;
use tracing::debug;
use xcube_common::{RawCollection, ResolvedCollection, ResolvedRecord, Result};

use crate::mapper::CardMapper;

/// Resolve every listing entry and count the results
///
/// Entries are resolved one after another; nothing is returned unless all of
/// them resolved.
pub fn from_raw(raw: &RawCollection, mapper: &mut CardMapper<'_>) -> Result<ResolvedCollection> {
    let records = mapper.map_all(&raw.items)?;
    Ok(ResolvedCollection::new(
        raw.title.clone(),
        raw.date,
        raw.author.clone(),
        records,
    ))
}

/// One export section: a bucket and its sorted (record, count) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub cards: Vec<(ResolvedRecord, usize)>,
}

impl Bucket {
    /// Total number of cards in this bucket
    pub fn size(&self) -> usize {
        self.cards.iter().map(|(_, count)| count).sum()
    }
}

/// Group a cube's entries by bucket
///
/// Buckets appear in the order of their first card; cards within a bucket
/// are sorted by the record order.
pub fn bucketize(cube: &ResolvedCollection) -> Vec<Bucket> {
    debug!("Sorting buckets...");

    let mut buckets: Vec<Bucket> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (record, count) in cube.entries() {
        let idx = *positions.entry(record.bucket.as_str()).or_insert_with(|| {
            buckets.push(Bucket {
                name: record.bucket.clone(),
                cards: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[idx].cards.push((record.clone(), *count));
    }

    for bucket in &mut buckets {
        bucket.cards.sort_by(|(a, _), (b, _)| a.cmp(b));
        debug!("Sorted bucket: {}", bucket.name);
    }

    debug!("{} buckets sorted", buckets.len());
    buckets
}
