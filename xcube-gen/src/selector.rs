//! Oldest eligible print selection
//!
//! A cube lists each card in its original printing: of all prints from
//! eligible sets, the one from the oldest set wins, and within one set the
//! lowest collector number wins.

use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::debug;
use xcube_common::{compare_collector_numbers, Error, Result};

use crate::faces;
use crate::oracle::{CardOracle, PrintRecord};
use crate::sets::SetEligibility;

/// The print chosen for a card name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPrint {
    /// Full (multi-face complete) card name
    pub canonical_name: String,
    pub set_code: String,
    pub number: String,
    pub release_date: NaiveDate,
}

/// Total order on candidate prints: older set first, then lower collector number
///
/// Prints from different sets released the same day with the same number are
/// ordered by set code, then name, so the minimum never depends on the order
/// the oracle returned them in.
pub fn compare_prints(
    a: &PrintRecord,
    a_date: NaiveDate,
    b: &PrintRecord,
    b_date: NaiveDate,
) -> Ordering {
    a_date
        .cmp(&b_date)
        .then_with(|| compare_collector_numbers(&a.number, &b.number))
        .then_with(|| a.set_code.cmp(&b.set_code))
        .then_with(|| a.name.cmp(&b.name))
}

pub struct OldestPrintSelector<'a> {
    oracle: &'a dyn CardOracle,
    sets: &'a SetEligibility,
}

impl<'a> OldestPrintSelector<'a> {
    pub fn new(oracle: &'a dyn CardOracle, sets: &'a SetEligibility) -> Self {
        Self { oracle, sets }
    }

    /// Query the oracle for `name` and pick its oldest eligible print
    ///
    /// Composite names are looked up by their first face. Fails with
    /// [`Error::Lookup`] when no eligible print exists.
    pub fn select_oldest(&self, name: &str) -> Result<SelectedPrint> {
        let query = faces::lookup_name(name);
        if query != name {
            debug!("Card '{}' looked up as '{}'", name, query);
        }

        debug!("Querying remote API for cards with '{}'", query);
        let candidates = self.oracle.cards_named(query)?;
        let total = candidates.len();

        let eligible: Vec<(PrintRecord, NaiveDate)> = candidates
            .into_iter()
            .filter(|print| print.name == query)
            .filter_map(|print| {
                let date = self.sets.release_date(&print.set_code)?;
                Some((print, date))
            })
            .collect();

        debug!(
            "Returned {} hits for cards with '{}' ({} eligible)",
            total,
            query,
            eligible.len()
        );

        let (print, release_date) = eligible
            .into_iter()
            .min_by(|(a, a_date), (b, b_date)| compare_prints(a, *a_date, b, *b_date))
            .ok_or_else(|| {
                Error::Lookup(format!(
                    "no eligible print found for '{}' ({} candidates returned)",
                    name, total
                ))
            })?;

        let canonical_name = faces::canonical_name(&print);
        if canonical_name != name {
            debug!("Card '{}' canonicalized as '{}'", name, canonical_name);
        }

        Ok(SelectedPrint {
            canonical_name,
            set_code: print.set_code,
            number: print.number,
            release_date,
        })
    }
}
