//! Set eligibility
//!
//! Only newly printed cards from regular products are functionally unique,
//! so only sets of those product types may supply a card's first print.
//!
//! Primary product types: `starter`, `core`, `expansion`.
//! Supplementary product types: `commander`, `draft_innovation`,
//! `planechase`, `archenemy`. Modern Horizons and its successors count as
//! `draft_innovation`.
//!
//! A small denylist removes sets that qualify by type but must never supply a
//! print; it is applied after the type rule.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use xcube_common::config::SetsConfig;
use xcube_common::Result;

use crate::oracle::{SetCatalog, SetInfo};

pub const DEFAULT_SET_KINDS: &[&str] = &[
    // Primary product types
    "starter",
    "core",
    "expansion",
    // Supplementary product types
    "commander",
    "draft_innovation",
    "planechase",
    "archenemy",
];

pub const DEFAULT_EXCLUDED_SETS: &[&str] = &[
    // Limited Edition Alpha: very rounded corners, and Volcanic Island
    "LEA",
    // Fourth Edition: alternate print runs
    "4ED",
];

/// Allowed product types and excluded set codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRules {
    pub kinds: Vec<String>,
    pub excluded: Vec<String>,
}

impl EligibilityRules {
    pub fn from_config(config: &SetsConfig) -> Self {
        let defaults = Self::default();
        Self {
            kinds: config.kinds.clone().unwrap_or(defaults.kinds),
            excluded: config.excluded.clone().unwrap_or(defaults.excluded),
        }
    }
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            kinds: DEFAULT_SET_KINDS.iter().map(|s| s.to_string()).collect(),
            excluded: DEFAULT_EXCLUDED_SETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Sets allowed to supply a first print, with their release dates
#[derive(Debug, Clone, Default)]
pub struct SetEligibility {
    release_dates: HashMap<String, NaiveDate>,
}

impl SetEligibility {
    /// Query the catalog once and keep the eligible sets
    pub fn build(catalog: &dyn SetCatalog, rules: &EligibilityRules) -> Result<Self> {
        info!("Fetching set data (ignored: {:?})", rules.excluded);
        debug!("For set types: {:?}", rules.kinds);

        let sets = catalog.sets_of_kinds(&rules.kinds)?;
        let eligibility = Self::from_sets(sets, rules);

        info!("Set data obtained: {} sets total", eligibility.len());
        Ok(eligibility)
    }

    /// Keep sets whose type is allowed and whose code is not excluded
    pub fn from_sets(sets: impl IntoIterator<Item = SetInfo>, rules: &EligibilityRules) -> Self {
        let mut release_dates = HashMap::new();

        for set in sets {
            if !rules.kinds.iter().any(|k| *k == set.kind) {
                debug!(code = %set.code, kind = %set.kind, "Set type not allowed");
                continue;
            }
            if rules.excluded.iter().any(|c| *c == set.code) {
                debug!(code = %set.code, "Set is excluded");
                continue;
            }
            match set.release_date {
                Some(date) => {
                    release_dates.insert(set.code, date);
                }
                None => warn!(code = %set.code, "Set has no release date; it cannot supply prints"),
            }
        }

        Self { release_dates }
    }

    pub fn is_eligible(&self, code: &str) -> bool {
        self.release_dates.contains_key(code)
    }

    pub fn release_date(&self, code: &str) -> Option<NaiveDate> {
        self.release_dates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.release_dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.release_dates.is_empty()
    }
}
