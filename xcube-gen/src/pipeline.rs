//! End-to-end generation: listing in, deck file out

use std::fs::OpenOptions;
use std::path::Path;
use tracing::info;
use xcube_common::config::TomlConfig;
use xcube_common::{Error, RawCollection, ResolvedCollection, Result};

use crate::cube;
use crate::export::Exporter;
use crate::mapper::CardMapper;
use crate::oracle::{CardOracle, SetCatalog};
use crate::overrides::OverrideTable;
use crate::sanitizer::NameSanitizer;
use crate::selector::OldestPrintSelector;
use crate::sets::{EligibilityRules, SetEligibility};
use crate::source::CollectionSource;

/// Fail early if the output file cannot be opened for writing
///
/// Opens in append mode so an existing file is left untouched.
pub fn ensure_writable(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::Config(format!(
            "Output target is a directory: {}",
            path.display()
        )));
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("Cannot write to {}: {}", path.display(), e)))
}

/// Resolve a raw listing against the oracle using the configured tables
pub fn resolve_collection(
    raw: &RawCollection,
    config: &TomlConfig,
    oracle: &dyn CardOracle,
    catalog: &dyn SetCatalog,
) -> Result<ResolvedCollection> {
    let sanitizer = NameSanitizer::with_extra(&config.tables.typos);
    let overrides = OverrideTable::with_extra(&config.tables.overrides);
    let rules = EligibilityRules::from_config(&config.sets);
    let sets = SetEligibility::build(catalog, &rules)?;

    let selector = OldestPrintSelector::new(oracle, &sets);
    let mut mapper = CardMapper::new(&sanitizer, &overrides, selector);

    let resolved = cube::from_raw(raw, &mut mapper)?;

    info!(
        "Resolved {} entries ({} distinct cards, {} repeated lookups skipped)",
        resolved.len(),
        mapper.resolved_count(),
        mapper.memo_hits()
    );

    Ok(resolved)
}

/// Generate a deck file from a cube listing
///
/// Nothing is written unless every entry resolved.
pub fn generate(
    output: &Path,
    config: &TomlConfig,
    source: &dyn CollectionSource,
    oracle: &dyn CardOracle,
    catalog: &dyn SetCatalog,
    exporter: &dyn Exporter,
) -> Result<ResolvedCollection> {
    ensure_writable(output)?;

    info!("Loading cube listing from {}", source.describe());
    let raw = source.load()?;

    let resolved = resolve_collection(&raw, config, oracle, catalog)?;
    exporter.export(&resolved, output)?;

    Ok(resolved)
}
