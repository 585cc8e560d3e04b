//! Cube listing sources
//!
//! A listing file is a JSON document:
//!
//! ```json
//! {
//!   "title": "Vintage Cube",
//!   "date": "2021-02-15",
//!   "author": "Wizards of the Coast",
//!   "cards": [
//!     {"name": "Black Lotus", "bucket": "Artifact"},
//!     {"name": "Fire // Ice", "bucket": "Multicolor"}
//!   ]
//! }
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xcube_common::{Error, RawCollection, RawItem, Result};

/// Anything that can produce a raw cube listing
pub trait CollectionSource {
    /// Human-readable origin, for log lines
    fn describe(&self) -> String;

    fn load(&self) -> Result<RawCollection>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListingDocument {
    title: String,
    date: String,
    author: String,
    cards: Vec<RawItem>,
}

/// Listing stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct ListingFile {
    path: PathBuf,
}

impl ListingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionSource for ListingFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RawCollection> {
        info!("Reading cube listing from {}", self.path.display());
        let content = std::fs::read_to_string(&self.path)?;
        parse_listing(&content)
    }
}

/// Parse listing JSON into a raw collection
pub fn parse_listing(content: &str) -> Result<RawCollection> {
    let document: ListingDocument = serde_json::from_str(content)
        .map_err(|e| Error::MalformedSource(format!("Invalid listing: {}", e)))?;

    let date = NaiveDate::parse_from_str(document.date.trim(), "%Y-%m-%d").map_err(|e| {
        Error::MalformedSource(format!("Invalid listing date '{}': {}", document.date, e))
    })?;

    if let Some(item) = document
        .cards
        .iter()
        .find(|item| item.name.trim().is_empty() || item.bucket.trim().is_empty())
    {
        return Err(Error::MalformedSource(format!(
            "Listing entry with empty name or bucket: {:?}",
            item
        )));
    }

    debug!("Name: {}", document.title);
    debug!("Date: {}", date);
    debug!("Author: {}", document.author);

    let collection = RawCollection {
        title: document.title,
        date,
        author: document.author,
        items: document.cards,
    };

    info!(
        "Cube data: {} ({}) by {}, {} entries total",
        collection.title,
        collection.date.format("%d.%m.%Y"),
        collection.author,
        collection.len()
    );

    Ok(collection)
}
