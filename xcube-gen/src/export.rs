//! Deck file exporters

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use xcube_common::{ResolvedCollection, Result};

use crate::cube::bucketize;

/// Base exporter for deck editors
pub trait Exporter {
    /// Deck editor this exporter targets, for log lines
    fn style(&self) -> &'static str;

    /// Render the whole cube as deck file text
    fn format(&self, cube: &ResolvedCollection) -> String;

    /// Format the cube and write it to `path`
    fn export(&self, cube: &ResolvedCollection, path: &Path) -> Result<()> {
        info!("Formatting cube data (format: {})", self.style());
        let data = self.format(cube);
        info!("Cube data formatted; ready to export");

        let mut file = File::create(path)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;

        info!("Cube data exported to {}", path.display());
        Ok(())
    }
}

/// XMage cannot represent these symbols in card numbers (it builds image
/// download links from them), so they are mapped to ASCII.
pub const COLLECTOR_NUMBER_SUBSTITUTIONS: &[(char, &str)] = &[
    // Arabian Nights, Portal Starter Deck, The Dark...
    ('†', "+"),
    // Planeshift, Deckmasters, War of the Spark (JP planeswalkers)...
    ('★', "*"),
];

/// Replace symbols XMage cannot handle in a collector number
pub fn asciify_number(number: &str) -> String {
    let mut out = String::with_capacity(number.len());
    for ch in number.chars() {
        match COLLECTOR_NUMBER_SUBSTITUTIONS.iter().find(|(symbol, _)| *symbol == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Exporter for XMage's `.dck` deck format
///
/// ```text
/// NAME:<title> (<dd.mm.yyyy>)
/// AUTHOR:<author>
///
/// # <bucket>
/// <count> [<SET>:<number>] <name>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XMageExporter;

impl XMageExporter {
    pub const STYLE: &'static str = "XMage";
    const NAME_DIRECTIVE: &'static str = "NAME";
    const AUTHOR_DIRECTIVE: &'static str = "AUTHOR";

    pub fn new() -> Self {
        Self
    }

    fn preamble(cube: &ResolvedCollection) -> String {
        debug!("Formatting preamble...");
        format!(
            "{}:{} ({})\n{}:{}\n",
            Self::NAME_DIRECTIVE,
            cube.title,
            cube.date.format("%d.%m.%Y"),
            Self::AUTHOR_DIRECTIVE,
            cube.author
        )
    }
}

impl Exporter for XMageExporter {
    fn style(&self) -> &'static str {
        Self::STYLE
    }

    fn format(&self, cube: &ResolvedCollection) -> String {
        let mut content = Self::preamble(cube);

        for bucket in bucketize(cube) {
            content.push_str(&format!("\n# {}\n", bucket.name));

            for (card, quantity) in &bucket.cards {
                content.push_str(&format!(
                    "{} [{}:{}] {}\n",
                    quantity,
                    card.set_code,
                    asciify_number(&card.number),
                    card.name
                ));
            }
        }

        content
    }
}
