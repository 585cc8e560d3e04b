//! XMage deck file minimizer
//!
//! XMage's `.dck` importer skips blank lines and `#` comments, so a deck
//! file keeps its meaning with both stripped.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use xcube_common::{Error, Result};

/// Extension XMage's deck chooser accepts
pub const DECK_EXTENSION: &str = "dck";

/// Inserted before the extension of the default output name
pub const MINIMIZED_INFIX: &str = "min";

const COMMENT_PREFIX: &str = "#";

/// A deck file on disk with a `.dck` extension
#[derive(Debug, Clone)]
pub struct DeckFile {
    path: PathBuf,
}

impl DeckFile {
    /// Wrap `path`, rejecting anything that is not a `.dck` file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !is_deck_file(&path) {
            return Err(Error::InvalidInput(format!(
                "file is not a valid XMage deck file: '{}'",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<stem>.min.dck` next to the source file
    pub fn minimized_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!("{}.{}.{}", stem, MINIMIZED_INFIX, DECK_EXTENSION))
    }

    /// Copy every line that is neither blank nor a comment to `to`
    ///
    /// Writes to [`DeckFile::minimized_path`] when `to` is `None`. A target
    /// naming the source file itself is rejected with [`Error::InvalidInput`].
    /// Returns the written path and the number of lines kept.
    pub fn minimize(&self, to: Option<&Path>) -> Result<(PathBuf, usize)> {
        let target = to.map(Path::to_path_buf).unwrap_or_else(|| self.minimized_path());
        if is_same_file(&self.path, &target) {
            return Err(Error::InvalidInput(format!(
                "refusing to minimize '{}' onto itself",
                self.path.display()
            )));
        }
        info!("Minimizing {} into {}", self.path.display(), target.display());

        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut writer = BufWriter::new(File::create(&target)?);

        let mut line = String::new();
        let mut kept = 0;
        let mut dropped = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if is_ignored(&line) {
                dropped += 1;
            } else {
                writer.write_all(line.as_bytes())?;
                kept += 1;
            }
        }
        writer.flush()?;

        debug!("Kept {} lines, dropped {}", kept, dropped);
        Ok((target, kept))
    }
}

/// Paths naming the same file, after resolving `.`/`..` and links when both exist
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn is_deck_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == DECK_EXTENSION)
}

/// Lines the XMage importer skips
pub fn is_ignored(line: &str) -> bool {
    is_blank(line) || is_comment(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX)
}

/// Minimize the deck file at `path`
pub fn minimize(path: &Path, to: Option<&Path>) -> Result<(PathBuf, usize)> {
    DeckFile::open(path)?.minimize(to)
}
