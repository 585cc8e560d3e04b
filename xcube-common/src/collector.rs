//! Collector number ordering
//!
//! Collector numbers are strings that may carry non-digit parts
//! (`"mb62sb"`, `"221s★"`, `"26584"`). They are ordered the way a person
//! reads them: the string is split into maximal digit and non-digit runs,
//! digit runs compare as integers and text runs compare as strings.
//!
//! ```
//! use std::cmp::Ordering;
//! use xcube_common::compare_collector_numbers;
//!
//! assert_eq!(compare_collector_numbers("9", "10"), Ordering::Less);
//! assert_eq!(compare_collector_numbers("9", "9a"), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// One maximal run of a collector number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Digit run, compared numerically
    Number(&'a str),
    /// Non-digit run, compared as a string
    Text(&'a str),
}

impl Ord for Chunk<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Number(a), Chunk::Number(b)) => compare_digit_runs(a, b),
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            // Same-release numbers share a format; digits first keeps the order total.
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a collector number into maximal digit / non-digit runs
pub fn chunkify(number: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (idx, ch) in number.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(previous) if previous != digit => {
                chunks.push(make_chunk(&number[start..idx], previous));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }

    if let Some(digit) = in_digits {
        chunks.push(make_chunk(&number[start..], digit));
    }

    chunks
}

fn make_chunk(run: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Number(run)
    } else {
        Chunk::Text(run)
    }
}

/// Numeric comparison of two ASCII digit runs of any length
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Chunked alphanumeric comparison of two collector numbers
///
/// Chunk sequences are compared positionally; a proper prefix sorts first.
/// Numbers that are chunk-equal but spelled differently (`"01"` and `"1"`)
/// fall back to plain string order, so the result is a strict total order.
pub fn compare_collector_numbers(a: &str, b: &str) -> Ordering {
    chunkify(a).cmp(&chunkify(b)).then_with(|| a.cmp(b))
}
