//! Multi-face card names
//!
//! Split, flip and double-faced cards are listed as `"Fire // Ice"`, but the
//! oracle stores each face as its own record (`"Fire"`, `"Ice"`) carrying the
//! list of all face names. Every face name is unique, so looking up the first
//! face is enough to find the card.

use crate::oracle::PrintRecord;

pub const FACE_SEPARATOR: &str = " // ";

/// Name to query the oracle with: the first face of a composite name
pub fn lookup_name(name: &str) -> &str {
    match name.split_once(FACE_SEPARATOR) {
        Some((first, _)) => first,
        None => name,
    }
}

/// Canonical name of the card `print` belongs to
///
/// A card with several faces is always named by all of them joined with the
/// separator, whether it was listed by one face or by the full name. This
/// holds for every layout the oracle reports faces for, so a transform card
/// listed as `"Delver of Secrets"` comes out as
/// `"Delver of Secrets // Insectile Aberration"`, same as a split card.
pub fn canonical_name(print: &PrintRecord) -> String {
    if print.face_names.len() > 1 {
        print.face_names.join(FACE_SEPARATOR)
    } else {
        print.name.clone()
    }
}
