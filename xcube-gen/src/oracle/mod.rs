//! Card and set metadata collaborators
//!
//! The pipeline only needs two questions answered: "which prints exist for
//! this name" and "which sets of these kinds exist, and when were they
//! released". Both are traits so tests can answer them from memory.

pub mod mtgio;

pub use mtgio::MtgApiClient;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use xcube_common::Result;

/// One print of a card as reported by the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRecord {
    /// Name of this face/card as the oracle reports it
    pub name: String,
    pub set_code: String,
    pub number: String,
    /// All face names of a multi-face card, empty otherwise
    #[serde(default)]
    pub face_names: Vec<String>,
}

impl PrintRecord {
    pub fn new(
        name: impl Into<String>,
        set_code: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            set_code: set_code.into(),
            number: number.into(),
            face_names: Vec::new(),
        }
    }

    pub fn with_faces<I, S>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.face_names = faces.into_iter().map(Into::into).collect();
        self
    }
}

/// One set (print source) as reported by the set catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInfo {
    pub code: String,
    /// Product type (`core`, `expansion`, `commander`, ...)
    pub kind: String,
    pub release_date: Option<NaiveDate>,
}

impl SetInfo {
    pub fn new(code: impl Into<String>, kind: impl Into<String>, release_date: Option<NaiveDate>) -> Self {
        Self {
            code: code.into(),
            kind: kind.into(),
            release_date,
        }
    }
}

/// Card lookup by name
///
/// Results may include near matches; callers filter by exact name.
pub trait CardOracle {
    fn cards_named(&self, name: &str) -> Result<Vec<PrintRecord>>;
}

/// Set metadata lookup by product type
pub trait SetCatalog {
    fn sets_of_kinds(&self, kinds: &[String]) -> Result<Vec<SetInfo>>;
}
