//! In-memory oracle and set catalog

use chrono::NaiveDate;
use std::cell::RefCell;

use xcube_common::{Error, Result};
use xcube_gen::{CardOracle, PrintRecord, SetCatalog, SetInfo};

/// Card oracle answering from memory and recording every query
///
/// Like the real API it answers substring matches, so callers must filter
/// by exact name themselves.
#[derive(Default)]
pub struct FakeOracle {
    prints: Vec<PrintRecord>,
    queries: RefCell<Vec<String>>,
    failure: Option<String>,
}

impl FakeOracle {
    pub fn new(prints: Vec<PrintRecord>) -> Self {
        Self {
            prints,
            queries: RefCell::new(Vec::new()),
            failure: None,
        }
    }

    /// Oracle whose every query fails like an unreachable server
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }

    pub fn queries_for(&self, name: &str) -> usize {
        self.queries.borrow().iter().filter(|q| *q == name).count()
    }
}

impl CardOracle for FakeOracle {
    fn cards_named(&self, name: &str) -> Result<Vec<PrintRecord>> {
        self.queries.borrow_mut().push(name.to_string());
        if let Some(message) = &self.failure {
            return Err(Error::Transport(message.clone()));
        }
        Ok(self
            .prints
            .iter()
            .filter(|p| p.name.contains(name))
            .cloned()
            .collect())
    }
}

/// Set catalog answering from memory
pub struct FakeCatalog {
    sets: Vec<SetInfo>,
    requests: RefCell<usize>,
    failure: Option<String>,
}

impl FakeCatalog {
    pub fn new(sets: Vec<SetInfo>) -> Self {
        Self {
            sets,
            requests: RefCell::new(0),
            failure: None,
        }
    }

    /// Catalog whose every request fails like an unreachable server
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn request_count(&self) -> usize {
        *self.requests.borrow()
    }
}

impl SetCatalog for FakeCatalog {
    fn sets_of_kinds(&self, kinds: &[String]) -> Result<Vec<SetInfo>> {
        *self.requests.borrow_mut() += 1;
        if let Some(message) = &self.failure {
            return Err(Error::Transport(message.clone()));
        }
        Ok(self
            .sets
            .iter()
            .filter(|s| kinds.contains(&s.kind))
            .cloned()
            .collect())
    }
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// A handful of real sets, including the two excluded by default
pub fn sample_catalog() -> FakeCatalog {
    FakeCatalog::new(vec![
        SetInfo::new("LEA", "core", date(1993, 8, 5)),
        SetInfo::new("LEB", "core", date(1993, 10, 1)),
        SetInfo::new("ARN", "expansion", date(1993, 12, 17)),
        SetInfo::new("4ED", "core", date(1995, 4, 1)),
        SetInfo::new("PHPR", "promo", date(1995, 1, 1)),
        SetInfo::new("APC", "expansion", date(2001, 6, 4)),
        SetInfo::new("ZEN", "expansion", date(2009, 10, 2)),
        SetInfo::new("MMA", "masters", date(2013, 6, 7)),
        SetInfo::new("DDF", "duel_deck", date(2010, 9, 3)),
        SetInfo::new("CNS", "draft_innovation", date(2014, 6, 6)),
    ])
}

/// Prints for the cards used across the integration tests
pub fn sample_oracle() -> FakeOracle {
    let mut prints = vec![
        // Duel deck and masters prints never count as first prints
        PrintRecord::new("Elspeth, Knight-Errant", "MMA", "14"),
        PrintRecord::new("Elspeth, Knight-Errant", "DDF", "1"),
        PrintRecord::new("Elspeth, Knight-Errant", "CNS", "1"),
        PrintRecord::new("Elspeth, Knight-Errant", "ZEN", "1"),
        // Alpha is excluded, so Beta supplies the first print
        PrintRecord::new("Black Lotus", "LEA", "232"),
        PrintRecord::new("Black Lotus", "LEB", "233"),
        PrintRecord::new("Lightning Bolt", "4ED", "208"),
        PrintRecord::new("Lightning Bolt", "LEB", "162"),
        PrintRecord::new("Lightning Bolt", "LEA", "161"),
        // Only promo prints exist
        PrintRecord::new("Mana Crypt", "PHPR", "5"),
        PrintRecord::new("City of Brass", "ARN", "71†"),
        PrintRecord::new("Fire", "APC", "128").with_faces(["Fire", "Ice"]),
        PrintRecord::new("Ice", "APC", "128").with_faces(["Fire", "Ice"]),
    ];
    // Near match the API would also return for "Fire"
    prints.push(PrintRecord::new("Fireball", "LEB", "149"));

    FakeOracle::new(prints)
}
