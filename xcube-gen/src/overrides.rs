//! Cards pinned to a fixed print
//!
//! Some cards legal in a cube never appeared in a regular set: released,
//! functionally unique promos, plus a few oddities that end up in cube lists
//! anyway. Their print is fixed here and the oracle is never asked about them.

use std::collections::HashMap;
use tracing::info;
use xcube_common::config::OverrideEntry;

/// Built-in overrides: (name, set code, collector number)
pub const KNOWN_OVERRIDES: &[(&str, &str, &str)] = &[
    // Dragon*Con (also Japanese Redemption Program)
    ("Nalathni Dragon", "PDRC", "1"),
    // HarperPrism book promos, numbered by release date
    ("Arena", "PHPR", "1"),
    ("Sewers of Estark", "PHPR", "2"),
    ("Windseeker Centaur", "PHPR", "3"),
    ("Giant Badger", "PHPR", "4"),
    ("Mana Crypt", "PHPR", "5"),
    // Secret Lair Drop Series: The Walking Dead
    ("Rick, Steadfast Leader", "SLD", "143"),
    ("Daryl, Hunter of Walkers", "SLD", "144"),
    ("Glenn, the Voice of Calm", "SLD", "145"),
    ("Michonne, Ruthless Survivor", "SLD", "146"),
    ("Negan, the Cold-Blooded", "SLD", "147"),
    ("Lucille", "SLD", "581"),
    // MicroProse promos (Astral cards from Shandalar); not legal anywhere
    ("Aswan Jaguar", "PMIC", "1"),
    // Magic Online only
    ("Gleemox", "PRM", "26584"),
];

/// A print fixed by the override table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPrint {
    pub name: String,
    pub set_code: String,
    pub number: String,
}

#[derive(Debug, Clone)]
pub struct OverrideTable {
    cards: HashMap<String, (String, String)>,
}

impl OverrideTable {
    pub fn new(cards: HashMap<String, (String, String)>) -> Self {
        info!("Extra card data set: {} cards total", cards.len());
        Self { cards }
    }

    /// Built-in table plus configured entries (which win on conflict)
    pub fn with_extra(extra: &HashMap<String, OverrideEntry>) -> Self {
        let mut cards = builtin_cards();
        cards.extend(
            extra
                .iter()
                .map(|(name, entry)| (name.clone(), (entry.set.clone(), entry.number.clone()))),
        );
        Self::new(cards)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<FixedPrint> {
        self.cards.get(name).map(|(set_code, number)| FixedPrint {
            name: name.to_string(),
            set_code: set_code.clone(),
            number: number.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::new(builtin_cards())
    }
}

fn builtin_cards() -> HashMap<String, (String, String)> {
    KNOWN_OVERRIDES
        .iter()
        .map(|(name, set, number)| (name.to_string(), (set.to_string(), number.to_string())))
        .collect()
}
