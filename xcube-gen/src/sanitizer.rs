//! Card name typo correction
//!
//! Cube listings are typed by hand and carry the same handful of mistakes
//! from one update to the next. Corrections are exact-match only.

use std::collections::HashMap;
use tracing::warn;

/// Typos seen in published Vintage Cube listings (misspelled → correct)
pub const KNOWN_TYPOS: &[(&str, &str)] = &[
    ("Azorious Signet", "Azorius Signet"),
    ("Elspeth, Knight Errant", "Elspeth, Knight-Errant"),
    ("Hazoret, the Fervent", "Hazoret the Fervent"),
    ("Jace, Vryns Prodigy", "Jace, Vryn's Prodigy"),
    ("Leonin Relic-Warden", "Leonin Relic-Warder"),
    ("Nahiri the Harbinger", "Nahiri, the Harbinger"),
    ("Sakura Tribe Elder", "Sakura-Tribe Elder"),
    ("Smugglers Copter", "Smuggler's Copter"),
    ("Ulamog the Ceaseless Hunger", "Ulamog, the Ceaseless Hunger"),
];

#[derive(Debug, Clone)]
pub struct NameSanitizer {
    typos: HashMap<String, String>,
}

impl NameSanitizer {
    pub fn new(typos: HashMap<String, String>) -> Self {
        Self { typos }
    }

    /// Built-in table plus `extra` entries (which win on conflict)
    pub fn with_extra(extra: &HashMap<String, String>) -> Self {
        let mut sanitizer = Self::default();
        sanitizer
            .typos
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        sanitizer
    }

    pub fn contains(&self, name: &str) -> bool {
        self.typos.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.typos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typos.is_empty()
    }

    /// Return the corrected name, or `name` itself when it is not a known typo
    pub fn sanitize(&self, name: &str) -> String {
        match self.typos.get(name) {
            Some(fixed) => {
                warn!(typo = %name, fixed = %fixed, "Typo fixed: '{}' => '{}'", name, fixed);
                fixed.clone()
            }
            None => name.to_string(),
        }
    }
}

impl Default for NameSanitizer {
    fn default() -> Self {
        Self::new(
            KNOWN_TYPOS
                .iter()
                .map(|(typo, fixed)| (typo.to_string(), fixed.to_string()))
                .collect(),
        )
    }
}
