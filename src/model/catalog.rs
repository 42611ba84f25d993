use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Party affiliation shown for candidates missing from the catalog.
pub const FALLBACK_PARTY: &str = "Independente";

/// Display metadata attached to a candidate id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMetadata {
    pub party: String,
    pub image: String,
}

/// One configured catalog row (the `candidate_catalog` array in
/// `Rocket.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub party: String,
    #[serde(default)]
    pub image: String,
}

/// Immutable candidate-metadata table, injected as managed state at startup.
///
/// Never mutated after construction, so unsynchronized concurrent reads are
/// safe. A lookup miss synthesizes a neutral fallback instead of failing:
/// a candidate registered with the voting authority but missing from the
/// display catalog must still render.
#[derive(Debug, Clone)]
pub struct CandidateCatalog {
    entries: HashMap<i32, CandidateMetadata>,
}

impl CandidateCatalog {
    /// The catalog shipped with the server: the four registered parties.
    pub fn bundled() -> Self {
        Self::from_entries([
            CatalogEntry {
                id: 1,
                party: "Partido do Progresso".to_string(),
                image: "https://picsum.photos/id/64/200/200".to_string(),
            },
            CatalogEntry {
                id: 2,
                party: "Partido Conservador".to_string(),
                image: "https://picsum.photos/id/91/200/200".to_string(),
            },
            CatalogEntry {
                id: 3,
                party: "Bloco Verde".to_string(),
                image: "https://picsum.photos/id/65/200/200".to_string(),
            },
            CatalogEntry {
                id: 4,
                party: "Liberal".to_string(),
                image: "https://picsum.photos/id/55/200/200".to_string(),
            },
        ])
    }

    /// Build a catalog from configured rows. A duplicate id keeps the last
    /// row, matching the "keys are unique" contract of the config file.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| {
                    (
                        entry.id,
                        CandidateMetadata {
                            party: entry.party,
                            image: entry.image,
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for the given candidate id, or the neutral fallback.
    pub fn metadata(&self, id: i32) -> CandidateMetadata {
        self.entries
            .get(&id)
            .cloned()
            .unwrap_or_else(|| CandidateMetadata {
                party: FALLBACK_PARTY.to_string(),
                image: String::new(),
            })
    }
}
