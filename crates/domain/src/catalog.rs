//! Prize catalog and weighted draw math.
//!
//! A [`Catalog`] is an immutable, validated snapshot of the prize list.
//! Selection is pure: the caller injects a roll in `[0, total_weight)` and
//! [`Catalog::pick`] walks the entries in source order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DomainError;
use crate::ids::EntryId;
use crate::rarity::Rarity;

/// One prize in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    /// Display name shown when the prize is drawn.
    pub name: String,
    /// Headline text for the prize embed.
    pub title: String,
    pub rarity: Rarity,
    pub image_url: String,
    /// Relative draw weight. Must be positive and finite.
    pub weight: f64,
}

/// Immutable, validated prize catalog.
///
/// Entries keep their source order; draw math and the collection view both
/// walk them in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    total_weight: f64,
}

impl Catalog {
    /// Validate entries into a catalog.
    ///
    /// Rejects empty input, non-positive or non-finite weights, and
    /// duplicate identifiers.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        let mut total_weight = 0.0;
        for entry in &entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(DomainError::non_positive_weight(
                    entry.id.as_str(),
                    entry.weight,
                ));
            }
            if !seen.insert(entry.id.clone()) {
                return Err(DomainError::duplicate_entry(entry.id.as_str()));
            }
            total_weight += entry.weight;
        }

        Ok(Self {
            entries,
            total_weight,
        })
    }

    /// Sum of all entry weights. Positive for any constructed catalog.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Select the entry for a roll in `[0, total_weight)`.
    ///
    /// Walks entries in source order and returns the first whose cumulative
    /// weight reaches the roll. Floating-point residue can leave a roll past
    /// every interval; the final entry absorbs it so a roll always lands.
    pub fn pick(&self, roll: f64) -> Result<&CatalogEntry, DomainError> {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll <= cumulative {
                return Ok(entry);
            }
        }
        self.entries.last().ok_or(DomainError::EmptyCatalog)
    }
}
