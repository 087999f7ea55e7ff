//! Canonical catalog of model names and their performance scores.

use std::collections::HashMap;
use std::path::Path;

use rigscore_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of a model/score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(alias = "name")]
    pub model: String,
    pub score: f64,
}

/// Immutable name → score mapping that remembers insertion order.
///
/// Order matters: ties during similarity search go to the entry that was
/// inserted first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Build from entries. A repeated name keeps its first position and takes
    /// the later score.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut catalog = Self::default();
        for entry in entries {
            match catalog.positions.get(&entry.model) {
                Some(&pos) => catalog.entries[pos].score = entry.score,
                None => {
                    catalog.positions.insert(entry.model.clone(), catalog.entries.len());
                    catalog.entries.push(entry);
                }
            }
        }
        catalog
    }

    /// Convenience constructor for `(name, score)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self::from_entries(pairs.into_iter().map(|(model, score)| CatalogEntry {
            model: model.to_string(),
            score,
        }))
    }

    /// Load a JSON array of `{"model": ..., "score": ...}` records.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&text)?;
        if let Some(bad) = entries.iter().find(|e| e.model.trim().is_empty()) {
            return Err(Error::Catalog(format!(
                "{}: entry with empty model name (score {})",
                path.display(),
                bad.score
            )));
        }
        let catalog = Self::from_entries(entries);
        info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.positions.get(name).map(|&pos| self.entries[pos].score)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Canonical names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.model.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
