//! In-memory opening catalogue.
//!
//! Loaded once from the catalogue file at startup and shared read-only
//! between handlers.

use opening_core::line::replay_line;
use opening_core::model::{Catalogue, Opening, OpeningSummary, RandomPick, Variation};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct OpeningStore {
    openings: Vec<Opening>,
}

impl OpeningStore {
    pub fn new(openings: Vec<Opening>) -> Self {
        Self { openings }
    }

    /// Load the catalogue. A missing file yields an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!("{} not found; serving an empty catalogue", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let catalogue: Catalogue = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::new(catalogue.openings);
        let broken = store.check_lines();
        tracing::info!(
            "Loaded {} openings ({} variations, {} unplayable) from {}",
            store.openings.len(),
            store.variation_count(),
            broken,
            path.display()
        );
        Ok(store)
    }

    /// Replay every variation and log the ones that do not play through.
    /// Returns how many were unplayable.
    pub fn check_lines(&self) -> usize {
        let mut broken = 0;
        for opening in &self.openings {
            for variation in &opening.variations {
                if let Err(e) = replay_line(&variation.moves) {
                    tracing::warn!(
                        opening_id = opening.id,
                        variation = %variation.variation_name,
                        ply = e.ply(),
                        "Unplayable variation: {e}"
                    );
                    broken += 1;
                }
            }
        }
        broken
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    pub fn variation_count(&self) -> usize {
        self.openings.iter().map(|o| o.variations.len()).sum()
    }

    pub fn summaries(&self) -> Vec<OpeningSummary> {
        self.openings.iter().map(Opening::summary).collect()
    }

    pub fn get(&self, id: u32) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    /// Variation lookup; the name is matched ignoring ASCII case.
    pub fn variation(&self, id: u32, name: &str) -> Option<&Variation> {
        self.get(id)?.variation(name)
    }

    /// Uniform opening, then uniform variation within it. Openings without
    /// variations are skipped.
    pub fn random_pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RandomPick> {
        let candidates: Vec<&Opening> = self
            .openings
            .iter()
            .filter(|o| !o.variations.is_empty())
            .collect();
        let opening = candidates.choose(rng)?;
        let variation = opening.variations.choose(rng)?;

        Some(RandomPick {
            opening_id: opening.id,
            variation_name: variation.variation_name.clone(),
            moves: variation.moves.clone(),
        })
    }
}
