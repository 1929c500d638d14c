//! Per-variation practice log persisted as JSON.

use chrono::Utc;
use opening_core::model::{progress_key, ProgressLog, VariationProgress};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::StoreError;

pub type SharedProgress = Arc<Mutex<ProgressBook>>;

#[derive(Debug)]
pub struct ProgressBook {
    path: PathBuf,
    log: ProgressLog,
}

impl ProgressBook {
    /// Start an empty log that will be written to `path`.
    pub fn empty<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            log: ProgressLog::default(),
        }
    }

    /// Read the log from `path`, or start empty when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("{} not found. Starting with empty progress.", path.display());
                return Ok(Self::empty(path));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let log = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            log,
        })
    }

    pub fn shared(self) -> SharedProgress {
        Arc::new(Mutex::new(self))
    }

    pub fn get(&self, opening_id: u32, variation_name: &str) -> Option<&VariationProgress> {
        self.log.progress.get(&progress_key(opening_id, variation_name))
    }

    /// Record one checked move. A success raises the high-water mark to
    /// `new_index`; a failure counts against `old_index`.
    pub fn record(
        &mut self,
        opening_id: u32,
        variation_name: &str,
        new_index: usize,
        old_index: usize,
        success: bool,
    ) {
        let entry = self
            .log
            .progress
            .entry(progress_key(opening_id, variation_name))
            .or_default();

        if success {
            entry.move_index = entry.move_index.max(new_index);
        } else {
            *entry.failures.entry(old_index.to_string()).or_insert(0) += 1;
        }
        entry.last_practiced_at = Some(Utc::now().to_rfc3339());
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(&self.log).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
