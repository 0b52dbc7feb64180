//! Flat-file persistence for per-word learner state.
//!
//! The store is a single JSON document mapping a collection key
//! (`basic`, `textbook`, `song:{slug}`) to that pool's id -> record
//! map. Word ids are only unique within one collection, hence the
//! extra level of keying. Reads that fail for any reason degrade to an
//! empty store; every mutation is written back synchronously
//! (last-write-wins, single learner per deployment).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{ProgressMap, ProgressRecord};

type StoreData = HashMap<String, ProgressMap>;

pub struct ProgressStore {
    path: PathBuf,
    data: StoreData,
}

impl ProgressStore {
    /// Open the store at `path`. A missing file means a fresh learner;
    /// a malformed file is logged and treated the same way.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoreData>(&raw) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(
                        "Malformed progress file {}: {} - starting fresh",
                        path.display(),
                        e
                    );
                    StoreData::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoreData::new(),
            Err(e) => {
                tracing::warn!(
                    "Could not read progress file {}: {} - starting fresh",
                    path.display(),
                    e
                );
                StoreData::new()
            }
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The id -> record map for one collection. Missing collections
    /// read as empty.
    pub fn collection(&self, key: &str) -> ProgressMap {
        self.data.get(key).cloned().unwrap_or_default()
    }

    pub fn get(&self, key: &str, word_id: i64) -> Option<&ProgressRecord> {
        self.data.get(key)?.get(&word_id)
    }

    /// Insert or replace one word's record and persist.
    pub fn upsert(&mut self, key: &str, word_id: i64, record: ProgressRecord) -> io::Result<()> {
        self.data
            .entry(key.to_string())
            .or_default()
            .insert(word_id, record);
        self.persist()
    }

    /// Bulk reset: drop every record in every collection.
    pub fn clear(&mut self) -> io::Result<()> {
        self.data.clear();
        self.persist()
    }

    /// Total number of records across all collections.
    pub fn studied_count(&self) -> usize {
        self.data.values().map(|map| map.len()).sum()
    }

    /// Records due at `now` in one collection.
    pub fn due_count(&self, key: &str, now: DateTime<Utc>) -> usize {
        self.data
            .get(key)
            .map(|map| map.values().filter(|r| r.is_due(now)).count())
            .unwrap_or(0)
    }

    /// Earliest scheduled review strictly after `now`, across all
    /// collections. None when nothing is scheduled ahead.
    pub fn next_review_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.data
            .values()
            .flat_map(|map| map.values())
            .map(|record| record.next_review_at)
            .filter(|at| *at > now)
            .min()
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)
    }
}
