use crate::error::{Result, StoreError};
use crate::store::{apply_patch, build_entry, EntryStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use watchlog_models::{EntryPatch, MediaKind, NewEntry, WatchEntry, WatchStatus};

/// Flat-table backing: a CSV file with a header row and fixed column
/// order. The whole table is read into memory, mutated, and rewritten
/// atomically on every write. Optional fields are empty cells.
pub struct CsvStore {
    path: PathBuf,
}

/// On-disk row shape. Field order here IS the column order; optionals
/// cannot be skipped the way the JSON documents skip them, so this stays
/// a separate struct instead of reusing the model's serde layout.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    id: String,
    tmdb_id: u64,
    title: String,
    poster_path: Option<String>,
    media_kind: MediaKind,
    watched_at: DateTime<Utc>,
    rating: Option<u8>,
    review: Option<String>,
    note: Option<String>,
    status: WatchStatus,
    progress: Option<u32>,
    total_episodes: Option<u32>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<&WatchEntry> for Row {
    fn from(entry: &WatchEntry) -> Self {
        Self {
            id: entry.id.clone(),
            tmdb_id: entry.tmdb_id,
            title: entry.title.clone(),
            poster_path: entry.poster_path.clone(),
            media_kind: entry.media_kind,
            watched_at: entry.watched_at,
            rating: entry.rating,
            review: entry.review.clone(),
            note: entry.note.clone(),
            status: entry.status,
            progress: entry.progress,
            total_episodes: entry.total_episodes,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl From<Row> for WatchEntry {
    fn from(row: Row) -> Self {
        Self {
            id: row.id,
            tmdb_id: row.tmdb_id,
            title: row.title,
            poster_path: row.poster_path,
            media_kind: row.media_kind,
            watched_at: row.watched_at,
            rating: row.rating,
            review: row.review,
            note: row.note,
            status: row.status,
            progress: row.progress,
            total_episodes: row.total_episodes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CsvStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<WatchEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "entry table does not exist yet");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        let mut entries = Vec::new();
        for result in reader.deserialize::<Row>() {
            let row = result.map_err(|e| StoreError::persistence(&self.path, e))?;
            entries.push(WatchEntry::from(row));
        }
        Ok(entries)
    }

    fn write_all(&self, entries: &[WatchEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::persistence(parent, e))?;
        }

        // Atomic write: serialize to temp file, then rename over the table
        let temp_path = self.path.with_extension("csv.tmp");
        let mut writer = csv::Writer::from_path(&temp_path)
            .map_err(|e| StoreError::persistence(&temp_path, e))?;

        for entry in entries {
            writer
                .serialize(Row::from(entry))
                .map_err(|e| StoreError::persistence(&temp_path, e))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::persistence(&temp_path, e))?;
        drop(writer);

        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        debug!(count = entries.len(), path = %self.path.display(), "rewrote entry table");
        Ok(())
    }
}

impl EntryStore for CsvStore {
    fn create(&self, new: NewEntry) -> Result<WatchEntry> {
        let mut entries = self.read_all()?;
        let entry = build_entry(new);
        entries.push(entry.clone());
        self.write_all(&entries)?;
        debug!(id = %entry.id, title = %entry.title, "added entry");
        Ok(entry)
    }

    fn list(&self) -> Result<Vec<WatchEntry>> {
        self.read_all()
    }

    fn update(&self, id: &str, patch: EntryPatch) -> Result<WatchEntry> {
        let mut entries = self.read_all()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        apply_patch(entry, &patch);
        let updated = entry.clone();
        self.write_all(&entries)?;
        debug!(id = %updated.id, "updated entry");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            debug!(id = %id, "delete miss, nothing to remove");
            return Ok(());
        }

        self.write_all(&entries)?;
        debug!(id = %id, "deleted entry");
        Ok(())
    }
}
