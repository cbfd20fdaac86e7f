use crate::csv_store::CsvStore;
use crate::error::Result;
use crate::json_store::JsonStore;
use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;
use watchlog_config::{Config, PathManager, StorageBackend};
use watchlog_models::{EntryPatch, NewEntry, WatchEntry};

/// The entry persistence contract. Both backings satisfy it identically;
/// which one is in play is decided once, at construction, from config.
pub trait EntryStore: Send + Sync {
    /// Assign a fresh id and creation timestamp, persist the record,
    /// return it as stored.
    fn create(&self, new: NewEntry) -> Result<WatchEntry>;

    /// Every stored record, unordered. Ordering belongs to the query layer.
    fn list(&self) -> Result<Vec<WatchEntry>>;

    /// Merge the supplied fields into the matching record and stamp
    /// `updated_at`. `NotFound` when no record matches.
    fn update(&self, id: &str, patch: EntryPatch) -> Result<WatchEntry>;

    /// Remove the record if present. A missing id is a no-op, so a repeat
    /// delete never errors.
    fn delete(&self, id: &str) -> Result<()>;
}

/// Materialize a `NewEntry` into a stored record. Shared by both backings
/// so id and timestamp assignment cannot drift between them.
pub(crate) fn build_entry(new: NewEntry) -> WatchEntry {
    WatchEntry {
        id: Uuid::new_v4().to_string(),
        tmdb_id: new.tmdb_id,
        title: new.title,
        poster_path: new.poster_path,
        media_kind: new.media_kind,
        watched_at: new.watched_at,
        rating: new.rating,
        review: new.review,
        note: new.note,
        status: new.status,
        progress: new.progress,
        total_episodes: new.total_episodes,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub(crate) fn apply_patch(entry: &mut WatchEntry, patch: &EntryPatch) {
    patch.apply_to(entry);
    entry.updated_at = Some(Utc::now());
}

/// Open the configured backing. The data directory is the storage path
/// override when set, the platform data dir otherwise.
pub fn open_store(config: &Config, paths: &PathManager) -> Box<dyn EntryStore> {
    let data_dir: PathBuf = config
        .storage
        .path
        .clone()
        .unwrap_or_else(|| paths.data_dir().to_path_buf());

    match config.storage.backend {
        StorageBackend::Json => Box::new(JsonStore::new(data_dir.join("entries.json"))),
        StorageBackend::Csv => Box::new(CsvStore::new(data_dir.join("entries.csv"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_config::{StorageConfig, TmdbConfig};
    use watchlog_models::MediaKind;

    #[test]
    fn build_entry_assigns_unique_ids() {
        let a = build_entry(NewEntry::new(1, "A", MediaKind::Movie, Utc::now()));
        let b = build_entry(NewEntry::new(1, "A", MediaKind::Movie, Utc::now()));
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn open_store_honors_backend_and_path_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tmdb: Some(TmdbConfig::new("k".to_string())),
            storage: StorageConfig {
                backend: StorageBackend::Csv,
                path: Some(dir.path().to_path_buf()),
            },
        };
        let paths = PathManager::from_base(dir.path().join("unused"));
        let store = open_store(&config, &paths);

        let created = store
            .create(NewEntry::new(42, "Severance", MediaKind::Tv, Utc::now()))
            .unwrap();
        assert!(dir.path().join("entries.csv").exists());
        assert_eq!(store.list().unwrap(), vec![created]);
    }
}
