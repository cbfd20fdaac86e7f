use crate::error::{Result, StoreError};
use crate::store::{apply_patch, build_entry, EntryStore};
use std::path::PathBuf;
use tracing::debug;
use watchlog_models::{EntryPatch, NewEntry, WatchEntry};

/// Document-collection backing: one JSON file holding an array of entry
/// documents. Every write is a whole-collection read-modify-rewrite, with
/// the rewrite going through a temp file and a rename so a failed write
/// leaves the previous collection intact.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<WatchEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "entry collection does not exist yet");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        // A corrupt primary store is an error, never auto-discarded
        serde_json::from_str(&content).map_err(|e| StoreError::persistence(&self.path, e))
    }

    fn write_all(&self, entries: &[WatchEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::persistence(parent, e))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)
            .map_err(|e| StoreError::persistence(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        debug!(count = entries.len(), path = %self.path.display(), "rewrote entry collection");
        Ok(())
    }
}

impl EntryStore for JsonStore {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use watchlog_models::{MediaKind, WatchStatus};

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("entries.json"))
    }

    fn new_entry(title: &str) -> NewEntry {
        NewEntry::new(
            603,
            title,
            MediaKind::Movie,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn create_then_list_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut new = new_entry("The Matrix");
        new.rating = Some(8);
        new.review = Some("still holds up".to_string());
        let created = store.create(new.clone()).unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.tmdb_id, new.tmdb_id);
        assert_eq!(created.title, new.title);
        assert_eq!(created.rating, new.rating);
        assert_eq!(created.review, new.review);
        assert!(created.updated_at.is_none());

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn list_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let created = store.create(new_entry("Heat")).unwrap();

        let patch = EntryPatch {
            rating: Some(9),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).unwrap();

        assert_eq!(updated.rating, Some(9));
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.unwrap() >= created.created_at);

        // The merge is what got persisted, not just what got returned
        assert_eq!(store.list().unwrap(), vec![updated]);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_entry("Heat")).unwrap();

        let err = store.update("no-such-id", EntryPatch::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let created = store.create(new_entry("Alien")).unwrap();
        let kept = store.create(new_entry("Aliens")).unwrap();

        store.delete(&created.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![kept.clone()]);

        // Second delete of the same id: no error, list unchanged
        store.delete(&created.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![kept]);
    }

    #[test]
    fn entries_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let created = {
            let store = store_in(&dir);
            store.create(new_entry("Stalker")).unwrap()
        };

        let reopened = store_in(&dir);
        assert_eq!(reopened.list().unwrap(), vec![created]);
    }

    #[test]
    fn corrupt_collection_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
        // The corrupt file is left in place for the user to inspect
        assert!(store.path().exists());
    }

    #[test]
    fn movie_with_progress_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut new = new_entry("Dune");
        new.progress = Some(5);
        let created = store.create(new).unwrap();

        assert_eq!(created.media_kind, MediaKind::Movie);
        assert_eq!(created.progress, Some(5));
    }

    #[test]
    fn status_defaults_to_completed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let created = store.create(new_entry("Ikiru")).unwrap();
        assert_eq!(created.status, WatchStatus::Completed);
    }
}
