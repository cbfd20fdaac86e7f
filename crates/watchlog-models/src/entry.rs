use crate::media::MediaKind;
use crate::status::WatchStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded viewing of a movie or TV show.
///
/// This is the canonical schema: the superset of the two historical on-disk
/// variants. `progress`/`total_episodes` only mean anything for tv entries,
/// but the model does not enforce their absence on movies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEntry {
    pub id: String,
    pub tmdb_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    pub media_kind: MediaKind,
    pub watched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: WatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating an entry. `id`, `created_at` and
/// `updated_at` are the store's to assign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEntry {
    pub tmdb_id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    pub media_kind: MediaKind,
    pub watched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
}

impl NewEntry {
    pub fn new(tmdb_id: u64, title: impl Into<String>, media_kind: MediaKind, watched_at: DateTime<Utc>) -> Self {
        Self {
            tmdb_id,
            title: title.into(),
            poster_path: None,
            media_kind,
            watched_at,
            rating: None,
            review: None,
            note: None,
            status: WatchStatus::default(),
            progress: None,
            total_episodes: None,
        }
    }
}

/// Partial update: a `Some` field overwrites the stored value, a `None`
/// field is left untouched. `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_kind: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
}

impl EntryPatch {
    /// Merge the supplied fields into `entry`, leaving the rest untouched.
    /// The caller stamps `updated_at`.
    pub fn apply_to(&self, entry: &mut WatchEntry) {
        if let Some(tmdb_id) = self.tmdb_id {
            entry.tmdb_id = tmdb_id;
        }
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(poster_path) = &self.poster_path {
            entry.poster_path = Some(poster_path.clone());
        }
        if let Some(media_kind) = self.media_kind {
            entry.media_kind = media_kind;
        }
        if let Some(watched_at) = self.watched_at {
            entry.watched_at = watched_at;
        }
        if let Some(rating) = self.rating {
            entry.rating = Some(rating);
        }
        if let Some(review) = &self.review {
            entry.review = Some(review.clone());
        }
        if let Some(note) = &self.note {
            entry.note = Some(note.clone());
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(progress) = self.progress {
            entry.progress = Some(progress);
        }
        if let Some(total_episodes) = self.total_episodes {
            entry.total_episodes = Some(total_episodes);
        }
    }

    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> WatchEntry {
        WatchEntry {
            id: "abc".to_string(),
            tmdb_id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            media_kind: MediaKind::Movie,
            watched_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            rating: Some(8),
            review: None,
            note: None,
            status: WatchStatus::Completed,
            progress: None,
            total_episodes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut entry = sample_entry();
        let patch = EntryPatch {
            rating: Some(9),
            ..Default::default()
        };
        patch.apply_to(&mut entry);

        assert_eq!(entry.rating, Some(9));
        assert_eq!(entry.title, "The Matrix");
        assert_eq!(entry.status, WatchStatus::Completed);
        assert_eq!(entry.created_at, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut entry = sample_entry();
        let before = entry.clone();
        let patch = EntryPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut entry);
        assert_eq!(entry, before);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&WatchStatus::PlanToWatch).unwrap();
        assert_eq!(json, "\"plan_to_watch\"");
        let kind = serde_json::to_string(&MediaKind::Tv).unwrap();
        assert_eq!(kind, "\"tv\"");
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let entry = sample_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("review").is_none());
        assert!(json.get("updated_at").is_none());
        assert_eq!(json["rating"], 8);
    }
}
