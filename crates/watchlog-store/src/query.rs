use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use watchlog_models::{MediaKind, WatchEntry, WatchStatus};

/// Optional predicates, AND-combined, plus a 1-based page window.
/// A zero page size is unrepresentable; callers reject it at parse time.
#[derive(Debug, Clone)]
pub struct EntryQuery {
    pub status: Option<WatchStatus>,
    /// Inclusive lower bound
    pub min_rating: Option<u8>,
    pub media_kind: Option<MediaKind>,
    /// Case-insensitive substring match on the title
    pub title_search: Option<String>,
    pub page: usize,
    pub per_page: NonZeroUsize,
}

pub const DEFAULT_PER_PAGE: usize = 10;

impl Default for EntryQuery {
    fn default() -> Self {
        Self {
            status: None,
            min_rating: None,
            media_kind: None,
            title_search: None,
            page: 1,
            per_page: NonZeroUsize::new(DEFAULT_PER_PAGE).unwrap(),
        }
    }
}

impl EntryQuery {
    fn matches(&self, entry: &WatchEntry) -> bool {
        if let Some(status) = self.status {
            if entry.status != status {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if entry.rating.map_or(true, |r| r < min_rating) {
                return false;
            }
        }
        if let Some(media_kind) = self.media_kind {
            if entry.media_kind != media_kind {
                return false;
            }
        }
        if let Some(search) = &self.title_search {
            if !entry.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QueryResponse {
    pub data: Vec<WatchEntry>,
    pub pagination: Pagination,
    pub summary: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

/// Sort by watch date, newest first. The sort is stable, so entries
/// sharing a `watched_at` keep their arrival order.
pub fn sorted_by_watched_desc(mut entries: Vec<WatchEntry>) -> Vec<WatchEntry> {
    entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
    entries
}

/// Pure query over an entry list: filter, sort, slice one page, and
/// summarize the matched set.
pub fn run_query(entries: &[WatchEntry], query: &EntryQuery) -> QueryResponse {
    let matches: Vec<WatchEntry> = entries
        .iter()
        .filter(|e| query.matches(e))
        .cloned()
        .collect();
    let matches = sorted_by_watched_desc(matches);

    let total_items = matches.len();
    let per_page = query.per_page.get();
    let total_pages = total_items.div_ceil(per_page);

    let summary = summarize(&matches);

    let page = query.page.max(1);
    let data: Vec<WatchEntry> = matches
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    QueryResponse {
        data,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: per_page,
        },
        summary,
    }
}

/// Human-readable collection summary over the matched set, counting
/// distinct calendar years among the watch dates.
fn summarize(matches: &[WatchEntry]) -> String {
    let years: BTreeSet<i32> = matches.iter().map(|e| e.watched_at.year()).collect();
    let year_count = years.len();
    let year_word = if year_count == 1 { "year" } else { "years" };
    format!(
        "A curated collection of {} films across {} {}",
        matches.len(),
        year_count,
        year_word
    )
}
