use serde::{Deserialize, Serialize};
use tracing::debug;
use watchlog_models::MediaKind;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<RawSearchItem>,
}

/// Multi-search item as TMDB sends it: a string kind tag plus whichever
/// optional fields that kind happens to carry. Validated into
/// `SearchResult` before anything downstream sees it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchItem {
    pub media_type: Option<String>,
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
}

/// A validated search hit. Only the two kinds the tracker records get
/// through; people and unknown kinds are dropped at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum SearchResult {
    Movie(MovieResult),
    Tv(TvResult),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResult {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvResult {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

impl SearchResult {
    pub fn tmdb_id(&self) -> u64 {
        match self {
            SearchResult::Movie(m) => m.id,
            SearchResult::Tv(t) => t.id,
        }
    }

    pub fn display_title(&self) -> &str {
        match self {
            SearchResult::Movie(m) => &m.title,
            SearchResult::Tv(t) => &t.name,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        match self {
            SearchResult::Movie(_) => MediaKind::Movie,
            SearchResult::Tv(_) => MediaKind::Tv,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            SearchResult::Movie(m) => m.poster_path.as_deref(),
            SearchResult::Tv(t) => t.poster_path.as_deref(),
        }
    }

    /// Release/first-air year, when the date field is present and parseable
    pub fn year(&self) -> Option<&str> {
        let date = match self {
            SearchResult::Movie(m) => m.release_date.as_deref(),
            SearchResult::Tv(t) => t.first_air_date.as_deref(),
        };
        date.filter(|d| d.len() >= 4).map(|d| &d[..4])
    }
}

/// Boundary validation: keep movie and tv hits with the fields the domain
/// needs, drop everything else.
pub(crate) fn validate_item(raw: RawSearchItem) -> Option<SearchResult> {
    match raw.media_type.as_deref() {
        Some("movie") => {
            let (Some(id), Some(title)) = (raw.id, raw.title) else {
                debug!("dropping movie result without id or title");
                return None;
            };
            Some(SearchResult::Movie(MovieResult {
                id,
                title,
                release_date: raw.release_date,
                poster_path: raw.poster_path,
                overview: raw.overview,
                vote_average: raw.vote_average,
            }))
        }
        Some("tv") => {
            let (Some(id), Some(name)) = (raw.id, raw.name) else {
                debug!("dropping tv result without id or name");
                return None;
            };
            Some(SearchResult::Tv(TvResult {
                id,
                name,
                first_air_date: raw.first_air_date,
                poster_path: raw.poster_path,
                overview: raw.overview,
                vote_average: raw.vote_average,
            }))
        }
        other => {
            debug!(media_type = ?other, "dropping non movie/tv result");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTI_SEARCH_BODY: &str = r#"{
        "page": 1,
        "results": [
            {
                "media_type": "movie",
                "id": 603,
                "title": "The Matrix",
                "release_date": "1999-03-30",
                "poster_path": "/matrix.jpg",
                "overview": "A hacker learns the truth.",
                "vote_average": 8.2
            },
            {
                "media_type": "tv",
                "id": 1396,
                "name": "Breaking Bad",
                "first_air_date": "2008-01-20",
                "vote_average": 8.9
            },
            {
                "media_type": "person",
                "id": 6384,
                "name": "Keanu Reeves"
            }
        ],
        "total_pages": 1,
        "total_results": 3
    }"#;

    #[test]
    fn validation_keeps_movie_and_tv_drops_person() {
        let response: SearchResponse = serde_json::from_str(MULTI_SEARCH_BODY).unwrap();
        assert_eq!(response.results.len(), 3);

        let results: Vec<SearchResult> = response
            .results
            .into_iter()
            .filter_map(validate_item)
            .collect();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].tmdb_id(), 603);
        assert_eq!(results[0].display_title(), "The Matrix");
        assert_eq!(results[0].media_kind(), MediaKind::Movie);
        assert_eq!(results[0].year(), Some("1999"));
        assert_eq!(results[0].poster_path(), Some("/matrix.jpg"));

        assert_eq!(results[1].display_title(), "Breaking Bad");
        assert_eq!(results[1].media_kind(), MediaKind::Tv);
        assert_eq!(results[1].year(), Some("2008"));
    }

    #[test]
    fn movie_without_title_is_dropped() {
        let raw = RawSearchItem {
            media_type: Some("movie".to_string()),
            id: Some(1),
            title: None,
            name: None,
            release_date: None,
            first_air_date: None,
            poster_path: None,
            overview: None,
            vote_average: None,
        };
        assert!(validate_item(raw).is_none());
    }

    #[test]
    fn result_union_serializes_with_kind_tag() {
        let result = SearchResult::Tv(TvResult {
            id: 1396,
            name: "Breaking Bad".to_string(),
            first_air_date: Some("2008-01-20".to_string()),
            poster_path: None,
            overview: None,
            vote_average: None,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["media_type"], "tv");
        assert_eq!(json["id"], 1396);
        assert!(json.get("poster_path").is_none());
    }
}
