use crate::api::{validate_item, SearchResponse, SearchResult};
use crate::error::TmdbError;
use reqwest::Client;
use tracing::info;
use watchlog_config::TmdbConfig;

/// Thin gateway over TMDB multi-search. Results pass through unmodified
/// apart from boundary validation; ranking stays whatever TMDB decided.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, TmdbError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TmdbError::EmptyQuery);
        }

        let url = format!("{}/search/multi", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Upstream { status, body });
        }

        let data: SearchResponse = response.json().await?;
        let raw_count = data.results.len();
        let results: Vec<SearchResult> = data.results.into_iter().filter_map(validate_item).collect();

        info!(
            "Search for \"{}\" returned {} results (raw: {})",
            query,
            results.len(),
            raw_count
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(&TmdbConfig::new("test-key".to_string()))
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_request() {
        let err = client().search("").await.unwrap_err();
        assert!(matches!(err, TmdbError::EmptyQuery));

        let err = client().search("   ").await.unwrap_err();
        assert!(matches!(err, TmdbError::EmptyQuery));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = TmdbConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9999/".to_string(),
        };
        let client = TmdbClient::new(&config);
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
