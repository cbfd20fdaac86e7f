use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    /// Rejected before any request is made
    #[error("search query cannot be empty")]
    EmptyQuery,

    /// TMDB answered with a non-success status
    #[error("TMDB returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never produced a usable response
    #[error("request to TMDB failed")]
    Request(#[from] reqwest::Error),
}
