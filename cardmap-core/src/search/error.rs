use thiserror::Error;

/// Errors from [`crate::search::PlaceSearch::search`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The search service rejected or could not answer the request.
    #[error("search for {query:?} failed: {message}")]
    Failed {
        /// Query text that was searched.
        query: String,
        /// Description supplied by the service.
        message: String,
    },
    /// The service found nothing it could answer with.
    ///
    /// Services that report "no results" as an error surface it here; the
    /// screen treats it like any other failure and keeps its current results.
    #[error("no results for {query:?}")]
    NoResults {
        /// Query text that was searched.
        query: String,
    },
}

impl SearchError {
    /// Query the failing request was issued for.
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Failed { query, .. } | Self::NoResults { query } => query,
        }
    }
}
