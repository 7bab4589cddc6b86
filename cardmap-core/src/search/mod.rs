//! Local search against an external place-search capability.
//!
//! The [`PlaceSearch`] trait abstracts the geocoding service: a natural
//! language query plus the visible map region in, an ordered list of
//! [`Place`](crate::Place) values out. Searches complete asynchronously and
//! may complete out of order, so every issued request carries a
//! [`RequestToken`] from a [`RequestSequencer`]; only the latest token may
//! change what the screen shows.

mod error;

pub use error::SearchError;

use async_trait::async_trait;
use geo::Rect;

use crate::Place;

/// A query scoped to a map region.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Natural-language query text.
    pub query: String,
    /// Region biasing the search, in WGS84 (`x = longitude`, `y = latitude`).
    pub region: Rect<f64>,
}

impl SearchRequest {
    /// Build a request for `query` within `region`.
    #[must_use]
    pub fn new(query: impl Into<String>, region: Rect<f64>) -> Self {
        Self {
            query: query.into(),
            region,
        }
    }
}

/// Asynchronous place search.
///
/// Futures need not be `Send`: the screen drives every search on the task
/// that owns it.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use geo::{Coord, Intersects};
/// use cardmap_core::{Place, PlaceSearch, SearchError, SearchRequest};
///
/// struct Fixed(Vec<Place>);
///
/// #[async_trait(?Send)]
/// impl PlaceSearch for Fixed {
///     async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, SearchError> {
///         Ok(self
///             .0
///             .iter()
///             .filter(|place| request.region.intersects(&place.location))
///             .cloned()
///             .collect())
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait PlaceSearch {
    /// Search for places matching `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] when the service fails to answer.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, SearchError>;
}

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Sequence number of the request.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Hands out increasing request tokens and remembers the latest.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    /// Allocate the token for a new request, superseding earlier ones.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether `token` belongs to the most recently issued request.
    #[must_use]
    pub const fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn only_the_newest_token_is_latest() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.issue();
        assert!(sequencer.is_latest(first));
        let second = sequencer.issue();
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
        assert!(first < second);
    }

    #[rstest]
    fn error_reports_its_query() {
        let err = SearchError::Failed {
            query: "tacos".into(),
            message: "offline".into(),
        };
        assert_eq!(err.query(), "tacos");
        assert_eq!(err.to_string(), "search for \"tacos\" failed: offline");
    }
}
