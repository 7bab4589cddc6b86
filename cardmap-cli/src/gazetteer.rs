//! In-memory place search backed by a JSON gazetteer.

use std::io::{self, BufReader};

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use cardmap_core::{Place, PlaceSearch, SearchError, SearchRequest};
use geo::Intersects;

use crate::CliError;

/// Fixed list of places searched by name and address.
///
/// A place matches when it lies inside the request region (boundary
/// included) and its name or formatted address contains the query,
/// ignoring case. A blank query matches every place in the region. Results
/// keep gazetteer order.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Gazetteer {
    /// Build a gazetteer from places already in memory.
    #[must_use]
    pub const fn from_places(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Load a JSON array of places from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::OpenGazetteer`] when the file cannot be opened and
    /// [`CliError::ParseGazetteer`] when it is not a valid place list.
    pub fn load(path: &Utf8Path) -> Result<Self, CliError> {
        let file = open_utf8_file(path).map_err(|source| CliError::OpenGazetteer {
            path: path.to_path_buf(),
            source,
        })?;
        let places: Vec<Place> = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| CliError::ParseGazetteer {
                path: path.to_path_buf(),
                source,
            },
        )?;
        log::debug!("loaded {} places from {path}", places.len());
        Ok(Self::from_places(places))
    }

    /// Places in gazetteer order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    fn matches(place: &Place, request: &SearchRequest, needle: &str) -> bool {
        if !request.region.intersects(&place.location) {
            return false;
        }
        needle.is_empty()
            || place.name.to_lowercase().contains(needle)
            || place.formatted_address().to_lowercase().contains(needle)
    }
}

#[async_trait(?Send)]
impl PlaceSearch for Gazetteer {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, SearchError> {
        let needle = request.query.trim().to_lowercase();
        let found: Vec<Place> = self
            .places
            .iter()
            .filter(|place| Self::matches(place, request, &needle))
            .cloned()
            .collect();
        if found.is_empty() && !needle.is_empty() {
            return Err(SearchError::NoResults {
                query: request.query.clone(),
            });
        }
        Ok(found)
    }
}

fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}
