//! Test doubles for the screen's collaborators, used by unit and behaviour
//! tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, Rect};

use crate::annotation::{Annotation, MapSurface, fitting_region};
use crate::card::CardCell;
use crate::carousel::{CardDeck, CarouselError, CarouselSurface};
use crate::diff::Changeset;
use crate::keyboard::LayoutAnimation;
use crate::search::{PlaceSearch, SearchError, SearchRequest};
use crate::{AddressComponents, Place};

/// Four places around Springfield, each with a distinct name.
#[must_use]
pub fn sample_places() -> Vec<Place> {
    let place = |name: &str, x: f64, y: f64, street: &str| {
        Place::new(name, Coord { x, y }).with_address(AddressComponents {
            thoroughfare: Some(street.to_owned()),
            locality: Some("Springfield".to_owned()),
            ..AddressComponents::default()
        })
    };
    vec![
        place("Krusty Burger", -89.65, 39.80, "Main St"),
        place("Moe's Tavern", -89.64, 39.78, "Walnut St"),
        place("Kwik-E-Mart", -89.66, 39.79, "Evergreen Terrace"),
        place("Springfield Library", -89.62, 39.81, "Elm St"),
    ]
}

/// Region covering every place in [`sample_places`].
#[must_use]
pub fn sample_region() -> Rect<f64> {
    Rect::new(Coord { x: -90.0, y: 39.5 }, Coord { x: -89.5, y: 40.0 })
}

/// In-memory map that records what the screen asks of it.
///
/// Showing annotations moves the region to fit them, as a real map would.
#[derive(Debug, Clone)]
pub struct RecordingMap {
    region: Rect<f64>,
    annotations: Vec<Annotation>,
    selected: Option<Annotation>,
    show_requests: usize,
    selections: usize,
}

impl Default for RecordingMap {
    fn default() -> Self {
        Self {
            region: sample_region(),
            annotations: Vec::new(),
            selected: None,
            show_requests: 0,
            selections: 0,
        }
    }
}

impl RecordingMap {
    /// Pan or zoom the map to `region`.
    pub fn set_region(&mut self, region: Rect<f64>) {
        self.region = region;
    }

    /// Most recently selected annotation.
    #[must_use]
    pub const fn selected(&self) -> Option<&Annotation> {
        self.selected.as_ref()
    }

    /// Number of `show_annotations` calls.
    #[must_use]
    pub const fn show_requests(&self) -> usize {
        self.show_requests
    }

    /// Number of `select_annotation` calls.
    #[must_use]
    pub const fn selections(&self) -> usize {
        self.selections
    }
}

impl MapSurface for RecordingMap {
    fn region(&self) -> Rect<f64> {
        self.region
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn remove_all_annotations(&mut self) {
        self.annotations.clear();
        self.selected = None;
    }

    fn show_annotations(&mut self, _animated: bool) {
        self.show_requests += 1;
        if let Some(region) = fitting_region(&self.annotations) {
            self.region = region;
        }
    }

    fn select_annotation(&mut self, annotation: &Annotation, _animated: bool) {
        self.selections += 1;
        self.selected = Some(annotation.clone());
    }
}

/// In-memory carousel that keeps rendered cards and records requests.
#[derive(Debug)]
pub struct RecordingCarousel {
    deck: CardDeck,
    changes: Vec<Changeset>,
    scrolls: Vec<(usize, bool)>,
    bottom_offset: Option<(f64, LayoutAnimation)>,
}

impl Default for RecordingCarousel {
    fn default() -> Self {
        Self::with_deck(CardDeck::registered())
    }
}

impl RecordingCarousel {
    /// Carousel whose card type was never registered; rendering any card
    /// fails.
    #[must_use]
    pub fn unregistered() -> Self {
        Self::with_deck(CardDeck::unregistered())
    }

    const fn with_deck(deck: CardDeck) -> Self {
        Self {
            deck,
            changes: Vec::new(),
            scrolls: Vec::new(),
            bottom_offset: None,
        }
    }

    /// Cards currently rendered, in order.
    #[must_use]
    pub fn cards(&self) -> &[CardCell] {
        self.deck.cards()
    }

    /// Every changeset applied so far.
    #[must_use]
    pub fn changes(&self) -> &[Changeset] {
        &self.changes
    }

    /// `(index, animated)` for every scroll request.
    #[must_use]
    pub fn scrolls(&self) -> &[(usize, bool)] {
        &self.scrolls
    }

    /// Last bottom offset applied.
    #[must_use]
    pub const fn bottom_offset(&self) -> Option<(f64, LayoutAnimation)> {
        self.bottom_offset
    }
}

impl CarouselSurface for RecordingCarousel {
    fn apply_changes(&mut self, changes: &Changeset, items: &[Place]) -> Result<(), CarouselError> {
        self.deck.apply(changes, items)?;
        self.changes.push(changes.clone());
        Ok(())
    }

    fn scroll_to(&mut self, index: usize, animated: bool) {
        self.scrolls.push((index, animated));
    }

    fn set_bottom_offset(&mut self, offset: f64, animation: LayoutAnimation) {
        self.bottom_offset = Some((offset, animation));
    }
}

#[derive(Debug, Clone)]
struct ScriptedReply {
    delay: Duration,
    result: Result<Vec<Place>, SearchError>,
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, ScriptedReply>,
    requests: Vec<SearchRequest>,
}

/// Search service answering from a script, after a per-query delay.
///
/// Unscripted queries succeed immediately with no places. Clones share the
/// script and the request log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSearch {
    script: Rc<RefCell<Script>>,
}

impl ScriptedSearch {
    /// Answer `query` with `places` after `delay`.
    #[must_use]
    pub fn reply(self, query: &str, delay: Duration, places: Vec<Place>) -> Self {
        self.respond(query, delay, Ok(places))
    }

    /// Fail `query` after `delay`.
    #[must_use]
    pub fn fail(self, query: &str, delay: Duration, message: &str) -> Self {
        let error = SearchError::Failed {
            query: query.to_owned(),
            message: message.to_owned(),
        };
        self.respond(query, delay, Err(error))
    }

    fn respond(self, query: &str, delay: Duration, result: Result<Vec<Place>, SearchError>) -> Self {
        self.script
            .borrow_mut()
            .replies
            .insert(query.to_owned(), ScriptedReply { delay, result });
        self
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.script.borrow().requests.clone()
    }

    /// Query texts received so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.script
            .borrow()
            .requests
            .iter()
            .map(|request| request.query.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl PlaceSearch for ScriptedSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Place>, SearchError> {
        let reply = {
            let mut script = self.script.borrow_mut();
            script.requests.push(request.clone());
            script.replies.get(&request.query).cloned()
        };
        let Some(ScriptedReply { delay, result }) = reply else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(delay).await;
        result
    }
}
