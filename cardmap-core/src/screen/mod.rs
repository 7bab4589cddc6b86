//! The search screen: a map, a search field and a card carousel kept in sync.
//!
//! [`Screen`] owns every component and exposes a synchronous API with time
//! passed in explicitly. [`ScreenDriver`] runs it on a single task, feeding
//! in UI events, debounce deadlines, search completions and keyboard
//! notifications as they arrive.
//!
//! Result sets are applied under a "latest request wins" policy: a completion
//! whose token has been superseded is discarded, even when it arrives after
//! the newer one.

mod driver;

pub use driver::{ScreenDriver, UiEvent};

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Instant;

use crate::annotation::{MapSurface, select_matching, sync_annotations};
use crate::carousel::{CarouselController, CarouselError, CarouselSurface, PagingLayout};
use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::keyboard::{KeyboardEvent, LayoutAnimation};
use crate::search::{RequestSequencer, RequestToken, SearchError, SearchRequest};
use crate::{Place, ResultSet, SelectAnnotation};

/// Tunable behaviour of a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenConfig {
    /// Quiet window after the last edit before searching.
    pub debounce: Duration,
    /// Whether [`Screen::load`] issues an initial search.
    pub search_on_load: bool,
    /// Carousel paging geometry.
    pub layout: PagingLayout,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            search_on_load: true,
            layout: PagingLayout::default(),
        }
    }
}

impl ScreenConfig {
    /// Set the debounce window.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Enable or disable the initial search.
    #[must_use]
    pub const fn with_search_on_load(mut self, search_on_load: bool) -> Self {
        self.search_on_load = search_on_load;
        self
    }

    /// Set the carousel layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: PagingLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Fatal screen failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The carousel could not render the new results.
    #[error("failed to render search results: {0}")]
    Render(#[from] CarouselError),
}

/// A search that should be started now.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    /// Token to hand back to [`Screen::complete_search`].
    pub token: RequestToken,
    /// Query and region to search.
    pub request: SearchRequest,
}

/// What [`Screen::complete_search`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The results replaced the map annotations and the cards.
    Applied {
        /// Number of places now shown.
        count: usize,
    },
    /// The search failed; the previous results stay on screen.
    Failed,
    /// A newer search was issued meanwhile; the completion was discarded.
    Stale,
}

/// Owner of the map, the query text and the carousel.
#[derive(Debug)]
pub struct Screen<M, C> {
    config: ScreenConfig,
    map: M,
    carousel: CarouselController<C>,
    selections: UnboundedReceiver<SelectAnnotation>,
    text: String,
    debouncer: Debouncer<String>,
    sequencer: RequestSequencer,
    results: ResultSet,
    bottom_offset: f64,
}

impl<M: MapSurface, C: CarouselSurface> Screen<M, C> {
    /// Assemble a screen around its map and carousel surfaces.
    #[must_use]
    pub fn new(map: M, carousel: C, config: ScreenConfig) -> Self {
        let (sender, selections) = mpsc::unbounded_channel();
        Self {
            config,
            map,
            carousel: CarouselController::new(carousel, config.layout, sender),
            selections,
            text: String::new(),
            debouncer: Debouncer::new(config.debounce),
            sequencer: RequestSequencer::default(),
            results: ResultSet::default(),
            bottom_offset: 0.0,
        }
    }

    /// Search for the current text straight away, if configured to.
    pub fn load(&mut self) -> Option<PendingSearch> {
        self.config
            .search_on_load
            .then(|| self.issue(self.text.clone()))
    }

    /// Record an edit of the search field at `now`.
    pub fn text_changed(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.debouncer.push(self.text.clone(), now);
    }

    /// When the pending edit becomes due for searching.
    #[must_use]
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Start a search if the field has been quiet for the debounce window.
    ///
    /// The map region is read now, not when typing began.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<PendingSearch> {
        let query = self.debouncer.poll(now)?;
        Some(self.issue(query))
    }

    fn issue(&mut self, query: String) -> PendingSearch {
        let token = self.sequencer.issue();
        let request = SearchRequest::new(query, self.map.region());
        log::debug!(
            "issuing search #{} for {:?}",
            token.sequence(),
            request.query
        );
        PendingSearch { token, request }
    }

    /// Apply the outcome of the search identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Render`] when the carousel cannot render the
    /// new results. The failure is not recoverable.
    pub fn complete_search(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Place>, SearchError>,
    ) -> Result<SearchOutcome, ScreenError> {
        if !self.sequencer.is_latest(token) {
            log::debug!("discarding superseded search #{}", token.sequence());
            return Ok(SearchOutcome::Stale);
        }
        let places = match result {
            Ok(places) => places,
            Err(err) => {
                log::warn!("failed local search: {err}");
                return Ok(SearchOutcome::Failed);
            }
        };

        self.results = ResultSet::new(places);
        sync_annotations(&mut self.map, &self.results);
        self.carousel.set_items(&self.results)?;
        self.carousel.scroll_to_first();

        let count = self.results.len();
        log::info!("showing {count} places for search #{}", token.sequence());
        Ok(SearchOutcome::Applied { count })
    }

    /// Handle a tap on the card at `index`.
    ///
    /// Returns `true` when a matching annotation was selected on the map.
    pub fn card_selected(&mut self, index: usize) -> bool {
        if !self.carousel.select(index) {
            return false;
        }
        let mut selected = false;
        while let Ok(request) = self.selections.try_recv() {
            selected |= select_matching(&mut self.map, &request);
        }
        selected
    }

    /// Keep the carousel above the on-screen keyboard.
    pub fn keyboard(&mut self, event: KeyboardEvent) {
        self.bottom_offset = event.bottom_offset();
        self.carousel
            .set_bottom_offset(self.bottom_offset, LayoutAnimation::IMMEDIATE);
    }

    /// Current search field text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Results currently shown.
    #[must_use]
    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Current carousel bottom offset.
    #[must_use]
    pub const fn bottom_offset(&self) -> f64 {
        self.bottom_offset
    }

    /// The map surface.
    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    /// The carousel controller.
    #[must_use]
    pub const fn carousel(&self) -> &CarouselController<C> {
        &self.carousel
    }

    /// Configuration the screen was built with.
    #[must_use]
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }
}
