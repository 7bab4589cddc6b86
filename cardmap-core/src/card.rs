//! Presentation of a single place as a carousel card.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::Place;

/// A cell type that can bind itself to a place.
pub trait SelfConfiguringCell {
    /// Identifier under which reusable cells of this type are registered.
    const REUSE_IDENTIFIER: &'static str;

    /// Build an unconfigured cell.
    fn blank() -> Self;

    /// Bind `place` to the cell, replacing any previous content.
    fn configure(&mut self, place: &Place);
}

/// Card showing a place's name above its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCell {
    title: String,
    subtitle: String,
    subtitle_line_limit: usize,
    configured: bool,
}

impl CardCell {
    /// Placeholder shown in the title label before configuration.
    pub const TITLE_PLACEHOLDER: &'static str = "Location";
    /// Placeholder shown in the subtitle label before configuration.
    pub const SUBTITLE_PLACEHOLDER: &'static str = "Address";

    /// Card already bound to `place`.
    #[must_use]
    pub fn configured(place: &Place) -> Self {
        let mut cell = Self::blank();
        cell.configure(place);
        cell
    }

    /// Title label text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subtitle label text.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Maximum subtitle lines; `0` wraps without limit.
    #[must_use]
    pub const fn subtitle_line_limit(&self) -> usize {
        self.subtitle_line_limit
    }

    /// Whether a place has been bound.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.configured
    }
}

impl SelfConfiguringCell for CardCell {
    const REUSE_IDENTIFIER: &'static str = "CardCell";

    fn blank() -> Self {
        Self {
            title: Self::TITLE_PLACEHOLDER.to_owned(),
            subtitle: Self::SUBTITLE_PLACEHOLDER.to_owned(),
            subtitle_line_limit: 0,
            configured: false,
        }
    }

    fn configure(&mut self, place: &Place) {
        self.title.clone_from(&place.name);
        self.subtitle = place.formatted_address();
        self.configured = true;
    }
}

/// Errors returned by [`CellQueue::dequeue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DequeueError {
    /// No cell type was registered under the identifier.
    #[error("no cell registered for reuse identifier {identifier:?}")]
    Unregistered {
        /// The identifier that was asked for.
        identifier: &'static str,
    },
}

/// Pool of reusable cells keyed by reuse identifier.
///
/// Cells must be registered before they can be dequeued. Recycled cells are
/// handed out again before new ones are built.
#[derive(Debug)]
pub struct CellQueue<C> {
    registered: HashSet<&'static str>,
    recycled: HashMap<&'static str, Vec<C>>,
}

impl<C> Default for CellQueue<C> {
    fn default() -> Self {
        Self {
            registered: HashSet::new(),
            recycled: HashMap::new(),
        }
    }
}

impl<C: SelfConfiguringCell> CellQueue<C> {
    /// Allow cells of type `C` to be dequeued.
    pub fn register(&mut self) {
        self.registered.insert(C::REUSE_IDENTIFIER);
    }

    /// Take a cell for `place`, reusing a recycled one when available.
    ///
    /// # Errors
    ///
    /// Returns [`DequeueError::Unregistered`] if [`CellQueue::register`] was
    /// never called for `C`.
    pub fn dequeue(&mut self, place: &Place) -> Result<C, DequeueError> {
        if !self.registered.contains(C::REUSE_IDENTIFIER) {
            return Err(DequeueError::Unregistered {
                identifier: C::REUSE_IDENTIFIER,
            });
        }
        let mut cell = self
            .recycled
            .get_mut(C::REUSE_IDENTIFIER)
            .and_then(Vec::pop)
            .unwrap_or_else(C::blank);
        cell.configure(place);
        Ok(cell)
    }

    /// Return a cell that scrolled off screen or was removed.
    pub fn recycle(&mut self, cell: C) {
        self.recycled
            .entry(C::REUSE_IDENTIFIER)
            .or_default()
            .push(cell);
    }

    /// Number of cells waiting for reuse.
    #[must_use]
    pub fn recycled_len(&self) -> usize {
        self.recycled.values().map(Vec::len).sum()
    }
}
