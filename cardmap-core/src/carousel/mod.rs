//! Horizontally paging card carousel.
//!
//! [`CarouselController`] owns the ordered items shown as cards. Replacing the
//! items diffs them against the previous list and hands the resulting
//! [`Changeset`] to the [`CarouselSurface`]. Selecting a card publishes a
//! [`SelectAnnotation`] request on the channel supplied by the owning screen.

mod deck;
mod layout;

pub use deck::CardDeck;
pub use layout::{
    DEFAULT_ITEM_INSET, DEFAULT_PAGE_FRACTION, ItemFrame, PagingLayout, ScrollBehaviour,
};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::card::DequeueError;
use crate::diff::{Changeset, diff};
use crate::keyboard::LayoutAnimation;
use crate::{Place, PlaceKey, ResultSet};

/// Request to select the annotation for a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAnnotation {
    /// Key of the place whose annotation should be selected.
    pub key: PlaceKey,
    /// Title of that annotation.
    pub title: String,
}

impl SelectAnnotation {
    /// Build a request for the place identified by `key`.
    #[must_use]
    pub fn new(key: PlaceKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
        }
    }
}

/// Errors raised while updating the carousel surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// A card could not be dequeued for an inserted item.
    #[error("failed to dequeue card for item {index}: {source}")]
    Dequeue {
        /// Position of the item in the new list.
        index: usize,
        /// Underlying dequeue failure.
        #[source]
        source: DequeueError,
    },
}

/// Rendering surface of the carousel.
pub trait CarouselSurface {
    /// Apply `changes`, after which the surface shows `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Dequeue`] when a card cannot be produced for
    /// an inserted item.
    fn apply_changes(&mut self, changes: &Changeset, items: &[Place]) -> Result<(), CarouselError>;

    /// Scroll so the card at `index` is centred horizontally.
    fn scroll_to(&mut self, index: usize, animated: bool);

    /// Offset the carousel's bottom edge from its resting position.
    fn set_bottom_offset(&mut self, offset: f64, animation: LayoutAnimation);
}

/// Owner of the carousel's items and selection wiring.
#[derive(Debug)]
pub struct CarouselController<S> {
    surface: S,
    layout: PagingLayout,
    items: Vec<Place>,
    keys: Vec<PlaceKey>,
    selections: UnboundedSender<SelectAnnotation>,
}

impl<S: CarouselSurface> CarouselController<S> {
    /// Create an empty carousel publishing selections on `selections`.
    #[must_use]
    pub fn new(
        surface: S,
        layout: PagingLayout,
        selections: UnboundedSender<SelectAnnotation>,
    ) -> Self {
        Self {
            surface,
            layout,
            items: Vec::new(),
            keys: Vec::new(),
            selections,
        }
    }

    /// Replace the items with those of `results`.
    ///
    /// Duplicate keys cannot be diffed; the surface then receives a full
    /// reload instead.
    ///
    /// # Errors
    ///
    /// Propagates surface failures. The controller keeps its previous items
    /// in that case.
    pub fn set_items(&mut self, results: &ResultSet) -> Result<(), CarouselError> {
        let changes = diff(&self.keys, results.keys()).unwrap_or_else(|err| {
            log::warn!("reloading carousel: {err}");
            Changeset::reload(self.keys.len(), results.len())
        });
        self.surface.apply_changes(&changes, results.places())?;
        self.items = results.places().to_vec();
        self.keys = results.keys().to_vec();
        Ok(())
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[Place] {
        &self.items
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when no cards are shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Handle a tap on the card at `index`.
    ///
    /// Centres the card and publishes one [`SelectAnnotation`] for its place.
    /// Returns `false` when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        let Some((key, place)) = self.keys.get(index).zip(self.items.get(index)) else {
            log::debug!("ignoring selection of card {index} of {}", self.items.len());
            return false;
        };
        let request = SelectAnnotation::new(key.clone(), place.name.clone());
        if self.selections.send(request).is_err() {
            log::debug!("selection listener is gone");
        }
        self.surface.scroll_to(index, true);
        true
    }

    /// Centre the first card, if any.
    pub fn scroll_to_first(&mut self) {
        if !self.items.is_empty() {
            self.surface.scroll_to(0, true);
        }
    }

    /// Move the carousel's bottom edge.
    pub fn set_bottom_offset(&mut self, offset: f64, animation: LayoutAnimation) {
        self.surface.set_bottom_offset(offset, animation);
    }

    /// Paging geometry.
    #[must_use]
    pub const fn layout(&self) -> &PagingLayout {
        &self.layout
    }

    /// The rendering surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }
}
