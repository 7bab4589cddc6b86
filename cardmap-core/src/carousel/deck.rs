//! Cards currently laid out by a carousel surface.

use super::CarouselError;
use crate::Place;
use crate::card::{CardCell, CellQueue, SelfConfiguringCell};
use crate::diff::Changeset;

/// Ordered cards kept in step with the carousel's items.
///
/// Removed cards go back to the queue; inserted items take a card from it,
/// so surfaces need only render [`CardDeck::cards`].
#[derive(Debug)]
pub struct CardDeck<C = CardCell> {
    queue: CellQueue<C>,
    cards: Vec<C>,
}

impl<C: SelfConfiguringCell + Clone> CardDeck<C> {
    /// Deck whose queue has the card type registered.
    #[must_use]
    pub fn registered() -> Self {
        let mut deck = Self::unregistered();
        deck.queue.register();
        deck
    }

    /// Deck whose queue never had the card type registered.
    #[must_use]
    pub fn unregistered() -> Self {
        Self {
            queue: CellQueue::default(),
            cards: Vec::new(),
        }
    }

    /// Apply `changes` so the deck holds one card per entry of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Dequeue`] when no card can be produced for an
    /// inserted item. Registration is per card type, so the first dequeue
    /// fails before any card is taken and the deck is left as it was.
    pub fn apply(&mut self, changes: &Changeset, items: &[Place]) -> Result<(), CarouselError> {
        let mut incoming: Vec<C> = items.iter().map(|_| C::blank()).collect();
        for &index in &changes.inserted {
            let (Some(place), Some(slot)) = (items.get(index), incoming.get_mut(index)) else {
                continue;
            };
            *slot = self
                .queue
                .dequeue(place)
                .map_err(|source| CarouselError::Dequeue { index, source })?;
        }
        for &index in &changes.removed {
            if let Some(cell) = self.cards.get(index) {
                self.queue.recycle(cell.clone());
            }
        }

        self.cards = match changes.apply(&self.cards, &incoming) {
            Some(cards) => cards,
            None => {
                log::warn!("changeset does not fit the deck; rebuilding every card");
                Self::rebuild(items)
            }
        };
        // Kept and moved cards may show a place whose address changed.
        for (card, place) in self.cards.iter_mut().zip(items) {
            card.configure(place);
        }
        Ok(())
    }

    fn rebuild(items: &[Place]) -> Vec<C> {
        items.iter().map(|_| C::blank()).collect()
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[C] {
        &self.cards
    }

    /// Cards waiting in the queue for reuse.
    #[must_use]
    pub fn recycled_len(&self) -> usize {
        self.queue.recycled_len()
    }
}

impl<C: SelfConfiguringCell + Clone> Default for CardDeck<C> {
    fn default() -> Self {
        Self::registered()
    }
}
