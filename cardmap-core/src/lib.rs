//! Core of the card map: a local search screen whose map annotations and
//! card carousel always show the same places in the same order.
//!
//! The crate is free of any UI toolkit. The map and the carousel are
//! reached through the [`MapSurface`] and [`CarouselSurface`] traits, the
//! search service through [`PlaceSearch`]. [`Screen`] holds the state and
//! [`ScreenDriver`] runs it on a single task.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod annotation;
pub mod card;
pub mod carousel;
pub mod debounce;
pub mod diff;
pub mod keyboard;
mod place;
mod result_set;
pub mod screen;
pub mod search;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use annotation::{Annotation, MapSurface};
pub use card::{CardCell, CellQueue, DequeueError, SelfConfiguringCell};
pub use carousel::{
    CardDeck, CarouselController, CarouselError, CarouselSurface, PagingLayout, SelectAnnotation,
};
pub use debounce::Debouncer;
pub use keyboard::{KeyboardEvent, KeyboardNotifications, KeyboardSubscription, LayoutAnimation};
pub use place::{AddressComponents, Place};
pub use result_set::{PlaceKey, ResultSet};
pub use screen::{
    PendingSearch, Screen, ScreenConfig, ScreenDriver, ScreenError, SearchOutcome, UiEvent,
};
pub use search::{PlaceSearch, RequestToken, SearchError, SearchRequest};
