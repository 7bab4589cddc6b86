//! Facade crate for the card map.
//!
//! Re-exports the screen, its surfaces and the search seam from
//! `cardmap-core`. Test doubles are available behind the `test-support`
//! feature.

#![forbid(unsafe_code)]

pub use cardmap_core::{
    AddressComponents, Annotation, CardCell, CardDeck, CarouselController, CarouselError,
    CarouselSurface, CellQueue, Debouncer, DequeueError, KeyboardEvent, KeyboardNotifications,
    KeyboardSubscription, LayoutAnimation, MapSurface, PagingLayout, PendingSearch, Place,
    PlaceKey, PlaceSearch, RequestToken, ResultSet, Screen, ScreenConfig, ScreenDriver,
    ScreenError, SearchError, SearchOutcome, SearchRequest, SelectAnnotation,
    SelfConfiguringCell, UiEvent,
};

pub use cardmap_core::diff;

#[cfg(feature = "test-support")]
pub use cardmap_core::test_support;
