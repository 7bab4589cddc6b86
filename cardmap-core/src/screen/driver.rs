//! Single-task event loop for a [`Screen`].

use std::rc::Rc;

use futures_util::StreamExt;
use futures_util::future::LocalBoxFuture;
use futures_util::stream::FuturesUnordered;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, sleep_until};

use super::{PendingSearch, Screen, ScreenError};
use crate::annotation::MapSurface;
use crate::carousel::CarouselSurface;
use crate::keyboard::{KeyboardEvent, KeyboardSubscription};
use crate::search::{PlaceSearch, RequestToken, SearchError};
use crate::Place;

type Completion = (RequestToken, Result<Vec<Place>, SearchError>);

/// Input from the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The search field now reads the given text.
    TextChanged(String),
    /// The card at the given index was tapped.
    CardSelected(usize),
    /// The screen is being dismissed.
    Close,
}

enum Step {
    Ui(Option<UiEvent>),
    DebounceElapsed,
    Completed(Completion),
    Keyboard(Option<KeyboardEvent>),
}

/// Runs a [`Screen`] against a search service.
///
/// Every mutation of the screen happens inside [`ScreenDriver::run`], so the
/// screen needs no locking. Searches are not cancelled when superseded; their
/// late completions are discarded by the screen.
pub struct ScreenDriver<M, C, S> {
    screen: Screen<M, C>,
    search: Rc<S>,
    events: UnboundedReceiver<UiEvent>,
    keyboard: Option<KeyboardSubscription>,
}

impl<M, C, S> ScreenDriver<M, C, S>
where
    M: MapSurface,
    C: CarouselSurface,
    S: PlaceSearch + 'static,
{
    /// Create a driver and the sender the view layer reports events on.
    #[must_use]
    pub fn new(screen: Screen<M, C>, search: S) -> (Self, UnboundedSender<UiEvent>) {
        let (sender, events) = mpsc::unbounded_channel();
        let driver = Self {
            screen,
            search: Rc::new(search),
            events,
            keyboard: None,
        };
        (driver, sender)
    }

    /// Follow keyboard notifications for the lifetime of the driver.
    #[must_use]
    pub fn with_keyboard(mut self, subscription: KeyboardSubscription) -> Self {
        self.keyboard = Some(subscription);
        self
    }

    /// Process events until the view layer closes the screen.
    ///
    /// Returns the screen for inspection. The keyboard subscription and any
    /// searches still in flight are dropped.
    ///
    /// # Errors
    ///
    /// Stops with the first fatal [`ScreenError`].
    pub async fn run(self) -> Result<Screen<M, C>, ScreenError> {
        let Self {
            mut screen,
            search,
            mut events,
            mut keyboard,
        } = self;
        let mut in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>> =
            FuturesUnordered::new();

        if let Some(pending) = screen.load() {
            in_flight.push(dispatch(&search, pending));
        }

        loop {
            let deadline = screen.debounce_deadline();
            // Notifications already delivered are handled before newer UI
            // events, so a `Close` never overtakes them.
            let step = tokio::select! {
                biased;
                event = next_keyboard(keyboard.as_mut()), if keyboard.is_some() => {
                    Step::Keyboard(event)
                }
                Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                    Step::Completed(completion)
                }
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Step::DebounceElapsed
                }
                event = events.recv() => Step::Ui(event),
            };

            match step {
                Step::Ui(Some(UiEvent::TextChanged(text))) => {
                    screen.text_changed(text, Instant::now());
                }
                Step::Ui(Some(UiEvent::CardSelected(index))) => {
                    screen.card_selected(index);
                }
                Step::Ui(Some(UiEvent::Close) | None) => break,
                Step::DebounceElapsed => {
                    if let Some(pending) = screen.poll_debounce(Instant::now()) {
                        in_flight.push(dispatch(&search, pending));
                    }
                }
                Step::Completed((token, result)) => {
                    screen.complete_search(token, result)?;
                }
                Step::Keyboard(Some(event)) => screen.keyboard(event),
                Step::Keyboard(None) => {
                    log::debug!("keyboard notifications ended");
                    keyboard = None;
                }
            }
        }

        if !in_flight.is_empty() {
            log::debug!("dropping {} unfinished searches", in_flight.len());
        }
        Ok(screen)
    }
}

fn dispatch<S: PlaceSearch + 'static>(
    search: &Rc<S>,
    pending: PendingSearch,
) -> LocalBoxFuture<'static, Completion> {
    let service = Rc::clone(search);
    Box::pin(async move {
        let result = service.search(&pending.request).await;
        (pending.token, result)
    })
}

async fn next_keyboard(subscription: Option<&mut KeyboardSubscription>) -> Option<KeyboardEvent> {
    match subscription {
        Some(subscription) => subscription.next().await,
        None => std::future::pending().await,
    }
}
