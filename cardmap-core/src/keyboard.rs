//! On-screen keyboard notifications.
//!
//! The carousel sits above the keyboard. Screens subscribe to
//! [`KeyboardNotifications`] explicitly and hold the returned
//! [`KeyboardSubscription`] for as long as they are alive; dropping it
//! unsubscribes.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};

/// Capacity of the notification buffer per subscriber.
const NOTIFICATION_BUFFER: usize = 16;

/// Keyboard visibility change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    /// The keyboard is about to appear with the given frame height in points.
    WillShow {
        /// Height of the keyboard's final frame.
        height: f64,
    },
    /// The keyboard is about to disappear.
    WillHide,
}

impl KeyboardEvent {
    /// Bottom offset the carousel takes for this event.
    #[must_use]
    pub fn bottom_offset(self) -> f64 {
        match self {
            Self::WillShow { height } => -height,
            Self::WillHide => 0.0,
        }
    }
}

/// Animation parameters for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAnimation {
    /// Animation length; zero applies the layout immediately.
    pub duration: Duration,
}

impl LayoutAnimation {
    /// Layout change applied without animating.
    pub const IMMEDIATE: Self = Self {
        duration: Duration::ZERO,
    };
}

/// Publisher of keyboard events.
#[derive(Debug, Clone)]
pub struct KeyboardNotifications {
    sender: broadcast::Sender<KeyboardEvent>,
}

impl Default for KeyboardNotifications {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self { sender }
    }
}

impl KeyboardNotifications {
    /// Start receiving keyboard events.
    #[must_use]
    pub fn subscribe(&self) -> KeyboardSubscription {
        KeyboardSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Deliver `event` to every live subscription.
    ///
    /// Returns the number of subscriptions that received it.
    pub fn post(&self, event: KeyboardEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A screen's registration for keyboard events.
#[derive(Debug)]
pub struct KeyboardSubscription {
    receiver: broadcast::Receiver<KeyboardEvent>,
}

impl KeyboardSubscription {
    /// Wait for the next event.
    ///
    /// Returns `None` once the publisher is gone. Events dropped because the
    /// subscriber fell behind are skipped; only the most recent state matters.
    pub async fn next(&mut self) -> Option<KeyboardEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("skipped {skipped} stale keyboard events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
