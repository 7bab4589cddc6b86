//! Quiet-window debouncing for text input.

use std::time::Duration;

use tokio::time::Instant;

/// Default quiet window before a query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Collapses bursts of values into the last one, released after a quiet
/// window.
///
/// Time is passed in explicitly, so the debouncer can be driven by a runtime
/// timer or stepped by hand. At most one value is pending at a time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tokio::time::Instant;
/// use cardmap_core::Debouncer;
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
/// debouncer.push("c", start);
/// debouncer.push("ca", start + Duration::from_millis(100));
/// assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
/// assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("ca"));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record `value` as the latest input at `now`, restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Instant at which the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Release the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[rstest]
    fn burst_collapses_to_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        for (offset, text) in [(0, "p"), (90, "pi"), (180, "piz"), (270, "pizz")] {
            debouncer.push(text, start + ms(offset));
            assert_eq!(debouncer.poll(start + ms(offset)), None);
        }
        assert_eq!(debouncer.poll(start + ms(569)), None);
        assert_eq!(debouncer.poll(start + ms(570)), Some("pizz"));
        assert_eq!(debouncer.poll(start + ms(900)), None);
    }

    #[rstest]
    fn separated_inputs_fire_separately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("a", start);
        assert_eq!(debouncer.poll(start + ms(300)), Some("a"));
        debouncer.push("b", start + ms(400));
        assert_eq!(debouncer.deadline(), Some(start + ms(700)));
        assert_eq!(debouncer.poll(start + ms(700)), Some("b"));
    }
}
