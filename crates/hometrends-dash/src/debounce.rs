//! Deadline-based debouncing for rapidly changing filter inputs.

use tokio::time::{Duration, Instant};

/// Holds the most recent pushed value and emits it only once it has sat
/// unchanged for the settle delay.
///
/// A new [`push`](Debouncer::push) supersedes the pending value and resets
/// the deadline, so a burst of changes yields exactly one emission carrying
/// the last value. Dropping the debouncer drops any pending emission.
#[derive(Debug)]
pub struct Debouncer<T> {
    settle: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
        }
    }

    /// Replace the pending value and restart the settle timer.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.settle));
    }

    /// The instant at which the pending value settles, if one is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Emit the pending value if its deadline has passed at `now`.
    pub fn take_settled(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}
