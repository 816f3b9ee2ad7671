use std::time::{Duration, Instant};

/// A cancellable repeating deadline.
///
/// The ticker never looks at a clock itself, callers pass `now`.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    /// returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.next.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Consumes the pending deadline if it has passed and schedules the next one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if now >= due => {
                self.arm(now);
                true
            }
            _ => false,
        }
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next.map(|due| due.saturating_duration_since(now))
    }
}
