//! Minimum-interval gate for held edit buttons.

use std::time::{Duration, Instant};

/// Default gap between repeated clicks while a button is held.
pub const DEFAULT_CLICK_INTERVAL: Duration = Duration::from_millis(100);

/// Lets a held button fire at most once per interval.
///
/// The first press fires immediately. While the button stays down it fires
/// again each time the interval has fully elapsed since the last firing.
#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Default for ClickDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_INTERVAL)
    }
}

impl ClickDebouncer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if a press at `now` should act.
    pub fn poll(&mut self, pressed: bool, now: Instant) -> bool {
        if let Some(last) = self.last_fired
            && now.saturating_duration_since(last) > self.interval
        {
            self.last_fired = None;
        }
        if !pressed || self.last_fired.is_some() {
            return false;
        }
        self.last_fired = Some(now);
        true
    }

    /// Returns `true` while the gate is closed at `now`.
    #[must_use]
    pub fn is_blocking(&self, now: Instant) -> bool {
        self.last_fired
            .is_some_and(|last| now.saturating_duration_since(last) <= self.interval)
    }
}
