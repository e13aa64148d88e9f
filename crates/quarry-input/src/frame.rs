//! Per-frame input snapshot and the edit requests it produces.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::trace;

use crate::debounce::ClickDebouncer;

/// Everything the input collaborator reports for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer movement since the last frame, in pixels.
    pub look_delta: Vec2,
    /// Names of keys held this frame.
    pub pressed_keys: BTreeSet<String>,
    /// Primary button (remove) is down.
    pub primary: bool,
    /// Secondary button (add) is down.
    pub secondary: bool,
}

impl FrameInput {
    /// Input with only the edit buttons set.
    #[must_use]
    pub fn clicks(primary: bool, secondary: bool) -> Self {
        Self {
            primary,
            secondary,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }
}

/// Edit actions allowed through this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditRequests {
    pub remove: bool,
    pub add: bool,
}

impl EditRequests {
    #[must_use]
    pub fn any(self) -> bool {
        self.remove || self.add
    }
}

/// Debounces the two edit buttons independently.
#[derive(Debug, Clone, Default)]
pub struct ClickGate {
    primary: ClickDebouncer,
    secondary: ClickDebouncer,
}

impl ClickGate {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            primary: ClickDebouncer::new(interval),
            secondary: ClickDebouncer::new(interval),
        }
    }

    /// Filters this frame's button state through both debouncers.
    pub fn filter(&mut self, input: &FrameInput, now: Instant) -> EditRequests {
        let requests = EditRequests {
            remove: self.primary.poll(input.primary, now),
            add: self.secondary.poll(input.secondary, now),
        };
        if (input.primary && !requests.remove) || (input.secondary && !requests.add) {
            trace!("Click held back by debounce");
        }
        requests
    }
}
