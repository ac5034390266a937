//! Fixed rate-limit window for a single identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request count inside the current fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    /// When the current window opened
    pub window_start: DateTime<Utc>,

    /// Requests seen since `window_start`, including denied ones
    pub count: u32,
}

impl RateWindow {
    /// Opens a window holding the first request
    pub fn open(now: DateTime<Utc>) -> Self {
        Self {
            window_start: now,
            count: 1,
        }
    }

    /// Whether more than `window` has passed since the window opened
    pub fn is_stale(&self, window: Duration, now: DateTime<Utc>) -> bool {
        // A window that starts in the future (clock stepped back) is still current
        (now - self.window_start)
            .to_std()
            .map_or(false, |elapsed| elapsed > window)
    }

    /// Counts one request and returns the new count.
    ///
    /// A stale window is replaced wholesale; otherwise the count keeps
    /// growing, also past the limit, so a blocked caller stays blocked.
    pub fn register(&mut self, window: Duration, now: DateTime<Utc>) -> u32 {
        if self.is_stale(window, now) {
            *self = Self::open(now);
        } else {
            self.count = self.count.saturating_add(1);
        }
        self.count
    }
}
