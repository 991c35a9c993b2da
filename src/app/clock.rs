// ABOUTME: Header clock showing the current date and time, refreshed once a minute

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::time::{Duration, Instant};
use tracing::warn;

pub const CLOCK_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Clock {
    offset: FixedOffset,
    text: String,
    last_refresh: Option<Instant>,
}

impl Clock {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            text: String::new(),
            last_refresh: None,
        }
    }

    /// Falls back to UTC when the offset is outside +/- 24h.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!("Invalid clock offset of {} minutes, using UTC", minutes);
                Utc.fix()
            });
        Self::new(offset)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-renders the clock on first call and whenever a full refresh interval
    /// has elapsed. Returns whether the text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self
            .last_refresh
            .map_or(true, |last| now.saturating_duration_since(last) >= CLOCK_REFRESH);
        if !due {
            return false;
        }

        self.text = format_clock(Utc::now(), self.offset);
        self.last_refresh = Some(now);
        true
    }
}

/// "Monday, October 19, 2026 at 02:05 PM"
pub fn format_clock(now: DateTime<Utc>, offset: FixedOffset) -> String {
    now.with_timezone(&offset)
        .format("%A, %B %-d, %Y at %I:%M %p")
        .to_string()
}
