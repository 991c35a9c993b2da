// ABOUTME: Humanized relative timestamps for notification rows ("5 minutes ago")

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats the distance between `now` and `timestamp`.
///
/// Anything under a minute (including timestamps in the future) reads
/// "Just now"; otherwise the largest whole unit among minutes, hours and days
/// is used.
pub fn format_time_ago(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();

    if seconds < MINUTE {
        "Just now".to_string()
    } else if seconds < HOUR {
        with_unit(seconds / MINUTE, "minute")
    } else if seconds < DAY {
        with_unit(seconds / HOUR, "hour")
    } else {
        with_unit(seconds / DAY, "day")
    }
}

fn with_unit(count: i64, unit: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{suffix} ago")
}
