//! Human-readable "last visited" text for link listings.

use chrono::{DateTime, Datelike, Utc};

/// Formats how long ago a link was last visited.
///
/// - under a minute: `just now`
/// - under an hour: `5 minutes ago`
/// - under a day: `1 hour ago`
/// - under a week: `3 days ago`
/// - older: `Jan 5`, with the year appended when it differs from `now`'s
///
/// Returns `None` if the link was never visited. Timestamps in the future
/// count as `just now`.
pub fn format_last_visited(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let last = last?;
    let seconds = (now - last).num_seconds();

    let text = match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 604_800 => plural(s / 86_400, "day"),
        _ if last.year() != now.year() => last.format("%b %-d, %Y").to_string(),
        _ => last.format("%b %-d").to_string(),
    };

    Some(text)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
