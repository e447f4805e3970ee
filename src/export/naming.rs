//! Deterministic, filesystem-safe output names.

use chrono::{DateTime, Utc};

use crate::export::platform::Platform;
use crate::show::mapper::FlyerContent;

/// Replace every character outside `[A-Za-z0-9]` with `-`, one for one.
pub fn sanitize_component(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// `flyer-<venue>-<date>-<platform>-<epoch-ms>.png`, from the display content.
pub fn single_file_name(content: &FlyerContent, platform: Platform, now: DateTime<Utc>) -> String {
    format!(
        "flyer-{}-{}-{}-{}.png",
        sanitize_component(&content.venue_name),
        sanitize_component(&content.date),
        platform,
        now.timestamp_millis()
    )
}

/// `flyer-<venue>-<date>-<platform>.png`, from the raw show fields.
pub fn batch_entry_name(venue_name: &str, date: &str, platform: Platform) -> String {
    let venue = if venue_name.is_empty() { "venue" } else { venue_name };
    let date = if date.is_empty() { "date" } else { date };
    format!(
        "flyer-{}-{}-{}.png",
        sanitize_component(venue),
        sanitize_component(date),
        platform
    )
}

/// `<platform>-flyers-<yyyy-mm-dd>.zip`, UTC date.
pub fn archive_file_name(platform: Platform, now: DateTime<Utc>) -> String {
    format!("{platform}-flyers-{}.zip", now.format("%Y-%m-%d"))
}

#[cfg(test)]
#[path = "../../tests/unit/export/naming.rs"]
mod tests;
