use serde::{Deserialize, Serialize};

use crate::normalize::address::parse_venue_address;
use crate::normalize::datetime::{format_date, format_time};
use crate::show::record::{CanonicalShow, LegacyShow, ShowRecord};

/// Venue name shown when the record has none.
pub const DEFAULT_VENUE_NAME: &str = "Venue TBD";
/// Event type shown when the record has none (always, for legacy rows).
pub const DEFAULT_EVENT_TYPE: &str = "Live Acoustic Music";

/// Display text for one flyer, derived fresh from a show record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerContent {
    /// Display date (ordinal suffix removed, or `"TBD"`).
    pub date: String,
    /// Venue name (or `"Venue TBD"`).
    pub venue_name: String,
    /// Street line; may be empty.
    pub venue_address: String,
    /// City/state line; may be empty.
    pub city_state: String,
    /// Display time (or `"TBD"`).
    pub show_time: String,
    /// Event type line.
    pub event_type: String,
}

impl FlyerContent {
    /// Map either record shape. Total: never fails, every field has a fallback.
    pub fn from_record(record: &ShowRecord) -> Self {
        match record {
            ShowRecord::Canonical(show) => Self::from_canonical(show),
            ShowRecord::Legacy(show) => Self::from_legacy(show),
        }
    }

    /// Map a canonical show. The address-derived city/state wins over `city_state`.
    pub fn from_canonical(show: &CanonicalShow) -> Self {
        let parsed = parse_venue_address(show.venue_address.as_deref().unwrap_or(""));
        let city_state = if parsed.city_state.is_empty() {
            show.city_state.clone().unwrap_or_default()
        } else {
            parsed.city_state
        };

        Self {
            date: format_date(&show.date),
            venue_name: non_empty_or(&show.venue_name, DEFAULT_VENUE_NAME),
            venue_address: parsed.address,
            city_state,
            show_time: format_time(show.show_time.as_deref().unwrap_or("")),
            event_type: non_empty_or(
                show.event_type.as_deref().unwrap_or(""),
                DEFAULT_EVENT_TYPE,
            ),
        }
    }

    /// Map a spreadsheet row. Legacy rows carry no event type.
    pub fn from_legacy(show: &LegacyShow) -> Self {
        let parsed = parse_venue_address(show.venue_address());
        Self {
            date: format_date(show.date()),
            venue_name: non_empty_or(show.venue_name(), DEFAULT_VENUE_NAME),
            venue_address: parsed.address,
            city_state: parsed.city_state,
            show_time: format_time(show.show_time()),
            event_type: DEFAULT_EVENT_TYPE.to_owned(),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/mapper.rs"]
mod tests;
