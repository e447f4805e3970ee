use serde::{Deserialize, Serialize};

/// A venue address split into its street line and the trailing city/state part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueAddress {
    /// Street line (text before the first comma).
    pub address: String,
    /// Everything after the first comma, trimmed; empty when there was no comma.
    pub city_state: String,
}

/// Split a free-text venue address into street and city/state.
///
/// One leading and one trailing quote character (`"` or `'`) are removed first, which
/// undoes the quoting spreadsheet exports put around comma-bearing cells. The split
/// happens on the first comma only; later commas stay inside `city_state`.
///
/// Total: every input yields a value, and both fields are always present.
pub fn parse_venue_address(raw: &str) -> VenueAddress {
    if raw.is_empty() {
        return VenueAddress::default();
    }

    let cleaned = strip_outer_quotes(raw);
    match cleaned.split_once(',') {
        Some((street, rest)) => VenueAddress {
            address: street.trim().to_owned(),
            city_state: rest.trim().to_owned(),
        },
        None => VenueAddress {
            address: cleaned.to_owned(),
            city_state: String::new(),
        },
    }
}

fn strip_outer_quotes(s: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let s = s.strip_prefix(is_quote).unwrap_or(s);
    s.strip_suffix(is_quote).unwrap_or(s)
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/address.rs"]
mod tests;
