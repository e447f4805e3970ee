use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Legacy spreadsheet column holding the show date.
pub const LEGACY_DATE: &str = "Date";
/// Legacy spreadsheet column holding the venue name.
pub const LEGACY_VENUE_NAME: &str = "Venue Name";
/// Legacy spreadsheet column holding the quoted venue address.
pub const LEGACY_VENUE_ADDRESS: &str = "Venue Address";
/// Legacy spreadsheet column holding the show time.
pub const LEGACY_SHOW_TIME: &str = "Show Time";

/// A show record as supplied by the surrounding application.
///
/// The shape is an explicit discriminant set by whoever ingested the record (REST
/// payloads are canonical, spreadsheet rows are legacy); it is never inferred from
/// which keys happen to be present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShowRecord {
    /// Relational/REST shape with snake_case fields.
    Canonical(CanonicalShow),
    /// Spreadsheet-import shape: a flat map keyed by column header.
    Legacy(LegacyShow),
}

impl ShowRecord {
    /// Raw (un-normalized) date text, used for batch dedup and month grouping.
    pub fn date(&self) -> &str {
        match self {
            Self::Canonical(s) => &s.date,
            Self::Legacy(s) => s.date(),
        }
    }

    /// Raw venue name, used for batch dedup and file naming.
    pub fn venue_name(&self) -> &str {
        match self {
            Self::Canonical(s) => &s.venue_name,
            Self::Legacy(s) => s.venue_name(),
        }
    }
}

impl From<CanonicalShow> for ShowRecord {
    fn from(show: CanonicalShow) -> Self {
        Self::Canonical(show)
    }
}

impl From<LegacyShow> for ShowRecord {
    fn from(show: LegacyShow) -> Self {
        Self::Legacy(show)
    }
}

/// Show as stored by the relational backend.
///
/// Unknown fields (ids, timestamps) are ignored; `null` reads as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalShow {
    /// Free-form display date.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Venue display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venue_name: String,
    /// Street address, possibly with a trailing `, City, ST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    /// City/state used when the address carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_state: Option<String>,
    /// Free-form show time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_time: Option<String>,
    /// Event type line ("Live Acoustic Music" when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

/// Show row from a spreadsheet import, keyed by trimmed column header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyShow {
    /// All columns of the row, including ones the flyer does not use.
    pub fields: BTreeMap<String, String>,
}

impl LegacyShow {
    /// Build a row from `(header, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of an arbitrary column; missing columns read as empty.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// `Date` column.
    pub fn date(&self) -> &str {
        self.get(LEGACY_DATE)
    }

    /// `Venue Name` column.
    pub fn venue_name(&self) -> &str {
        self.get(LEGACY_VENUE_NAME)
    }

    /// `Venue Address` column.
    pub fn venue_address(&self) -> &str {
        self.get(LEGACY_VENUE_ADDRESS)
    }

    /// `Show Time` column.
    pub fn show_time(&self) -> &str {
        self.get(LEGACY_SHOW_TIME)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/unit/show/record.rs"]
mod tests;
