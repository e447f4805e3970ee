use std::io::Read;

use anyhow::Context as _;

use crate::foundation::error::{FlyerError, FlyerResult};
use crate::show::record::{CanonicalShow, LegacyShow, ShowRecord};

/// Parse a REST payload: a JSON array of canonical show objects.
pub fn load_api_shows<R: Read>(reader: R) -> FlyerResult<Vec<ShowRecord>> {
    let shows: Vec<CanonicalShow> = serde_json::from_reader(reader)
        .map_err(|e| FlyerError::serde(format!("parse show list JSON: {e}")))?;
    Ok(shows.into_iter().map(ShowRecord::Canonical).collect())
}

/// Parse a spreadsheet export with a header row into legacy show rows.
///
/// Headers and cells are trimmed, rows that are entirely blank are dropped, and short
/// rows are accepted with their missing cells left out of the map.
pub fn load_csv_shows<R: Read>(reader: R) -> FlyerResult<Vec<ShowRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("read csv header row")?.clone();

    let mut out = Vec::new();
    for (row_idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("read csv row {}", row_idx + 1))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row = LegacyShow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty()),
        );
        out.push(ShowRecord::Legacy(row));
    }

    tracing::debug!(rows = out.len(), "loaded legacy shows from csv");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/show/ingest.rs"]
mod tests;
