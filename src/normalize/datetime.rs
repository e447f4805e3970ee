//! Best-effort cleanup of free-text show dates and times.
//!
//! Show dates come from spreadsheet imports in whatever shape the author typed, so
//! nothing in here rejects input: unrecognized text passes through untouched and
//! empty text becomes the `"TBD"` placeholder.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Placeholder shown when a date or time is missing.
pub const TBD: &str = "TBD";

/// English month names, indexed by `month0`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Remove the ordinal suffix from the first `<digits>st|nd|rd|th` run.
///
/// `"June 3rd"` becomes `"June 3"`; empty input becomes `"TBD"`. Only the first
/// suffixed number is touched, and suffix matching is case-sensitive.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return TBD.to_owned();
    }

    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let run_end = digit_run_end(bytes, i);
        let rest = &raw[run_end..];
        if let Some(suffix) = ORDINAL_SUFFIXES.iter().find(|s| rest.starts_with(**s)) {
            let mut out = String::with_capacity(raw.len());
            out.push_str(&raw[..run_end]);
            out.push_str(&rest[suffix.len()..]);
            return out;
        }
        i = run_end;
    }

    raw.to_owned()
}

/// Canonicalize the first clock time followed by a meridiem.
///
/// `"7:30 PM"`, `"7:30p.m."` and `"730pm"` all become `"7:30pm"`; the rest of the
/// string is preserved. The meridiem must end the word (`"7:30 Amphitheater"` is left
/// alone). Text without a recognizable time passes through unchanged
/// and empty input becomes `"TBD"`.
pub fn format_time(raw: &str) -> String {
    if raw.is_empty() {
        return TBD.to_owned();
    }

    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let at_run_start = bytes[i].is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if !at_run_start {
            i += 1;
            continue;
        }
        if let Some((end, canonical)) = match_clock_time(raw, i) {
            let mut out = String::with_capacity(raw.len());
            out.push_str(&raw[..i]);
            out.push_str(&canonical);
            out.push_str(&raw[end..]);
            return out;
        }
        i = digit_run_end(bytes, i);
    }

    raw.to_owned()
}

/// Resolve the calendar month a free-text date refers to.
///
/// First tries a set of common structured date formats, then a yearless `M/D`
/// (`"Fri 8/20"`); failing that, scans for the leftmost month name or three-letter
/// abbreviation anywhere in the text (case-insensitive). Returns `None` when nothing
/// finds a month.
pub fn month_from_date(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(month0) = parse_structured_month0(trimmed) {
        return Some(MONTH_NAMES[month0]);
    }
    if let Some(month0) = parse_month_day_month0(trimmed) {
        return Some(MONTH_NAMES[month0]);
    }

    scan_month_name(trimmed)
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn match_clock_time(raw: &str, start: usize) -> Option<(usize, String)> {
    let bytes = raw.as_bytes();
    let run_end = digit_run_end(bytes, start);
    let run = &raw[start..run_end];

    let (hour, minute, mut pos) = if bytes.get(run_end) == Some(&b':') {
        let min_start = run_end + 1;
        let min_end = digit_run_end(bytes, min_start);
        if run.len() > 2 || min_end - min_start != 2 {
            return None;
        }
        (run, &raw[min_start..min_end], min_end)
    } else if run.len() == 3 || run.len() == 4 {
        let (h, m) = run.split_at(run.len() - 2);
        let h_val: u32 = h.parse().ok()?;
        let m_val: u32 = m.parse().ok()?;
        if !(1..=12).contains(&h_val) || m_val >= 60 {
            return None;
        }
        (h, m, run_end)
    } else {
        return None;
    };

    while bytes.get(pos) == Some(&b' ') {
        pos += 1;
    }

    let (meridiem, len) = match_meridiem(&bytes[pos..])?;
    let end = pos + len;
    if bytes.get(end).is_some_and(u8::is_ascii_alphanumeric) {
        return None;
    }
    Some((end, format!("{hour}:{minute}{meridiem}")))
}

fn match_meridiem(bytes: &[u8]) -> Option<(&'static str, usize)> {
    let first = bytes.first()?.to_ascii_lowercase();
    let meridiem = match first {
        b'a' => "am",
        b'p' => "pm",
        _ => return None,
    };

    let lower: Vec<u8> = bytes.iter().take(4).map(u8::to_ascii_lowercase).collect();
    if lower.len() >= 4 && lower[1] == b'.' && lower[2] == b'm' && lower[3] == b'.' {
        return Some((meridiem, 4));
    }
    if lower.len() >= 2 && lower[1] == b'm' {
        return Some((meridiem, 2));
    }
    None
}

fn parse_structured_month0(s: &str) -> Option<usize> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.month0() as usize);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.month0() as usize);
    }

    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.month0() as usize);
        }
    }

    const DATE_FORMATS: [&str; 14] = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m/%d/%y",
        "%m-%d-%Y",
        "%B %d, %Y",
        "%B %d %Y",
        "%b %d, %Y",
        "%b %d %Y",
        "%A, %B %d, %Y",
        "%a, %b %d, %Y",
        "%a %b %d %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.month0() as usize)
}

/// Yearless `M/D`, optionally after a weekday (`"Fri 8/20"`).
fn parse_month_day_month0(s: &str) -> Option<usize> {
    let last = s.split_whitespace().last()?.trim_end_matches([',', '.']);
    // Leap year, so 2/29 resolves.
    NaiveDate::parse_from_str(&format!("{last}/2000"), "%m/%d/%Y")
        .ok()
        .map(|d| d.month0() as usize)
}

fn scan_month_name(s: &str) -> Option<&'static str> {
    s.as_bytes().windows(3).find_map(|w| {
        MONTH_NAMES
            .iter()
            .find(|name| name.as_bytes()[..3].eq_ignore_ascii_case(w))
            .copied()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/datetime.rs"]
mod tests;
