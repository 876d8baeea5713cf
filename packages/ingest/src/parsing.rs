//! Field parsing helpers for raw call rows.
//!
//! Timestamp, coordinate and blank-field handling shared by the loader.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts accepted for the `timeStamp` column, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a call timestamp.
///
/// A bare `YYYY-MM-DD` date is accepted and taken as midnight.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parses a coordinate. Returns `None` if missing, unparseable or not
/// finite.
#[must_use]
pub fn parse_coordinate(s: Option<&str>) -> Option<f64> {
    let value = s?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Maps blank (empty or whitespace-only) values to `None`. Other values
/// are kept verbatim.
#[must_use]
pub fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Returns the most frequent value, breaking ties by the smallest value.
#[must_use]
pub fn most_frequent<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    // `max_by_key` keeps the last maximum, so walk the sorted map in
    // reverse to land on the smallest value among equals.
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value.to_string())
}
