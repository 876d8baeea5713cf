#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads emergency call records from CSV into an immutable
//! [`CallDataset`].
//!
//! Loading is all-or-nothing: a missing file, a missing required column or
//! an unparseable timestamp fails the whole load. Missing townships and ZIP
//! codes are filled with defaults, calendar fields and the call reason are
//! derived, and exact duplicate rows are dropped.

pub mod parsing;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use calls_dashboard_calls_models::{CallDataset, CallRecord, UNKNOWN_TOWNSHIP};
use serde::Deserialize;
use thiserror::Error;

use crate::parsing::{most_frequent, non_blank, parse_coordinate, parse_timestamp};

/// Columns that must be present in the CSV header.
pub const REQUIRED_COLUMNS: &[&str] = &["timeStamp", "lat", "lng", "twp", "zip", "title"];

/// Errors that abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A `timeStamp` value could not be parsed.
    #[error("Invalid timestamp {value:?} on row {row}")]
    InvalidTimestamp {
        /// 1-based data row number (header excluded).
        row: usize,
        /// The offending value.
        value: String,
    },

    /// Some rows lack a ZIP but no row has one to default from.
    #[error("No ZIP values present to fill missing ZIP codes")]
    NoZipValues,
}

/// A row as it appears in the source CSV.
#[derive(Debug, Deserialize)]
pub struct RawCallRow {
    #[serde(rename = "lat", default)]
    pub lat: Option<String>,
    #[serde(rename = "lng", default)]
    pub lng: Option<String>,
    #[serde(rename = "desc", default)]
    pub desc: Option<String>,
    #[serde(rename = "zip", default)]
    pub zip: Option<String>,
    #[serde(rename = "title", default)]
    pub title: Option<String>,
    #[serde(rename = "timeStamp", default)]
    pub time_stamp: Option<String>,
    #[serde(rename = "twp", default)]
    pub twp: Option<String>,
    #[serde(rename = "addr", default)]
    pub addr: Option<String>,
    #[serde(rename = "e", default)]
    pub e: Option<String>,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read from the source.
    pub total_rows: usize,
    /// Rows dropped as exact duplicates.
    pub duplicate_rows: usize,
    /// Rows whose ZIP was filled with [`Self::zip_default`].
    pub filled_zip: usize,
    /// Rows whose township was filled with the placeholder.
    pub filled_twp: usize,
    /// Most frequent ZIP in the source, if any row had one.
    pub zip_default: Option<String>,
}

/// The result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedCalls {
    pub dataset: CallDataset,
    pub report: LoadReport,
}

/// A row after timestamp and coordinate parsing, before defaults.
struct ParsedRow {
    timestamp: chrono::NaiveDateTime,
    latitude: Option<f64>,
    longitude: Option<f64>,
    township: Option<String>,
    zip: Option<String>,
    title: String,
    description: Option<String>,
    address: Option<String>,
    e: Option<String>,
}

/// Identity of a record for duplicate detection. Coordinates compare by
/// bit pattern.
#[derive(PartialEq, Eq, Hash)]
struct RowKey<'a> {
    timestamp: chrono::NaiveDateTime,
    latitude: Option<u64>,
    longitude: Option<u64>,
    township: &'a str,
    zip: &'a str,
    title: &'a str,
    description: Option<&'a str>,
    address: Option<&'a str>,
    e: Option<&'a str>,
}

impl<'a> From<&'a CallRecord> for RowKey<'a> {
    fn from(r: &'a CallRecord) -> Self {
        Self {
            timestamp: r.timestamp,
            latitude: r.latitude.map(f64::to_bits),
            longitude: r.longitude.map(f64::to_bits),
            township: &r.township,
            zip: &r.zip,
            title: &r.title,
            description: r.description.as_deref(),
            address: r.address.as_deref(),
            e: r.e.as_deref(),
        }
    }
}

/// Loads call records from the CSV file at `path`.
///
/// # Errors
///
/// * [`LoadError::Io`] if the file cannot be opened
/// * any error from [`load_calls_from_reader`]
pub fn load_calls(path: impl AsRef<Path>) -> Result<LoadedCalls, LoadError> {
    let path = path.as_ref();
    log::info!("Loading call records from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_calls_from_reader(file)
}

/// Loads call records from any CSV byte source.
///
/// # Errors
///
/// * [`LoadError::MissingColumn`] if a [`REQUIRED_COLUMNS`] entry is absent
/// * [`LoadError::Csv`] if the CSV is malformed
/// * [`LoadError::InvalidTimestamp`] if any `timeStamp` cannot be parsed
/// * [`LoadError::NoZipValues`] if ZIPs are missing with nothing to fill from
pub fn load_calls_from_reader<R: Read>(reader: R) -> Result<LoadedCalls, LoadError> {
    // Header names are trimmed so the column check and row decoding agree
    // on them. Field values are kept verbatim.
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn((*column).to_string()));
        }
    }

    let mut parsed = Vec::new();
    for (idx, result) in rdr.deserialize::<RawCallRow>().enumerate() {
        let row = result?;
        let raw_ts = row.time_stamp.unwrap_or_default();
        let timestamp = parse_timestamp(&raw_ts).ok_or_else(|| LoadError::InvalidTimestamp {
            row: idx + 1,
            value: raw_ts.clone(),
        })?;

        parsed.push(ParsedRow {
            timestamp,
            latitude: parse_coordinate(row.lat.as_deref()),
            longitude: parse_coordinate(row.lng.as_deref()),
            township: non_blank(row.twp),
            zip: non_blank(row.zip),
            title: row.title.unwrap_or_default(),
            description: row.desc,
            address: row.addr,
            e: row.e,
        });
    }

    let total_rows = parsed.len();
    let zip_default = most_frequent(parsed.iter().filter_map(|r| r.zip.as_deref()));

    let mut filled_zip = 0usize;
    let mut filled_twp = 0usize;
    let mut records = Vec::with_capacity(parsed.len());

    for row in parsed {
        let zip = match row.zip {
            Some(zip) => zip,
            None => {
                filled_zip += 1;
                zip_default.clone().ok_or(LoadError::NoZipValues)?
            }
        };
        let township = row.township.unwrap_or_else(|| {
            filled_twp += 1;
            UNKNOWN_TOWNSHIP.to_string()
        });

        records.push(CallRecord::new(
            row.timestamp,
            row.latitude,
            row.longitude,
            township,
            zip,
            row.title,
            row.description,
            row.address,
            row.e,
        ));
    }

    if filled_zip > 0 {
        log::warn!(
            "Filled {filled_zip} missing ZIP codes with {}",
            zip_default.as_deref().unwrap_or_default()
        );
    }
    if filled_twp > 0 {
        log::warn!("Filled {filled_twp} missing townships with {UNKNOWN_TOWNSHIP:?}");
    }

    let records = dedup_records(records);
    let duplicate_rows = total_rows - records.len();

    log::info!(
        "Loaded {} call records ({total_rows} rows read, {duplicate_rows} duplicates dropped)",
        records.len()
    );

    Ok(LoadedCalls {
        dataset: CallDataset::new(records),
        report: LoadReport {
            total_rows,
            duplicate_rows,
            filled_zip,
            filled_twp,
            zip_default,
        },
    })
}

/// Drops exact duplicates, keeping the first occurrence of each.
fn dedup_records(records: Vec<CallRecord>) -> Vec<CallRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(records.len());
        records.iter().map(|r| seen.insert(RowKey::from(r))).collect()
    };

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
