#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Emergency call record types and calendar taxonomy.
//!
//! This crate defines the enriched [`CallRecord`] shared by the loader, the
//! chart builder and the web server, along with the fixed [`DayOfWeek`] and
//! [`Month`] orderings that every calendar aggregation is keyed by.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder township for records with no `twp` value.
pub const UNKNOWN_TOWNSHIP: &str = "Unknown";

/// Filter value that selects every record.
pub const ALL_REASONS: &str = "all";

/// Day of the week, in Monday-first order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Returns all variants in canonical (Monday-first) order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Zero-based position in the canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Calendar month, January first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Returns all variants in calendar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::January,
            Self::February,
            Self::March,
            Self::April,
            Self::May,
            Self::June,
            Self::July,
            Self::August,
            Self::September,
            Self::October,
            Self::November,
            Self::December,
        ]
    }

    /// Zero-based position in calendar order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The month `date` falls in.
    #[must_use]
    pub fn of(date: &impl Datelike) -> Self {
        // `month0` is always in 0..12.
        Self::all()[date.month0() as usize]
    }
}

/// Returns the category prefix of a call title.
///
/// The prefix is everything before the first `:`, trimmed. Titles without
/// a colon are returned whole (trimmed).
#[must_use]
pub fn extract_reason(title: &str) -> &str {
    title.split(':').next().unwrap_or(title).trim()
}

/// A single emergency call after cleaning and enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// When the call was received.
    pub timestamp: NaiveDateTime,
    /// Latitude, if the source row carried a usable one.
    pub latitude: Option<f64>,
    /// Longitude, if the source row carried a usable one.
    pub longitude: Option<f64>,
    /// Township (location category). Never empty.
    pub township: String,
    /// ZIP code. Never empty.
    pub zip: String,
    /// Free-text title, e.g. `"EMS: BACK PAINS/INJURY"`.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Source dummy column (always `1` in the public dataset).
    pub e: Option<String>,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Day of the week.
    pub day_of_week: DayOfWeek,
    /// Month of the year.
    pub month: Month,
    /// Category prefix of [`Self::title`].
    pub reason: String,
}

impl CallRecord {
    /// Builds a record and derives the calendar and reason fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        latitude: Option<f64>,
        longitude: Option<f64>,
        township: String,
        zip: String,
        title: String,
        description: Option<String>,
        address: Option<String>,
        e: Option<String>,
    ) -> Self {
        let reason = extract_reason(&title).to_string();
        let month = Month::of(&timestamp);

        Self {
            hour: timestamp.hour(),
            day_of_week: timestamp.weekday().into(),
            month,
            reason,
            timestamp,
            latitude,
            longitude,
            township,
            zip,
            title,
            description,
            address,
            e,
        }
    }

    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Category filter applied to the dataset before charting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReasonFilter {
    /// Every record.
    #[default]
    All,
    /// Only records whose reason equals this value exactly.
    Reason(String),
}

impl ReasonFilter {
    /// Parses a filter value. [`ALL_REASONS`] selects everything; any other
    /// string is an exact reason match.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_REASONS {
            Self::All
        } else {
            Self::Reason(value.to_string())
        }
    }

    /// Returns `true` if `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &CallRecord) -> bool {
        match self {
            Self::All => true,
            Self::Reason(reason) => record.reason == *reason,
        }
    }
}

/// The loaded, immutable set of call records.
#[derive(Debug, Clone, Default)]
pub struct CallDataset {
    records: Vec<CallRecord>,
}

impl CallDataset {
    #[must_use]
    pub const fn new(records: Vec<CallRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records passing `filter`, in load order.
    #[must_use]
    pub fn select(&self, filter: &ReasonFilter) -> Vec<&CallRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Distinct reasons, sorted.
    #[must_use]
    pub fn reasons(&self) -> Vec<&str> {
        let mut reasons: Vec<&str> = self.records.iter().map(|r| r.reason.as_str()).collect();
        reasons.sort_unstable();
        reasons.dedup();
        reasons
    }
}
