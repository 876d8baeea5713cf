//! Count aggregations over a set of call records.
//!
//! Every function here is pure and deterministic: the same records in the
//! same order always produce identical output.

use std::collections::{BTreeMap, HashMap};

use calls_dashboard_calls_models::{CallRecord, DayOfWeek, Month};
use calls_dashboard_charts_models::LabelCount;

/// Hours in a day; the heatmap column count.
pub const HOURS_PER_DAY: usize = 24;

/// Counts records per distinct reason, most frequent first.
///
/// Equal counts are ordered by reason.
#[must_use]
pub fn count_by_reason(records: &[&CallRecord]) -> Vec<LabelCount> {
    ranked_counts(records.iter().map(|r| r.reason.as_str()))
}

/// Counts records per township and keeps the `limit` most frequent.
///
/// Equal counts are ordered by township name.
#[must_use]
pub fn top_townships(records: &[&CallRecord], limit: usize) -> Vec<LabelCount> {
    let mut counts = ranked_counts(records.iter().map(|r| r.township.as_str()));
    counts.truncate(limit);
    counts
}

/// Counts records per month. Always returns all 12 months in calendar
/// order, with zero for months that have no records.
#[must_use]
pub fn count_by_month(records: &[&CallRecord]) -> Vec<(Month, u64)> {
    let mut counts = [0u64; 12];
    for record in records {
        counts[record.month.index()] += 1;
    }

    Month::all().iter().copied().zip(counts).collect()
}

/// Record counts by weekday (rows, Monday first) and hour (columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHourMatrix {
    counts: [[u64; HOURS_PER_DAY]; 7],
}

impl DayHourMatrix {
    #[must_use]
    pub const fn get(&self, day: DayOfWeek, hour: usize) -> u64 {
        self.counts[day.index()][hour]
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Rows with empty cells as `None`, so "no data" stays distinct from
    /// a real count.
    #[must_use]
    pub fn to_gapped_rows(&self) -> Vec<Vec<Option<u64>>> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| (c > 0).then_some(c)).collect())
            .collect()
    }
}

/// Builds the weekday × hour count matrix.
#[must_use]
pub fn count_by_day_hour(records: &[&CallRecord]) -> DayHourMatrix {
    let mut counts = [[0u64; HOURS_PER_DAY]; 7];
    for record in records {
        let hour = record.hour as usize;
        if hour < HOURS_PER_DAY {
            counts[record.day_of_week.index()][hour] += 1;
        }
    }
    DayHourMatrix { counts }
}

/// A plotted call location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint<'a> {
    pub lat: f64,
    pub lon: f64,
    pub township: &'a str,
}

/// Map points sharing one reason.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup<'a> {
    pub reason: &'a str,
    pub points: Vec<MapPoint<'a>>,
}

/// Groups located records by reason, in order of each reason's first
/// appearance. Records without coordinates are skipped.
#[must_use]
pub fn group_points_by_reason<'a>(records: &[&'a CallRecord]) -> Vec<PointGroup<'a>> {
    let mut groups: Vec<PointGroup<'a>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some((lat, lon)) = record.coordinates() else {
            continue;
        };
        let reason = record.reason.as_str();
        let slot = *index.entry(reason).or_insert_with(|| {
            groups.push(PointGroup {
                reason,
                points: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].points.push(MapPoint {
            lat,
            lon,
            township: &record.township,
        });
    }

    groups
}

/// Mean coordinate of all grouped points, or `None` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_center(groups: &[PointGroup<'_>]) -> Option<(f64, f64)> {
    let (mut lat, mut lon, mut n) = (0.0, 0.0, 0usize);
    for point in groups.iter().flat_map(|g| &g.points) {
        lat += point.lat;
        lon += point.lon;
        n += 1;
    }
    (n > 0).then(|| (lat / n as f64, lon / n as f64))
}

/// Counts labels, then orders by descending count with ascending label as
/// the tie-break.
fn ranked_counts<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut ranked: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount::new(label, count))
        .collect();
    // Stable sort keeps the BTreeMap's label order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}
