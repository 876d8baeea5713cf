#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and chart building for the emergency calls dashboard.
//!
//! [`build_dashboard`] is a pure function from a record set (the full
//! dataset or a filtered subset) to the five dashboard chart documents.
//! An empty record set is valid and yields empty charts, with the monthly
//! trend still listing all twelve months at zero.

pub mod aggregate;
pub mod figures;

use calls_dashboard_calls_models::{CallDataset, CallRecord, ReasonFilter};
use calls_dashboard_charts_models::DashboardCharts;

pub use figures::{
    TOP_TOWNSHIP_LIMIT, heatmap_chart, map_chart, monthly_chart, reason_chart, township_chart,
};

/// Builds all five charts over `records`.
#[must_use]
pub fn build_dashboard(records: &[&CallRecord]) -> DashboardCharts {
    DashboardCharts {
        reason_plot: reason_chart(records),
        monthly_plot: monthly_chart(records),
        heatmap_plot: heatmap_chart(records),
        map_plot: map_chart(records),
        township_plot: township_chart(records),
    }
}

/// Selects the records passing `filter` and builds the charts over them.
#[must_use]
pub fn build_filtered_dashboard(dataset: &CallDataset, filter: &ReasonFilter) -> DashboardCharts {
    let records = dataset.select(filter);
    log::debug!(
        "Building dashboard over {} of {} records ({filter:?})",
        records.len(),
        dataset.len()
    );
    build_dashboard(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calls_dashboard_charts_models::ChartDocument;
    use chrono::{Duration, NaiveDate};
    use serde_json::Value;

    fn record(title: &str, township: &str, month: u32, day: u32, hour: u32) -> CallRecord {
        CallRecord::new(
            NaiveDate::from_ymd_opt(2016, month, day)
                .unwrap()
                .and_hms_opt(hour, 30, 0)
                .unwrap(),
            Some(40.1),
            Some(-75.3),
            township.to_string(),
            "19401".to_string(),
            title.to_string(),
            None,
            None,
            None,
        )
    }

    fn sample() -> CallDataset {
        CallDataset::new(vec![
            record("EMS: BACK PAINS/INJURY", "NEW HANOVER", 1, 4, 17),
            record("Fire: GAS-ODOR/LEAK", "HATFIELD TOWNSHIP", 1, 5, 17),
            record("EMS: DIABETIC EMERGENCY", "NORRISTOWN", 2, 9, 8),
            record("Traffic: VEHICLE ACCIDENT -", "NORRISTOWN", 7, 13, 23),
            record("EMS: FALL VICTIM", "LOWER MERION", 12, 10, 0),
        ])
    }

    fn json(doc: &ChartDocument) -> Value {
        serde_json::to_value(doc).unwrap()
    }

    /// `(name, count)` per bar trace, in trace order.
    fn bars(doc: &ChartDocument) -> Vec<(String, u64)> {
        let json = json(doc);
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| {
                assert_eq!(t["type"], "bar");
                let count_axis = if t["orientation"] == "h" { "x" } else { "y" };
                (
                    t["name"].as_str().unwrap().to_string(),
                    t[count_axis][0].as_u64().unwrap(),
                )
            })
            .collect()
    }

    fn monthly_counts(doc: &ChartDocument) -> (Vec<String>, Vec<u64>) {
        let json = json(doc);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["type"], "scatter");
        let months = data[0]["x"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m.as_str().unwrap().to_string())
            .collect();
        let counts = data[0]["y"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_u64().unwrap())
            .collect();
        (months, counts)
    }

    fn heatmap(doc: &ChartDocument) -> Value {
        let json = json(doc);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["type"], "heatmap");
        data[0].clone()
    }

    fn heatmap_total(trace: &Value) -> u64 {
        trace["z"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|row| row.as_array().unwrap())
            .filter_map(Value::as_u64)
            .sum()
    }

    #[test]
    fn three_record_dataset_counts() {
        let dataset = CallDataset::new(vec![
            record("EMS: FALL", "A", 1, 4, 1),
            record("Fire: ALARM", "A", 1, 5, 1),
            record("EMS: FALL", "A", 2, 1, 1),
        ]);
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);

        assert_eq!(
            bars(&charts.reason_plot),
            vec![("EMS".to_string(), 2), ("Fire".to_string(), 1)]
        );

        let (months, counts) = monthly_counts(&charts.monthly_plot);
        assert_eq!(months[0], "January");
        assert_eq!(months[11], "December");
        assert_eq!(counts, vec![2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn monthly_and_heatmap_sum_to_input_size() {
        let dataset = sample();
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);

        let (months, counts) = monthly_counts(&charts.monthly_plot);
        assert_eq!(months.len(), 12);
        assert_eq!(counts.iter().sum::<u64>(), 5);

        let h = heatmap(&charts.heatmap_plot);
        assert_eq!(
            h["y"],
            serde_json::json!([
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday"
            ])
        );
        assert_eq!(h["z"].as_array().unwrap().len(), 7);
        assert_eq!(h["x"].as_array().unwrap().len(), 24);
        assert_eq!(h["colorscale"], "YlOrRd");
        assert_eq!(h["hoverongaps"], false);
        assert_eq!(heatmap_total(&h), 5);
    }

    #[test]
    fn sums_hold_across_generated_record_sets() {
        let start = NaiveDate::from_ymd_opt(2015, 12, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let titles = ["EMS: FALL", "Fire: ALARM", "Traffic: HAZARD"];

        for (size, step_hours) in [(1usize, 1i64), (17, 5), (90, 37), (400, 29)] {
            let records: Vec<CallRecord> = (0..size)
                .map(|i| {
                    #[allow(clippy::cast_possible_wrap)]
                    let at = start + Duration::hours(i as i64 * step_hours);
                    CallRecord::new(
                        at,
                        None,
                        None,
                        "A".to_string(),
                        "19401".to_string(),
                        titles[i % titles.len()].to_string(),
                        None,
                        None,
                        None,
                    )
                })
                .collect();
            let dataset = CallDataset::new(records);
            let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);

            let (months, counts) = monthly_counts(&charts.monthly_plot);
            assert_eq!(months.len(), 12);
            assert_eq!(counts.iter().sum::<u64>(), size as u64, "size {size}");

            let h = heatmap(&charts.heatmap_plot);
            assert_eq!(h["z"].as_array().unwrap().len(), 7);
            assert_eq!(heatmap_total(&h), size as u64, "size {size}");

            let reason_total: u64 = bars(&charts.reason_plot).iter().map(|(_, c)| c).sum();
            assert_eq!(reason_total, size as u64, "size {size}");
        }
    }

    #[test]
    fn heatmap_rows_are_days_and_columns_are_hours() {
        // 2016-01-06 was a Wednesday, 2016-01-09 a Saturday.
        let dataset = CallDataset::new(vec![
            record("EMS: FALL", "A", 1, 6, 0),
            record("EMS: FALL", "A", 1, 9, 22),
            record("EMS: FALL", "A", 1, 9, 22),
        ]);
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);
        let h = heatmap(&charts.heatmap_plot);

        // Default y direction: the first row (Monday) is drawn at the bottom.
        let layout = &json(&charts.heatmap_plot)["layout"];
        assert!(layout["yaxis"]["autorange"].is_null());
        assert_eq!(layout["yaxis"]["title"]["text"], "Day of Week");

        let hours: Vec<u64> = h["x"]
            .as_array()
            .unwrap()
            .iter()
            .map(|x| x.as_u64().unwrap())
            .collect();
        assert_eq!(hours, (0..24).collect::<Vec<u64>>());

        let z = h["z"].as_array().unwrap();
        for (day, row) in z.iter().enumerate() {
            let row = row.as_array().unwrap();
            assert_eq!(row.len(), 24);
            for (hour, cell) in row.iter().enumerate() {
                let expected = match (day, hour) {
                    (2, 0) => serde_json::json!(1),
                    (5, 22) => serde_json::json!(2),
                    _ => Value::Null,
                };
                assert_eq!(*cell, expected, "day {day} hour {hour}");
            }
        }
    }

    #[test]
    fn single_reason_filter_gives_one_bar() {
        let dataset = sample();
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::parse("EMS"));

        assert_eq!(bars(&charts.reason_plot), vec![("EMS".to_string(), 3)]);
        assert_eq!(heatmap_total(&heatmap(&charts.heatmap_plot)), 3);
    }

    #[test]
    fn unmatched_filter_gives_empty_charts() {
        let dataset = sample();
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::parse("Police"));

        let (months, counts) = monthly_counts(&charts.monthly_plot);
        assert_eq!(months.len(), 12);
        assert!(counts.iter().all(|c| *c == 0));

        let h = heatmap(&charts.heatmap_plot);
        assert!(
            h["z"]
                .as_array()
                .unwrap()
                .iter()
                .flat_map(|row| row.as_array().unwrap())
                .all(Value::is_null)
        );

        assert!(bars(&charts.reason_plot).is_empty());
        assert!(bars(&charts.township_plot).is_empty());

        let map = json(&charts.map_plot);
        assert_eq!(map["data"], serde_json::json!([]));
        assert!(map["layout"]["mapbox"]["center"].is_null());
    }

    #[test]
    fn building_twice_is_identical() {
        let dataset = sample();
        let first = build_filtered_dashboard(&dataset, &ReasonFilter::All);
        let second = build_filtered_dashboard(&dataset, &ReasonFilter::All);

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn top_townships_drawn_busiest_at_top() {
        let dataset = sample();
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);

        assert_eq!(json(&charts.township_plot)["kind"], "horizontal_bar");

        // The last trace is the topmost category row.
        let mut ranked = bars(&charts.township_plot);
        ranked.reverse();
        assert_eq!(
            ranked,
            vec![
                ("NORRISTOWN".to_string(), 2),
                ("HATFIELD TOWNSHIP".to_string(), 1),
                ("LOWER MERION".to_string(), 1),
                ("NEW HANOVER".to_string(), 1),
            ]
        );
    }

    #[test]
    fn map_hover_hides_coordinates() {
        let dataset = sample();
        let charts = build_filtered_dashboard(&dataset, &ReasonFilter::All);

        let json = json(&charts.map_plot);
        let first = &json["data"][0];
        assert_eq!(first["type"], "scattermapbox");
        assert_eq!(first["name"], "EMS");
        assert_eq!(first["text"][0], "NEW HANOVER");
        let template = first["hovertemplate"].as_str().unwrap();
        assert!(template.contains("reason=EMS"));
        assert!(template.contains("twp="));
        assert!(!template.contains("lat"));
        assert_eq!(json["layout"]["mapbox"]["style"], "open-street-map");
        assert_eq!(json["layout"]["mapbox"]["zoom"], 10);
        assert!((json["layout"]["mapbox"]["center"]["lat"].as_f64().unwrap() - 40.1).abs() < 1e-9);
    }

    #[test]
    fn dashboard_serializes_expected_keys() {
        let charts = build_dashboard(&[]);
        let json = serde_json::to_value(&charts).unwrap();
        for key in [
            "reason_plot",
            "monthly_plot",
            "heatmap_plot",
            "map_plot",
            "township_plot",
        ] {
            assert!(json[key]["layout"]["title"]["text"].is_string(), "{key}");
            assert!(json[key]["kind"].is_string(), "{key}");
        }
    }
}
