//! Builders that turn aggregations into chart documents.

use calls_dashboard_calls_models::{CallRecord, DayOfWeek};
use calls_dashboard_charts_models::{ChartDocument, ChartKind, LabelCount};
use plotly::{
    Bar, HeatMap, Layout, Plot, Scatter, ScatterMapbox, Trace,
    common::{ColorScale, ColorScalePalette, Mode, Orientation, Title},
    layout::{Axis, AxisType, Center, Legend, Mapbox, MapboxStyle},
};

use crate::aggregate::{
    HOURS_PER_DAY, count_by_day_hour, count_by_month, count_by_reason, group_points_by_reason,
    mean_center, top_townships,
};

/// Number of townships shown in the top-locations chart.
pub const TOP_TOWNSHIP_LIMIT: usize = 10;

const CALLS_AXIS: &str = "Number of Calls";
const MAP_ZOOM: u8 = 10;

/// Category distribution: one vertical bar per reason.
#[must_use]
pub fn reason_chart(records: &[&CallRecord]) -> ChartDocument {
    let mut plot = Plot::new();
    for count in count_by_reason(records) {
        plot.add_trace(bar_trace(count, Orientation::Vertical));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Distribution of 911 Calls by Reason"))
            .x_axis(titled_axis("Reason").type_(AxisType::Category))
            .y_axis(titled_axis(CALLS_AXIS))
            .legend(Legend::new().title(Title::with_text("Reason"))),
    );

    ChartDocument::new(ChartKind::Bar, plot)
}

/// Monthly trend: a single line over all 12 months.
#[must_use]
pub fn monthly_chart(records: &[&CallRecord]) -> ChartDocument {
    let (months, counts): (Vec<String>, Vec<u64>) = count_by_month(records)
        .into_iter()
        .map(|(month, count)| (month.to_string(), count))
        .unzip();

    let mut plot = Plot::new();
    plot.add_trace(Scatter::new(months, counts).mode(Mode::LinesMarkers));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("911 Call Volume by Month"))
            .x_axis(titled_axis("Month").type_(AxisType::Category))
            .y_axis(titled_axis(CALLS_AXIS)),
    );

    ChartDocument::new(ChartKind::Line, plot)
}

/// Day/hour heatmap: Monday→Sunday by hour 0-23, empty cells as gaps.
#[must_use]
pub fn heatmap_chart(records: &[&CallRecord]) -> ChartDocument {
    let matrix = count_by_day_hour(records);

    #[allow(clippy::cast_possible_truncation)]
    let hours: Vec<u32> = (0..HOURS_PER_DAY as u32).collect();
    let days: Vec<String> = DayOfWeek::all().iter().map(ToString::to_string).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        HeatMap::new(hours, days, matrix.to_gapped_rows())
            .color_scale(ColorScale::Palette(ColorScalePalette::YlOrRd))
            .hover_on_gaps(false),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("911 Calls by Day of Week and Hour"))
            .x_axis(titled_axis("Hour of Day"))
            .y_axis(titled_axis("Day of Week").type_(AxisType::Category)),
    );

    ChartDocument::new(ChartKind::Heatmap, plot)
}

/// Geographic scatter: one trace per reason, hover shows reason and
/// township only.
#[must_use]
pub fn map_chart(records: &[&CallRecord]) -> ChartDocument {
    let groups = group_points_by_reason(records);
    let center = mean_center(&groups);

    let mut plot = Plot::new();
    for group in &groups {
        let lats: Vec<f64> = group.points.iter().map(|p| p.lat).collect();
        let lons: Vec<f64> = group.points.iter().map(|p| p.lon).collect();
        let townships: Vec<String> = group.points.iter().map(|p| p.township.to_string()).collect();

        let trace = ScatterMapbox::new(lats, lons)
            .name(group.reason)
            .legend_group(group.reason)
            .mode(Mode::Markers)
            .text_array(townships)
            .hover_template(&map_hover_template(group.reason));
        plot.add_trace(trace);
    }

    let mut mapbox = Mapbox::new().style(MapboxStyle::OpenStreetMap).zoom(MAP_ZOOM);
    if let Some((lat, lon)) = center {
        mapbox = mapbox.center(Center::new(lat, lon));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Geographic Distribution of 911 Calls"))
            .legend(Legend::new().title(Title::with_text("reason")))
            .mapbox(mapbox),
    );

    ChartDocument::new(ChartKind::ScatterMap, plot)
}

/// Top townships: horizontal bars, busiest at the top.
///
/// Plotly stacks category rows bottom-up in trace order, so traces are
/// added least busy first.
#[must_use]
pub fn township_chart(records: &[&CallRecord]) -> ChartDocument {
    let mut plot = Plot::new();
    for count in top_townships(records, TOP_TOWNSHIP_LIMIT).into_iter().rev() {
        plot.add_trace(bar_trace(count, Orientation::Horizontal));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Top 10 Townships by 911 Call Volume"))
            .x_axis(titled_axis(CALLS_AXIS))
            .y_axis(titled_axis("Township").type_(AxisType::Category))
            .legend(Legend::new().title(Title::with_text("Township"))),
    );

    ChartDocument::new(ChartKind::HorizontalBar, plot)
}

fn titled_axis(text: &str) -> Axis {
    Axis::new().title(Title::with_text(text))
}

/// `reason=<reason><br>twp=<township>`, with the township taken from each
/// point's text. Coordinates are left out.
fn map_hover_template(reason: &str) -> String {
    format!("reason={reason}<br>twp=%{{text}}<extra></extra>")
}

/// A single-bar trace, so each category gets its own color and legend
/// entry.
fn bar_trace(count: LabelCount, orientation: Orientation) -> Box<dyn Trace> {
    let LabelCount { label, count } = count;
    if matches!(orientation, Orientation::Horizontal) {
        return Bar::new(vec![count], vec![label.clone()])
            .name(&label)
            .legend_group(&label)
            .orientation(orientation);
    }
    Bar::new(vec![label.clone()], vec![count])
        .name(&label)
        .legend_group(&label)
        .orientation(orientation)
}
