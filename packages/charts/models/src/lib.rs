#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart document types for the dashboard.
//!
//! A [`ChartDocument`] pairs a [`ChartKind`] with a `plotly` figure. It
//! serializes as the figure JSON (`data`, `layout`, `config`) plus a `kind`
//! field, so the page script can hand `doc.data` and `doc.layout` to
//! `Plotly.react` unchanged.

use plotly::Plot;
use serde::{Deserialize, Serialize};

/// What a chart depicts, independent of the trace encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bars, one per category.
    Bar,
    /// Line with markers over an ordered axis.
    Line,
    /// Two-dimensional count matrix.
    Heatmap,
    /// Points on a map.
    ScatterMap,
    /// Horizontal bars, one per category.
    HorizontalBar,
}

/// A label paired with a record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

impl LabelCount {
    #[must_use]
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A complete, serializable chart.
#[derive(Clone, Serialize)]
pub struct ChartDocument {
    pub kind: ChartKind,
    #[serde(flatten)]
    pub figure: Plot,
}

impl ChartDocument {
    #[must_use]
    pub const fn new(kind: ChartKind, figure: Plot) -> Self {
        Self { kind, figure }
    }
}

/// The five dashboard charts, keyed the way the page script expects.
#[derive(Clone, Serialize)]
pub struct DashboardCharts {
    pub reason_plot: ChartDocument,
    pub monthly_plot: ChartDocument,
    pub heatmap_plot: ChartDocument,
    pub map_plot: ChartDocument,
    pub township_plot: ChartDocument,
}
