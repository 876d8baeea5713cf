#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the emergency calls dashboard
//! server.
//!
//! Chart payloads are serialized straight from the chart models; the types
//! here cover the filter form and the small JSON endpoints.

use calls_dashboard_calls_models::{ALL_REASONS, ReasonFilter};
use serde::{Deserialize, Serialize};

/// Form body of `POST /filter`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterForm {
    /// Reason to filter by, or `"all"`.
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    ALL_REASONS.to_string()
}

impl FilterForm {
    /// The filter this form selects.
    #[must_use]
    pub fn filter(&self) -> ReasonFilter {
        ReasonFilter::parse(&self.reason)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of loaded call records.
    pub records: usize,
}

/// A reason and how many calls carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReasonCount {
    /// Reason name.
    pub reason: String,
    /// Number of calls.
    pub count: u64,
}

/// Error body returned on a failed request.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_form_defaults_to_all() {
        let form: FilterForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.reason, "all");
        assert_eq!(form.filter(), ReasonFilter::All);
    }

    #[test]
    fn filter_form_selects_reason() {
        let form: FilterForm = serde_json::from_str(r#"{"reason":"Fire"}"#).unwrap();
        assert_eq!(form.filter(), ReasonFilter::Reason("Fire".to_string()));
    }

    #[test]
    fn health_is_camel_case() {
        let json = serde_json::to_value(ApiHealth {
            healthy: true,
            version: "0.1.0".to_string(),
            records: 3,
        })
        .unwrap();
        assert_eq!(json["healthy"], true);
        assert_eq!(json["records"], 3);
    }
}
