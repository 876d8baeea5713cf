//! Dashboard page rendering.
//!
//! The page template carries two placeholders: `{{charts}}` receives the
//! chart documents as a JSON object literal and `{{reason_options}}` the
//! `<option>` elements of the reason filter.

use calls_dashboard_calls_models::ALL_REASONS;
use calls_dashboard_charts_models::DashboardCharts;

const TEMPLATE: &str = include_str!("../templates/index.html");

/// Renders the dashboard page.
///
/// # Errors
///
/// Returns an error if the charts fail to serialize.
pub fn render_dashboard(
    charts: &DashboardCharts,
    reasons: &[&str],
) -> Result<String, serde_json::Error> {
    let charts_json = serde_json::to_string(charts)?;

    let options: String = std::iter::once(format!(
        r#"<option value="{ALL_REASONS}" selected>All reasons</option>"#
    ))
    .chain(reasons.iter().map(|reason| {
        let escaped = escape_html(reason);
        format!(r#"<option value="{escaped}">{escaped}</option>"#)
    }))
    .collect();

    Ok(TEMPLATE
        .replace("{{reason_options}}", &options)
        .replace("{{charts}}", &escape_script(&charts_json)))
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
