//! HTTP handler functions for the dashboard.

use actix_web::{HttpResponse, http::header::ContentType, web};
use calls_dashboard_calls_models::ReasonFilter;
use calls_dashboard_charts::{aggregate::count_by_reason, build_filtered_dashboard};
use calls_dashboard_server_models::{ApiError, ApiHealth, ApiReasonCount, FilterForm};

use crate::AppState;
use crate::page::render_dashboard;

/// `GET /`
///
/// Renders the dashboard page with charts over the full dataset.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let charts = build_filtered_dashboard(&state.dataset, &ReasonFilter::All);

    match render_dashboard(&charts, &state.dataset.reasons()) {
        Ok(html) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html),
        Err(e) => {
            log::error!("Failed to render dashboard: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Failed to render dashboard".to_string(),
            })
        }
    }
}

/// `POST /filter`
///
/// Rebuilds the charts over the records matching the submitted reason.
/// Unknown reasons produce empty charts.
pub async fn filter(state: web::Data<AppState>, form: web::Form<FilterForm>) -> HttpResponse {
    log::debug!("Filter request: reason={:?}", form.reason);
    let charts = build_filtered_dashboard(&state.dataset, &form.filter());
    HttpResponse::Ok().json(charts)
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len(),
    })
}

/// `GET /api/reasons`
///
/// Lists every reason in the dataset with its call count, most frequent
/// first.
pub async fn reasons(state: web::Data<AppState>) -> HttpResponse {
    let all = state.dataset.select(&ReasonFilter::All);
    let reasons: Vec<ApiReasonCount> = count_by_reason(&all)
        .into_iter()
        .map(|c| ApiReasonCount {
            reason: c.label,
            count: c.count,
        })
        .collect();

    HttpResponse::Ok().json(reasons)
}
