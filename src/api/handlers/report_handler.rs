//! Reporting handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use crate::api::AppState;
use crate::domain::{Dashboard, ReportFilter, ReportRow, ReportSummary};
use crate::errors::{AppError, AppResult};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(report))
        .route("/reports/summary", get(summary))
        .route("/dashboard", get(dashboard))
}

fn report_filter(query: Result<Query<ReportFilter>, QueryRejection>) -> AppResult<ReportFilter> {
    query
        .map(|Query(filter)| filter)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Sessions joined with slot status and payments
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    params(ReportFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report rows, newest entry first", body = Vec<ReportRow>),
        (status = 400, description = "Invalid filter or date range"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn report(
    State(state): State<AppState>,
    query: Result<Query<ReportFilter>, QueryRejection>,
) -> AppResult<Json<Vec<ReportRow>>> {
    let filter = report_filter(query)?;
    Ok(Json(state.report_service.report(filter).await?))
}

/// Revenue, duration and occupancy statistics
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    params(ReportFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Summary statistics", body = ReportSummary),
        (status = 400, description = "Invalid filter or date range"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    query: Result<Query<ReportFilter>, QueryRejection>,
) -> AppResult<Json<ReportSummary>> {
    let filter = report_filter(query)?;
    Ok(Json(state.report_service.summary(filter, Utc::now()).await?))
}

/// Occupancy and today's activity
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<Dashboard>> {
    Ok(Json(state.report_service.dashboard(Utc::now()).await?))
}
