use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        analytics::{AnalyticsDto, DashboardDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::analytics::AnalyticsWindow,
        service::analytics::AnalyticsService,
        state::AppState,
        util::extract::ApiQuery,
    },
};

pub static ANALYTICS_TAG: &str = "analytics";

/// Reporting window as RFC 3339 timestamps.
#[derive(Deserialize, Debug)]
pub struct AnalyticsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub top: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = ANALYTICS_TAG,
    params(
        ("from" = Option<String>, Query, description = "Window start, RFC 3339 (default: 30 days before `to`)"),
        ("to" = Option<String>, Query, description = "Window end, exclusive, RFC 3339 (default: now)"),
        ("top" = Option<usize>, Query, description = "Number of top products (default: 5, max: 50)")
    ),
    responses(
        (status = 200, description = "Sales and subscription figures for the window", body = AnalyticsDto),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let window = AnalyticsWindow::resolve(query.from, query.to, query.top, Utc::now())?;

    let analytics = AnalyticsService::new(&state.db).analytics(window).await?;

    Ok((StatusCode::OK, Json(analytics.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Operational snapshot", body = DashboardDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let dashboard = AnalyticsService::new(&state.db)
        .dashboard(Utc::now(), state.low_stock_threshold)
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}
