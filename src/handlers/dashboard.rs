// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermViewDashboard, RequirePermission},
    },
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Résumé financier du jour et du mois", body = DashboardSummary),
        (status = 401, description = "Non authentifié"),
        (status = 403, description = "Permission manquante")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewDashboard>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-chart",
    tag = "Dashboard",
    responses((status = 200, description = "Ventes des 30 derniers jours", body = Vec<SalesChartEntry>)),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewDashboard>,
) -> Result<impl IntoResponse, ApiError> {
    let chart = app_state
        .dashboard_service
        .get_sales_chart()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/top-services
#[utoipa::path(
    get,
    path = "/api/dashboard/top-services",
    tag = "Dashboard",
    responses((status = 200, description = "Prestations les plus vendues", body = Vec<TopServiceEntry>)),
    security(("api_jwt" = []))
)]
pub async fn get_top_services(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewDashboard>,
) -> Result<impl IntoResponse, ApiError> {
    let services = app_state
        .dashboard_service
        .get_top_services()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/dashboard/sales-totals
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-totals",
    tag = "Dashboard",
    responses((status = 200, description = "Totaux de ventes jour/mois")),
    security(("api_jwt" = []))
)]
pub async fn sales_totals(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewDashboard>,
) -> Result<impl IntoResponse, ApiError> {
    let map_err = |app_err: crate::common::error::AppError| {
        app_err.to_api_error(&locale, &app_state.i18n_store)
    };

    let daily = app_state.dashboard_service.sales_daily_total().await.map_err(map_err)?;
    let monthly = app_state.dashboard_service.sales_monthly_total().await.map_err(map_err)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "dailyTotal": daily, "monthlyTotal": monthly })),
    ))
}
