// src/handlers/finance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermControlBalance, PermControlDebt, PermControlExpense, RequirePermission},
    },
    models::access::Permission,
    models::finance::{
        BalanceRecord, CreateBalanceRecordPayload, CreateDebtPayload, CreateExpensePayload, Debt,
        Expense, SystemBalance, UpdateExpensePayload,
    },
};

// =============================================================================
//  DÉPENSES
// =============================================================================

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Finance",
    responses((status = 200, description = "Liste des dépenses", body = Vec<Expense>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlExpense>,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = app_state
        .finance_service
        .list_expenses()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expenses)))
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Finance",
    request_body = CreateExpensePayload,
    responses((status = 201, description = "Dépense créée", body = Expense)),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlExpense>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state
        .finance_service
        .create_expense(user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

// PATCH /api/expenses/{id}
#[utoipa::path(
    patch,
    path = "/api/expenses/{id}",
    tag = "Finance",
    request_body = UpdateExpensePayload,
    responses((status = 200, description = "Dépense mise à jour", body = Expense)),
    params(("id" = Uuid, Path, description = "ID de la dépense")),
    security(("api_jwt" = []))
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlExpense>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state
        .finance_service
        .update_expense(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expense)))
}

// POST /api/expenses/{id}/approve
#[utoipa::path(
    post,
    path = "/api/expenses/{id}/approve",
    tag = "Finance",
    responses((status = 200, description = "Dépense approuvée (idempotent)", body = Expense)),
    params(("id" = Uuid, Path, description = "ID de la dépense")),
    security(("api_jwt" = []))
)]
pub async fn approve_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlExpense>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = app_state
        .finance_service
        .approve_expense(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expense)))
}

// GET /api/expenses/totals
#[utoipa::path(
    get,
    path = "/api/expenses/totals",
    tag = "Finance",
    responses((status = 200, description = "Totaux jour/mois et compteurs de dépenses non approuvées")),
    security(("api_jwt" = []))
)]
pub async fn expense_totals(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlExpense>,
) -> Result<impl IntoResponse, ApiError> {
    let map_err = |app_err: AppError| app_err.to_api_error(&locale, &app_state.i18n_store);

    let daily = app_state.dashboard_service.expenses_daily_total().await.map_err(map_err)?;
    let monthly = app_state.dashboard_service.expenses_monthly_total().await.map_err(map_err)?;
    let unapproved_daily = app_state
        .dashboard_service
        .unapproved_expenses_daily_count()
        .await
        .map_err(map_err)?;
    let unapproved_monthly = app_state
        .dashboard_service
        .unapproved_expenses_monthly_count()
        .await
        .map_err(map_err)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "dailyTotal": daily,
            "monthlyTotal": monthly,
            "unapprovedDailyCount": unapproved_daily,
            "unapprovedMonthlyCount": unapproved_monthly,
        })),
    ))
}

// =============================================================================
//  SOLDES
// =============================================================================

// GET /api/balances/records
#[utoipa::path(
    get,
    path = "/api/balances/records",
    tag = "Finance",
    responses((status = 200, description = "Mouvements de solde", body = Vec<BalanceRecord>)),
    security(("api_jwt" = []))
)]
pub async fn list_balance_records(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlBalance>,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .finance_service
        .list_balance_records()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(records)))
}

// POST /api/balances/records
#[utoipa::path(
    post,
    path = "/api/balances/records",
    tag = "Finance",
    request_body = CreateBalanceRecordPayload,
    responses((status = 201, description = "Mouvement enregistré", body = BalanceRecord)),
    security(("api_jwt" = []))
)]
pub async fn create_balance_record(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlBalance>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBalanceRecordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = app_state
        .finance_service
        .record_balance_movement(user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(record)))
}

// GET /api/balances
// Pas de gardien générique : un fournisseur ne voit QUE le solde de
// son propre canal, les autres rôles passent par balance:control.
#[utoipa::path(
    get,
    path = "/api/balances",
    tag = "Finance",
    responses((status = 200, description = "Soldes par canal", body = Vec<SystemBalance>)),
    security(("api_jwt" = []))
)]
pub async fn all_system_balances(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state.access_service.resolve_role(&user).await;

    if let Some(system) = role.and_then(|r| r.supplier_system()) {
        let balance = app_state
            .finance_service
            .system_balance(system)
            .await
            .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

        return Ok((StatusCode::OK, Json(vec![SystemBalance { system, balance }])));
    }

    match role {
        Some(r) if r.can_control_balance() => {}
        _ => {
            return Err(AppError::AccessDenied(Permission::ControlBalance.slug())
                .to_api_error(&locale, &app_state.i18n_store));
        }
    }

    let balances = app_state
        .finance_service
        .all_system_balances()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(balances)))
}

// =============================================================================
//  DETTES
// =============================================================================

// GET /api/debts
#[utoipa::path(
    get,
    path = "/api/debts",
    tag = "Finance",
    responses((status = 200, description = "Liste des dettes", body = Vec<Debt>)),
    security(("api_jwt" = []))
)]
pub async fn list_debts(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlDebt>,
) -> Result<impl IntoResponse, ApiError> {
    let debts = app_state
        .finance_service
        .list_debts()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(debts)))
}

// POST /api/debts
#[utoipa::path(
    post,
    path = "/api/debts",
    tag = "Finance",
    request_body = CreateDebtPayload,
    responses((status = 201, description = "Dette créée", body = Debt)),
    security(("api_jwt" = []))
)]
pub async fn create_debt(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlDebt>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateDebtPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let debt = app_state
        .finance_service
        .create_debt(user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(debt)))
}

// POST /api/debts/{id}/settle
#[utoipa::path(
    post,
    path = "/api/debts/{id}/settle",
    tag = "Finance",
    responses((status = 204, description = "Dette soldée")),
    params(("id" = Uuid, Path, description = "ID de la dette")),
    security(("api_jwt" = []))
)]
pub async fn settle_debt(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermControlDebt>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .settle_debt(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
