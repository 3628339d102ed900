// src/handlers/crm.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermCreateProspects, PermManageQuotes, PermViewCrm, RequirePermission},
    },
    models::crm::{
        Activity, CreateActivityPayload, CreateProspectPayload, CreateQuotePayload, Prospect,
        Quote, UpdateProspectPayload, UpdateQuoteStatusPayload,
    },
};

// =============================================================================
//  PROSPECTS
// =============================================================================

// GET /api/crm/prospects
#[utoipa::path(
    get,
    path = "/api/crm/prospects",
    tag = "CRM",
    responses((status = 200, description = "Liste des prospects", body = Vec<Prospect>)),
    security(("api_jwt" = []))
)]
pub async fn list_prospects(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewCrm>,
) -> Result<impl IntoResponse, ApiError> {
    let prospects = app_state
        .crm_service
        .list_prospects()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(prospects)))
}

// POST /api/crm/prospects
#[utoipa::path(
    post,
    path = "/api/crm/prospects",
    tag = "CRM",
    request_body = CreateProspectPayload,
    responses((status = 201, description = "Prospect créé", body = Prospect)),
    security(("api_jwt" = []))
)]
pub async fn create_prospect(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermCreateProspects>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProspectPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let prospect = app_state
        .crm_service
        .create_prospect(user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(prospect)))
}

// PATCH /api/crm/prospects/{id}
#[utoipa::path(
    patch,
    path = "/api/crm/prospects/{id}",
    tag = "CRM",
    request_body = UpdateProspectPayload,
    responses((status = 200, description = "Prospect mis à jour", body = Prospect)),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn update_prospect(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermCreateProspects>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProspectPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let prospect = app_state
        .crm_service
        .update_prospect(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(prospect)))
}

// DELETE /api/crm/prospects/{id} — la seule suppression physique
#[utoipa::path(
    delete,
    path = "/api/crm/prospects/{id}",
    tag = "CRM",
    responses(
        (status = 204, description = "Prospect supprimé"),
        (status = 404, description = "Prospect introuvable")
    ),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn delete_prospect(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermCreateProspects>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .crm_service
        .delete_prospect(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ACTIVITÉS
// =============================================================================

// GET /api/crm/prospects/{id}/activities
#[utoipa::path(
    get,
    path = "/api/crm/prospects/{id}/activities",
    tag = "CRM",
    responses((status = 200, description = "Activités du prospect", body = Vec<Activity>)),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermViewCrm>,
    Path(prospect_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = app_state
        .crm_service
        .list_activities(prospect_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(activities)))
}

// POST /api/crm/prospects/{id}/activities
#[utoipa::path(
    post,
    path = "/api/crm/prospects/{id}/activities",
    tag = "CRM",
    request_body = CreateActivityPayload,
    responses((status = 201, description = "Activité enregistrée", body = Activity)),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn create_activity(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermCreateProspects>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(prospect_id): Path<Uuid>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let activity = app_state
        .crm_service
        .create_activity(prospect_id, user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(activity)))
}

// =============================================================================
//  DEVIS
// =============================================================================

// GET /api/crm/quotes
#[utoipa::path(
    get,
    path = "/api/crm/quotes",
    tag = "CRM",
    responses((status = 200, description = "Liste des devis", body = Vec<Quote>)),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageQuotes>,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .crm_service
        .list_quotes()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// GET /api/crm/prospects/{id}/quotes
#[utoipa::path(
    get,
    path = "/api/crm/prospects/{id}/quotes",
    tag = "CRM",
    responses((status = 200, description = "Devis du prospect", body = Vec<Quote>)),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn list_quotes_for_prospect(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageQuotes>,
    Path(prospect_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .crm_service
        .list_quotes_for_prospect(prospect_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quotes)))
}

// POST /api/crm/prospects/{id}/quotes
#[utoipa::path(
    post,
    path = "/api/crm/prospects/{id}/quotes",
    tag = "CRM",
    request_body = CreateQuotePayload,
    responses((status = 201, description = "Devis créé", body = Quote)),
    params(("id" = Uuid, Path, description = "ID du prospect")),
    security(("api_jwt" = []))
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageQuotes>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(prospect_id): Path<Uuid>,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .crm_service
        .create_quote(prospect_id, user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// PATCH /api/crm/quotes/{id}/status
#[utoipa::path(
    patch,
    path = "/api/crm/quotes/{id}/status",
    tag = "CRM",
    request_body = UpdateQuoteStatusPayload,
    responses((status = 200, description = "Statut du devis mis à jour", body = Quote)),
    params(("id" = Uuid, Path, description = "ID du devis")),
    security(("api_jwt" = []))
)]
pub async fn update_quote_status(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageQuotes>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .crm_service
        .update_quote_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}
