// src/handlers/omra.rs

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
        rbac::{PermManageOmra, RequirePermission},
    },
    models::omra::{
        CreateHotelPayload, CreatePaymentPayload, CreatePelerinPayload, CreateProgramPayload,
        Hotel, OmraProgram, Pelerin, PelerinAccount, PelerinPayment, UpdateProgramPayload,
    },
};

// GET /api/omra/hotels
#[utoipa::path(
    get,
    path = "/api/omra/hotels",
    tag = "Omra",
    responses((status = 200, description = "Hôtels référencés", body = Vec<Hotel>)),
    security(("api_jwt" = []))
)]
pub async fn list_hotels(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
) -> Result<impl IntoResponse, ApiError> {
    let hotels = app_state
        .omra_service
        .list_hotels()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(hotels)))
}

// POST /api/omra/hotels
#[utoipa::path(
    post,
    path = "/api/omra/hotels",
    tag = "Omra",
    request_body = CreateHotelPayload,
    responses((status = 201, description = "Hôtel créé", body = Hotel)),
    security(("api_jwt" = []))
)]
pub async fn create_hotel(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Json(payload): Json<CreateHotelPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let hotel = app_state
        .omra_service
        .create_hotel(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(hotel)))
}

// GET /api/omra/programs
#[utoipa::path(
    get,
    path = "/api/omra/programs",
    tag = "Omra",
    responses((status = 200, description = "Programmes Omra", body = Vec<OmraProgram>)),
    security(("api_jwt" = []))
)]
pub async fn list_programs(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = app_state
        .omra_service
        .list_programs()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(programs)))
}

// POST /api/omra/programs
#[utoipa::path(
    post,
    path = "/api/omra/programs",
    tag = "Omra",
    request_body = CreateProgramPayload,
    responses((status = 201, description = "Programme créé", body = OmraProgram)),
    security(("api_jwt" = []))
)]
pub async fn create_program(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Json(payload): Json<CreateProgramPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let program = app_state
        .omra_service
        .create_program(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(program)))
}

// PATCH /api/omra/programs/{id}
#[utoipa::path(
    patch,
    path = "/api/omra/programs/{id}",
    tag = "Omra",
    request_body = UpdateProgramPayload,
    responses((status = 200, description = "Programme mis à jour", body = OmraProgram)),
    params(("id" = Uuid, Path, description = "ID du programme")),
    security(("api_jwt" = []))
)]
pub async fn update_program(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProgramPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let program = app_state
        .omra_service
        .update_program(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(program)))
}

// GET /api/omra/programs/{id}/pelerins
#[utoipa::path(
    get,
    path = "/api/omra/programs/{id}/pelerins",
    tag = "Omra",
    responses((status = 200, description = "Pèlerins du programme", body = Vec<Pelerin>)),
    params(("id" = Uuid, Path, description = "ID du programme")),
    security(("api_jwt" = []))
)]
pub async fn list_pelerins(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Path(program_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pelerins = app_state
        .omra_service
        .list_pelerins(program_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(pelerins)))
}

// POST /api/omra/programs/{id}/pelerins
#[utoipa::path(
    post,
    path = "/api/omra/programs/{id}/pelerins",
    tag = "Omra",
    request_body = CreatePelerinPayload,
    responses((status = 201, description = "Pèlerin inscrit", body = Pelerin)),
    params(("id" = Uuid, Path, description = "ID du programme")),
    security(("api_jwt" = []))
)]
pub async fn register_pelerin(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(program_id): Path<Uuid>,
    Json(payload): Json<CreatePelerinPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let pelerin = app_state
        .omra_service
        .register_pelerin(program_id, user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(pelerin)))
}

// GET /api/omra/pelerins/{id}/account
#[utoipa::path(
    get,
    path = "/api/omra/pelerins/{id}/account",
    tag = "Omra",
    responses((status = 200, description = "État de compte du pèlerin", body = PelerinAccount)),
    params(("id" = Uuid, Path, description = "ID du pèlerin")),
    security(("api_jwt" = []))
)]
pub async fn pelerin_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Path(pelerin_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let account = app_state
        .omra_service
        .pelerin_account(pelerin_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(account)))
}

// GET /api/omra/pelerins/{id}/payments
#[utoipa::path(
    get,
    path = "/api/omra/pelerins/{id}/payments",
    tag = "Omra",
    responses((status = 200, description = "Versements du pèlerin", body = Vec<PelerinPayment>)),
    params(("id" = Uuid, Path, description = "ID du pèlerin")),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    Path(pelerin_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = app_state
        .omra_service
        .list_payments(pelerin_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(payments)))
}

// POST /api/omra/pelerins/{id}/payments
#[utoipa::path(
    post,
    path = "/api/omra/pelerins/{id}/payments",
    tag = "Omra",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Versement enregistré", body = PelerinPayment),
        (status = 422, description = "Le versement dépasse le restant dû")
    ),
    params(("id" = Uuid, Path, description = "ID du pèlerin")),
    security(("api_jwt" = []))
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageOmra>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(pelerin_id): Path<Uuid>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = app_state
        .omra_service
        .record_payment(pelerin_id, user.id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(payment)))
}
